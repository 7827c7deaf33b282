// ============================================================================
// INCREMENTAL DOM UPDATES - Actualización incremental del DOM
// ============================================================================
// Solo actualiza elementos específicos que cambiaron, sin re-renderizar todo.
// Si el elemento no está montado (otra vista activa) no hace nada.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{clear_children, get_element_by_id, replace_children, set_disabled, set_text_content, toggle_class};
use crate::state::app_state::AppState;
use crate::views::auth::{submit_label as auth_submit_label, AUTH_ERROR_ID, AUTH_SUBMIT_ID};
use crate::views::dashboard::{render_dashboard_content, DASHBOARD_MAIN_ID, PAYOUT_MODAL_ROOT_ID};
use crate::views::payout_modal::{render_payout_modal, submit_label as payout_submit_label, PAYOUT_ERROR_ID, PAYOUT_SUBMIT_ID};

/// Botón de submit y error inline del formulario de auth
pub fn update_auth_form(state: &AppState) -> Result<(), JsValue> {
    let loading = state.auth.get_loading();

    if let Some(button) = get_element_by_id(AUTH_SUBMIT_ID) {
        set_disabled(&button, loading)?;
        set_text_content(&button, auth_submit_label(state.auth.get_mode(), loading));
    }

    if let Some(error_el) = get_element_by_id(AUTH_ERROR_ID) {
        update_error(&error_el, state.auth.get_error())?;
    }

    Ok(())
}

/// Reconstruir el contenido de `#dashboard-main` (métricas + listas)
pub fn update_dashboard_data(state: &AppState) -> Result<(), JsValue> {
    let Some(main) = get_element_by_id(DASHBOARD_MAIN_ID) else {
        log::debug!("🔵 [DOM] #{} no montado, se omite", DASHBOARD_MAIN_ID);
        return Ok(());
    };
    replace_children(&main, &render_dashboard_content(state)?)
}

/// Abrir / cerrar el modal de payout, o solo refrescar botón y error si ya está abierto
pub fn update_payout_modal(state: &AppState) -> Result<(), JsValue> {
    let Some(root) = get_element_by_id(PAYOUT_MODAL_ROOT_ID) else {
        return Ok(());
    };

    if !state.dashboard.is_payout_form_open() {
        clear_children(&root);
        return Ok(());
    }

    // Modal ya montado: no tocar los inputs (perderían foco)
    if let Some(button) = get_element_by_id(PAYOUT_SUBMIT_ID) {
        let submitting = state.dashboard.is_submitting();
        set_disabled(&button, submitting)?;
        set_text_content(&button, payout_submit_label(submitting));
        if let Some(error_el) = get_element_by_id(PAYOUT_ERROR_ID) {
            update_error(&error_el, state.dashboard.get_payout_error())?;
        }
        return Ok(());
    }

    replace_children(&root, &render_payout_modal(state)?)
}

fn update_error(element: &Element, error: Option<String>) -> Result<(), JsValue> {
    set_text_content(element, error.as_deref().unwrap_or(""));
    toggle_class(element, "hidden", error.is_none())
}
