// ============================================================================
// APP VIEW - Raíz: auth o dashboard según la sesión
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::state::app_state::AppState;
use crate::viewmodels::SessionViewModel;
use crate::views::auth::render_auth;
use crate::views::dashboard::render_dashboard;

/// Renderizar la vista que corresponde al estado de sesión actual
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    match SessionViewModel::new(state).current() {
        Some(session) => render_dashboard(state, &session),
        None => render_auth(state),
    }
}
