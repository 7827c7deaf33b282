// ============================================================================
// APP - Aplicación principal
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use gloo_timers::callback::Timeout;
use web_sys::Element;
use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::dom::incremental::{update_auth_form, update_dashboard_data, update_payout_modal};
use crate::state::app_state::{AppState, IncrementalUpdate};
use crate::viewmodels::{watch_session, SessionViewModel};
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Suscribirse a cambios de estado; Timeout(0) batchea updates seguidos
        state.subscribe_to_changes(move |update_type| {
            Timeout::new(0, move || {
                crate::rerender_app_with_type(update_type);
            })
            .forget();
        });

        // Cada sesión nueva dispara un único refresh del dashboard
        watch_session(&state, |vm, school_id| {
            spawn_local(async move {
                if let Err(e) = vm.refresh(&school_id).await {
                    log::debug!("🔄 [APP] Carga inicial sin aplicar: {}", e);
                }
            });
        });

        // Login / logout => re-render completo (auth <-> dashboard)
        {
            let state_clone = state.clone();
            state.session.subscribe(move || state_clone.notify_subscribers());
        }

        if let Some(session) = SessionViewModel::new(&state).restore() {
            log::info!("💾 [APP] Sesión restaurada para {}", session.name);
        }

        Ok(Self { state, root })
    }

    /// Renderizar aplicación completa
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] App::render()");
        clear_children(&self.root);
        let app_view = render_app(&self.state)?;
        append_child(&self.root, &app_view)
    }

    /// Actualización incremental de una sola zona de la UI
    pub fn update_incremental(&self, update: IncrementalUpdate) -> Result<(), JsValue> {
        match update {
            IncrementalUpdate::AuthForm => update_auth_form(&self.state),
            IncrementalUpdate::DashboardData => update_dashboard_data(&self.state),
            IncrementalUpdate::PayoutModal => update_payout_modal(&self.state),
        }
    }
}
