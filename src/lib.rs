// ============================================================================
// SCHOOL PORTAL - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Sesión y dashboard (toda la lógica)
// - Services: SOLO comunicación API y storage
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

mod config;
mod errors;
mod models;
mod services;
mod viewmodels;
mod state;
mod dom;
mod views;
mod utils;
mod app;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;
use crate::app::App;
use crate::config::CONFIG;
use crate::state::app_state::UpdateType;
use std::cell::RefCell;

// Instancia global de App (una por pestaña)
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if let Some(level) = CONFIG.log_level().to_level() {
        wasm_logger::init(Config::new(level));
    }
    log::info!("🚀 [APP] School Portal - backend {}", CONFIG.backend_url());

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-render completo
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Actualizar la app con tipo específico
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| match update_type {
        UpdateType::Incremental(inc_type) => {
            log::debug!("🔄 [UPDATE] Actualización incremental: {:?}", inc_type);
            if let Some(ref app) = *app_cell.borrow() {
                if let Err(e) = app.update_incremental(inc_type) {
                    log::error!("❌ [UPDATE] Error en actualización incremental: {:?}", e);
                }
            } else {
                log::warn!("⚠️ [UPDATE] App no está inicializada");
            }
        }
        UpdateType::FullRender => {
            log::debug!("🔄 [RERENDER] Re-render completo");
            if let Some(ref mut app) = *app_cell.borrow_mut() {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                }
            } else {
                log::warn!("⚠️ [RERENDER] App no está inicializada");
            }
        }
    });
}

/// Re-render completo, llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
