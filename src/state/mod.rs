// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod auth_state;
pub mod dashboard_state;
pub mod app_state;

pub use reactivity::ReactiveState;
pub use auth_state::{AuthField, AuthMode, AuthState};
pub use dashboard_state::{DashboardPhase, DashboardSnapshot, DashboardState};
