pub mod session_viewmodel;
pub mod dashboard_viewmodel;

pub use session_viewmodel::{SessionViewModel, SignupForm};
pub use dashboard_viewmodel::{DashboardViewModel, watch_session};
