pub mod app;
pub mod auth;
pub mod dashboard;
pub mod payout_modal;

pub use app::render_app;
