mod de;
pub mod session;
pub mod auth;
pub mod revenue;
pub mod order;
pub mod payout;

pub use session::Session;
pub use auth::{LoginRequest, SignupRequest, AuthResponse, ErrorBody};
pub use revenue::RevenueSummary;
pub use order::Order;
pub use payout::{
    PayoutRequest, PayoutDraft, PayoutField, CreatePayoutRequest,
    compute_paid_out,
};
