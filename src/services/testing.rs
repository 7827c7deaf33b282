//! `PortalApi` en memoria para los tests de viewmodels.

use std::cell::RefCell;
use async_trait::async_trait;
use crate::errors::ApiError;
use crate::models::{
    AuthResponse, CreatePayoutRequest, LoginRequest, Order, PayoutRequest, RevenueSummary,
    SignupRequest,
};
use crate::services::api_client::PortalApi;

type Hook = Box<dyn Fn()>;

pub struct MockApi {
    pub auth_result: RefCell<Result<AuthResponse, ApiError>>,
    pub revenue_result: RefCell<Result<RevenueSummary, ApiError>>,
    pub orders_result: RefCell<Result<Vec<Order>, ApiError>>,
    pub payouts_result: RefCell<Result<Vec<PayoutRequest>, ApiError>>,
    pub create_payout_result: RefCell<Result<(), ApiError>>,

    pub login_requests: RefCell<Vec<LoginRequest>>,
    pub signup_bodies: RefCell<Vec<serde_json::Value>>,
    pub revenue_calls: RefCell<Vec<String>>,
    pub orders_calls: RefCell<Vec<String>>,
    pub payouts_calls: RefCell<Vec<String>>,
    pub created_payouts: RefCell<Vec<serde_json::Value>>,

    /// Se ejecuta dentro de `fetch_revenue`, simula algo que pasa mientras el refresh está en vuelo
    pub during_fetch: RefCell<Option<Hook>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            auth_result: RefCell::new(Ok(AuthResponse {
                school_id: "S1".into(),
                name: "Acme".into(),
                email: "a@x.com".into(),
            })),
            revenue_result: RefCell::new(Ok(RevenueSummary::default())),
            orders_result: RefCell::new(Ok(Vec::new())),
            payouts_result: RefCell::new(Ok(Vec::new())),
            create_payout_result: RefCell::new(Ok(())),
            login_requests: RefCell::new(Vec::new()),
            signup_bodies: RefCell::new(Vec::new()),
            revenue_calls: RefCell::new(Vec::new()),
            orders_calls: RefCell::new(Vec::new()),
            payouts_calls: RefCell::new(Vec::new()),
            created_payouts: RefCell::new(Vec::new()),
            during_fetch: RefCell::new(None),
        }
    }

    pub fn payout(amount: f64, status: &str) -> PayoutRequest {
        PayoutRequest {
            amount,
            bank_name: "HDFC".into(),
            account_holder: "Acme".into(),
            account_number: "0001".into(),
            ifsc: "HDFC0000001".into(),
            status: status.into(),
        }
    }

    pub fn order(number: &str, amount: f64, status: &str) -> Order {
        Order {
            order_number: number.into(),
            amount,
            status: status.into(),
        }
    }
}

#[async_trait(?Send)]
impl PortalApi for MockApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.login_requests.borrow_mut().push(request.clone());
        self.auth_result.borrow().clone()
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.signup_bodies.borrow_mut().push(body);
        self.auth_result.borrow().clone()
    }

    async fn fetch_revenue(&self, school_id: &str) -> Result<RevenueSummary, ApiError> {
        self.revenue_calls.borrow_mut().push(school_id.to_string());
        if let Some(hook) = self.during_fetch.borrow().as_ref() {
            hook();
        }
        self.revenue_result.borrow().clone()
    }

    async fn fetch_orders(&self, school_id: &str) -> Result<Vec<Order>, ApiError> {
        self.orders_calls.borrow_mut().push(school_id.to_string());
        self.orders_result.borrow().clone()
    }

    async fn fetch_payouts(&self, school_id: &str) -> Result<Vec<PayoutRequest>, ApiError> {
        self.payouts_calls.borrow_mut().push(school_id.to_string());
        self.payouts_result.borrow().clone()
    }

    async fn create_payout(&self, request: &CreatePayoutRequest) -> Result<(), ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.created_payouts.borrow_mut().push(body);
        self.create_payout_result.borrow().clone()
    }
}
