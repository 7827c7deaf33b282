// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::config::CONFIG;
use crate::errors::ApiError;
use crate::models::{
    AuthResponse, CreatePayoutRequest, ErrorBody, LoginRequest, Order, PayoutRequest,
    RevenueSummary, SignupRequest,
};

/// Contrato HTTP del backend del portal
#[async_trait(?Send)]
pub trait PortalApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError>;
    async fn fetch_revenue(&self, school_id: &str) -> Result<RevenueSummary, ApiError>;
    async fn fetch_orders(&self, school_id: &str) -> Result<Vec<Order>, ApiError>;
    async fn fetch_payouts(&self, school_id: &str) -> Result<Vec<PayoutRequest>, ApiError>;
    async fn create_payout(&self, request: &CreatePayoutRequest) -> Result<(), ApiError>;
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.backend_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let response = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        ensure_success(response).await
    }

    async fn get_for_school<T: DeserializeOwned>(&self, path: &str, school_id: &str) -> Result<T, ApiError> {
        log::debug!("🌐 [API] GET {} (school_id={})", path, school_id);

        let response = Request::get(&self.url(path))
            .query([("school_id", school_id)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = ensure_success(response).await?;
        decode(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Convierte respuestas no-2xx en `ApiError::Http`, leyendo `detail` si viene
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    log::warn!("⚠️ [API] HTTP {} ({})", status, body.detail.as_deref().unwrap_or("sin detail"));
    Err(ApiError::Http {
        status,
        detail: body.detail,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl PortalApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        log::info!("🔐 [API] Login para: {}", request.email);
        let response = self.post_json("/api/auth/login", request).await?;
        decode(response).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        log::info!("📝 [API] Signup para: {}", request.email);
        let response = self.post_json("/api/auth/signup", request).await?;
        decode(response).await
    }

    async fn fetch_revenue(&self, school_id: &str) -> Result<RevenueSummary, ApiError> {
        self.get_for_school("/api/revenue", school_id).await
    }

    async fn fetch_orders(&self, school_id: &str) -> Result<Vec<Order>, ApiError> {
        self.get_for_school("/api/orders", school_id).await
    }

    async fn fetch_payouts(&self, school_id: &str) -> Result<Vec<PayoutRequest>, ApiError> {
        self.get_for_school("/api/payouts", school_id).await
    }

    async fn create_payout(&self, request: &CreatePayoutRequest) -> Result<(), ApiError> {
        log::info!("💸 [API] Creando payout de {} para {}", request.amount, request.school_id);
        // El payout creado que devuelve el backend no se usa
        self.post_json("/api/payouts", request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let api = ApiClient::with_base_url("http://localhost:8000/");
        assert_eq!(api.url("/api/revenue"), "http://localhost:8000/api/revenue");
    }
}
