// ============================================================================
// ERRORS - Errores tipados de la app
// ============================================================================
// ApiError: transporte HTTP (ver services::api_client)
// AuthError: lo que ve el formulario de login/signup
// DashboardError: refresh y creación de payouts (solo logs + modal)
// ============================================================================

use thiserror::Error;

/// Mensaje genérico cuando el backend no envía `detail`
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),

    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    Http { status: u16, detail: Option<String> },

    #[error("Serialization error: {0}")]
    Encode(String),

    #[error("Parse error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Mensaje para mostrar al usuario (sin prefijos técnicos)
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            ApiError::Network(msg) => msg.clone(),
            ApiError::Encode(_) | ApiError::Decode(_) => self.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// Credenciales inválidas o validación del signup
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Network(String),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(_) => AuthError::Network(err.user_message()),
            other => AuthError::Rejected(other.user_message()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("Refresh failed: {0}")]
    Refresh(ApiError),

    #[error("Failed to create payout: {0}")]
    PayoutSubmit(ApiError),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("A payout request is already being submitted")]
    SubmissionInFlight,

    #[error("Session changed while loading data for {0}")]
    StaleSession(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("No se pudo acceder a localStorage")]
    Unavailable,

    #[error("Error guardando {0} en localStorage")]
    Write(String),

    #[error("Error eliminando {0} de localStorage")]
    Remove(String),

    #[error("Error serializando {key}: {reason}")]
    Serialize { key: String, reason: String },
}
