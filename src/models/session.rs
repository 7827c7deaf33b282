use serde::{Deserialize, Serialize};
use crate::models::auth::AuthResponse;

/// Identidad autenticada de la escuela.
///
/// Es el único estado que se persiste en el cliente. El JSON guardado usa
/// camelCase (`{"schoolId", "name", "email"}`), distinto del snake_case del backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub school_id: String,
    pub name: String,
    pub email: String,
}

impl Session {
    pub fn new(school_id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            school_id: school_id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Una sesión sin school_id no sirve para ninguna query del dashboard
    pub fn is_well_formed(&self) -> bool {
        !self.school_id.trim().is_empty()
    }
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            school_id: response.school_id,
            name: response.name,
            email: response.email,
        }
    }
}
