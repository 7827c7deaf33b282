// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN
// ============================================================================
// restore / login / signup / logout. Persiste en localStorage y publica la
// sesión activa en `AppState.session` (los subscribers reaccionan).
// ============================================================================

use crate::errors::AuthError;
use crate::models::{LoginRequest, Session, SignupRequest};
use crate::state::app_state::AppState;

/// Datos del formulario de signup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone: String,
}

/// ViewModel de sesión - SOLO lógica de negocio
pub struct SessionViewModel {
    state: AppState,
}

impl SessionViewModel {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    pub fn current(&self) -> Option<Session> {
        self.state.current_session()
    }

    /// Restaurar sesión guardada al iniciar. Nunca falla: sin datos válidos no hay sesión.
    pub fn restore(&self) -> Option<Session> {
        match self.state.offline.load_session() {
            Some(session) => {
                log::info!("💾 [SESSION] Sesión restaurada: {} ({})", session.name, session.school_id);
                self.state.session.set(Some(session.clone()));
                Some(session)
            }
            None => {
                log::info!("📭 [SESSION] No hay sesión guardada");
                None
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        log::info!("🔐 [SESSION] Iniciando login...");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.state.api.login(&request).await {
            Ok(response) => Ok(self.activate(Session::from(response))),
            Err(e) => {
                log::error!("❌ [SESSION] Error en login: {}", e);
                Err(AuthError::from(e))
            }
        }
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<Session, AuthError> {
        log::info!("📝 [SESSION] Iniciando signup...");

        let request = SignupRequest::new(
            &form.name,
            &form.email,
            &form.password,
            &form.address,
            &form.phone,
        );

        match self.state.api.signup(&request).await {
            Ok(response) => Ok(self.activate(Session::from(response))),
            Err(e) => {
                log::error!("❌ [SESSION] Error en signup: {}", e);
                Err(AuthError::from(e))
            }
        }
    }

    /// Logout - borra la sesión guardada y la desactiva. Sin llamada de red.
    pub fn logout(&self) {
        log::info!("👋 [SESSION] Logout");

        if let Err(e) = self.state.offline.clear_session() {
            log::warn!("⚠️ [SESSION] Error limpiando storage: {}", e);
        }
        self.state.session.set(None);
    }

    /// Persistir y activar. Un fallo de storage no impide entrar.
    fn activate(&self, session: Session) -> Session {
        if let Err(e) = self.state.offline.save_session(&session) {
            log::error!("❌ [SESSION] Error guardando sesión: {}", e);
        }

        log::info!("✅ [SESSION] Sesión activa: {} ({})", session.name, session.school_id);
        self.state.session.set(Some(session.clone()));
        session
    }
}
