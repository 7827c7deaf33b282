use std::rc::Rc;
use crate::errors::StorageError;
use crate::models::Session;
use crate::utils::storage::{get_local_storage, LocalStorage, MemoryStorage, StorageBackend};

/// Clave única del estado durable del cliente
pub const SESSION_STORAGE_KEY: &str = "school_auth";

/// Persistencia local de la sesión (localStorage en el navegador)
#[derive(Clone)]
pub struct OfflineService {
    storage: Rc<dyn StorageBackend>,
}

impl OfflineService {
    /// localStorage si existe; si no (modo privado, sin window) la sesión vive solo en memoria
    pub fn new() -> Self {
        if get_local_storage().is_some() {
            Self::with_storage(Rc::new(LocalStorage))
        } else {
            log::warn!("⚠️ [STORAGE] localStorage no disponible, la sesión no sobrevivirá a una recarga");
            Self::with_storage(Rc::new(MemoryStorage::new()))
        }
    }

    pub fn with_storage(storage: Rc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Guardar sesión (sobrescribe la anterior)
    pub fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        let json = serde_json::to_string(session).map_err(|e| StorageError::Serialize {
            key: SESSION_STORAGE_KEY.to_string(),
            reason: e.to_string(),
        })?;

        self.storage.set_item(SESSION_STORAGE_KEY, &json)?;
        log::info!("💾 [STORAGE] Sesión guardada para {}", session.school_id);
        Ok(())
    }

    /// Cargar sesión. Ausente, ilegible o malformada => `None`.
    pub fn load_session(&self) -> Option<Session> {
        let json = match self.storage.get_item(SESSION_STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("⚠️ [STORAGE] {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&json) {
            Ok(session) if session.is_well_formed() => {
                log::info!("📋 [STORAGE] Sesión cargada para {}", session.school_id);
                Some(session)
            }
            Ok(_) => {
                log::warn!("⚠️ [STORAGE] Sesión guardada sin schoolId, se ignora");
                None
            }
            Err(e) => {
                log::warn!("⚠️ [STORAGE] Sesión guardada ilegible ({}), se ignora", e);
                None
            }
        }
    }

    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.storage.remove_item(SESSION_STORAGE_KEY)?;
        log::info!("🗑️ [STORAGE] Sesión eliminada");
        Ok(())
    }
}

impl Default for OfflineService {
    fn default() -> Self {
        Self::new()
    }
}
