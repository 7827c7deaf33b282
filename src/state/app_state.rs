// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::Session;
use crate::services::{ApiClient, OfflineService, PortalApi};
use crate::state::{AuthState, DashboardState, ReactiveState};
use crate::utils::storage::StorageBackend;

/// Tipo de actualización del DOM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateType {
    /// Actualización incremental (solo elementos específicos)
    Incremental(IncrementalUpdate),
    /// Re-render completo (login/logout, cambio de modo del formulario)
    FullRender,
}

/// Tipo de actualización incremental específica
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Botón de submit y error del formulario de auth
    AuthForm,
    /// Métricas, órdenes, payouts e indicador de carga
    DashboardData,
    /// Visibilidad y estado del modal de payout
    PayoutModal,
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub api: Rc<dyn PortalApi>,
    pub offline: OfflineService,

    /// Sesión activa; los subscribers se enteran de login/logout
    pub session: ReactiveState<Option<Session>>,
    pub auth: AuthState,
    pub dashboard: DashboardState,

    // Reactivity: Callbacks para notificar cambios de UI
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn(UpdateType)>>>>,
}

impl AppState {
    /// Estado con backend HTTP real y localStorage
    pub fn new() -> Self {
        Self::with_services(Rc::new(ApiClient::new()), OfflineService::new())
    }

    pub fn with_services(api: Rc<dyn PortalApi>, offline: OfflineService) -> Self {
        Self {
            api,
            offline,
            session: ReactiveState::new(None),
            auth: AuthState::new(),
            dashboard: DashboardState::new(),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Atajo para tests y entornos sin localStorage
    pub fn with_storage(api: Rc<dyn PortalApi>, storage: Rc<dyn StorageBackend>) -> Self {
        Self::with_services(api, OfflineService::with_storage(storage))
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.value()
    }

    /// Suscribirse a cambios de UI
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn(UpdateType) + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers con el tipo de actualización
    pub fn notify_subscribers_with_type(&self, update_type: UpdateType) {
        let subscribers: Vec<Rc<dyn Fn(UpdateType)>> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback(update_type);
        }
    }

    pub fn notify_subscribers(&self) {
        self.notify_subscribers_with_type(UpdateType::FullRender);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
