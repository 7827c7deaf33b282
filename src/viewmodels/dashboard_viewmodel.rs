// ============================================================================
// DASHBOARD VIEWMODEL - Revenue / órdenes / payouts de la escuela activa
// ============================================================================
// - refresh: tres GET en paralelo, se aplican juntos o no se aplica nada
// - request_payout: POST con status "pending" y luego refresh completo
// - Cada refresh queda atado a la sesión con la que arrancó
// ============================================================================

use crate::errors::{ApiError, DashboardError};
use crate::models::{CreatePayoutRequest, Order, PayoutField, PayoutRequest, RevenueSummary, Session};
use crate::state::app_state::{AppState, IncrementalUpdate, UpdateType};
use crate::state::DashboardSnapshot;

#[derive(Clone)]
pub struct DashboardViewModel {
    state: AppState,
}

impl DashboardViewModel {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    /// Enlaza el dashboard a la sesión. Devuelve el school_id a cargar si cambió.
    pub fn bind_session(&self, session: Option<&Session>) -> Option<String> {
        let next = session.map(|s| s.school_id.clone());
        if self.state.dashboard.bound_school_id() == next {
            return None;
        }

        log::info!("🔗 [DASHBOARD] Sesión enlazada: {:?}", next);
        self.state.dashboard.bind(next.clone());
        next
    }

    /// Recarga revenue, órdenes y payouts. Si alguno falla no se toca nada.
    pub async fn refresh(&self, school_id: &str) -> Result<(), DashboardError> {
        let dashboard = &self.state.dashboard;
        let epoch = dashboard.session_epoch();

        let seq = dashboard.begin_refresh();
        self.notify(IncrementalUpdate::DashboardData);
        log::info!("🔄 [DASHBOARD] Refrescando datos de {}...", school_id);

        let api = &self.state.api;
        let (revenue, orders, payouts) = futures::join!(
            api.fetch_revenue(school_id),
            api.fetch_orders(school_id),
            api.fetch_payouts(school_id)
        );

        // La sesión cambió mientras tanto: el contador ya se reinició, no tocar nada
        if dashboard.session_epoch() != epoch
            || dashboard.bound_school_id().as_deref() != Some(school_id)
        {
            log::warn!("⚠️ [DASHBOARD] Resultado descartado, la sesión de {} ya no está activa", school_id);
            return Err(DashboardError::StaleSession(school_id.to_string()));
        }

        dashboard.end_refresh();

        let result = match collect_snapshot(revenue, orders, payouts) {
            Ok(snapshot) => {
                let (orders, payouts) = (snapshot.orders.len(), snapshot.payouts.len());
                if dashboard.commit(seq, snapshot) {
                    log::info!("✅ [DASHBOARD] {} órdenes, {} payouts", orders, payouts);
                } else {
                    // Un refresh posterior ya aplicó datos más nuevos
                    log::debug!("⏭️ [DASHBOARD] Refresh #{} superado, se descarta", seq);
                }
                Ok(())
            }
            Err(e) => {
                log::error!("❌ [DASHBOARD] Error refrescando: {}", e);
                Err(DashboardError::Refresh(e))
            }
        };

        self.notify(IncrementalUpdate::DashboardData);
        result
    }

    pub fn open_payout_form(&self) {
        self.state.dashboard.set_payout_form_open(true);
        self.notify(IncrementalUpdate::PayoutModal);
    }

    /// Cancelar: cierra y descarta el borrador
    pub fn close_payout_form(&self) {
        let dashboard = &self.state.dashboard;
        dashboard.set_payout_form_open(false);
        dashboard.clear_draft();
        self.notify(IncrementalUpdate::PayoutModal);
    }

    pub fn update_draft(&self, field: PayoutField, value: String) {
        self.state.dashboard.set_draft_field(field, value);
    }

    /// Envía el borrador actual como payout "pending" y resincroniza todo.
    /// Si falla, el formulario queda abierto con lo que tipeó el usuario.
    pub async fn request_payout(&self, school_id: &str) -> Result<(), DashboardError> {
        let dashboard = &self.state.dashboard;
        if dashboard.is_submitting() {
            log::warn!("⚠️ [DASHBOARD] Ya hay un payout en envío");
            return Err(DashboardError::SubmissionInFlight);
        }

        let request = match CreatePayoutRequest::from_draft(&dashboard.get_draft(), school_id) {
            Ok(request) => request,
            Err(e) => {
                log::error!("❌ [DASHBOARD] {}", e);
                dashboard.set_payout_error(Some(e.to_string()));
                self.notify(IncrementalUpdate::PayoutModal);
                return Err(e);
            }
        };

        let epoch = dashboard.session_epoch();
        dashboard.set_submitting(true);
        dashboard.set_payout_error(None);
        self.notify(IncrementalUpdate::PayoutModal);

        let result = self.state.api.create_payout(&request).await;

        if dashboard.session_epoch() != epoch {
            log::warn!("⚠️ [DASHBOARD] Sesión cambiada durante el envío del payout");
            return Err(DashboardError::StaleSession(school_id.to_string()));
        }
        dashboard.set_submitting(false);

        match result {
            Ok(()) => {
                log::info!("✅ [DASHBOARD] Payout de {} solicitado", request.amount);
                dashboard.set_payout_form_open(false);
                dashboard.clear_draft();
                self.notify(IncrementalUpdate::PayoutModal);

                if let Err(e) = self.refresh(school_id).await {
                    log::warn!("⚠️ [DASHBOARD] Payout creado pero el refresh falló: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                log::error!("❌ [DASHBOARD] Error creando payout: {}", e);
                let err = DashboardError::PayoutSubmit(e);
                dashboard.set_payout_error(Some(err.to_string()));
                self.notify(IncrementalUpdate::PayoutModal);
                Err(err)
            }
        }
    }

    fn notify(&self, update: IncrementalUpdate) {
        self.state
            .notify_subscribers_with_type(UpdateType::Incremental(update));
    }
}

fn collect_snapshot(
    revenue: Result<RevenueSummary, ApiError>,
    orders: Result<Vec<Order>, ApiError>,
    payouts: Result<Vec<PayoutRequest>, ApiError>,
) -> Result<DashboardSnapshot, ApiError> {
    Ok(DashboardSnapshot {
        revenue: revenue?,
        orders: orders?,
        payouts: payouts?,
    })
}

/// Conecta el dashboard a la sesión: cada vez que se activa una sesión nueva
/// llama a `on_load` una sola vez con el school_id a cargar.
pub fn watch_session<F>(state: &AppState, on_load: F)
where
    F: Fn(DashboardViewModel, String) + 'static,
{
    let reader = state.clone();
    state.session.subscribe(move || {
        let vm = DashboardViewModel::new(&reader);
        let session = reader.current_session();
        if let Some(school_id) = vm.bind_session(session.as_ref()) {
            on_load(vm, school_id);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use futures::executor::block_on;
    use futures::FutureExt;
    use crate::services::testing::MockApi;
    use crate::state::DashboardPhase;
    use crate::utils::storage::MemoryStorage;
    use crate::viewmodels::SessionViewModel;

    fn setup() -> (AppState, Rc<MockApi>) {
        let api = Rc::new(MockApi::new());
        let state = AppState::with_storage(api.clone(), Rc::new(MemoryStorage::new()));
        (state, api)
    }

    fn bound(state: &AppState, school_id: &str) -> DashboardViewModel {
        let vm = DashboardViewModel::new(state);
        vm.bind_session(Some(&Session::new(school_id, "Acme", "a@x.com")));
        vm
    }

    fn fill_draft(vm: &DashboardViewModel, amount: &str) {
        vm.update_draft(PayoutField::Amount, amount.into());
        vm.update_draft(PayoutField::BankName, "HDFC".into());
        vm.update_draft(PayoutField::AccountHolder, "Acme".into());
        vm.update_draft(PayoutField::AccountNumber, "0001".into());
        vm.update_draft(PayoutField::Ifsc, "HDFC0000001".into());
    }

    #[test]
    fn test_refresh_commits_all_three() {
        let (state, api) = setup();
        *api.revenue_result.borrow_mut() = Ok(RevenueSummary {
            total_revenue: 1000.0,
            pending_payout: 200.0,
            total_orders: 3,
        });
        *api.orders_result.borrow_mut() = Ok(vec![
            MockApi::order("1", 400.0, "paid"),
            MockApi::order("2", 300.0, "paid"),
            MockApi::order("3", 300.0, "pending"),
        ]);
        *api.payouts_result.borrow_mut() = Ok(vec![
            MockApi::payout(100.0, "paid"),
            MockApi::payout(50.0, "pending"),
        ]);
        let vm = bound(&state, "S1");

        block_on(vm.refresh("S1")).unwrap();

        let dashboard = &state.dashboard;
        assert_eq!(dashboard.get_phase(), DashboardPhase::Ready);
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.get_paid_out(), 100.0);
        let revenue = dashboard.get_revenue().unwrap();
        assert_eq!(revenue.pending_payout, 200.0);
        assert_eq!(revenue.total_orders, 3);
        assert_eq!(dashboard.get_orders().len(), 3);
        assert_eq!(dashboard.get_orders()[0].order_number, "1");
    }

    #[test]
    fn test_refresh_failure_keeps_previous_data() {
        let (state, api) = setup();
        *api.payouts_result.borrow_mut() = Ok(vec![MockApi::payout(100.0, "approved")]);
        *api.orders_result.borrow_mut() = Ok(vec![MockApi::order("1", 10.0, "paid")]);
        let vm = bound(&state, "S1");
        block_on(vm.refresh("S1")).unwrap();
        let before = (
            state.dashboard.get_revenue(),
            state.dashboard.get_orders(),
            state.dashboard.get_payouts(),
        );

        // Solo falla orders; revenue y payouts traen datos nuevos que no se deben aplicar
        *api.revenue_result.borrow_mut() = Ok(RevenueSummary {
            total_revenue: 5.0,
            pending_payout: 5.0,
            total_orders: 9,
        });
        *api.payouts_result.borrow_mut() = Ok(Vec::new());
        *api.orders_result.borrow_mut() = Err(ApiError::Http { status: 500, detail: None });

        let err = block_on(vm.refresh("S1")).unwrap_err();

        assert!(matches!(err, DashboardError::Refresh(ApiError::Http { status: 500, .. })));
        let after = (
            state.dashboard.get_revenue(),
            state.dashboard.get_orders(),
            state.dashboard.get_payouts(),
        );
        assert_eq!(before, after);
        assert_eq!(state.dashboard.get_paid_out(), 100.0);
        assert!(!state.dashboard.is_loading());
    }

    #[test]
    fn test_first_refresh_failure_stays_loading() {
        let (state, api) = setup();
        *api.revenue_result.borrow_mut() = Err(ApiError::Network("Failed to fetch".into()));
        let vm = bound(&state, "S1");

        assert!(block_on(vm.refresh("S1")).is_err());

        assert_eq!(state.dashboard.get_phase(), DashboardPhase::Loading);
        assert_eq!(state.dashboard.get_revenue(), None);
        assert_eq!(state.dashboard.get_paid_out(), 0.0);
    }

    #[test]
    fn test_refresh_discarded_after_logout() {
        let (state, api) = setup();
        *api.orders_result.borrow_mut() = Ok(vec![MockApi::order("1", 10.0, "paid")]);
        let vm = bound(&state, "S1");
        {
            // Logout mientras los GET están en vuelo
            let vm = vm.clone();
            *api.during_fetch.borrow_mut() = Some(Box::new(move || {
                vm.bind_session(None);
            }));
        }

        let err = block_on(vm.refresh("S1")).unwrap_err();

        assert_eq!(err, DashboardError::StaleSession("S1".into()));
        assert!(state.dashboard.get_orders().is_empty());
        assert_eq!(state.dashboard.get_phase(), DashboardPhase::Loading);
    }

    #[test]
    fn test_older_refresh_does_not_overwrite_newer() {
        let (state, api) = setup();
        *api.payouts_result.borrow_mut() = Ok(vec![
            MockApi::payout(100.0, "paid"),
            MockApi::payout(50.5, "pending"),
        ]);
        let vm = bound(&state, "S1");
        {
            // Un refresh iniciado después (el de tras crear un payout) termina antes
            let vm = vm.clone();
            let api_inner = api.clone();
            let ran = Cell::new(false);
            *api.during_fetch.borrow_mut() = Some(Box::new(move || {
                if ran.replace(true) {
                    return;
                }
                assert_eq!(vm.refresh("S1").now_or_never(), Some(Ok(())));
                // El refresh viejo todavía lee la lista anterior al payout
                *api_inner.payouts_result.borrow_mut() = Ok(vec![MockApi::payout(100.0, "paid")]);
            }));
        }

        block_on(vm.refresh("S1")).unwrap();

        assert_eq!(state.dashboard.get_payouts().len(), 2);
        assert_eq!(state.dashboard.get_payouts()[1].amount, 50.5);
        assert_eq!(state.dashboard.get_paid_out(), 100.0);
        assert!(!state.dashboard.is_loading());
    }

    /// Registra las cargas pedidas por `watch_session` para ejecutarlas fuera del callback
    fn record_loads(state: &AppState) -> Rc<RefCell<Vec<(DashboardViewModel, String)>>> {
        let loads = Rc::new(RefCell::new(Vec::new()));
        {
            let loads = loads.clone();
            watch_session(state, move |vm, school_id| {
                loads.borrow_mut().push((vm, school_id));
            });
        }
        loads
    }

    #[test]
    fn test_login_triggers_exactly_one_refresh() {
        let (state, api) = setup();
        let loads = record_loads(&state);

        let session = block_on(SessionViewModel::new(&state).login("a@x.com", "p")).unwrap();
        for (vm, school_id) in loads.borrow().iter() {
            block_on(vm.refresh(school_id)).unwrap();
        }

        assert_eq!(session, Session::new("S1", "Acme", "a@x.com"));
        let ids: Vec<String> = loads.borrow().iter().map(|(_, id)| id.clone()).collect();
        assert_eq!(ids, vec!["S1".to_string()]);
        assert_eq!(*api.revenue_calls.borrow(), vec!["S1".to_string()]);
        assert_eq!(*api.orders_calls.borrow(), vec!["S1".to_string()]);
        assert_eq!(*api.payouts_calls.borrow(), vec!["S1".to_string()]);

        // Re-publicar la misma sesión no vuelve a cargar
        state.session.set(Some(session));
        assert_eq!(loads.borrow().len(), 1);
    }

    #[test]
    fn test_restore_triggers_initial_load() {
        let (state, _) = setup();
        state.offline.save_session(&Session::new("S7", "Gamma", "g@x.com")).unwrap();
        let loads = record_loads(&state);

        SessionViewModel::new(&state).restore();

        assert_eq!(loads.borrow().len(), 1);
        assert_eq!(loads.borrow()[0].1, "S7");
    }

    #[test]
    fn test_logout_resets_dashboard() {
        let (state, api) = setup();
        *api.payouts_result.borrow_mut() = Ok(vec![MockApi::payout(10.0, "paid")]);
        let loads = record_loads(&state);
        let session_vm = SessionViewModel::new(&state);
        block_on(session_vm.login("a@x.com", "p")).unwrap();
        let (vm, school_id) = loads.borrow()[0].clone();
        block_on(vm.refresh(&school_id)).unwrap();
        assert_eq!(state.dashboard.get_paid_out(), 10.0);

        session_vm.logout();

        assert_eq!(loads.borrow().len(), 1);
        assert_eq!(state.dashboard.bound_school_id(), None);
        assert!(state.dashboard.get_payouts().is_empty());
        assert_eq!(state.dashboard.get_paid_out(), 0.0);
    }

    #[test]
    fn test_request_payout_sends_pending_and_refreshes() {
        let (state, api) = setup();
        let vm = bound(&state, "S1");
        vm.open_payout_form();
        fill_draft(&vm, "50.5");
        state.dashboard.draft.borrow_mut().status = Some("paid".into());

        block_on(vm.request_payout("S1")).unwrap();

        let body = api.created_payouts.borrow()[0].clone();
        assert_eq!(
            body,
            serde_json::json!({
                "amount": 50.5,
                "bank_name": "HDFC",
                "account_holder": "Acme",
                "account_number": "0001",
                "ifsc": "HDFC0000001",
                "status": "pending",
                "school_id": "S1",
            })
        );
        assert!(!state.dashboard.is_payout_form_open());
        assert_eq!(state.dashboard.get_draft().amount, "");
        assert!(!state.dashboard.is_submitting());
        assert_eq!(api.revenue_calls.borrow().len(), 1);
    }

    #[test]
    fn test_request_payout_failure_keeps_form() {
        let (state, api) = setup();
        *api.create_payout_result.borrow_mut() = Err(ApiError::Http { status: 422, detail: None });
        let vm = bound(&state, "S1");
        vm.open_payout_form();
        fill_draft(&vm, "75");

        let err = block_on(vm.request_payout("S1")).unwrap_err();

        assert!(matches!(err, DashboardError::PayoutSubmit(_)));
        assert!(state.dashboard.is_payout_form_open());
        assert_eq!(state.dashboard.get_draft().amount, "75");
        assert_eq!(state.dashboard.get_draft().ifsc, "HDFC0000001");
        assert!(!state.dashboard.is_submitting());
        assert!(state.dashboard.get_payout_error().is_some());
        assert!(api.revenue_calls.borrow().is_empty());
    }

    #[test]
    fn test_request_payout_rejects_unparsable_amount() {
        let (state, api) = setup();
        let vm = bound(&state, "S1");
        vm.open_payout_form();
        fill_draft(&vm, "fifty");

        let err = block_on(vm.request_payout("S1")).unwrap_err();

        assert_eq!(err, DashboardError::InvalidAmount("fifty".into()));
        assert!(api.created_payouts.borrow().is_empty());
        assert!(state.dashboard.is_payout_form_open());
    }

    #[test]
    fn test_request_payout_while_submitting_is_rejected() {
        let (state, api) = setup();
        let vm = bound(&state, "S1");
        fill_draft(&vm, "10");
        state.dashboard.set_submitting(true);

        let err = block_on(vm.request_payout("S1")).unwrap_err();

        assert_eq!(err, DashboardError::SubmissionInFlight);
        assert!(api.created_payouts.borrow().is_empty());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let (state, _) = setup();
        let vm = bound(&state, "S1");
        vm.open_payout_form();
        fill_draft(&vm, "10");

        vm.close_payout_form();

        assert!(!state.dashboard.is_payout_form_open());
        assert_eq!(state.dashboard.get_draft().bank_name, "");
    }
}
