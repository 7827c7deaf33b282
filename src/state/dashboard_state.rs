// ============================================================================
// DASHBOARD STATE - Datos cacheados del dashboard + formulario de payout
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use crate::models::{compute_paid_out, Order, PayoutDraft, PayoutField, PayoutRequest, RevenueSummary};

/// `Loading` hasta el primer refresh exitoso, después siempre `Ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPhase {
    Loading,
    Ready,
}

/// Resultado completo de un refresh (se aplica de una sola vez)
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub revenue: RevenueSummary,
    pub orders: Vec<Order>,
    pub payouts: Vec<PayoutRequest>,
}

#[derive(Clone)]
pub struct DashboardState {
    /// Escuela a la que pertenecen los datos cacheados
    pub bound_school_id: Rc<RefCell<Option<String>>>,
    /// Se incrementa en cada cambio de sesión; un refresh solo aplica datos de su epoch
    pub session_epoch: Rc<Cell<u64>>,
    pub phase: Rc<Cell<DashboardPhase>>,
    /// Refreshes en vuelo (el indicador de carga se muestra si > 0)
    pub refreshes_in_flight: Rc<Cell<u32>>,
    /// Último número de refresh emitido y el del último snapshot aplicado
    pub refresh_seq: Rc<Cell<u64>>,
    pub committed_seq: Rc<Cell<u64>>,

    pub revenue: Rc<RefCell<Option<RevenueSummary>>>,
    pub orders: Rc<RefCell<Vec<Order>>>,
    pub payouts: Rc<RefCell<Vec<PayoutRequest>>>,
    pub paid_out: Rc<Cell<f64>>,

    // Formulario de payout
    pub show_payout_form: Rc<Cell<bool>>,
    pub draft: Rc<RefCell<PayoutDraft>>,
    pub submitting: Rc<Cell<bool>>,
    pub payout_error: Rc<RefCell<Option<String>>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            bound_school_id: Rc::new(RefCell::new(None)),
            session_epoch: Rc::new(Cell::new(0)),
            phase: Rc::new(Cell::new(DashboardPhase::Loading)),
            refreshes_in_flight: Rc::new(Cell::new(0)),
            refresh_seq: Rc::new(Cell::new(0)),
            committed_seq: Rc::new(Cell::new(0)),
            revenue: Rc::new(RefCell::new(None)),
            orders: Rc::new(RefCell::new(Vec::new())),
            payouts: Rc::new(RefCell::new(Vec::new())),
            paid_out: Rc::new(Cell::new(0.0)),
            show_payout_form: Rc::new(Cell::new(false)),
            draft: Rc::new(RefCell::new(PayoutDraft::default())),
            submitting: Rc::new(Cell::new(false)),
            payout_error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn bound_school_id(&self) -> Option<String> {
        self.bound_school_id.borrow().clone()
    }

    pub fn session_epoch(&self) -> u64 {
        self.session_epoch.get()
    }

    /// Enlaza los datos a otra escuela (o a ninguna) y vuelve al estado inicial
    pub fn bind(&self, school_id: Option<String>) {
        *self.bound_school_id.borrow_mut() = school_id;
        self.session_epoch.set(self.session_epoch.get().wrapping_add(1));
        self.reset();
    }

    pub fn get_phase(&self) -> DashboardPhase {
        self.phase.get()
    }

    pub fn is_loading(&self) -> bool {
        self.refreshes_in_flight.get() > 0
    }

    /// Registra un refresh en vuelo y devuelve su número de orden
    pub fn begin_refresh(&self) -> u64 {
        self.refreshes_in_flight.set(self.refreshes_in_flight.get() + 1);
        let seq = self.refresh_seq.get() + 1;
        self.refresh_seq.set(seq);
        seq
    }

    pub fn end_refresh(&self) {
        self.refreshes_in_flight.set(self.refreshes_in_flight.get().saturating_sub(1));
    }

    /// Aplica los tres datasets juntos y recalcula el total pagado.
    /// Devuelve `false` sin tocar nada si ya se aplicó un refresh iniciado después.
    pub fn commit(&self, seq: u64, snapshot: DashboardSnapshot) -> bool {
        if seq < self.committed_seq.get() {
            return false;
        }
        self.committed_seq.set(seq);
        self.paid_out.set(compute_paid_out(&snapshot.payouts));
        *self.revenue.borrow_mut() = Some(snapshot.revenue);
        *self.orders.borrow_mut() = snapshot.orders;
        *self.payouts.borrow_mut() = snapshot.payouts;
        self.phase.set(DashboardPhase::Ready);
        true
    }

    pub fn get_revenue(&self) -> Option<RevenueSummary> {
        self.revenue.borrow().clone()
    }

    pub fn get_orders(&self) -> Vec<Order> {
        self.orders.borrow().clone()
    }

    pub fn get_payouts(&self) -> Vec<PayoutRequest> {
        self.payouts.borrow().clone()
    }

    pub fn get_paid_out(&self) -> f64 {
        self.paid_out.get()
    }

    pub fn is_payout_form_open(&self) -> bool {
        self.show_payout_form.get()
    }

    pub fn set_payout_form_open(&self, open: bool) {
        self.show_payout_form.set(open);
    }

    pub fn get_draft(&self) -> PayoutDraft {
        self.draft.borrow().clone()
    }

    pub fn set_draft_field(&self, field: PayoutField, value: String) {
        self.draft.borrow_mut().set(field, value);
    }

    pub fn clear_draft(&self) {
        *self.draft.borrow_mut() = PayoutDraft::default();
        *self.payout_error.borrow_mut() = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    pub fn set_submitting(&self, submitting: bool) {
        self.submitting.set(submitting);
    }

    pub fn get_payout_error(&self) -> Option<String> {
        self.payout_error.borrow().clone()
    }

    pub fn set_payout_error(&self, error: Option<String>) {
        *self.payout_error.borrow_mut() = error;
    }

    /// Vuelve al estado inicial (cambio o cierre de sesión)
    pub fn reset(&self) {
        self.phase.set(DashboardPhase::Loading);
        self.refreshes_in_flight.set(0);
        *self.revenue.borrow_mut() = None;
        self.orders.borrow_mut().clear();
        self.payouts.borrow_mut().clear();
        self.paid_out.set(0.0);
        self.show_payout_form.set(false);
        self.submitting.set(false);
        self.clear_draft();
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total_orders: u64) -> DashboardSnapshot {
        DashboardSnapshot {
            revenue: RevenueSummary { total_orders, ..RevenueSummary::default() },
            orders: Vec::new(),
            payouts: Vec::new(),
        }
    }

    #[test]
    fn test_commit_ignores_refresh_started_earlier() {
        let state = DashboardState::new();
        let first = state.begin_refresh();
        let second = state.begin_refresh();
        assert!(second > first);

        assert!(state.commit(second, snapshot(2)));
        assert!(!state.commit(first, snapshot(1)));

        assert_eq!(state.get_revenue().map(|r| r.total_orders), Some(2));
    }

    #[test]
    fn test_commit_in_start_order() {
        let state = DashboardState::new();
        let first = state.begin_refresh();
        let second = state.begin_refresh();

        assert!(state.commit(first, snapshot(1)));
        assert!(state.commit(second, snapshot(2)));

        assert_eq!(state.get_revenue().map(|r| r.total_orders), Some(2));
        assert_eq!(state.get_phase(), DashboardPhase::Ready);
    }
}
