// ============================================================================
// DASHBOARD VIEW - Métricas, pedidos y payouts
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::{Order, PayoutRequest, Session};
use crate::state::app_state::AppState;
use crate::state::DashboardPhase;
use crate::utils::format::{capitalize, format_amount};
use crate::viewmodels::{DashboardViewModel, SessionViewModel};
use crate::views::payout_modal::render_payout_modal;

pub const DASHBOARD_MAIN_ID: &str = "dashboard-main";
pub const PAYOUT_MODAL_ROOT_ID: &str = "payout-modal-root";

/// Renderizar dashboard completo (header + contenido + raíz del modal)
pub fn render_dashboard(state: &AppState, session: &Session) -> Result<Element, JsValue> {
    log::debug!("🎬 [DASHBOARD] render_dashboard() para {}", session.school_id);

    let container = ElementBuilder::new("div")?.class("dashboard").build();

    append_child(&container, &render_header(state, session)?)?;

    let main = ElementBuilder::new("main")?
        .id(DASHBOARD_MAIN_ID)?
        .class("dashboard-main")
        .child(render_dashboard_content(state)?)?
        .build();
    append_child(&container, &main)?;

    let modal_root = ElementBuilder::new("div")?.id(PAYOUT_MODAL_ROOT_ID)?.build();
    if state.dashboard.is_payout_form_open() {
        append_child(&modal_root, &render_payout_modal(state)?)?;
    }
    append_child(&container, &modal_root)?;

    Ok(container)
}

fn render_header(state: &AppState, session: &Session) -> Result<Element, JsValue> {
    let refresh_btn = ElementBuilder::new("button")?
        .class("btn-icon refresh-btn")
        .attr("title", "Refresh")?
        .text("🔄")
        .build();
    {
        let state_clone = state.clone();
        on_click(&refresh_btn, move |_| {
            let Some(school_id) = state_clone.dashboard.bound_school_id() else {
                return;
            };
            let vm = DashboardViewModel::new(&state_clone);
            spawn_local(async move {
                if let Err(e) = vm.refresh(&school_id).await {
                    log::debug!("🔄 [DASHBOARD] Refresh manual sin aplicar: {}", e);
                }
            });
        })?;
    }

    let logout_btn = ElementBuilder::new("button")?
        .class("btn-secondary")
        .text("Log out")
        .build();
    {
        let state_clone = state.clone();
        on_click(&logout_btn, move |_| {
            SessionViewModel::new(&state_clone).logout();
        })?;
    }

    let actions = ElementBuilder::new("div")?
        .class("header-actions")
        .child(
            ElementBuilder::new("span")?
                .class("header-identity")
                .text(&format!("{} • {}", session.name, session.email))
                .build(),
        )?
        .child(refresh_btn)?
        .child(logout_btn)?
        .build();

    ElementBuilder::new("header")?
        .class("dashboard-header")
        .child(ElementBuilder::new("h1")?.text("School Portal").build())?
        .child(actions)
        .map(ElementBuilder::build)
}

/// Contenido de `#dashboard-main`: se reconstruye en cada refresh
pub fn render_dashboard_content(state: &AppState) -> Result<Element, JsValue> {
    let content = ElementBuilder::new("div")?.class("dashboard-content").build();

    if state.dashboard.is_loading() {
        let loading = ElementBuilder::new("div")?
            .class("loading-indicator")
            .text("Loading...")
            .build();
        append_child(&content, &loading)?;
    }

    // Los mensajes de lista vacía solo tienen sentido con datos ya cargados
    let ready = state.dashboard.get_phase() == DashboardPhase::Ready;

    append_child(&content, &render_metrics(state)?)?;
    append_child(&content, &render_orders(state, ready)?)?;
    append_child(&content, &render_payouts(state, ready)?)?;

    Ok(content)
}

fn render_metrics(state: &AppState) -> Result<Element, JsValue> {
    let revenue = state.dashboard.get_revenue().unwrap_or_default();

    ElementBuilder::new("section")?
        .class("metrics")
        .child(metric_card("Total revenue", revenue.total_revenue)?)?
        .child(metric_card("Paid out", state.dashboard.get_paid_out())?)?
        .child(metric_card("Pending payout", revenue.pending_payout)?)
        .map(ElementBuilder::build)
}

fn metric_card(label: &str, amount: f64) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("metric-card")
        .child(ElementBuilder::new("div")?.class("metric-label").text(label).build())?
        .child(
            ElementBuilder::new("div")?
                .class("metric-value")
                .text(&format_amount(amount))
                .build(),
        )
        .map(ElementBuilder::build)
}

fn render_orders(state: &AppState, ready: bool) -> Result<Element, JsValue> {
    let total_orders = state
        .dashboard
        .get_revenue()
        .map(|r| r.total_orders)
        .unwrap_or(0);

    let header = section_header("Orders")?;
    append_child(
        &header,
        &ElementBuilder::new("span")?
            .class("section-meta")
            .text(&format!("{} orders", total_orders))
            .build(),
    )?;

    let list = ElementBuilder::new("div")?.class("row-list").build();
    let orders = state.dashboard.get_orders();
    if orders.is_empty() && ready {
        append_child(&list, &empty_row("No orders yet.")?)?;
    }
    for order in &orders {
        append_child(&list, &render_order_row(order)?)?;
    }

    ElementBuilder::new("section")?
        .class("panel orders")
        .child(header)?
        .child(list)
        .map(ElementBuilder::build)
}

fn render_order_row(order: &Order) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("row order-row")
        .child(cell("Order", &order.order_number)?)?
        .child(cell("Amount", &format_amount(order.amount))?)?
        .child(cell("Status", &capitalize(&order.status))?)
        .map(ElementBuilder::build)
}

fn render_payouts(state: &AppState, ready: bool) -> Result<Element, JsValue> {
    let header = section_header("Payouts")?;

    let request_btn = ElementBuilder::new("button")?
        .class("btn-primary")
        .text("Request payout")
        .build();
    {
        let state_clone = state.clone();
        on_click(&request_btn, move |_| {
            DashboardViewModel::new(&state_clone).open_payout_form();
        })?;
    }
    append_child(&header, &request_btn)?;

    let list = ElementBuilder::new("div")?.class("row-list").build();
    let payouts = state.dashboard.get_payouts();
    if payouts.is_empty() && ready {
        append_child(&list, &empty_row("No payout requests yet.")?)?;
    }
    for payout in &payouts {
        append_child(&list, &render_payout_row(payout)?)?;
    }

    ElementBuilder::new("section")?
        .class("panel payouts")
        .child(header)?
        .child(list)
        .map(ElementBuilder::build)
}

fn render_payout_row(payout: &PayoutRequest) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("row payout-row")
        .child(cell("Amount", &format_amount(payout.amount))?)?
        .child(cell("Bank", &payout.bank_name)?)?
        .child(cell(
            "Account",
            &format!("{} • {}", payout.account_holder, payout.account_number),
        )?)?
        .child(cell("IFSC", &payout.ifsc)?)?
        .child(cell("Status", &capitalize(&payout.status))?)
        .map(ElementBuilder::build)
}

fn section_header(title: &str) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("panel-header")
        .child(ElementBuilder::new("h2")?.text(title).build())
        .map(ElementBuilder::build)
}

fn cell(label: &str, value: &str) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("cell")
        .child(ElementBuilder::new("div")?.class("cell-label").text(label).build())?
        .child(ElementBuilder::new("div")?.class("cell-value").text(value).build())
        .map(ElementBuilder::build)
}

fn empty_row(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?.class("row empty").text(message).build())
}
