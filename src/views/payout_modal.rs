// ============================================================================
// PAYOUT MODAL - Formulario de solicitud de payout
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, on_click, on_input_value, on_submit, set_attribute, ElementBuilder};
use crate::models::PayoutField;
use crate::state::app_state::AppState;
use crate::viewmodels::DashboardViewModel;

pub const PAYOUT_SUBMIT_ID: &str = "payout-submit";
pub const PAYOUT_ERROR_ID: &str = "payout-error";

pub fn render_payout_modal(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [PAYOUT] render_payout_modal()");

    let overlay = ElementBuilder::new("div")?.class("modal-overlay").build();
    let card = ElementBuilder::new("div")?.class("modal-card").build();

    let close_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text("Close")
        .build();
    on_close(state, &close_btn)?;

    let header = ElementBuilder::new("div")?
        .class("modal-header")
        .child(ElementBuilder::new("h3")?.text("Request payout").build())?
        .child(close_btn)?
        .build();

    let form = ElementBuilder::new("form")?.class("payout-form").build();
    append_child(&form, &create_field(state, PayoutField::Amount, "Amount (₹)", "number")?)?;
    append_child(&form, &create_field(state, PayoutField::BankName, "Bank name", "text")?)?;
    append_child(&form, &create_field(state, PayoutField::AccountHolder, "Account holder", "text")?)?;
    append_child(&form, &create_field(state, PayoutField::AccountNumber, "Account number", "text")?)?;
    append_child(&form, &create_field(state, PayoutField::Ifsc, "IFSC", "text")?)?;

    let error = state.dashboard.get_payout_error();
    let error_el = ElementBuilder::new("p")?
        .id(PAYOUT_ERROR_ID)?
        .class(if error.is_some() { "form-error" } else { "form-error hidden" })
        .text(error.as_deref().unwrap_or(""))
        .build();
    append_child(&form, &error_el)?;

    let cancel_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Cancel")
        .build();
    on_close(state, &cancel_btn)?;

    let submitting = state.dashboard.is_submitting();
    let submit_btn = ElementBuilder::new("button")?
        .id(PAYOUT_SUBMIT_ID)?
        .attr("type", "submit")?
        .class("btn-primary")
        .text(submit_label(submitting))
        .disabled(submitting)?
        .build();

    let actions = ElementBuilder::new("div")?
        .class("modal-actions")
        .child(cancel_btn)?
        .child(submit_btn)?
        .build();
    append_child(&form, &actions)?;

    {
        let state_clone = state.clone();
        on_submit(&form, move || {
            let Some(session) = state_clone.current_session() else {
                log::warn!("⚠️ [PAYOUT] Submit sin sesión activa");
                return;
            };
            let vm = DashboardViewModel::new(&state_clone);
            spawn_local(async move {
                if let Err(e) = vm.request_payout(&session.school_id).await {
                    log::debug!("💸 [PAYOUT] Solicitud no completada: {}", e);
                }
            });
        })?;
    }

    append_child(&card, &header)?;
    append_child(&card, &form)?;
    append_child(&overlay, &card)?;

    Ok(overlay)
}

pub fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        "Submitting..."
    } else {
        "Submit request"
    }
}

fn on_close(state: &AppState, button: &Element) -> Result<(), JsValue> {
    let state_clone = state.clone();
    on_click(button, move |_| {
        DashboardViewModel::new(&state_clone).close_payout_form();
    })
}

fn create_field(
    state: &AppState,
    field: PayoutField,
    label_text: &str,
    input_type: &str,
) -> Result<Element, JsValue> {
    let id = field_id(field);

    let input = ElementBuilder::new("input")?
        .id(id)?
        .attr("type", input_type)?
        .attr("required", "")?
        .attr("value", state.dashboard.get_draft().get(field))?
        .class("form-input")
        .build();
    if field == PayoutField::Amount {
        set_attribute(&input, "step", "0.01")?;
    }

    {
        let state_clone = state.clone();
        on_input_value(&input, move |value| {
            DashboardViewModel::new(&state_clone).update_draft(field, value);
        })?;
    }

    ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", id)?.text(label_text).build())?
        .child(input)
        .map(ElementBuilder::build)
}

fn field_id(field: PayoutField) -> &'static str {
    match field {
        PayoutField::Amount => "payout-amount",
        PayoutField::BankName => "payout-bank-name",
        PayoutField::AccountHolder => "payout-account-holder",
        PayoutField::AccountNumber => "payout-account-number",
        PayoutField::Ifsc => "payout-ifsc",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_label() {
        assert_eq!(submit_label(false), "Submit request");
        assert_eq!(submit_label(true), "Submitting...");
    }
}
