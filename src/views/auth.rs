// ============================================================================
// AUTH VIEW - Login / Signup
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, on_click, on_input_value, on_submit, set_attribute, ElementBuilder};
use crate::state::app_state::{AppState, IncrementalUpdate, UpdateType};
use crate::state::{AuthField, AuthMode};
use crate::viewmodels::{SessionViewModel, SignupForm};

pub const AUTH_SUBMIT_ID: &str = "auth-submit";
pub const AUTH_ERROR_ID: &str = "auth-error";

/// Renderizar vista de login / signup
pub fn render_auth(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [AUTH] render_auth()");
    let mode = state.auth.get_mode();

    let screen = ElementBuilder::new("div")?.class("auth-screen").build();
    let card = ElementBuilder::new("div")?.class("auth-card").build();

    let header = ElementBuilder::new("div")?
        .class("auth-header")
        .child(ElementBuilder::new("h1")?.text("School Portal").build())?
        .child(
            ElementBuilder::new("p")?
                .text("Sign up or log in to manage orders and payouts")
                .build(),
        )?
        .build();

    let toggle = ElementBuilder::new("div")?
        .class("auth-toggle")
        .child(create_mode_button(state, AuthMode::Login, "Log in", mode)?)?
        .child(create_mode_button(state, AuthMode::Signup, "Sign up", mode)?)?
        .build();

    let form = ElementBuilder::new("form")?.class("auth-form").build();

    if mode == AuthMode::Signup {
        append_child(&form, &create_field(state, AuthField::Name, "School name", "text", true)?)?;
    }
    append_child(&form, &create_field(state, AuthField::Email, "Email", "email", true)?)?;
    append_child(&form, &create_field(state, AuthField::Password, "Password", "password", true)?)?;
    if mode == AuthMode::Signup {
        let optional_row = ElementBuilder::new("div")?
            .class("form-row")
            .child(create_field(state, AuthField::Address, "Address", "text", false)?)?
            .child(create_field(state, AuthField::Phone, "Phone", "text", false)?)?
            .build();
        append_child(&form, &optional_row)?;
    }

    let error = state.auth.get_error();
    let error_el = ElementBuilder::new("p")?
        .id(AUTH_ERROR_ID)?
        .class(if error.is_some() { "auth-error" } else { "auth-error hidden" })
        .text(error.as_deref().unwrap_or(""))
        .build();
    append_child(&form, &error_el)?;

    let loading = state.auth.get_loading();
    let submit_btn = ElementBuilder::new("button")?
        .id(AUTH_SUBMIT_ID)?
        .attr("type", "submit")?
        .class("btn-primary")
        .text(submit_label(mode, loading))
        .disabled(loading)?
        .build();
    append_child(&form, &submit_btn)?;

    {
        let state_clone = state.clone();
        on_submit(&form, move || submit_auth(&state_clone))?;
    }

    append_child(&card, &header)?;
    append_child(&card, &toggle)?;
    append_child(&card, &form)?;
    append_child(&screen, &card)?;

    Ok(screen)
}

/// Texto del botón de submit según modo y estado
pub fn submit_label(mode: AuthMode, loading: bool) -> &'static str {
    match (loading, mode) {
        (true, _) => "Please wait...",
        (false, AuthMode::Login) => "Log in",
        (false, AuthMode::Signup) => "Create account",
    }
}

fn create_mode_button(
    state: &AppState,
    target: AuthMode,
    label: &str,
    current: AuthMode,
) -> Result<Element, JsValue> {
    let button = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class(if target == current { "toggle-btn active" } else { "toggle-btn" })
        .text(label)
        .build();

    let state_clone = state.clone();
    on_click(&button, move |_| {
        if state_clone.auth.get_mode() != target {
            state_clone.auth.set_mode(target);
            state_clone.notify_subscribers_with_type(UpdateType::FullRender);
        }
    })?;

    Ok(button)
}

/// Helper para crear form group ligado a un campo del estado
fn create_field(
    state: &AppState,
    field: AuthField,
    label_text: &str,
    input_type: &str,
    required: bool,
) -> Result<Element, JsValue> {
    let id = field_id(field);

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = ElementBuilder::new("input")?
        .id(id)?
        .attr("type", input_type)?
        .attr("name", id)?
        .attr("value", &state.auth.get_field(field))?
        .class("form-input")
        .build();
    if required {
        set_attribute(&input, "required", "")?;
    }

    {
        let state_clone = state.clone();
        on_input_value(&input, move |value| state_clone.auth.set_field(field, value))?;
    }

    ElementBuilder::new("div")?
        .class("form-group")
        .child(label)?
        .child(input)
        .map(ElementBuilder::build)
}

fn field_id(field: AuthField) -> &'static str {
    match field {
        AuthField::Name => "name",
        AuthField::Email => "email",
        AuthField::Password => "password",
        AuthField::Address => "address",
        AuthField::Phone => "phone",
    }
}

fn submit_auth(state: &AppState) {
    // Un solo intento a la vez
    if state.auth.get_loading() {
        return;
    }

    state.auth.set_loading(true);
    state.auth.set_error(None);
    state.notify_subscribers_with_type(UpdateType::Incremental(IncrementalUpdate::AuthForm));

    let state = state.clone();
    spawn_local(async move {
        let vm = SessionViewModel::new(&state);
        let values = state.auth.get_values();

        let result = match state.auth.get_mode() {
            AuthMode::Login => vm.login(&values.email, &values.password).await,
            AuthMode::Signup => {
                let form = SignupForm {
                    name: values.name,
                    email: values.email,
                    password: values.password,
                    address: values.address,
                    phone: values.phone,
                };
                vm.signup(&form).await
            }
        };

        match result {
            // La sesión nueva ya pidió el re-render completo
            Ok(_) => state.auth.reset(),
            Err(e) => {
                state.auth.set_loading(false);
                state.auth.set_error(Some(e.to_string()));
                state.notify_subscribers_with_type(UpdateType::Incremental(IncrementalUpdate::AuthForm));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_label() {
        assert_eq!(submit_label(AuthMode::Login, false), "Log in");
        assert_eq!(submit_label(AuthMode::Signup, false), "Create account");
        assert_eq!(submit_label(AuthMode::Signup, true), "Please wait...");
    }
}
