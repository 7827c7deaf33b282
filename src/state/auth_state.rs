// ============================================================================
// AUTH STATE - Estado del formulario de login / signup
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
    Address,
    Phone,
}

/// Valores del formulario
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthFormValues {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone: String,
}

/// Estado del formulario de autenticación
#[derive(Clone)]
pub struct AuthState {
    pub mode: Rc<RefCell<AuthMode>>,
    pub values: Rc<RefCell<AuthFormValues>>,
    pub loading: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            mode: Rc::new(RefCell::new(AuthMode::Login)),
            values: Rc::new(RefCell::new(AuthFormValues::default())),
            loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn get_mode(&self) -> AuthMode {
        *self.mode.borrow()
    }

    /// Cambiar modo limpia el error pero conserva lo tipeado
    pub fn set_mode(&self, mode: AuthMode) {
        *self.mode.borrow_mut() = mode;
        self.set_error(None);
    }

    pub fn get_values(&self) -> AuthFormValues {
        self.values.borrow().clone()
    }

    pub fn set_field(&self, field: AuthField, value: String) {
        let mut values = self.values.borrow_mut();
        match field {
            AuthField::Name => values.name = value,
            AuthField::Email => values.email = value,
            AuthField::Password => values.password = value,
            AuthField::Address => values.address = value,
            AuthField::Phone => values.phone = value,
        }
    }

    pub fn get_field(&self, field: AuthField) -> String {
        let values = self.values.borrow();
        match field {
            AuthField::Name => values.name.clone(),
            AuthField::Email => values.email.clone(),
            AuthField::Password => values.password.clone(),
            AuthField::Address => values.address.clone(),
            AuthField::Phone => values.phone.clone(),
        }
    }

    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    /// Después de un login exitoso no queda nada del formulario
    pub fn reset(&self) {
        *self.mode.borrow_mut() = AuthMode::Login;
        *self.values.borrow_mut() = AuthFormValues::default();
        self.set_loading(false);
        self.set_error(None);
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_switch_keeps_values_and_clears_error() {
        let state = AuthState::new();
        state.set_field(AuthField::Email, "a@x.com".into());
        state.set_error(Some("Invalid credentials".into()));

        state.set_mode(AuthMode::Signup);

        assert_eq!(state.get_mode(), AuthMode::Signup);
        assert_eq!(state.get_field(AuthField::Email), "a@x.com");
        assert_eq!(state.get_error(), None);
    }

    #[test]
    fn test_reset() {
        let state = AuthState::new();
        state.set_mode(AuthMode::Signup);
        state.set_field(AuthField::Password, "p".into());
        state.set_loading(true);

        state.reset();

        assert_eq!(state.get_mode(), AuthMode::Login);
        assert_eq!(state.get_values(), AuthFormValues::default());
        assert!(!state.get_loading());
    }
}
