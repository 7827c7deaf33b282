// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Estado reactivo con sistema de notificaciones.
/// Los clones comparten valor y subscribers.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T: Clone> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Copia del valor actual
    pub fn value(&self) -> T {
        self.value.borrow().clone()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers
    fn notify(&self) {
        // Copia de la lista: un callback puede leer el valor o suscribir a otros
        let subscribers: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_clones_share_value_and_subscribers() {
        let state = ReactiveState::new(0);
        let clone = state.clone();
        let calls = Rc::new(Cell::new(0));

        {
            let calls = calls.clone();
            state.subscribe(move || calls.set(calls.get() + 1));
        }

        clone.set(5);
        assert_eq!(state.value(), 5);
        assert_eq!(calls.get(), 1);

        state.set(6);
        assert_eq!(clone.value(), 6);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_subscriber_can_read_value() {
        let state = ReactiveState::new(None::<String>);
        let seen = Rc::new(RefCell::new(Vec::new()));

        {
            let reader = state.clone();
            let seen = seen.clone();
            state.subscribe(move || seen.borrow_mut().push(reader.value()));
        }

        state.set(Some("S1".to_string()));
        state.set(None);

        assert_eq!(*seen.borrow(), vec![Some("S1".to_string()), None]);
    }
}
