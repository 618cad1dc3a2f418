use crate::shared::guard::{Resource, ScopedResource};

/// Page-wide side effects the modal holds while it is visible: the Escape
/// key listener and the body scroll lock.
pub struct ModalBindings<K: Resource, S: Resource> {
    key_listener: ScopedResource<K>,
    scroll_lock: ScopedResource<S>,
}

impl<K: Resource, S: Resource> ModalBindings<K, S> {
    pub fn new(key_listener: K, scroll_lock: S) -> Self {
        Self {
            key_listener: ScopedResource::new(key_listener),
            scroll_lock: ScopedResource::new(scroll_lock),
        }
    }

    /// Runs on every change of the modal's inputs: drop whatever is held,
    /// then take both again if the modal is visible.
    pub fn rebind(&mut self, visible: bool) {
        self.release();
        if visible {
            self.key_listener.acquire();
            self.scroll_lock.acquire();
        }
    }

    pub fn release(&mut self) {
        self.key_listener.release();
        self.scroll_lock.release();
    }

    #[cfg(test)]
    pub fn is_bound(&self) -> bool {
        self.key_listener.is_held() && self.scroll_lock.is_held()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::guard::testing::Counter;
    use crate::shared::scroll_lock::testing::FakeBody;
    use crate::shared::scroll_lock::{BodyScrollLock, ScrollLockRegistry};

    #[test]
    fn test_hidden_binds_nothing() {
        let keys = Counter::default();
        let scroll = Counter::default();
        let mut bindings = ModalBindings::new(keys.resource(), scroll.resource());

        bindings.rebind(false);
        assert!(!bindings.is_bound());
        assert_eq!(keys.acquisitions(), 0);
        assert_eq!(scroll.acquisitions(), 0);
    }

    #[test]
    fn test_repeated_rebind_keeps_one_of_each() {
        let keys = Counter::default();
        let scroll = Counter::default();
        let mut bindings = ModalBindings::new(keys.resource(), scroll.resource());

        for _ in 0..5 {
            bindings.rebind(true);
            assert_eq!(keys.active(), 1);
            assert_eq!(scroll.active(), 1);
        }
    }

    #[test]
    fn test_toggle_open_close_open() {
        let keys = Counter::default();
        let body = FakeBody::default();
        let registry = ScrollLockRegistry::new(body.clone());
        let mut bindings =
            ModalBindings::new(keys.resource(), BodyScrollLock::new(registry.clone()));

        bindings.rebind(true);
        bindings.rebind(false);
        assert_eq!(keys.active(), 0);
        assert_eq!(*body.overflow.borrow(), "");

        bindings.rebind(true);
        assert_eq!(keys.active(), 1);
        assert_eq!(registry.holders(), 1);
        assert_eq!(*body.overflow.borrow(), "hidden");
    }

    #[test]
    fn test_teardown_releases() {
        let keys = Counter::default();
        let body = FakeBody::default();
        let registry = ScrollLockRegistry::new(body.clone());
        {
            let mut bindings =
                ModalBindings::new(keys.resource(), BodyScrollLock::new(registry.clone()));
            bindings.rebind(true);
        }
        assert_eq!(keys.active(), 0);
        assert!(!registry.is_locked());
        assert_eq!(*body.overflow.borrow(), "");
    }

    #[test]
    fn test_release_before_bind_is_noop() {
        let keys = Counter::default();
        let scroll = Counter::default();
        let mut bindings = ModalBindings::new(keys.resource(), scroll.resource());

        bindings.release();
        bindings.release();
        assert_eq!(keys.active(), 0);
        assert_eq!(scroll.active(), 0);
    }
}
