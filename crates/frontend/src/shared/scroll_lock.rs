//! Body scroll lock shared by everything that shows an overlay.
//!
//! Holders are counted: the body overflow is switched to `hidden` when the
//! first holder locks, and the previous value is put back when the last one
//! unlocks.

use crate::shared::guard::Resource;
use std::cell::RefCell;
use std::rc::Rc;

/// Where the overflow style is read from and written to.
pub trait OverflowTarget {
    fn overflow(&self) -> String;
    fn set_overflow(&self, value: &str);
}

/// `document.body.style.overflow`
#[derive(Clone, Copy, Default)]
pub struct DocumentBody;

impl OverflowTarget for DocumentBody {
    fn overflow(&self) -> String {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .and_then(|body| body.style().get_property_value("overflow").ok())
            .unwrap_or_default()
    }

    fn set_overflow(&self, value: &str) {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            return;
        };

        let style = body.style();
        let result = if value.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", value)
        };
        if result.is_err() {
            log::warn!("failed to set body overflow to '{}'", value);
        }
    }
}

struct LockState<T> {
    target: T,
    holders: usize,
    saved_overflow: String,
}

pub struct ScrollLockRegistry<T: OverflowTarget> {
    state: Rc<RefCell<LockState<T>>>,
}

impl<T: OverflowTarget> Clone for ScrollLockRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: OverflowTarget> ScrollLockRegistry<T> {
    pub fn new(target: T) -> Self {
        Self {
            state: Rc::new(RefCell::new(LockState {
                target,
                holders: 0,
                saved_overflow: String::new(),
            })),
        }
    }

    pub fn lock(&self) {
        let mut state = self.state.borrow_mut();
        if state.holders == 0 {
            state.saved_overflow = state.target.overflow();
            state.target.set_overflow("hidden");
        }
        state.holders += 1;
    }

    pub fn unlock(&self) {
        let mut state = self.state.borrow_mut();
        match state.holders {
            0 => {}
            1 => {
                state.holders = 0;
                let saved = std::mem::take(&mut state.saved_overflow);
                state.target.set_overflow(&saved);
            }
            _ => state.holders -= 1,
        }
    }

    pub fn holders(&self) -> usize {
        self.state.borrow().holders
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }
}

thread_local! {
    static DOCUMENT_LOCKS: ScrollLockRegistry<DocumentBody> = ScrollLockRegistry::new(DocumentBody);
}

/// One holder of the scroll lock.
pub struct BodyScrollLock<T: OverflowTarget = DocumentBody> {
    registry: ScrollLockRegistry<T>,
}

impl BodyScrollLock<DocumentBody> {
    /// A holder on the page-wide registry for `document.body`.
    pub fn for_document() -> Self {
        Self {
            registry: DOCUMENT_LOCKS.with(Clone::clone),
        }
    }
}

impl<T: OverflowTarget> BodyScrollLock<T> {
    pub fn new(registry: ScrollLockRegistry<T>) -> Self {
        Self { registry }
    }
}

impl<T: OverflowTarget> Resource for BodyScrollLock<T> {
    fn acquire(&mut self) {
        self.registry.lock();
    }

    fn release(&mut self) {
        self.registry.unlock();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::OverflowTarget;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory overflow style that records every write.
    #[derive(Clone, Default)]
    pub struct FakeBody {
        pub overflow: Rc<RefCell<String>>,
        pub writes: Rc<RefCell<Vec<String>>>,
    }

    impl OverflowTarget for FakeBody {
        fn overflow(&self) -> String {
            self.overflow.borrow().clone()
        }

        fn set_overflow(&self, value: &str) {
            *self.overflow.borrow_mut() = value.to_string();
            self.writes.borrow_mut().push(value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeBody;
    use super::*;
    use crate::shared::guard::ScopedResource;

    #[test]
    fn test_lock_restores_previous_overflow() {
        let body = FakeBody::default();
        *body.overflow.borrow_mut() = "auto".to_string();
        let registry = ScrollLockRegistry::new(body.clone());

        registry.lock();
        assert_eq!(*body.overflow.borrow(), "hidden");

        registry.unlock();
        assert_eq!(*body.overflow.borrow(), "auto");
        assert!(!registry.is_locked());
    }

    #[test]
    fn test_nested_holders_keep_lock() {
        let body = FakeBody::default();
        let registry = ScrollLockRegistry::new(body.clone());

        let mut first = ScopedResource::new(BodyScrollLock::new(registry.clone()));
        let mut second = ScopedResource::new(BodyScrollLock::new(registry.clone()));

        first.acquire();
        second.acquire();
        assert_eq!(registry.holders(), 2);

        first.release();
        assert_eq!(*body.overflow.borrow(), "hidden");

        second.release();
        assert_eq!(*body.overflow.borrow(), "");
        assert_eq!(body.writes.borrow().len(), 2);
    }

    #[test]
    fn test_unlock_without_holders_is_noop() {
        let body = FakeBody::default();
        let registry = ScrollLockRegistry::new(body.clone());

        registry.unlock();
        assert_eq!(registry.holders(), 0);
        assert!(body.writes.borrow().is_empty());
    }
}
