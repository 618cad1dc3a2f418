//! Scoped acquisition of page-wide resources.
//!
//! A component that needs a page-wide side effect (a document listener, the
//! body scroll lock) for part of its lifetime wraps it in a [`ScopedResource`]
//! and drives it from an effect. Acquire and release are idempotent, and the
//! resource is released when the guard is dropped.

pub trait Resource {
    fn acquire(&mut self);
    fn release(&mut self);
}

pub struct ScopedResource<R: Resource> {
    resource: R,
    held: bool,
}

impl<R: Resource> ScopedResource<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            held: false,
        }
    }

    pub fn acquire(&mut self) {
        if !self.held {
            self.resource.acquire();
            self.held = true;
        }
    }

    /// No-op when the resource is not held.
    pub fn release(&mut self) {
        if self.held {
            self.resource.release();
            self.held = false;
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl<R: Resource> Drop for ScopedResource<R> {
    fn drop(&mut self) {
        self.release();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Counter;
    use super::*;

    #[test]
    fn test_acquire_is_idempotent() {
        let counter = Counter::default();
        let mut guard = ScopedResource::new(counter.resource());

        guard.acquire();
        guard.acquire();
        assert!(guard.is_held());
        assert_eq!(counter.active(), 1);
        assert_eq!(counter.acquisitions(), 1);
    }

    #[test]
    fn test_release_without_acquire_is_noop() {
        let counter = Counter::default();
        let mut guard = ScopedResource::new(counter.resource());

        guard.release();
        guard.release();
        assert!(!guard.is_held());
        assert_eq!(counter.active(), 0);
    }

    #[test]
    fn test_drop_releases() {
        let counter = Counter::default();
        {
            let mut guard = ScopedResource::new(counter.resource());
            guard.acquire();
            assert_eq!(counter.active(), 1);
        }
        assert_eq!(counter.active(), 0);
    }
}
