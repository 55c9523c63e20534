//! Generic listener registry.
//!
//! # Responsibility
//! - Keep listeners in registration order.
//! - Deliver one notification pass to every listener.
//!
//! # Invariants
//! - Registration order is invocation order.
//! - Duplicate registrations are kept and invoked once each.
//! - A panicking listener does not stop the rest of the pass.

use log::error;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Callback receiving the full item collection after a change.
pub type Listener<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// Outcome of one notification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    /// Listeners that returned normally.
    pub delivered: usize,
    /// Listeners that panicked.
    pub failed: usize,
}

/// Ordered listener registry.
pub struct ObserverRegistry<T> {
    listeners: Vec<Listener<T>>,
}

impl<T> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<T> Clone for ObserverRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<T> ObserverRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one listener. No upper bound and no de-duplication.
    pub fn subscribe(&mut self, listener: Listener<T>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invokes every listener with the same `items` slice, in order.
    pub fn notify_all(&self, items: &[T]) -> NotifyReport {
        let mut report = NotifyReport::default();
        for (index, listener) in self.listeners.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| listener(items))) {
                Ok(()) => report.delivered += 1,
                Err(_) => {
                    report.failed += 1;
                    error!(
                        "event=listener_panicked module=state status=error listener_index={} items={}",
                        index,
                        items.len()
                    );
                }
            }
        }
        report
    }
}

impl<T> std::fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Listener, NotifyReport, ObserverRegistry};
    use std::sync::{Arc, Mutex};

    fn recorder(log: &Arc<Mutex<Vec<String>>>, name: &'static str) -> Listener<u32> {
        let log = Arc::clone(log);
        Arc::new(move |items: &[u32]| {
            log.lock()
                .expect("log lock")
                .push(format!("{name}:{}", items.len()));
        })
    }

    #[test]
    fn notifies_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        registry.subscribe(recorder(&log, "a"));
        registry.subscribe(recorder(&log, "b"));

        let report = registry.notify_all(&[1, 2, 3]);

        assert_eq!(report, NotifyReport { delivered: 2, failed: 0 });
        assert_eq!(*log.lock().expect("log lock"), vec!["a:3", "b:3"]);
    }

    #[test]
    fn duplicate_listener_is_invoked_twice() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let listener = recorder(&log, "dup");
        let mut registry = ObserverRegistry::new();
        registry.subscribe(Arc::clone(&listener));
        registry.subscribe(listener);

        registry.notify_all(&[7]);

        assert_eq!(registry.len(), 2);
        assert_eq!(log.lock().expect("log lock").len(), 2);
    }

    #[test]
    fn panicking_listener_does_not_abort_pass() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        registry.subscribe(recorder(&log, "before"));
        registry.subscribe(Arc::new(|_: &[u32]| panic!("listener failure")));
        registry.subscribe(recorder(&log, "after"));

        let report = registry.notify_all(&[]);

        assert_eq!(report, NotifyReport { delivered: 2, failed: 1 });
        assert_eq!(*log.lock().expect("log lock"), vec!["before:0", "after:0"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn empty_registry_reports_nothing() {
        let registry = ObserverRegistry::<u32>::new();
        assert!(registry.is_empty());
        assert_eq!(registry.notify_all(&[1]), NotifyReport::default());
    }
}
