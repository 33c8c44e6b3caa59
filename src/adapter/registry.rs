use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identifier of one registered listener within an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) type CleanupAction = Box<dyn FnOnce()>;

/// Ordered unregister actions owned by one adapter
///
/// Entries run at most once: either individually through `take` or all
/// together through `drain`, after which the registry is closed.
#[derive(Default)]
pub(crate) struct CleanupRegistry {
    entries: Vec<(SubscriptionId, CleanupAction)>,
    next_id: u64,
    disposed: bool,
}

impl CleanupRegistry {
    pub(crate) fn push(&mut self, action: CleanupAction) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, action));
        id
    }

    pub(crate) fn take(&mut self, id: SubscriptionId) -> Option<CleanupAction> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Close the registry and hand back its actions in registration order
    ///
    /// Returns `None` if the registry was already drained.
    pub(crate) fn drain(&mut self) -> Option<Vec<CleanupAction>> {
        if self.disposed {
            return None;
        }
        self.disposed = true;
        Some(
            std::mem::take(&mut self.entries)
                .into_iter()
                .map(|(_, action)| action)
                .collect(),
        )
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Teardown handle for a map event adapter
///
/// Calling [`Disposer::dispose`] unregisters every listener the adapter
/// added. Unless configured otherwise, dropping the disposer does the same.
pub struct Disposer {
    registry: Rc<RefCell<CleanupRegistry>>,
    label: String,
    dispose_on_drop: bool,
}

impl Disposer {
    pub(crate) fn new(
        registry: Rc<RefCell<CleanupRegistry>>,
        label: String,
        dispose_on_drop: bool,
    ) -> Self {
        Self {
            registry,
            label,
            dispose_on_drop,
        }
    }

    /// Unregister every tracked listener in registration order
    ///
    /// Returns how many listeners were unregistered. Only the first call has
    /// any effect; later calls return 0.
    pub fn dispose(&self) -> usize {
        // The borrow must end before the actions run; they may reenter the adapter.
        let drained = self.registry.borrow_mut().drain();

        let Some(actions) = drained else {
            tracing::trace!(label = %self.label, "Map events already disposed");
            return 0;
        };

        let count = actions.len();
        for action in actions {
            action();
        }

        tracing::debug!(label = %self.label, "Disposed {} map listeners", count);
        count
    }

    pub fn is_disposed(&self) -> bool {
        self.registry.borrow().is_disposed()
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        if self.dispose_on_drop {
            self.dispose();
        }
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("label", &self.label)
            .field("disposed", &self.is_disposed())
            .field("pending", &self.registry.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_action(log: &Rc<RefCell<Vec<u32>>>, value: u32) -> CleanupAction {
        let log = Rc::clone(log);
        Box::new(move || log.borrow_mut().push(value))
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut registry = CleanupRegistry::default();
        let first = registry.push(Box::new(|| {}));
        let second = registry.push(Box::new(|| {}));

        assert!(first < second);
        assert_eq!(first.to_string(), "#0");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_drain_preserves_order_and_closes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = CleanupRegistry::default();
        for value in 1..=3 {
            registry.push(recording_action(&log, value));
        }

        let actions = registry.drain().unwrap();
        for action in actions {
            action();
        }

        assert_eq!(*log.borrow(), vec![1, 2, 3]);
        assert!(registry.is_disposed());
        assert_eq!(registry.len(), 0);
        assert!(registry.drain().is_none());
    }

    #[test]
    fn test_take_removes_single_entry() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = CleanupRegistry::default();
        let first = registry.push(recording_action(&log, 1));
        registry.push(recording_action(&log, 2));

        let action = registry.take(first).unwrap();
        action();

        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(registry.len(), 1);
        assert!(registry.take(first).is_none());
    }

    #[test]
    fn test_disposer_runs_actions_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = Rc::new(RefCell::new(CleanupRegistry::default()));
        registry.borrow_mut().push(recording_action(&log, 7));

        let disposer = Disposer::new(Rc::clone(&registry), "test".to_string(), false);
        assert!(!disposer.is_disposed());

        assert_eq!(disposer.dispose(), 1);
        assert_eq!(disposer.dispose(), 0);
        assert!(disposer.is_disposed());
        assert_eq!(*log.borrow(), vec![7]);
    }

    #[test]
    fn test_disposer_drop_respects_config() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let registry = Rc::new(RefCell::new(CleanupRegistry::default()));
        registry.borrow_mut().push(recording_action(&log, 1));
        drop(Disposer::new(Rc::clone(&registry), "auto".to_string(), true));
        assert!(registry.borrow().is_disposed());

        let registry = Rc::new(RefCell::new(CleanupRegistry::default()));
        registry.borrow_mut().push(recording_action(&log, 2));
        drop(Disposer::new(Rc::clone(&registry), "manual".to_string(), false));
        assert!(!registry.borrow().is_disposed());

        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn test_disposer_debug_output() {
        let registry = Rc::new(RefCell::new(CleanupRegistry::default()));
        registry.borrow_mut().push(Box::new(|| {}));
        let disposer = Disposer::new(registry, "debug".to_string(), false);

        let output = format!("{:?}", disposer);
        assert!(output.contains("label: \"debug\""));
        assert!(output.contains("pending: 1"));
    }
}
