use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use crate::ReactionState;

/// Receives the reconciled state after every successful toggle.
pub trait ReactionObserver: Send + Sync {
    fn reaction_changed(&self, state: &ReactionState);
}

impl<F> ReactionObserver for F
where
    F: Fn(&ReactionState) + Send + Sync,
{
    fn reaction_changed(&self, state: &ReactionState) {
        self(state)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: AtomicU64,
    entries: Mutex<Vec<(SubscriptionId, Arc<dyn ReactionObserver>)>>,
}

impl Observers {
    pub(crate) fn subscribe(&self, observer: Arc<dyn ReactionObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));

        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);

        entries.len() != before
    }

    pub(crate) fn notify(&self, state: &ReactionState) {
        // Snapshot first so an observer may subscribe or unsubscribe from its callback.
        let observers: Vec<_> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        for observer in observers {
            observer.reaction_changed(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::{ReactionCounts, SubjectId};

    #[test]
    fn test_unsubscribed_observer_is_not_called() {
        let observers = Observers::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let id = observers.subscribe(Arc::new(move |_: &ReactionState| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let state = ReactionState::seeded(SubjectId::from("r"), ReactionCounts::default());
        observers.notify(&state);
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&state);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
