use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use jointravel_shared::reaction::{ReactionStatus, ReactionType};
use tokio::sync::watch;

use crate::{
    ReactionCounts, ReactionError, ReactionObserver, ReactionState, ReactionStore, Session,
    SubjectId, SubscriptionId, observer::Observers,
};

/// What a reaction control renders: a consistent state, whether a toggle is
/// in flight, and the last error message until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionView {
    pub state: ReactionState,
    pub pending: bool,
    pub error: Option<String>,
}

struct Slot {
    view: ReactionView,
    generation: u64,
    /// Bumped whenever a toggle starts or settles.
    revision: u64,
    sender: watch::Sender<ReactionView>,
}

impl Slot {
    fn publish(&self) {
        self.sender.send_replace(self.view.clone());
    }
}

/// Optimistic like/dislike toggling for mounted subjects.
///
/// Each subject is `Idle` or `Pending`; a toggle on a pending subject is
/// rejected rather than queued, so at most one remote call per subject is
/// outstanding. Different subjects are independent.
pub struct ReactionController {
    store: Arc<dyn ReactionStore>,
    session: Arc<Session>,
    slots: Mutex<HashMap<SubjectId, Slot>>,
    observers: Observers,
    generations: AtomicU64,
}

impl ReactionController {
    pub fn new(store: Arc<dyn ReactionStore>, session: Arc<Session>) -> Self {
        Self {
            store,
            session,
            slots: Mutex::default(),
            observers: Observers::default(),
            generations: AtomicU64::new(0),
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<SubjectId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start tracking `subject` from the counts the parent view already has.
    ///
    /// Mounting an already mounted subject starts over; results still in
    /// flight for the earlier mount are dropped when they arrive.
    pub fn mount(&self, subject: SubjectId, seed: ReactionCounts) -> watch::Receiver<ReactionView> {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let view = ReactionView {
            state: ReactionState::seeded(subject.clone(), seed),
            pending: false,
            error: None,
        };
        let (sender, receiver) = watch::channel(view.clone());

        self.slots().insert(
            subject,
            Slot {
                view,
                generation,
                revision: 0,
                sender,
            },
        );

        receiver
    }

    pub fn unmount(&self, subject: &SubjectId) -> bool {
        self.slots().remove(subject).is_some()
    }

    pub fn watch(&self, subject: &SubjectId) -> Option<watch::Receiver<ReactionView>> {
        self.slots().get(subject).map(|slot| slot.sender.subscribe())
    }

    pub fn state(&self, subject: &SubjectId) -> Option<ReactionState> {
        self.slots().get(subject).map(|slot| slot.view.state.clone())
    }

    pub fn view(&self, subject: &SubjectId) -> Option<ReactionView> {
        self.slots().get(subject).map(|slot| slot.view.clone())
    }

    pub fn is_pending(&self, subject: &SubjectId) -> bool {
        self.slots()
            .get(subject)
            .is_some_and(|slot| slot.view.pending)
    }

    pub fn dismiss_error(&self, subject: &SubjectId) {
        if let Some(slot) = self.slots().get_mut(subject) {
            if slot.view.error.take().is_some() {
                slot.publish();
            }
        }
    }

    pub fn subscribe(&self, observer: Arc<dyn ReactionObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Replace the seeded state with the store's answer for the signed-in viewer.
    ///
    /// Anonymous viewers and pending subjects keep what they have. A failed
    /// fetch leaves the state untouched, and so does a fetch that a toggle
    /// overtook.
    pub async fn refresh(&self, subject: &SubjectId) -> Result<ReactionState, ReactionError> {
        let (generation, revision) = {
            let slots = self.slots();
            let slot = slots.get(subject).ok_or(ReactionError::NotLoaded)?;
            if !self.session.is_authenticated() || slot.view.pending {
                return Ok(slot.view.state.clone());
            }

            (slot.generation, slot.revision)
        };

        let result = self.store.status(subject).await;

        let mut slots = self.slots();
        let Some(slot) = live_slot(&mut slots, subject, generation) else {
            tracing::debug!(%subject, "subject unmounted during refresh, result dropped");
            return Err(ReactionError::Detached);
        };

        match result {
            // A toggle started, and maybe settled, while we were fetching; its
            // answer is newer than ours.
            Ok(_) if slot.revision != revision => {
                tracing::debug!(%subject, "stale reaction status dropped");
                Ok(slot.view.state.clone())
            }
            Ok(status) => {
                slot.view.state = ReactionState::from_status(subject.clone(), status);
                slot.publish();

                Ok(slot.view.state.clone())
            }
            Err(err) => {
                tracing::warn!(%subject, error = %err, "failed to refresh reaction status");

                Err(err.into())
            }
        }
    }

    /// Synchronous half of a toggle: guard, snapshot, publish the optimistic
    /// state and mark the subject pending. Nothing touches the network until
    /// [`PendingToggle::confirm`] is awaited.
    pub fn toggle_reaction(
        &self,
        subject: &SubjectId,
        requested: ReactionType,
    ) -> Result<PendingToggle<'_>, ReactionError> {
        if !self.session.is_authenticated() {
            tracing::debug!(%subject, "reaction ignored, viewer not signed in");
            return Err(ReactionError::Unauthenticated);
        }

        let mut slots = self.slots();
        let slot = slots.get_mut(subject).ok_or(ReactionError::NotLoaded)?;

        if slot.view.pending {
            tracing::debug!(%subject, %requested, "reaction ignored, toggle already in flight");
            return Err(ReactionError::InFlight);
        }

        let previous = slot.view.state.clone();
        let optimistic = previous.apply(requested);
        slot.revision += 1;

        slot.view = ReactionView {
            state: optimistic.clone(),
            pending: true,
            error: None,
        };
        slot.publish();

        Ok(PendingToggle {
            controller: self,
            subject: subject.clone(),
            requested,
            previous,
            optimistic,
            generation: slot.generation,
            settled: false,
        })
    }

    /// Both halves of a toggle.
    pub async fn toggle(
        &self,
        subject: &SubjectId,
        requested: ReactionType,
    ) -> Result<ReactionState, ReactionError> {
        self.toggle_reaction(subject, requested)?.confirm().await
    }

    fn reconcile(
        &self,
        subject: &SubjectId,
        generation: u64,
        status: ReactionStatus,
    ) -> Result<ReactionState, ReactionError> {
        let state = {
            let mut slots = self.slots();
            let Some(slot) = live_slot(&mut slots, subject, generation) else {
                tracing::debug!(%subject, "subject unmounted before toggle completed, result dropped");
                return Err(ReactionError::Detached);
            };

            slot.revision += 1;
            slot.view = ReactionView {
                state: ReactionState::from_status(subject.clone(), status),
                pending: false,
                error: None,
            };
            slot.publish();
            slot.view.state.clone()
        };

        self.observers.notify(&state);

        Ok(state)
    }

    fn roll_back(
        &self,
        subject: &SubjectId,
        generation: u64,
        previous: &ReactionState,
        error: Option<&ReactionError>,
    ) {
        let mut slots = self.slots();
        let Some(slot) = live_slot(&mut slots, subject, generation) else {
            return;
        };

        slot.revision += 1;
        slot.view = ReactionView {
            state: previous.clone(),
            pending: false,
            error: error
                .filter(|err| err.is_transient())
                .map(|err| err.user_message().to_owned()),
        };
        slot.publish();
    }
}

fn live_slot<'a>(
    slots: &'a mut HashMap<SubjectId, Slot>,
    subject: &SubjectId,
    generation: u64,
) -> Option<&'a mut Slot> {
    slots
        .get_mut(subject)
        .filter(|slot| slot.generation == generation)
}

/// A toggle whose optimistic state is already displayed.
///
/// Dropping it without calling [`confirm`](Self::confirm), or dropping the
/// `confirm` future before it finishes, restores the previous state.
#[must_use = "dropping a pending toggle rolls the optimistic state back"]
pub struct PendingToggle<'a> {
    controller: &'a ReactionController,
    subject: SubjectId,
    requested: ReactionType,
    previous: ReactionState,
    optimistic: ReactionState,
    generation: u64,
    settled: bool,
}

impl PendingToggle<'_> {
    pub fn previous(&self) -> &ReactionState {
        &self.previous
    }

    pub fn optimistic(&self) -> &ReactionState {
        &self.optimistic
    }

    /// Send the toggle and settle the subject: the store's numbers on
    /// success, the exact snapshot on failure.
    pub async fn confirm(mut self) -> Result<ReactionState, ReactionError> {
        let result = self
            .controller
            .store
            .toggle(&self.subject, self.requested)
            .await;
        self.settled = true;

        match result {
            Ok(status) => self
                .controller
                .reconcile(&self.subject, self.generation, status),
            Err(err) => {
                let err = ReactionError::from(err);
                tracing::warn!(
                    subject = %self.subject,
                    requested = %self.requested,
                    error = %err,
                    "reaction toggle failed, rolled back"
                );
                self.controller
                    .roll_back(&self.subject, self.generation, &self.previous, Some(&err));

                Err(err)
            }
        }
    }
}

impl Drop for PendingToggle<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!(subject = %self.subject, "pending toggle abandoned, rolled back");
            self.controller
                .roll_back(&self.subject, self.generation, &self.previous, None);
        }
    }
}
