use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use jointravel_reaction::{
    ReactionController, ReactionState, ReactionStatus, ReactionStore, ReactionType, Session,
    StoreError, SubjectId,
};
use tokio::sync::Semaphore;

/// In-memory reaction store that behaves like the real one: one reaction per
/// viewer, counts include other users. Failures can be queued and toggles can
/// be held until released.
#[derive(Default)]
pub struct FakeStore {
    server: Mutex<HashMap<SubjectId, ReactionStatus>>,
    failures: Mutex<VecDeque<StoreError>>,
    gate: Option<Semaphore>,
    status_gate: Option<Semaphore>,
    toggles: AtomicUsize,
}

#[allow(dead_code)]
impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles wait for [`FakeStore::release`] before answering.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Default::default()
        }
    }

    /// Status reads answer with the server state as it was when they were
    /// made, but only after [`FakeStore::release_status`].
    pub fn holding_status(self) -> Self {
        Self {
            status_gate: Some(Semaphore::new(0)),
            ..self
        }
    }

    pub fn with_status(
        self,
        subject: &SubjectId,
        reaction_type: Option<ReactionType>,
        like_count: u32,
        dislike_count: u32,
    ) -> Self {
        self.set_status(subject, reaction_type, like_count, dislike_count);
        self
    }

    pub fn set_status(
        &self,
        subject: &SubjectId,
        reaction_type: Option<ReactionType>,
        like_count: u32,
        dislike_count: u32,
    ) {
        self.server.lock().unwrap().insert(
            subject.clone(),
            ReactionStatus {
                reaction_type,
                like_count,
                dislike_count,
            },
        );
    }

    pub fn server_status(&self, subject: &SubjectId) -> ReactionStatus {
        self.server
            .lock()
            .unwrap()
            .get(subject)
            .copied()
            .unwrap_or_default()
    }

    pub fn fail_next(&self, err: StoreError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn release_status(&self) {
        if let Some(gate) = &self.status_gate {
            gate.add_permits(1);
        }
    }

    pub fn toggles(&self) -> usize {
        self.toggles.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReactionStore for FakeStore {
    async fn status(&self, subject: &SubjectId) -> Result<ReactionStatus, StoreError> {
        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }

        let status = self.server_status(subject);

        if let Some(gate) = &self.status_gate {
            gate.acquire()
                .await
                .map_err(|e| StoreError::Other(e.to_string()))?
                .forget();
        }

        Ok(status)
    }

    async fn toggle(
        &self,
        subject: &SubjectId,
        requested: ReactionType,
    ) -> Result<ReactionStatus, StoreError> {
        self.toggles.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| StoreError::Other(e.to_string()))?
                .forget();
        }

        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }

        let mut server = self.server.lock().unwrap();
        let current = server.entry(subject.clone()).or_default();
        *current = ReactionState::from_status(subject.clone(), *current)
            .apply(requested)
            .status();

        Ok(*current)
    }
}

#[allow(dead_code)]
pub fn signed_in(store: &Arc<FakeStore>) -> ReactionController {
    ReactionController::new(store.clone(), Arc::new(Session::signed_in("token")))
}

#[allow(dead_code)]
pub fn anonymous(store: &Arc<FakeStore>) -> ReactionController {
    ReactionController::new(store.clone(), Arc::new(Session::anonymous()))
}
