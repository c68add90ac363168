//! Polling session
//!
//! One session tracks one job. It owns the recurring timer task and the
//! in-flight guard, and it can be torn down exactly once.

use bca_core::domain::job::JobId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::debug;

/// Lifecycle of the coordinator's current polling session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No job has been tracked yet
    Idle,
    Polling,
    /// A terminal status was observed
    Completed,
    /// A status check failed
    Failed,
    /// The owner tore the session down, or a newer submission replaced it
    Cancelled,
}

pub(crate) struct PollingSession {
    job_id: JobId,
    active: AtomicBool,
    in_flight: AtomicBool,
    timer: Mutex<Option<AbortHandle>>,
    state: Arc<watch::Sender<PollState>>,
}

impl PollingSession {
    /// Starts a session and publishes [`PollState::Polling`]
    pub(crate) fn start(job_id: JobId, state: Arc<watch::Sender<PollState>>) -> Arc<Self> {
        state.send_replace(PollState::Polling);
        Arc::new(Self {
            job_id,
            active: AtomicBool::new(true),
            in_flight: AtomicBool::new(false),
            timer: Mutex::new(None),
            state,
        })
    }

    pub(crate) fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub(crate) fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub(crate) fn has_timer(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Claims the in-flight guard
    ///
    /// Returns `None` when the session is no longer active or another check
    /// is still outstanding. The guard is released when the returned value
    /// is dropped.
    pub(crate) fn try_begin_check(&self) -> Option<InFlightGuard<'_>> {
        if !self.is_active() {
            return None;
        }
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(InFlightGuard { session: self })
    }

    /// Hands the recurring timer to the session
    ///
    /// A session that was already torn down aborts the timer immediately.
    pub(crate) fn arm_timer(&self, handle: AbortHandle) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_active() {
            handle.abort();
            return;
        }
        if let Some(previous) = timer.replace(handle) {
            previous.abort();
        }
    }

    /// Cancels the timer, clears the guard and publishes `outcome`
    ///
    /// Only the first call has any effect; returns whether this call tore
    /// the session down.
    pub(crate) fn teardown(&self, outcome: PollState) -> bool {
        if !self.active.swap(false, Ordering::AcqRel) {
            return false;
        }

        if let Some(timer) = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            timer.abort();
        }
        self.in_flight.store(false, Ordering::Release);
        self.state.send_replace(outcome);

        debug!("Polling session for job {} ended: {:?}", self.job_id, outcome);
        true
    }
}

/// Releases the in-flight flag on drop
pub(crate) struct InFlightGuard<'a> {
    session: &'a PollingSession,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.in_flight.store(false, Ordering::Release);
    }
}
