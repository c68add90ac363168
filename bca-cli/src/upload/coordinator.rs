//! Upload-and-poll coordinator
//!
//! Submits a screened batch to the extraction backend and, when the backend
//! hands back a job id, follows the job until it completes or a status check
//! fails. Every transition is reported to a [`DisplaySurface`].
//!
//! Status checks never overlap: each check claims the session's in-flight
//! guard, and timer ticks that find it held are dropped. A failed check ends
//! the session; nothing here retries on its own.

use bca_client::{ClientError, DocumentApi};
use bca_core::ValidationError;
use bca_core::domain::document::{DocumentFile, FileSelection, SelectionReport, UploadBatch};
use bca_core::domain::job::JobId;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::display::{Banner, DisplaySurface, JobView};
use super::session::{PollState, PollingSession};

/// Shown when the upload request fails
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to send documents. Please try again.";

/// Shown when a status check fails
pub const POLL_FAILED_MESSAGE: &str = "Failed to fetch job status.";

/// Default time between status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Errors surfaced by [`UploadCoordinator`]
#[derive(Debug, Error)]
pub enum UploadError {
    /// The batch was rejected before anything was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The upload request failed; the selection is kept for another try
    #[error("Failed to send documents. Please try again.")]
    UploadFailed(#[source] ClientError),
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Job being polled, if the backend returned one
    pub job_id: Option<JobId>,
    /// Names of the documents that were sent
    pub files: Vec<String>,
}

impl UploadOutcome {
    pub fn started_polling(&self) -> bool {
        self.job_id.is_some()
    }
}

/// What a single status check did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CheckOutcome {
    /// Job still running; keep polling
    Pending,
    /// The session ended during this check
    Finished,
    /// Guard held or session inactive; nothing was sent
    Skipped,
    /// The session ended while the request was outstanding; result dropped
    Stale,
}

/// Drives document submission and job status polling
///
/// Holds at most one polling session; submitting again replaces it. Dropping
/// the coordinator tears the session down.
pub struct UploadCoordinator {
    api: Arc<dyn DocumentApi>,
    display: Arc<dyn DisplaySurface>,
    poll_interval: Duration,
    selection: FileSelection,
    session: Option<Arc<PollingSession>>,
    state: Arc<watch::Sender<PollState>>,
}

impl UploadCoordinator {
    pub fn new(api: Arc<dyn DocumentApi>, display: Arc<dyn DisplaySurface>) -> Self {
        let (state, _) = watch::channel(PollState::Idle);
        Self {
            api,
            display,
            poll_interval: DEFAULT_POLL_INTERVAL,
            selection: FileSelection::new(),
            session: None,
            state: Arc::new(state),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    // =============================================================================
    // Selection
    // =============================================================================

    /// Replaces the selection with the allowed subset of `candidates`
    pub fn select(
        &mut self,
        candidates: Vec<DocumentFile>,
    ) -> Result<SelectionReport, ValidationError> {
        match self.selection.select(candidates) {
            Ok(report) => {
                if let Some(notice) = report.rejection_notice() {
                    self.display.banner(&Banner::Skipped(notice));
                }
                Ok(report)
            }
            Err(e) => {
                if let Some(notice) = bca_core::error::skipped_files_notice(e.rejected_files()) {
                    self.display.banner(&Banner::Skipped(notice));
                }
                self.display.banner(&Banner::Error(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn selected(&self) -> &[DocumentFile] {
        self.selection.files()
    }

    // =============================================================================
    // Submission
    // =============================================================================

    /// Submits the current selection
    pub async fn submit_selected(&mut self, actor: &str) -> Result<UploadOutcome, UploadError> {
        let batch = self.selection.to_batch()?;
        self.submit_batch(batch, actor).await
    }

    /// Uploads `batch` on behalf of `actor`
    ///
    /// On success the selection is cleared and, if the backend returned a job
    /// id, polling starts with one immediate status check before this call
    /// returns.
    pub async fn submit_batch(
        &mut self,
        batch: UploadBatch,
        actor: &str,
    ) -> Result<UploadOutcome, UploadError> {
        let files = batch.names();
        info!("Submitting {} document(s) as {}", files.len(), actor);
        self.display.banner(&Banner::Sending { count: files.len() });

        let receipt = match self.api.upload(batch.files(), actor).await {
            Ok(receipt) => receipt,
            Err(e) => {
                error!("Failed to send documents: {}", e);
                self.display
                    .banner(&Banner::Error(UPLOAD_FAILED_MESSAGE.to_string()));
                return Err(UploadError::UploadFailed(e));
            }
        };

        self.display.banner(&Banner::Sent {
            actor: actor.to_string(),
            files: files.clone(),
        });
        if let Some(message) = receipt.message {
            self.display.banner(&Banner::ServerMessage(message));
        }
        self.selection.clear();

        let job_id = receipt.job_id.filter(|id| !id.as_str().is_empty());
        match &job_id {
            Some(job_id) => self.start_polling(job_id.clone()).await,
            None => debug!("Upload returned no job id; not polling"),
        }

        Ok(UploadOutcome { job_id, files })
    }

    // =============================================================================
    // Polling
    // =============================================================================

    /// Current polling state
    pub fn state(&self) -> PollState {
        *self.state.borrow()
    }

    /// Subscribe to polling state changes
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }

    /// Waits until the current session ends
    ///
    /// Returns immediately when nothing is being polled.
    pub async fn wait_until_finished(&self) -> PollState {
        let mut rx = self.subscribe();
        match rx.wait_for(|s| *s != PollState::Polling).await {
            Ok(state) => *state,
            Err(_) => PollState::Cancelled,
        }
    }

    /// Tears down the current session, if any
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            if session.teardown(PollState::Cancelled) {
                info!("Stopped polling job {}", session.job_id());
                self.display.job_state(&JobView::default());
            }
        }
    }

    async fn start_polling(&mut self, job_id: JobId) {
        self.cancel();

        info!("Polling job {} every {:?}", job_id, self.poll_interval);
        let session = PollingSession::start(job_id, Arc::clone(&self.state));
        self.session = Some(Arc::clone(&session));
        self.display.job_state(&JobView {
            status_label: None,
            result_message: None,
            busy: true,
        });

        let outcome = poll_once(&session, self.api.as_ref(), self.display.as_ref()).await;
        if outcome == CheckOutcome::Pending && session.is_active() {
            let timer = spawn_timer(
                Arc::clone(&session),
                Arc::clone(&self.api),
                Arc::clone(&self.display),
                self.poll_interval,
            );
            session.arm_timer(timer.abort_handle());
        }
    }
}

impl Drop for UploadCoordinator {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.teardown(PollState::Cancelled);
        }
    }
}

/// Performs one status check for `session`
pub(crate) async fn poll_once(
    session: &PollingSession,
    api: &dyn DocumentApi,
    display: &dyn DisplaySurface,
) -> CheckOutcome {
    let Some(_guard) = session.try_begin_check() else {
        debug!("Skipping status check for job {}", session.job_id());
        return CheckOutcome::Skipped;
    };

    debug!("Checking status of job {}", session.job_id());
    let result = api.status(session.job_id()).await;

    if !session.is_active() {
        debug!("Dropping status for ended session {}", session.job_id());
        return CheckOutcome::Stale;
    }

    match result {
        Ok(payload) => {
            let mut view = JobView {
                status_label: payload.status_label(),
                result_message: payload.result_message(),
                busy: true,
            };

            if payload.is_terminal() {
                info!("Job {} completed", session.job_id());
                session.teardown(PollState::Completed);
                view.busy = false;
                display.job_state(&view);
                CheckOutcome::Finished
            } else {
                display.job_state(&view);
                CheckOutcome::Pending
            }
        }
        Err(e) => {
            warn!("Failed to fetch status of job {}: {}", session.job_id(), e);
            session.teardown(PollState::Failed);
            display.job_state(&JobView {
                status_label: None,
                result_message: Some(POLL_FAILED_MESSAGE.to_string()),
                busy: false,
            });
            CheckOutcome::Finished
        }
    }
}

/// Spawns the recurring check
///
/// Each tick spawns its check onto a set owned by the timer task, so a slow
/// request does not delay the ticks and aborting the timer also aborts any
/// outstanding check.
fn spawn_timer(
    session: Arc<PollingSession>,
    api: Arc<dyn DocumentApi>,
    display: Arc<dyn DisplaySurface>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    // Anchored to arming time, not to when the task is first polled
    let start = Instant::now() + period;
    tokio::spawn(async move {
        let mut ticker = time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut checks = JoinSet::new();

        loop {
            ticker.tick().await;
            if !session.is_active() {
                break;
            }

            while checks.try_join_next().is_some() {}

            let session = Arc::clone(&session);
            let api = Arc::clone(&api);
            let display = Arc::clone(&display);
            checks.spawn(async move {
                poll_once(&session, api.as_ref(), display.as_ref()).await;
            });
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::display::testing::RecordingDisplay;
    use async_trait::async_trait;
    use bca_core::domain::job::JobStatusPayload;
    use bca_core::dto::document::UploadReceipt;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    const INTERVAL: Duration = Duration::from_secs(5);

    enum Step {
        Status(JobStatusPayload),
        Fail,
        /// Waits for the notify before answering with the payload
        Hang(Arc<Notify>, JobStatusPayload),
    }

    #[derive(Default)]
    struct FakeApi {
        receipt: Mutex<Option<UploadReceipt>>,
        fail_upload: bool,
        steps: Mutex<VecDeque<Step>>,
        uploads: AtomicUsize,
        status_calls: AtomicUsize,
        concurrent: AtomicUsize,
        max_concurrent: AtomicUsize,
        last_actor: Mutex<Option<String>>,
    }

    impl FakeApi {
        fn with_receipt(message: Option<&str>, job_id: Option<&str>) -> Self {
            Self {
                receipt: Mutex::new(Some(UploadReceipt {
                    message: message.map(str::to_string),
                    job_id: job_id.map(JobId::new),
                })),
                ..Default::default()
            }
        }

        fn then(self, step: Step) -> Self {
            self.steps.lock().unwrap().push_back(step);
            self
        }

        fn status_calls(&self) -> usize {
            self.status_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentApi for FakeApi {
        async fn upload(
            &self,
            _files: &[DocumentFile],
            actor: &str,
        ) -> bca_client::Result<UploadReceipt> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            *self.last_actor.lock().unwrap() = Some(actor.to_string());
            if self.fail_upload {
                return Err(ClientError::api_error(500, "boom"));
            }
            Ok(self.receipt.lock().unwrap().clone().unwrap_or_default())
        }

        async fn status(&self, _job_id: &JobId) -> bca_client::Result<JobStatusPayload> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            let now = self.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_concurrent.fetch_max(now, Ordering::SeqCst);

            let step = self.steps.lock().unwrap().pop_front();
            let result = match step {
                Some(Step::Status(payload)) => Ok(payload),
                Some(Step::Hang(notify, payload)) => {
                    notify.notified().await;
                    Ok(payload)
                }
                Some(Step::Fail) => Err(ClientError::ParseError("bad body".to_string())),
                None => Ok(JobStatusPayload::Text("processing".to_string())),
            };

            self.concurrent.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    fn text(s: &str) -> JobStatusPayload {
        JobStatusPayload::Text(s.to_string())
    }

    fn batch(names: &[&str]) -> UploadBatch {
        UploadBatch::screen(names.iter().map(|n| DocumentFile::from_path(*n)).collect())
            .unwrap()
            .batch
    }

    fn coordinator(api: &Arc<FakeApi>, display: &Arc<RecordingDisplay>) -> UploadCoordinator {
        let api: Arc<dyn DocumentApi> = api.clone();
        let display: Arc<dyn DisplaySurface> = display.clone();
        UploadCoordinator::new(api, display).with_poll_interval(INTERVAL)
    }

    /// Lets spawned tasks run without moving the clock
    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    async fn tick(periods: u32) {
        for _ in 0..periods {
            time::advance(INTERVAL).await;
            settle().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_then_completed_scenario() {
        let api = Arc::new(
            FakeApi::with_receipt(Some("ok"), Some("J1"))
                .then(Step::Status(text("queued")))
                .then(Step::Status(JobStatusPayload::from_json(&serde_json::json!({
                    "status": "completed",
                    "result": { "message": "Done" }
                })))),
        );
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        let outcome = coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();

        assert!(
            display
                .banners()
                .contains(&Banner::ServerMessage("ok".to_string()))
        );
        assert!(outcome.started_polling());
        assert_eq!(coordinator.state(), PollState::Polling);
        assert_eq!(api.status_calls(), 1);
        assert_eq!(
            display.last_view().unwrap(),
            JobView {
                status_label: Some("Queued".to_string()),
                result_message: None,
                busy: true,
            }
        );

        tick(1).await;

        assert_eq!(api.status_calls(), 2);
        assert_eq!(coordinator.state(), PollState::Completed);
        assert_eq!(
            display.last_view().unwrap(),
            JobView {
                status_label: Some("Completed".to_string()),
                result_message: Some("Done".to_string()),
                busy: false,
            }
        );

        tick(4).await;
        assert_eq!(api.status_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checks_follow_the_interval_from_submission() {
        let api = Arc::new(FakeApi::with_receipt(None, Some("J1")));
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();
        assert_eq!(api.status_calls(), 1);

        time::advance(INTERVAL - Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(api.status_calls(), 1);

        time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(api.status_calls(), 2);

        tick(3).await;
        assert_eq!(api.status_calls(), 5);
        assert_eq!(coordinator.state(), PollState::Polling);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_check_failure_ends_session() {
        let api = Arc::new(FakeApi::with_receipt(None, Some("J1")).then(Step::Fail));
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();

        assert_eq!(coordinator.state(), PollState::Failed);
        assert_eq!(
            display.last_view().unwrap(),
            JobView {
                status_label: None,
                result_message: Some(POLL_FAILED_MESSAGE.to_string()),
                busy: false,
            }
        );
        assert!(!coordinator.session.as_ref().unwrap().has_timer());

        tick(3).await;
        assert_eq!(api.status_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_ticks_clears_label() {
        let api = Arc::new(
            FakeApi::with_receipt(None, Some("J1"))
                .then(Step::Status(text("processing")))
                .then(Step::Fail),
        );
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();
        tick(1).await;

        assert_eq!(coordinator.state(), PollState::Failed);
        let view = display.last_view().unwrap();
        assert_eq!(view.status_label, None);
        assert!(!view.busy);

        tick(3).await;
        assert_eq!(api.status_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_without_job_id_does_not_poll() {
        let api = Arc::new(FakeApi::with_receipt(Some("stored"), None));
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        let outcome = coordinator
            .submit_batch(batch(&["a.pdf", "b.docx"]), "alice")
            .await
            .unwrap();

        assert!(!outcome.started_polling());
        assert_eq!(coordinator.state(), PollState::Idle);
        assert_eq!(coordinator.wait_until_finished().await, PollState::Idle);

        tick(3).await;
        assert_eq!(api.status_calls(), 0);
        assert!(display.views.lock().unwrap().is_empty());
        assert!(display.banners().contains(&Banner::ServerMessage("stored".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_job_id_does_not_poll() {
        let api = Arc::new(FakeApi::with_receipt(Some("stored"), Some("")));
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        let outcome = coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();

        assert!(!outcome.started_polling());
        assert!(outcome.job_id.is_none());
        assert_eq!(coordinator.state(), PollState::Idle);

        tick(2).await;
        assert_eq!(api.status_calls(), 0);
        assert!(display.views.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_ticks_are_dropped() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(
            FakeApi::with_receipt(None, Some("J1"))
                .then(Step::Status(text("queued")))
                .then(Step::Hang(Arc::clone(&gate), text("completed"))),
        );
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();

        // First tick starts a request that hangs; later ticks find the guard held.
        tick(3).await;
        assert_eq!(api.status_calls(), 2);
        assert_eq!(api.max_concurrent.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.state(), PollState::Polling);

        gate.notify_one();
        settle().await;

        assert_eq!(coordinator.state(), PollState::Completed);
        tick(2).await;
        assert_eq!(api.status_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_tears_down_session() {
        let api = Arc::new(FakeApi::with_receipt(None, Some("J1")));
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);
        let rx = coordinator.subscribe();

        coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();
        tick(1).await;
        assert_eq!(api.status_calls(), 2);

        drop(coordinator);
        assert_eq!(*rx.borrow(), PollState::Cancelled);

        tick(3).await;
        assert_eq!(api.status_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_teardown_is_not_rendered() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(
            FakeApi::with_receipt(None, Some("J1"))
                .then(Step::Status(text("queued")))
                .then(Step::Hang(Arc::clone(&gate), text("completed"))),
        );
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();
        tick(1).await;
        let rendered = display.views.lock().unwrap().len();

        coordinator.cancel();
        gate.notify_one();
        settle().await;

        assert_eq!(coordinator.state(), PollState::Cancelled);
        // Only the reset view from cancel() was added.
        assert_eq!(display.views.lock().unwrap().len(), rendered + 1);
        assert_eq!(display.last_view().unwrap(), JobView::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_submission_replaces_session() {
        let api = Arc::new(FakeApi::with_receipt(None, Some("J1")));
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();
        let first = Arc::clone(coordinator.session.as_ref().unwrap());

        coordinator
            .submit_batch(batch(&["b.pdf"]), "alice")
            .await
            .unwrap();
        let second = Arc::clone(coordinator.session.as_ref().unwrap());

        assert!(!first.is_active());
        assert!(!first.has_timer());
        assert!(second.is_active());
        assert_eq!(coordinator.state(), PollState::Polling);

        // One check per tick from the surviving session only.
        tick(1).await;
        assert_eq!(api.status_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_failure_keeps_selection() {
        let api = Arc::new(FakeApi {
            fail_upload: true,
            ..Default::default()
        });
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        coordinator
            .select(vec![DocumentFile::from_path("a.pdf")])
            .unwrap();
        let err = coordinator.submit_selected("alice").await.unwrap_err();

        assert!(matches!(err, UploadError::UploadFailed(_)));
        assert_eq!(err.to_string(), UPLOAD_FAILED_MESSAGE);
        assert_eq!(coordinator.selected().len(), 1);
        assert_eq!(coordinator.state(), PollState::Idle);
        assert!(
            display
                .banners()
                .contains(&Banner::Error(UPLOAD_FAILED_MESSAGE.to_string()))
        );

        // Resubmitting is allowed and reaches the backend again.
        assert!(coordinator.submit_selected("alice").await.is_err());
        assert_eq!(api.uploads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_selection_and_reports_actor() {
        let api = Arc::new(FakeApi::with_receipt(Some("ok"), None));
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        coordinator
            .select(vec![
                DocumentFile::from_path("a.pdf"),
                DocumentFile::from_path("notes.txt"),
            ])
            .unwrap();
        coordinator.submit_selected("alice").await.unwrap();

        assert!(coordinator.selected().is_empty());
        assert_eq!(api.last_actor.lock().unwrap().as_deref(), Some("alice"));

        let banners = display.banners();
        assert!(banners.contains(&Banner::Skipped(
            "Unsupported files skipped: notes.txt".to_string()
        )));
        assert!(banners.contains(&Banner::Sent {
            actor: "alice".to_string(),
            files: vec!["a.pdf".to_string()],
        }));
    }

    #[tokio::test]
    async fn test_disallowed_selection_never_reaches_network() {
        let api = Arc::new(FakeApi::with_receipt(None, None));
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        let err = coordinator
            .select(vec![DocumentFile::from_path("evil.exe")])
            .unwrap_err();
        assert_eq!(err.rejected_files(), &["evil.exe".to_string()]);

        let err = coordinator.submit_selected("alice").await.unwrap_err();
        assert!(matches!(
            err,
            UploadError::Validation(ValidationError::EmptyBatch)
        ));
        assert_eq!(api.uploads.load(Ordering::SeqCst), 0);

        let banners = display.banners();
        assert!(banners.contains(&Banner::Skipped(
            "Unsupported files skipped: evil.exe".to_string()
        )));
        assert!(banners.contains(&Banner::Error(
            "Only Word, Excel, or PDF documents are allowed.".to_string()
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_finished_returns_terminal_state() {
        let api = Arc::new(
            FakeApi::with_receipt(None, Some("J1"))
                .then(Step::Status(text("running")))
                .then(Step::Status(text("running")))
                .then(Step::Status(text("Completed"))),
        );
        let display = Arc::new(RecordingDisplay::default());
        let mut coordinator = coordinator(&api, &display);

        coordinator
            .submit_batch(batch(&["a.pdf"]), "alice")
            .await
            .unwrap();

        // Paused clock auto-advances while the waiter is parked.
        assert_eq!(coordinator.wait_until_finished().await, PollState::Completed);
        assert_eq!(api.status_calls(), 3);
    }
}
