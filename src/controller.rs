// Generation job lifecycle: submit, poll, demo fallback, reset
//
// Worker tasks never touch controller state. They report through the job
// event channel, stamped with the epoch they were spawned under, and the
// owner of the controller feeds those events back through `apply`. Every
// submit and reset bumps the epoch, so anything an older worker still has
// in flight is dropped on arrival.
//
// When the backend cannot be reached, or answers with something we cannot
// use, the run continues as a local simulation that ends with a fixed demo
// book. This keeps the client usable without a live backend and is the
// intended degraded mode, not an error path.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{ApiError, BookSmithClient, RemoteStatus};
use crate::events::{JobEvent, JobEventKind};
use crate::models::{GenerationRequest, GenerationStatus, JobHandle, Notice, Timing};
use crate::opener::ArtifactOpener;

/// Last step a run can show while it is still running.
pub const FINAL_RUNNING_STEP: u8 = 4;
pub const COMPLETED_STEP: u8 = 5;

pub const DEMO_CONTENT: &str = "# The Art of Building Better Habits

## Chapter 1: Understanding Habit Formation

Habits are the quiet structure of everyday life. A large share of what we do \
each day runs on habit rather than deliberate choice. This chapter looks at \
the loop behind every habit: cue, routine and reward.

### The Habit Loop

1. **Cue**: the trigger that starts the behavior
2. **Routine**: the behavior itself
3. **Reward**: what you get out of it

## Chapter 2: The Power of Small Changes

Improvements of one percent look like nothing on a single day. Compounded \
over a year they add up to something remarkable:

1.01^365 = 37.78

## Chapter 3: Designing Your Environment

- Make the cues for good habits obvious
- Remove friction from the behaviors you want
- Add friction to the behaviors you don't
- Decide in advance when and where you will act

## Conclusion

Better habits come from understanding how they form and applying a few \
strategies consistently. Start small and let the results compound.";

/// Map a remote job phase onto the step checkpoints shown to the user.
pub const fn get_step_from_status(status: RemoteStatus) -> u8 {
    match status {
        RemoteStatus::CreatingOutline => 1,
        RemoteStatus::Researching => 2,
        RemoteStatus::Writing => 3,
        RemoteStatus::Finalizing => 4,
        RemoteStatus::Completed => 5,
        RemoteStatus::Pending | RemoteStatus::Error | RemoteStatus::Unknown => 0,
    }
}

/// Percentage for a step, where step 4 is already 100%.
pub fn get_progress_from_step(step: u8) -> u8 {
    let percent = u16::from(step) * 100 / u16::from(FINAL_RUNNING_STEP);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Result of one status check against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    InProgress(u8),
    Completed(String),
    Failed,
}

pub async fn poll_once(client: &BookSmithClient, handle: &JobHandle) -> Result<PollOutcome, ApiError> {
    let status = client.job_status(handle).await?;
    match status {
        RemoteStatus::Completed => {
            let content = client.job_result(handle).await?;
            Ok(PollOutcome::Completed(content))
        }
        RemoteStatus::Error => Ok(PollOutcome::Failed),
        other => Ok(PollOutcome::InProgress(get_step_from_status(other))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Opened(String),
    /// No job handle: nothing was opened.
    DemoMode,
}

pub struct JobController {
    client: BookSmithClient,
    opener: Box<dyn ArtifactOpener>,
    timing: Timing,
    event_tx: mpsc::UnboundedSender<JobEvent>,
    epoch: u64,
    task: Option<JoinHandle<()>>,

    status: GenerationStatus,
    step: u8,
    progress: u8,
    content: String,
    job: Option<JobHandle>,
    demo_mode: bool,
}

impl JobController {
    pub fn new(
        client: BookSmithClient,
        opener: Box<dyn ArtifactOpener>,
        timing: Timing,
        event_tx: mpsc::UnboundedSender<JobEvent>,
    ) -> Self {
        Self {
            client,
            opener,
            timing,
            event_tx,
            epoch: 0,
            task: None,
            status: GenerationStatus::Idle,
            step: 0,
            progress: 0,
            content: String::new(),
            job: None,
            demo_mode: false,
        }
    }

    pub const fn status(&self) -> GenerationStatus {
        self.status
    }

    pub const fn step(&self) -> u8 {
        self.step
    }

    pub const fn progress(&self) -> u8 {
        self.progress
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn job_handle(&self) -> Option<&JobHandle> {
        self.job.as_ref()
    }

    pub const fn is_demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Start a new run. The caller guarantees genre and topic are set and
    /// that no run is in progress.
    pub fn submit(&mut self, request: GenerationRequest) {
        self.start_epoch();
        self.status = GenerationStatus::Running;
        self.step = 1;
        self.progress = 0;

        tracing::info!(
            epoch = self.epoch,
            genre = %request.genre,
            topic = %request.topic,
            "Submitting generation request",
        );

        let worker = Worker {
            client: self.client.clone(),
            timing: self.timing,
            event_tx: self.event_tx.clone(),
            epoch: self.epoch,
        };
        self.task = Some(tokio::spawn(async move { worker.create_job(request).await }));
    }

    /// Start polling the backend for `handle`. Has no effect unless a run is
    /// in progress.
    pub fn poll(&mut self, handle: JobHandle) {
        if self.status != GenerationStatus::Running {
            return;
        }

        self.abort_task();
        self.job = Some(handle.clone());

        let worker = Worker {
            client: self.client.clone(),
            timing: self.timing,
            event_tx: self.event_tx.clone(),
            epoch: self.epoch,
        };
        self.task = Some(tokio::spawn(async move { worker.poll_job(handle).await }));
    }

    /// Return to idle and orphan everything the previous run scheduled.
    pub fn reset(&mut self) {
        tracing::info!(epoch = self.epoch, "Resetting generation");
        self.start_epoch();
    }

    /// Fold a worker event into the controller state. Returns a notice for
    /// the user when the event is worth one.
    pub fn apply(&mut self, event: JobEvent) -> Option<Notice> {
        if event.epoch != self.epoch {
            tracing::debug!(
                event_epoch = event.epoch,
                current_epoch = self.epoch,
                "Dropping stale job event",
            );
            return None;
        }
        if self.status != GenerationStatus::Running {
            return None;
        }

        match event.kind {
            JobEventKind::JobCreated(handle) => {
                tracing::info!(job_id = %handle, "Job created, polling for status");
                self.poll(handle);
                None
            }
            JobEventKind::Progress(step) => {
                self.advance(step);
                None
            }
            JobEventKind::Completed(content) => {
                tracing::info!(chars = content.len(), "Generation completed");
                self.complete(content);
                Some(Notice::success("Book generated successfully!"))
            }
            JobEventKind::Failed => {
                tracing::warn!(job_id = ?self.job, "Backend reported a failed generation");
                self.status = GenerationStatus::Error;
                self.task = None;
                Some(Notice::error("Generation failed. Please try again."))
            }
            JobEventKind::FellBackToDemo => {
                self.demo_mode = true;
                self.job = None;
                None
            }
            JobEventKind::DemoCompleted => {
                tracing::info!("Demo generation completed");
                self.complete(DEMO_CONTENT.to_string());
                Some(Notice::success("Book generated successfully!"))
            }
        }
    }

    pub fn download_artifact(&self, handle: Option<&JobHandle>) -> Result<DownloadOutcome> {
        let Some(handle) = handle else {
            tracing::debug!("Download requested in demo mode");
            return Ok(DownloadOutcome::DemoMode);
        };

        let url = self.client.download_url(handle);
        tracing::info!(%url, "Opening PDF download");
        self.opener.open(&url)?;
        Ok(DownloadOutcome::Opened(url))
    }

    fn advance(&mut self, step: u8) {
        self.step = self.step.max(step.min(FINAL_RUNNING_STEP));
        self.progress = get_progress_from_step(self.step);
    }

    fn complete(&mut self, content: String) {
        self.status = GenerationStatus::Completed;
        self.step = COMPLETED_STEP;
        self.progress = 100;
        self.content = content;
        self.task = None;
    }

    fn start_epoch(&mut self) {
        self.abort_task();
        self.epoch += 1;
        self.status = GenerationStatus::Idle;
        self.step = 0;
        self.progress = 0;
        self.content.clear();
        self.job = None;
        self.demo_mode = false;
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for JobController {
    fn drop(&mut self) {
        self.abort_task();
    }
}

/// Everything a spawned task needs, detached from the controller.
struct Worker {
    client: BookSmithClient,
    timing: Timing,
    event_tx: mpsc::UnboundedSender<JobEvent>,
    epoch: u64,
}

impl Worker {
    /// Returns false once nobody is listening anymore.
    fn emit(&self, kind: JobEventKind) -> bool {
        self.event_tx
            .send(JobEvent {
                epoch: self.epoch,
                kind,
            })
            .is_ok()
    }

    async fn create_job(self, request: GenerationRequest) {
        match self.client.generate_book(&request).await {
            Ok(handle) => {
                self.emit(JobEventKind::JobCreated(handle));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Backend unavailable, running demo generation");
                self.simulate().await;
            }
        }
    }

    async fn poll_job(self, handle: JobHandle) {
        loop {
            match poll_once(&self.client, &handle).await {
                Ok(PollOutcome::InProgress(step)) => {
                    tracing::debug!(job_id = %handle, step, "Job in progress");
                    if !self.emit(JobEventKind::Progress(step)) {
                        return;
                    }
                    tokio::time::sleep(self.timing.poll_interval).await;
                }
                Ok(PollOutcome::Completed(content)) => {
                    self.emit(JobEventKind::Completed(content));
                    return;
                }
                Ok(PollOutcome::Failed) => {
                    self.emit(JobEventKind::Failed);
                    return;
                }
                Err(e) => {
                    tracing::warn!(job_id = %handle, error = %e, "Polling failed, running demo generation");
                    self.simulate().await;
                    return;
                }
            }
        }
    }

    async fn simulate(&self) {
        if !self.emit(JobEventKind::FellBackToDemo) {
            return;
        }
        for step in 1..=FINAL_RUNNING_STEP {
            tokio::time::sleep(self.timing.simulation_step).await;
            if !self.emit(JobEventKind::Progress(step)) {
                return;
            }
        }
        tokio::time::sleep(self.timing.simulation_settle).await;
        self.emit(JobEventKind::DemoCompleted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opener::MockArtifactOpener;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_timing() -> Timing {
        Timing {
            poll_interval: Duration::from_millis(10),
            simulation_step: Duration::from_millis(10),
            simulation_settle: Duration::from_millis(10),
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            genre: "Productivity".to_string(),
            topic: "Deep work for remote teams".to_string(),
            description: Some("Practical, no fluff".to_string()),
            tone: "Friendly".to_string(),
            audience: "Team leads".to_string(),
        }
    }

    fn unreachable_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn controller_with(
        base_url: &str,
        opener: MockArtifactOpener,
        timing: Timing,
    ) -> (JobController, mpsc::UnboundedReceiver<JobEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = BookSmithClient::new(base_url, 5).unwrap();
        (JobController::new(client, Box::new(opener), timing, tx), rx)
    }

    fn controller(base_url: &str) -> (JobController, mpsc::UnboundedReceiver<JobEvent>) {
        controller_with(base_url, MockArtifactOpener::new(), fast_timing())
    }

    /// Feed events into the controller until it leaves `Running`, recording
    /// every step it passed through.
    async fn drive(
        controller: &mut JobController,
        rx: &mut mpsc::UnboundedReceiver<JobEvent>,
    ) -> Vec<u8> {
        let mut steps = vec![controller.step()];
        let deadline = Duration::from_secs(5);
        tokio::time::timeout(deadline, async {
            while controller.status() == GenerationStatus::Running {
                let event = rx.recv().await.expect("event channel closed");
                controller.apply(event);
                steps.push(controller.step());
            }
        })
        .await
        .expect("run did not finish in time");
        steps
    }

    fn assert_monotonic(steps: &[u8]) {
        assert!(
            steps.windows(2).all(|w| w[0] <= w[1]),
            "steps went backwards: {steps:?}"
        );
    }

    #[test]
    fn test_step_from_status() {
        assert_eq!(get_step_from_status(RemoteStatus::Pending), 0);
        assert_eq!(get_step_from_status(RemoteStatus::CreatingOutline), 1);
        assert_eq!(get_step_from_status(RemoteStatus::Researching), 2);
        assert_eq!(get_step_from_status(RemoteStatus::Writing), 3);
        assert_eq!(get_step_from_status(RemoteStatus::Finalizing), 4);
        assert_eq!(get_step_from_status(RemoteStatus::Completed), 5);
        assert_eq!(get_step_from_status(RemoteStatus::Unknown), 0);
    }

    #[test]
    fn test_progress_from_step_is_clamped() {
        let expected = [0, 25, 50, 75, 100, 100];
        for (step, percent) in expected.iter().enumerate() {
            assert_eq!(get_progress_from_step(u8::try_from(step).unwrap()), *percent);
        }
        assert_eq!(get_progress_from_step(u8::MAX), 100);
    }

    #[tokio::test]
    async fn test_submit_is_running_before_any_response() {
        let (mut controller, _rx) = controller(&unreachable_url());
        assert_eq!(controller.status(), GenerationStatus::Idle);

        controller.submit(request());

        assert_eq!(controller.status(), GenerationStatus::Running);
        assert_eq!(controller.step(), 1);
        assert_eq!(controller.progress(), 0);
        assert!(controller.content().is_empty());
        assert!(controller.job_handle().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_completes_with_demo_content() {
        let (mut controller, mut rx) = controller(&unreachable_url());
        controller.submit(request());

        let steps = drive(&mut controller, &mut rx).await;

        assert_eq!(controller.status(), GenerationStatus::Completed);
        assert_eq!(controller.step(), 5);
        assert_eq!(controller.progress(), 100);
        assert_eq!(controller.content(), DEMO_CONTENT);
        assert!(controller.is_demo_mode());
        assert!(controller.job_handle().is_none());
        assert_monotonic(&steps);
        assert!(steps.contains(&4));
    }

    #[tokio::test]
    async fn test_demo_run_finishes_within_simulated_duration() {
        let timing = Timing {
            poll_interval: Duration::from_millis(10),
            simulation_step: Duration::from_millis(50),
            simulation_settle: Duration::from_millis(25),
        };
        let (mut controller, mut rx) =
            controller_with(&unreachable_url(), MockArtifactOpener::new(), timing);

        let started = tokio::time::Instant::now();
        controller.submit(request());
        drive(&mut controller, &mut rx).await;
        let elapsed = started.elapsed();

        assert_eq!(controller.status(), GenerationStatus::Completed);
        assert!(elapsed >= Duration::from_millis(4 * 50 + 25));
        assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn test_rejected_submission_falls_back_to_demo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (mut controller, mut rx) = controller(&server.uri());
        controller.submit(request());
        drive(&mut controller, &mut rx).await;

        assert_eq!(controller.status(), GenerationStatus::Completed);
        assert_eq!(controller.content(), DEMO_CONTENT);
    }

    #[tokio::test]
    async fn test_backend_completion_uses_remote_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"job_id": "job-1"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/status/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "writing"})))
            .up_to_n_times(2)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/status/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "completed"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/result/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"content": "X"})))
            .expect(1)
            .mount(&server)
            .await;

        let (mut controller, mut rx) = controller(&server.uri());
        controller.submit(request());
        let steps = drive(&mut controller, &mut rx).await;

        assert_eq!(controller.status(), GenerationStatus::Completed);
        assert_eq!(controller.content(), "X");
        assert_eq!(controller.step(), 5);
        assert_eq!(controller.progress(), 100);
        assert_eq!(controller.job_handle(), Some(&JobHandle::new("job-1")));
        assert!(!controller.is_demo_mode());
        assert!(steps.contains(&3));
        assert_monotonic(&steps);
    }

    #[tokio::test]
    async fn test_backend_error_stops_polling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"job_id": "job-9"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/status/job-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "error"})))
            .expect(1)
            .mount(&server)
            .await;

        let (mut controller, mut rx) = controller(&server.uri());
        controller.submit(request());
        drive(&mut controller, &mut rx).await;

        assert_eq!(controller.status(), GenerationStatus::Error);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let status_calls = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == "/status/job-9")
            .count();
        assert_eq!(status_calls, 1);
        assert!(rx.try_recv().is_err());
        assert_eq!(controller.status(), GenerationStatus::Error);
    }

    #[tokio::test]
    async fn test_polling_failure_falls_back_to_demo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"job_id": "job-3"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/status/job-3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let (mut controller, mut rx) = controller(&server.uri());
        controller.submit(request());
        drive(&mut controller, &mut rx).await;

        assert_eq!(controller.status(), GenerationStatus::Completed);
        assert_eq!(controller.content(), DEMO_CONTENT);
        assert!(controller.is_demo_mode());
        assert!(controller.job_handle().is_none());
    }

    #[tokio::test]
    async fn test_result_fetch_failure_falls_back_to_demo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"job_id": "job-4"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/status/job-4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "completed"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/result/job-4"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Job not completed yet"))
            .expect(1)
            .mount(&server)
            .await;

        let (mut controller, mut rx) = controller(&server.uri());
        controller.submit(request());
        let steps = drive(&mut controller, &mut rx).await;

        assert_eq!(controller.status(), GenerationStatus::Completed);
        assert_eq!(controller.step(), 5);
        assert_eq!(controller.progress(), 100);
        assert_eq!(controller.content(), DEMO_CONTENT);
        assert!(controller.is_demo_mode());
        assert!(controller.job_handle().is_none());
        assert_monotonic(&steps);
    }

    #[tokio::test]
    async fn test_reset_mid_simulation_ignores_old_timers() {
        let timing = Timing {
            poll_interval: Duration::from_millis(10),
            simulation_step: Duration::from_millis(20),
            simulation_settle: Duration::from_millis(20),
        };
        let (mut controller, mut rx) =
            controller_with(&unreachable_url(), MockArtifactOpener::new(), timing);
        controller.submit(request());

        while controller.step() < 2 {
            let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .unwrap()
                .unwrap();
            controller.apply(event);
        }

        controller.reset();
        tokio::time::sleep(Duration::from_millis(300)).await;
        while let Ok(event) = rx.try_recv() {
            controller.apply(event);
        }

        assert_eq!(controller.status(), GenerationStatus::Idle);
        assert_eq!(controller.step(), 0);
        assert_eq!(controller.progress(), 0);
        assert!(controller.content().is_empty());
        assert!(controller.job_handle().is_none());
    }

    #[tokio::test]
    async fn test_stale_epoch_event_is_dropped() {
        let (mut controller, mut rx) = controller(&unreachable_url());
        controller.submit(request());
        let stale_epoch = controller.epoch;
        controller.reset();
        controller.submit(request());

        let notice = controller.apply(JobEvent {
            epoch: stale_epoch,
            kind: JobEventKind::DemoCompleted,
        });
        assert!(notice.is_none());
        assert_eq!(controller.status(), GenerationStatus::Running);
        assert_eq!(controller.step(), 1);

        drive(&mut controller, &mut rx).await;
        assert_eq!(controller.status(), GenerationStatus::Completed);
    }

    #[tokio::test]
    async fn test_new_run_after_completion_starts_fresh() {
        let (mut controller, mut rx) = controller(&unreachable_url());
        controller.submit(request());
        drive(&mut controller, &mut rx).await;
        assert_eq!(controller.step(), 5);

        controller.reset();
        controller.submit(request());
        assert_eq!(controller.status(), GenerationStatus::Running);
        assert_eq!(controller.step(), 1);
        assert_eq!(controller.progress(), 0);
        assert!(controller.content().is_empty());
    }

    #[tokio::test]
    async fn test_completion_emits_success_notice() {
        let (mut controller, _rx) = controller(&unreachable_url());
        controller.submit(request());
        let notice = controller.apply(JobEvent {
            epoch: controller.epoch,
            kind: JobEventKind::DemoCompleted,
        });
        assert_eq!(notice.map(|n| n.kind), Some(crate::models::NoticeKind::Success));
    }

    #[tokio::test]
    async fn test_progress_never_reaches_completed_step_while_running() {
        let (mut controller, _rx) = controller(&unreachable_url());
        controller.submit(request());
        let epoch = controller.epoch;

        controller.apply(JobEvent { epoch, kind: JobEventKind::Progress(3) });
        controller.apply(JobEvent { epoch, kind: JobEventKind::Progress(0) });
        assert_eq!(controller.step(), 3);
        assert_eq!(controller.progress(), 75);

        controller.apply(JobEvent { epoch, kind: JobEventKind::Progress(5) });
        assert_eq!(controller.status(), GenerationStatus::Running);
        assert_eq!(controller.step(), 4);
        assert_eq!(controller.progress(), 100);
    }

    #[test]
    fn test_download_without_handle_opens_nothing() {
        let mut opener = MockArtifactOpener::new();
        opener.expect_open().times(0);
        let (controller, _rx) = controller_with("http://127.0.0.1:8000", opener, fast_timing());

        let outcome = controller.download_artifact(None).unwrap();
        assert_eq!(outcome, DownloadOutcome::DemoMode);
    }

    #[test]
    fn test_download_with_handle_opens_pdf_url() {
        let mut opener = MockArtifactOpener::new();
        opener
            .expect_open()
            .withf(|url| url.to_string() == "http://127.0.0.1:8000/download/pdf/job-5")
            .times(1)
            .returning(|_| Ok(()));
        let (controller, _rx) = controller_with("http://127.0.0.1:8000/", opener, fast_timing());

        let outcome = controller
            .download_artifact(Some(&JobHandle::new("job-5")))
            .unwrap();
        assert_eq!(
            outcome,
            DownloadOutcome::Opened("http://127.0.0.1:8000/download/pdf/job-5".to_string())
        );
    }
}
