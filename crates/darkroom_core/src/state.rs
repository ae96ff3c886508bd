use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::view_model::AppViewModel;

/// Monotonically increasing submission counter.
///
/// Every engine-originated message carries the generation it was issued
/// under; the reducer drops messages whose generation is no longer current,
/// so poll callbacks of an abandoned task can never touch the UI.
pub type Generation = u64;

/// A file offered by the picker or a drop, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    /// Media type declared from the file name, e.g. `image/png`.
    pub media_type: String,
    pub bytes: Arc<Vec<u8>>,
}

/// A validated image, owned by the state machine until the task resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<Vec<u8>>,
}

impl From<CandidateFile> for SelectedFile {
    fn from(candidate: CandidateFile) -> Self {
        Self {
            name: candidate.name,
            media_type: candidate.media_type,
            bytes: candidate.bytes,
        }
    }
}

/// Server-issued handle for one in-flight processing job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    pub task_id: String,
    /// Path of the eventual output, assigned at creation; content is not
    /// ready until the task completes.
    pub result_path: String,
}

/// Lifecycle of the current submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskPhase {
    #[default]
    Idle,
    Submitting,
    Processing,
    Completed,
    Failed,
}

impl TaskPhase {
    /// Completed and Failed are terminal: no further polling happens.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskPhase::Completed | TaskPhase::Failed)
    }
}

/// Outcome of one status query, already decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReport {
    Processing,
    Completed,
    /// The service reported `error:<message>`; this is the message part.
    Error(String),
    /// A status literal outside the service contract, routed through
    /// [`UnrecognizedStatusPolicy`].
    Unrecognized(String),
}

/// What to do when the poll budget is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutAction {
    /// Fail the task with a timeout notice.
    #[default]
    Fail,
    /// Abandon the task quietly and return to Idle.
    Reset,
}

/// What to do with a status value the service contract does not name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnrecognizedStatusPolicy {
    /// Treat it as transient and keep polling.
    #[default]
    Retry,
    /// Fail the task, naming the unexpected value.
    Fail,
}

/// Polling configuration.
///
/// The default mirrors the service contract: a fixed one-second interval and
/// no cap on attempts, favoring eventual completion over bounded latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between consecutive status queries.
    pub interval: Duration,
    /// Optional cap on the number of status queries per task.
    pub max_attempts: Option<u32>,
    pub on_timeout: TimeoutAction,
    pub unrecognized: UnrecognizedStatusPolicy,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: None,
            on_timeout: TimeoutAction::default(),
            unrecognized: UnrecognizedStatusPolicy::default(),
        }
    }
}

/// Which display slot a rendered preview belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTarget {
    Original,
    Processed,
}

/// A displayable image slot: a loader URI plus the backing bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub uri: String,
    pub media_type: String,
    pub bytes: Arc<Vec<u8>>,
}

/// Failure taxonomy surfaced to the user as a blocking notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Wrong file type, caught before any network call.
    Validation,
    /// Upload endpoint returned non-2xx or a body carrying an error field.
    Upload,
    /// Network or parse failure while querying status.
    PollTransport,
    /// The status endpoint explicitly reported an `error:` status.
    RemoteProcessing,
    /// The poll budget was exhausted before a terminal status.
    Timeout,
    /// Fetching or writing the processed result failed.
    Download,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    generation: Generation,
    phase: TaskPhase,
    policy: PollPolicy,
    selected: Option<SelectedFile>,
    task: Option<TaskHandle>,
    /// Status queries issued for the current task.
    attempts: u32,
    notice: Option<Notice>,
    original_preview: Option<PreviewImage>,
    processed_preview: Option<PreviewImage>,
    drop_active: bool,
    saved_to: Option<PathBuf>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PollPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            loading: matches!(self.phase, TaskPhase::Submitting | TaskPhase::Processing),
            results_visible: self.phase == TaskPhase::Completed,
            drop_active: self.drop_active,
            selected_name: self.selected.as_ref().map(|file| file.name.clone()),
            original_preview: self.original_preview.clone(),
            processed_preview: self.processed_preview.clone(),
            notice: self.notice.clone(),
            download_available: self.phase == TaskPhase::Completed && self.task.is_some(),
            result_path: self
                .task
                .as_ref()
                .map(|task| task.result_path.clone()),
            saved_to: self.saved_to.clone(),
            poll_attempts: self.attempts,
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }

    pub(crate) fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    pub(crate) fn phase(&self) -> TaskPhase {
        self.phase
    }

    pub(crate) fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    pub(crate) fn task(&self) -> Option<&TaskHandle> {
        self.task.as_ref()
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Starts a new submission, implicitly abandoning any prior task.
    ///
    /// Bumping the generation is what abandons it: in-flight callbacks of the
    /// old task still arrive, but carry a stale generation.
    pub(crate) fn begin_submission(&mut self, file: SelectedFile) -> Generation {
        self.generation += 1;
        self.phase = TaskPhase::Submitting;
        self.selected = Some(file);
        self.task = None;
        self.attempts = 0;
        self.notice = None;
        self.original_preview = None;
        self.processed_preview = None;
        self.saved_to = None;
        self.mark_dirty();
        self.generation
    }

    pub(crate) fn accept_upload(&mut self, handle: TaskHandle) {
        self.task = Some(handle);
        self.phase = TaskPhase::Processing;
        self.mark_dirty();
    }

    pub(crate) fn record_check(&mut self) {
        self.attempts += 1;
        self.mark_dirty();
    }

    pub(crate) fn complete(&mut self) {
        self.phase = TaskPhase::Completed;
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.phase = TaskPhase::Failed;
        self.notice = Some(Notice {
            kind,
            message: message.into(),
        });
        self.mark_dirty();
    }

    /// Quiet abandonment: drop the task and return to Idle without a notice.
    pub(crate) fn reset(&mut self) {
        self.phase = TaskPhase::Idle;
        self.task = None;
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            message: message.into(),
        });
        self.mark_dirty();
    }

    pub(crate) fn set_preview(&mut self, target: PreviewTarget, image: PreviewImage) {
        match target {
            PreviewTarget::Original => self.original_preview = Some(image),
            PreviewTarget::Processed => self.processed_preview = Some(image),
        }
        self.mark_dirty();
    }

    pub(crate) fn set_drop_active(&mut self, active: bool) {
        if self.drop_active != active {
            self.drop_active = active;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_saved(&mut self, path: PathBuf) {
        self.saved_to = Some(path);
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
