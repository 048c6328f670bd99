use std::path::PathBuf;
use std::time::Duration;

use crate::view_model::{DashboardViewModel, JobRowView};

pub type JobId = u64;

/// Monotonic tag attached to each job-list request.
pub type PollSeq = u64;

/// Fixed cadence of the job-list poll.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    /// Any status string the server sends that we do not know about.
    Other(String),
}

impl JobStatus {
    /// Exact, case-sensitive match against the server's status strings.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "pending" => JobStatus::Pending,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Other(raw) => raw.as_str(),
        }
    }
}

/// A server-owned job. Never mutated locally, only replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub filename: String,
    pub status: JobStatus,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// The file the user picked for the next upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub path: PathBuf,
    pub file_name: String,
}

impl UploadCandidate {
    /// Builds a candidate from a path, using its last component as the file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, file_name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    mounted: bool,
    /// Display order: newest first.
    jobs: Vec<Job>,
    selected_file: Option<UploadCandidate>,
    uploading: bool,
    last_issued_seq: PollSeq,
    last_applied_seq: PollSeq,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> DashboardViewModel {
        DashboardViewModel::new(
            self.jobs.iter().map(JobRowView::from_job).collect(),
            self.selected_file
                .as_ref()
                .map(|candidate| candidate.file_name.clone()),
            self.uploading,
            self.dirty,
        )
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn selected_file(&self) -> Option<&UploadCandidate> {
        self.selected_file.as_ref()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn submit_enabled(&self) -> bool {
        self.selected_file.is_some() && !self.uploading
    }

    pub(crate) fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }

    pub(crate) fn next_poll_seq(&mut self) -> PollSeq {
        self.last_issued_seq += 1;
        self.last_issued_seq
    }

    /// Replaces the job list with `server_jobs` reversed, unless a newer
    /// response was already applied. Returns whether the list was replaced.
    pub(crate) fn apply_jobs(&mut self, seq: PollSeq, mut server_jobs: Vec<Job>) -> bool {
        if seq <= self.last_applied_seq {
            return false;
        }
        self.last_applied_seq = seq;
        server_jobs.reverse();
        self.jobs = server_jobs;
        self.mark_dirty();
        true
    }

    pub(crate) fn select_file(&mut self, candidate: Option<UploadCandidate>) {
        self.selected_file = candidate;
        self.mark_dirty();
    }

    /// Flips to uploading and returns the candidate to send.
    pub(crate) fn begin_upload(&mut self) -> Option<UploadCandidate> {
        if !self.submit_enabled() {
            return None;
        }
        self.uploading = true;
        self.mark_dirty();
        self.selected_file.clone()
    }

    pub(crate) fn finish_upload(&mut self, succeeded: bool) {
        self.uploading = false;
        if succeeded {
            self.selected_file = None;
        }
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
