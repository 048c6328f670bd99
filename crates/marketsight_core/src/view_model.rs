use crate::{Job, JobId, JobStatus};

pub const EMPTY_JOBS_PLACEHOLDER: &str = "No jobs yet. Upload a CSV to start!";
pub const SUBMIT_LABEL_IDLE: &str = "Start Training";
pub const SUBMIT_LABEL_UPLOADING: &str = "Uploading...";

/// Visual class of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    /// Green.
    Success,
    /// Blue, pulsing.
    Active,
    /// Red.
    Danger,
    /// Yellow; pending and every unrecognised status.
    Neutral,
}

impl BadgeStyle {
    pub fn for_status(status: &JobStatus) -> Self {
        match status {
            JobStatus::Completed => BadgeStyle::Success,
            JobStatus::Processing => BadgeStyle::Active,
            JobStatus::Failed => BadgeStyle::Danger,
            JobStatus::Pending | JobStatus::Other(_) => BadgeStyle::Neutral,
        }
    }

    pub fn pulses(self) -> bool {
        matches!(self, BadgeStyle::Active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardViewModel {
    /// Newest first.
    pub jobs: Vec<JobRowView>,
    /// Set when `jobs` is empty; rendered as one row spanning every column.
    pub placeholder: Option<&'static str>,
    pub selected_file: Option<String>,
    pub uploading: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub dirty: bool,
}

impl DashboardViewModel {
    pub(crate) fn new(
        jobs: Vec<JobRowView>,
        selected_file: Option<String>,
        uploading: bool,
        dirty: bool,
    ) -> Self {
        let placeholder = jobs.is_empty().then_some(EMPTY_JOBS_PLACEHOLDER);
        let submit_enabled = selected_file.is_some() && !uploading;
        let submit_label = if uploading {
            SUBMIT_LABEL_UPLOADING
        } else {
            SUBMIT_LABEL_IDLE
        };
        Self {
            jobs,
            placeholder,
            selected_file,
            uploading,
            submit_enabled,
            submit_label,
            dirty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub id_label: String,
    pub filename: String,
    pub status_label: String,
    pub badge: BadgeStyle,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl JobRowView {
    pub(crate) fn from_job(job: &Job) -> Self {
        Self {
            job_id: job.id,
            id_label: format!("#{}", job.id),
            filename: job.filename.clone(),
            status_label: job.status.as_str().to_uppercase(),
            badge: BadgeStyle::for_status(&job.status),
            created_at: job.created_at.clone(),
            updated_at: job.updated_at.clone(),
        }
    }
}
