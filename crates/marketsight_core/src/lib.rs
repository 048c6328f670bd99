//! MarketSight core: pure dashboard state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Job, JobId, JobStatus, PollSeq, UploadCandidate, POLL_INTERVAL};
pub use update::{update, UPLOAD_FAILED_ALERT};
pub use view_model::{
    BadgeStyle, DashboardViewModel, JobRowView, EMPTY_JOBS_PLACEHOLDER, SUBMIT_LABEL_IDLE,
    SUBMIT_LABEL_UPLOADING,
};
