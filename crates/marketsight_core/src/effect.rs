use std::path::PathBuf;
use std::time::Duration;

use crate::PollSeq;

/// IO requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the recurring poll timer. The first tick fires immediately.
    StartPolling { interval: Duration },
    /// Cancel the recurring poll timer. In-flight requests are left alone.
    StopPolling,
    /// GET the job list, tagged so stale responses can be discarded.
    FetchJobs { seq: PollSeq },
    /// POST the file as multipart form data under field `file`.
    UploadFile { path: PathBuf, file_name: String },
    /// Blocking, user-visible alert.
    ShowAlert { message: String },
}
