#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Dashboard view became visible; starts polling.
    Mounted,
    /// Dashboard view is going away; stops polling.
    Unmounted,
    /// Poll timer fired.
    PollTick,
    /// Job list response for the poll tagged `seq`, in server order.
    JobsLoaded {
        seq: crate::PollSeq,
        jobs: Vec<crate::Job>,
    },
    /// Job list request tagged `seq` failed.
    JobsFailed { seq: crate::PollSeq, error: String },
    /// User picked a file, or cancelled the picker (`None`).
    FileSelected(Option<crate::UploadCandidate>),
    /// User clicked "Start Training".
    SubmitClicked,
    /// Upload request finished.
    UploadFinished(Result<(), String>),
    /// Fallback for placeholder wiring.
    NoOp,
}
