use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};

use crate::{AppState, Effect, Msg, POLL_INTERVAL};

pub const UPLOAD_FAILED_ALERT: &str = "Upload failed!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.is_mounted() {
                return (state, Vec::new());
            }
            state.set_mounted(true);
            state.mark_dirty();
            vec![Effect::StartPolling {
                interval: POLL_INTERVAL,
            }]
        }
        Msg::Unmounted => {
            if !state.is_mounted() {
                return (state, Vec::new());
            }
            state.set_mounted(false);
            vec![Effect::StopPolling]
        }
        Msg::PollTick => {
            if !state.is_mounted() {
                return (state, Vec::new());
            }
            vec![Effect::FetchJobs {
                seq: state.next_poll_seq(),
            }]
        }
        Msg::JobsLoaded { seq, jobs } => {
            if !state.is_mounted() {
                engine_debug!("Ignoring job list seq={} after unmount", seq);
            } else if !state.apply_jobs(seq, jobs) {
                engine_debug!("Dropping stale job list seq={}", seq);
            }
            Vec::new()
        }
        Msg::JobsFailed { seq, error } => {
            // The previous list stays on screen until the next successful tick.
            engine_warn!("Error fetching jobs (seq={}): {}", seq, error);
            Vec::new()
        }
        Msg::FileSelected(candidate) => {
            state.select_file(candidate);
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_upload() {
            Some(candidate) => {
                engine_info!("Uploading {}", candidate.file_name);
                vec![Effect::UploadFile {
                    path: candidate.path,
                    file_name: candidate.file_name,
                }]
            }
            None => Vec::new(),
        },
        Msg::UploadFinished(result) => {
            if !state.is_uploading() {
                return (state, Vec::new());
            }
            match result {
                Ok(()) => {
                    state.finish_upload(true);
                    if state.is_mounted() {
                        vec![Effect::FetchJobs {
                            seq: state.next_poll_seq(),
                        }]
                    } else {
                        Vec::new()
                    }
                }
                Err(error) => {
                    engine_error!("Error uploading file: {}", error);
                    state.finish_upload(false);
                    vec![Effect::ShowAlert {
                        message: UPLOAD_FAILED_ALERT.to_string(),
                    }]
                }
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
