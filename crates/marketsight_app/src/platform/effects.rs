use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_debug, engine_info};
use marketsight_core::{Effect, Job, JobStatus, Msg};
use marketsight_engine::{ApiJob, EngineEvent, EngineEvents, EngineHandle, JobsApi};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

use super::ui::constants::WINDOW_TITLE;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    /// `wake` is called after every message forwarded from the engine so the
    /// UI can pick it up without waiting for input.
    pub fn new(
        api: Arc<dyn JobsApi>,
        msg_tx: mpsc::Sender<Msg>,
        wake: impl Fn() + Send + 'static,
    ) -> Self {
        let (engine, events) = EngineHandle::new(api);
        spawn_event_loop(events, msg_tx, wake);
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartPolling { interval } => {
                    engine_info!("Polling jobs every {:?}", interval);
                    self.engine.start_polling(interval);
                }
                Effect::StopPolling => {
                    engine_info!("Polling stopped");
                    self.engine.stop_polling();
                }
                Effect::FetchJobs { seq } => {
                    engine_debug!("FetchJobs seq={}", seq);
                    self.engine.fetch_jobs(seq);
                }
                Effect::UploadFile { path, file_name } => {
                    engine_info!("UploadFile name={} path={:?}", file_name, path);
                    self.engine.upload(path, file_name);
                }
                Effect::ShowAlert { message } => {
                    // Blocks this frame until dismissed.
                    let _ = MessageDialog::new()
                        .set_title(WINDOW_TITLE)
                        .set_description(message)
                        .set_level(MessageLevel::Error)
                        .set_buttons(MessageButtons::Ok)
                        .show();
                }
            }
        }
    }
}

fn spawn_event_loop(
    events: EngineEvents,
    msg_tx: mpsc::Sender<Msg>,
    wake: impl Fn() + Send + 'static,
) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
            wake();
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PollTick => Msg::PollTick,
        EngineEvent::JobsFetched { seq, result } => match result {
            Ok(jobs) => Msg::JobsLoaded {
                seq,
                jobs: jobs.into_iter().map(map_job).collect(),
            },
            Err(err) => Msg::JobsFailed {
                seq,
                error: err.to_string(),
            },
        },
        EngineEvent::UploadCompleted { file_name, result } => {
            Msg::UploadFinished(result.map_err(|err| format!("{file_name}: {err}")))
        }
    }
}

fn map_job(job: ApiJob) -> Job {
    Job {
        id: job.id,
        filename: job.filename,
        status: JobStatus::from_raw(&job.status),
        created_at: job.created_at,
        updated_at: job.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use marketsight_engine::{ApiError, FailureKind};

    use super::*;

    fn api_job(id: u64, status: &str) -> ApiJob {
        ApiJob {
            id,
            filename: "prices.csv".to_string(),
            status: status.to_string(),
            created_at: "2024-03-01T10:00:00".to_string(),
            updated_at: None,
        }
    }

    fn http_error(code: u16) -> ApiError {
        ApiError {
            kind: FailureKind::HttpStatus(code),
            message: format!("{code}"),
        }
    }

    #[test]
    fn fetched_jobs_keep_server_order() {
        let msg = map_event(EngineEvent::JobsFetched {
            seq: 4,
            result: Ok(vec![api_job(1, "pending"), api_job(2, "queued")]),
        });

        let Msg::JobsLoaded { seq, jobs } = msg else {
            panic!("expected JobsLoaded");
        };
        assert_eq!(seq, 4);
        assert_eq!(jobs.iter().map(|job| job.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(jobs[0].status, JobStatus::Pending);
        assert_eq!(jobs[1].status, JobStatus::Other("queued".to_string()));
    }

    #[test]
    fn fetch_errors_become_poll_failures() {
        let msg = map_event(EngineEvent::JobsFetched {
            seq: 9,
            result: Err(http_error(500)),
        });
        assert_eq!(
            msg,
            Msg::JobsFailed {
                seq: 9,
                error: "http status 500: 500".to_string(),
            }
        );
    }

    #[test]
    fn upload_outcomes_are_forwarded() {
        assert_eq!(
            map_event(EngineEvent::UploadCompleted {
                file_name: "prices.csv".to_string(),
                result: Ok(()),
            }),
            Msg::UploadFinished(Ok(()))
        );

        let msg = map_event(EngineEvent::UploadCompleted {
            file_name: "prices.csv".to_string(),
            result: Err(http_error(422)),
        });
        assert_eq!(
            msg,
            Msg::UploadFinished(Err("prices.csv: http status 422: 422".to_string()))
        );
    }

    #[test]
    fn poll_ticks_pass_straight_through() {
        assert_eq!(map_event(EngineEvent::PollTick), Msg::PollTick);
    }
}
