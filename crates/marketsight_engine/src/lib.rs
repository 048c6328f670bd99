//! MarketSight engine: backend API client, poll timer and effect execution.
mod api;
mod engine;
mod poll;
mod types;

pub use api::{ApiConfig, ClientSettings, JobsApi, ReqwestJobsApi, API_URL_ENV, DEFAULT_API_URL};
pub use engine::{EngineEvents, EngineHandle};
pub use types::{ApiError, ApiJob, EngineEvent, FailureKind, JobId, PollSeq};
