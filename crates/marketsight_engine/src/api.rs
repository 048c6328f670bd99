use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::{ApiError, ApiJob, FailureKind};

/// Compile-time environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "MARKETSIGHT_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const UPLOAD_FIELD: &str = "file";
const UPLOAD_CONTENT_TYPE: &str = "text/csv";

/// Where the backend lives. Fixed at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Validates `raw` as an http(s) base URL; trailing slashes are dropped.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let parsed = url::Url::parse(trimmed)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, format!("{trimmed}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{trimmed}: expected an http(s) base url"),
            ));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Reads `MARKETSIGHT_API_URL` as it was when the crate was compiled.
    pub fn from_build_env() -> Result<Self, ApiError> {
        Self::parse(option_env!("MARKETSIGHT_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn jobs_url(&self) -> String {
        format!("{}/jobs/", self.base_url)
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload/", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// HTTP client knobs. No timeouts unless set.
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

#[async_trait::async_trait]
pub trait JobsApi: Send + Sync {
    /// `GET /jobs/`, in server order.
    async fn list_jobs(&self) -> Result<Vec<ApiJob>, ApiError>;

    /// `POST /upload/` with `contents` as the multipart field `file`.
    async fn upload_csv(&self, file_name: &str, contents: Vec<u8>) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobsApi {
    config: ApiConfig,
    client: reqwest::Client,
}

impl ReqwestJobsApi {
    pub fn new(config: ApiConfig, settings: ClientSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl JobsApi for ReqwestJobsApi {
    async fn list_jobs(&self) -> Result<Vec<ApiJob>, ApiError> {
        let response = self
            .client
            .get(self.config.jobs_url())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(&response)?;

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }

    async fn upload_csv(&self, file_name: &str, contents: Vec<u8>) -> Result<(), ApiError> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(UPLOAD_CONTENT_TYPE)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(&response)
    }
}

fn ensure_success(response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_joined_onto_trimmed_base() {
        let config = ApiConfig::parse("http://api.example.com:8000/").unwrap();
        assert_eq!(config.base_url(), "http://api.example.com:8000");
        assert_eq!(config.jobs_url(), "http://api.example.com:8000/jobs/");
        assert_eq!(config.upload_url(), "http://api.example.com:8000/upload/");
    }

    #[test]
    fn base_with_path_prefix_is_kept() {
        let config = ApiConfig::parse("https://example.com/api").unwrap();
        assert_eq!(config.jobs_url(), "https://example.com/api/jobs/");
    }

    #[test]
    fn non_http_urls_are_rejected() {
        let err = ApiConfig::parse("mailto:ops@example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);

        let err = ApiConfig::parse("not a url").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ApiConfig::default().jobs_url(), "http://localhost:8000/jobs/");
    }
}
