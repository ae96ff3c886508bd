use std::time::Duration;

use futures_util::StreamExt;
use serde::Deserialize;

use crate::{FilePayload, ServiceError, StatusKind, UploadTicket};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Base URL of the processing service.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound for a downloaded result body.
    pub max_result_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_result_bytes: 25 * 1024 * 1024,
        }
    }
}

impl ServiceSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// The remote processing service, seen from the client side.
#[async_trait::async_trait]
pub trait ProcessingService: Send + Sync {
    /// Uploads one image; on success the server issues a task handle.
    async fn upload(&self, file: &FilePayload) -> Result<UploadTicket, ServiceError>;

    /// Queries the status of an in-flight task.
    async fn check_status(&self, task_id: &str) -> Result<StatusKind, ServiceError>;

    /// Retrieves a processed result body.
    async fn fetch_result(&self, result_path: &str) -> Result<Vec<u8>, ServiceError>;
}

/// Upload response body. The `error` field is authoritative: its presence
/// means failure regardless of the HTTP status code.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    task_id: Option<String>,
    result_path: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpProcessingService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl HttpProcessingService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl ProcessingService for HttpProcessingService {
    async fn upload(&self, file: &FilePayload) -> Result<UploadTicket, ServiceError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|err| ServiceError::InvalidRequest(err.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let decoded: UploadResponse = serde_json::from_slice(&body).map_err(|err| {
            if status.is_success() {
                ServiceError::InvalidResponse(err.to_string())
            } else {
                ServiceError::HttpStatus(status.as_u16())
            }
        })?;

        if let Some(message) = decoded.error {
            return Err(ServiceError::Rejected(message));
        }
        if !status.is_success() {
            return Err(ServiceError::HttpStatus(status.as_u16()));
        }
        match (decoded.task_id, decoded.result_path) {
            (Some(task_id), Some(result_path)) => Ok(UploadTicket {
                task_id,
                result_path,
            }),
            _ => Err(ServiceError::InvalidResponse(
                "upload response missing task_id or result_path".to_string(),
            )),
        }
    }

    async fn check_status(&self, task_id: &str) -> Result<StatusKind, ServiceError> {
        let response = self
            .client
            .get(self.endpoint(&format!("status/{task_id}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // The body is decoded regardless of the HTTP status: the service
        // reports task state (including `not_found`) with non-2xx codes.
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let decoded: StatusResponse = serde_json::from_slice(&body).map_err(|err| {
            if status.is_success() {
                ServiceError::InvalidResponse(err.to_string())
            } else {
                ServiceError::HttpStatus(status.as_u16())
            }
        })?;

        if let Some(message) = decoded.error {
            return Err(ServiceError::Rejected(message));
        }
        match decoded.status {
            Some(raw) => Ok(StatusKind::parse(&raw)),
            None => Err(ServiceError::InvalidResponse(
                "status response missing status field".to_string(),
            )),
        }
    }

    async fn fetch_result(&self, result_path: &str) -> Result<Vec<u8>, ServiceError> {
        let url = if result_path.starts_with("http://") || result_path.starts_with("https://") {
            result_path.to_string()
        } else {
            self.endpoint(result_path)
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::HttpStatus(status.as_u16()));
        }

        let max_bytes = self.settings.max_result_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ServiceError::TooLarge { max_bytes });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(ServiceError::TooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::Timeout;
    }
    ServiceError::Network(err.to_string())
}
