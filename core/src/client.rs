//! Stateless HTTP request builder and response parser for the avatar API.
//!
//! # Design
//! `AvatarClient` holds only a [`ClientConfig`] and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The host executes the round trip in between.
//!
//! Parsers return `AvatarResult` for outcomes the service is allowed to
//! produce (non-2xx status, `success: false`) and `ApiError` only when a 2xx
//! body breaks the contract.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::naming;
use crate::types::{
    AvatarMetadata, AvatarResult, BatchSaveRequest, BinaryAsset, GenerateRequest, GeneratedAvatar,
    MetadataQuery, SaveRequest, ServiceStatus,
};

/// `{"success": bool, "data": ..., "error": "..."}` as returned by the JSON
/// endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// Synchronous, stateless client for the avatar API.
#[derive(Debug, Clone)]
pub struct AvatarClient {
    config: ClientConfig,
}

impl AvatarClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_generate(&self, input: &GenerateRequest) -> Result<HttpRequest, ApiError> {
        self.json_post("/avatar/generate", input)
    }

    pub fn build_save(&self, input: &SaveRequest) -> Result<HttpRequest, ApiError> {
        self.json_post("/avatar/save", input)
    }

    pub fn build_save_batch(&self, input: &BatchSaveRequest) -> Result<HttpRequest, ApiError> {
        self.json_post("/avatar/save/batch", input)
    }

    /// Parameters travel in the query string; the request has no body.
    pub fn build_fetch_metadata(&self, query: MetadataQuery) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!(
                "{}/avatar/json?size={}&gender={}",
                self.config.base_url(),
                query.size,
                query.gender.code()
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/test", self.config.base_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_generate(
        &self,
        response: HttpResponse,
    ) -> Result<AvatarResult<GeneratedAvatar>, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_fetch_metadata(
        &self,
        response: HttpResponse,
    ) -> Result<AvatarResult<AvatarMetadata>, ApiError> {
        parse_envelope(response)
    }

    /// On 2xx the body becomes an asset named `<filename>.<format>`.
    pub fn parse_save(&self, response: HttpResponse, input: &SaveRequest) -> AvatarResult<BinaryAsset> {
        into_asset(response, naming::asset_filename(&input.filename, input.format))
    }

    /// On 2xx the body becomes an archive named `avatars_<format>_<millis>.zip`.
    pub fn parse_save_batch(
        &self,
        response: HttpResponse,
        input: &BatchSaveRequest,
    ) -> AvatarResult<BinaryAsset> {
        into_asset(response, naming::batch_archive_name(input.format))
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<AvatarResult<ServiceStatus>, ApiError> {
        if let Some(failure) = failure_from_status(&response) {
            return Ok(failure);
        }
        serde_json::from_slice(&response.body)
            .map(AvatarResult::Success)
            .map_err(|e| ApiError::UnexpectedShape(e.to_string()))
    }

    fn json_post<T: Serialize>(&self, path: &str, input: &T) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{path}", self.config.base_url()),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Non-2xx responses carry a plain-text diagnostic in the body.
fn failure_from_status<T>(response: &HttpResponse) -> Option<AvatarResult<T>> {
    if response.is_success() {
        return None;
    }
    Some(AvatarResult::Failure {
        error: response.text(),
    })
}

fn parse_envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<AvatarResult<T>, ApiError> {
    if let Some(failure) = failure_from_status(&response) {
        return Ok(failure);
    }
    let envelope: Envelope<T> =
        serde_json::from_slice(&response.body).map_err(|e| ApiError::UnexpectedShape(e.to_string()))?;
    match envelope {
        Envelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(AvatarResult::Success(data)),
        Envelope { success: true, .. } => Err(ApiError::UnexpectedShape(
            "success response without `data`".to_string(),
        )),
        Envelope {
            success: false,
            error: Some(error),
            ..
        } => Ok(AvatarResult::Failure { error }),
        Envelope { success: false, .. } => Err(ApiError::UnexpectedShape(
            "failure response without `error`".to_string(),
        )),
    }
}

fn into_asset(response: HttpResponse, filename: String) -> AvatarResult<BinaryAsset> {
    if let Some(failure) = failure_from_status(&response) {
        return failure;
    }
    let content_type = response.header("content-type").map(str::to_string);
    AvatarResult::Success(BinaryAsset {
        filename,
        content_type,
        bytes: response.body,
    })
}
