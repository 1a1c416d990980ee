//! One-call-per-operation facade over [`AvatarClient`].
//!
//! # Design
//! The host supplies two capabilities: a [`Transport`] that performs the HTTP
//! round trip and an [`AssetSink`] that persists downloaded payloads.
//! `AvatarService` wires build → execute → parse → persist and reports
//! service failures through `tracing` before returning them as values.
//!
//! Operations take `&self` and share nothing mutable, so one service can be
//! driven from several threads at once when its capabilities are `Sync`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{error, info, instrument};

use crate::client::AvatarClient;
use crate::config::AvatarRequestParams;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{AvatarMetadata, AvatarResult, BinaryAsset, GeneratedAvatar, ServiceStatus};

/// Executes one HTTP round trip.
///
/// Implementations must return non-2xx responses as data; only failures to
/// complete the exchange are errors.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Persists a downloaded asset and reports where it went.
///
/// The asset is taken by value and dropped when `persist` returns, whether or
/// not the write succeeded.
pub trait AssetSink: Send + Sync {
    fn persist(&self, asset: BinaryAsset) -> Result<PathBuf, ApiError>;
}

/// Writes assets into a directory under their own filename.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AssetSink for DirectorySink {
    /// Refuses any filename that would resolve outside `dir`.
    fn persist(&self, asset: BinaryAsset) -> Result<PathBuf, ApiError> {
        let mut components = Path::new(&asset.filename).components();
        if !matches!((components.next(), components.next()), (Some(Component::Normal(_)), None)) {
            error!(filename = %asset.filename, "refusing to write outside the output directory");
            return Err(ApiError::InvalidFilename(asset.filename));
        }
        let path = self.dir.join(&asset.filename);
        fs::write(&path, &asset.bytes).map_err(|source| ApiError::Persist {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Result of a save operation. `Failed` carries the service diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Failed(String),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SaveOutcome::Saved(path) => Some(path),
            SaveOutcome::Failed(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            SaveOutcome::Saved(_) => None,
            SaveOutcome::Failed(message) => Some(message),
        }
    }
}

pub struct AvatarService<T, S> {
    client: AvatarClient,
    transport: T,
    sink: S,
}

impl<T: Transport, S: AssetSink> AvatarService<T, S> {
    pub fn new(client: AvatarClient, transport: T, sink: S) -> Self {
        Self {
            client,
            transport,
            sink,
        }
    }

    pub fn client(&self) -> &AvatarClient {
        &self.client
    }

    #[instrument(skip_all, fields(size = params.size, gender = %params.gender))]
    pub fn generate(&self, params: &AvatarRequestParams) -> Result<AvatarResult<GeneratedAvatar>, ApiError> {
        let request = self.client.build_generate(&params.generate_request())?;
        let result = self.client.parse_generate(self.transport.execute(request)?)?;
        match &result {
            AvatarResult::Success(avatar) => {
                info!(svg_len = avatar.svg.len(), "avatar generated");
            }
            AvatarResult::Failure { error } => error!(diagnostic = %error, "generate failed"),
        }
        Ok(result)
    }

    /// Downloads one avatar as `<filename>.<format>` and hands it to the sink.
    #[instrument(skip_all, fields(size = params.size, gender = %params.gender, format = %params.format))]
    pub fn save_single(&self, params: &AvatarRequestParams) -> Result<SaveOutcome, ApiError> {
        let input = params.save_request();
        let request = self.client.build_save(&input)?;
        let response = self.transport.execute(request)?;
        self.persist(self.client.parse_save(response, &input), "save")
    }

    /// Downloads `amount` avatars as one zip archive.
    #[instrument(skip_all, fields(amount = params.amount, size = params.size, format = %params.format))]
    pub fn save_batch(&self, params: &AvatarRequestParams) -> Result<SaveOutcome, ApiError> {
        let input = params.batch_request();
        let request = self.client.build_save_batch(&input)?;
        let response = self.transport.execute(request)?;
        self.persist(self.client.parse_save_batch(response, &input), "batch save")
    }

    #[instrument(skip_all, fields(size = params.size, gender = %params.gender))]
    pub fn fetch_metadata(&self, params: &AvatarRequestParams) -> Result<AvatarResult<AvatarMetadata>, ApiError> {
        let request = self.client.build_fetch_metadata(params.metadata_query());
        let result = self.client.parse_fetch_metadata(self.transport.execute(request)?)?;
        match &result {
            AvatarResult::Success(meta) => info!(size = meta.size, gender = %meta.gender, "metadata fetched"),
            AvatarResult::Failure { error } => error!(diagnostic = %error, "metadata query failed"),
        }
        Ok(result)
    }

    #[instrument(skip_all)]
    pub fn health(&self) -> Result<AvatarResult<ServiceStatus>, ApiError> {
        let request = self.client.build_health();
        let result = self.client.parse_health(self.transport.execute(request)?)?;
        match &result {
            AvatarResult::Success(status) => info!(status = %status.status, "service reachable"),
            AvatarResult::Failure { error } => error!(diagnostic = %error, "health check failed"),
        }
        Ok(result)
    }

    fn persist(&self, result: AvatarResult<BinaryAsset>, operation: &str) -> Result<SaveOutcome, ApiError> {
        match result {
            AvatarResult::Success(asset) => {
                let bytes = asset.len();
                let path = self.sink.persist(asset)?;
                info!(path = %path.display(), bytes, "{operation} stored");
                Ok(SaveOutcome::Saved(path))
            }
            AvatarResult::Failure { error } => {
                error!(diagnostic = %error, "{operation} failed");
                Ok(SaveOutcome::Failed(error))
            }
        }
    }
}
