//! Client configuration and per-call parameter defaults.

use crate::naming;
use crate::types::{BatchSaveRequest, Gender, GenerateRequest, ImageFormat, MetadataQuery, SaveRequest};

/// Public endpoint of the hosted avatar service.
pub const DEFAULT_BASE_URL: &str = "https://api.binrc.com";

pub const DEFAULT_SIZE: u32 = 280;

pub const DEFAULT_BATCH_AMOUNT: u32 = 5;

/// Where the client sends its requests. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Strips a single trailing `/` so paths can be appended verbatim.
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.strip_suffix('/').unwrap_or(base_url);
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Parameters shared by every operation, with the service's documented
/// defaults. Each operation reads only the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarRequestParams {
    pub size: u32,
    pub gender: Gender,
    pub format: ImageFormat,
    /// File stem for single saves. `None` generates `avatar_<timestamp>_<token>`.
    pub filename: Option<String>,
    pub amount: u32,
}

impl Default for AvatarRequestParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            gender: Gender::Random,
            format: ImageFormat::Svg,
            filename: None,
            amount: DEFAULT_BATCH_AMOUNT,
        }
    }
}

impl AvatarRequestParams {
    pub fn generate_request(&self) -> GenerateRequest {
        GenerateRequest {
            size: self.size,
            gender: self.gender,
        }
    }

    /// Resolves the filename, generating a fresh default when none was given.
    pub fn save_request(&self) -> SaveRequest {
        SaveRequest {
            size: self.size,
            gender: self.gender,
            format: self.format,
            filename: self
                .filename
                .clone()
                .unwrap_or_else(naming::default_avatar_filename),
        }
    }

    pub fn batch_request(&self) -> BatchSaveRequest {
        BatchSaveRequest {
            amount: self.amount,
            size: self.size,
            gender: self.gender,
            format: self.format,
        }
    }

    pub fn metadata_query(&self) -> MetadataQuery {
        MetadataQuery {
            size: self.size,
            gender: self.gender,
        }
    }
}
