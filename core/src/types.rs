//! Domain types for the avatar API.
//!
//! # Design
//! Wire enums serialize to the exact codes the service expects (`"0"`/`"1"`/`"2"`
//! for gender, `"svg"`/`"png"` for format), so an invalid value cannot be
//! produced by this crate. Ranges such as `size` and `amount` are left to the
//! service to judge.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Avatar style selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "0")]
    Random,
    #[serde(rename = "1")]
    Male,
    #[serde(rename = "2")]
    Female,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Gender::Random => "0",
            Gender::Male => "1",
            Gender::Female => "2",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Output image format for save operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl ImageFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Body of `POST /avatar/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub size: u32,
    pub gender: Gender,
}

/// Body of `POST /avatar/save`. `filename` is the stem; the service and the
/// client both append the format extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub size: u32,
    pub gender: Gender,
    pub format: ImageFormat,
    pub filename: String,
}

/// Body of `POST /avatar/save/batch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSaveRequest {
    pub amount: u32,
    pub size: u32,
    pub gender: Gender,
    pub format: ImageFormat,
}

/// Query parameters of `GET /avatar/json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataQuery {
    pub size: u32,
    pub gender: Gender,
}

/// Outcome of one service call. `Failure` covers both a non-2xx status
/// (diagnostic is the raw body text) and a `success: false` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarResult<T> {
    Success(T),
    Failure { error: String },
}

impl<T> AvatarResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, AvatarResult::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AvatarResult::Success(_) => None,
            AvatarResult::Failure { error } => Some(error),
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            AvatarResult::Success(value) => Some(value),
            AvatarResult::Failure { .. } => None,
        }
    }
}

/// Payload of a successful `generate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAvatar {
    pub size: u32,
    pub gender: Gender,
    pub svg: String,
}

/// Payload of a successful metadata query. The service currently includes
/// the markup as well, but callers of this endpoint only rely on the
/// dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarMetadata {
    pub size: u32,
    pub gender: Gender,
    #[serde(default)]
    pub svg: Option<String>,
}

/// A downloaded image or archive awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAsset {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl BinaryAsset {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Response of the `GET /test` health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_serializes_to_code() {
        assert_eq!(serde_json::to_value(Gender::Random).unwrap(), "0");
        assert_eq!(serde_json::to_value(Gender::Male).unwrap(), "1");
        assert_eq!(serde_json::to_value(Gender::Female).unwrap(), "2");
    }

    #[test]
    fn gender_rejects_unknown_code() {
        let result: Result<Gender, _> = serde_json::from_str(r#""3""#);
        assert!(result.is_err());
    }

    #[test]
    fn format_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ImageFormat::Png).unwrap(), "png");
        assert_eq!(ImageFormat::Svg.to_string(), "svg");
    }

    #[test]
    fn save_request_wire_shape() {
        let req = SaveRequest {
            size: 280,
            gender: Gender::Female,
            format: ImageFormat::Png,
            filename: "female_avatar".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"size": 280, "gender": "2", "format": "png", "filename": "female_avatar"})
        );
    }

    #[test]
    fn metadata_svg_is_optional() {
        let meta: AvatarMetadata = serde_json::from_str(r#"{"size":250,"gender":"0"}"#).unwrap();
        assert_eq!(meta.size, 250);
        assert!(meta.svg.is_none());
    }

    #[test]
    fn result_accessors() {
        let ok: AvatarResult<u32> = AvatarResult::Success(1);
        assert!(ok.is_success());
        assert_eq!(ok.error(), None);
        assert_eq!(ok.success(), Some(1));

        let failed: AvatarResult<u32> = AvatarResult::Failure {
            error: "bad gender".to_string(),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some("bad gender"));
        assert_eq!(failed.success(), None);
    }
}
