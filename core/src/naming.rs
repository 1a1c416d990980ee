//! Default names for persisted assets.
//!
//! Timestamps are Unix milliseconds. Single-avatar stems also carry a short
//! random token so that two defaults generated within the same millisecond
//! still differ.

use chrono::Utc;
use uuid::Uuid;

use crate::types::ImageFormat;

/// `avatar_<millis>_<8 hex chars>`
pub fn default_avatar_filename() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("avatar_{}_{}", Utc::now().timestamp_millis(), &token[..8])
}

/// `avatars_<format>_<millis>.zip`
pub fn batch_archive_name(format: ImageFormat) -> String {
    format!("avatars_{}_{}.zip", format, Utc::now().timestamp_millis())
}

/// `<stem>.<extension>`
pub fn asset_filename(stem: &str, format: ImageFormat) -> String {
    format!("{stem}.{}", format.extension())
}
