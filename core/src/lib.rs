//! Synchronous client core for the avatar generation service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). [`AvatarService`] composes a
//! host-provided [`Transport`] and [`AssetSink`] into the one-call operations
//! `generate`, `save_single`, `save_batch` and `fetch_metadata`.
//!
//! # Design
//! - `AvatarClient` is stateless; it holds only the normalized base URL.
//! - Service-side failures are values (`AvatarResult::Failure`,
//!   `SaveOutcome::Failed`); contract violations are `ApiError`s.
//! - Display is a capability ([`Presenter`]) chosen by the host.
//! - The `ureq` feature (on by default) provides a blocking [`Transport`].
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod naming;
pub mod presenter;
pub mod service;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;

pub use client::AvatarClient;
pub use config::{AvatarRequestParams, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, PresentError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use presenter::{NoopPresenter, Presenter, SurfaceRegistry};
pub use service::{AssetSink, AvatarService, DirectorySink, SaveOutcome, Transport};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    AvatarMetadata, AvatarResult, BatchSaveRequest, BinaryAsset, Gender, GenerateRequest, GeneratedAvatar,
    ImageFormat, MetadataQuery, SaveRequest, ServiceStatus,
};
