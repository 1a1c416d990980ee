//! Stub of the avatar generation service.
//!
//! Serves the `/avatar/...` endpoints with deterministic placeholder output so
//! clients can be exercised end to end. The markup depends only on `size` and
//! `gender`; PNG payloads are the PNG signature followed by that markup and
//! are not decodable images.

use std::io::{Cursor, Write};
use std::net::SocketAddr;

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, error};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

pub const MAX_BATCH: u32 = 10;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

type Rejection = (StatusCode, String);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvatarData {
    pub svg: String,
    pub size: u32,
    pub gender: String,
}

/// JSON envelope shared by `/avatar/generate` and `/avatar/json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AvatarEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AvatarData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub message: String,
    pub endpoints: Vec<String>,
}

#[derive(Deserialize)]
pub struct GenerateParams {
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_gender")]
    pub gender: String,
}

#[derive(Deserialize)]
pub struct SaveParams {
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_filename")]
    pub filename: String,
}

#[derive(Deserialize)]
pub struct BatchParams {
    #[serde(default = "default_amount")]
    pub amount: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_size() -> u32 {
    280
}

fn default_gender() -> String {
    "0".to_string()
}

fn default_format() -> String {
    "svg".to_string()
}

fn default_filename() -> String {
    "avatar".to_string()
}

fn default_amount() -> u32 {
    5
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Svg,
    Png,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Svg => "svg",
            Format::Png => "png",
        }
    }

    fn mime(self) -> &'static str {
        match self {
            Format::Svg => "image/svg+xml",
            Format::Png => "image/png",
        }
    }
}

fn check_gender(gender: &str) -> Result<(), Rejection> {
    match gender {
        "0" | "1" | "2" => Ok(()),
        _ => Err((StatusCode::BAD_REQUEST, "bad gender".to_string())),
    }
}

fn check_format(format: &str) -> Result<Format, Rejection> {
    match format.to_ascii_lowercase().as_str() {
        "svg" => Ok(Format::Svg),
        "png" => Ok(Format::Png),
        _ => Err((StatusCode::BAD_REQUEST, "bad format".to_string())),
    }
}

/// Deterministic placeholder markup for a `size` x `size` avatar.
pub fn render_svg(size: u32, gender: &str) -> String {
    let fill = match gender {
        "1" => "#4a90d9",
        "2" => "#d94a8c",
        _ => "#8c8c8c",
    };
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 280 280" data-gender="{gender}"><rect width="280" height="280" fill="#f0f0f0"/><circle cx="140" cy="120" r="60" fill="{fill}"/><rect x="70" y="190" width="140" height="90" rx="40" fill="{fill}"/></svg>"##
    )
}

fn render(size: u32, gender: &str, format: Format) -> Vec<u8> {
    let svg = render_svg(size, gender);
    match format {
        Format::Svg => svg.into_bytes(),
        Format::Png => {
            let mut bytes = PNG_SIGNATURE.to_vec();
            bytes.extend_from_slice(svg.as_bytes());
            bytes
        }
    }
}

fn build_archive(amount: u32, size: u32, gender: &str, format: Format) -> zip::result::ZipResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for index in 1..=amount {
        zip.start_file(format!("avatar_{index}.{}", format.extension()), options)?;
        zip.write_all(&render(size, gender, format))?;
    }
    Ok(zip.finish()?.into_inner())
}

fn attachment(mime: &str, filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

pub fn app() -> Router {
    Router::new()
        .route("/avatar/generate", post(generate))
        .route("/avatar/json", get(avatar_json))
        .route("/avatar/save", post(save))
        .route("/avatar/save/batch", post(save_batch))
        .route("/test", get(status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serves the stub on a random local port from a background thread and
/// returns its address. The server lives until the process exits.
pub fn spawn_local() -> Result<SocketAddr, std::io::Error> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    std::thread::spawn(move || {
        let served = runtime.block_on(async {
            let listener = TcpListener::from_std(std_listener)?;
            run(listener).await
        });
        if let Err(e) = served {
            error!(error = %e, "mock server stopped");
        }
    });

    Ok(addr)
}

fn envelope(size: u32, gender: String) -> Json<AvatarEnvelope> {
    Json(AvatarEnvelope {
        success: true,
        data: Some(AvatarData {
            svg: render_svg(size, &gender),
            size,
            gender,
        }),
        error: None,
    })
}

async fn generate(Json(input): Json<GenerateParams>) -> Result<Json<AvatarEnvelope>, Rejection> {
    check_gender(&input.gender)?;
    debug!(size = input.size, gender = %input.gender, "generate");
    Ok(envelope(input.size, input.gender))
}

async fn avatar_json(Query(input): Query<GenerateParams>) -> Result<Json<AvatarEnvelope>, Rejection> {
    check_gender(&input.gender)?;
    debug!(size = input.size, gender = %input.gender, "json");
    Ok(envelope(input.size, input.gender))
}

async fn save(Json(input): Json<SaveParams>) -> Result<Response, Rejection> {
    check_gender(&input.gender)?;
    let format = check_format(&input.format)?;
    debug!(size = input.size, gender = %input.gender, filename = %input.filename, "save");
    let filename = format!("{}.{}", input.filename, format.extension());
    Ok(attachment(
        format.mime(),
        &filename,
        render(input.size, &input.gender, format),
    ))
}

async fn save_batch(Json(input): Json<BatchParams>) -> Result<Response, Rejection> {
    check_gender(&input.gender)?;
    let format = check_format(&input.format)?;
    let amount = input.amount.clamp(1, MAX_BATCH);
    debug!(amount, size = input.size, gender = %input.gender, "save batch");
    let archive = build_archive(amount, input.size, &input.gender, format).map_err(|e| {
        error!(error = %e, "archive build failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let filename = format!("avatars_{}.zip", format.extension());
    Ok(attachment("application/zip", &filename, archive))
}

async fn status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "success".to_string(),
        message: "Avatar API is running".to_string(),
        endpoints: [
            "GET /avatar/json",
            "POST /avatar/generate",
            "POST /avatar/save",
            "POST /avatar/save/batch",
            "GET /test",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
    })
}
