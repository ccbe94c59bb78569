//! Banner upload handling.
//!
//! Uploaded images are written to the configured banner directory under a
//! generated `{millis}-{suffix}.{ext}` name and served statically from
//! `/uploads/event-banners/`. The returned URL is what admins store in
//! `events.banner_url` (they may also paste an external URL directly).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::admin_gate::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Extensions accepted for banner images.
const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Response payload for a stored banner.
#[derive(Debug, Serialize)]
pub struct BannerUpload {
    /// Public URL to store in the event's `banner_url`.
    pub url: String,
    pub file_name: String,
    pub size_bytes: usize,
}

/// POST /api/v1/admin/banners
///
/// Accepts a single multipart `file` part. Admin only.
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<BannerUpload>>)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
        .ok_or_else(|| AppError::BadRequest("Missing file part".into()))?;

    let original_name = field
        .file_name()
        .ok_or_else(|| AppError::BadRequest("File part must have a filename".into()))?
        .to_string();

    let extension = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or_else(|| AppError::BadRequest("Filename has no extension".into()))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image type: .{extension}"
        )));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let file_name = generated_file_name(&extension);

    tokio::fs::create_dir_all(&state.config.banner_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Banner directory error: {e}")))?;

    let path = std::path::Path::new(&state.config.banner_dir).join(&file_name);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Banner write error: {e}")))?;

    tracing::info!(
        file = %file_name,
        size_bytes = bytes.len(),
        user_id = admin.user_id,
        "Banner stored",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BannerUpload {
                url: format!("/uploads/event-banners/{file_name}"),
                file_name,
                size_bytes: bytes.len(),
            },
        }),
    ))
}

/// Collision-resistant stored name: upload time in millis plus a short
/// random suffix.
fn generated_file_name(extension: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, extension)
}
