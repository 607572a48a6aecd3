use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::AppState;

const VIDEO_MIME: &str = "video/mp4";

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateVideoResponse {
    pub video_url: String,
}

#[derive(Debug, Serialize)]
pub struct VideoStatus {
    #[serde(rename = "Status")]
    pub status: &'static str,
}

pub async fn create_video_from_url(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> Result<Json<CreateVideoResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    info!("🎬 Video requested for {}", request.url);

    let reference = state.pipeline.run(&request.url).await?;
    Ok(Json(CreateVideoResponse {
        video_url: reference.url,
    }))
}

pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    debug!("Serving video {}", filename);
    let bytes = state.store.load(&filename).await?;
    Ok(([(header::CONTENT_TYPE, VIDEO_MIME)], bytes).into_response())
}

pub async fn download_video(
    State(state): State<Arc<AppState>>,
    Path(video_filename): Path<String>,
) -> Result<Response, ApiError> {
    debug!("Downloading video {}", video_filename);
    let bytes = state.store.load(&video_filename).await?;
    let mut response = ([(header::CONTENT_TYPE, VIDEO_MIME)], bytes).into_response();
    if let Ok(value) = HeaderValue::from_str(&attachment_disposition(&video_filename)) {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}

pub async fn video_status(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<VideoStatus>, ApiError> {
    let status = if state.store.exists(&filename).await? {
        "ready"
    } else {
        "missing"
    };
    Ok(Json(VideoStatus { status }))
}

/// `attachment` disposition with an ASCII fallback name and the exact
/// UTF-8 name as `filename*`.
pub(crate) fn attachment_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, NON_ALPHANUMERIC)
    )
}
