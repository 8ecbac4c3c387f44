use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde_json::{json, Value};
use tokio::io::AsyncReadExt;

use crate::{models::auth::AuthenticatedUser, services::media::MediaService, AppState};

pub async fn upload_photo(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    MediaService::upload_photo(&state.config.media_dir, multipart)
        .await
        .map(|photo| (StatusCode::CREATED, Json(serde_json::to_value(photo).unwrap())))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// Serve a stored photo with HTTP range support.
pub async fn serve_media(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let file_path = std::path::PathBuf::from(&state.config.media_dir).join(&path);

    // Security: ensure the path doesn't escape the media directory
    let canonical_media = std::fs::canonicalize(&state.config.media_dir)
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let canonical_file = match std::fs::canonicalize(&file_path) {
        Ok(p) => p,
        Err(_) => return Err(StatusCode::NOT_FOUND),
    };
    if !canonical_file.starts_with(&canonical_media) {
        return Err(StatusCode::FORBIDDEN);
    }

    let metadata = tokio::fs::metadata(&file_path)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let file_size = metadata.len();

    let content_type = mime_guess::from_path(&file_path)
        .first_raw()
        .unwrap_or("application/octet-stream");

    // Handle Range request
    if let Some(range_header) = headers.get(header::RANGE) {
        let range_str = range_header.to_str().map_err(|_| StatusCode::BAD_REQUEST)?;
        if let Some((start, end)) = parse_range(range_str, file_size) {
            let length = end - start + 1;

            let mut file = tokio::fs::File::open(&file_path)
                .await
                .map_err(|_| StatusCode::NOT_FOUND)?;

            use tokio::io::AsyncSeekExt;
            file.seek(std::io::SeekFrom::Start(start))
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

            let mut buf = vec![0u8; length as usize];
            file.read_exact(&mut buf)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

            let builder = Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, length.to_string())
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, file_size),
                )
                .header(header::ACCEPT_RANGES, "bytes");

            return Ok(builder.body(Body::from(buf)).unwrap());
        }
    }

    // Full file
    let file_bytes = tokio::fs::read(&file_path)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, file_size.to_string())
        .header(header::ACCEPT_RANGES, "bytes");

    Ok(builder.body(Body::from(file_bytes)).unwrap())
}

fn parse_range(range: &str, file_size: u64) -> Option<(u64, u64)> {
    let range = range.strip_prefix("bytes=")?;
    let mut parts = range.split('-');
    let start: u64 = parts.next()?.parse().ok()?;
    let end: u64 = parts
        .next()
        .and_then(|e| e.parse().ok())
        .unwrap_or(file_size - 1);
    if start > end || end >= file_size {
        return None;
    }
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("bytes=0-499", 1000), Some((0, 499)));
        assert_eq!(parse_range("bytes=500-", 1000), Some((500, 999)));
        assert_eq!(parse_range("bytes=900-1100", 1000), None);
        assert_eq!(parse_range("pages=0-1", 1000), None);
    }
}
