use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use chrono::Utc;
use image::imageops::FilterType;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UploadedPhoto {
    /// Relative path, served under /media/files/.
    pub path: String,
    pub thumbnail_path: Option<String>,
    pub width: i32,
    pub height: i32,
    pub size_bytes: usize,
}

pub struct MediaService;

impl MediaService {
    /// Store an uploaded photo under MEDIA_DIR/<year>/<month>/ alongside a
    /// 400px thumbnail, and return the relative paths used as photo_url on
    /// babies and images on listings.
    pub async fn upload_photo(
        media_dir: &str,
        mut multipart: Multipart,
    ) -> anyhow::Result<UploadedPhoto> {
        let mut file_data: Option<(Vec<u8>, String, String)> = None;

        while let Some(field) = multipart.next_field().await? {
            if field.name().unwrap_or("") == "file" {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?.to_vec();
                file_data = Some((bytes, filename, content_type));
            }
        }

        let (bytes, original_filename, content_type) =
            file_data.ok_or_else(|| anyhow::anyhow!("No file field in upload"))?;

        if !content_type.starts_with("image/") {
            anyhow::bail!("Only image uploads are supported");
        }

        let now = Utc::now();
        let year = now.format("%Y").to_string();
        let month = now.format("%m").to_string();
        let dir = PathBuf::from(media_dir).join(&year).join(&month);
        tokio::fs::create_dir_all(&dir).await?;

        let ext = Path::new(&original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg");

        let file_id = Uuid::new_v4();
        let storage_filename = format!("{}.{}", file_id, ext);
        let storage_path_rel = format!("{}/{}/{}", year, month, storage_filename);

        let img = image::load_from_memory(&bytes)?;
        let (width, height) = (img.width() as i32, img.height() as i32);

        tokio::fs::write(dir.join(&storage_filename), &bytes).await?;

        let thumbnail_path = {
            let thumb = img.resize(400, 400, FilterType::Lanczos3);
            let thumb_filename = format!("{}_thumb.jpg", file_id);
            let mut thumb_bytes = Vec::new();
            thumb.write_to(
                &mut std::io::Cursor::new(&mut thumb_bytes),
                image::ImageFormat::Jpeg,
            )?;
            tokio::fs::write(dir.join(&thumb_filename), &thumb_bytes).await?;
            Some(format!("{}/{}/{}", year, month, thumb_filename))
        };

        crate::services::metrics::MEDIA_UPLOADS_COUNTER.inc();
        tracing::info!("Stored photo {} ({} bytes)", storage_path_rel, bytes.len());

        Ok(UploadedPhoto {
            path: storage_path_rel,
            thumbnail_path,
            width,
            height,
            size_bytes: bytes.len(),
        })
    }
}
