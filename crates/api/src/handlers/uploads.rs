//! File uploads turned into inline data URLs, plus the helpers the project
//! and profile handlers share for incoming images.

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::Json;
use folio_core::compression::{compress_image, CompressionOptions};
use folio_core::encoding::{check_image_upload, encode_pdf, DataUrl};
use folio_core::error::CoreError;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// The stored `data:` URL.
    pub url: String,
}

/// One file read out of a multipart body.
#[derive(Debug)]
pub struct UploadedFile {
    pub content_type: String,
    pub bytes: Bytes,
}

/// Read the `file` field of a multipart body. Other fields are skipped.
pub async fn read_file_field(mut multipart: Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok(UploadedFile {
            content_type,
            bytes,
        });
    }
    Err(CoreError::Validation("No file provided".into()).into())
}

/// Decode an image sent as a data URL and apply the upload gates.
pub fn decode_image_data_url(value: &str) -> AppResult<Vec<u8>> {
    let url = DataUrl::parse(value)?;
    check_image_upload(&url.data, &url.mime)?;
    Ok(url.data)
}

/// Recompress images on the blocking pool; decoding and JPEG encoding are
/// CPU bound.
pub async fn compress_images(images: Vec<Vec<u8>>) -> AppResult<Vec<String>> {
    if images.is_empty() {
        return Ok(Vec::new());
    }
    let count = images.len();
    let compressed = tokio::task::spawn_blocking(move || {
        let options = CompressionOptions::default();
        images
            .iter()
            .map(|bytes| compress_image(bytes, &options))
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Image compression task failed: {e}")))??;

    tracing::debug!(
        count,
        total_len = compressed.iter().map(String::len).sum::<usize>(),
        "Images compressed"
    );
    Ok(compressed)
}

/// POST /api/v1/admin/uploads/image
///
/// Accepts a multipart `file`, returns it recompressed as a JPEG data URL.
pub async fn upload_image(
    RequireAdmin(_admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<UploadResponse>>> {
    let file = read_file_field(multipart).await?;
    check_image_upload(&file.bytes, &file.content_type)?;

    let url = compress_images(vec![file.bytes.to_vec()])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("Compression returned no image".into()))?;

    Ok(Json(DataResponse::new(UploadResponse { url })))
}

/// POST /api/v1/admin/uploads/pdf
///
/// Accepts a multipart PDF `file`, returns it as a data URL.
pub async fn upload_pdf(
    RequireAdmin(_admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<UploadResponse>>> {
    let file = read_file_field(multipart).await?;
    let url = encode_pdf(&file.bytes, &file.content_type)?;
    tracing::info!(bytes = file.bytes.len(), "PDF uploaded");
    Ok(Json(DataResponse::new(UploadResponse { url })))
}
