/**
 * Upload Handlers
 *
 * HTTP surface under /api/upload, all behind the auth middleware:
 *
 * - POST   /api/upload            single file (multipart)
 * - POST   /api/upload/multiple   several files, uploaded concurrently
 * - GET    /api/upload/signature  signed params for client-side upload
 * - DELETE /api/upload/{publicId} remove one asset
 * - DELETE /api/upload            remove a batch of assets
 *
 * Files are validated against the MIME whitelist and size cap before
 * anything is sent upstream. Multi-upload waits for every file and
 * reports the first failure only after all transfers settled.
 */

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::Json;
use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::server::state::AppState;
use crate::upload::{
    is_allowed_mime, MediaAsset, MediaHost, UploadOptions, UploadSignature, MAX_FILE_BYTES,
};

/// One file lifted out of a multipart body
struct IncomingFile {
    data: Bytes,
    filename: String,
    content_type: String,
}

/// Optional knobs accepted alongside files in the multipart body
#[derive(Default)]
struct UploadFields {
    files: Vec<IncomingFile>,
    folder: Option<String>,
    resource_type: Option<String>,
    public_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignatureParams {
    pub folder: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub resource_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub public_ids: Vec<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// Drain a multipart body into files and option fields
async fn collect_fields(mut multipart: Multipart) -> Result<UploadFields, ApiError> {
    let mut fields = UploadFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" | "files" => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?;
                fields.files.push(IncomingFile {
                    data,
                    filename,
                    content_type,
                });
            }
            "folder" => fields.folder = Some(read_text(field).await?),
            "resourceType" | "resource_type" => {
                fields.resource_type = Some(read_text(field).await?)
            }
            "publicId" | "public_id" => fields.public_id = Some(read_text(field).await?),
            _ => {}
        }
    }

    Ok(fields)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))
}

/// Reject files that are empty, oversized, or off the whitelist
fn validate_file(file: &IncomingFile) -> Result<(), ApiError> {
    if file.data.is_empty() {
        return Err(ApiError::validation("Empty file"));
    }
    if file.data.len() > MAX_FILE_BYTES {
        return Err(ApiError::validation(
            "File too large. Maximum size is 50MB.",
        ));
    }
    if !is_allowed_mime(&file.content_type) {
        return Err(ApiError::validation(format!(
            "File type not allowed: {}",
            file.content_type
        )));
    }
    Ok(())
}

fn options_from(fields: &UploadFields, state: &AppState) -> UploadOptions {
    UploadOptions {
        folder: fields
            .folder
            .clone()
            .unwrap_or_else(|| state.config.media.folder.clone()),
        resource_type: fields
            .resource_type
            .clone()
            .unwrap_or_else(|| "auto".to_string()),
        public_id: fields.public_id.clone(),
    }
}

pub async fn upload_file(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<Json<MediaAsset>, ApiError> {
    let fields = collect_fields(multipart).await?;
    let file = fields
        .files
        .first()
        .ok_or_else(|| ApiError::validation("No file provided"))?;
    validate_file(file)?;

    let options = options_from(&fields, &state);
    let asset = state
        .media
        .upload(
            file.data.clone(),
            &file.filename,
            &file.content_type,
            &options,
        )
        .await?;

    tracing::debug!("file uploaded by {}", user.fullname);
    Ok(Json(asset))
}

pub async fn upload_multiple(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<Json<Vec<MediaAsset>>, ApiError> {
    let fields = collect_fields(multipart).await?;
    if fields.files.is_empty() {
        return Err(ApiError::validation("No files provided"));
    }
    for file in &fields.files {
        validate_file(file)?;
    }

    let options = options_from(&fields, &state);
    let uploads = fields.files.iter().map(|file| {
        state
            .media
            .upload(
                file.data.clone(),
                &file.filename,
                &file.content_type,
                &options,
            )
    });

    // Let every transfer settle before reporting the first failure
    let settled = join_all(uploads).await;
    let mut assets = Vec::with_capacity(settled.len());
    let mut first_error = None;
    for outcome in settled {
        match outcome {
            Ok(asset) => assets.push(asset),
            Err(e) if first_error.is_none() => first_error = Some(e),
            Err(_) => {}
        }
    }
    if let Some(e) = first_error {
        return Err(e);
    }

    tracing::debug!("{} files uploaded by {}", assets.len(), user.fullname);
    Ok(Json(assets))
}

pub async fn get_upload_signature(
    State(state): State<AppState>,
    Query(params): Query<SignatureParams>,
) -> Json<UploadSignature> {
    let folder = params
        .folder
        .unwrap_or_else(|| state.config.media.folder.clone());
    let resource_type = params.resource_type.unwrap_or_else(|| "image".to_string());
    Json(state.media.upload_signature(&folder, &resource_type))
}

pub async fn delete_file(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Value>, ApiError> {
    if public_id.is_empty() {
        return Err(ApiError::validation("Missing public id"));
    }
    let resource_type = params.resource_type.unwrap_or_else(|| "image".to_string());
    state.media.delete(&public_id, &resource_type).await?;
    Ok(Json(json!({ "msg": "Deleted successfully" })))
}

pub async fn delete_files(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.public_ids.is_empty() {
        return Err(ApiError::validation("No public ids provided"));
    }
    let resource_type = request.resource_type.unwrap_or_else(|| "image".to_string());
    state
        .media
        .delete_many(&request.public_ids, &resource_type)
        .await?;
    Ok(Json(json!({ "msg": "Deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, len: usize) -> IncomingFile {
        IncomingFile {
            data: Bytes::from(vec![0u8; len]),
            filename: "sample".to_string(),
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_whitelisted_file() {
        assert!(validate_file(&file("image/png", 128)).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        let err = validate_file(&file("image/png", 0)).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let err = validate_file(&file("image/png", MAX_FILE_BYTES + 1)).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validate_rejects_unlisted_mime() {
        let err = validate_file(&file("application/x-msdownload", 16)).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
