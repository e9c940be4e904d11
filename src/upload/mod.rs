/**
 * Upload Module
 *
 * Pass-through to the cloud media host: single and multi-file upload,
 * deletion by public id, and signed parameters for client-side uploads.
 * The host is behind the [`MediaHost`] trait so tests run against a
 * stub instead of Cloudinary.
 */

use async_trait::async_trait;
use axum::body::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub mod cloudinary;
pub mod handlers;

pub use cloudinary::Cloudinary;

/// Maximum accepted file size
pub const MAX_FILE_BYTES: usize = 50 * 1024 * 1024;

/// MIME types accepted for upload: images, videos, documents, archives
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    // Images
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
    "image/svg+xml",
    // Videos
    "video/mp4",
    "video/mpeg",
    "video/quicktime",
    "video/x-msvideo",
    "video/webm",
    // Documents
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    // Archives
    "application/zip",
    "application/x-zip-compressed",
    "application/x-rar-compressed",
    "application/x-7z-compressed",
    // Other
    "application/json",
    "text/csv",
];

/// Whether a MIME type is on the upload whitelist
pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime)
}

/// A stored media asset as reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub url: String,
    pub public_id: String,
    #[serde(default)]
    pub format: Option<String>,
    pub resource_type: String,
    pub bytes: u64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Videos only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Per-upload options
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub folder: String,
    /// "image", "video", "raw", or "auto"
    pub resource_type: String,
    pub public_id: Option<String>,
}

/// Signed parameters for a client-side upload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSignature {
    pub signature: String,
    pub timestamp: i64,
    pub folder: String,
    pub resource_type: String,
}

/// Boundary over the media-hosting API
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(
        &self,
        data: Bytes,
        filename: &str,
        content_type: &str,
        options: &UploadOptions,
    ) -> Result<MediaAsset, ApiError>;

    async fn delete(&self, public_id: &str, resource_type: &str) -> Result<(), ApiError>;

    async fn delete_many(
        &self,
        public_ids: &[String],
        resource_type: &str,
    ) -> Result<(), ApiError>;

    /// Sign parameters for a client-side upload (pure, no I/O)
    fn upload_signature(&self, folder: &str, resource_type: &str) -> UploadSignature;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_whitelist() {
        assert!(is_allowed_mime("image/png"));
        assert!(is_allowed_mime("video/mp4"));
        assert!(is_allowed_mime("application/pdf"));
        assert!(!is_allowed_mime("application/x-msdownload"));
        assert!(!is_allowed_mime("text/html"));
    }
}
