/**
 * Cloudinary Client
 *
 * Talks to the Cloudinary REST API:
 *
 * - POST /v1_1/{cloud}/{resource_type}/upload  (multipart, signed)
 * - POST /v1_1/{cloud}/{resource_type}/destroy (signed)
 * - DELETE /v1_1/{cloud}/resources/{resource_type}/upload (basic auth)
 *
 * Requests are signed per Cloudinary's scheme: parameters sorted by
 * key, joined as a query string, the API secret appended, and the
 * whole thing hashed with SHA-256.
 */

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::ApiError;
use crate::server::config::MediaConfig;
use crate::upload::{MediaAsset, MediaHost, UploadOptions, UploadSignature};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

pub struct Cloudinary {
    http: reqwest::Client,
    config: MediaConfig,
}

/// Upload/destroy response body, as Cloudinary returns it
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    format: Option<String>,
    resource_type: String,
    bytes: u64,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl Cloudinary {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Sign request parameters with the account's API secret
    ///
    /// Produces a SHA-256 signature; the Cloudinary account must have
    /// SHA-256 signature mode enabled (the account default is SHA-1).
    fn sign(&self, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let joined = sorted
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let digest = Sha256::digest(format!("{}{}", joined, self.config.api_secret).as_bytes());
        hex::encode(digest)
    }

    fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!(
            "{API_BASE}/{}/{}/{}",
            self.config.cloud_name, resource_type, action
        )
    }
}

#[async_trait]
impl MediaHost for Cloudinary {
    async fn upload(
        &self,
        data: Bytes,
        filename: &str,
        content_type: &str,
        options: &UploadOptions,
    ) -> Result<MediaAsset, ApiError> {
        let timestamp = Utc::now().timestamp();

        let mut signed_params = vec![
            ("folder", options.folder.clone()),
            ("timestamp", timestamp.to_string()),
        ];
        if let Some(public_id) = &options.public_id {
            signed_params.push(("public_id", public_id.clone()));
        }
        let signature = self.sign(&signed_params);

        let file_part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| ApiError::upstream(format!("Invalid content type: {e}")))?;

        let mut form = reqwest::multipart::Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", options.folder.clone())
            .text("signature", signature)
            .part("file", file_part);
        if let Some(public_id) = &options.public_id {
            form = form.text("public_id", public_id.clone());
        }

        let response = self
            .http
            .post(self.endpoint(&options.resource_type, "upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::upstream(format!("Upload failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "cloudinary upload rejected: {}", body);
            return Err(ApiError::upstream("Upload failed"));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::upstream(format!("Malformed upload response: {e}")))?;

        tracing::info!("uploaded {} ({} bytes)", uploaded.public_id, uploaded.bytes);

        Ok(MediaAsset {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
            format: uploaded.format,
            resource_type: uploaded.resource_type,
            bytes: uploaded.bytes,
            width: uploaded.width,
            height: uploaded.height,
            duration: uploaded.duration,
        })
    }

    async fn delete(&self, public_id: &str, resource_type: &str) -> Result<(), ApiError> {
        let timestamp = Utc::now().timestamp();
        let signed_params = vec![
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp.to_string()),
        ];
        let signature = self.sign(&signed_params);

        let response = self
            .http
            .post(self.endpoint(resource_type, "destroy"))
            .form(&[
                ("public_id", public_id.to_string()),
                ("timestamp", timestamp.to_string()),
                ("api_key", self.config.api_key.clone()),
                ("signature", signature),
            ])
            .send()
            .await
            .map_err(|e| ApiError::upstream(format!("Delete failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, "cloudinary destroy rejected");
            return Err(ApiError::upstream("Delete failed"));
        }

        let outcome: DestroyResponse = response
            .json()
            .await
            .map_err(|e| ApiError::upstream(format!("Malformed delete response: {e}")))?;

        if outcome.result != "ok" {
            return Err(ApiError::not_found(format!(
                "File not found: {public_id}"
            )));
        }

        Ok(())
    }

    async fn delete_many(
        &self,
        public_ids: &[String],
        resource_type: &str,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{API_BASE}/{}/resources/{}/upload",
            self.config.cloud_name, resource_type
        );

        let params: Vec<(&str, &str)> = public_ids
            .iter()
            .map(|id| ("public_ids[]", id.as_str()))
            .collect();

        let response = self
            .http
            .delete(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&params)
            .send()
            .await
            .map_err(|e| ApiError::upstream(format!("Bulk delete failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, "cloudinary bulk delete rejected");
            return Err(ApiError::upstream("Bulk delete failed"));
        }

        tracing::info!("deleted {} assets", public_ids.len());
        Ok(())
    }

    fn upload_signature(&self, folder: &str, resource_type: &str) -> UploadSignature {
        let timestamp = Utc::now().timestamp();
        let signature = self.sign(&[
            ("folder", folder.to_string()),
            ("timestamp", timestamp.to_string()),
        ]);

        UploadSignature {
            signature,
            timestamp,
            folder: folder.to_string(),
            resource_type: resource_type.to_string(),
        }
    }
}
