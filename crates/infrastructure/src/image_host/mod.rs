use async_trait::async_trait;
use domain::{DomainError, ImageHost, ImageUpload, UploadedImage};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error};

pub const DEFAULT_CLOUDINARY_API: &str = "https://api.cloudinary.com/v1_1";

/// Posters are scaled to the card size used by the listings.
const POSTER_TRANSFORMATION: &str = "c_scale,h_752,w_1000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Signed uploads and deletions against a Cloudinary-compatible API.
pub struct CloudinaryImageHost {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

impl CloudinaryImageHost {
    pub fn new(config: CloudinaryConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::UpstreamFailure(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.cloud_name,
            action
        )
    }

    fn signed_params(&self, mut params: BTreeMap<&'static str, String>) -> BTreeMap<&'static str, String> {
        params.insert("timestamp", chrono::Utc::now().timestamp().to_string());
        let signature = sign(&params, &self.config.api_secret);
        params.insert("signature", signature);
        params.insert("api_key", self.config.api_key.clone());
        params
    }
}

/// Cloudinary request signature: sorted `key=value` pairs joined by `&`,
/// followed by the secret, SHA-1 hex encoded.
pub fn sign(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let joined = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn upstream(context: &str, e: impl std::fmt::Display) -> DomainError {
    error!(error = %e, "{}", context);
    DomainError::UpstreamFailure(format!("{}: {}", context, e))
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, DomainError> {
        let params = self.signed_params(BTreeMap::from([
            ("overwrite", "true".to_string()),
            ("transformation", POSTER_TRANSFORMATION.to_string()),
            ("unique_filename", "false".to_string()),
            ("use_filename", "true".to_string()),
        ]));

        let file = Part::bytes(image.bytes)
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| upstream("Invalid poster content type", e))?;
        let form = params
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value))
            .part("file", file);

        debug!(file_name = %image.file_name, "Uploading poster");
        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| upstream("Poster upload request failed", e))?;

        if !response.status().is_success() {
            return Err(upstream("Poster upload rejected", response.status()));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| upstream("Unreadable upload response", e))?;

        Ok(UploadedImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        let params = self.signed_params(BTreeMap::from([("public_id", public_id.to_string())]));

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| upstream("Poster delete request failed", e))?;

        if !response.status().is_success() {
            return Err(upstream("Poster delete rejected", response.status()));
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| upstream("Unreadable delete response", e))?;

        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(upstream("Poster delete failed", other)),
        }
    }
}

/// Stand-in used when no image hosting credentials are configured.
pub struct DisabledImageHost;

#[async_trait]
impl ImageHost for DisabledImageHost {
    async fn upload(&self, _image: ImageUpload) -> Result<UploadedImage, DomainError> {
        Err(DomainError::UpstreamFailure(
            "image hosting is not configured".to_string(),
        ))
    }

    async fn delete(&self, _public_id: &str) -> Result<(), DomainError> {
        Ok(())
    }
}
