use crate::errors::DomainError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Raw poster image as received from a form, before it is hosted anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: String, content_type: String, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.bytes.is_empty() {
            return Err(DomainError::ValidationError(
                "Please upload the Poster Image".to_string(),
            ));
        }
        if !self.content_type.starts_with("image/") {
            return Err(DomainError::ValidationError(format!(
                "Unsupported poster type: {}",
                self.content_type
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
}

/// External image hosting. The core only ever stores the returned URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, DomainError>;
    async fn delete(&self, public_id: &str) -> Result<(), DomainError>;
}
