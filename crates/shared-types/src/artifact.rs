use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An encoded raster image (photo or signature) carried as a data URL,
/// e.g. `data:image/png;base64,iVBOR...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageArtifact(String);

/// Raw bytes of an artifact together with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

impl ImageArtifact {
    /// Encode raw image bytes as a data URL.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    /// Wrap an existing data URL after checking it decodes.
    pub fn from_data_url(data_url: impl Into<String>) -> Result<Self, AppError> {
        let artifact = Self(data_url.into());
        artifact.decode()?;
        Ok(artifact)
    }

    pub fn data_url(&self) -> &str {
        &self.0
    }

    /// Split the data URL into MIME type and bytes.
    pub fn decode(&self) -> Result<DecodedImage, AppError> {
        let rest = self
            .0
            .strip_prefix("data:")
            .ok_or_else(|| AppError::bad_request("Image is not a data URL"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AppError::bad_request("Image data URL has no payload"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| AppError::bad_request("Image data URL is not base64 encoded"))?;
        if !mime.starts_with("image/") {
            return Err(AppError::bad_request(format!("Unsupported image type: {}", mime)));
        }
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| AppError::bad_request(format!("Image data is corrupt: {}", e)))?;
        Ok(DecodedImage {
            mime: mime.to_string(),
            bytes,
        })
    }
}

/// Decode an image stored by the backend, either as a data URL or as bare base64.
pub fn decode_stored_image(stored: &str) -> Result<DecodedImage, AppError> {
    if stored.starts_with("data:") {
        return ImageArtifact(stored.to_string()).decode();
    }
    let bytes = STANDARD
        .decode(stored.trim())
        .map_err(|e| AppError::bad_request(format!("Stored image is corrupt: {}", e)))?;
    Ok(DecodedImage {
        mime: "image/png".to_string(),
        bytes,
    })
}
