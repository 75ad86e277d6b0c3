// src/services/storage_client.rs
// DOCUMENTATION: Hosted object storage client for event and landmark images
// PURPOSE: Validate uploads, build object paths, store bytes, return public URLs

use crate::errors::SiteError;
use reqwest::Client;
use uuid::Uuid;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Folder inside the bucket an image is stored under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFolder {
    Events,
    Landmarks,
}

impl UploadFolder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "events" => Some(UploadFolder::Events),
            "landmarks" => Some(UploadFolder::Landmarks),
            _ => None,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            UploadFolder::Events => "event-images",
            UploadFolder::Landmarks => "landmark-images",
        }
    }
}

/// Reject non-images and files over the size limit
pub fn validate_image(content_type: Option<&str>, len: usize) -> Result<(), SiteError> {
    let is_image = content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false);
    if !is_image {
        return Err(SiteError::ValidationError(
            "Please select an image file (JPEG, PNG, GIF, WebP)".to_string(),
        ));
    }
    if len == 0 {
        return Err(SiteError::ValidationError("Image file is empty".to_string()));
    }
    if len > MAX_IMAGE_BYTES {
        return Err(SiteError::ValidationError(
            "Image must be less than 5MB".to_string(),
        ));
    }
    Ok(())
}

/// Extension from the original filename, else from the content type
pub fn file_extension(filename: Option<&str>, content_type: &str) -> String {
    let from_name = filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_string());

    let raw = from_name.unwrap_or_else(|| {
        let subtype = content_type
            .split(';')
            .next()
            .and_then(|mime| mime.trim().split_once('/'))
            .map(|(_, sub)| sub.to_string())
            .unwrap_or_default();
        match subtype.as_str() {
            "jpeg" => "jpg".to_string(),
            "svg+xml" => "svg".to_string(),
            other => other.to_string(),
        }
    });

    let ext: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(10)
        .collect::<String>()
        .to_ascii_lowercase();

    if ext.is_empty() {
        "bin".to_string()
    } else {
        ext
    }
}

/// `{prefix}/{millis}-{random}.{ext}`
pub fn object_path(folder: UploadFolder, extension: &str, millis: i64, random: &str) -> String {
    format!("{}/{}-{}.{}", folder.prefix(), millis, random, extension)
}

pub struct StorageClient {
    client: Client,
    base_url: String,
    anon_key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(base_url: String, anon_key: String, bucket: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            bucket,
        }
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    /// Store an image on behalf of the caller and return its public URL
    pub async fn upload(
        &self,
        folder: UploadFolder,
        extension: &str,
        content_type: &str,
        bytes: Vec<u8>,
        user_token: &str,
    ) -> Result<String, SiteError> {
        if self.base_url.is_empty() {
            log::error!("Upload rejected: AUTH_URL not configured");
            return Err(SiteError::StorageError("Storage not configured".to_string()));
        }

        let random = Uuid::new_v4().simple().to_string();
        let path = object_path(
            folder,
            extension,
            chrono::Utc::now().timestamp_millis(),
            &random[..10],
        );
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path);
        let size = bytes.len();

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(user_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                log::error!("Storage request failed: {}", e);
                SiteError::StorageError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Storage error {} for {}: {}", status, path, body);
            return Err(SiteError::StorageError(format!("API error {}", status)));
        }

        log::info!("Uploaded {} bytes to {}/{}", size, self.bucket, path);
        Ok(self.public_url(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_parse() {
        assert_eq!(UploadFolder::parse("events"), Some(UploadFolder::Events));
        assert_eq!(UploadFolder::parse("landmarks"), Some(UploadFolder::Landmarks));
        assert_eq!(UploadFolder::parse("avatars"), None);
    }

    #[test]
    fn test_object_path_layout() {
        assert_eq!(
            object_path(UploadFolder::Events, "png", 1719000000000, "a1b2c3d4e5"),
            "event-images/1719000000000-a1b2c3d4e5.png"
        );
        assert_eq!(
            object_path(UploadFolder::Landmarks, "jpg", 5, "x"),
            "landmark-images/5-x.jpg"
        );
    }

    #[test]
    fn test_extension_sources() {
        assert_eq!(file_extension(Some("Gold Hill.JPG"), "image/jpeg"), "jpg");
        assert_eq!(file_extension(None, "image/jpeg"), "jpg");
        assert_eq!(file_extension(None, "image/webp"), "webp");
        assert_eq!(file_extension(Some("noext"), "image/png"), "png");
        assert_eq!(file_extension(Some("evil.p/h?p"), "image/png"), "php");
    }

    #[test]
    fn test_validate_image() {
        assert!(validate_image(Some("image/png"), 1024).is_ok());
        assert!(validate_image(Some("text/plain"), 1024).is_err());
        assert!(validate_image(None, 1024).is_err());
        assert!(validate_image(Some("image/png"), MAX_IMAGE_BYTES + 1).is_err());
        assert!(validate_image(Some("image/png"), 0).is_err());
    }

    #[test]
    fn test_public_url() {
        let client = StorageClient::new(
            "https://project.example.co/".to_string(),
            "anon".to_string(),
            "events".to_string(),
        );
        assert_eq!(
            client.public_url("event-images/1-a.png"),
            "https://project.example.co/storage/v1/object/public/events/event-images/1-a.png"
        );
    }
}
