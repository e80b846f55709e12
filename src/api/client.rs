//! Parentzone API HTTP client.

use reqwest::{Client, Response, StatusCode};

use crate::api::types::{GalleryItem, PostsPage};
use crate::config::validate_base_url;
use crate::error::{Error, Result};
use crate::media::ItemId;

/// Default Parentzone API base URL.
pub const API_BASE: &str = "https://api.parentzone.me";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Parentzone API client.
pub struct ParentzoneApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ParentzoneApi {
    /// Create a new API client against `base_url`.
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        validate_base_url(base_url)?;

        let client = Client::builder()
            .user_agent(concat!("parentzone-archiver/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Make an authenticated GET request.
    ///
    /// 401 is turned into [`Error::Authentication`]; every other status is
    /// left for the caller to interpret.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication("API key is wrong or expired".into()));
        }

        Ok(response)
    }

    /// Get one page of posts filtered by type, continuing from `cursor`.
    pub async fn get_posts_page(
        &self,
        type_ids: &[u32],
        cursor: Option<&str>,
    ) -> Result<PostsPage> {
        let mut query: Vec<(&str, String)> = type_ids
            .iter()
            .map(|id| ("typeIDs[]", id.to_string()))
            .collect();
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }

        let response = self.get("/v1/posts", &query).await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(Error::Api(format!(
                "{} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let text = response.text().await?;
        tracing::debug!("Posts response length: {} bytes", text.len());

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse posts: {} - Response: {}",
                e,
                body_preview(&text)
            ))
        })
    }

    /// Get every gallery item. The endpoint is not paginated.
    pub async fn get_gallery(&self) -> Result<Vec<GalleryItem>> {
        let response = self.get("/v1/gallery/", &[]).await?;
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            return Err(Error::Api(format!(
                "Failed to get gallery: HTTP {} - {}",
                status.as_u16(),
                text
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse gallery: {} - Response: {}",
                e,
                body_preview(&text)
            ))
        })
    }

    /// Request the full-size payload of a media item.
    ///
    /// The body is left unread so the caller can stream it.
    pub async fn download_media(&self, id: &ItemId) -> Result<Response> {
        let path = format!("/v1/media/{}/full", id);
        let response = self.get(&path, &[]).await?;

        if response.status() != StatusCode::OK {
            return Err(Error::Download(format!(
                "Failed to download media {}: HTTP {}",
                id,
                response.status()
            )));
        }

        Ok(response)
    }
}

/// First 500 characters of a response body, for error messages.
fn body_preview(text: &str) -> String {
    text.chars().take(500).collect()
}
