// src/services/notion_client.rs
// DOCUMENTATION: Document CMS REST client
// PURPOSE: Search, retrieve, create and update pages

use crate::errors::SiteError;
use crate::services::notion_mapper::NotionPage;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

/// Results per search request (CMS maximum)
const PAGE_SIZE: u32 = 100;

/// Upper bound on search pagination
const MAX_SEARCH_REQUESTS: usize = 20;

/// CMS API client
/// DOCUMENTATION: Holds the integration token and API version header
pub struct NotionClient {
    client: Client,
    base_url: String,
    token: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

impl NotionClient {
    pub fn new(base_url: String, token: String, version: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
            version,
        }
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.version)
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response, SiteError> {
        self.request(builder).send().await.map_err(|e| {
            log::error!("CMS request failed ({}): {}", what, e);
            SiteError::CmsError(format!("Request failed: {}", e))
        })
    }

    async fn error_for(response: Response, what: &str) -> SiteError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::error!("CMS error {} ({}): {}", status, what, body);
        SiteError::CmsError(format!("API error {}: {}", status, body))
    }

    async fn parse_page(response: Response, what: &str) -> Result<NotionPage, SiteError> {
        response.json::<NotionPage>().await.map_err(|e| {
            log::error!("Failed to parse CMS page ({}): {}", what, e);
            SiteError::CmsError(format!("Parse error: {}", e))
        })
    }

    /// Every page visible to the integration
    /// DOCUMENTATION: Follows next_cursor; items that are not valid pages are skipped
    pub async fn search_pages(&self) -> Result<Vec<NotionPage>, SiteError> {
        let url = format!("{}/search", self.base_url);
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_SEARCH_REQUESTS {
            let mut body = json!({
                "filter": { "property": "object", "value": "page" },
                "page_size": PAGE_SIZE,
            });
            if let Some(c) = &cursor {
                body["start_cursor"] = json!(c);
            }

            let response = self.send(self.client.post(&url).json(&body), "search").await?;
            if !response.status().is_success() {
                return Err(Self::error_for(response, "search").await);
            }

            let batch: SearchResponse = response.json().await.map_err(|e| {
                log::error!("Failed to parse CMS search response: {}", e);
                SiteError::CmsError(format!("Parse error: {}", e))
            })?;

            for item in batch.results {
                match serde_json::from_value::<NotionPage>(item) {
                    Ok(page) => pages.push(page),
                    Err(e) => log::warn!("Skipping unreadable CMS search result: {}", e),
                }
            }

            match (batch.has_more, batch.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        log::debug!("CMS search returned {} pages", pages.len());
        Ok(pages)
    }

    /// Single page by id; Ok(None) when the CMS reports it missing
    pub async fn retrieve_page(&self, id: Uuid) -> Result<Option<NotionPage>, SiteError> {
        let url = format!("{}/pages/{}", self.base_url, id);
        let response = self.send(self.client.get(&url), "retrieve").await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                log::warn!("CMS page not found: {}", id);
                Ok(None)
            }
            // Malformed ids come back as validation errors
            StatusCode::BAD_REQUEST => {
                log::warn!("CMS rejected page id {}", id);
                Ok(None)
            }
            s if s.is_success() => Ok(Some(Self::parse_page(response, "retrieve").await?)),
            _ => Err(Self::error_for(response, "retrieve").await),
        }
    }

    pub async fn create_page(
        &self,
        database_id: &str,
        properties: Value,
    ) -> Result<NotionPage, SiteError> {
        let url = format!("{}/pages", self.base_url);
        let body = json!({
            "parent": { "database_id": database_id },
            "properties": properties,
        });

        let response = self.send(self.client.post(&url).json(&body), "create").await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, "create").await);
        }

        let page = Self::parse_page(response, "create").await?;
        log::info!("Created CMS page {}", page.id);
        Ok(page)
    }

    /// PATCH a page; `body` carries `properties` and/or `archived`
    pub async fn update_page(&self, id: Uuid, body: Value) -> Result<NotionPage, SiteError> {
        let url = format!("{}/pages/{}", self.base_url, id);
        let response = self.send(self.client.patch(&url).json(&body), "update").await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SiteError::NotFound(format!("Page {}", id)));
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response, "update").await);
        }

        Self::parse_page(response, "update").await
    }

    pub async fn archive_page(&self, id: Uuid) -> Result<(), SiteError> {
        self.update_page(id, json!({ "archived": true })).await?;
        log::info!("Archived CMS page {}", id);
        Ok(())
    }
}
