// src/db/factory.rs
// DOCUMENTATION: Store construction from configuration
// PURPOSE: Pick the content backend once at startup

use crate::config::{init_db_pool, Config, ContentBackend};
use crate::db::{
    MemoryStore, NotionContentStore, PgContentStore, PgProfileStore, SharedContentStore,
    SharedProfileStore,
};
use crate::services::notion_client::NotionClient;
use anyhow::Context;
use std::sync::Arc;

/// Content and profile stores handed to the HTTP layer
#[derive(Clone)]
pub struct Stores {
    pub content: SharedContentStore,
    pub profiles: SharedProfileStore,
}

impl Stores {
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            content: store.clone(),
            profiles: store,
        }
    }
}

pub struct StoreFactory;

impl StoreFactory {
    /// Profiles always live in the relational database; content follows CONTENT_BACKEND
    pub async fn from_config(config: &Config) -> anyhow::Result<Stores> {
        log::info!("Content backend: {}", config.content_backend.as_str());

        match config.content_backend {
            ContentBackend::Memory => Ok(Stores::memory()),
            ContentBackend::Postgres => {
                let pool = init_db_pool(config)
                    .await
                    .context("Failed to connect to database")?;
                Ok(Stores {
                    content: Arc::new(PgContentStore::new(pool.clone())),
                    profiles: Arc::new(PgProfileStore::new(pool)),
                })
            }
            ContentBackend::Notion => {
                let pool = init_db_pool(config)
                    .await
                    .context("Failed to connect to profiles database")?;
                let client = NotionClient::new(
                    config.notion_api_url.clone(),
                    config.notion_token.clone(),
                    config.notion_version.clone(),
                );
                Ok(Stores {
                    content: Arc::new(NotionContentStore::new(
                        client,
                        config.notion_databases.clone(),
                    )),
                    profiles: Arc::new(PgProfileStore::new(pool)),
                })
            }
        }
    }
}
