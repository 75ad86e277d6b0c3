// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod auth_client;
pub mod event_service;
pub mod landmark_service;
pub mod moderation;
pub mod notion_client;
pub mod notion_mapper;
pub mod place_service;
pub mod rate_limit;
pub mod sitemap;
pub mod storage_client;
pub mod submission;
pub mod turnstile;

pub use auth_client::{HostedAuthClient, IdentityProvider, SharedIdentityProvider};
pub use event_service::EventService;
pub use landmark_service::LandmarkService;
pub use moderation::{DashboardStats, ModerationAction};
pub use place_service::PlaceService;
pub use rate_limit::SubmissionLimiter;
pub use sitemap::SitemapService;
pub use storage_client::{StorageClient, UploadFolder};
pub use submission::SubmissionService;
pub use turnstile::TurnstileClient;
