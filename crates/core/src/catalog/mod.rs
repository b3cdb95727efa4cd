//! Remote video catalog integration.
//!
//! This module provides the `VideoCatalog` trait and a client for
//! skatevideosite.com that searches for videos and scrapes detail pages.

mod extract;
mod skatevideosite;
mod types;

pub use extract::{parse_search_results, parse_video_page, PageSelectors};
pub use skatevideosite::{search_term, SkateVideoSiteClient};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    StatusError { status: u16, url: String },

    /// Page did not have the expected structure.
    #[error("Failed to extract page content: {0}")]
    ExtractionError(String),

    /// A URL could not be built or used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Trait for catalog backends.
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Name of this catalog for logging.
    fn name(&self) -> &str;

    /// Search the catalog for a video name. Results keep the catalog's
    /// own ordering.
    async fn search(&self, video_name: &str) -> Result<Vec<SearchCandidate>, CatalogError>;

    /// Fetch and extract a detail page.
    async fn get_video(&self, url: &str) -> Result<VideoPage, CatalogError>;

    /// Detail page URL for a catalog id (as found in `[svs=ID]` tags).
    fn video_url(&self, source_id: &str) -> String;

    /// Download a poster image.
    async fn fetch_poster(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}
