//! Mock video catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{CatalogError, SearchCandidate, VideoCatalog, VideoPage};

/// Base URL used by [`MockCatalog::video_url`].
pub const MOCK_BASE_URL: &str = "https://catalog.test";

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogQuery {
    Search { video_name: String },
    GetVideo { url: String },
    FetchPoster { url: String },
}

/// Mock implementation of the VideoCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable search results and detail pages
/// - Track queries for assertions
/// - Simulate failures
#[derive(Debug, Clone)]
pub struct MockCatalog {
    /// Results returned by every search.
    search_results: Arc<RwLock<Vec<SearchCandidate>>>,
    /// Detail pages by URL.
    pages: Arc<RwLock<HashMap<String, VideoPage>>>,
    /// Bytes returned for any poster.
    poster_bytes: Arc<RwLock<Vec<u8>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            search_results: Arc::new(RwLock::new(Vec::new())),
            pages: Arc::new(RwLock::new(HashMap::new())),
            poster_bytes: Arc::new(RwLock::new(Vec::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the results returned by search.
    pub async fn set_search_results(&self, results: Vec<SearchCandidate>) {
        *self.search_results.write().await = results;
    }

    /// Add a detail page, keyed by its URL.
    pub async fn add_page(&self, page: VideoPage) {
        self.pages.write().await.insert(page.url.clone(), page);
    }

    /// Set the bytes served for posters.
    pub async fn set_poster_bytes(&self, bytes: Vec<u8>) {
        *self.poster_bytes.write().await = bytes;
    }

    /// Make the next operation fail.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    async fn record(&self, query: RecordedCatalogQuery) -> Result<(), CatalogError> {
        self.queries.write().await.push(query);
        match self.next_error.write().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VideoCatalog for MockCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, video_name: &str) -> Result<Vec<SearchCandidate>, CatalogError> {
        self.record(RecordedCatalogQuery::Search {
            video_name: video_name.to_string(),
        })
        .await?;
        Ok(self.search_results.read().await.clone())
    }

    async fn get_video(&self, url: &str) -> Result<VideoPage, CatalogError> {
        self.record(RecordedCatalogQuery::GetVideo {
            url: url.to_string(),
        })
        .await?;
        self.pages
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| CatalogError::StatusError {
                status: 404,
                url: url.to_string(),
            })
    }

    fn video_url(&self, source_id: &str) -> String {
        format!("{}/videos/{}", MOCK_BASE_URL, source_id)
    }

    async fn fetch_poster(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.record(RecordedCatalogQuery::FetchPoster {
            url: url.to_string(),
        })
        .await?;
        Ok(self.poster_bytes.read().await.clone())
    }
}
