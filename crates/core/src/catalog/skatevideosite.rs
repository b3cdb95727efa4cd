//! skatevideosite.com client.
//!
//! The site has no API: search and detail pages are fetched as HTML and
//! scraped with the selectors from [`CatalogConfig`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::CatalogConfig;

use super::extract::{parse_search_results, parse_video_page, PageSelectors};
use super::{CatalogError, SearchCandidate, VideoCatalog, VideoPage};

/// Search term for a video name: spaces become `+`, then the whole term is
/// percent-encoded.
pub fn search_term(video_name: &str) -> String {
    urlencoding::encode(&video_name.replace(' ', "+")).into_owned()
}

/// skatevideosite.com catalog client.
pub struct SkateVideoSiteClient {
    client: Client,
    base_url: String,
    search_tab: u32,
    detail_path: String,
    selectors: PageSelectors,
}

impl SkateVideoSiteClient {
    /// Create a new client.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs as u64));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_tab: config.search_tab,
            detail_path: config.detail_path.clone(),
            selectors: PageSelectors::new(&config.selectors, config.search_tab)?,
        })
    }

    /// Build the search page URL for a video name.
    pub fn search_url(&self, video_name: &str) -> String {
        format!(
            "{}/search?q={}&tab={}",
            self.base_url,
            search_term(video_name),
            self.search_tab
        )
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, CatalogError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::StatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl VideoCatalog for SkateVideoSiteClient {
    fn name(&self) -> &str {
        "skatevideosite"
    }

    async fn search(&self, video_name: &str) -> Result<Vec<SearchCandidate>, CatalogError> {
        let url = self.search_url(video_name);
        debug!("skatevideosite search: query='{}', url={}", video_name, url);

        let html = self.get(&url).await?.text().await?;
        parse_search_results(&html, &self.base_url, &self.selectors)
    }

    async fn get_video(&self, url: &str) -> Result<VideoPage, CatalogError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CatalogError::InvalidUrl(url.to_string()));
        }

        debug!("skatevideosite get video: url={}", url);
        let html = self.get(url).await?.text().await?;
        Ok(parse_video_page(&html, url, &self.selectors))
    }

    fn video_url(&self, source_id: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            self.detail_path,
            urlencoding::encode(source_id)
        )
    }

    async fn fetch_poster(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        debug!("skatevideosite fetch poster: url={}", url);
        let bytes = self.get(url).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
