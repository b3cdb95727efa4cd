use serde::{Deserialize, Serialize};

use crate::metadata::VideoDetails;

/// One entry of a catalog search result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Rank in the result list (0 = top).
    pub position: usize,
    /// Release year, without parentheses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Studio name as listed on the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Absolute URL of the detail page.
    pub url: String,
}

/// A fetched detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPage {
    pub url: String,
    pub details: VideoDetails,
    /// Declared cover image (`og:image`), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl VideoPage {
    /// Unique id of the page: the last path segment of its URL.
    pub fn uid(&self) -> String {
        url_slug(&self.url)
    }
}

/// Terminal path segment of a URL, ignoring query, fragment and a trailing `/`.
pub fn url_slug(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
