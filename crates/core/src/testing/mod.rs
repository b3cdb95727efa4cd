//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use svscraper_core::testing::{fixtures, MockCatalog};
//!
//! let catalog = MockCatalog::new();
//! catalog.set_search_results(vec![fixtures::candidate(0, "2005", "baker", "baker-3")]).await;
//! catalog.add_page(fixtures::video_page("baker-3", "Baker 3", "2005")).await;
//! ```

mod mock_catalog;

pub use mock_catalog::{MockCatalog, RecordedCatalogQuery, MOCK_BASE_URL};

/// Test fixtures and helper functions.
pub mod fixtures {
    use super::MOCK_BASE_URL;
    use crate::catalog::{SearchCandidate, VideoPage};
    use crate::metadata::VideoDetails;

    /// Detail page URL on the mock catalog.
    pub fn video_url(slug: &str) -> String {
        format!("{}/videos/{}", MOCK_BASE_URL, slug)
    }

    /// Create a search candidate pointing at a mock detail page.
    pub fn candidate(position: usize, year: &str, company: &str, slug: &str) -> SearchCandidate {
        SearchCandidate {
            position,
            year: Some(year.to_string()).filter(|y| !y.is_empty()),
            company: Some(company.to_string()).filter(|c| !c.is_empty()),
            url: video_url(slug),
        }
    }

    /// Create a detail page with a plot, a studio and three skaters.
    pub fn video_page(slug: &str, title: &str, year: &str) -> VideoPage {
        VideoPage {
            url: video_url(slug),
            details: VideoDetails {
                title: title.to_string(),
                plot: format!("{} full length.", title),
                studio: "baker".to_string(),
                year: year.to_string(),
                cast: vec![
                    "Andrew Reynolds".to_string(),
                    "Erik Ellington".to_string(),
                    "Bryan Herman".to_string(),
                ],
            },
            poster_url: Some(format!(
                "https://assets.skatevideo.site/covers/{}.jpg",
                slug
            )),
        }
    }
}
