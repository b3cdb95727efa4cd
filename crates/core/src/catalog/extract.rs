//! HTML extraction for catalog pages.
//!
//! Pure functions over page source, driven by [`SelectorConfig`].

use once_cell::sync::Lazy;
use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::SelectorConfig;
use crate::metadata::VideoDetails;

use super::{CatalogError, SearchCandidate, VideoPage};

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("valid regex"));

/// Parsed form of [`SelectorConfig`].
#[derive(Debug, Clone)]
pub struct PageSelectors {
    results_tab: Selector,
    result_year: Selector,
    result_company: Selector,
    result_link: Selector,
    title: Selector,
    year: Selector,
    studio: Selector,
    plot: Selector,
    cast: Selector,
    poster: Selector,
}

impl PageSelectors {
    pub fn new(config: &SelectorConfig, search_tab: u32) -> Result<Self, CatalogError> {
        Ok(Self {
            results_tab: parse("results_tab", &config.results_tab_for(search_tab))?,
            result_year: parse("result_year", &config.result_year)?,
            result_company: parse("result_company", &config.result_company)?,
            result_link: parse("result_link", &config.result_link)?,
            title: parse("title", &config.title)?,
            year: parse("year", &config.year)?,
            studio: parse("studio", &config.studio)?,
            plot: parse("plot", &config.plot)?,
            cast: parse("cast", &config.cast)?,
            poster: parse("poster", &config.poster)?,
        })
    }
}

fn parse(name: &str, selector: &str) -> Result<Selector, CatalogError> {
    Selector::parse(selector).map_err(|e| {
        CatalogError::ExtractionError(format!("invalid {} selector '{}': {}", name, selector, e))
    })
}

/// Extract search results from a search page.
///
/// Each child element of the results container is one result. Results
/// without a detail link are skipped; `position` counts only the kept results.
pub fn parse_search_results(
    html: &str,
    base_url: &str,
    selectors: &PageSelectors,
) -> Result<Vec<SearchCandidate>, CatalogError> {
    let document = Html::parse_document(html);
    let container = document
        .select(&selectors.results_tab)
        .next()
        .ok_or_else(|| CatalogError::ExtractionError("search results tab not found".to_string()))?;

    let base = base_url.trim_end_matches('/');
    let mut candidates = Vec::new();

    for (child, result) in container.child_elements().enumerate() {
        let Some(href) = result
            .select(&selectors.result_link)
            .next()
            .and_then(|link| link.value().attr("href"))
        else {
            debug!(child, "Skipping search result without a detail link");
            continue;
        };

        let year = first_text(result, &selectors.result_year)
            .and_then(|label| YEAR_RE.find(&label).map(|m| m.as_str().to_string()));
        let company = first_text(result, &selectors.result_company).filter(|c| !c.is_empty());

        candidates.push(SearchCandidate {
            position: candidates.len(),
            year,
            company,
            url: join_url(base, href),
        });
    }

    debug!(count = candidates.len(), "Parsed search results");
    Ok(candidates)
}

/// Extract the fields of a video detail page.
///
/// Missing fields come back empty.
pub fn parse_video_page(html: &str, url: &str, selectors: &PageSelectors) -> VideoPage {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let field = |selector: &Selector| first_text(root, selector).unwrap_or_default();

    let cast = root
        .select(&selectors.cast)
        .flat_map(|span| direct_text(span).map(str::to_string).collect::<Vec<_>>())
        .collect();

    let poster_url = root
        .select(&selectors.poster)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string);

    let details = VideoDetails {
        title: field(&selectors.title),
        plot: field(&selectors.plot),
        studio: field(&selectors.studio),
        year: field(&selectors.year).replace(['(', ')'], ""),
        cast,
    };

    debug!(
        url,
        title = %details.title,
        year = %details.year,
        cast = details.cast.len(),
        "Parsed video page"
    );

    VideoPage {
        url: url.to_string(),
        details,
        poster_url,
    }
}

/// Text nodes that are direct children of an element.
fn direct_text<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
}

/// First direct text node of the first match, trimmed.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = scope.select(selector).next()?;
    let text = direct_text(element).next().unwrap_or_default();
    Some(text.trim().to_string())
}

fn join_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}
