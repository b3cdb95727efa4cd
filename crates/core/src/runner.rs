//! Single-video scrape run.
//!
//! Parses the filename, looks the video up in the catalog, and writes the
//! `.nfo` (plus poster) next to the video file. When the catalog has no
//! match, the document is built from the filename alone.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogError, VideoCatalog};
use crate::config::Config;
use crate::filename::VideoPath;
use crate::matcher::select_best;
use crate::metadata::{render_nfo, write_nfo, MetadataDocument, NfoError};
use crate::poster::save_poster;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Nfo error: {0}")]
    Nfo(#[from] NfoError),
}

/// Where the document content came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentSource {
    /// Scraped from a catalog detail page.
    Remote { url: String },
    /// Built from the filename only.
    Filename,
    /// An existing `.nfo` was kept; nothing was scraped.
    Existing,
}

/// A document built for a video, not yet written anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub video: PathBuf,
    pub source: DocumentSource,
    pub document: MetadataDocument,
    /// Declared cover image of the detail page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl RenderedDocument {
    pub fn to_nfo(&self) -> Result<String, NfoError> {
        render_nfo(&self.document)
    }
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutcome {
    pub nfo_path: PathBuf,
    /// False when an existing `.nfo` was kept.
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<PathBuf>,
    pub source: DocumentSource,
    pub document: MetadataDocument,
}

/// Runs one scrape per call against a catalog.
pub struct ScrapeRunner<C: VideoCatalog> {
    catalog: C,
    config: Config,
}

impl<C: VideoCatalog> ScrapeRunner<C> {
    pub fn new(catalog: C, config: Config) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Find the detail page to scrape, if any.
    async fn locate(&self, video: &VideoPath) -> Result<Option<String>, CatalogError> {
        if self.config.catalog.use_source_id {
            if let Some(source_id) = &video.source_id {
                let url = self.catalog.video_url(source_id);
                info!(source_id = %source_id, url = %url, "Using source id from filename");
                return Ok(Some(url));
            }
        }

        if video.video_name.is_empty() {
            info!("Video name is empty, skipping catalog search");
            return Ok(None);
        }

        let candidates = self.catalog.search(&video.video_name).await?;
        debug!(
            catalog = self.catalog.name(),
            count = candidates.len(),
            "Search returned candidates"
        );
        Ok(select_best(video, &candidates))
    }

    /// Build the document for a video without touching the filesystem.
    pub async fn render(&self, video_path: &Path) -> Result<RenderedDocument, ScrapeError> {
        let video = VideoPath::parse(video_path);
        info!(
            path = %video.path.display(),
            company = ?video.company,
            year = ?video.year,
            video_name = %video.video_name,
            source_id = ?video.source_id,
            "Searching data for video file"
        );

        match self.locate(&video).await? {
            Some(url) => {
                info!(url = %url, "Scraping from catalog");
                let page = self.catalog.get_video(&url).await?;
                let uid = page.uid();
                Ok(RenderedDocument {
                    video: video.path,
                    source: DocumentSource::Remote { url },
                    document: MetadataDocument::from_remote(page.details, uid),
                    poster_url: page.poster_url,
                })
            }
            None => {
                info!("Could not find any match, using file name to create the nfo");
                Ok(RenderedDocument {
                    document: video.fallback_document(),
                    video: video.path,
                    source: DocumentSource::Filename,
                    poster_url: None,
                })
            }
        }
    }

    /// Whether an existing `.nfo` must be kept as is.
    async fn keep_existing(&self, nfo_path: &Path) -> bool {
        if self.config.output.overwrite {
            return false;
        }

        match tokio::fs::try_exists(nfo_path).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(
                    path = %nfo_path.display(),
                    error = %e,
                    "Could not check for an existing nfo, treating it as absent"
                );
                false
            }
        }
    }

    /// Build the document, write the `.nfo` and download the poster.
    ///
    /// With `overwrite` disabled, an existing `.nfo` short-circuits the run
    /// before any catalog request.
    pub async fn run(&self, video_path: &Path) -> Result<ScrapeOutcome, ScrapeError> {
        let video = VideoPath::parse(video_path);
        let nfo_path = video.nfo_path();

        if self.keep_existing(&nfo_path).await {
            info!(path = %nfo_path.display(), "Nfo exists, leaving it untouched");
            return Ok(ScrapeOutcome {
                nfo_path,
                written: false,
                poster_path: None,
                source: DocumentSource::Existing,
                document: video.fallback_document(),
            });
        }

        let rendered = self.render(video_path).await?;

        info!(path = %nfo_path.display(), "Creating nfo");
        write_nfo(&nfo_path, &rendered.document).await?;

        let poster_path = match (&rendered.poster_url, self.config.output.download_poster) {
            (Some(url), true) => {
                save_poster(
                    &self.catalog,
                    url,
                    video_path,
                    &self.config.catalog.trusted_poster_prefix,
                )
                .await
            }
            _ => None,
        };

        Ok(ScrapeOutcome {
            nfo_path,
            written: true,
            poster_path,
            source: rendered.source,
            document: rendered.document,
        })
    }
}
