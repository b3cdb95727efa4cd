//! Filename-derived video metadata.
//!
//! The preferred naming convention is `Company - Video Name (YEAR)[svs=ID].ext`.
//! Every part is optional; parsing never fails and missing parts stay unset.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::metadata::{MetadataDocument, UniqueId};

/// A 4-digit year wrapped in literal parentheses.
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d{4})\)").expect("valid regex"));

/// A non-empty, non-nested bracket tag.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]+\]").expect("valid regex"));

/// The value of an `[svs=VALUE]` tag, up to the closing bracket.
static SOURCE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[svs=([^\]]+)").expect("valid regex"));

/// Structured fields inferred from a video file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPath {
    /// The original path. The file does not have to exist.
    pub path: PathBuf,
    /// Studio/publisher, the text before the first `-`.
    pub company: Option<String>,
    /// Year found as `(YYYY)`.
    pub year: Option<String>,
    /// Stem with company prefix, year and bracket tags removed.
    pub video_name: String,
    /// Catalog id from an `[svs=ID]` tag.
    pub source_id: Option<String>,
}

impl VideoPath {
    /// Parse a path. Only its stem is looked at.
    pub fn parse(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let company = parse_company(&stem);
        let year = parse_year(&stem);
        let video_name = derive_video_name(&stem, company.is_some(), year.is_some());
        let source_id = parse_source_id(&stem);

        Self {
            path,
            company,
            year,
            video_name,
            source_id,
        }
    }

    /// Where the sidecar document for this video goes.
    pub fn nfo_path(&self) -> PathBuf {
        self.path.with_extension("nfo")
    }

    /// Local unique id: lowercase video name with spaces turned into hyphens.
    pub fn home_id(&self) -> String {
        self.video_name.to_lowercase().replace(' ', "-")
    }

    /// Minimal document built from the filename alone, used when the
    /// catalog has no match.
    pub fn fallback_document(&self) -> MetadataDocument {
        MetadataDocument {
            title: self.video_name.clone(),
            plot: None,
            studio: self.company.clone().unwrap_or_default(),
            premiered: self.year.as_deref().map(premiere_date),
            unique_id: UniqueId::home(self.home_id()),
            cast: Vec::new(),
        }
    }
}

/// `YYYY` -> `YYYY-01-01`.
pub(crate) fn premiere_date(year: &str) -> String {
    format!("{}-01-01", year)
}

fn parse_company(stem: &str) -> Option<String> {
    let (prefix, _) = stem.split_once('-')?;
    let company = prefix.trim();
    if company.is_empty() {
        None
    } else {
        Some(company.to_string())
    }
}

fn parse_year(stem: &str) -> Option<String> {
    YEAR_RE
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn derive_video_name(stem: &str, has_company: bool, has_year: bool) -> String {
    let mut name = stem;
    if has_company {
        if let Some((_, rest)) = name.split_once('-') {
            name = rest;
        }
    }

    let name = if has_year {
        YEAR_RE.replace(name, "").into_owned()
    } else {
        name.to_string()
    };

    TAG_RE.replace_all(&name, "").trim().to_string()
}

fn parse_source_id(stem: &str) -> Option<String> {
    let id = SOURCE_ID_RE.captures(stem)?.get(1)?.as_str().trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
