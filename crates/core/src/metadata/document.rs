use serde::{Deserialize, Serialize};

use crate::filename::premiere_date;

/// Genre written to every document.
pub const GENRE: &str = "skate";
/// Tag written to every document.
pub const TAG: &str = "skate";

/// Where a unique id comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueIdKind {
    /// Derived locally from the video name.
    Home,
    /// Slug of the catalog detail page.
    Svs,
}

impl UniqueIdKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueIdKind::Home => "home",
            UniqueIdKind::Svs => "svs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueId {
    pub kind: UniqueIdKind,
    pub value: String,
}

impl UniqueId {
    pub fn home(value: impl Into<String>) -> Self {
        Self {
            kind: UniqueIdKind::Home,
            value: value.into(),
        }
    }

    pub fn svs(value: impl Into<String>) -> Self {
        Self {
            kind: UniqueIdKind::Svs,
            value: value.into(),
        }
    }
}

/// Fields extracted from a catalog detail page.
///
/// Missing fields arrive as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    pub plot: String,
    pub studio: String,
    /// Release year with any parentheses already removed.
    pub year: String,
    /// Skaters in on-page order.
    pub cast: Vec<String>,
}

/// The canonical field set handed to the `.nfo` serializer.
///
/// Built once per run, either from a catalog page or from the filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub title: String,
    /// `None` when the document comes from the filename alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    pub studio: String,
    /// `YYYY-01-01`, or `None` when no year is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premiered: Option<String>,
    pub unique_id: UniqueId,
    pub cast: Vec<String>,
}

impl MetadataDocument {
    /// Build a document from detail-page fields.
    ///
    /// `uid` is the terminal path segment of the detail page URL.
    pub fn from_remote(details: VideoDetails, uid: impl Into<String>) -> Self {
        let year = details.year.trim();
        let premiered = if year.is_empty() {
            None
        } else {
            Some(premiere_date(year))
        };

        Self {
            title: details.title,
            plot: Some(details.plot),
            studio: details.studio,
            premiered,
            unique_id: UniqueId::svs(uid),
            cast: details.cast,
        }
    }

    pub fn genre(&self) -> &'static str {
        GENRE
    }

    pub fn tag(&self) -> &'static str {
        TAG
    }
}
