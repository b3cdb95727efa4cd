//! Metadata documents and their Kodi `.nfo` rendering.

mod document;
mod nfo;

pub use document::*;
pub use nfo::{render_nfo, write_nfo, NfoError};
