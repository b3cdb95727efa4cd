//! Cover image download.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::VideoCatalog;

/// Only images under the catalog's own asset host are fetched.
pub fn is_trusted_poster(url: &str, trusted_prefix: &str) -> bool {
    !trusted_prefix.is_empty() && url.starts_with(trusted_prefix)
}

/// `<dir>/<stem>-poster<ext>`, with `<ext>` taken from the image URL path.
pub fn poster_path(video_path: &Path, poster_url: &str) -> PathBuf {
    let stem = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let url_path = poster_url.split(['?', '#']).next().unwrap_or_default();
    let ext = url_path
        .rsplit('/')
        .next()
        .map(Path::new)
        .and_then(Path::extension)
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    video_path.with_file_name(format!("{}-poster{}", stem, ext))
}

/// Download a poster next to the video.
///
/// Never fails the run: an untrusted URL or any download/write error is
/// logged and yields `None`.
pub async fn save_poster<C: VideoCatalog + ?Sized>(
    catalog: &C,
    poster_url: &str,
    video_path: &Path,
    trusted_prefix: &str,
) -> Option<PathBuf> {
    if !is_trusted_poster(poster_url, trusted_prefix) {
        info!(url = poster_url, "Skipping poster from untrusted host");
        return None;
    }

    let path = poster_path(video_path, poster_url);
    info!(path = %path.display(), "Downloading poster");

    let bytes = match catalog.fetch_poster(poster_url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(url = poster_url, error = %e, "Poster download failed");
            return None;
        }
    };

    match tokio::fs::write(&path, bytes).await {
        Ok(()) => Some(path),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to write poster");
            None
        }
    }
}
