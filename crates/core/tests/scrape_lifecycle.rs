//! Scrape run integration tests.
//!
//! These tests drive `ScrapeRunner` end to end with a mock catalog:
//! - Remote match: nfo content, poster download, uniqueid from URL
//! - No match: filename-only nfo
//! - Overwrite handling, write ordering and untrusted posters

use std::path::PathBuf;

use tempfile::TempDir;

use svscraper_core::{
    testing::{fixtures, MockCatalog, RecordedCatalogQuery},
    CatalogError, Config, DocumentSource, ScrapeError, ScrapeRunner,
};

/// Test helper holding a runner and a temp media directory.
struct TestHarness {
    runner: ScrapeRunner<MockCatalog>,
    media_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_config(Config::default())
    }

    fn with_config(config: Config) -> Self {
        let media_dir = TempDir::new().expect("Failed to create media dir");
        Self {
            runner: ScrapeRunner::new(MockCatalog::new(), config),
            media_dir,
        }
    }

    fn catalog(&self) -> &MockCatalog {
        self.runner.catalog()
    }

    fn video(&self, name: &str) -> PathBuf {
        self.media_dir.path().join(name)
    }
}

#[tokio::test]
async fn test_remote_match_writes_nfo_and_poster() {
    let harness = TestHarness::new();
    harness
        .catalog()
        .set_search_results(vec![
            fixtures::candidate(0, "2005", "baker", "baker-3"),
            fixtures::candidate(1, "2005", "Baker", "baker-3-bonus"),
        ])
        .await;
    harness
        .catalog()
        .add_page(fixtures::video_page("baker-3", "Baker 3", "2005"))
        .await;
    harness.catalog().set_poster_bytes(b"jpeg".to_vec()).await;

    // the video file does not need to exist
    let video = harness.video("Baker - Baker 3 (2005).mp4");
    let outcome = harness.runner.run(&video).await.unwrap();

    assert!(outcome.written);
    assert_eq!(outcome.nfo_path, harness.video("Baker - Baker 3 (2005).nfo"));
    assert_eq!(
        outcome.source,
        DocumentSource::Remote {
            url: fixtures::video_url("baker-3")
        }
    );

    let nfo = std::fs::read_to_string(&outcome.nfo_path).unwrap();
    let expected = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<movie>
  <title>Baker 3</title>
  <plot>Baker 3 full length.</plot>
  <studio>baker</studio>
  <premiered>2005-01-01</premiered>
  <uniqueid type="svs" default="true">baker-3</uniqueid>
  <genre>skate</genre>
  <tag>skate</tag>
  <actor>
    <name>Andrew Reynolds</name>
  </actor>
  <actor>
    <name>Erik Ellington</name>
  </actor>
  <actor>
    <name>Bryan Herman</name>
  </actor>
</movie>
"#;
    assert_eq!(nfo, expected);

    let poster = outcome.poster_path.expect("poster should be saved");
    assert_eq!(poster, harness.video("Baker - Baker 3 (2005)-poster.jpg"));
    assert_eq!(std::fs::read(poster).unwrap(), b"jpeg");

    assert_eq!(
        harness.catalog().recorded_queries().await,
        vec![
            RecordedCatalogQuery::Search {
                video_name: "Baker 3".to_string()
            },
            RecordedCatalogQuery::GetVideo {
                url: fixtures::video_url("baker-3")
            },
            RecordedCatalogQuery::FetchPoster {
                url: "https://assets.skatevideo.site/covers/baker-3.jpg".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_no_match_writes_filename_nfo() {
    let harness = TestHarness::new();

    let video = harness.video("Baker - Baker 3 (2005).mkv");
    let outcome = harness.runner.run(&video).await.unwrap();

    assert_eq!(outcome.source, DocumentSource::Filename);
    assert!(outcome.poster_path.is_none());

    let nfo = std::fs::read_to_string(&outcome.nfo_path).unwrap();
    let expected = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<movie>
  <title>Baker 3</title>
  <studio>Baker</studio>
  <premiered>2005-01-01</premiered>
  <uniqueid type="home" default="true">baker-3</uniqueid>
  <genre>skate</genre>
  <tag>skate</tag>
</movie>
"#;
    assert_eq!(nfo, expected);
}

#[tokio::test]
async fn test_no_match_without_year_omits_premiered() {
    let harness = TestHarness::new();

    let video = harness.video("Untitled Clip [raw].mp4");
    let outcome = harness.runner.run(&video).await.unwrap();

    let nfo = std::fs::read_to_string(&outcome.nfo_path).unwrap();
    assert!(nfo.contains("<title>Untitled Clip</title>"));
    assert!(nfo.contains("<studio/>"));
    assert!(!nfo.contains("premiered"));
    assert!(nfo.contains(r#"<uniqueid type="home" default="true">untitled-clip</uniqueid>"#));
}

#[tokio::test]
async fn test_existing_nfo_kept_when_overwrite_disabled() {
    let mut config = Config::default();
    config.output.overwrite = false;
    let harness = TestHarness::with_config(config);

    let nfo_path = harness.video("Flip - Sorry (2002).nfo");
    std::fs::write(&nfo_path, "hand edited").unwrap();

    let outcome = harness
        .runner
        .run(&harness.video("Flip - Sorry (2002).mp4"))
        .await
        .unwrap();

    assert!(!outcome.written);
    assert_eq!(outcome.source, DocumentSource::Existing);
    assert_eq!(std::fs::read_to_string(nfo_path).unwrap(), "hand edited");
}

#[tokio::test]
async fn test_existing_nfo_kept_without_catalog_traffic() {
    let mut config = Config::default();
    config.output.overwrite = false;
    let harness = TestHarness::with_config(config);

    let nfo_path = harness.video("Flip - Sorry (2002).nfo");
    std::fs::write(&nfo_path, "hand edited").unwrap();

    // an unreachable catalog must not fail a run that has nothing to write
    harness
        .catalog()
        .set_next_error(CatalogError::StatusError {
            status: 503,
            url: "https://catalog.test/search".to_string(),
        })
        .await;

    let outcome = harness
        .runner
        .run(&harness.video("Flip - Sorry (2002).mp4"))
        .await
        .unwrap();

    assert!(!outcome.written);
    assert!(outcome.poster_path.is_none());
    assert_eq!(outcome.nfo_path, nfo_path);
    assert_eq!(std::fs::read_to_string(&nfo_path).unwrap(), "hand edited");
    assert!(harness.catalog().recorded_queries().await.is_empty());
}

#[tokio::test]
async fn test_overwrite_replaces_existing_nfo() {
    let harness = TestHarness::new();

    let nfo_path = harness.video("Flip - Sorry (2002).nfo");
    std::fs::write(&nfo_path, "hand edited").unwrap();

    let outcome = harness
        .runner
        .run(&harness.video("Flip - Sorry (2002).mp4"))
        .await
        .unwrap();

    assert!(outcome.written);
    assert_eq!(outcome.source, DocumentSource::Filename);
    let nfo = std::fs::read_to_string(&nfo_path).unwrap();
    assert!(nfo.contains("<title>Sorry"));
    assert!(!nfo.contains("hand edited"));
}

#[tokio::test]
async fn test_failed_nfo_write_skips_poster() {
    let harness = TestHarness::new();
    harness
        .catalog()
        .set_search_results(vec![fixtures::candidate(0, "2005", "baker", "baker-3")])
        .await;
    harness
        .catalog()
        .add_page(fixtures::video_page("baker-3", "Baker 3", "2005"))
        .await;
    harness.catalog().set_poster_bytes(b"jpeg".to_vec()).await;

    // a directory where the nfo should go makes the write fail
    std::fs::create_dir(harness.video("Baker - Baker 3 (2005).nfo")).unwrap();

    let result = harness
        .runner
        .run(&harness.video("Baker - Baker 3 (2005).mp4"))
        .await;

    assert!(matches!(result, Err(ScrapeError::Nfo(_))));
    assert!(!harness.video("Baker - Baker 3 (2005)-poster.jpg").exists());
    assert!(!harness
        .catalog()
        .recorded_queries()
        .await
        .iter()
        .any(|q| matches!(q, RecordedCatalogQuery::FetchPoster { .. })));
}

#[tokio::test]
async fn test_poster_disabled() {
    let mut config = Config::default();
    config.output.download_poster = false;
    let harness = TestHarness::with_config(config);
    harness
        .catalog()
        .set_search_results(vec![fixtures::candidate(0, "2005", "baker", "baker-3")])
        .await;
    harness
        .catalog()
        .add_page(fixtures::video_page("baker-3", "Baker 3", "2005"))
        .await;

    let outcome = harness
        .runner
        .run(&harness.video("Baker - Baker 3 (2005).mp4"))
        .await
        .unwrap();

    assert!(outcome.poster_path.is_none());
    assert!(!harness
        .catalog()
        .recorded_queries()
        .await
        .iter()
        .any(|q| matches!(q, RecordedCatalogQuery::FetchPoster { .. })));
}

#[tokio::test]
async fn test_untrusted_poster_is_not_downloaded() {
    let harness = TestHarness::new();
    let mut page = fixtures::video_page("baker-3", "Baker 3", "2005");
    page.poster_url = Some("https://cdn.elsewhere.test/baker-3.jpg".to_string());
    harness
        .catalog()
        .set_search_results(vec![fixtures::candidate(0, "2005", "baker", "baker-3")])
        .await;
    harness.catalog().add_page(page).await;

    let outcome = harness
        .runner
        .run(&harness.video("Baker - Baker 3 (2005).mp4"))
        .await
        .unwrap();

    assert!(outcome.written);
    assert!(outcome.poster_path.is_none());
}

#[tokio::test]
async fn test_tied_candidates_pick_the_later_one() {
    let harness = TestHarness::new();
    harness
        .catalog()
        .set_search_results(vec![
            // 1.0 + 0.0 + ratio("ac", "ab") = 1.5
            fixtures::candidate(0, "", "ac", "first"),
            // 0.5 + 1.0 + 0.0 = 1.5
            fixtures::candidate(1, "2001", "", "second"),
        ])
        .await;
    harness
        .catalog()
        .add_page(fixtures::video_page("second", "Clip", "2001"))
        .await;

    let outcome = harness
        .runner
        .run(&harness.video("ab - Clip (2001).mp4"))
        .await
        .unwrap();

    assert_eq!(
        outcome.source,
        DocumentSource::Remote {
            url: fixtures::video_url("second")
        }
    );
}
