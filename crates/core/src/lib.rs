pub mod catalog;
pub mod config;
pub mod filename;
pub mod matcher;
pub mod metadata;
pub mod poster;
pub mod runner;
pub mod testing;

pub use catalog::{
    search_term, CatalogError, SearchCandidate, SkateVideoSiteClient, VideoCatalog, VideoPage,
};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, CatalogConfig,
    Config, ConfigError, OutputConfig, SelectorConfig,
};
pub use filename::VideoPath;
pub use matcher::{rank, score, select_best, similarity_ratio, ScoreBreakdown, ScoredCandidate};
pub use metadata::{
    render_nfo, write_nfo, MetadataDocument, NfoError, UniqueId, UniqueIdKind, VideoDetails,
};
pub use runner::{DocumentSource, RenderedDocument, ScrapeError, ScrapeOutcome, ScrapeRunner};
