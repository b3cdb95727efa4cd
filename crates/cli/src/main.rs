use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use svscraper_core::{
    load_config, load_config_or_default, validate_config, DocumentSource, ScrapeRunner,
    SkateVideoSiteClient,
};

/// Config file looked up in the working directory when none is given
const DEFAULT_CONFIG: &str = "svscraper.toml";

#[derive(Debug, Parser)]
#[command(
    name = "svscraper",
    version,
    about = "Scrapes video information from skatevideosite.com and saves it in Kodi's .nfo format",
    after_help = "Preferred naming convention is \"Company - VideoName (YEAR).mp4\". \
                  When no match is found a minimal .nfo is still generated from the file name."
)]
struct Cli {
    /// Path to a video file. The file does not need to exist; its name is
    /// used to search the catalog and to name the generated .nfo and poster.
    video_path: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long, env = "SVSCRAPER_CONFIG")]
    config: Option<PathBuf>,

    /// Do not download the poster image
    #[arg(long)]
    no_poster: bool,

    /// Print the .nfo to stdout instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON summary instead of progress lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_config_or_default(Some(PathBuf::from(DEFAULT_CONFIG).as_path()))
            .context("Failed to load default configuration")?,
    };
    validate_config(&config).context("Configuration validation failed")?;

    if cli.no_poster {
        config.output.download_poster = false;
    }

    let catalog =
        SkateVideoSiteClient::new(&config.catalog).context("Failed to create catalog client")?;
    let runner = ScrapeRunner::new(catalog, config);

    if cli.dry_run {
        let rendered = runner
            .render(&cli.video_path)
            .await
            .with_context(|| format!("Failed to scrape {:?}", cli.video_path))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        } else {
            print!("{}", rendered.to_nfo()?);
        }
        return Ok(());
    }

    if !cli.json {
        println!("Searching data for video file: {}", cli.video_path.display());
    }

    let outcome = runner
        .run(&cli.video_path)
        .await
        .with_context(|| format!("Failed to scrape {:?}", cli.video_path))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_source(&outcome.source);
    if let Some(poster) = &outcome.poster_path {
        println!("  Downloaded poster: {}", poster.display());
    }
    if outcome.written {
        println!("  Created .nfo: {}", outcome.nfo_path.display());
    } else {
        println!("  Kept existing .nfo: {}", outcome.nfo_path.display());
    }

    Ok(())
}

fn print_source(source: &DocumentSource) {
    match source {
        DocumentSource::Remote { url } => println!("  Scraping from: {}", url),
        DocumentSource::Filename => {
            println!("  Could not find any match. Using file name to create the .nfo file")
        }
        DocumentSource::Existing => println!("  Overwrite disabled, skipping the catalog"),
    }
}
