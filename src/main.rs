mod cards;
mod config;
mod error;
mod fetch;
mod parser;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use tracing::info;

use crate::config::{LogFormat, Settings};
use error::Error;
use fetch::{Fetch, HttpFetcher};

#[derive(Parser, Debug)]
#[command(name = "sd_anki", about = "Build Anki flashcards from a SpanishDict lookup")]
struct Cli {
    /// Word to create cards for
    #[arg(long, value_parser = non_empty)]
    word: String,
    /// Anki collection media dir (e.g. ~/Library/Application Support/Anki2/User 1/collection.media)
    #[arg(long = "collectionsDir")]
    collections_dir: PathBuf,
    /// CSV file to append cards to
    #[arg(long = "outputFile")]
    output_file: PathBuf,
    /// Number of senses to turn into cards, most common first
    #[arg(long = "numberDefns", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    number_defns: u32,
}

fn non_empty(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("must not be empty".into())
    } else {
        Ok(s.to_string())
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder
            .json()
            .with_file(true)
            .with_line_number(true)
            .try_init(),
    };
}

fn check_collections_dir(dir: &Path) -> Result<(), Error> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "directory does not exist: {}",
            dir.display()
        )))
    }
}

/// Full lookup: page → blob → response → cards → csv. Returns rows written.
fn run(cli: &Cli, settings: &Settings, fetcher: &dyn Fetch) -> Result<usize, Error> {
    check_collections_dir(&cli.collections_dir)?;

    let html = fetch::fetch_page(fetcher, &settings.lookup_url, &cli.word)?;
    let response = parser::parse_page(&html)?;
    let cards = cards::make_cards(
        &response,
        &cli.word,
        fetcher,
        &cli.collections_dir,
        &settings.asset_scheme,
        cli.number_defns as usize,
    )?;
    cards::export::append_cards(&cards, &cli.output_file)
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    init_tracing(
        settings
            .as_ref()
            .map(|s| s.log_format)
            .unwrap_or(LogFormat::Pretty),
    );

    let t0 = Instant::now();
    let cli = Cli::parse();
    info!(
        word = %cli.word,
        output_file = %cli.output_file.display(),
        collections_dir = %cli.collections_dir.display(),
        number_defns = cli.number_defns,
        "Starting lookup"
    );

    let result = settings.and_then(|settings| {
        let fetcher = HttpFetcher::new(&settings)?;
        run(&cli, &settings, &fetcher)
    });

    match result {
        Ok(rows) => {
            println!(
                "Wrote {} cards for \"{}\" to {} in {:.1}s",
                rows,
                cli.word,
                cli.output_file.display(),
                t0.elapsed().as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            let stage = e.stage();
            Err(anyhow::Error::new(e).context(format!("{} stage failed", stage)))
        }
    }
}
