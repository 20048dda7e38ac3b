use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use ftsearch::engine::CONFIG_PATH;
use ftsearch::index::{BinaryIndexWriter, IndexBuilder, TextIndexWriter};
use ftsearch::{logging, EngineConfig};

#[derive(Parser)]
#[command(
    name = "ftsearch-index",
    version,
    about = "Build a full-text search index from a CSV document catalog"
)]
struct Cli {
    /// CSV catalog with bookID, title and language_code columns
    #[arg(long)]
    csv: PathBuf,

    /// Directory to write the index into
    #[arg(long)]
    index: PathBuf,

    /// Engine configuration file
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// On-disk format to produce
    #[arg(long, value_enum, default_value = "binary")]
    format: IndexFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IndexFormat {
    Binary,
    Text,
    Both,
}

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    let config = EngineConfig::load(&cli.config)
        .with_context(|| format!("cannot load engine config {}", cli.config.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&cli.csv)
        .with_context(|| format!("cannot open catalog {}", cli.csv.display()))?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("catalog is missing column '{name}'"))
    };
    let id_col = column("bookID")?;
    let title_col = column("title")?;
    let lang_col = column("language_code")?;

    let bar = ProgressBar::new_spinner().with_style(
        ProgressStyle::with_template("{spinner} {pos} documents indexed")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut builder = IndexBuilder::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("catalog row {row} is unreadable"))?;
        let (Some(id), Some(title), Some(lang)) = (
            record.get(id_col),
            record.get(title_col),
            record.get(lang_col),
        ) else {
            warn!(row, "skipping short row");
            continue;
        };
        if lang != "eng" && lang != "en-US" {
            continue;
        }
        let Ok(id) = id.trim().parse::<u64>() else {
            warn!(row, id, "skipping row with non-numeric bookID");
            continue;
        };
        builder.add_document(id, title, &config);
        bar.inc(1);
    }
    bar.finish();

    let index = builder.build();
    info!(
        docs = index.doc_count(),
        terms = index.term_count(),
        "catalog indexed"
    );

    match cli.format {
        IndexFormat::Binary => BinaryIndexWriter::write(&cli.index, &index)?,
        IndexFormat::Text => TextIndexWriter::write(&cli.index, &index)?,
        IndexFormat::Both => {
            BinaryIndexWriter::write(&cli.index, &index)?;
            TextIndexWriter::write(&cli.index, &index)?;
        }
    }
    info!(index = %cli.index.display(), "index written");
    Ok(())
}
