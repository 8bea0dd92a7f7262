//! Deck converter command line.
//!
//! # Usage
//!
//! ```bash
//! # Convert a deck list to DCK
//! deckconv convert my_deck.txt my_deck.dck --catalog cards.json
//!
//! # Only use printings released by January 2012
//! deckconv convert deck.dec out.dck --catalog cards.bin --cutoff 2012-01
//!
//! # Build a binary catalog snapshot for faster start-up
//! deckconv snapshot cards.json cards.bin
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use rust_deckconv::{
    derive_deck_name, serialize_deck, ConvertOptions, Converter, InMemoryCatalog, ReleaseDate,
    Severity,
};

#[derive(Parser)]
#[command(name = "deckconv")]
#[command(version)]
#[command(about = "Convert deck lists from many tools into the canonical DCK format")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a deck file to DCK
    Convert {
        /// Deck file to convert
        input: PathBuf,

        /// Path of the DCK file to write
        output: PathBuf,

        /// Card catalog: JSON, or a snapshot if the name ends in `.bin`
        #[arg(long)]
        catalog: PathBuf,

        /// Conversion options as JSON
        #[arg(long)]
        options: Option<PathBuf>,

        /// Disable unique-prefix name matching
        #[arg(long)]
        no_prefix: bool,

        /// Only use printings released on or before this month (YYYY-MM)
        #[arg(long)]
        cutoff: Option<ReleaseDate>,
    },

    /// Write a binary snapshot of a JSON catalog
    Snapshot {
        /// JSON catalog to read
        input: PathBuf,

        /// Snapshot file to write
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            catalog,
            options,
            no_prefix,
            cutoff,
        } => load_options(options.as_deref(), no_prefix, cutoff)
            .and_then(|options| convert(&input, &output, &catalog, options)),
        Commands::Snapshot { input, output } => snapshot(&input, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(
    path: Option<&Path>,
    no_prefix: bool,
    cutoff: Option<ReleaseDate>,
) -> Result<ConvertOptions> {
    let mut options = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid options in {}", path.display()))?
        }
        None => ConvertOptions::default(),
    };

    if no_prefix {
        options = options.without_prefix_matching();
    }
    if let Some(cutoff) = cutoff {
        options = options.with_release_cutoff(cutoff);
    }
    Ok(options)
}

fn load_catalog(path: &Path) -> Result<InMemoryCatalog> {
    let catalog = if path.extension().is_some_and(|ext| ext == "bin") {
        InMemoryCatalog::from_snapshot_path(path)
    } else {
        InMemoryCatalog::from_json_path(path)
    }
    .with_context(|| format!("failed to load catalog {}", path.display()))?;

    info!(cards = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn convert(input: &Path, output: &Path, catalog: &Path, options: ConvertOptions) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read deck {}", input.display()))?;
    if text.trim().is_empty() {
        bail!("input file {} is empty", input.display());
    }

    let catalog = load_catalog(catalog)?;
    let converter = Converter::new(&catalog, options);

    info!(input = %input.display(), "parsing deck");
    let default_name = derive_deck_name(input).unwrap_or_default();
    let conversion = match converter.convert_with_default_name(&text, &default_name) {
        Ok(conversion) => conversion,
        Err(err) => {
            for diagnostic in err.diagnostics() {
                warn!("{diagnostic}");
            }
            return Err(err).context("could not create a deck from the input");
        }
    };

    for diagnostic in &conversion.diagnostics {
        match diagnostic.severity() {
            Severity::Warning => warn!("{diagnostic}"),
            Severity::Info => info!("{diagnostic}"),
        }
    }

    let dck = serialize_deck(&conversion.deck, &catalog)?;
    std::fs::write(output, dck)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        deck = conversion.deck.name(),
        output = %output.display(),
        "conversion completed"
    );
    Ok(())
}

fn snapshot(input: &Path, output: &Path) -> Result<()> {
    let catalog = InMemoryCatalog::from_json_path(input)
        .with_context(|| format!("failed to load catalog {}", input.display()))?;
    let bytes = catalog.to_snapshot()?;
    std::fs::write(output, bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(cards = catalog.len(), output = %output.display(), "snapshot written");
    Ok(())
}
