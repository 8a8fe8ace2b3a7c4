//! vocab CLI: ingest concept documents and ask define/decompose/relate questions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use vocab_graph::config::VocabConfig;
use vocab_graph::error::VocabResult;
use vocab_graph::export::write_slot_values;
use vocab_graph::graph::source::StoredVocabulary;
use vocab_graph::ingest::ingest_file;
use vocab_graph::ontology::DocumentFormat;
use vocab_graph::query::{Intent, QueryEngine};
use vocab_graph::store::DurableStore;

#[derive(Parser)]
#[command(name = "vocab", version, about = "Controlled-vocabulary knowledge graph")]
struct Cli {
    /// Directory holding the term store (overrides the config file).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/vocab-graph/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a concept document, replacing stored records by key.
    Ingest {
        /// Path to the SKOS RDF/XML or JSON document.
        #[arg(long)]
        file: PathBuf,

        /// Document format (skos, json). Detected from the extension if omitted.
        #[arg(long)]
        format: Option<String>,

        /// Where to write the slot-value artifact (overrides the config file).
        #[arg(long)]
        slots: Option<PathBuf>,

        /// Record related edges only on the referenced concept.
        #[arg(long)]
        asymmetric: bool,
    },

    /// Define a term.
    Define(QueryArgs),

    /// List a term's narrower terms.
    Decompose(QueryArgs),

    /// List a term's related terms.
    Relate(QueryArgs),

    /// Show resolved paths and configuration.
    Info,
}

#[derive(Args)]
struct QueryArgs {
    /// The term as spoken by the user.
    spoken: String,

    /// Canonical form from the upstream resolver (defaults to the spoken form).
    #[arg(long)]
    resolved: Option<String>,
}

fn main() -> miette::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    run(Cli::parse())?;
    Ok(())
}

fn run(cli: Cli) -> VocabResult<()> {
    let config_path = VocabConfig::locate(cli.config.as_deref())?;
    let config = VocabConfig::load_or_default(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    let store_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.store_dir()?,
    };

    match cli.command {
        Commands::Ingest {
            file,
            format,
            slots,
            asymmetric,
        } => {
            let mut ingest_config = config.ingest_config();
            ingest_config.format = format.map(|f| f.parse::<DocumentFormat>()).transpose()?;
            if asymmetric {
                ingest_config.symmetric_relations = false;
            }

            let store = DurableStore::open(&store_dir)?;
            let vocabulary = ingest_file(&file, &ingest_config, &store)?;

            let slots_path = slots.unwrap_or_else(|| config.slot_values_file.clone());
            write_slot_values(&slots_path, vocabulary.slot_values())?;

            println!("Ingested {}: {}", file.display(), vocabulary.report());
            println!("Store: {}", store_dir.display());
            println!("Slot values: {}", slots_path.display());
        }

        Commands::Define(args) => answer(Intent::Define, &args, &store_dir)?,
        Commands::Decompose(args) => answer(Intent::Decompose, &args, &store_dir)?,
        Commands::Relate(args) => answer(Intent::Relate, &args, &store_dir)?,

        Commands::Info => {
            println!("Config file: {}", config_path.display());
            println!("Store:       {}", store_dir.display());
            println!();
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn answer(intent: Intent, args: &QueryArgs, store_dir: &Path) -> VocabResult<()> {
    let store = DurableStore::open(store_dir)?;
    let engine = QueryEngine::new(Arc::new(StoredVocabulary::new(Arc::new(store))));
    let resolved = args.resolved.as_deref().unwrap_or(&args.spoken);
    println!("{}", engine.answer(intent, &args.spoken, Some(resolved)));
    Ok(())
}
