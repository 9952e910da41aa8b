use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use genealogy_search::{AppConfig, Dependencies, LogFormat};
use genealogy_search_query::MAX_REFERENCES_PER_REQUEST;
use genealogy_search_shared::collections::SEARCHABLE_COLLECTIONS;

#[derive(Parser)]
#[command(name = "genealogy-search")]
#[command(about = "Rebuild and query the genealogy records search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OpenSearch URL (overrides OPENSEARCH_URL)
    #[arg(long, global = true)]
    opensearch_url: Option<String>,

    /// Index name (overrides INDEX_NAME)
    #[arg(long, global = true)]
    index: Option<String>,

    /// Directory of collection dumps to read from (overrides DATA_DIR)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the search index from the primary store
    Rebuild {
        /// Run only on this collection
        #[arg(short, long)]
        collection: Option<String>,

        /// Remove the current index and recreate its mapping first
        #[arg(short, long)]
        remove: bool,
    },
    /// Print completion, contains and phonetic suggestions
    Suggest { collection: String, query: String },
    /// Print the record whose header matches the text exactly
    Lookup { collection: String, text: String },
    /// Look up a place and a family name together
    Wizard {
        #[arg(long)]
        place: String,
        #[arg(long)]
        name: String,
    },
    /// Print records for comma separated `<collection>.<id>` references
    Resolve { references: String },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut config: AppConfig) -> Result<()> {
    if let Some(url) = cli.opensearch_url {
        config.opensearch_url = url;
    }
    if let Some(index) = cli.index {
        config.index_name = index;
    }
    if let Some(db) = cli.db {
        config.data_dir = db;
    }

    let deps = Dependencies::new(&config)?;

    match cli.command {
        Commands::Rebuild { collection, remove } => {
            deps.verify_engine().await?;

            let collections: Vec<String> = match collection {
                Some(collection) => vec![collection],
                None => SEARCHABLE_COLLECTIONS.iter().map(|c| c.to_string()).collect(),
            };

            info!(
                index = %deps.index_name,
                collections = ?collections,
                remove = remove,
                "Starting rebuild"
            );
            let report = deps
                .reindexer()
                .rebuild(&deps.index_name, &collections, remove)
                .await
                .context("rebuild failed")?;

            for collection in &report.collections {
                println!(
                    "Collection {} took {:?} ({} indexed, {} recovered, {} skipped)",
                    collection.collection,
                    collection.duration,
                    collection.indexed,
                    collection.recovered,
                    collection.skipped
                );
            }
        }
        Commands::Suggest { collection, query } => {
            deps.verify_engine().await?;
            let suggestions = deps.router().suggest(&collection, &query).await;
            print_json(&suggestions)?;
        }
        Commands::Lookup { collection, text } => {
            let document = deps.router().lookup_by_header(&collection, &text).await;
            print_json(&document)?;
        }
        Commands::Wizard { place, name } => {
            let result = deps.router().wizard_search(&place, &name).await;
            print_json(&result)?;
        }
        Commands::Resolve { references } => {
            let mut references: Vec<String> =
                references.split(',').map(|r| r.to_string()).collect();
            if references.len() > MAX_REFERENCES_PER_REQUEST {
                warn!(
                    requested = references.len(),
                    limit = MAX_REFERENCES_PER_REQUEST,
                    "Too many references, keeping the first ones"
                );
                references.truncate(MAX_REFERENCES_PER_REQUEST);
            }

            let resolved = deps.resolver().resolve(&references).await;
            print_json(&resolved)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{}", text);
    Ok(())
}
