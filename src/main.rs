//! Accent CLI - English to German vocabulary trainer.

use accent::config::Config;
use accent::console::Console;
use accent::{Book, ChatTranslator, JsonRepository, Vocabulary, VocabularyService};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// English to German vocabulary trainer.
#[derive(Parser, Debug)]
#[command(name = "accent")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add unseen words from a text file to the dictionary.
    Ingest {
        /// Plain-text book to read.
        file: PathBuf,
    },

    /// Show a random dictionary entry.
    Random,

    /// Show a random entry, translating it if needed.
    Study,

    /// List all dictionary entries.
    List {
        /// Only show entries not marked known.
        #[arg(long)]
        unknown: bool,
    },

    /// Update an entry, translating it unless it is marked known.
    Update {
        /// Headword to update.
        word: String,

        /// Mark the entry as known.
        #[arg(long, conflicts_with = "unknown")]
        known: bool,

        /// Mark the entry as not known.
        #[arg(long)]
        unknown: bool,

        /// Set the translation by hand. Only kept for known entries, since
        /// unknown ones are translated again.
        #[arg(long, requires = "known")]
        translation: Option<String>,
    },

    /// Remove an entry and add it to the ignore list.
    Drop {
        /// Headword to drop.
        word: String,
    },

    /// Print the config file location.
    ConfigPath,
}

impl Command {
    /// Whether this command may call the translation API.
    fn needs_translator(&self) -> bool {
        match self {
            Command::Study => true,
            Command::Update { known, .. } => !known,
            _ => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let console = Console::new();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    if let Command::ConfigPath = args.command {
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = Config::load_from(&config_path).context("Failed to load configuration")?;
    config.validate(false).context("Invalid configuration")?;

    if args.command.needs_translator() && !config.api.is_configured() {
        console.warning(&format!(
            "API key not configured, words will stay untranslated. Edit: {}",
            config_path.display()
        ));
    }

    let repository = JsonRepository::open(&config.storage.path).with_context(|| {
        format!(
            "Failed to open vocabulary store {}",
            config.storage.path.display()
        )
    })?;
    let translator = ChatTranslator::new(config.api.clone(), config.translation.clone());
    let service = VocabularyService::from_config(&config, Arc::new(repository), Arc::new(translator));

    match args.command {
        Command::Ingest { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let added = service.add_new_words(&Book::new(content)).await?;
            console.success(&format!("Added {} new words", console.count(added)));
        }
        Command::Random => match service.random_vocabulary().await? {
            Some(entry) => println!("{}", console.entry(&entry)),
            None => console.info("The dictionary is empty"),
        },
        Command::Study => match service.random_translated().await? {
            Some(entry) => println!("{}", console.entry(&entry)),
            None => console.info("No translated word available"),
        },
        Command::List { unknown } => {
            let entries = service.all_vocabularies().await?;
            console.section("Dictionary");
            let shown: Vec<&Vocabulary> = entries.iter().filter(|e| !unknown || !e.known).collect();
            for entry in &shown {
                println!("{}", console.entry(entry));
            }
            console.info(&format!("{} of {} entries", shown.len(), entries.len()));
        }
        Command::Update {
            word,
            known,
            unknown,
            translation,
        } => {
            let mut entry = find_entry(&service, &word).await?;
            if let Some(translation) = translation {
                entry.translation = translation;
            }
            if known {
                entry.known = true;
            } else if unknown {
                entry.known = false;
            }
            let saved = service.update_vocabulary(entry).await?;
            console.success(&console.entry(&saved));
        }
        Command::Drop { word } => {
            let entry = find_entry(&service, &word).await?;
            service.drop_and_ignore(&entry).await?;
            console.success(&format!(
                "Dropped '{}' and added it to {}",
                entry.headword(),
                service.ignore_log().filepath().display()
            ));
        }
        Command::ConfigPath => unreachable!("handled before loading config"),
    }

    Ok(())
}

/// Sets up `tracing` output on stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "accent=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Looks up a stored entry by headword.
async fn find_entry(service: &VocabularyService, word: &str) -> Result<Vocabulary> {
    let headword = word.to_lowercase();
    service
        .all_vocabularies()
        .await?
        .into_iter()
        .find(|e| e.headword() == headword)
        .ok_or_else(|| anyhow::anyhow!("'{}' is not in the dictionary", headword))
}
