use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wordsearch::index::HasherConfig;
use wordsearch::output::{print_search_results, write_words, OutputFormat};
use wordsearch::tree::DirTree;
use wordsearch::utils::progress::Spinner;
use wordsearch::utils::{decode_text, get_config_path, tokenize, AppConfig};
use wordsearch::{parse_query, Searcher};

#[derive(Parser)]
#[command(name = "wordsearch")]
#[command(about = "Find the files in a directory tree that contain a word")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List files containing a word
    Search {
        /// Word to look for (exact, case-sensitive)
        word: String,

        /// Directory to search in
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Maximum number of files read at once (overrides config)
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,

        /// Print results as a JSON array
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Print the words of a file, in order
    Tokens {
        /// File to tokenize
        file: PathBuf,
    },
    /// Show the configuration file and its effective values
    Config {
        /// Write the default configuration if no config file exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Search {
            word,
            path,
            concurrency,
            json,
            no_color,
        } => {
            let config = AppConfig::load().unwrap_or_else(|err| {
                warn!("Using default config: {:#}", err);
                AppConfig::default()
            });
            run_search(&word, path, concurrency, json, no_color, &config)?;
        }
        Commands::Tokens { file } => {
            let content = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let text = decode_text(&content);
            let stdout = io::stdout();
            write_words(&mut stdout.lock(), tokenize(&text))?;
        }
        Commands::Config { init } => {
            let config_path = get_config_path()?;
            if init && !config_path.exists() {
                let written = AppConfig::default().save()?;
                println!("Wrote default config to {}", written.display());
            }
            let config = AppConfig::load_from(&config_path)?;
            println!("Config file: {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn run_search(
    raw_word: &str,
    path: PathBuf,
    concurrency: Option<usize>,
    json: bool,
    no_color: bool,
    config: &AppConfig,
) -> Result<()> {
    let word = parse_query(raw_word)?;
    let tree = DirTree::new(&path)
        .with_context(|| format!("Cannot search {}", path.display()))?;

    let hasher_config = match concurrency {
        Some(limit) => HasherConfig::with_concurrency_limit(limit),
        None => config.hasher_config(),
    };

    let spinner = Spinner::start("Indexing files...", !json && io::stderr().is_terminal());
    let result = Searcher::new(tree).with_config(hasher_config).search(word);
    spinner.finish();

    let mut files = result.with_context(|| format!("Search for '{}' failed", word))?;
    // Stable output; the index itself is unordered
    files.sort();

    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Lines {
            color: config.color && !no_color,
        }
    };
    print_search_results(&files, format)?;

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("wordsearch=debug,warn")
    } else {
        EnvFilter::new("wordsearch=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
