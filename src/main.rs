use anyhow::{Context, Result};
use boolsearch::config::{MalformedPolicy, QueryErrorPolicy, SearchConfig};
use boolsearch::corpus::load_index;
use boolsearch::index::stats::{show_stats, IndexStats};
use boolsearch::index::InvertedIndex;
use boolsearch::judge::{run_judge, JudgePaths};
use boolsearch::output::{print_matches, print_query_error};
use boolsearch::query::{parse_query_with_limit, QueryExecutor};
use boolsearch::utils::normalize::Language;
use boolsearch::utils::progress::Spinner;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boolsearch")]
#[command(about = "Boolean keyword search over a tab-separated record corpus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Snowball stemming language (defaults to the config file, then russian)
    #[arg(short, long, global = true, value_enum)]
    language: Option<Language>,

    /// Index and query lower-cased words without stemming
    #[arg(long, global = true)]
    no_stem: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// When to colour terminal output
    #[arg(long, global = true, value_enum, default_value_t = ColorArg::Auto)]
    color: ColorArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Judge object relevance for a batch of numbered queries
    Judge {
        /// Corpus file, one `id<TAB>text` record per line
        #[arg(long)]
        docs_file: PathBuf,

        /// Queries file, one `qid<TAB>query` per line
        #[arg(long)]
        queries_file: PathBuf,

        /// Objects CSV (`ObjectId,QueryId,DocumentId`)
        #[arg(long)]
        objects_file: PathBuf,

        /// Where to write the `ObjectId,Relevance` submission
        #[arg(long)]
        submission_file: PathBuf,

        /// Also dump each query's matching ids as JSON
        #[arg(long)]
        results_json: Option<PathBuf>,

        /// Skip malformed corpus lines instead of failing
        #[arg(long)]
        skip_malformed: bool,

        /// Judge unparsable queries as matching nothing instead of failing
        #[arg(long)]
        skip_invalid_queries: bool,

        /// Hide the progress spinner
        #[arg(short, long)]
        quiet: bool,
    },
    /// Evaluate queries against a corpus and print the matching ids
    Query {
        /// Corpus file, one `id<TAB>text` record per line
        #[arg(long)]
        docs_file: PathBuf,

        /// Skip malformed corpus lines instead of failing
        #[arg(long)]
        skip_malformed: bool,

        /// Queries to evaluate
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Show how a query parses
    Explain {
        /// Query to parse
        query: String,
    },
    /// Show corpus index statistics
    Stats {
        /// Corpus file, one `id<TAB>text` record per line
        #[arg(long)]
        docs_file: PathBuf,

        /// Skip malformed corpus lines instead of failing
        #[arg(long)]
        skip_malformed: bool,

        /// Number of most frequent terms to list
        #[arg(long)]
        top: Option<usize>,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config(&cli)?;
    let color = ColorChoice::from(cli.color);

    match cli.command {
        Commands::Judge {
            docs_file,
            queries_file,
            objects_file,
            submission_file,
            results_json,
            skip_malformed,
            skip_invalid_queries,
            quiet,
        } => {
            if skip_malformed {
                config.malformed_policy = MalformedPolicy::Skip;
            }
            if skip_invalid_queries {
                config.query_error_policy = QueryErrorPolicy::Empty;
            }

            let paths = JudgePaths {
                docs_file,
                queries_file,
                objects_file,
                submission_file,
                results_json,
            };
            let summary = run_judge(&paths, &config, quiet)?;

            println!(
                "Judged {} objects against {} queries: {} relevant",
                summary.objects, summary.queries, summary.relevant
            );
            if summary.failed_queries > 0 {
                println!("{} queries failed to parse and matched nothing", summary.failed_queries);
            }
            println!("Submission written to {}", paths.submission_file.display());
        }
        Commands::Query {
            docs_file,
            skip_malformed,
            queries,
        } => {
            if skip_malformed {
                config.malformed_policy = MalformedPolicy::Skip;
            }
            let index = index_with_spinner(&docs_file, &config)?;
            return run_queries(&index, &queries, config.max_nesting_depth, color);
        }
        Commands::Explain { query } => {
            return explain(&query, config.max_nesting_depth, color);
        }
        Commands::Stats {
            docs_file,
            skip_malformed,
            top,
            json,
        } => {
            if skip_malformed {
                config.malformed_policy = MalformedPolicy::Skip;
            }
            let index = index_with_spinner(&docs_file, &config)?;
            let stats = IndexStats::collect(&index, top.unwrap_or(config.top_terms));

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                show_stats(&stats);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "boolsearch=warn",
        1 => "boolsearch=info",
        _ => "boolsearch=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file first, then command-line overrides
fn load_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(language) = cli.language {
        config.language = language;
    }
    if cli.no_stem {
        config.stem = false;
    }

    Ok(config)
}

fn index_with_spinner(docs_file: &Path, config: &SearchConfig) -> Result<InvertedIndex> {
    let spinner = Spinner::start(format!("Indexing {}...", docs_file.display()));
    let index = load_index(docs_file, config);
    spinner.clear();

    index.with_context(|| format!("Failed to index {}", docs_file.display()))
}

fn run_queries(index: &InvertedIndex, queries: &[String], max_depth: usize, color: ColorChoice) -> Result<ExitCode> {
    let mut status = ExitCode::SUCCESS;

    for query in queries {
        match parse_query_with_limit(query, max_depth) {
            Ok(parsed) => {
                let matches = QueryExecutor::new(index).execute(&parsed);
                print_matches(query, &matches, color)?;
            }
            Err(err) => {
                print_query_error(query, err.offset, &err.kind.to_string(), color)?;
                status = ExitCode::FAILURE;
            }
        }
    }

    Ok(status)
}

fn explain(query: &str, max_depth: usize, color: ColorChoice) -> Result<ExitCode> {
    match parse_query_with_limit(query, max_depth) {
        Ok(parsed) => {
            println!("{}", parsed);
            print!("{}", parsed.root.tree());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_query_error(query, err.offset, &err.kind.to_string(), color)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
