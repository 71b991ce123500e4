use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use spendlens_ai::GeminiClient;
use spendlens_core::{TransactionFilter, generate_sample_data};
use spendlens_ingest::{InputKind, parse_csv};

mod config;
mod export;
mod report;

#[derive(Parser, Debug)]
#[command(name = "spendlens", version, about = "Bank-statement spending analysis with an AI stress score")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest a statement (CSV, PDF, or image) and report on it
    Analyze {
        /// Statement file
        file: PathBuf,

        /// Skip the stress-analysis call and print aggregates only
        #[arg(long)]
        offline: bool,

        /// Keep transactions on or after this date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// Keep transactions on or before this date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,

        /// Keep a single category (exact match)
        #[arg(long)]
        category: Option<String>,

        /// Keep transactions of at least this amount
        #[arg(long)]
        min_amount: Option<f64>,

        /// Keep transactions of at most this amount
        #[arg(long)]
        max_amount: Option<f64>,
    },

    /// Run the full pipeline over synthetic demo data
    Demo {
        /// Skip the stress-analysis call and print aggregates only
        #[arg(long)]
        offline: bool,
    },

    /// Normalize a CSV statement and write it back out as CSV
    Export {
        /// Statement file (CSV)
        file: PathBuf,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage ~/.spendlens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the resolved config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            file,
            offline,
            start_date,
            end_date,
            category,
            min_amount,
            max_amount,
        } => {
            let filter = TransactionFilter {
                start_date,
                end_date,
                category,
                min_amount,
                max_amount,
            };
            analyze(file, offline, filter).await?;
        }

        Command::Demo { offline } => {
            demo(offline).await?;
        }

        Command::Export { file, out } => {
            export_statement(file, out)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

async fn analyze(file: PathBuf, offline: bool, filter: TransactionFilter) -> Result<()> {
    let transactions = match InputKind::from_path(&file)? {
        InputKind::Csv => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            parse_csv(&text).with_context(|| format!("parsing {}", file.display()))?
        }
        InputKind::Document(mime_type) => {
            if offline {
                bail!(
                    "{} needs the document-extraction call; --offline only works with CSV input",
                    file.display()
                );
            }
            let bytes =
                fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            println!("Extracting transaction data from document...\n");
            gemini_client()?
                .extract_transactions(&bytes, mime_type)
                .await?
        }
    };

    println!("Parsed {} transactions from {}\n", transactions.len(), file.display());

    let filtered = filter.apply(&transactions);
    if filtered.len() != transactions.len() {
        println!("Filters keep {} of {} transactions\n", filtered.len(), transactions.len());
    }

    report::print_aggregates(&filtered);

    if offline {
        println!("(offline: skipping stress analysis)");
        return Ok(());
    }

    println!("Analyzing behavior & stress patterns...\n");
    let analysis = gemini_client()?.analyze_spending(&filtered).await;
    report::print_analysis(&analysis);

    Ok(())
}

async fn demo(offline: bool) -> Result<()> {
    let transactions = generate_sample_data();
    println!("Generated {} synthetic transactions\n", transactions.len());

    report::print_aggregates(&transactions);

    if offline {
        println!("(offline: skipping stress analysis)");
        return Ok(());
    }

    println!("Analyzing behavior & stress patterns...\n");
    let analysis = gemini_client()?.analyze_spending(&transactions).await;
    report::print_analysis(&analysis);

    Ok(())
}

fn export_statement(file: PathBuf, out: Option<PathBuf>) -> Result<()> {
    if InputKind::from_path(&file)? != InputKind::Csv {
        bail!("export only works with CSV statements");
    }
    let text =
        fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
    let transactions =
        parse_csv(&text).with_context(|| format!("parsing {}", file.display()))?;

    match out {
        Some(path) => {
            let writer = fs::File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            export::write_csv(writer, &transactions)?;
            println!("Wrote {} transactions to {}", transactions.len(), path.display());
        }
        None => {
            export::write_csv(std::io::stdout(), &transactions)?;
        }
    }

    Ok(())
}

fn gemini_client() -> Result<GeminiClient> {
    let cfg = config::load_config()?;
    let api_key = config::resolve_api_key(&cfg)?;
    Ok(GeminiClient::new(api_key)
        .with_models(&cfg.gemini.extraction_model, &cfg.gemini.analysis_model)
        .with_base_url(&cfg.gemini.base_url))
}
