use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "vitrine", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Synchronize artwork records with Wikidata
    ///
    /// Reads a JSON file containing one artwork record or an array of
    /// records, then processes each record in order:
    ///
    /// - Builds the fixed statement set from the record fields
    /// - Looks up an existing item by accession number via SPARQL
    /// - Creates a new item, or additively reconciles the existing one
    ///
    /// Claims are only ever added, never removed or edited in place.
    /// Each record's report is printed as it completes. With --output,
    /// the records (with Wikidata item URLs recorded on success) are
    /// written back as JSON in their original order.
    ///
    /// Requires bot credentials in the config file or VITRINE_*
    /// environment variables; run 'vitrine config init' to start.
    Sync {
        /// Path to the JSON record file
        file: PathBuf,

        /// Write the synced records (with item URLs) to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Look up the Wikidata item for an accession number
    Lookup {
        /// The accession number to search for
        accession: String,
    },
    /// Build and print statements for records without touching Wikidata
    Preview {
        /// Path to the JSON record file
        file: PathBuf,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Write a starter config file if none exists
    Init,
    /// Show the effective configuration (password redacted)
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Sync { file, output } => {
            commands::run_sync(file, output).await?;
        }
        Commands::Lookup { accession } => {
            commands::run_lookup(&accession).await?;
        }
        Commands::Preview { file } => {
            commands::run_preview(file)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config_init()?,
            ConfigAction::Show => commands::config_show()?,
        },
    }

    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => twyg::LogLevel::Info,
        1 => twyg::LogLevel::Debug,
        _ => twyg::LogLevel::Trace,
    };
    let opts = twyg::OptsBuilder::new()
        .coloured(true)
        .level(level)
        .report_caller(false)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build logger options: {e}"))?;
    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Failed to set up logger: {e}"))?;
    Ok(())
}
