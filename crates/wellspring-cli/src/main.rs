use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wellspring-cli", version, about = "Wellspring CLI")]
struct Cli {
    /// Evaluate progression as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a metric value for a day
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Spend from a resource pool
    Consume {
        /// Pool id (e.g. ink, energy)
        pool: String,
        /// Amount to consume
        amount: u32,
    },
    /// Print the current progression snapshot
    Snapshot {
        /// Emit JSON instead of the human summary
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Log { action } => commands::log::run(action, cli.as_of),
        Commands::Consume { pool, amount } => commands::consume::run(&pool, amount, cli.as_of),
        Commands::Snapshot { json } => commands::snapshot::run(json, cli.as_of),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
