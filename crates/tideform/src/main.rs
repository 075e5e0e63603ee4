mod commands;
mod files;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tideform")]
#[command(about = "Declarative App Platform apps from the command line", long_about = None)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a resource configuration against the schema
    Validate {
        /// Resource configuration (JSON)
        config: PathBuf,
    },
    /// Show what an apply would do
    Plan {
        /// Resource configuration (JSON)
        config: PathBuf,
        /// State file from a previous run
        #[arg(short, long)]
        state: Option<PathBuf>,
        /// Plan removal of the resource
        #[arg(long)]
        destroy: bool,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create the app and wait for its first deployment
    Create {
        /// Resource configuration (JSON)
        config: PathBuf,
        /// State file to write
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Refresh the state from the vendor
    Read {
        /// State file to refresh
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Push a changed spec and wait for the deployment
    Update {
        /// Resource configuration (JSON)
        config: PathBuf,
        /// State file from a previous run
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Delete the app
    Delete {
        /// State file from a previous run
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Look up an existing app by id
    DataSource {
        /// App id
        #[arg(long)]
        app_id: String,
    },
    /// Show version
    Version,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    // stdout carries state JSON, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Version => {
            println!("tideform {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Validate { config } => commands::validate::handle(&config),
        Commands::Plan {
            config,
            state,
            destroy,
            json,
        } => commands::plan::handle(&config, state.as_deref(), destroy, json),
        Commands::Create { config, state } => commands::lifecycle::create(&config, &state).await,
        Commands::Read { state } => commands::lifecycle::read(&state).await,
        Commands::Update { config, state } => commands::lifecycle::update(&config, &state).await,
        Commands::Delete { state } => commands::lifecycle::delete(&state).await,
        Commands::DataSource { app_id } => commands::data_source::handle(&app_id).await,
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}
