use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "proactive-cli", version, about = "ProActive board prioritization CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// All tasks ranked by priority, with statistics
    Tasks,
    /// The single highest-priority task and why
    Next,
    /// Derived views over the ranked board
    View {
        #[command(subcommand)]
        view: commands::board::ViewKind,
    },
    /// Project summary: status, completion, health indicators
    Summary,
    /// Average factor scores across the board
    Breakdown,
    /// Model analysis of one task
    Analyze {
        /// Board card id
        task_id: String,
    },
    /// Model risk prediction for the project
    Risk,
    /// Model recommendations over the top tasks
    Recommend,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Tasks => commands::board::tasks().await,
        Commands::Next => commands::board::next().await,
        Commands::View { view } => commands::board::view(view).await,
        Commands::Summary => commands::board::summary().await,
        Commands::Breakdown => commands::board::breakdown().await,
        Commands::Analyze { task_id } => commands::insights::analyze(&task_id).await,
        Commands::Risk => commands::insights::risk().await,
        Commands::Recommend => commands::insights::recommend().await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
