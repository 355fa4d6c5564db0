use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "medicat", version, about = "MediCat medicine reminder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Medicine management
    Medicine {
        #[command(subcommand)]
        action: commands::medicine::MedicineAction,
    },
    /// Doses due right now
    Due {
        /// Evaluate at this local time instead of now ("YYYY-MM-DD HH:MM")
        #[arg(long)]
        at: Option<String>,
    },
    /// Record, undo and list taken doses
    Intake {
        #[command(subcommand)]
        action: commands::intake::IntakeAction,
    },
    /// Taken/total doses of a medicine for a day
    Progress {
        /// Medicine ID
        medicine_id: String,
        /// Day to report (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Reload periodically and print the due set when it changes
    Watch {
        /// Seconds between reloads (default from config)
        #[arg(long)]
        interval: Option<u64>,
        /// Stop after this many reloads
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MEDICAT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Medicine { action } => commands::medicine::run(action),
        Commands::Due { at } => commands::due::run(at.as_deref()),
        Commands::Intake { action } => commands::intake::run(action),
        Commands::Progress { medicine_id, date } => {
            commands::progress::run(&medicine_id, date.as_deref())
        }
        Commands::Watch { interval, ticks } => commands::watch::run(interval, ticks),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
