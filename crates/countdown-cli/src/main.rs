use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod alerts;
mod commands;
mod keys;
mod terminal;

#[derive(Parser)]
#[command(name = "countdown", version, about = "Countdown timer")]
struct Cli {
    /// Log state transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive countdown
    Run(commands::run::RunArgs),
    /// Play the completion alert once
    Chime,
    /// Print how a number of seconds is displayed
    Format {
        /// Remaining seconds
        secs: u64,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("COUNTDOWN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Chime => commands::chime::run(),
        Commands::Format { secs } => commands::format::run(secs),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "countdown", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
