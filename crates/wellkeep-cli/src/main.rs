use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;
use wellkeep_core::{Config, ThemeMode};

mod commands;

#[derive(Parser)]
#[command(name = "wellkeep", version, about = "Wellkeep CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Journal entries and analysis
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Show the active color palette
    Theme {
        /// Palette to show instead of the configured one (light or dark)
        #[arg(long)]
        mode: Option<ThemeMode>,
        /// Switch the configured theme and save it
        #[arg(long, conflicts_with = "mode")]
        toggle: bool,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config);
    if let Some(e) = load_error {
        tracing::warn!("falling back to default config: {e}");
    }

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action, &config),
        Commands::Journal { action } => commands::journal::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Theme { mode, toggle } => commands::theme::run(mode, toggle, &config),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "wellkeep", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
