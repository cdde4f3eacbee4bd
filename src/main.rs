use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use studyxp::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "studyxp")]
#[command(about = "XP, levels, streaks and achievements for your study sessions")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.studyxp/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show XP, level, streak and titles
    Status,

    /// Award XP for an activity
    Award {
        /// XP to award
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        amount: u64,

        /// What the XP is for (e.g. "Solved: Two Sum")
        #[arg(required = true, num_args = 1..)]
        reason: Vec<String>,
    },

    /// Record today's activity for the streak without awarding XP
    Activity,

    /// Unlock an achievement by id
    Unlock { id: String },

    /// List achievements
    Achievements {
        /// Only show achievements not yet unlocked
        #[arg(long)]
        locked: bool,
    },

    /// List earned titles, or wear one
    Title { title: Option<String> },

    /// Show recent XP awards
    History {
        /// Number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show or change preferences
    Prefs {
        /// Daily XP goal
        #[arg(long)]
        goal: Option<u64>,

        /// Celebrate level-ups and unlocks
        #[arg(long)]
        celebrations: Option<cli::prefs::Toggle>,

        /// Play sounds
        #[arg(long)]
        sound: Option<cli::prefs::Toggle>,
    },

    /// Reset all progress and achievements
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::Init { force }) = cli.command {
        let path = cli.config.unwrap_or_else(Config::global_config_path);
        return cli::init::init_command(&path, force);
    }

    let config = Config::load(cli.config.as_deref())?;
    let mut store = config.open_store()?;

    match cli.command {
        Some(Commands::Award { amount, reason }) => {
            cli::award::award_command(&mut store, amount, &reason.join(" "));
        }
        Some(Commands::Activity) => {
            cli::award::activity_command(&mut store);
        }
        Some(Commands::Unlock { id }) => {
            cli::achievements::unlock_command(&mut store, &id);
        }
        Some(Commands::Achievements { locked }) => {
            cli::achievements::list_command(&store, locked);
        }
        Some(Commands::Title { title }) => {
            cli::title::title_command(&mut store, title.as_deref());
        }
        Some(Commands::History { limit }) => {
            cli::status::history_command(&store, limit);
        }
        Some(Commands::Prefs {
            goal,
            celebrations,
            sound,
        }) => {
            cli::prefs::prefs_command(&mut store, goal, celebrations, sound);
        }
        Some(Commands::Reset { yes }) => {
            cli::reset::reset_command(&mut store, yes);
        }
        Some(Commands::Status) | Some(Commands::Init { .. }) | None => {
            cli::status::status_command(&store);
        }
    }

    Ok(())
}
