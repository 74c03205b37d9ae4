use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use finder_core::{
    AnalysisProgress, AnalysisRunner, Config, Criteria, FavoritesRepository, FileFavorites,
    MemoryFavorites, RiskLevel,
};

mod tui;

#[derive(Parser)]
#[command(name = "finder")]
#[command(about = "AI-powered discovery of token-less crypto projects", long_about = None)]
struct Cli {
    /// Keep favorites in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find and analyze one project
    Search {
        /// Risk profile to score against (safest, moderate, risky)
        #[arg(long, conflicts_with = "filters")]
        profile: Option<RiskLevel>,

        /// Custom filter; repeat for more. Implies custom mode
        #[arg(long = "filter", value_name = "NAME")]
        filters: Vec<String>,

        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the result as a favorite
        #[arg(long)]
        save: bool,
    },
    /// Manage saved projects
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Print the default configuration
    Config,
    /// Start the interactive interface (default)
    Tui,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List saved projects
    List,
    /// Print the full report of a saved project
    Show { name: String },
    /// Remove a saved project
    Remove { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load().wrap_err("failed to load configuration")?;
    let command = cli.command.unwrap_or(Commands::Tui);

    setup_tracing(&config, matches!(command, Commands::Tui))?;
    let favorites = open_favorites(&config, cli.ephemeral);

    match command {
        Commands::Search {
            profile,
            filters,
            output,
            save,
        } => {
            let criteria = if filters.is_empty() {
                Criteria::Profile(profile.unwrap_or(config.search.default_profile))
            } else {
                Criteria::Custom(filters)
            };
            search(&config, criteria, output, save, favorites.as_ref()).await
        }
        Commands::Favorites { action } => manage_favorites(action, favorites.as_ref()),
        Commands::Config => {
            print!("{}", Config::default_config_string());
            Ok(())
        }
        Commands::Tui => tui::run(config, favorites).await,
    }
}

/// Logs go to stderr, or to the log file while the TUI owns the terminal.
fn setup_tracing(config: &Config, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        let path = config.storage.log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    Ok(())
}

fn open_favorites(config: &Config, ephemeral: bool) -> Box<dyn FavoritesRepository> {
    if ephemeral {
        Box::new(MemoryFavorites::in_memory())
    } else {
        Box::new(FileFavorites::from_config(&config.storage))
    }
}

async fn search(
    config: &Config,
    criteria: Criteria,
    output: Option<PathBuf>,
    save: bool,
    favorites: &dyn FavoritesRepository,
) -> Result<()> {
    let runner = AnalysisRunner::from_config(&config.llm)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Finding a project ({})", criteria.describe()));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let updates = {
        let spinner = spinner.clone();
        tokio::spawn(async move {
            while let Some(progress) = rx.recv().await {
                if let Some(message) = progress_message(&progress) {
                    spinner.set_message(message);
                }
            }
        })
    };

    let outcome = runner.run_with_progress(&criteria, tx).await;
    let _ = updates.await;
    spinner.finish_and_clear();

    let result = outcome?;
    let report = result.to_markdown();
    println!("{}", report);

    if let Some(path) = output {
        fs::write(&path, &report)
            .wrap_err_with(|| format!("failed to write report to {}", path.display()))?;
        eprintln!("Report written to {}", path.display());
    }

    if save {
        favorites.add(&result);
        eprintln!("Saved '{}' to favorites", result.project_name);
    }

    Ok(())
}

fn progress_message(progress: &AnalysisProgress) -> Option<String> {
    match progress {
        AnalysisProgress::CallingService => Some("Scanning the web...".to_string()),
        AnalysisProgress::ParsingResponse { sources } => {
            Some(format!("Reading the analysis ({} sources)", sources))
        }
        _ => None,
    }
}

fn manage_favorites(action: FavoritesAction, favorites: &dyn FavoritesRepository) -> Result<()> {
    match action {
        FavoritesAction::List => {
            let list = favorites.list();
            if list.is_empty() {
                println!("You haven't favorited any projects yet.");
            }
            for project in list {
                println!(
                    "{:>3}  {}  {}",
                    project.overall_score, project.project_name, project.score_rationale
                );
            }
        }
        FavoritesAction::Show { name } => {
            let project = favorites
                .list()
                .into_iter()
                .find(|p| p.project_name == name)
                .ok_or_else(|| eyre!("no favorite named '{}'", name))?;
            println!("{}", project.to_markdown());
        }
        FavoritesAction::Remove { name } => {
            if !favorites.contains(&name) {
                return Err(eyre!("no favorite named '{}'", name));
            }
            favorites.remove(&name);
            println!("Removed '{}' from favorites", name);
        }
    }
    Ok(())
}
