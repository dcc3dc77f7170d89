use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sched_cli::clock::LiveClock;
use sched_cli::commands::{favorite, favorites, schedule, show, types, util, watch};
use sched_cli::{Cli, Commands, Config, FavoritesBackend};
use sched_core::{Clock, FavoritesStore, InclusionPolicy, SelectionState, SystemClock};

/// Load favorites, in memory only if the database cannot be opened.
fn open_favorites(config: &Config) -> FavoritesStore<FavoritesBackend> {
    FavoritesStore::load(FavoritesBackend::open(&config.database_path))
}

fn timezone_name() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|err| {
        tracing::debug!(error = %err, "could not determine local timezone");
        "local time".to_string()
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn run<W: Write>(writer: &mut W, command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Schedule {
            selection,
            no_service_sessions,
            json,
        } => {
            let favorites = open_favorites(config);
            let mut state = util::load_schedule(config).await;
            let policy = InclusionPolicy {
                include_service_sessions: config.include_service_sessions && !no_service_sessions,
            };
            schedule::run(
                writer,
                &mut state,
                favorites.set(),
                &SelectionState::from(selection),
                policy,
                SystemClock.now(),
                json,
            )?;
        }
        Commands::Show { event } => {
            let favorites = open_favorites(config);
            let state = util::load_schedule(config).await;
            show::run(writer, &state, favorites.set(), &event)?;
        }
        Commands::Favorite { event } => {
            let mut favorites = open_favorites(config);
            let state = util::load_schedule(config).await;
            favorite::run(writer, &state, &mut favorites, &event)?;
        }
        Commands::Favorites { json } => {
            let favorites = open_favorites(config);
            favorites::run(writer, &favorites, json)?;
        }
        Commands::Types => {
            let state = util::load_schedule(config).await;
            types::run(writer, &state)?;
        }
        Commands::Watch { selection } => {
            let favorites = open_favorites(config);
            let state = util::load_schedule(config).await;
            let clock = LiveClock::start(SystemClock);
            watch::run(
                writer,
                &state,
                favorites.set(),
                &SelectionState::from(selection),
                clock,
                &timezone_name(),
                shutdown_signal(),
            )
            .await?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let mut stdout = std::io::stdout().lock();
    runtime.block_on(run(&mut stdout, command, &config))
}
