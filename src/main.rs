//! Nudge CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nudge::cli::{
    app::{load_merged_config, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    run_oneshot, run_screen, ReminderOptions,
};
use nudge::domain::config::AppConfig;
use nudge::domain::reminder::Delay;
use nudge::infrastructure::{NotificationBackend, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Parse delay up front so bad input is a usage error
    let delay = match cli.delay.as_deref().map(str::parse::<Delay>) {
        Some(Ok(delay)) => Some(delay),
        Some(Err(e)) => {
            presenter.error(&format!("Invalid delay: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => None,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        delay: delay.map(|d| d.as_secs() as u8),
        backend: cli.backend.clone(),
        ..Default::default()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let backend = match config.backend_or_default().parse::<NotificationBackend>() {
        Ok(backend) => backend,
        Err(e) => {
            presenter.error(&format!("Invalid backend: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let options = ReminderOptions {
        message: cli.message.clone().unwrap_or_default(),
        delay: config.delay_or_default(),
        backend,
        app_name: config.app_name_or_default().to_string(),
        permission_mode: config.permission_mode_or_default(),
    };

    // Route to appropriate handler
    if cli.screen {
        run_screen(options).await
    } else {
        run_oneshot(options).await
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only)
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
