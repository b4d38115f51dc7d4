use hs_auth::ShutdownCoordinator;
use hs_config::Config;
use hs_portal::{Cli, Command, Portal, logger, render_outcome, shell};

use std::error::Error;

use clap::Parser;
use log::{error, info};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Load and validate configuration
    let config = match cli.config_dir {
        Some(dir) => Config::load_from(dir)?,
        None => Config::load()?,
    };
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path(),
        config.logging.colored,
    )?;

    info!("Starting hs-portal v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let mut portal = Portal::build(&config).await?;

    let start = cli.start.unwrap_or_else(|| config.routes.home.clone());
    if let hs_portal::Reply::Navigated(outcome) = portal.execute(Command::Go(start)).await? {
        println!("{}", render_outcome(&outcome));
    }

    // Ctrl-C ends the shell; the auth context is torn down below
    let shutdown = ShutdownCoordinator::new();
    let guard = shutdown.subscribe_guard();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let input = BufReader::new(tokio::io::stdin());
    let result = shell::run(&mut portal, input, tokio::io::stdout(), guard).await;

    portal.shutdown().await;
    info!("Portal stopped");

    Ok(result?)
}
