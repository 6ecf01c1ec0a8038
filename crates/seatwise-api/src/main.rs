//! `seatwise` binary entry point.

use clap::Parser;

use seatwise_api::cli::{Cli, Command};
use seatwise_api::config_handlers::handle_config_command;
use seatwise_api::handlers::local_advice::render_local_advice;
use seatwise_api::validation::LocalAdviceRequest;
use seatwise_api::{AppState, ConfigManager, SeatwiseConfig, serve};
use seatwise_core::DataDir;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,seatwise=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Serve { host, port } => {
            let mut config = SeatwiseConfig::load(config_path)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let addr = config.bind_addr();
            tracing::info!(
                data_dir = %config.data.dir.display(),
                mock_upstream = config.mock_upstream,
                "Starting Seatwise"
            );
            let state = AppState::from_config(config)?;
            serve(state, &addr).await?;
        }
        Command::Config { action } => handle_config_command(config_path, action)?,
        Command::Advise { standard, range } => {
            let config = SeatwiseConfig::load(config_path)?;
            let query = LocalAdviceRequest {
                standard: Some(standard),
                height_range: Some(range.clone()),
                weight_range: Some(range),
            }
            .validate()?;
            let text = render_local_advice(&DataDir::new(config.data.dir), &query).await?;
            println!("{text}");
        }
    }
    Ok(())
}
