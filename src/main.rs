//! # raspberry-awards Main Entry Point

use anyhow::{Context, Result};
use raspberry_awards::app::io::{TerminalEventStream, TerminalRenderStream};
use raspberry_awards::cmd_args::CommandLineArgs;
use raspberry_awards::config::{self, Settings};
use raspberry_awards::{AppController, AppViewModel, EventBus, MovieService, SimpleEventBus};
use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(&cmd_args)?;

    let profile_name = cmd_args.profile();
    let profile_path = config::get_profile_path();
    let settings = Settings::load(&profile_path, profile_name)?;
    tracing::info!(
        "Starting with profile '{}' against {}",
        profile_name,
        settings.api_base_url
    );

    let source = Arc::new(MovieService::new(settings.api_base_url.clone()));
    let mut view_model = AppViewModel::new(source, settings.movies_settings());
    let mut event_bus = SimpleEventBus::new();
    event_bus.subscribe_to_model_events(Box::new(|event| {
        tracing::trace!("Model event: {:?}", event);
    }));
    view_model.set_event_bus(Box::new(event_bus));

    let mut app = AppController::with_io_streams(
        view_model,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await?;

    tracing::info!("Exiting");
    Ok(())
}

fn init_tracing_subscriber(cmd_args: &CommandLineArgs) -> Result<()> {
    let mut filter = EnvFilter::from_env(config::LOG_LEVEL_ENV_VAR)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("tokio=warn".parse()?)
        .add_directive("rustls=warn".parse()?);
    if cmd_args.verbose() {
        filter = filter.add_directive("raspberry_awards=debug".parse()?);
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(false);

    // The interface owns the terminal, so logs always go to a file
    let path = config::get_log_path(cmd_args.log_file());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory '{}'", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
    builder.with_writer(Mutex::new(file)).init();
    Ok(())
}
