mod api;
mod app;
mod application;
mod config;
mod domain;
mod ui;
mod utils;

use application::DownloadCoordinator;
use config::AppConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        base_url = %config.api.base_url,
        timeout = ?config.api.timeout,
        save_dir = ?config.save_dir,
        "starting"
    );

    let save_target = config.save_target();
    let client = api::ApiClient::new(config.api)?;
    let coordinator = DownloadCoordinator::new(client, save_target);

    iced::application(
        move || app::DownloadApp::new(coordinator.clone()),
        app::update,
        app::view,
    )
    .title("Quick Grab")
    .run()?;

    Ok(())
}
