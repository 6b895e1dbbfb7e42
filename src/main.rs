//! Mortimer headless shell
//!
//! Starts the application the way the browser client does: requests the
//! session list, mounts at the initial location, then reports what loaded.
//! The initial location can be passed as the first argument.

use mortimer::{logging, App, Config, HttpTransport, SessionsState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = Config::load_default();
    if let Some(location) = std::env::args().nth(1) {
        config.app.initial_path = Some(location);
    }

    logging::init(&config.logging, None);

    tracing::info!("Mortimer v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}{}", config.api.url, config.api.endpoint);

    let transport = HttpTransport::from_config(&config.api)?;
    let mounted = App::start(config, transport).await?;

    match &mounted.route {
        Some(route) => tracing::info!(
            route = %route.name,
            view = route.view.as_str(),
            params = ?route.params,
            "Initial route"
        ),
        None => tracing::warn!(
            location = mounted.app.router().location(),
            "Initial location is outside the router base"
        ),
    }

    let (_app, sessions) = mounted.join_bootstrap().await?;

    match &sessions {
        SessionsState::Loaded { .. } => {
            let names = sessions.session_names();
            tracing::info!("{} sessions available", names.len());
            for name in names {
                println!("{name}");
            }
        }
        SessionsState::Failed { error, .. } => {
            tracing::error!("Session list unavailable: {}", error);
        }
        _ => {}
    }

    Ok(())
}
