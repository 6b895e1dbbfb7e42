//! Application Shell
//!
//! Ties state, router and bootstrap together. `App::start` fires the
//! session request, mounts at the configured element and returns without
//! waiting for the request unless `bootstrap.block_until_loaded` is set.

use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::api::{ApiClient, ApiError, Transport};
use crate::bootstrap;
use crate::config::Config;
use crate::router::{self, Resolved, RouteError, Router, View};
use crate::state::{AppState, SessionsState};

/// Errors raised while assembling or starting the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid mount point {0:?}: expected an id selector like \"#app\"")]
    InvalidMountPoint(String),

    #[error("Route table error: {0}")]
    Route(#[from] RouteError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Sessions writer already claimed")]
    WriterClaimed,

    #[error("Bootstrap task failed: {0}")]
    Bootstrap(String),
}

/// An `#id` element selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint(String);

impl MountPoint {
    pub fn parse(selector: &str) -> Result<Self, AppError> {
        let id = selector
            .strip_prefix('#')
            .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
            .ok_or_else(|| AppError::InvalidMountPoint(selector.to_string()))?;
        Ok(Self(id.to_string()))
    }

    /// Element id without the `#`
    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn selector(&self) -> String {
        format!("#{}", self.0)
    }
}

/// Application state plus navigation
pub struct App {
    config: Arc<Config>,
    state: AppState,
    router: Router<View>,
    mount_point: MountPoint,
}

impl App {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let table = router::routes(&config.router.base_url)?;
        let mount_point = MountPoint::parse(&config.app.mount_point)?;
        let router = Router::new(table, &config.initial_path());

        Ok(Self {
            config: Arc::new(config),
            state: AppState::new(),
            router,
            mount_point,
        })
    }

    /// Start the app: request sessions in the background, then mount
    pub async fn start<T>(config: Config, transport: T) -> Result<MountedApp, AppError>
    where
        T: Transport + 'static,
    {
        let app = Self::new(config)?;
        let client = Arc::new(
            ApiClient::new(transport).with_endpoint(app.config.api.endpoint.clone()),
        );

        let bootstrap =
            bootstrap::spawn(&app.state, client).ok_or(AppError::WriterClaimed)?;

        if app.config.bootstrap.block_until_loaded {
            let settled = app.state.wait_settled().await;
            tracing::debug!(status = settled.status(), "Sessions settled before mount");
        }

        let route = app.router.current();
        tracing::info!(
            mount_point = %app.mount_point.selector(),
            location = app.router.location(),
            route = route.as_ref().map(|r| r.name.as_str()).unwrap_or("-"),
            "Application mounted"
        );

        Ok(MountedApp {
            app,
            route,
            bootstrap,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> &Router<View> {
        &self.router
    }

    pub fn mount_point(&self) -> &MountPoint {
        &self.mount_point
    }

    /// Navigate and return the new route
    pub fn navigate(&mut self, location: &str) -> Option<Resolved<View>> {
        self.router.push(location)
    }
}

/// A started application
pub struct MountedApp {
    pub app: App,
    /// Route resolved at mount
    pub route: Option<Resolved<View>>,
    bootstrap: JoinHandle<SessionsState>,
}

impl MountedApp {
    pub fn state(&self) -> &AppState {
        self.app.state()
    }

    /// Whether the bootstrap request has finished
    pub fn bootstrap_finished(&self) -> bool {
        self.bootstrap.is_finished()
    }

    /// Wait for the bootstrap task and return the settled state
    pub async fn join_bootstrap(self) -> Result<(App, SessionsState), AppError> {
        let state = self
            .bootstrap
            .await
            .map_err(|e| AppError::Bootstrap(e.to_string()))?;
        Ok((self.app, state))
    }
}
