//! # Mortimer
//!
//! Session browser for screening runs. The core of the single-page client:
//! route resolution, the shared session store and the startup request that
//! hydrates it.
//!
//! ## Modules
//!
//! - [`router`]: Ordered route table, reverse routing and history
//! - [`state`]: Shared application state and the session list tri-state
//! - [`api`]: Request envelope, fetch policy and typed backend client
//! - [`bootstrap`]: One-shot session hydration on start
//! - `app`: Application shell tying the above together (`client` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mortimer::{App, Config, HttpTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let transport = HttpTransport::from_config(&config.api)?;
//!
//!     // Mounts immediately; the session list arrives in the background
//!     let mounted = App::start(config, transport).await?;
//!     println!("Mounted at {:?}", mounted.route.as_ref().map(|r| &r.name));
//!
//!     let (_app, sessions) = mounted.join_bootstrap().await?;
//!     println!("Sessions: {:?}", sessions.session_names());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bootstrap;
pub mod router;
pub mod state;

#[cfg(feature = "client")]
pub mod app;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod logging;

// Re-export top-level types for convenience
pub use api::{
    decode_sessions, ApiClient, ApiError, ApiRequest, ApiResponse, ApiResult, RequestPolicy,
    Transport, DEFAULT_ENDPOINT,
};

pub use router::{
    routes, Resolved, RouteError, RouteParams, RoutePattern, RouteTable, Router, View,
};

pub use state::{AppState, GridInfo, SessionsState, SessionsWriter};

#[cfg(feature = "client")]
pub use api::HttpTransport;

#[cfg(feature = "client")]
pub use app::{App, AppError, MountPoint, MountedApp};

#[cfg(feature = "client")]
pub use config::{Config, ConfigError, LoggingConfig};
