//! Mortimer Backend API
//!
//! Client side of the single backend endpoint. Every request is a JSON POST
//! of an action envelope to `/mortimer/api`.
//!
//! # Actions
//!
//! - `get_sessions` - `{"sessions": ...}`
//! - `check_images` - `{"image_paths": [...]}`
//! - `mark_grid` - `OK`
//! - `move_grid` - `OK`
//!
//! # Example
//!
//! ```rust,no_run
//! use mortimer::api::{ApiClient, HttpTransport, RequestPolicy};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new(
//!         "http://localhost:5000",
//!         Duration::from_secs(30),
//!         RequestPolicy::default(),
//!     )?;
//!     let client = ApiClient::new(transport);
//!
//!     let sessions = client.get_sessions().await?;
//!     println!("{sessions}");
//!     Ok(())
//! }
//! ```

mod client;
mod error;
#[cfg(feature = "client")]
mod http;
#[cfg(test)]
pub(crate) mod mock;
mod request;

pub use client::{decode_sessions, ApiClient, ApiResponse, Transport};
pub use error::{ApiError, ApiResult};
#[cfg(feature = "client")]
pub use http::HttpTransport;
pub use request::{
    ApiRequest, CacheMode, Credentials, Redirect, ReferrerPolicy, RequestMode, RequestPolicy,
    DEFAULT_ENDPOINT,
};
