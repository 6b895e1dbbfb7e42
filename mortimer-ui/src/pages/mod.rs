//! Pages
//!
//! Top-level page components for each route.

pub mod grid;
pub mod home;
pub mod session;

pub use grid::GridView;
pub use home::Home;
pub use session::SessionView;
