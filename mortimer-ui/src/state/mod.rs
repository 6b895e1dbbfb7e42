//! State Management
//!
//! Global application state and the startup session request.

pub mod global;

pub use global::{bootstrap_sessions, provide_global_state, GlobalState};
