//! State Management
//!
//! Shared application state and the session list it carries.

mod sessions;
mod store;

pub use sessions::{
    grid_info, grid_names, session_names, session_path, session_record, GridInfo, SessionsState,
};
pub use store::{AppState, SessionsWriter};
