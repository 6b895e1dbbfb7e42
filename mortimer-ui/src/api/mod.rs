//! Backend access for the browser client

pub mod client;

pub use client::{client, endpoint, FetchTransport};
