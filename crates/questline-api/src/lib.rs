// questline-api: Async Rust client for the quest GraphQL API.

pub mod client;
pub mod error;
mod query;
pub mod transport;
pub mod types;

pub use client::QuestsClient;
pub use error::Error;
pub use transport::TransportConfig;
