//! REST client for the hosted backend

pub mod client;
pub mod query;

pub use client::{GatewayClient, Table};
pub use query::TableQuery;
