//! CME travel concierge service
//!
//! Streaming LLM chat over a set of travel-planning tools (flights, hotels,
//! entertainment, course lookup, plan generation) with SQLite persistence.

pub mod chat;
pub mod config;
pub mod core;
pub mod error;
pub mod server;
pub mod store;
pub mod tools;
