//! Chat orchestration: provider abstraction, streaming, and the agentic loop

pub mod orchestrator;
pub mod provider;
pub mod stream;
pub mod title;

pub use orchestrator::{process_chat, ChatTurn, TRAVEL_CONCIERGE_PROMPT};
