//! Shared primitives

mod streaming;

pub use streaming::{SseDecoder, SseItem};
