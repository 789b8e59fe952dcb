//! Wisdom Gate chat probes and local relay
//!
//! The probe binaries send a single chat-completion request and print the raw
//! response for inspection. The relay exposes `/api/chat` on a local
//! port and forwards requests to the Wisdom Gate API.

pub mod api;
pub mod conversion;
pub mod core;
pub mod models;
