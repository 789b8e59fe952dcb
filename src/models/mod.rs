//! API data models
//!
//! This module contains the chat-completion structures shared by the probes
//! and the relay.

pub mod chat;
