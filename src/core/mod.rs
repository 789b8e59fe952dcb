//! Core application modules
//!
//! This module contains configuration, constants, logging, the model
//! catalog, the probe runner, and the relay providers.

pub mod config;
pub mod constants;
pub mod logging;
pub mod model_catalog;
pub mod probe;
pub mod provider;
pub mod providers;
