//! HTTP interface of the relay

pub mod endpoints;
