//! Request validation and response shaping for the relay

pub mod request_converter;
pub mod response_converter;
