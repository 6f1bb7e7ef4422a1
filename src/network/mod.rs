//! HTTP networking module
//!
//! Provides HTTP client functionality for calling upstream providers.

mod client;

pub use client::{HttpClient, USER_AGENT};
