#![deny(unused)]
//! Production Session Client for Convogate.
//!
//! Speaks the detect-intent REST contract over a shared reqwest client.
//! The connection pool makes one instance safe for concurrent use by
//! many in-flight requests, and dropping a request future aborts its
//! in-flight call.

pub mod client;
pub mod wire;

pub use client::HttpSessionClient;
