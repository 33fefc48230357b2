#![deny(unused)]
//! HTTP entry point for Convogate.
//!
//! This crate provides the dispatch layer: multipart query handlers over
//! a shared `SessionClient`, plus the Query Builder and the Response
//! Normalizer they are built from.

pub mod normalize;
pub mod query;
pub mod server;

pub use normalize::normalize;
pub use query::QueryBuilder;
pub use server::{GatewayConfig, GatewayServer};
