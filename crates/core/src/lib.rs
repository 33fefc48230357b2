#![deny(unused)]
//! Core types, traits, and error definitions for Convogate.
//!
//! This crate provides the building blocks shared by the gateway and the
//! backend client: the query/response data model, the `SessionClient`
//! collaborator seam, configuration, and mock collaborators for tests.

pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
