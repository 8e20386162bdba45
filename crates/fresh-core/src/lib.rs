//! # fresh-core
//!
//! Core types for the Fresh markup converters.
//! This crate holds what every other crate shares: the parsed markup tree,
//! the error type, and the conversion configuration.

pub mod config;
pub mod error;
pub mod node;

pub use config::*;

pub use error::{FreshError, FreshResult};
pub use node::{Attribute, Node};
