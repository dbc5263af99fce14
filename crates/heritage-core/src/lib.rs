//! Core types and trait definitions for the Lombok heritage catalogue.
//!
//! This crate is deliberately free of HTTP and file-system dependencies.
//! Records arrive here as an already-fetched [`snapshot::Snapshot`]; the
//! analytics crate derives every view-model from that snapshot.

pub mod error;
pub mod geometry;
pub mod route;
pub mod site;
pub mod snapshot;
pub mod store;
pub mod tagging;

pub use error::{Error, Result};
