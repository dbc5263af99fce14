//! Snapshot sources for the heritage analytics server.
//!
//! [`JsonFileSource`] re-reads a JSON export of the data store on every call,
//! so each request sees the records as they are now. [`MemorySource`] serves a
//! fixed snapshot and is used by tests and embedders.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{JsonFileSource, MemorySource};
