//! # Pagelib Core
//!
//! Framework-wide base services consumed by the template engine and by
//! embedding applications:
//!
//! - [`BenchmarkTimer`] - instrumentation spans started and stopped by
//!   string id
//! - [`Registry`] - process-wide named values, grouped by namespace
//! - [`Configuration`] - the opaque configuration handle the engine reads
//!   section/key lookups from, plus an in-memory implementation
//!
//! All services are explicit values handed to the application; none of them
//! is a global singleton. Registries are populated at bootstrap and treated
//! as read-mostly afterwards.

pub mod benchmark;
pub mod config;
pub mod registry;

pub use benchmark::BenchmarkTimer;
pub use config::{Configuration, InMemoryConfiguration};
pub use registry::Registry;

// Re-export the exception crate under the path the facade exposes
pub use pagelib_exception as exception;
pub use pagelib_exception::{Error, Result};
