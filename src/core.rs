//! Core services module.
//!
//! This module provides access to the error taxonomy, the process-wide
//! registry, the configuration handle and the benchmark timer.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "core")]
//! use pagelib::core::exception::Error;
//! # #[cfg(feature = "core")]
//! use pagelib::core::BenchmarkTimer;
//! ```

#[cfg(feature = "core")]
pub use pagelib_core::*;
