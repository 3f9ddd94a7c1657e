//! # Utility Modules
//!
//! Supporting utilities for identifiers, logging and metrics.
//!
//! ## Components
//! - **Id**: injectable recipe id generators
//! - **Logging**: `tracing-subscriber` setup driven by [`crate::config::LoggingConfig`]
//! - **Metrics**: thread-safe codec counters

pub mod id;
pub mod logging;
pub mod metrics;

pub use id::{IdGenerator, RandomIds, SeededIds, SequentialIds};
