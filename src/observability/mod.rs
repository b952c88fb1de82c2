//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging with field-annotated events
//! - Metrics are cheap (atomic increments) and low-cardinality
//! - The metrics exporter runs on its own listener, away from the API

pub mod logging;
pub mod metrics;
