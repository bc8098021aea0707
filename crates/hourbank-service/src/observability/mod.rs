//! Observability for the hour-bank service.
//!
//! Metrics go through the [`metrics`] facade with a Prometheus exporter
//! installed at startup. Logging uses `tracing`; identity keys and passwords
//! never appear in log fields.

pub mod metrics;
