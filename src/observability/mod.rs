//! Observability for rowindex
//!
//! - Structured logging (JSON lines)
//! - Atomic registry counters
//! - Typed lifecycle events
//!
//! Observability is read-only: nothing here changes what a query returns.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{IndexMetrics, MetricsSnapshot};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
