//! Registry configuration

use crate::observability::Severity;

/// What `create_index` does when the key is already live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// Replace the existing index, even if it holds another value type
    #[default]
    Overwrite,
    /// Refuse with `IndexError::DuplicateKey`
    Reject,
}

/// Configuration for an `IndexRegistry`.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Policy for re-creating a live key.
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Whether lifecycle events are written through the JSON logger.
    pub log_events: bool,
    /// Events below this severity are not logged.
    pub min_log_severity: Severity,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeyPolicy::Overwrite,
            log_events: false, // Libraries stay quiet unless asked
            min_log_severity: Severity::Info,
        }
    }
}

impl RegistryConfig {
    /// Reject duplicate keys instead of overwriting.
    pub fn strict() -> Self {
        Self {
            duplicate_keys: DuplicateKeyPolicy::Reject,
            ..Self::default()
        }
    }

    /// Enable event logging at or above `min_severity`.
    pub fn with_logging(mut self, min_severity: Severity) -> Self {
        self.log_events = true;
        self.min_log_severity = min_severity;
        self
    }

    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Whether an event at `severity` should be logged
    pub fn should_log(&self, severity: Severity) -> bool {
        self.log_events && severity >= self.min_log_severity
    }
}
