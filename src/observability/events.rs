//! Observable registry events

use std::fmt;

use super::logger::Severity;

/// Observable events emitted by an `IndexRegistry`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A new index was built under a fresh key
    IndexCreated,
    /// An index was rebuilt over an existing key
    IndexReplaced,
    /// An index was removed by key
    IndexDropped,
    /// `create_index` returned an error
    IndexBuildRejected,
    /// The row snapshot was swapped and all indexes cleared
    SourceReplaced,
    /// `update_source` was called without a snapshot
    SourceRejected,
    /// A lookup named a live key with the wrong value type
    LookupTypeMismatch,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::IndexCreated => "INDEX_CREATED",
            Event::IndexReplaced => "INDEX_REPLACED",
            Event::IndexDropped => "INDEX_DROPPED",
            Event::IndexBuildRejected => "INDEX_BUILD_REJECTED",
            Event::SourceReplaced => "SOURCE_REPLACED",
            Event::SourceRejected => "SOURCE_REJECTED",
            Event::LookupTypeMismatch => "LOOKUP_TYPE_MISMATCH",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::IndexBuildRejected | Event::SourceRejected | Event::LookupTypeMismatch => {
                Severity::Warn
            }
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
