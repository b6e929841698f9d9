//! Error Module — collector error types.
//!
//! Narrowed to the failure modes a single-threaded, stop-the-world
//! collector can actually produce: no lock poisoning, no NUMA/TLAB
//! plumbing, no concurrent-modification detection (there is exactly one
//! mutator and it never runs during a collection).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GcError {
    #[error("out of memory: requested {requested} bytes, {available} available after collection")]
    OutOfMemory { requested: usize, available: usize },

    #[error("heap initialization failed: {0}")]
    HeapInitialization(String),

    #[error("invalid pointer address: {address:#x}")]
    InvalidPointer { address: usize },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal collector error: {0}")]
    Internal(String),
}

impl GcError {
    /// §7: out-of-memory and a broken heap abort the process; a bad config
    /// value is caught and reported before anything is allocated.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GcError::OutOfMemory { .. } | GcError::Internal(_))
    }
}

pub type GcResult<T> = std::result::Result<T, GcError>;
