use thiserror::Error;

#[derive(Debug, Error)]
pub enum FacetError {
    #[error("facet `{facet}` already registered for this representation")]
    AlreadyRegistered { facet: String },

    #[error("no `{facet}` facet registered for this representation")]
    NoSuchFacet { facet: String },

    #[error("registered `{facet}` vtable has the wrong concrete type")]
    DowncastFailed { facet: String },
}

impl FacetError {
    /// Facet registration/lookup failures are programming errors in a
    /// crate's own startup wiring, not user-triggerable — but they are still
    /// non-fatal to a running REPL session (§7): the caller can report and
    /// move on rather than aborting the process.
    pub fn is_fatal(&self) -> bool {
        false
    }
}

pub type FacetResult<T> = std::result::Result<T, FacetError>;
