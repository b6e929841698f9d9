use thiserror::Error;

/// Errors surfaced while resolving or unifying types.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("unknown primitive type name `{name}`")]
    UnknownPrimitive { name: String },

    #[error("type mismatch: cannot convert `{from}` to `{to}`")]
    TypeMismatch { from: String, to: String },

    #[error("type `{name}` referenced before it was resolved")]
    Unresolved { name: String },
}

impl TypesError {
    /// All type errors are recoverable at the REPL/batch boundary — they
    /// abort the current top-level form, not the process (§7).
    pub fn is_fatal(&self) -> bool {
        false
    }
}

pub type TypesResult<T> = std::result::Result<T, TypesError>;
