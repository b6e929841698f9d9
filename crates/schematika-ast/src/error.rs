use thiserror::Error;

use schematika_util::Symbol;

#[derive(Debug, Error)]
pub enum AstError {
    #[error("undefined variable `{0}`")]
    UndefinedVariable(Symbol),

    #[error("`{0}` is already defined in this scope")]
    DuplicateDefinition(Symbol),

    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },

    #[error("if/else branches have incompatible types: `{then_ty}` vs `{else_ty}`")]
    BranchTypeMismatch { then_ty: String, else_ty: String },
}

impl AstError {
    /// §7: every AST-construction error aborts only the current top-level
    /// form at the REPL, never the process.
    pub fn is_fatal(&self) -> bool {
        false
    }
}

pub type AstResult<T> = std::result::Result<T, AstError>;
