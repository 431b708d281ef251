use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid locale identifier {input:?}: {reason}")]
    InvalidLocale { input: String, reason: String },

    #[error("top level must be an object, found {found}")]
    NonObjectTopLevel { found: &'static str },
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;
