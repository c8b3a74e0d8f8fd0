use thiserror::Error;

/// Resolution outcome taxonomy shared by every resolver layer.
///
/// `NotFound` covers a missing manifest file, catalogue entry, or interface
/// entry, and also a repository the requesting user cannot access; the two
/// are deliberately indistinguishable so callers cannot probe repository
/// existence. `Config` means the entry exists but is structurally unusable.
/// Messages are propagated unchanged up to the API boundary.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Config(String),

    /// Host transport failure (network, 5xx). Not part of the resolution
    /// taxonomy; passes through unchanged and maps to 500 at the boundary.
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}

impl ResolveError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ResolveError::NotFound(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        ResolveError::Config(message.into())
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
