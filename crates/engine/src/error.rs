//! Error types for the zip-map engine.

/// A failure reported by a combining function.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CallbackError {
    pub message: String,
}

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<zipmap_core::ValueError> for CallbackError {
    fn from(e: zipmap_core::ValueError) -> Self {
        CallbackError::new(e.to_string())
    }
}

/// Misuse of an iteration cursor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// `write_back` was called before the first advance or after exhaustion.
    #[error("cursor is not positioned on an element")]
    NotPositioned,
}

/// All errors returned by [`Engine::run`](crate::Engine::run).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// The input list was empty.
    #[error("invalid argument: no input collections")]
    NoInputs,

    /// An input slot held no collection. `position` is 1-based and counts
    /// inputs only.
    #[error("invalid argument: missing input at position {position}")]
    MissingInput { position: usize },

    /// The combining function rejected the call shape before any round ran.
    #[error("invalid argument: {0}")]
    InvalidCallback(String),

    /// The combining function failed; no output is returned.
    #[error("callback failed in round {round}: {source}")]
    Callback {
        round: usize,
        #[source]
        source: CallbackError,
    },

    #[error(transparent)]
    Cursor(#[from] CursorError),
}

impl MapError {
    /// True for precondition failures, which are raised before any
    /// iteration starts.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            MapError::NoInputs | MapError::MissingInput { .. } | MapError::InvalidCallback(_)
        )
    }
}
