//! Common error types used throughout reelscout.
//!
//! Boundary code (the query executor and the rating resolver) never lets these
//! escape to the user; they exist so that invalid input and illegal state
//! transitions are reported as values instead of panics.

/// Common error type for reelscout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A rating was settled more than once.
    #[error("Invalid rating transition from {from}")]
    InvalidTransition {
        /// Label of the state the transition was attempted from.
        from: String,
    },
}

impl Error {
    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new InvalidTransition error.
    pub fn invalid_transition<S: Into<String>>(from: S) -> Self {
        Self::InvalidTransition { from: from.into() }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
