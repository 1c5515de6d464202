use thiserror::Error;

/// Errors that can occur during editor state transitions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Attempted to transition between incompatible states
    #[error("Cannot transition from {from} to {to}")]
    InvalidStateTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// Failure to read a pixel color from the displayed canvas
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Point ({x}, {y}) is outside the canvas")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Screen capture failed: {0}")]
    Backend(String),
}
