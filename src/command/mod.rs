mod commands;
mod context;
mod history;

use thiserror::Error;

pub use commands::Command;
pub use context::{CommandContext, RestoreOptions};
pub use history::{Applied, CommandHistory};

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Non-fatal history outcomes reported back to the caller
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}
