use thiserror::Error;

/// Raised when an action fails to execute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("action target not set")]
    TargetNotSet,
    #[error(transparent)]
    Undo(#[from] UndoActionError),
    #[error(transparent)]
    Redo(#[from] RedoActionError),
    #[error(transparent)]
    InvalidCommand(#[from] InvalidCommandError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UndoActionError {
    #[error("undo failed: action target not set")]
    TargetNotSet,
    #[error("undo failed: action has not been applied")]
    NotApplied,
    #[error("nothing to undo")]
    NothingToUndo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedoActionError {
    #[error("redo failed: action target not set")]
    TargetNotSet,
    #[error("redo failed: action is already applied")]
    AlreadyApplied,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Errors reported back to whoever typed the command. Each carries the
/// reconstructed command text or the offending pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCommandError {
    #[error("invalid number of arguments ({argc}) - {min} <= argc <= {max}: {command}")]
    ArgumentCount {
        command: String,
        argc: usize,
        min: usize,
        max: usize,
    },
    #[error("invalid command: {command} ({reason})")]
    Invalid { command: String, reason: String },
    #[error("{0} not found")]
    NotFound(String),
    #[error("no previous search pattern: {0}")]
    NoPattern(String),
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("command not supported: {0}")]
    Unsupported(String),
}

impl InvalidCommandError {
    pub fn invalid(command: impl Into<String>, reason: impl ToString) -> Self {
        InvalidCommandError::Invalid {
            command: command.into(),
            reason: reason.to_string(),
        }
    }
}
