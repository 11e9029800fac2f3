//! Runtime error types for the grid interpreter
//!
//! This module defines [`RuntimeError`], every way a run can end other than
//! executing `E`. Irregular conditions that have a no-op policy (short
//! stacks for `P`, `X`, `D`, arithmetic, off-grid cells) never reach here.

use crate::grid::Position;
use thiserror::Error;

/// Runtime errors that can occur during execution or replay
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `I` or `C` executed with nothing to pop
    #[error("stack underflow: '{instruction}' popped an empty stack at {position}")]
    StackUnderflow { instruction: char, position: Position },

    /// The configured step cap was reached before `E`
    #[error("step limit of {limit} exceeded before the program halted")]
    StepLimitExceeded { limit: u64, output: String },

    /// Snapshot history limit exceeded
    #[error("snapshot memory limit exceeded: {current} > {limit} bytes")]
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation outside the recorded range
    #[error("history unavailable: {message}")]
    HistoryUnavailable { message: String },

    /// `run` called on a context that already ran
    #[error("this run context has already been executed")]
    AlreadyRun,
}

impl RuntimeError {
    /// Grid position the error occurred at, if it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            RuntimeError::StackUnderflow { position, .. } => Some(*position),
            RuntimeError::StepLimitExceeded { .. }
            | RuntimeError::SnapshotLimitExceeded { .. }
            | RuntimeError::HistoryUnavailable { .. }
            | RuntimeError::AlreadyRun => None,
        }
    }

    /// Output produced before the run stopped, where the error carries it
    pub fn partial_output(&self) -> Option<&str> {
        match self {
            RuntimeError::StepLimitExceeded { output, .. } => Some(output),
            _ => None,
        }
    }

    pub(crate) fn history(message: impl Into<String>) -> Self {
        RuntimeError::HistoryUnavailable {
            message: message.into(),
        }
    }
}
