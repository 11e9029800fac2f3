//! Grid interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the run context and execution loop, plus history replay
//! - [`dispatch`]: decoding cells into instructions and applying them
//! - [`errors`]: runtime error types
//! - [`config`]: per-run options (step limit, history recording)
//!
//! # Execution Model
//!
//! Each loop iteration reads the cell under the cursor, dispatches it
//! (unless skip-next is set), then advances the cursor one cell in its
//! current direction. The loop ends when `E` sets the halted flag. When
//! history recording is on, a snapshot is taken before the first step and
//! after each step so a finished run can be replayed.

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod engine;
pub mod errors;

use crate::grid::Grid;
use config::RunConfig;
use engine::Interpreter;
use errors::RuntimeError;

/// Load rows, run them, and return the output
pub fn execute<I, S>(lines: I, config: RunConfig) -> Result<String, RuntimeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Interpreter::new(Grid::load(lines), config).run()
}
