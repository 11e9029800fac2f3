//! Machine state for the grid language
//!
//! This module provides the mutable state a run operates on:
//! - [`stack`]: the integer operand stack and its short-stack policies
//! - [`cursor`]: the program counter (position + [`cursor::Direction`])
//!
//! Mode flags (string mode, skip-next, halted) live in [`Flags`].

pub mod cursor;
pub mod stack;

/// Per-run mode flags, all cleared at the start of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Characters push their code instead of executing
    pub string_mode: bool,
    /// The next cell is passed over without dispatch
    pub skip_next: bool,
    /// `E` was executed
    pub halted: bool,
}
