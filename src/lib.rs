//! # Introduction
//!
//! Gritty executes programs written in a two-dimensional stack language: a
//! grid of characters where control flow is literal cursor movement and
//! computation happens on an integer stack. A run can record a snapshot of
//! the whole machine after every step; the snapshot history is then
//! navigated forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Grid → Interpreter (dispatch + advance) → Snapshots → TUI
//! ```
//!
//! 1. [`grid`]: stores program rows verbatim and resolves off-grid reads.
//! 2. [`machine`]: the operand [`machine::stack::Stack`], the
//!    [`machine::cursor::Cursor`], and the mode [`machine::Flags`].
//! 3. [`interpreter`]: decodes cells into instructions and drives the
//!    execution loop until `E`.
//! 4. [`snapshot`]: the [`snapshot::OutputBuffer`] and the snapshot history
//!    with a configurable memory limit.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Instruction set
//!
//! Digits push, `+ - *` compute (`-` is the absolute difference), `P X D`
//! pop, swap and duplicate, `> < ^ v` steer, `_ |` branch on zero, `"`
//! toggles string mode, `I C` print a number or a character, `S` skips
//! the next cell, and `E` ends the run. Everything else is a no-op.
//!
//! ```
//! use gritty::{execute, RunConfig};
//!
//! let output = execute([r#""!iH"CCCE"#], RunConfig::default()).unwrap();
//! assert_eq!(output, "Hi!");
//! ```

pub mod grid;
pub mod interpreter;
pub mod machine;
pub mod snapshot;
pub mod ui;

pub use grid::Grid;
pub use interpreter::config::RunConfig;
pub use interpreter::engine::Interpreter;
pub use interpreter::errors::RuntimeError;
pub use interpreter::execute;
