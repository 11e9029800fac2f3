//! Instruction decoding
//!
//! Decoding is a total function from a grid [`Cell`] (plus the current
//! string-mode flag) to an [`Instruction`]. Every character without a
//! meaning, space included, decodes to [`Instruction::Noop`], as does an
//! off-grid [`Cell::Void`] in either mode.
//!
//! | Char | Instruction | Effect |
//! |---|---|---|
//! | `0`-`9` | [`Push`](Instruction::Push) | push the digit's value |
//! | `+` | [`Add`](Instruction::Add) | `val1 + val2`; no-op below 2 |
//! | `-` | [`AbsDiff`](Instruction::AbsDiff) | `abs(val1 - val2)`; no-op below 2 |
//! | `*` | [`Multiply`](Instruction::Multiply) | `val1 * val2`; no-op below 2 |
//! | `P` | [`Pop`](Instruction::Pop) | discard top; no-op when empty |
//! | `X` | [`Swap`](Instruction::Swap) | swap top two; no-op below 2 |
//! | `D` | [`Duplicate`](Instruction::Duplicate) | copy top; no-op when empty |
//! | `>` `<` `^` `v` | [`Go`](Instruction::Go) | set direction |
//! | `_` | [`BranchHorizontal`](Instruction::BranchHorizontal) | pop; 0 → right, else (or empty) left |
//! | `\|` | [`BranchVertical`](Instruction::BranchVertical) | pop; 0 → down, else (or empty) up |
//! | `"` | [`ToggleString`](Instruction::ToggleString) | toggle string mode |
//! | `I` | [`PrintInt`](Instruction::PrintInt) | pop and print as decimal; underflow when empty |
//! | `C` | [`PrintChar`](Instruction::PrintChar) | pop and print as a character; underflow when empty |
//! | `S` | [`Skip`](Instruction::Skip) | skip the next cell |
//! | `E` | [`End`](Instruction::End) | halt |
//!
//! `val1` is the first value popped (the top), `val2` the second.

use super::constants::REPLACEMENT_CHAR;
use super::engine::Interpreter;
use super::errors::RuntimeError;
use crate::grid::Cell;
use crate::machine::cursor::Direction;
use crate::machine::stack::Value;
use tracing::warn;

/// A decoded grid instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Push(Value),
    Add,
    AbsDiff,
    Multiply,
    Pop,
    Swap,
    Duplicate,
    Go(Direction),
    BranchHorizontal,
    BranchVertical,
    ToggleString,
    PrintInt,
    PrintChar,
    Skip,
    End,
    Noop,
}

impl Instruction {
    /// Decode a character in normal mode
    pub fn from_char(c: char) -> Self {
        match c {
            '0'..='9' => Instruction::Push(Value::from(c as u8 - b'0')),
            '+' => Instruction::Add,
            '-' => Instruction::AbsDiff,
            '*' => Instruction::Multiply,
            'P' => Instruction::Pop,
            'X' => Instruction::Swap,
            'D' => Instruction::Duplicate,
            '>' => Instruction::Go(Direction::Right),
            '<' => Instruction::Go(Direction::Left),
            '^' => Instruction::Go(Direction::Up),
            'v' => Instruction::Go(Direction::Down),
            '_' => Instruction::BranchHorizontal,
            '|' => Instruction::BranchVertical,
            '"' => Instruction::ToggleString,
            'I' => Instruction::PrintInt,
            'C' => Instruction::PrintChar,
            'S' => Instruction::Skip,
            'E' => Instruction::End,
            _ => Instruction::Noop,
        }
    }

    /// Decode a cell, honoring string mode
    pub fn decode(cell: Cell, string_mode: bool) -> Self {
        match cell {
            Cell::Void => Instruction::Noop,
            Cell::Char('"') => Instruction::ToggleString,
            Cell::Char(c) if string_mode => Instruction::Push(Value::from(u32::from(c))),
            Cell::Char(c) => Self::from_char(c),
        }
    }
}

/// Direction chosen by a branch given the popped value
///
/// An empty stack counts as nonzero.
pub fn branch_direction(popped: Option<Value>, zero: Direction, nonzero: Direction) -> Direction {
    if popped == Some(0) {
        zero
    } else {
        nonzero
    }
}

/// Character printed by `C` for a value
pub fn value_to_char(value: Value) -> char {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(REPLACEMENT_CHAR)
}

impl Interpreter {
    /// Apply one instruction to the run context
    pub(crate) fn execute_instruction(&mut self, instruction: Instruction) -> Result<(), RuntimeError> {
        match instruction {
            Instruction::Push(value) => self.stack.push(value),

            // Short stacks are absorbed as no-ops
            Instruction::Add => {
                self.stack.add();
            }
            Instruction::AbsDiff => {
                self.stack.abs_diff();
            }
            Instruction::Multiply => {
                self.stack.multiply();
            }
            Instruction::Pop => {
                self.stack.pop();
            }
            Instruction::Swap => {
                self.stack.swap();
            }
            Instruction::Duplicate => {
                self.stack.duplicate();
            }

            Instruction::Go(direction) => self.cursor.direction = direction,

            Instruction::BranchHorizontal => {
                let popped = self.stack.pop();
                self.cursor.direction = branch_direction(popped, Direction::Right, Direction::Left);
            }
            Instruction::BranchVertical => {
                let popped = self.stack.pop();
                self.cursor.direction = branch_direction(popped, Direction::Down, Direction::Up);
            }

            Instruction::ToggleString => self.flags.string_mode = !self.flags.string_mode,

            Instruction::PrintInt => {
                let value = self.pop_for_output('I')?;
                self.output.push_str(&value.to_string());
            }
            Instruction::PrintChar => {
                let value = self.pop_for_output('C')?;
                self.output.push_char(value_to_char(value));
            }

            Instruction::Skip => self.flags.skip_next = true,
            Instruction::End => self.flags.halted = true,
            Instruction::Noop => {}
        }
        Ok(())
    }

    fn pop_for_output(&mut self, instruction: char) -> Result<Value, RuntimeError> {
        self.stack.pop().ok_or_else(|| {
            let position = self.cursor.position;
            warn!(%instruction, row = position.row, col = position.col, "stack underflow");
            RuntimeError::StackUnderflow {
                instruction,
                position,
            }
        })
    }
}
