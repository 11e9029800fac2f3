//! Integer operand stack
//!
//! This module provides [`Stack`], the LIFO of integers the grid language
//! computes on. Every element is a plain [`Value`] regardless of where it
//! came from: digit literals, character codes pushed in string mode, and
//! arithmetic results all share the one representation.
//!
//! # Short stacks
//!
//! Operations that need more operands than are present leave the stack
//! untouched and report `false`:
//!
//! | Operation | Needs |
//! |---|---|
//! | [`Stack::add`], [`Stack::abs_diff`], [`Stack::multiply`], [`Stack::swap`] | 2 |
//! | [`Stack::duplicate`] | 1 |
//!
//! Values are not clamped. `+` and `*` wrap on `i64` overflow.

/// A single stack element
///
/// Values are fixed-width. `+` and `*` wrap on overflow in two's
/// complement, so a large product of positive values can turn negative.
pub type Value = i64;

/// The operand stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    /// Push a value on top
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pop the top value, `None` when empty
    pub fn pop(&mut self) -> Option<Value> {
        self.values.pop()
    }

    /// Peek at the top value
    pub fn peek(&self) -> Option<Value> {
        self.values.last().copied()
    }

    /// Pop `val1` (top) and `val2` (next) and push `f(val1, val2)`
    fn binary(&mut self, f: impl FnOnce(Value, Value) -> Value) -> bool {
        if self.values.len() < 2 {
            return false;
        }
        let (Some(val1), Some(val2)) = (self.values.pop(), self.values.pop()) else {
            return false;
        };
        self.values.push(f(val1, val2));
        true
    }

    /// `val1 + val2`
    pub fn add(&mut self) -> bool {
        self.binary(|val1, val2| val1.wrapping_add(val2))
    }

    /// `|val1 - val2|`, so the result does not depend on operand order
    pub fn abs_diff(&mut self) -> bool {
        self.binary(|val1, val2| val1.abs_diff(val2) as Value)
    }

    /// `val1 * val2`
    pub fn multiply(&mut self) -> bool {
        self.binary(|val1, val2| val1.wrapping_mul(val2))
    }

    /// Exchange the top two elements
    pub fn swap(&mut self) -> bool {
        let len = self.values.len();
        if len < 2 {
            return false;
        }
        self.values.swap(len - 1, len - 2);
        true
    }

    /// Push a copy of the top element
    pub fn duplicate(&mut self) -> bool {
        match self.peek() {
            Some(top) => {
                self.values.push(top);
                true
            }
            None => false,
        }
    }

    /// All values, bottom first (for UI display)
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn depth(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Value>> for Stack {
    fn from(values: Vec<Value>) -> Self {
        Stack { values }
    }
}
