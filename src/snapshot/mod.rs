// Snapshot management for replaying a finished run

use crate::machine::{cursor::Cursor, stack::Stack, Flags};

/// Append-only buffer for program output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        OutputBuffer {
            text: String::new(),
        }
    }

    /// Append text without a separator
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// The accumulated output
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Output split into display lines
    pub fn lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.text.split('\n').collect();
        // Remove trailing empty string if text ended with newline
        if lines.last().is_some_and(|s| s.is_empty()) {
            lines.pop();
        }
        lines
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Snapshot of the run context after a step
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub cursor: Cursor,
    pub stack: Stack,
    pub flags: Flags,
    pub output: OutputBuffer,
    pub steps: u64,
    /// The character dispatched by the step that produced this snapshot
    pub last_instruction: Option<char>,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        let fixed = std::mem::size_of::<Snapshot>();
        let stack_size = self.stack.depth() * std::mem::size_of::<i64>();
        fixed + stack_size + self.output.len()
    }
}

/// Manages execution history for replay
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history, refusing it if the memory cap would be exceeded
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), usize> {
        let snapshot_size = snapshot.estimated_size();

        let requested = self.current_memory.saturating_add(snapshot_size);
        if requested > self.max_memory {
            return Err(requested);
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Snapshots in a half-open index range, clamped to history
    pub fn range(&self, start: usize, end: usize) -> &[Snapshot] {
        let end = end.min(self.snapshots.len());
        let start = start.min(end);
        &self.snapshots[start..end]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(steps: u64, stack: Vec<i64>) -> Snapshot {
        Snapshot {
            cursor: Cursor::new(),
            stack: Stack::from(stack),
            flags: Flags::default(),
            output: OutputBuffer::new(),
            steps,
            last_instruction: None,
        }
    }

    #[test]
    fn test_output_lines() {
        let mut out = OutputBuffer::new();
        out.push_str("12");
        out.push_char('\n');
        out.push_char('A');
        assert_eq!(out.lines(), vec!["12", "A"]);
        out.push_char('\n');
        assert_eq!(out.lines(), vec!["12", "A"]);
        assert_eq!(out.as_str(), "12\nA\n");
    }

    #[test]
    fn test_memory_limit() {
        let one = snapshot(0, vec![]).estimated_size();
        let mut manager = SnapshotManager::new(one * 2);
        assert!(manager.push(snapshot(0, vec![])).is_ok());
        assert!(manager.push(snapshot(1, vec![])).is_ok());
        assert!(manager.push(snapshot(2, vec![])).is_err());
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), one * 2);
    }

    #[test]
    fn test_range_is_clamped() {
        let mut manager = SnapshotManager::new(usize::MAX);
        for i in 0..3 {
            manager.push(snapshot(i, vec![])).unwrap();
        }
        assert_eq!(manager.range(1, 10).len(), 2);
        assert_eq!(manager.range(5, 10).len(), 0);
        assert_eq!(manager.get(2).map(|s| s.steps), Some(2));
    }
}
