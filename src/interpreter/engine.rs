// Execution engine for the grid interpreter

use crate::grid::{Grid, Position};
use crate::interpreter::config::RunConfig;
use crate::interpreter::dispatch::Instruction;
use crate::interpreter::errors::RuntimeError;
use crate::machine::{cursor::Cursor, stack::Stack, Flags};
use crate::snapshot::{OutputBuffer, Snapshot, SnapshotManager};
use tracing::{debug, info, instrument, trace, warn};

/// The run context: one program, one cursor, one stack, one output
pub struct Interpreter {
    /// Program text, read-only for the whole run
    grid: Grid,

    /// Program counter
    pub(crate) cursor: Cursor,

    /// Operand stack
    pub(crate) stack: Stack,

    /// String mode, skip-next, halted
    pub(crate) flags: Flags,

    /// Text produced by `I` and `C`
    pub(crate) output: OutputBuffer,

    /// Loop iterations executed so far
    steps: u64,

    /// Character dispatched by the most recent step (None if skipped)
    last_instruction: Option<char>,

    config: RunConfig,

    /// Snapshot manager for replay
    snapshot_manager: SnapshotManager,

    /// Index of the snapshot the context currently reflects
    history_position: usize,

    /// Whether `run` has been called
    started: bool,

    /// Whether the run has ended (halt or error)
    finished: bool,
}

impl Interpreter {
    /// Create a fresh run context for a program
    pub fn new(grid: Grid, config: RunConfig) -> Self {
        Interpreter {
            grid,
            cursor: Cursor::new(),
            stack: Stack::new(),
            flags: Flags::default(),
            output: OutputBuffer::new(),
            steps: 0,
            last_instruction: None,
            config,
            snapshot_manager: SnapshotManager::new(config.snapshot_memory_limit),
            history_position: 0,
            started: false,
            finished: false,
        }
    }

    /// Run the program until `E`, returning the accumulated output
    ///
    /// A run is atomic: a context can only be run once.
    #[instrument(skip_all, fields(rows = self.grid.height(), cols = self.grid.width()))]
    pub fn run(&mut self) -> Result<String, RuntimeError> {
        if self.started {
            return Err(RuntimeError::AlreadyRun);
        }
        self.started = true;

        debug!(
            step_limit = ?self.config.step_limit,
            record_history = self.config.record_history,
            "run started"
        );

        let result = self.execute_until_halt();
        self.finished = true;
        self.history_position = self.snapshot_manager.len().saturating_sub(1);

        match &result {
            Ok(output) => info!(steps = self.steps, output_len = output.len(), "halted"),
            Err(e) => debug!(steps = self.steps, error = %e, "run stopped"),
        }
        result
    }

    fn execute_until_halt(&mut self) -> Result<String, RuntimeError> {
        // Take initial snapshot
        self.take_snapshot()?;

        while !self.flags.halted {
            if let Some(limit) = self.config.step_limit {
                if self.steps >= limit {
                    warn!(limit, "step limit exceeded");
                    return Err(RuntimeError::StepLimitExceeded {
                        limit,
                        output: self.output.as_str().to_string(),
                    });
                }
            }

            self.step()?;
            self.take_snapshot()?;
        }

        Ok(self.output.as_str().to_string())
    }

    /// Execute one loop iteration: dispatch phase, then advance phase
    fn step(&mut self) -> Result<(), RuntimeError> {
        if self.flags.skip_next {
            self.flags.skip_next = false;
            self.last_instruction = None;
            trace!(step = self.steps, row = self.cursor.row(), col = self.cursor.col(), "skipped");
        } else {
            let cell = self.grid.cell(self.cursor.position);
            let instruction = Instruction::decode(cell, self.flags.string_mode);
            trace!(
                step = self.steps,
                row = self.cursor.row(),
                col = self.cursor.col(),
                ?cell,
                ?instruction,
                "dispatch"
            );
            let executed = cell.as_char();
            self.execute_instruction(instruction)?;
            self.last_instruction = executed;
        }

        self.cursor.advance();
        self.steps += 1;
        Ok(())
    }

    /// Take a snapshot of the current execution state
    fn take_snapshot(&mut self) -> Result<(), RuntimeError> {
        if !self.config.record_history {
            return Ok(());
        }

        let snapshot = Snapshot {
            cursor: self.cursor,
            stack: self.stack.clone(),
            flags: self.flags,
            output: self.output.clone(),
            steps: self.steps,
            last_instruction: self.last_instruction,
        };

        self.snapshot_manager
            .push(snapshot)
            .map_err(|current| RuntimeError::SnapshotLimitExceeded {
                current,
                limit: self.snapshot_manager.memory_limit(),
            })?;

        self.history_position = self.snapshot_manager.len() - 1;
        Ok(())
    }

    /// Restore the context from a recorded snapshot
    fn restore_snapshot(&mut self, index: usize) -> Result<(), RuntimeError> {
        let snapshot = self
            .snapshot_manager
            .get(index)
            .cloned()
            .ok_or_else(|| RuntimeError::history("snapshot not found in history"))?;

        self.cursor = snapshot.cursor;
        self.stack = snapshot.stack;
        self.flags = snapshot.flags;
        self.output = snapshot.output;
        self.steps = snapshot.steps;
        self.last_instruction = snapshot.last_instruction;
        self.history_position = index;
        Ok(())
    }

    fn ensure_history(&self) -> Result<(), RuntimeError> {
        if !self.finished {
            return Err(RuntimeError::history("the program has not been run yet"));
        }
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::history("no history was recorded for this run"));
        }
        Ok(())
    }

    /// Step backward in recorded history
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        self.ensure_history()?;
        if self.history_position == 0 {
            return Err(RuntimeError::history("already at the beginning of execution"));
        }
        self.restore_snapshot(self.history_position - 1)
    }

    /// Step forward in recorded history
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        self.ensure_history()?;
        if self.history_position + 1 >= self.snapshot_manager.len() {
            return Err(RuntimeError::history("already at the end of execution"));
        }
        self.restore_snapshot(self.history_position + 1)
    }

    /// Rewind to the state before the first step
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        self.ensure_history()?;
        self.restore_snapshot(0)
    }

    /// Jump to the last recorded state
    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        self.ensure_history()?;
        self.restore_snapshot(self.snapshot_manager.len() - 1)
    }

    // ========== Getter methods for UI ==========

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn string_mode(&self) -> bool {
        self.flags.string_mode
    }

    pub fn skip_next(&self) -> bool {
        self.flags.skip_next
    }

    pub fn is_halted(&self) -> bool {
        self.flags.halted
    }

    /// Loop iterations executed to reach the current state
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Character dispatched by the step that produced the current state
    pub fn last_instruction(&self) -> Option<char> {
        self.last_instruction
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Check if execution has finished
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Get the current history position
    pub fn history_position(&self) -> usize {
        self.history_position
    }

    /// Get the total number of snapshots
    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }

    /// The snapshot at the current history position
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.snapshot_manager.get(self.history_position)
    }

    /// The snapshot at an arbitrary history index
    pub fn snapshot(&self, index: usize) -> Option<&Snapshot> {
        self.snapshot_manager.get(index)
    }

    /// Cells executed by the last `len` steps before the current state, oldest first
    pub fn recent_positions(&self, len: usize) -> Vec<Position> {
        let end = self.history_position;
        self.snapshot_manager
            .range(end.saturating_sub(len), end)
            .iter()
            .map(|s| s.cursor.position)
            .collect()
    }
}
