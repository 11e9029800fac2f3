// Snapshot history and replay tests

use gritty::grid::Position;
use gritty::{Grid, Interpreter, RunConfig, RuntimeError};

fn recorded(rows: &[&str]) -> Interpreter {
    let config = RunConfig::default().with_history(true).with_step_limit(10_000);
    Interpreter::new(Grid::load(rows.iter().copied()), config)
}

#[test]
fn test_one_snapshot_per_step_plus_initial() {
    let mut interp = recorded(&["11+E"]);
    interp.run().expect("Execution failed");

    assert_eq!(interp.steps(), 4);
    assert_eq!(interp.total_snapshots(), 5);
    assert_eq!(interp.history_position(), 4);
    assert!(interp.is_finished());
}

#[test]
fn test_replay_navigation() {
    let mut interp = recorded(&["11+E"]);
    interp.run().expect("Execution failed");

    interp.rewind_to_start().expect("rewind");
    assert_eq!(interp.history_position(), 0);
    assert!(interp.stack().is_empty());
    assert_eq!(interp.cursor().position, Position::new(0, 0));
    assert_eq!(interp.steps(), 0);

    interp.step_forward().expect("forward");
    assert_eq!(interp.stack().values(), &[1]);
    assert_eq!(interp.last_instruction(), Some('1'));

    interp.step_forward().expect("forward");
    interp.step_forward().expect("forward");
    assert_eq!(interp.stack().values(), &[2]);

    interp.step_backward().expect("backward");
    assert_eq!(interp.stack().values(), &[1, 1]);

    interp.jump_to_end().expect("end");
    assert!(interp.is_halted());
    assert_eq!(interp.stack().values(), &[2]);
}

#[test]
fn test_navigation_past_either_end_fails() {
    let mut interp = recorded(&["E"]);
    interp.run().expect("Execution failed");

    assert!(matches!(
        interp.step_forward(),
        Err(RuntimeError::HistoryUnavailable { .. })
    ));

    interp.rewind_to_start().expect("rewind");
    assert!(matches!(
        interp.step_backward(),
        Err(RuntimeError::HistoryUnavailable { .. })
    ));
}

#[test]
fn test_navigation_without_history_fails() {
    let mut interp = Interpreter::new(Grid::load(["1E"]), RunConfig::default());
    assert!(interp.rewind_to_start().is_err());

    interp.run().expect("Execution failed");
    assert_eq!(interp.total_snapshots(), 0);
    assert!(matches!(
        interp.rewind_to_start(),
        Err(RuntimeError::HistoryUnavailable { .. })
    ));
}

#[test]
fn test_replay_restores_output() {
    let mut interp = recorded(&["4I5IE"]);
    assert_eq!(interp.run(), Ok("45".to_string()));

    interp.rewind_to_start().expect("rewind");
    assert_eq!(interp.output().as_str(), "");
    interp.step_forward().expect("forward");
    interp.step_forward().expect("forward");
    assert_eq!(interp.output().as_str(), "4");
}

#[test]
fn test_failed_run_keeps_partial_history() {
    let mut interp = recorded(&["7CI"]);
    let err = interp.run().unwrap_err();
    assert!(matches!(err, RuntimeError::StackUnderflow { instruction: 'I', .. }));

    // Initial state plus the two steps that completed
    assert_eq!(interp.total_snapshots(), 3);
    interp.rewind_to_start().expect("rewind");
    interp.jump_to_end().expect("end");
    assert_eq!(interp.output().as_str(), "\u{7}");
}

#[test]
fn test_failed_step_leaves_state_at_last_snapshot() {
    let mut interp = recorded(&["1IC"]);
    let err = interp.run().unwrap_err();
    assert!(matches!(err, RuntimeError::StackUnderflow { instruction: 'C', .. }));

    assert_eq!(interp.total_snapshots(), 3);
    assert_eq!(interp.history_position(), 2);
    assert_eq!(interp.last_instruction(), Some('I'));
    let last = interp.snapshot(2).expect("last snapshot");
    assert_eq!(last.last_instruction, interp.last_instruction());
    assert_eq!(last.cursor, interp.cursor());
}

#[test]
fn test_recent_positions_trail() {
    let mut interp = recorded(&["123E"]);
    interp.run().expect("Execution failed");
    interp.jump_to_end().expect("end");

    let trail = interp.recent_positions(2);
    assert_eq!(trail, vec![Position::new(0, 2), Position::new(0, 3)]);

    interp.rewind_to_start().expect("rewind");
    assert!(interp.recent_positions(5).is_empty());
}

#[test]
fn test_snapshot_memory_limit() {
    let config = RunConfig::default()
        .with_history(true)
        .with_snapshot_memory_limit(1);
    let mut interp = Interpreter::new(Grid::load(["E"]), config);
    assert!(matches!(
        interp.run(),
        Err(RuntimeError::SnapshotLimitExceeded { limit: 1, .. })
    ));
}
