// Integration tests for the grid interpreter

use gritty::grid::Position;
use gritty::machine::cursor::Direction;
use gritty::{execute, Grid, Interpreter, RunConfig, RuntimeError};

fn interpreter(rows: &[&str], config: RunConfig) -> Interpreter {
    Interpreter::new(Grid::load(rows.iter().copied()), config)
}

#[test]
fn test_halt_returns_output() {
    let result = execute(["5I3IE"], RunConfig::default());
    assert_eq!(result, Ok("53".to_string()));
}

#[test]
fn test_string_mode_round_trip() {
    let mut interp = interpreter(&[r#""AB"CCE"#], RunConfig::default().with_history(true));
    let output = interp.run().expect("Execution failed");
    assert_eq!(output, "BA");

    // After the closing quote the stack holds A then B
    let after_quote = interp.snapshot(4).expect("snapshot after closing quote");
    assert_eq!(after_quote.stack.values(), &[65, 66]);
    assert!(!after_quote.flags.string_mode);
}

#[test]
fn test_string_mode_pushes_instruction_chars() {
    let output = execute([r#""a E"CCCE"#], RunConfig::default()).expect("Execution failed");
    assert_eq!(output, "E a");
}

#[test]
fn test_dup_then_print_sequence() {
    let mut interp = interpreter(&["9DDI"], RunConfig::default().with_history(true).with_step_limit(4));
    let result = interp.run();

    // No `E`: the cursor walks off the row and the step cap ends the run
    assert_eq!(
        result,
        Err(RuntimeError::StepLimitExceeded {
            limit: 4,
            output: "9".to_string()
        })
    );
    assert_eq!(interp.stack().values(), &[9, 9]);

    let stacks: Vec<Vec<i64>> = (1..=3)
        .map(|i| interp.snapshot(i).unwrap().stack.values().to_vec())
        .collect();
    assert_eq!(stacks, vec![vec![9], vec![9, 9], vec![9, 9, 9]]);
}

#[test]
fn test_noops_do_not_change_results() {
    let mut plain = interpreter(&["52-D I 3*CE"], RunConfig::default());
    let mut padded = interpreter(&["5  2abc-  D?I#  3 w*~C  E"], RunConfig::default());

    assert_eq!(plain.run(), Ok("3\t".to_string()));
    assert_eq!(padded.run(), Ok("3\t".to_string()));
    assert_eq!(plain.stack(), padded.stack());
}

#[test]
fn test_directions_only_move_the_cursor() {
    let rows = [">  v", "", "E  <"];
    let mut interp = interpreter(&rows, RunConfig::default().with_history(true));
    assert_eq!(interp.run(), Ok(String::new()));

    for i in 0..interp.total_snapshots() {
        assert!(interp.snapshot(i).unwrap().stack.is_empty());
    }
    assert_eq!(interp.cursor().direction, Direction::Left);
    // Halted on (2, 0) and advanced once more
    assert_eq!(interp.cursor().position, Position::new(2, -1));
}

#[test]
fn test_ragged_rows_are_void_not_errors() {
    // Row 1 is empty; the cursor crosses it going down
    let rows = ["3  v", "", "E  <"];
    let mut interp = interpreter(&rows, RunConfig::default());
    assert_eq!(interp.run(), Ok(String::new()));
    assert_eq!(interp.stack().values(), &[3]);
}

#[test]
fn test_void_pushes_nothing_in_string_mode() {
    let mut interp = interpreter(&[r#""A"#], RunConfig::default().with_step_limit(10));
    let result = interp.run();
    assert!(matches!(
        result,
        Err(RuntimeError::StepLimitExceeded { limit: 10, .. })
    ));
    assert!(interp.string_mode());
    assert_eq!(interp.stack().values(), &[65]);
}

#[test]
fn test_horizontal_branch() {
    // Zero goes right
    let mut interp = interpreter(&["SE0_ 7E"], RunConfig::default());
    assert_eq!(interp.run(), Ok(String::new()));
    assert_eq!(interp.stack().values(), &[7]);

    // Nonzero goes left, back over the skipped `E`
    let mut interp = interpreter(&["SE1_"], RunConfig::default());
    assert_eq!(interp.run(), Ok(String::new()));
    assert_eq!(interp.stack().values(), &[1]);
    assert_eq!(interp.cursor().direction, Direction::Left);

    // Empty stack counts as nonzero
    let mut interp = interpreter(&["SEP_"], RunConfig::default());
    assert_eq!(interp.run(), Ok(String::new()));
    assert_eq!(interp.cursor().direction, Direction::Left);
}

#[test]
fn test_vertical_branch() {
    let mut interp = interpreter(&["0|", " E"], RunConfig::default());
    assert_eq!(interp.run(), Ok(String::new()));
    assert_eq!(interp.cursor().direction, Direction::Down);

    let mut interp = interpreter(&["v E", ">1|"], RunConfig::default());
    assert_eq!(interp.run(), Ok(String::new()));
    assert_eq!(interp.cursor().direction, Direction::Up);
    assert!(interp.stack().is_empty());

    let mut interp = interpreter(&["v E", ">P|"], RunConfig::default());
    assert_eq!(interp.run(), Ok(String::new()));
    assert_eq!(interp.cursor().direction, Direction::Up);
}

#[test]
fn test_skip_passes_over_quote() {
    let mut interp = interpreter(&[r#"S"5E"#], RunConfig::default());
    assert_eq!(interp.run(), Ok(String::new()));
    assert_eq!(interp.stack().values(), &[5]);
    assert!(!interp.string_mode());
}

#[test]
fn test_skip_in_string_mode_pushes_code() {
    let output = execute([r#""S"CE"#], RunConfig::default()).expect("Execution failed");
    assert_eq!(output, "S");
}

#[test]
fn test_loop_counts_down() {
    // `|` turns up into the return path while the counter is nonzero
    let rows = [
        "3v     <",
        " >DI1-D|",
        "       E",
    ];
    let mut interp = interpreter(&rows, RunConfig::default().with_step_limit(10_000));
    assert_eq!(interp.run(), Ok("321".to_string()));
    assert_eq!(interp.stack().values(), &[0]);
}

#[test]
fn test_print_int_underflow() {
    let mut interp = interpreter(&["I"], RunConfig::default());
    assert_eq!(
        interp.run(),
        Err(RuntimeError::StackUnderflow {
            instruction: 'I',
            position: Position::new(0, 0),
        })
    );
}

#[test]
fn test_print_char_underflow_keeps_partial_output() {
    let mut interp = interpreter(&["5IC"], RunConfig::default());
    let err = interp.run().unwrap_err();
    assert_eq!(err.position(), Some(Position::new(0, 2)));
    assert!(matches!(err, RuntimeError::StackUnderflow { instruction: 'C', .. }));
    assert_eq!(interp.output().as_str(), "5");
    assert!(!interp.is_halted());
}

#[test]
fn test_step_limit_is_distinct_from_halt() {
    let rows = [">v", "^<"];
    let result = execute(rows, RunConfig::default().with_step_limit(1000));
    assert_eq!(
        result,
        Err(RuntimeError::StepLimitExceeded {
            limit: 1000,
            output: String::new()
        })
    );

    // A program that halts inside the limit is unaffected
    assert_eq!(execute(["E"], RunConfig::default().with_step_limit(1)), Ok(String::new()));
}

#[test]
fn test_runs_are_independent() {
    let rows = ["7IE"];
    let mut first = interpreter(&rows, RunConfig::default());
    let mut second = interpreter(&rows, RunConfig::default());
    assert_eq!(first.run(), Ok("7".to_string()));
    assert_eq!(second.run(), Ok("7".to_string()));
    assert_eq!(first.run(), Err(RuntimeError::AlreadyRun));
}

#[test]
fn test_empty_program_never_halts() {
    let result = execute(Vec::<String>::new(), RunConfig::default().with_step_limit(50));
    assert!(matches!(result, Err(RuntimeError::StepLimitExceeded { .. })));
}
