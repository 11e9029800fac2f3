// Constants for the grid interpreter

/// Default cap on snapshot history memory (256 MiB)
pub const DEFAULT_SNAPSHOT_MEMORY_LIMIT: usize = 256 * 1024 * 1024;

/// Default step cap used by the binary when recording history for the viewer
pub const DEFAULT_VIEWER_STEP_LIMIT: u64 = 1_000_000;

/// Character substituted by `C` for values that are not Unicode scalars
pub const REPLACEMENT_CHAR: char = char::REPLACEMENT_CHARACTER;
