//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`grid`]: Program text with the cursor, its heading, and a fading trail
//!   of recently executed cells
//! - [`stack`]: Operand stack, top first, with character hints
//! - [`output`]: Text produced by `I` and `C`
//! - [`status`]: Status bar with keybindings and machine state
//!
//! Each pane module exports a `render_*` function; panes that scroll also
//! export their scroll state type.

pub mod grid;
pub mod output;
pub mod stack;
pub mod status;

pub use grid::{render_grid_pane, GridRenderData, GridScrollState};
pub use output::render_output_pane;
pub use stack::{render_stack_pane, StackScrollState};
pub use status::{render_status_bar, StatusRenderData};
