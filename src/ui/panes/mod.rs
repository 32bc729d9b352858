//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`history`]: Checked lines with their diagnostics and verdicts
//! - [`tokens`]: Token stream of the latest line, offending token highlighted
//! - [`input`]: Prompt and the line being edited
//! - [`status`]: Status bar with keybindings and the last verdict
//!
//! Each pane module exports a single `render_*` function that takes the state it
//! draws by reference; panes hold no state of their own.

pub mod history;
pub mod input;
pub mod status;
pub mod tokens;

// Re-export render functions for convenience
pub use history::render_history_pane;
pub use input::render_input_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
