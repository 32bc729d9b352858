//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, line editing and recall
//! - **[`panes`]** — stateless render functions for each visible pane (history,
//!   tokens, input, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with [`App::new`] and
//! call [`App::run`] to start the read loop. Each submitted line is checked with
//! a fresh [`Report`]; the app keeps only the reports, never lexer or parser state.
//!
//! [`Report`]: crate::report::Report
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
