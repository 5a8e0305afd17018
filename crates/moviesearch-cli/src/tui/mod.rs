//! TUI module for the interactive search form.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod search_form;
/// Search form state machine.
pub mod state;
mod ui;
/// Render selection for the search form.
pub mod view;

pub use search_form::run_search_form;
