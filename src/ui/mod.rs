//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the engine's read-only views and turns them into cells
//! on the terminal.  No carousel state is mutated here.

pub mod carousel_widget;
pub mod layout;
pub mod theme;
