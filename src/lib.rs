//! Gesture-driven card carousel.
//!
//! `core` is the engine: drag tracking, the flip / distance release policy,
//! eased settle animations and the auto-advance timer, driven entirely by
//! host-supplied timestamps.  `app`, `ui` and `config` host it in a
//! terminal, with the mouse standing in for a pointer.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
