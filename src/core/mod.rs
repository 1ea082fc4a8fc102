//! Core engine – gesture tracking, release policy, settle animation and the
//! carousel state machine.
//!
//! Nothing in this module depends on any TUI or rendering crate, and nothing
//! here reads a clock: hosts pass a monotonic timestamp into every call.

pub mod animation;
pub mod carousel;
pub mod gesture;
pub mod policy;
pub mod timer;

pub use carousel::{Carousel, CarouselConfig, CarouselError, CarouselEvent, CarouselView, Mode, StatusLabel};
pub use gesture::{GestureEvent, PointerSource};
