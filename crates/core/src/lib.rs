//! Core of gridscroll: a navigable grid of buttons whose container slides
//! to keep the focused button inside a scroll viewport.
//!
//! Everything here is engine agnostic. A host owns the frame loop, feeds
//! the animator a frame delta through [`scroll::ScrollAnimator::tick`],
//! and renders the commands produced by [`views::grid::render_grid`].

pub mod config;
pub mod focus;
pub mod grid;
pub mod layout;
pub mod scroll;
pub mod views;

pub use config::{ConfigError, RetriggerPolicy, ScrollConfig};
pub use focus::{FocusState, Refocuser};
pub use grid::{
    ButtonGrid, ButtonHandle, ButtonTemplate, ButtonWidget, Direction, GridCell, GridError, WidgetId,
};
pub use layout::{LayoutMetrics, Padding, ScrollContainer, Size, Spacing};
pub use scroll::{ScrollAnimator, ScrollPhase, ScrollState};
