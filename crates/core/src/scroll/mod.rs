pub mod animator;
pub mod bounds;

pub use animator::{ScrollAnimator, ScrollPhase, ScrollState};
pub use bounds::{is_above_viewport, is_below_viewport, is_out_of_bounds};
