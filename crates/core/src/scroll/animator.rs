use gridscroll_protocol::Rect;

use super::bounds::is_out_of_bounds;
use crate::config::{RetriggerPolicy, ScrollConfig};
use crate::focus::FocusState;
use crate::grid::{ButtonGrid, WidgetId};
use crate::layout::ScrollContainer;

/// Added to the scroll speed so a speed of zero still yields a finite
/// slide duration.
pub const SPEED_EPSILON: f64 = 0.01;

/// Seconds a full slide takes at `speed`.
pub fn slide_duration(speed: f64) -> f64 {
    1.0 / (speed + SPEED_EPSILON)
}

/// Container offset that puts the cell's top edge one row spacing below
/// the viewport's top edge.
///
/// The extra spacing compensates for the layout accumulating spacing
/// above the first row.
pub fn target_offset(start_offset: f64, viewport_top: f64, cell_top: f64, spacing_y: f64) -> f64 {
    start_offset + (viewport_top - cell_top) - spacing_y
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Repositioning,
}

/// An in-flight slide. Exists from the frame a slide starts until its
/// progress reaches 1.0 or a newer slide replaces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub focused: WidgetId,
    pub start_time: f64,
    pub start_offset: f64,
    pub target_offset: f64,
    /// Fixed when the slide starts; later speed changes apply to the next
    /// slide only.
    pub duration: f64,
}

impl ScrollState {
    /// Fraction of the slide completed at `now`. A slide with nothing to
    /// move is complete from its first frame.
    pub fn progress(&self, now: f64) -> f64 {
        if (self.target_offset - self.start_offset).abs() < f64::EPSILON {
            return 1.0;
        }
        (now - self.start_time) / self.duration
    }

    pub fn offset_at(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        self.start_offset + (self.target_offset - self.start_offset) * t
    }
}

/// Slides the grid container so the focused button stays visible.
///
/// Driven by the host once per frame through [`ScrollAnimator::tick`].
/// A slide starts only on the frame focus moves to a different button,
/// and only when that button sits outside the viewport.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    config: ScrollConfig,
    clock: f64,
    previous: Option<WidgetId>,
    state: Option<ScrollState>,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            clock: 0.0,
            previous: None,
            state: None,
        }
    }

    /// Reset to a fresh, idle animator. Call once before the first tick
    /// and whenever the host rebuilds the grid.
    pub fn initialize(&mut self) {
        self.clock = 0.0;
        self.previous = None;
        self.state = None;
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Takes effect from the next slide; a running slide keeps its duration.
    pub fn set_scroll_speed(&mut self, speed: f64) {
        self.config.scroll_speed = speed;
    }

    /// Duration the next slide will take at the configured speed.
    pub fn duration(&self) -> f64 {
        slide_duration(self.config.scroll_speed)
    }

    pub fn phase(&self) -> ScrollPhase {
        if self.state.is_some() {
            ScrollPhase::Repositioning
        } else {
            ScrollPhase::Idle
        }
    }

    pub fn state(&self) -> Option<&ScrollState> {
        self.state.as_ref()
    }

    /// Seconds of host time seen since [`ScrollAnimator::initialize`].
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Advance one frame of `dt` seconds.
    pub fn tick(
        &mut self,
        dt: f64,
        focus: &FocusState,
        grid: &ButtonGrid,
        viewport: &Rect,
        container: &mut ScrollContainer,
    ) -> ScrollPhase {
        self.clock += dt.max(0.0);
        self.advance(container);

        let current = focus.current().filter(|id| grid.is_active(*id));
        if current != self.previous
            && let Some(id) = current
        {
            self.on_focus_changed(id, grid, viewport, container);
        }
        self.previous = current;

        self.phase()
    }

    /// Begin sliding the container toward `target`. The first step runs
    /// immediately, so a slide with no distance finishes right here.
    pub fn start_slide(&mut self, focused: WidgetId, target: f64, container: &mut ScrollContainer) {
        let state = ScrollState {
            focused,
            start_time: self.clock,
            start_offset: container.offset(),
            target_offset: target,
            duration: self.duration(),
        };
        log::debug!(
            "sliding container from {:.2} to {:.2} for button {focused}",
            state.start_offset,
            state.target_offset
        );
        self.state = Some(state);
        self.advance(container);
    }

    fn on_focus_changed(
        &mut self,
        id: WidgetId,
        grid: &ButtonGrid,
        viewport: &Rect,
        container: &mut ScrollContainer,
    ) {
        let Some(cell) = grid.cell(id, container) else {
            return;
        };
        let metrics = grid.metrics();
        if !is_out_of_bounds(&cell, metrics, viewport) {
            return;
        }

        if let Some(running) = &self.state {
            match self.config.retrigger {
                RetriggerPolicy::Drop => {
                    log::debug!(
                        "slide for button {} in flight, dropping trigger for {id}",
                        running.focused
                    );
                    return;
                }
                RetriggerPolicy::Supersede => {
                    log::debug!("superseding slide for button {}", running.focused);
                }
            }
        }

        let cell_top = cell.center.y + metrics.half_height();
        let target = target_offset(container.offset(), viewport.top(), cell_top, metrics.spacing.y);
        self.start_slide(id, target, container);
    }

    fn advance(&mut self, container: &mut ScrollContainer) {
        let Some(state) = self.state else {
            return;
        };
        let progress = state.progress(self.clock);
        container.set_offset(state.offset_at(progress));
        if progress >= 1.0 {
            log::debug!("slide for button {} complete", state.focused);
            self.state = None;
        }
    }
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use gridscroll_protocol::Point;

    use super::*;
    use crate::grid::ButtonTemplate;
    use crate::layout::{LayoutMetrics, Size, Spacing};

    const FRAME: f64 = 1.0 / 60.0;

    fn viewport() -> Rect {
        Rect::new(0.0, -300.0, 800.0, 600.0)
    }

    fn grid(spacing_y: f64) -> ButtonGrid {
        let metrics = LayoutMetrics {
            cell_size: Size::new(100.0, 100.0),
            spacing: Spacing::new(0.0, spacing_y),
            columns: 1,
            ..LayoutMetrics::default()
        };
        let mut g = ButtonGrid::new(ButtonTemplate::default(), metrics).unwrap_or_else(|e| panic!("{e}"));
        g.insert_multiple_buttons(10).unwrap_or_default();
        g
    }

    fn focus_on(grid: &ButtonGrid, row: usize) -> FocusState {
        let mut focus = FocusState::new();
        if let Some(id) = grid.at(row, 0) {
            focus.focus(id);
        }
        focus
    }

    fn run(
        animator: &mut ScrollAnimator,
        seconds: f64,
        focus: &FocusState,
        grid: &ButtonGrid,
        container: &mut ScrollContainer,
    ) {
        let frames = (seconds / FRAME).ceil() as usize;
        for _ in 0..frames {
            animator.tick(FRAME, focus, grid, &viewport(), container);
        }
    }

    #[test]
    fn duration_never_divides_by_zero() {
        assert!((slide_duration(0.0) - 100.0).abs() < 1e-9);
        assert!(slide_duration(0.0).is_finite());
        assert!((slide_duration(1.0) - 1.0 / 1.01).abs() < 1e-12);
    }

    #[test]
    fn target_subtracts_one_spacing() {
        assert!((target_offset(450.0, 300.0, 450.0, 10.0) - 290.0).abs() < f64::EPSILON);
        assert!((target_offset(300.0, 300.0, -300.0, 0.0) - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn offset_is_clamped_lerp() {
        let state = ScrollState {
            focused: WidgetId(0),
            start_time: 0.0,
            start_offset: 100.0,
            target_offset: 200.0,
            duration: 1.0,
        };
        assert!((state.offset_at(0.5) - 150.0).abs() < f64::EPSILON);
        assert!((state.offset_at(1.7) - 200.0).abs() < f64::EPSILON);
        assert!((state.offset_at(-1.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn in_bounds_focus_stays_idle() {
        let g = grid(0.0);
        let mut container = ScrollContainer::aligned_to(&viewport());
        let mut animator = ScrollAnimator::default();
        let focus = focus_on(&g, 2);
        let phase = animator.tick(FRAME, &focus, &g, &viewport(), &mut container);
        assert_eq!(phase, ScrollPhase::Idle);
        assert!((container.offset() - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn focus_below_viewport_slides_container_up() {
        let g = grid(0.0);
        let mut container = ScrollContainer::aligned_to(&viewport());
        let mut animator = ScrollAnimator::default();
        let focus = focus_on(&g, 6);

        let phase = animator.tick(FRAME, &focus, &g, &viewport(), &mut container);
        assert_eq!(phase, ScrollPhase::Repositioning);
        assert!((animator.state().map_or(0.0, |s| s.target_offset) - 900.0).abs() < 1e-9);

        run(&mut animator, 0.5, &focus, &g, &mut container);
        assert_eq!(animator.phase(), ScrollPhase::Repositioning);
        assert!(container.offset() > 300.0 && container.offset() < 900.0);

        run(&mut animator, 0.6, &focus, &g, &mut container);
        assert_eq!(animator.phase(), ScrollPhase::Idle);
        assert!((container.offset() - 900.0).abs() < 1e-9);
    }

    #[test]
    fn same_focus_does_not_retrigger() {
        let g = grid(0.0);
        let mut container = ScrollContainer::aligned_to(&viewport());
        let mut animator = ScrollAnimator::default();
        let focus = focus_on(&g, 0);
        animator.tick(FRAME, &focus, &g, &viewport(), &mut container);
        assert_eq!(animator.phase(), ScrollPhase::Idle);

        // Push the focused cell out of view without changing focus.
        container.set_offset(1000.0);
        animator.tick(FRAME, &focus, &g, &viewport(), &mut container);
        assert_eq!(animator.phase(), ScrollPhase::Idle);
        assert!((container.offset() - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn drop_policy_ignores_trigger_while_sliding() {
        let g = grid(0.0);
        let mut container = ScrollContainer::aligned_to(&viewport());
        let mut animator = ScrollAnimator::default();

        let first = focus_on(&g, 6);
        animator.tick(FRAME, &first, &g, &viewport(), &mut container);
        let second = focus_on(&g, 9);
        animator.tick(FRAME, &second, &g, &viewport(), &mut container);

        assert_eq!(animator.state().map(|s| s.focused), first.current());
    }

    #[test]
    fn supersede_policy_restarts_from_current_offset() {
        let g = grid(0.0);
        let mut container = ScrollContainer::aligned_to(&viewport());
        let mut animator = ScrollAnimator::new(ScrollConfig {
            retrigger: RetriggerPolicy::Supersede,
            ..ScrollConfig::default()
        });

        let first = focus_on(&g, 6);
        animator.tick(FRAME, &first, &g, &viewport(), &mut container);
        run(&mut animator, 0.2, &first, &g, &mut container);
        let mid = container.offset();

        let second = focus_on(&g, 9);
        animator.tick(FRAME, &second, &g, &viewport(), &mut container);
        let Some(state) = animator.state().copied() else {
            panic!("expected a running slide");
        };
        assert_eq!(Some(state.focused), second.current());
        assert!(state.start_offset >= mid);
        // Row 9 top edge lands on the viewport top.
        let expected = 300.0 + 900.0;
        assert!((state.target_offset - expected).abs() < 1e-6);
    }

    #[test]
    fn speed_change_mid_slide_keeps_running_duration() {
        let g = grid(0.0);
        let mut container = ScrollContainer::aligned_to(&viewport());
        let mut animator = ScrollAnimator::default();
        let focus = focus_on(&g, 8);

        for _ in 0..10 {
            animator.tick(0.01, &focus, &g, &viewport(), &mut container);
        }
        let before = container.offset();
        let duration = animator.state().map(|s| s.duration);
        assert!(before > 300.0);

        animator.set_scroll_speed(0.0);
        animator.tick(0.0, &focus, &g, &viewport(), &mut container);
        assert!((container.offset() - before).abs() < 1e-9);
        assert_eq!(animator.state().map(|s| s.duration), duration);

        // The running slide still finishes on its original schedule.
        for _ in 0..100 {
            animator.tick(0.01, &focus, &g, &viewport(), &mut container);
        }
        assert_eq!(animator.phase(), ScrollPhase::Idle);
        assert!((animator.duration() - slide_duration(0.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_distance_slide_finishes_immediately() {
        let mut container = ScrollContainer::new(Point::new(0.0, 300.0));
        let mut animator = ScrollAnimator::default();
        animator.start_slide(WidgetId(0), 300.0, &mut container);
        assert_eq!(animator.phase(), ScrollPhase::Idle);
        assert!((container.offset() - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn initialize_clears_running_slide() {
        let mut container = ScrollContainer::new(Point::new(0.0, 0.0));
        let mut animator = ScrollAnimator::default();
        animator.start_slide(WidgetId(0), 500.0, &mut container);
        assert_eq!(animator.phase(), ScrollPhase::Repositioning);
        animator.initialize();
        assert_eq!(animator.phase(), ScrollPhase::Idle);
        assert!(animator.clock().abs() < f64::EPSILON);
    }
}
