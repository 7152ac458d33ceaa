use gridscroll_protocol::{Point, Rect, RenderCommand, ThemeToken};

use crate::focus::FocusState;
use crate::grid::ButtonGrid;
use crate::layout::ScrollContainer;

/// Width of the scrollbar strip along the viewport's right edge.
const SCROLLBAR_WIDTH: f64 = 1.0;

/// Render the visible part of the grid.
///
/// Commands are in viewport-local coordinates with the origin at the
/// viewport's top-left corner and y growing downward. Buttons entirely
/// outside the viewport are skipped.
pub fn render_grid(
    grid: &ButtonGrid,
    container: &ScrollContainer,
    viewport: &Rect,
    focus: &FocusState,
) -> Vec<RenderCommand> {
    let local_viewport = Rect::new(0.0, 0.0, viewport.w, viewport.h);
    let mut commands = Vec::with_capacity(grid.count() + 8);

    commands.push(RenderCommand::BeginGroup {
        id: "button-grid".into(),
        label: Some("Button Grid".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: local_viewport,
        color: ThemeToken::Background,
        border_color: Some(ThemeToken::ViewportBorder),
        label: None,
        cell: None,
    });
    commands.push(RenderCommand::SetClip {
        rect: local_viewport,
    });

    if grid.is_empty() {
        commands.push(RenderCommand::DrawText {
            position: Point::new(viewport.w / 2.0, viewport.h / 2.0),
            text: "No buttons".into(),
            color: ThemeToken::ButtonText,
        });
    }

    let metrics = grid.metrics();
    for handle in grid.iter_active() {
        let (row, col) = handle.position();
        let rect = metrics.cell_rect(container.position, row, col);
        if !rect.intersects(viewport) {
            continue;
        }
        let focused = focus.current() == Some(handle.id());
        commands.push(RenderCommand::DrawRect {
            rect: to_local(&rect, viewport),
            color: if focused {
                ThemeToken::ButtonFocused
            } else {
                ThemeToken::ButtonIdle
            },
            border_color: Some(ThemeToken::ButtonBorder),
            label: Some(handle.label().to_owned()),
            cell: Some((row, col)),
        });
    }

    push_scrollbar(&mut commands, grid, container, viewport);

    commands.push(RenderCommand::ClearClip);
    commands.push(RenderCommand::EndGroup);
    commands
}

/// World (y-up) rect to viewport-local (y-down) rect.
fn to_local(rect: &Rect, viewport: &Rect) -> Rect {
    Rect::new(
        rect.left() - viewport.left(),
        viewport.top() - rect.top(),
        rect.w,
        rect.h,
    )
}

fn push_scrollbar(
    commands: &mut Vec<RenderCommand>,
    grid: &ButtonGrid,
    container: &ScrollContainer,
    viewport: &Rect,
) {
    let content = grid.metrics().content_height(grid.row_count());
    if content <= viewport.h || viewport.h <= 0.0 {
        return;
    }
    let x = viewport.w - SCROLLBAR_WIDTH;
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(x, 0.0, SCROLLBAR_WIDTH, viewport.h),
        color: ThemeToken::ScrollbarTrack,
        border_color: None,
        label: None,
        cell: None,
    });

    // How far the content's top edge has moved above the viewport's top.
    let scrolled = (container.offset() - viewport.top()).clamp(0.0, content - viewport.h);
    let thumb_h = (viewport.h * viewport.h / content).max(1.0);
    let thumb_y = scrolled / (content - viewport.h) * (viewport.h - thumb_h);
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(x, thumb_y, SCROLLBAR_WIDTH, thumb_h),
        color: ThemeToken::ScrollbarThumb,
        border_color: None,
        label: None,
        cell: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ButtonTemplate;
    use crate::layout::{LayoutMetrics, Size};

    fn grid(n: usize) -> ButtonGrid {
        let metrics = LayoutMetrics {
            cell_size: Size::new(100.0, 100.0),
            columns: 2,
            ..LayoutMetrics::default()
        };
        let mut g = ButtonGrid::new(ButtonTemplate::default(), metrics).unwrap_or_else(|e| panic!("{e}"));
        g.insert_multiple_buttons(n).unwrap_or_default();
        g
    }

    fn buttons(cmds: &[RenderCommand]) -> Vec<(Rect, ThemeToken, (usize, usize))> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect {
                    rect,
                    color,
                    cell: Some(cell),
                    ..
                } => Some((*rect, *color, *cell)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn draws_only_visible_buttons() {
        let g = grid(20);
        let viewport = Rect::new(0.0, -300.0, 800.0, 600.0);
        let container = ScrollContainer::aligned_to(&viewport);
        let cmds = render_grid(&g, &container, &viewport, &FocusState::new());
        // 6 rows of 100 fit in 600, two columns each.
        assert_eq!(buttons(&cmds).len(), 12);
        assert!(matches!(cmds.first(), Some(RenderCommand::BeginGroup { .. })));
        assert!(matches!(cmds.last(), Some(RenderCommand::EndGroup)));
    }

    #[test]
    fn local_coordinates_grow_downward() {
        let g = grid(4);
        let viewport = Rect::new(0.0, -300.0, 800.0, 600.0);
        let container = ScrollContainer::aligned_to(&viewport);
        let cmds = render_grid(&g, &container, &viewport, &FocusState::new());
        let rects = buttons(&cmds);
        let second_row = rects.iter().find(|(_, _, cell)| *cell == (1, 1));
        let Some((rect, _, _)) = second_row else {
            panic!("row 1 not drawn");
        };
        assert!((rect.x - 100.0).abs() < f64::EPSILON);
        assert!((rect.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn focused_button_uses_focus_token() {
        let g = grid(4);
        let viewport = Rect::new(0.0, -300.0, 800.0, 600.0);
        let container = ScrollContainer::aligned_to(&viewport);
        let mut focus = FocusState::new();
        if let Some(id) = g.at(1, 0) {
            focus.focus(id);
        }
        let cmds = render_grid(&g, &container, &viewport, &focus);
        let focused: Vec<_> = buttons(&cmds)
            .into_iter()
            .filter(|(_, color, _)| *color == ThemeToken::ButtonFocused)
            .map(|(_, _, cell)| cell)
            .collect();
        assert_eq!(focused, vec![(1, 0)]);
    }

    #[test]
    fn scrollbar_only_when_content_overflows() {
        let viewport = Rect::new(0.0, -300.0, 800.0, 600.0);
        let container = ScrollContainer::aligned_to(&viewport);
        let thumb = |cmds: &[RenderCommand]| {
            cmds.iter().any(|c| {
                matches!(
                    c,
                    RenderCommand::DrawRect {
                        color: ThemeToken::ScrollbarThumb,
                        ..
                    }
                )
            })
        };
        assert!(!thumb(render_grid(&grid(4), &container, &viewport, &FocusState::new()).as_slice()));
        assert!(thumb(render_grid(&grid(40), &container, &viewport, &FocusState::new()).as_slice()));
    }

    #[test]
    fn empty_grid_shows_placeholder_text() {
        let g = grid(0);
        let viewport = Rect::new(0.0, 0.0, 80.0, 24.0);
        let container = ScrollContainer::aligned_to(&viewport);
        let cmds = render_grid(&g, &container, &viewport, &FocusState::new());
        assert!(cmds.iter().any(|c| matches!(c, RenderCommand::DrawText { .. })));
    }
}
