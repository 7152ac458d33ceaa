use std::cell::RefCell;
use std::io::stdout;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gridscroll_core::views::grid::render_grid;
use gridscroll_core::{
    ButtonGrid, ButtonHandle, Direction, FocusState, Refocuser, ScrollAnimator, ScrollConfig, ScrollContainer,
    ScrollPhase, WidgetId,
};
use gridscroll_protocol::{Rect as WorldRect, RenderCommand, ThemeToken};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};

type StatusLine = Rc<RefCell<String>>;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::ViewportBorder => Color::DarkGray,
        ThemeToken::ButtonIdle => Color::Rgb(49, 50, 68),
        ThemeToken::ButtonFocused => Color::Rgb(137, 180, 250),
        ThemeToken::ButtonBorder => Color::Gray,
        ThemeToken::ButtonText => Color::White,
        ThemeToken::ButtonFocusedText => Color::Black,
        ThemeToken::ScrollbarTrack => Color::Rgb(30, 30, 46),
        ThemeToken::ScrollbarThumb => Color::Gray,
    }
}

/// Give the button a callback that reports its current label.
fn wire_button(grid: &mut ButtonGrid, id: WidgetId, status: &StatusLine) {
    let Some(handle) = grid.get_mut(id) else {
        return;
    };
    let label = handle.label().to_owned();
    let status = Rc::clone(status);
    handle.assign_callback(move || *status.borrow_mut() = format!("clicked {label}"));
}

pub fn render_tui(mut grid: ButtonGrid, config: ScrollConfig) -> Result<()> {
    let status: StatusLine = Rc::new(RefCell::new(String::new()));
    let ids: Vec<WidgetId> = grid.iter_active().map(ButtonHandle::id).collect();
    for id in ids {
        wire_button(&mut grid, id, &status);
    }

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut focus = FocusState::new();
    let mut animator = ScrollAnimator::new(config);
    animator.initialize();
    // Placed against the first measured viewport.
    let mut placed: Option<ScrollContainer> = None;
    let mut last_frame = Instant::now();

    loop {
        let term_size = terminal.size()?;
        let viewport = WorldRect::new(
            0.0,
            -f64::from(term_size.height.saturating_sub(2)),
            f64::from(term_size.width),
            f64::from(term_size.height.saturating_sub(2)),
        );
        let container = placed.get_or_insert_with(|| ScrollContainer::aligned_to(&viewport));

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        Refocuser.refocus(&mut focus, &grid);
        let phase = animator.tick(dt, &focus, &grid, &viewport, container);
        let cmds = render_grid(&grid, container, &viewport, &focus);

        terminal.draw(|frame| {
            let area = frame.area();

            let header = Block::default()
                .title(format!(
                    " gridscroll — {} buttons | arrows/hjkl move | enter click | i/x insert/remove | +/- speed | q quit ",
                    grid.count()
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, Rect::new(0, 0, area.width, 1));

            let content = Rect::new(0, 1, area.width, area.height.saturating_sub(2));
            draw_commands(frame.buffer_mut(), content, &cmds);

            let footer = Block::default()
                .title(format!(" {} ", status.borrow()))
                .style(Style::default().fg(Color::Gray).bg(Color::Black));
            frame.render_widget(footer, Rect::new(0, area.height.saturating_sub(1), area.width, 1));
        })?;

        let timeout = match phase {
            ScrollPhase::Repositioning => Duration::from_millis(16),
            ScrollPhase::Idle => Duration::from_millis(100),
        };
        if !event::poll(timeout)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Up | KeyCode::Char('k') => {
                focus.move_focus(&grid, Direction::Up);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                focus.move_focus(&grid, Direction::Down);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                focus.move_focus(&grid, Direction::Left);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                focus.move_focus(&grid, Direction::Right);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = focus.current() {
                    grid.click(id);
                }
            }
            KeyCode::Char('i') => match grid.insert_new_button() {
                Ok(id) => {
                    wire_button(&mut grid, id, &status);
                    focus.focus(id);
                }
                Err(e) => *status.borrow_mut() = format!("insert failed: {e}"),
            },
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = animator.config().scroll_speed * 1.5;
                animator.set_scroll_speed(speed);
                *status.borrow_mut() = format!("scroll speed {speed:.2}");
            }
            KeyCode::Char('-') => {
                let speed = animator.config().scroll_speed / 1.5;
                animator.set_scroll_speed(speed);
                *status.borrow_mut() = format!("scroll speed {speed:.2}");
            }
            KeyCode::Char('x') => {
                let position = focus
                    .current()
                    .and_then(|id| grid.get(id))
                    .map(ButtonHandle::position);
                if let Some((row, col)) = position
                    && let Err(e) = grid.remove_button(row, col)
                {
                    *status.borrow_mut() = format!("remove failed: {e}");
                }
            }
            _ => {}
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Paint viewport-local render commands into `area`, one world unit per cell.
fn draw_commands(buf: &mut Buffer, area: Rect, cmds: &[RenderCommand]) {
    let mut clip = area;
    for cmd in cmds {
        match cmd {
            RenderCommand::SetClip { rect } => {
                clip = to_cells(area, rect).intersection(area);
            }
            RenderCommand::ClearClip => clip = area,
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                ..
            } => {
                let bg = theme_to_color(*color);
                let text_fg = if *color == ThemeToken::ButtonFocused {
                    theme_to_color(ThemeToken::ButtonFocusedText)
                } else {
                    theme_to_color(ThemeToken::ButtonText)
                };
                fill(buf, area, clip, rect, bg, border_color.map(theme_to_color));
                if let Some(label) = label {
                    let y = rect.y + (rect.h / 2.0).floor();
                    let x = rect.x + ((rect.w - label.chars().count() as f64) / 2.0).max(0.0).floor();
                    put_str(buf, area, clip, x, y, label, text_fg, bg);
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
            } => {
                let x = position.x - (text.chars().count() as f64 / 2.0).floor();
                put_str(buf, area, clip, x, position.y, text, theme_to_color(*color), Color::Black);
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

fn to_cells(area: Rect, rect: &WorldRect) -> Rect {
    let x = (f64::from(area.x) + rect.x).max(0.0) as u16;
    let y = (f64::from(area.y) + rect.y).max(0.0) as u16;
    Rect::new(x, y, rect.w.max(0.0) as u16, rect.h.max(0.0) as u16)
}

fn cell_visible(clip: Rect, x: i32, y: i32) -> bool {
    x >= i32::from(clip.x)
        && y >= i32::from(clip.y)
        && x < i32::from(clip.x) + i32::from(clip.width)
        && y < i32::from(clip.y) + i32::from(clip.height)
}

fn fill(buf: &mut Buffer, area: Rect, clip: Rect, rect: &WorldRect, bg: Color, border: Option<Color>) {
    let x0 = i32::from(area.x) + rect.x.round() as i32;
    let y0 = i32::from(area.y) + rect.y.round() as i32;
    let w = rect.w.round() as i32;
    let h = rect.h.round() as i32;
    for dy in 0..h {
        for dx in 0..w {
            let (x, y) = (x0 + dx, y0 + dy);
            if !cell_visible(clip, x, y) {
                continue;
            }
            let edge = dx == 0 || dy == 0 || dx == w - 1 || dy == h - 1;
            let cell = &mut buf[(x as u16, y as u16)];
            match border {
                Some(fg) if edge && w >= 2 && h >= 3 => {
                    let ch = match (dx == 0 || dx == w - 1, dy == 0 || dy == h - 1) {
                        (true, true) => '+',
                        (true, false) => '│',
                        _ => '─',
                    };
                    cell.set_char(ch).set_fg(fg).set_bg(bg);
                }
                _ => {
                    cell.set_char(' ').set_bg(bg);
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn put_str(buf: &mut Buffer, area: Rect, clip: Rect, x: f64, y: f64, text: &str, fg: Color, bg: Color) {
    let x0 = i32::from(area.x) + x.round() as i32;
    let y = i32::from(area.y) + y.round() as i32;
    for (i, ch) in text.chars().enumerate() {
        let x = x0 + i as i32;
        if cell_visible(clip, x, y) {
            buf[(x as u16, y as u16)].set_char(ch).set_fg(fg).set_bg(bg);
        }
    }
}
