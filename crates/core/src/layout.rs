use gridscroll_protocol::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub x: f64,
    pub y: f64,
}

impl Spacing {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Padding {
    pub fn uniform(p: f64) -> Self {
        Self {
            top: p,
            bottom: p,
            left: p,
            right: p,
        }
    }
}

/// Cell geometry shared by every button in a grid.
///
/// Read-only while a slide is in flight. Cell sizes are taken as given;
/// zero or negative sizes are not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub cell_size: Size,
    pub spacing: Spacing,
    pub padding: Padding,
    /// Maximum number of slots per row.
    pub columns: usize,
}

impl LayoutMetrics {
    pub fn half_width(&self) -> f64 {
        self.cell_size.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.cell_size.height / 2.0
    }

    /// World-space (y-up) center of the cell at `(row, col)` for a
    /// container whose top-left corner sits at `container`.
    pub fn cell_center(&self, container: Point, row: usize, col: usize) -> Point {
        let x = container.x
            + self.padding.left
            + col as f64 * (self.cell_size.width + self.spacing.x)
            + self.half_width();
        let y = container.y
            - self.padding.top
            - row as f64 * (self.cell_size.height + self.spacing.y)
            - self.half_height();
        Point::new(x, y)
    }

    pub fn cell_rect(&self, container: Point, row: usize, col: usize) -> Rect {
        Rect::from_center(
            self.cell_center(container, row, col),
            self.cell_size.width,
            self.cell_size.height,
        )
    }

    /// Total height of a container holding `rows` rows, padding included.
    pub fn content_height(&self, rows: usize) -> f64 {
        if rows == 0 {
            return self.padding.top + self.padding.bottom;
        }
        self.padding.top
            + self.padding.bottom
            + rows as f64 * self.cell_size.height
            + (rows - 1) as f64 * self.spacing.y
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            cell_size: Size::new(100.0, 100.0),
            spacing: Spacing::default(),
            padding: Padding::default(),
            columns: 1,
        }
    }
}

/// The transform that parents every button. The scroll animator moves it
/// vertically; `position` is the world-space top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollContainer {
    pub position: Point,
}

impl ScrollContainer {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    /// Place the container so its top-left corner matches the viewport's.
    pub fn aligned_to(viewport: &Rect) -> Self {
        Self::new(Point::new(viewport.left(), viewport.top()))
    }

    pub fn offset(&self) -> f64 {
        self.position.y
    }

    pub fn set_offset(&mut self, y: f64) {
        self.position.y = y;
    }
}
