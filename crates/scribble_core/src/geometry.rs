//! Logical canvas geometry and click hit-testing.
//!
//! Everything is laid out on a fixed 540 x 640 logical canvas with `y`
//! growing downward. Front ends scale this space to whatever surface they
//! draw on and map pointer positions back into it.

use crate::Position;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A point on the logical canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, derive_new::new)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate, growing downward.
    pub y: f32,
}

impl Point {
    /// Linear interpolation from `self` toward `to` at fraction `t`.
    pub fn lerp(self, to: Point, t: f32) -> Point {
        Point::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }

    /// Translates by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle, inclusive of its edges for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, derive_new::new)]
pub struct Rect {
    /// Top-left corner.
    pub min: Point,
    /// Bottom-right corner.
    pub max: Point,
}

impl Rect {
    /// Rectangle from corner coordinates.
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// Square of half-size `half` around `center`.
    pub fn around(center: Point, half: f32) -> Self {
        Self::from_coords(center.x - half, center.y - half, center.x + half, center.y + half)
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center point.
    pub fn center(&self) -> Point {
        self.min.lerp(self.max, 0.5)
    }

    /// Edge-inclusive containment.
    pub fn contains(&self, point: Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

/// What a pointer click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A board cell.
    Cell(Position),
    /// The "New Game" control.
    Reset,
    /// Anything else.
    Outside,
}

/// Placement of the board, controls and confetti area on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Canvas width.
    width: f32,
    /// Canvas height.
    height: f32,
    /// Horizontal margin around the board.
    margin: f32,
    /// Distance between neighbouring cell origins.
    cell: f32,
    /// Top edge of the board.
    board_top: f32,
    /// Gap between a cell's grid box and its tile.
    tile_inset: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        let width = 540.0;
        let margin = 40.0;
        Self {
            width,
            height: 640.0,
            margin,
            cell: ((width - margin * 2.0) / 3.0).floor(),
            board_top: 110.0,
            tile_inset: 8.0,
        }
    }
}

impl BoardLayout {
    /// The whole canvas.
    pub fn canvas(&self) -> Rect {
        Rect::from_coords(0.0, 0.0, self.width, self.height)
    }

    /// Left edge of the board.
    pub fn board_left(&self) -> f32 {
        self.margin
    }

    /// Side length of the 3x3 grid.
    pub fn board_size(&self) -> f32 {
        self.cell * 3.0
    }

    /// The clickable tile of a cell.
    pub fn cell_rect(&self, pos: Position) -> Rect {
        let x1 = self.board_left() + pos.column() as f32 * self.cell + self.tile_inset;
        let y1 = self.board_top + pos.row() as f32 * self.cell + self.tile_inset;
        let side = self.cell - self.tile_inset * 2.0;
        Rect::from_coords(x1, y1, x1 + side, y1 + side)
    }

    /// Center of a cell's tile.
    pub fn cell_center(&self, pos: Position) -> Point {
        self.cell_rect(pos).center()
    }

    /// Half the side of a drawn mark.
    pub fn mark_half_size(&self) -> f32 {
        self.cell * 0.28
    }

    /// Bounds of the "New Game" button.
    pub fn reset_button(&self) -> Rect {
        let cx = (self.width / 2.0).floor();
        Rect::from_coords(cx - 70.0, self.height - 80.0, cx + 70.0, self.height - 40.0)
    }

    /// Header card behind the title and status line.
    pub fn header(&self) -> Rect {
        Rect::from_coords(self.margin, 10.0, self.width - self.margin, 90.0)
    }

    /// Anchor of the status line.
    pub fn status_anchor(&self) -> Point {
        Point::new((self.width / 2.0).floor(), 60.0)
    }

    /// Anchor of the title.
    pub fn title_anchor(&self) -> Point {
        Point::new((self.width / 2.0).floor(), 30.0)
    }

    /// Anchor of the hint line under the reset button.
    pub fn hint_anchor(&self) -> Point {
        Point::new((self.width / 2.0).floor(), self.height - 20.0)
    }

    /// Region confetti particles spawn in.
    pub fn confetti_spawn(&self) -> Rect {
        Rect::from_coords(
            self.margin,
            self.board_top + 10.0,
            self.width - self.margin,
            self.height - 160.0,
        )
    }

    /// Particles below this `y` have left the visible area.
    pub fn confetti_floor(&self) -> f32 {
        self.height - 20.0
    }

    /// Maps a canvas point to the cell, control or empty space under it.
    ///
    /// The reset button wins over cells where they would overlap.
    #[instrument(skip(self))]
    pub fn hit_test(&self, point: Point) -> ClickTarget {
        if self.reset_button().contains(point) {
            return ClickTarget::Reset;
        }
        Position::ALL
            .iter()
            .find(|pos| self.cell_rect(**pos).contains(point))
            .map_or(ClickTarget::Outside, |pos| ClickTarget::Cell(*pos))
    }
}
