//! Hand-drawn stroke frames for X and O.

use crate::geometry::{BoardLayout, Point, Rect};
use crate::settings::AnimationSettings;
use crate::{Player, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Angle the O stroke starts from, in degrees (twelve o'clock).
pub const ARC_START_DEG: f32 = 90.0;

/// Wobble applied to stroke starts at progress `t`.
///
/// Smallest at the ends of the animation, largest halfway through.
pub fn jitter(t: f32) -> f32 {
    4.0 * (1.0 - (0.5 - t).abs())
}

/// A straight stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct Segment {
    /// Where the pen went down.
    pub from: Point,
    /// Where the pen is now.
    pub to: Point,
}

/// What one frame of a mark animation shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarkFrame {
    /// Two partial X strokes, growing together.
    Strokes([Segment; 2]),
    /// A partial O.
    Arc {
        /// Bounding box of the full circle.
        bounds: Rect,
        /// Where the arc begins.
        start_deg: f32,
        /// How far it has been swept.
        extent_deg: f32,
    },
    /// Final frame: partial strokes give way to the finished glyph.
    Glyph,
}

/// Frame generator for one mark being drawn into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct MarkAnimation {
    /// Whose mark is drawn.
    player: Player,
    /// The cell being drawn into.
    position: Position,
    /// Center of the mark.
    center: Point,
    /// Half the side of the mark's bounding square.
    half_size: f32,
    /// Index of the final frame.
    max_steps: u32,
}

impl MarkAnimation {
    /// Creates an animation; `max_steps` is at least one.
    pub fn new(
        player: Player,
        position: Position,
        center: Point,
        half_size: f32,
        max_steps: u32,
    ) -> Self {
        Self {
            player,
            position,
            center,
            half_size,
            max_steps: max_steps.max(1),
        }
    }

    /// Animation for `player` moving at `position`, sized and paced per the
    /// layout and settings.
    pub fn for_move(
        player: Player,
        position: Position,
        layout: &BoardLayout,
        settings: &AnimationSettings,
    ) -> Self {
        let steps = match player {
            Player::X => settings.x_steps,
            Player::O => settings.o_steps,
        };
        Self::new(
            player,
            position,
            layout.cell_center(position),
            layout.mark_half_size(),
            steps,
        )
    }

    /// Bounding square of the mark.
    pub fn bounds(&self) -> Rect {
        Rect::around(self.center, self.half_size)
    }

    /// Progress of `step` in `0..=1`.
    pub fn progress(&self, step: u32) -> f32 {
        step.min(self.max_steps) as f32 / self.max_steps as f32
    }

    /// The frame shown at `step`; steps at or past `max_steps` are final.
    pub fn frame(&self, step: u32) -> MarkFrame {
        if step >= self.max_steps {
            return MarkFrame::Glyph;
        }
        let t = self.progress(step);
        match self.player {
            Player::X => MarkFrame::Strokes(self.cross_strokes(t)),
            Player::O => MarkFrame::Arc {
                bounds: self.bounds(),
                start_deg: ARC_START_DEG,
                extent_deg: 360.0 * t,
            },
        }
    }

    fn cross_strokes(&self, t: f32) -> [Segment; 2] {
        let Point { x: cx, y: cy } = self.center;
        let s = self.half_size;
        let a_start = Point::new(cx - s, cy - s);
        let a_end = Point::new(cx + s, cy + s);
        let b_start = Point::new(cx - s, cy + s);
        let b_end = Point::new(cx + s, cy - s);

        let j = jitter(t);
        [
            Segment::new(a_start.offset(j, j), a_start.lerp(a_end, t)),
            Segment::new(b_start.offset(-j, j), b_start.lerp(b_end, t)),
        ]
    }
}
