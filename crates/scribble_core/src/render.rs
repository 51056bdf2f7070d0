//! Rendering collaborator interface and a retained display list.

use crate::Player;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blends toward `other` at fraction `t` (clamped to `0..=1`).
    pub fn blend(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Typeface roles; renderers pick the actual face and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    /// Header title.
    Title,
    /// Status line in the header.
    Status,
    /// Button label.
    Button,
    /// Small print.
    Hint,
    /// A finished mark drawn as a large handwritten letter.
    Glyph,
}

/// Something that can be put on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        rect: Rect,
        /// Fill color.
        fill: Rgb,
    },
    /// Filled ellipse inscribed in `rect`.
    Oval {
        /// Bounding box.
        rect: Rect,
        /// Fill color.
        fill: Rgb,
    },
    /// Round-capped line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Rgb,
    },
    /// Unfilled elliptical arc.
    ///
    /// Angles are in degrees, counter-clockwise from three o'clock.
    Arc {
        /// Bounding box of the full ellipse.
        bounds: Rect,
        /// Start angle.
        start_deg: f32,
        /// Sweep, counter-clockwise.
        extent_deg: f32,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Rgb,
    },
    /// Text centered on `anchor`.
    Text {
        /// Center of the text.
        anchor: Point,
        /// Content.
        text: String,
        /// Typeface role.
        font: Font,
        /// Text color.
        color: Rgb,
    },
}

impl Shape {
    /// Large handwritten letter for a finished mark.
    pub fn glyph(center: Point, player: Player, color: Rgb) -> Self {
        Shape::Text {
            anchor: center,
            text: player.to_string(),
            font: Font::Glyph,
            color,
        }
    }
}

/// Identifies a drawn shape so it can be replaced or removed.
///
/// Handles grow monotonically; later handles paint over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(u64);

/// Drawing surface the game controller paints through.
pub trait Renderer {
    /// Adds a shape on top of everything drawn so far.
    fn draw(&mut self, shape: Shape) -> Handle;

    /// Replaces a drawn shape in place, keeping its stacking order.
    fn replace(&mut self, handle: Handle, shape: Shape);

    /// Removes a drawn shape; unknown handles are ignored.
    fn remove(&mut self, handle: Handle);

    /// Removes everything.
    fn clear(&mut self);
}

/// Retained list of shapes in paint order.
///
/// Serves as the renderer for headless play and tests, and as the scene
/// store behind pixel front ends.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    shapes: BTreeMap<Handle, Shape>,
    next: u64,
}

impl DisplayList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes in paint order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Shape)> {
        self.shapes.iter().map(|(handle, shape)| (*handle, shape))
    }

    /// Looks up a shape.
    pub fn get(&self, handle: Handle) -> Option<&Shape> {
        self.shapes.get(&handle)
    }

    /// Number of retained shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True when nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Every text currently drawn with `font`.
    pub fn texts(&self, font: Font) -> Vec<&str> {
        self.shapes
            .values()
            .filter_map(|shape| match shape {
                Shape::Text { text, font: f, .. } if *f == font => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Counts shapes matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Shape) -> bool) -> usize {
        self.shapes.values().filter(|shape| predicate(shape)).count()
    }
}

impl Renderer for DisplayList {
    fn draw(&mut self, shape: Shape) -> Handle {
        let handle = Handle(self.next);
        self.next += 1;
        trace!(?handle, "Drawing shape");
        self.shapes.insert(handle, shape);
        handle
    }

    fn replace(&mut self, handle: Handle, shape: Shape) {
        if let Some(slot) = self.shapes.get_mut(&handle) {
            *slot = shape;
        }
    }

    fn remove(&mut self, handle: Handle) {
        self.shapes.remove(&handle);
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot() -> Shape {
        Shape::Oval {
            rect: Rect::from_coords(0.0, 0.0, 1.0, 1.0),
            fill: Rgb(1, 2, 3),
        }
    }

    #[test]
    fn test_handles_keep_paint_order_across_replace() {
        let mut list = DisplayList::new();
        let a = list.draw(dot());
        let b = list.draw(dot());
        list.replace(a, Shape::glyph(Point::new(1.0, 1.0), Player::X, Rgb(0, 0, 0)));
        let order: Vec<_> = list.iter().map(|(h, _)| h).collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(list.texts(Font::Glyph), vec!["X"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut list = DisplayList::new();
        let a = list.draw(dot());
        list.draw(dot());
        list.remove(a);
        list.remove(a);
        assert_eq!(list.len(), 1);
        list.clear();
        assert!(list.is_empty());
        // Handles are never reused after a clear.
        assert!(list.draw(dot()) > a);
    }

    #[test]
    fn test_blend_endpoints() {
        let top = Rgb(28, 40, 80);
        let bottom = Rgb(15, 135, 185);
        assert_eq!(top.blend(bottom, 0.0), top);
        assert_eq!(top.blend(bottom, 1.0), bottom);
        assert_eq!(top.to_string(), "#1c2850");
    }
}
