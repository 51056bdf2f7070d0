//! Pixel rasterizer for display-list shapes.
//!
//! Shapes live on the logical canvas; a [`Transform`] scales them into a
//! pixel grid. A pixel is painted when its center falls inside the shape,
//! except that very small shapes always get at least the pixel under their
//! center so confetti stays visible on small terminals.

use scribble_core::{Font, Player, Point, Rect, Rgb, Shape};

/// Half-extent of a finished glyph, in logical units.
pub const GLYPH_HALF: f32 = 24.0;
/// Stroke width of a finished glyph, in logical units.
pub const GLYPH_WIDTH: f32 = 10.0;
/// Narrowest stroke half-width in pixels.
const MIN_HALF_WIDTH: f32 = 0.6;

/// Uniform scale plus letterbox offset from logical units to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Pixels per logical unit.
    pub scale: f32,
    /// Left letterbox, in pixels.
    pub offset_x: f32,
    /// Top letterbox, in pixels.
    pub offset_y: f32,
}

impl Transform {
    /// Largest transform that fits `canvas` inside `width` x `height` pixels,
    /// centered.
    pub fn fit(canvas: Rect, width: f32, height: f32) -> Self {
        let scale = (width / canvas.width()).min(height / canvas.height()).max(f32::EPSILON);
        Self {
            scale,
            offset_x: (width - canvas.width() * scale) / 2.0,
            offset_y: (height - canvas.height() * scale) / 2.0,
        }
    }

    /// Logical point to pixel coordinates.
    pub fn to_pixel(&self, point: Point) -> Point {
        Point::new(
            self.offset_x + point.x * self.scale,
            self.offset_y + point.y * self.scale,
        )
    }

    /// Pixel coordinates back to a logical point.
    pub fn to_logical(&self, pixel: Point) -> Point {
        Point::new(
            (pixel.x - self.offset_x) / self.scale,
            (pixel.y - self.offset_y) / self.scale,
        )
    }

    fn rect(&self, rect: Rect) -> Rect {
        Rect::new(self.to_pixel(rect.min), self.to_pixel(rect.max))
    }

    fn half_width(&self, width: f32) -> f32 {
        (width * self.scale / 2.0).max(MIN_HALF_WIDTH)
    }
}

/// A grid of colored pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// Creates a raster filled with `background`.
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Paints one shape. Text other than finished glyphs is left to the
    /// caller, which draws it as terminal characters.
    pub fn paint(&mut self, shape: &Shape, tf: &Transform) {
        match shape {
            Shape::Rect { rect, fill } => self.fill_rect(tf.rect(*rect), *fill),
            Shape::Oval { rect, fill } => self.fill_oval(tf.rect(*rect), *fill),
            Shape::Line {
                from,
                to,
                width,
                color,
            } => self.stroke_line(
                tf.to_pixel(*from),
                tf.to_pixel(*to),
                tf.half_width(*width),
                *color,
            ),
            Shape::Arc {
                bounds,
                start_deg,
                extent_deg,
                width,
                color,
            } => self.stroke_arc(
                tf.rect(*bounds),
                *start_deg,
                *extent_deg,
                tf.half_width(*width),
                *color,
            ),
            Shape::Text {
                anchor,
                text,
                font: Font::Glyph,
                color,
            } => self.glyph(*anchor, text, *color, tf),
            Shape::Text { .. } => {}
        }
    }

    /// Outlines `rect` (logical units) with a stroke of `width`.
    pub fn outline(&mut self, rect: Rect, width: f32, color: Rgb, tf: &Transform) {
        let r = tf.rect(rect);
        let half = tf.half_width(width);
        let corners = [
            r.min,
            Point::new(r.max.x, r.min.y),
            r.max,
            Point::new(r.min.x, r.max.y),
        ];
        for i in 0..4 {
            self.stroke_line(corners[i], corners[(i + 1) % 4], half, color);
        }
    }

    fn glyph(&mut self, center: Point, text: &str, color: Rgb, tf: &Transform) {
        let half = tf.half_width(GLYPH_WIDTH);
        let c = tf.to_pixel(center);
        let s = GLYPH_HALF * tf.scale;
        if text == Player::X.to_string() {
            self.stroke_line(c.offset(-s, -s), c.offset(s, s), half, color);
            self.stroke_line(c.offset(-s, s), c.offset(s, -s), half, color);
        } else if text == Player::O.to_string() {
            self.stroke_arc(Rect::around(c, s), 0.0, 360.0, half, color);
        }
    }

    fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Plots the pixel under `point` when it lies on the raster.
    fn plot(&mut self, point: Point, color: Rgb) {
        if point.x >= 0.0 && point.y >= 0.0 {
            self.set(point.x as usize, point.y as usize, color);
        }
    }

    /// Indices of pixels whose centers fall in `lo..hi`.
    fn span(lo: f32, hi: f32, limit: usize) -> std::ops::Range<usize> {
        let start = (lo - 0.5).ceil().max(0.0) as usize;
        let end = ((hi - 0.5).ceil().max(0.0) as usize).min(limit);
        start.min(end)..end
    }

    fn fill_rect(&mut self, r: Rect, color: Rgb) {
        for y in Self::span(r.min.y, r.max.y, self.height) {
            for x in Self::span(r.min.x, r.max.x, self.width) {
                self.set(x, y, color);
            }
        }
    }

    fn fill_oval(&mut self, r: Rect, color: Rgb) {
        let c = r.center();
        let (rx, ry) = (r.width() / 2.0, r.height() / 2.0);
        if rx < 0.5 || ry < 0.5 {
            self.plot(c, color);
            return;
        }
        for y in Self::span(r.min.y, r.max.y, self.height) {
            for x in Self::span(r.min.x, r.max.x, self.width) {
                let dx = (x as f32 + 0.5 - c.x) / rx;
                let dy = (y as f32 + 0.5 - c.y) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.set(x, y, color);
                }
            }
        }
    }

    fn stroke_line(&mut self, a: Point, b: Point, half: f32, color: Rgb) {
        let min_x = a.x.min(b.x) - half;
        let max_x = a.x.max(b.x) + half;
        let min_y = a.y.min(b.y) - half;
        let max_y = a.y.max(b.y) + half;
        for y in Self::span(min_y, max_y, self.height) {
            for x in Self::span(min_x, max_x, self.width) {
                let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(p, a, b) <= half {
                    self.set(x, y, color);
                }
            }
        }
    }

    fn stroke_arc(&mut self, bounds: Rect, start_deg: f32, extent_deg: f32, half: f32, color: Rgb) {
        let c = bounds.center();
        let (rx, ry) = (bounds.width() / 2.0, bounds.height() / 2.0);
        if rx <= 0.0 || ry <= 0.0 || extent_deg == 0.0 {
            return;
        }
        let radius = rx.min(ry);
        for y in Self::span(bounds.min.y - half, bounds.max.y + half, self.height) {
            for x in Self::span(bounds.min.x - half, bounds.max.x + half, self.width) {
                let dx = (x as f32 + 0.5 - c.x) / rx;
                let dy = (y as f32 + 0.5 - c.y) / ry;
                let r = (dx * dx + dy * dy).sqrt();
                if (r - 1.0).abs() * radius > half {
                    continue;
                }
                // Screen y grows downward; angles run counter-clockwise.
                let angle = (-dy).atan2(dx).to_degrees();
                if in_sweep(angle, start_deg, extent_deg) {
                    self.set(x, y, color);
                }
            }
        }
    }
}

fn in_sweep(angle: f32, start: f32, extent: f32) -> bool {
    if extent.abs() >= 360.0 {
        return true;
    }
    if extent > 0.0 {
        (angle - start).rem_euclid(360.0) <= extent
    } else {
        (start - angle).rem_euclid(360.0) <= -extent
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    };
    let closest = a.lerp(b, t);
    ((p.x - closest.x).powi(2) + (p.y - closest.y).powi(2)).sqrt()
}
