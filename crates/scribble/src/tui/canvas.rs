//! Terminal renderer: a retained display list drawn as half-block pixels.

use super::raster::{Raster, Transform};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as Area;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use scribble_core::{DisplayList, Font, HIGHLIGHT, Handle, Point, Rect, Renderer, Rgb, Shape};
use tracing::trace;
use unicode_width::UnicodeWidthStr;

const UPPER_HALF: &str = "▀";

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// [`Renderer`] that keeps shapes until the next terminal draw.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    list: DisplayList,
    dirty: bool,
}

impl TerminalRenderer {
    /// Creates an empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes to draw.
    pub fn list(&self) -> &DisplayList {
        &self.list
    }

    /// Flags the scene for redraw, e.g. after a resize.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, shape: Shape) -> Handle {
        self.dirty = true;
        self.list.draw(shape)
    }

    fn replace(&mut self, handle: Handle, shape: Shape) {
        self.dirty = true;
        self.list.replace(handle, shape);
    }

    fn remove(&mut self, handle: Handle) {
        self.dirty = true;
        self.list.remove(handle);
    }

    fn clear(&mut self) {
        self.dirty = true;
        self.list.clear();
    }
}

/// Where the logical canvas sits inside a terminal area.
///
/// Each terminal cell holds two vertically stacked pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Area,
    transform: Transform,
}

impl Viewport {
    /// Fits `canvas` into `area`, preserving its aspect ratio.
    pub fn fit(area: Area, canvas: Rect) -> Self {
        let transform = Transform::fit(canvas, area.width as f32, area.height as f32 * 2.0);
        Self { area, transform }
    }

    /// Terminal area the canvas is drawn in.
    pub fn area(&self) -> Area {
        self.area
    }

    /// Logical-to-pixel transform, relative to the area origin.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Logical point under a terminal cell, or `None` outside the area.
    pub fn to_logical(&self, column: u16, row: u16) -> Option<Point> {
        let inside = column >= self.area.x
            && row >= self.area.y
            && column < self.area.x + self.area.width
            && row < self.area.y + self.area.height;
        if !inside {
            return None;
        }
        let pixel = Point::new(
            (column - self.area.x) as f32 + 0.5,
            (row - self.area.y) as f32 * 2.0 + 1.0,
        );
        Some(self.transform.to_logical(pixel))
    }

    /// Terminal cell containing a logical point, clamped to the area.
    pub fn to_cell(&self, point: Point) -> (u16, u16) {
        let pixel = self.transform.to_pixel(point);
        let max_x = self.area.width.saturating_sub(1) as f32;
        let max_y = self.area.height.saturating_sub(1) as f32;
        let x = pixel.x.clamp(0.0, max_x) as u16;
        let y = (pixel.y / 2.0).clamp(0.0, max_y) as u16;
        (self.area.x + x, self.area.y + y)
    }
}

/// Draws a display list into a terminal buffer.
#[derive(Debug)]
pub struct SceneWidget<'a> {
    list: &'a DisplayList,
    viewport: &'a Viewport,
    cursor: Option<Rect>,
}

impl<'a> SceneWidget<'a> {
    /// Widget for `list` as placed by `viewport`.
    pub fn new(list: &'a DisplayList, viewport: &'a Viewport) -> Self {
        Self {
            list,
            viewport,
            cursor: None,
        }
    }

    /// Outlines the keyboard cursor's cell.
    pub fn cursor(mut self, cell: Rect) -> Self {
        self.cursor = Some(cell);
        self
    }
}

impl Widget for SceneWidget<'_> {
    fn render(self, area: Area, buf: &mut Buffer) {
        let tf = self.viewport.transform();
        let mut raster = Raster::new(area.width as usize, area.height as usize * 2, Rgb(0, 0, 0));
        for (_, shape) in self.list.iter() {
            raster.paint(shape, tf);
        }
        if let Some(cell) = self.cursor {
            raster.outline(cell, 4.0, HIGHLIGHT, tf);
        }

        for row in 0..area.height {
            for column in 0..area.width {
                let x = column as usize;
                let y = row as usize * 2;
                let (Some(top), Some(bottom)) = (raster.get(x, y), raster.get(x, y + 1)) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_symbol(UPPER_HALF)
                        .set_fg(color(top))
                        .set_bg(color(bottom));
                }
            }
        }

        // Text is laid over the pixels as terminal characters.
        for (_, shape) in self.list.iter() {
            let Shape::Text {
                anchor,
                text,
                font,
                color: ink,
            } = shape
            else {
                continue;
            };
            if *font == Font::Glyph {
                continue;
            }
            let (column, row) = self.viewport.to_cell(*anchor);
            let len = text.width() as u16;
            let start = column.saturating_sub(len / 2).max(area.x);
            let room = (area.x + area.width).saturating_sub(start) as usize;
            buf.set_stringn(start, row, text, room, Style::default().fg(color(*ink)));
        }
        trace!(shapes = self.list.len(), "Scene rendered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribble_core::{BoardLayout, ClickTarget, Position};

    #[test]
    fn test_terminal_cells_map_back_to_board_cells() {
        let layout = BoardLayout::default();
        let viewport = Viewport::fit(Area::new(0, 0, 108, 64), layout.canvas());
        for pos in Position::ALL {
            let (column, row) = viewport.to_cell(layout.cell_center(pos));
            let point = viewport.to_logical(column, row).unwrap();
            assert_eq!(layout.hit_test(point), ClickTarget::Cell(pos));
        }
        assert_eq!(viewport.to_logical(108, 0), None);
    }

    #[test]
    fn test_renderer_tracks_changes() {
        let mut renderer = TerminalRenderer::new();
        assert!(!renderer.take_dirty());
        let handle = renderer.draw(Shape::Rect {
            rect: Rect::from_coords(0.0, 0.0, 1.0, 1.0),
            fill: Rgb(1, 1, 1),
        });
        assert!(renderer.take_dirty());
        assert!(!renderer.take_dirty());
        renderer.remove(handle);
        assert!(renderer.take_dirty());
        assert!(renderer.list().is_empty());
    }

    #[test]
    fn test_widget_paints_half_blocks_and_labels() {
        let area = Area::new(0, 0, 20, 10);
        let canvas = Rect::from_coords(0.0, 0.0, 20.0, 20.0);
        let viewport = Viewport::fit(area, canvas);
        let mut list = DisplayList::new();
        list.draw(Shape::Rect {
            rect: Rect::from_coords(0.0, 0.0, 20.0, 1.0),
            fill: Rgb(255, 0, 0),
        });
        list.draw(Shape::Text {
            anchor: Point::new(10.0, 10.0),
            text: "Hi".into(),
            font: Font::Status,
            color: Rgb(0, 255, 0),
        });

        let mut buf = Buffer::empty(area);
        SceneWidget::new(&list, &viewport).render(area, &mut buf);

        let corner = &buf[(0, 0)];
        assert_eq!(corner.symbol(), UPPER_HALF);
        assert_eq!(corner.fg, Color::Rgb(255, 0, 0));
        assert_eq!(corner.bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(9, 5)].symbol(), "H");
        assert_eq!(buf[(10, 5)].symbol(), "i");
        assert_eq!(buf[(10, 5)].fg, Color::Rgb(0, 255, 0));
    }
}
