//! Decorative chrome drawn around the board: background, header, tiles,
//! grid, reset button and the winning-line highlight.

use crate::geometry::{BoardLayout, Point, Rect};
use crate::render::{Font, Handle, Renderer, Rgb, Shape};
use crate::rules::WinLine;
use crate::{GameStatus, Player, Position};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Background gradient, top color.
pub const BG_TOP: Rgb = Rgb(28, 40, 80);
/// Background gradient, bottom color.
pub const BG_BOTTOM: Rgb = Rgb(15, 135, 185);
/// Number of gradient bands.
pub const GRADIENT_BANDS: u32 = 60;
/// Grid line color.
pub const GRID_COLOR: Rgb = Rgb(0xf8, 0xf9, 0xfa);
/// Grid line width.
pub const GRID_WIDTH: f32 = 4.0;
/// Pastel fills for tiles and confetti.
pub const TILE_COLORS: [Rgb; 5] = [
    Rgb(0xFF, 0xB3, 0xBA),
    Rgb(0xFF, 0xDF, 0xBA),
    Rgb(0xFF, 0xFF, 0xBA),
    Rgb(0xBA, 0xFF, 0xC9),
    Rgb(0xBA, 0xE1, 0xFF),
];
/// Ink for X.
pub const X_COLOR: Rgb = Rgb(0x2E, 0x2B, 0x5F);
/// Ink for O.
pub const O_COLOR: Rgb = Rgb(0x2E, 0x8B, 0x57);
/// Stroke width of marks while they are being drawn.
pub const SYMBOL_WIDTH: f32 = 8.0;
/// Winner status and the outer winning-line stroke.
pub const HIGHLIGHT: Rgb = Rgb(0xFF, 0xD1, 0x66);
/// Inner glow of the winning line.
pub const GLOW: Rgb = Rgb(0xff, 0xf3, 0xbf);
/// Header card fill.
pub const HEADER_CARD: Rgb = Rgb(0x0b, 0x1b, 0x2b);
/// Title color.
pub const TITLE_COLOR: Rgb = Rgb(0xff, 0xd7, 0x00);
/// Status color during play.
pub const STATUS_COLOR: Rgb = Rgb(0xff, 0xff, 0xff);
/// Status color for a draw.
pub const DRAW_COLOR: Rgb = Rgb(0xee, 0xee, 0xee);
/// Title text.
pub const TITLE: &str = "TIC · TAC · TOE";
/// Reset button label.
pub const RESET_LABEL: &str = "New Game";
/// Small print under the button.
pub const HINT: &str = "Handwritten style • Click a tile to play";

/// Ink color of a player's marks.
pub fn mark_color(player: Player) -> Rgb {
    match player {
        Player::X => X_COLOR,
        Player::O => O_COLOR,
    }
}

/// Status line text and color for a game.
pub fn status_line(status: &GameStatus, to_move: Player) -> (String, Rgb) {
    match status {
        GameStatus::InProgress => (format!("Player {}'s turn", to_move), STATUS_COLOR),
        GameStatus::Won { player, .. } => (format!("Player {} wins!", player), HIGHLIGHT),
        GameStatus::Draw => ("It's a draw!".to_string(), DRAW_COLOR),
    }
}

/// Handles to the parts of the chrome that change during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    status: Handle,
}

impl Scene {
    /// Paints the full chrome and returns the handles needed later.
    ///
    /// Tiles take a random color from [`TILE_COLORS`] each time.
    #[instrument(skip_all)]
    pub fn draw<R: Rng + ?Sized>(
        renderer: &mut dyn Renderer,
        layout: &BoardLayout,
        rng: &mut R,
    ) -> Self {
        let canvas = layout.canvas();
        let band = canvas.height() / GRADIENT_BANDS as f32;
        for i in 0..GRADIENT_BANDS {
            let t = i as f32 / (GRADIENT_BANDS - 1) as f32;
            renderer.draw(Shape::Rect {
                rect: Rect::from_coords(0.0, i as f32 * band, canvas.max.x, (i + 1) as f32 * band),
                fill: BG_TOP.blend(BG_BOTTOM, t),
            });
        }

        renderer.draw(Shape::Rect {
            rect: layout.header(),
            fill: HEADER_CARD,
        });
        renderer.draw(Shape::Text {
            anchor: layout.title_anchor(),
            text: TITLE.to_string(),
            font: Font::Title,
            color: TITLE_COLOR,
        });
        let (text, color) = status_line(&GameStatus::InProgress, Player::X);
        let status = renderer.draw(Shape::Text {
            anchor: layout.status_anchor(),
            text,
            font: Font::Status,
            color,
        });

        for pos in Position::ALL {
            let fill = TILE_COLORS.choose(rng).copied().unwrap_or(STATUS_COLOR);
            renderer.draw(Shape::Rect {
                rect: layout.cell_rect(pos),
                fill,
            });
        }

        let left = layout.board_left();
        let top = *layout.board_top();
        let size = layout.board_size();
        for i in 1..3 {
            let x = left + i as f32 * layout.cell();
            renderer.draw(Shape::Line {
                from: Point::new(x, top + 6.0),
                to: Point::new(x, top + size - 6.0),
                width: GRID_WIDTH,
                color: GRID_COLOR,
            });
            let y = top + i as f32 * layout.cell();
            renderer.draw(Shape::Line {
                from: Point::new(left + 6.0, y),
                to: Point::new(left + size - 6.0, y),
                width: GRID_WIDTH,
                color: GRID_COLOR,
            });
        }

        let button = layout.reset_button();
        renderer.draw(Shape::Rect {
            rect: button,
            fill: STATUS_COLOR,
        });
        renderer.draw(Shape::Text {
            anchor: button.center(),
            text: RESET_LABEL.to_string(),
            font: Font::Button,
            color: HEADER_CARD,
        });
        renderer.draw(Shape::Text {
            anchor: layout.hint_anchor(),
            text: HINT.to_string(),
            font: Font::Hint,
            color: STATUS_COLOR,
        });

        debug!("Scene drawn");
        Self { status }
    }

    /// Rewrites the status line for the given game status.
    pub fn set_status(
        &self,
        renderer: &mut dyn Renderer,
        layout: &BoardLayout,
        status: &GameStatus,
        to_move: Player,
    ) {
        let (text, color) = status_line(status, to_move);
        renderer.replace(
            self.status,
            Shape::Text {
                anchor: layout.status_anchor(),
                text,
                font: Font::Status,
                color,
            },
        );
    }

    /// Draws the layered highlight across a completed line.
    pub fn draw_winning_line(
        &self,
        renderer: &mut dyn Renderer,
        layout: &BoardLayout,
        line: &WinLine,
    ) {
        let from = layout.cell_center(line.start());
        let to = layout.cell_center(line.end());
        for (i, width) in [18.0, 12.0, 6.0].into_iter().enumerate() {
            let color = if i == 0 { HIGHLIGHT } else { GLOW };
            renderer.draw(Shape::Line {
                from,
                to,
                width,
                color,
            });
        }
    }
}
