//! Terminal front end.
//!
//! One task owns everything: the crossterm event stream and the timer's next
//! deadline are awaited together, and whichever fires is handled to
//! completion before the next wait.

mod canvas;
mod input;
mod raster;

pub use canvas::{SceneWidget, TerminalRenderer, Viewport};
pub use input::{Action, map_event, move_cursor, park_cursor};
pub use raster::{Raster, Transform};

use crate::config::AppConfig;
use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use scribble_core::{BoardLayout, Completion, GameController, Position, Response, TimerQueue};
use std::io::{self, Stdout};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, info, instrument};

/// Runs the game in the terminal until the player quits.
#[instrument(skip(config))]
pub async fn run_tui(config: &AppConfig) -> Result<()> {
    info!("Starting scribble TUI");

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[instrument(skip_all)]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &AppConfig,
) -> Result<()> {
    let layout = BoardLayout::default();
    let mut canvas = TerminalRenderer::new();
    let mut timer = TimerQueue::new();
    let mut game = GameController::new(config.settings(), layout, config.rng(), &mut canvas)
        .context("Invalid game settings")?;
    let mut events = EventStream::new();
    let mut cursor = Position::Center;
    // Replaced on every draw; the first draw happens before any input is read.
    let mut viewport = Viewport::fit(Default::default(), layout.canvas());
    let start = Instant::now();

    loop {
        if canvas.take_dirty() {
            terminal.draw(|frame| {
                let area = frame.area();
                viewport = Viewport::fit(area, layout.canvas());
                let widget =
                    SceneWidget::new(canvas.list(), &viewport).cursor(layout.cell_rect(cursor));
                frame.render_widget(widget, area);
            })?;
        }

        let deadline = timer.next_deadline().map(|due| start + due);
        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    debug!("Event stream closed");
                    return Ok(());
                };
                let event = event.context("Failed to read terminal event")?;
                timer.advance_to(start.elapsed());
                match map_event(&event, cursor) {
                    Action::Quit => {
                        info!("Quit requested");
                        return Ok(());
                    }
                    Action::Reset => game.reset(&mut canvas),
                    Action::Play(position) => {
                        cursor = position;
                        canvas.mark_dirty();
                        let played = game.select_cell(position.to_index(), &mut canvas, &mut timer);
                        if let Err(reason) = played {
                            debug!(%reason, "Key move ignored");
                        }
                    }
                    Action::MoveCursor(position) => {
                        cursor = position;
                        canvas.mark_dirty();
                    }
                    Action::Click { column, row } => {
                        if let Some(point) = viewport.to_logical(column, row) {
                            let response = game.on_click(point, &mut canvas, &mut timer);
                            if let Response::Played(accepted) = response {
                                cursor = *accepted.position();
                                canvas.mark_dirty();
                            }
                        }
                    }
                    Action::Redraw => canvas.mark_dirty(),
                    Action::Nothing => {}
                }
            }
            _ = wait_for(deadline) => {
                let now = start.elapsed();
                while let Some(tick) = timer.pop_due(now) {
                    let completed = game.on_tick(tick, &mut canvas, &mut timer);
                    if let Some(Completion::EvaluateMove(_)) = completed {
                        cursor = park_cursor(cursor, game.state().board());
                        canvas.mark_dirty();
                    }
                }
            }
        }
    }
}
