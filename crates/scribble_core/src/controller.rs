//! Game controller: routes input to the game state and drives animations.

use crate::animation::{
    AnimationScheduler, Completion, ConfettiParticle, ConfettiSimulator, MarkAnimation, MarkFrame,
    ScheduledTick, TickOutcome, Visual,
};
use crate::geometry::{BoardLayout, ClickTarget, Point};
use crate::render::{Handle, Renderer, Shape};
use crate::rules::{Evaluation, evaluate};
use crate::scene::{SYMBOL_WIDTH, Scene, TILE_COLORS, mark_color};
use crate::settings::{Settings, SettingsError};
use crate::timer::Timer;
use crate::{Accepted, GameState, GameStatus, Rejected};
use rand::rngs::StdRng;
use tracing::{debug, error, info, instrument};

/// Where the controller is in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ControllerPhase {
    /// Waiting for a cell to be chosen.
    AwaitingInput,
    /// A mark is being drawn; cell input is dropped.
    Animating,
    /// The round ended; only a reset does anything.
    RoundOver,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// A move was accepted and its animation started.
    Played(Accepted),
    /// The game was reset.
    Reset,
    /// Nothing happened.
    Ignored,
}

/// Owns the game state and the animation scheduler.
///
/// All mutation happens through [`on_click`](Self::on_click),
/// [`select_cell`](Self::select_cell), [`on_tick`](Self::on_tick) and
/// [`reset`](Self::reset), each called from the single event loop.
#[derive(Debug)]
pub struct GameController {
    state: GameState,
    phase: ControllerPhase,
    scheduler: AnimationScheduler,
    layout: BoardLayout,
    settings: Settings,
    rng: StdRng,
    scene: Scene,
    partial: Vec<Handle>,
    confetti: Vec<Handle>,
}

impl GameController {
    /// Creates a controller and paints the opening scene.
    ///
    /// Settings are validated first; on error nothing is drawn.
    #[instrument(skip_all)]
    pub fn new(
        settings: Settings,
        layout: BoardLayout,
        mut rng: StdRng,
        renderer: &mut dyn Renderer,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        renderer.clear();
        let scene = Scene::draw(renderer, &layout, &mut rng);
        info!("Game ready");
        Ok(Self {
            state: GameState::new(),
            phase: ControllerPhase::AwaitingInput,
            scheduler: AnimationScheduler::new(),
            layout,
            settings,
            rng,
            scene,
            partial: Vec::new(),
            confetti: Vec::new(),
        })
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    /// The animation scheduler.
    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// The canvas layout.
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Handles a click at a logical canvas point.
    #[instrument(skip(self, renderer, timer), fields(phase = %self.phase))]
    pub fn on_click(
        &mut self,
        point: Point,
        renderer: &mut dyn Renderer,
        timer: &mut dyn Timer,
    ) -> Response {
        match self.layout.hit_test(point) {
            ClickTarget::Reset => {
                self.reset(renderer);
                Response::Reset
            }
            ClickTarget::Cell(position) => {
                match self.select_cell(position.to_index(), renderer, timer) {
                    Ok(accepted) => Response::Played(accepted),
                    Err(_) => Response::Ignored,
                }
            }
            ClickTarget::Outside => {
                debug!("Click outside the board");
                Response::Ignored
            }
        }
    }

    /// Plays the current player's mark at `index` and starts drawing it.
    ///
    /// Rejections have no effect on state or on the canvas.
    #[instrument(skip(self, renderer, timer), fields(phase = %self.phase))]
    pub fn select_cell(
        &mut self,
        index: usize,
        renderer: &mut dyn Renderer,
        timer: &mut dyn Timer,
    ) -> Result<Accepted, Rejected> {
        match self.phase {
            ControllerPhase::AwaitingInput => {}
            ControllerPhase::Animating => {
                debug!("Input dropped while animating");
                return Err(Rejected::Animating);
            }
            ControllerPhase::RoundOver => {
                debug!("Input dropped after the round ended");
                return Err(Rejected::GameOver);
            }
        }
        if !self.scheduler.is_idle() {
            debug!("Input dropped: scheduler busy");
            return Err(Rejected::Animating);
        }

        let accepted = self.state.apply_move(index)?;
        let animation = MarkAnimation::for_move(
            *accepted.player(),
            *accepted.position(),
            &self.layout,
            &self.settings.animation,
        );
        let started = self
            .scheduler
            .start_mark(animation, self.settings.animation.mark_delay(), timer);
        debug_assert!(started.is_ok(), "scheduler busy after idle check");
        match started {
            Ok(visual) => self.render(visual, renderer),
            Err(e) => error!(error = %e, "Scheduler refused a mark after reporting idle"),
        }
        self.phase = ControllerPhase::Animating;
        info!(%accepted, "Move accepted");
        Ok(accepted)
    }

    /// Delivers a due tick; returns the completion it triggered, if any.
    #[instrument(skip(self, renderer, timer), fields(frame = *tick.frame()))]
    pub fn on_tick(
        &mut self,
        tick: ScheduledTick,
        renderer: &mut dyn Renderer,
        timer: &mut dyn Timer,
    ) -> Option<Completion> {
        match self.scheduler.on_tick(tick, timer) {
            TickOutcome::Stale => None,
            TickOutcome::Frame { visual, completed } => {
                self.render(visual, renderer);
                if let Some(completion) = completed {
                    self.complete(completion, renderer, timer);
                }
                completed
            }
        }
    }

    /// Starts a fresh game from any phase, cancelling running animations.
    #[instrument(skip(self, renderer), fields(phase = %self.phase))]
    pub fn reset(&mut self, renderer: &mut dyn Renderer) {
        if let Some(kind) = self.scheduler.cancel() {
            debug!(%kind, "Cancelled running animation");
        }
        self.state.reset();
        self.phase = ControllerPhase::AwaitingInput;
        self.partial.clear();
        self.confetti.clear();
        renderer.clear();
        self.scene = Scene::draw(renderer, &self.layout, &mut self.rng);
        info!("Game reset");
    }

    fn complete(
        &mut self,
        completion: Completion,
        renderer: &mut dyn Renderer,
        timer: &mut dyn Timer,
    ) {
        let position = match completion {
            Completion::EvaluateMove(position) => position,
            Completion::ConfettiSettled => {
                debug!("Confetti settled");
                return;
            }
        };

        let evaluation = evaluate(self.state.board());
        let agrees = match (evaluation, self.state.status()) {
            (Evaluation::Undecided, GameStatus::InProgress)
            | (Evaluation::Draw, GameStatus::Draw) => true,
            (Evaluation::Win { player, line }, GameStatus::Won { player: p, line: l }) => {
                player == *p && line == *l
            }
            _ => false,
        };
        if !agrees {
            error!(
                ?evaluation,
                status = ?self.state.status(),
                "Board evaluation disagrees with game status"
            );
            debug_assert!(agrees, "board evaluation disagrees with game status");
        }

        let status = *self.state.status();
        self.scene
            .set_status(renderer, &self.layout, &status, self.state.current_player());
        match evaluation {
            Evaluation::Undecided => {
                self.phase = ControllerPhase::AwaitingInput;
                debug!(%position, next = %self.state.current_player(), "Turn passes");
            }
            Evaluation::Win { player, line } => {
                self.phase = ControllerPhase::RoundOver;
                info!(%player, %line, "Round won");
                self.scene.draw_winning_line(renderer, &self.layout, &line);
                self.celebrate(renderer, timer);
            }
            Evaluation::Draw => {
                self.phase = ControllerPhase::RoundOver;
                info!("Round drawn");
            }
        }
    }

    fn celebrate(&mut self, renderer: &mut dyn Renderer, timer: &mut dyn Timer) {
        let simulator = ConfettiSimulator::spawn(
            &self.settings.confetti,
            self.layout.confetti_spawn(),
            self.layout.confetti_floor(),
            &TILE_COLORS,
            &mut self.rng,
        );
        match self
            .scheduler
            .start_confetti(simulator, self.settings.animation.confetti_delay(), timer)
        {
            Ok(visual) => self.render(visual, renderer),
            Err(e) => error!(error = %e, "Could not start confetti"),
        }
    }

    fn render(&mut self, visual: Visual, renderer: &mut dyn Renderer) {
        match visual {
            Visual::Mark { animation, frame } => self.render_mark(&animation, frame, renderer),
            Visual::Confetti(particles) => self.render_confetti(&particles, renderer),
        }
    }

    fn render_mark(
        &mut self,
        animation: &MarkAnimation,
        frame: MarkFrame,
        renderer: &mut dyn Renderer,
    ) {
        for handle in self.partial.drain(..) {
            renderer.remove(handle);
        }
        let color = mark_color(*animation.player());
        match frame {
            MarkFrame::Strokes(segments) => {
                for segment in segments {
                    let handle = renderer.draw(Shape::Line {
                        from: segment.from,
                        to: segment.to,
                        width: SYMBOL_WIDTH,
                        color,
                    });
                    self.partial.push(handle);
                }
            }
            MarkFrame::Arc {
                bounds,
                start_deg,
                extent_deg,
            } => {
                let handle = renderer.draw(Shape::Arc {
                    bounds,
                    start_deg,
                    extent_deg,
                    width: SYMBOL_WIDTH,
                    color,
                });
                self.partial.push(handle);
            }
            MarkFrame::Glyph => {
                renderer.draw(Shape::glyph(*animation.center(), *animation.player(), color));
            }
        }
    }

    fn render_confetti(&mut self, particles: &[ConfettiParticle], renderer: &mut dyn Renderer) {
        let shape = |p: &ConfettiParticle| Shape::Oval {
            rect: p.bounds(),
            fill: *p.color(),
        };
        if self.confetti.is_empty() {
            self.confetti = particles.iter().map(|p| renderer.draw(shape(p))).collect();
            return;
        }
        for (handle, particle) in self.confetti.iter().zip(particles) {
            renderer.replace(*handle, shape(particle));
        }
    }
}
