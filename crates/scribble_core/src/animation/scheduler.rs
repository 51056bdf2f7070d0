//! Single-flight, epoch-guarded animation scheduler.

use super::{ConfettiParticle, ConfettiSimulator, MarkAnimation, MarkFrame};
use crate::Position;
use crate::timer::Timer;
use derive_getters::Getters;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Generation counter; bumped every time running work is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, derive_more::Display)]
pub struct Epoch(u64);

/// Identifies one started task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub struct TaskId(u64);

/// Request to advance a task, as handed to the [`Timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters)]
pub struct ScheduledTick {
    /// Scheduler epoch when the tick was issued.
    epoch: Epoch,
    /// Task the tick belongs to.
    task: TaskId,
    /// Frame the tick should produce.
    frame: u32,
}

/// What a task animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TaskKind {
    /// A mark being drawn; blocks new moves.
    #[display("mark")]
    DrawMark,
    /// The win celebration.
    #[display("confetti")]
    Confetti,
}

/// Signal returned when a task finishes, chosen when it was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The mark at this cell is fully drawn; evaluate the board.
    EvaluateMove(Position),
    /// Every particle has landed.
    ConfettiSettled,
}

#[derive(Debug, Clone)]
enum Payload {
    Mark(MarkAnimation),
    Confetti(ConfettiSimulator),
}

/// The single task a scheduler may be running.
#[derive(Debug, Clone, Getters)]
pub struct AnimationTask {
    /// Identity checked against incoming ticks.
    id: TaskId,
    /// Last frame produced.
    frame_index: u32,
    /// Final frame for marks; confetti runs until it lands.
    total_frames: Option<u32>,
    /// Pause between frames.
    delay: Duration,
    #[getter(skip)]
    payload: Payload,
    #[getter(skip)]
    completion: Completion,
}

impl AnimationTask {
    /// Kind of animation.
    pub fn kind(&self) -> TaskKind {
        match self.payload {
            Payload::Mark(_) => TaskKind::DrawMark,
            Payload::Confetti(_) => TaskKind::Confetti,
        }
    }

    fn visual(&self) -> Visual {
        match &self.payload {
            Payload::Mark(animation) => Visual::Mark {
                animation: *animation,
                frame: animation.frame(self.frame_index),
            },
            Payload::Confetti(sim) => Visual::Confetti(sim.particles().clone()),
        }
    }

    /// Moves to the next frame; returns whether the task is finished.
    fn advance(&mut self) -> bool {
        self.frame_index += 1;
        match (&mut self.payload, self.total_frames) {
            (Payload::Confetti(sim), _) => !sim.step(),
            (Payload::Mark(_), Some(total)) => self.frame_index >= total,
            (Payload::Mark(_), None) => true,
        }
    }
}

/// Visual state of one frame, for the controller to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// A mark frame.
    Mark {
        /// The animation being played.
        animation: MarkAnimation,
        /// What to show now.
        frame: MarkFrame,
    },
    /// Current particle positions.
    Confetti(Vec<ConfettiParticle>),
}

/// Result of delivering a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The tick predates a cancellation or does not match the running task.
    Stale,
    /// A frame was produced.
    Frame {
        /// What to render.
        visual: Visual,
        /// Set when this was the task's last frame.
        completed: Option<Completion>,
    },
}

/// A second task was started while one was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("A {} animation is already running", active)]
pub struct SchedulerError {
    /// Kind of the task already running.
    pub active: TaskKind,
}

/// Runs one animation at a time, a frame per timer tick.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    epoch: Epoch,
    next_task: u64,
    active: Option<AnimationTask>,
}

impl AnimationScheduler {
    /// Creates an idle scheduler at epoch zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current epoch.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// The running task, if any.
    pub fn active(&self) -> Option<&AnimationTask> {
        self.active.as_ref()
    }

    /// True when no task is running.
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// True while a mark is being drawn.
    pub fn is_drawing_mark(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|task| task.kind() == TaskKind::DrawMark)
    }

    /// Starts drawing a mark and returns its first frame.
    #[instrument(
        skip(self, animation, timer),
        fields(position = %animation.position(), player = %animation.player())
    )]
    pub fn start_mark(
        &mut self,
        animation: MarkAnimation,
        delay: Duration,
        timer: &mut dyn Timer,
    ) -> Result<Visual, SchedulerError> {
        let completion = Completion::EvaluateMove(*animation.position());
        let total = Some(*animation.max_steps());
        self.start(Payload::Mark(animation), completion, total, delay, timer)
    }

    /// Starts the confetti fall and returns the spawn positions.
    #[instrument(skip(self, simulator, timer), fields(particles = simulator.particles().len()))]
    pub fn start_confetti(
        &mut self,
        simulator: ConfettiSimulator,
        delay: Duration,
        timer: &mut dyn Timer,
    ) -> Result<Visual, SchedulerError> {
        self.start(
            Payload::Confetti(simulator),
            Completion::ConfettiSettled,
            None,
            delay,
            timer,
        )
    }

    fn start(
        &mut self,
        payload: Payload,
        completion: Completion,
        total_frames: Option<u32>,
        delay: Duration,
        timer: &mut dyn Timer,
    ) -> Result<Visual, SchedulerError> {
        if let Some(task) = &self.active {
            warn!(active = %task.kind(), "Rejected second animation");
            return Err(SchedulerError { active: task.kind() });
        }

        let id = TaskId(self.next_task);
        self.next_task += 1;
        let task = AnimationTask {
            id,
            frame_index: 0,
            total_frames,
            delay,
            payload,
            completion,
        };
        let visual = task.visual();
        debug!(task = %id, kind = %task.kind(), epoch = %self.epoch, "Animation started");
        timer.schedule_after(
            delay,
            ScheduledTick {
                epoch: self.epoch,
                task: id,
                frame: 1,
            },
        );
        self.active = Some(task);
        Ok(visual)
    }

    /// Advances the running task by one frame.
    ///
    /// Ticks from an older epoch, for another task, or out of frame order
    /// are ignored.
    #[instrument(skip(self, timer), fields(epoch = %self.epoch))]
    pub fn on_tick(&mut self, tick: ScheduledTick, timer: &mut dyn Timer) -> TickOutcome {
        if tick.epoch != self.epoch {
            debug!("Dropping tick from a cancelled epoch");
            return TickOutcome::Stale;
        }
        let Some(task) = self.active.as_mut() else {
            debug!("Dropping tick: no animation running");
            return TickOutcome::Stale;
        };
        if task.id != tick.task || tick.frame != task.frame_index + 1 {
            debug!(
                running = %task.id,
                frame = task.frame_index,
                "Dropping tick for another task or frame"
            );
            return TickOutcome::Stale;
        }

        let finished = task.advance();
        let visual = task.visual();
        if !finished {
            timer.schedule_after(
                task.delay,
                ScheduledTick {
                    epoch: self.epoch,
                    task: task.id,
                    frame: task.frame_index + 1,
                },
            );
            return TickOutcome::Frame {
                visual,
                completed: None,
            };
        }

        let completed = self.active.take().map(|task| {
            debug!(task = %task.id, frames = task.frame_index, "Animation finished");
            task.completion
        });
        TickOutcome::Frame { visual, completed }
    }

    /// Drops the running task and invalidates every outstanding tick.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> Option<TaskKind> {
        self.epoch = Epoch(self.epoch.0 + 1);
        let cancelled = self.active.take().map(|task| task.kind());
        debug!(epoch = %self.epoch, ?cancelled, "Scheduler cancelled");
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::render::Rgb;
    use crate::timer::TimerQueue;
    use crate::Player;

    fn mark(steps: u32) -> MarkAnimation {
        MarkAnimation::new(Player::X, Position::Center, Point::new(50.0, 50.0), 10.0, steps)
    }

    fn drain(scheduler: &mut AnimationScheduler, timer: &mut TimerQueue) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while let Some(tick) = timer.pop_due(Duration::MAX) {
            outcomes.push(scheduler.on_tick(tick, timer));
        }
        outcomes
    }

    #[test]
    fn test_mark_runs_to_glyph_then_completes() {
        let mut scheduler = AnimationScheduler::new();
        let mut timer = TimerQueue::new();
        let first = scheduler
            .start_mark(mark(3), Duration::from_millis(10), &mut timer)
            .unwrap();
        assert!(matches!(first, Visual::Mark { frame: MarkFrame::Strokes(_), .. }));
        assert!(scheduler.is_drawing_mark());
        assert_eq!(*scheduler.active().unwrap().total_frames(), Some(3));

        let outcomes = drain(&mut scheduler, &mut timer);
        assert_eq!(outcomes.len(), 3);
        let TickOutcome::Frame { visual, completed } = outcomes.last().unwrap() else {
            panic!("last tick should produce a frame");
        };
        assert!(matches!(visual, Visual::Mark { frame: MarkFrame::Glyph, .. }));
        assert_eq!(*completed, Some(Completion::EvaluateMove(Position::Center)));
        assert!(scheduler.is_idle());
        assert_eq!(timer.now(), Duration::from_millis(30));
    }

    #[test]
    fn test_mark_stops_at_its_frame_count() {
        for steps in [1, 4, 16] {
            let mut scheduler = AnimationScheduler::new();
            let mut timer = TimerQueue::new();
            scheduler.start_mark(mark(steps), Duration::from_millis(5), &mut timer).unwrap();
            let outcomes = drain(&mut scheduler, &mut timer);
            assert_eq!(outcomes.len(), steps as usize);
            assert_eq!(timer.now(), Duration::from_millis(5 * u64::from(steps)));
        }
    }

    #[test]
    fn test_single_flight() {
        let mut scheduler = AnimationScheduler::new();
        let mut timer = TimerQueue::new();
        scheduler.start_mark(mark(3), Duration::from_millis(10), &mut timer).unwrap();
        let err = scheduler
            .start_mark(mark(3), Duration::from_millis(10), &mut timer)
            .unwrap_err();
        assert_eq!(err.active, TaskKind::DrawMark);
        assert_eq!(timer.len(), 1);
    }

    #[test]
    fn test_cancel_makes_queued_tick_stale() {
        let mut scheduler = AnimationScheduler::new();
        let mut timer = TimerQueue::new();
        scheduler.start_mark(mark(3), Duration::from_millis(10), &mut timer).unwrap();
        assert_eq!(scheduler.cancel(), Some(TaskKind::DrawMark));
        assert_eq!(scheduler.epoch(), Epoch(1));

        // A new task under the new epoch must not be advanced by the old tick.
        scheduler.start_mark(mark(3), Duration::from_millis(10), &mut timer).unwrap();
        let stale = timer.pop_due(Duration::MAX).unwrap();
        assert_eq!(*stale.epoch(), Epoch(0));
        assert_eq!(scheduler.on_tick(stale, &mut timer), TickOutcome::Stale);
        assert_eq!(*scheduler.active().unwrap().frame_index(), 0);
    }

    #[test]
    fn test_duplicate_tick_ignored() {
        let mut scheduler = AnimationScheduler::new();
        let mut timer = TimerQueue::new();
        scheduler.start_mark(mark(5), Duration::from_millis(10), &mut timer).unwrap();
        let tick = timer.pop_due(Duration::MAX).unwrap();
        assert!(matches!(scheduler.on_tick(tick, &mut timer), TickOutcome::Frame { .. }));
        assert_eq!(scheduler.on_tick(tick, &mut timer), TickOutcome::Stale);
        assert_eq!(*scheduler.active().unwrap().frame_index(), 1);
    }

    #[test]
    fn test_confetti_runs_until_landed() {
        let mut scheduler = AnimationScheduler::new();
        let mut timer = TimerQueue::new();
        let particle = ConfettiParticle::new(Point::new(0.0, 0.0), 0.0, 0.0, 4.0, Rgb(0, 0, 0));
        let sim = ConfettiSimulator::new(vec![particle], 1.0, 3.0);
        scheduler
            .start_confetti(sim, Duration::from_millis(30), &mut timer)
            .unwrap();
        assert_eq!(scheduler.active().unwrap().kind(), TaskKind::Confetti);
        assert!(!scheduler.is_drawing_mark());
        assert_eq!(*scheduler.active().unwrap().total_frames(), None);

        // y: 1, 3 -> lands on the second tick.
        let outcomes = drain(&mut scheduler, &mut timer);
        assert_eq!(outcomes.len(), 2);
        let TickOutcome::Frame {
            visual: Visual::Confetti(particles),
            completed,
        } = &outcomes[1]
        else {
            panic!("expected a confetti frame");
        };
        assert_eq!(particles[0].position().y, 3.0);
        assert_eq!(*completed, Some(Completion::ConfettiSettled));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_tick_without_task_is_stale() {
        let mut scheduler = AnimationScheduler::new();
        let mut timer = TimerQueue::new();
        let tick = ScheduledTick {
            epoch: Epoch::default(),
            task: TaskId(0),
            frame: 1,
        };
        assert_eq!(scheduler.on_tick(tick, &mut timer), TickOutcome::Stale);
        assert!(timer.is_empty());
    }
}
