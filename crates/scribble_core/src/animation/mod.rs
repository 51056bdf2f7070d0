//! Frame-stepped animations: mark strokes and confetti.
//!
//! [`AnimationScheduler`] owns at most one [`AnimationTask`] and advances it
//! one frame per [`ScheduledTick`]. Ticks carry the scheduler epoch they were
//! issued under, so cancelling (on reset) turns every queued tick stale
//! without having to reach into the timer.

mod confetti;
mod mark;
mod scheduler;

pub use confetti::{ConfettiParticle, ConfettiSimulator};
pub use mark::{ARC_START_DEG, MarkAnimation, MarkFrame, Segment, jitter};
pub use scheduler::{
    AnimationScheduler, AnimationTask, Completion, Epoch, ScheduledTick, SchedulerError, TaskId,
    TaskKind, TickOutcome, Visual,
};
