//! Tunable animation and confetti parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// Frame pacing for mark and confetti animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Delay between mark frames, in milliseconds.
    pub mark_frame_ms: u64,
    /// Delay between confetti frames, in milliseconds.
    pub confetti_frame_ms: u64,
    /// Steps used to draw an X.
    pub x_steps: u32,
    /// Steps used to draw an O.
    pub o_steps: u32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            mark_frame_ms: 10,
            confetti_frame_ms: 30,
            x_steps: 10,
            o_steps: 16,
        }
    }
}

impl AnimationSettings {
    /// Delay between mark frames.
    pub fn mark_delay(&self) -> Duration {
        Duration::from_millis(self.mark_frame_ms)
    }

    /// Delay between confetti frames.
    pub fn confetti_delay(&self) -> Duration {
        Duration::from_millis(self.confetti_frame_ms)
    }
}

/// Particle count and the ranges particles are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiSettings {
    /// Particles per celebration.
    pub count: usize,
    /// Added to vertical velocity every tick.
    pub gravity: f32,
    /// Horizontal velocity is drawn from `-max..=max`.
    pub max_horizontal_speed: f32,
    /// Lower bound of the initial vertical velocity (negative is upward).
    pub min_vertical_speed: f32,
    /// Upper bound of the initial vertical velocity.
    pub max_vertical_speed: f32,
    /// Smallest particle diameter.
    pub min_size: f32,
    /// Largest particle diameter.
    pub max_size: f32,
}

impl Default for ConfettiSettings {
    fn default() -> Self {
        Self {
            count: 40,
            gravity: 0.15,
            max_horizontal_speed: 3.0,
            min_vertical_speed: -1.0,
            max_vertical_speed: 4.0,
            min_size: 4.0,
            max_size: 9.0,
        }
    }
}

/// Everything the game controller can be tuned with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame pacing.
    pub animation: AnimationSettings,
    /// Celebration parameters.
    pub confetti: ConfettiSettings,
}

/// A setting outside its usable range.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("Invalid setting {}: {}", field, reason)]
pub struct SettingsError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub reason: String,
}

impl SettingsError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl Settings {
    /// Checks step counts, gravity and the confetti ranges.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), SettingsError> {
        let animation = &self.animation;
        if animation.x_steps == 0 {
            return Err(SettingsError::new("animation.x_steps", "must be at least 1"));
        }
        if animation.o_steps == 0 {
            return Err(SettingsError::new("animation.o_steps", "must be at least 1"));
        }

        let confetti = &self.confetti;
        // A batch only lands under positive gravity.
        if !confetti.gravity.is_finite() || confetti.gravity <= 0.0 {
            return Err(SettingsError::new(
                "confetti.gravity",
                format!("must be finite and positive, got {}", confetti.gravity),
            ));
        }
        if !confetti.max_horizontal_speed.is_finite() || confetti.max_horizontal_speed < 0.0 {
            return Err(SettingsError::new(
                "confetti.max_horizontal_speed",
                format!("must be finite and non-negative, got {}", confetti.max_horizontal_speed),
            ));
        }
        ordered(
            "confetti.min_vertical_speed",
            confetti.min_vertical_speed,
            confetti.max_vertical_speed,
        )?;
        ordered("confetti.min_size", confetti.min_size, confetti.max_size)?;
        if confetti.min_size <= 0.0 {
            return Err(SettingsError::new("confetti.min_size", "must be positive"));
        }
        Ok(())
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), SettingsError> {
    if !(min.is_finite() && max.is_finite()) || min > max {
        return Err(SettingsError::new(
            field,
            format!("range {min}..={max} is empty or not finite"),
        ));
    }
    Ok(())
}
