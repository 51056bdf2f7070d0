//! Gravity-driven confetti particles.

use crate::geometry::{Point, Rect};
use crate::render::Rgb;
use crate::settings::ConfettiSettings;
use derive_getters::Getters;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One piece of confetti.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct ConfettiParticle {
    /// Top-left corner of the particle.
    position: Point,
    /// Horizontal velocity per tick.
    vx: f32,
    /// Vertical velocity per tick, positive is downward.
    vy: f32,
    /// Diameter.
    size: f32,
    /// Fill color.
    color: Rgb,
}

impl ConfettiParticle {
    /// Creates a particle.
    pub fn new(position: Point, vx: f32, vy: f32, size: f32, color: Rgb) -> Self {
        Self {
            position,
            vx,
            vy,
            size,
            color,
        }
    }

    /// Bounding box of the drawn oval.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.position.offset(self.size, self.size))
    }

    fn integrate(&mut self, gravity: f32) {
        self.vy += gravity;
        self.position = self.position.offset(self.vx, self.vy);
    }
}

/// A batch of confetti falling under constant gravity.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ConfettiSimulator {
    /// The batch, created and discarded together.
    particles: Vec<ConfettiParticle>,
    /// Added to every particle's vertical velocity per tick.
    gravity: f32,
    /// Particles at or below this `y` have landed.
    floor: f32,
    /// Ticks simulated so far.
    ticks: u32,
}

impl ConfettiSimulator {
    /// Wraps an existing batch.
    pub fn new(particles: Vec<ConfettiParticle>, gravity: f32, floor: f32) -> Self {
        Self {
            particles,
            gravity,
            floor,
            ticks: 0,
        }
    }

    /// Spawns `settings.count` particles inside `area` with random velocity,
    /// size and a color from `palette`.
    #[instrument(skip(settings, palette, rng), fields(count = settings.count))]
    pub fn spawn<R: Rng + ?Sized>(
        settings: &ConfettiSettings,
        area: Rect,
        floor: f32,
        palette: &[Rgb],
        rng: &mut R,
    ) -> Self {
        let particles = (0..settings.count)
            .map(|_| {
                let x = rng.random_range(area.min.x..=area.max.x);
                let y = rng.random_range(area.min.y..=area.max.y);
                let reach = settings.max_horizontal_speed;
                let vx = rng.random_range(-reach..=reach);
                let vy =
                    rng.random_range(settings.min_vertical_speed..=settings.max_vertical_speed);
                let size = rng.random_range(settings.min_size..=settings.max_size);
                let color = palette.choose(rng).copied().unwrap_or(Rgb(255, 255, 255));
                ConfettiParticle::new(Point::new(x, y), vx, vy, size, color)
            })
            .collect();
        debug!("Confetti spawned");
        Self::new(particles, settings.gravity, floor)
    }

    /// Advances every particle by one tick.
    ///
    /// Returns whether any particle is still above the floor.
    pub fn step(&mut self) -> bool {
        for particle in &mut self.particles {
            particle.integrate(self.gravity);
        }
        self.ticks += 1;
        self.is_airborne()
    }

    /// True while any particle is above the floor.
    pub fn is_airborne(&self) -> bool {
        self.particles.iter().any(|p| p.position.y < self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_gravity_integration() {
        let mut sim = ConfettiSimulator::new(
            vec![ConfettiParticle::new(Point::new(10.0, 0.0), 1.0, 0.0, 4.0, Rgb(0, 0, 0))],
            0.5,
            100.0,
        );
        sim.step();
        let p = sim.particles()[0];
        assert_eq!(*p.vy(), 0.5);
        assert_eq!(*p.position(), Point::new(11.0, 0.5));
        sim.step();
        let p = sim.particles()[0];
        assert_eq!(*p.vy(), 1.0);
        assert_eq!(*p.position(), Point::new(12.0, 1.5));
        assert_eq!(*sim.ticks(), 2);
    }

    #[test]
    fn test_spawn_stays_inside_area() {
        let mut rng = StdRng::seed_from_u64(7);
        let area = Rect::from_coords(40.0, 120.0, 500.0, 480.0);
        let palette = [Rgb(1, 1, 1), Rgb(2, 2, 2)];
        let settings = ConfettiSettings::default();
        let sim = ConfettiSimulator::spawn(&settings, area, 620.0, &palette, &mut rng);
        assert_eq!(sim.particles().len(), 40);
        for p in sim.particles() {
            assert!(area.contains(*p.position()));
            assert!((-3.0..=3.0).contains(p.vx()));
            assert!((-1.0..=4.0).contains(p.vy()));
            assert!((4.0..=9.0).contains(p.size()));
            assert!(palette.contains(p.color()));
        }
        assert!(sim.is_airborne());
    }

    #[test]
    fn test_same_seed_same_batch() {
        let area = Rect::from_coords(0.0, 0.0, 10.0, 10.0);
        let settings = ConfettiSettings::default();
        let spawn = |seed| {
            ConfettiSimulator::spawn(
                &settings,
                area,
                20.0,
                &[Rgb(9, 9, 9)],
                &mut StdRng::seed_from_u64(seed),
            )
        };
        let (a, b) = (spawn(3), spawn(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_batch_eventually_lands() {
        let mut rng = StdRng::seed_from_u64(11);
        let area = Rect::from_coords(40.0, 120.0, 500.0, 480.0);
        let settings = ConfettiSettings::default();
        let mut sim = ConfettiSimulator::spawn(&settings, area, 620.0, &[Rgb(0, 0, 0)], &mut rng);
        let mut ticks = 0;
        while sim.step() {
            ticks += 1;
            assert!(ticks < 1_000, "confetti never landed");
        }
        assert!(sim.particles().iter().all(|p| p.position().y >= 620.0));
        assert!(!sim.is_airborne());
    }

    #[test]
    fn test_empty_batch_is_settled() {
        let mut sim = ConfettiSimulator::new(Vec::new(), 0.15, 620.0);
        assert!(!sim.is_airborne());
        assert!(!sim.step());
    }
}
