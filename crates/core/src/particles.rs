use std::time::Duration;

use dimli_protocol::{NormalizedPos, Point};

use crate::config::ParticleConfig;
use crate::easing;

/// A softly drifting dot behind the hero copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub base: NormalizedPos,
    /// Peak displacement in logical px.
    pub amplitude: Point,
    /// Time to travel from rest to peak.
    pub half_period: Duration,
    pub delay: Duration,
}

impl Particle {
    /// The `index`-th particle of the standard layout: spread across the
    /// width in 15% steps, staggered over three rows, each drifting on its
    /// own slightly slower cycle.
    pub fn nth(index: usize) -> Self {
        let i = index as f64;
        Self {
            base: NormalizedPos::new(15.0 + i * 15.0, 20.0 + (index % 3) as f64 * 30.0),
            amplitude: Point::new(i.cos() * 15.0, i.sin() * 20.0),
            half_period: Duration::from_secs_f64(3.0 + i * 0.5),
            delay: Duration::from_secs_f64(i * 0.2),
        }
    }

    /// Displacement from `base` after `elapsed` since mount.
    pub fn offset(&self, elapsed: Duration) -> Point {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return Point::new(0.0, 0.0);
        };
        let t = easing::sine_in_out(easing::yoyo(active, self.half_period));
        Point::new(self.amplitude.x * t, self.amplitude.y * t)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    size: f64,
}

impl ParticleField {
    pub fn new(config: &ParticleConfig) -> Self {
        Self {
            particles: (0..config.count).map(Particle::nth).collect(),
            size: config.size,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> f64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout() {
        let field = ParticleField::new(&ParticleConfig::default());
        assert_eq!(field.particles().len(), 6);
        let bases: Vec<_> = field.particles().iter().map(|p| (p.base.x, p.base.y)).collect();
        assert_eq!(
            bases,
            vec![
                (15.0, 20.0),
                (30.0, 50.0),
                (45.0, 80.0),
                (60.0, 20.0),
                (75.0, 50.0),
                (90.0, 80.0)
            ]
        );
    }

    #[test]
    fn rests_until_delay_then_reaches_amplitude() {
        let p = Particle::nth(2);
        assert_eq!(p.offset(Duration::from_millis(399)), Point::new(0.0, 0.0));

        let peak = p.offset(p.delay + p.half_period);
        assert!((peak.x - p.amplitude.x).abs() < 1e-9);
        assert!((peak.y - p.amplitude.y).abs() < 1e-9);

        let back = p.offset(p.delay + p.half_period * 2);
        assert!(back.x.abs() < 1e-9 && back.y.abs() < 1e-9);
    }

    #[test]
    fn first_particle_never_moves_vertically() {
        // sin(0) == 0
        let p = Particle::nth(0);
        assert_eq!(p.offset(Duration::from_millis(1500)).y, 0.0);
    }
}
