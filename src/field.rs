// The particle field: a fixed set of drifting particles, reflected at the
// surface edges and joined by faint lines when two come close together.

use crate::config::FieldConfig;
use crate::error::Result;
use crate::particle::{Particle, Size};
use crate::surface::Surface;
use rand::seq::SliceRandom;
use rand::Rng;

/// A connecting line between particles `from` and `to` (indices, `from < to`)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub opacity: f64,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl ParticleField {
    /// Validates the config and seeds the field from the thread rng
    pub fn new(config: FieldConfig, size: Size) -> Result<ParticleField> {
        config.validate()?;
        let mut rng = rand::thread_rng();
        Ok(ParticleField::initialize(config, size, &mut rng))
    }

    pub fn initialize<R: Rng + ?Sized>(config: FieldConfig, size: Size, rng: &mut R) -> ParticleField {
        let mut particles = Vec::with_capacity(config.count);
        let speed = config.max_speed;
        for _ in 0..config.count {
            let pos_x = rng.gen::<f64>() * size.width;
            let pos_y = rng.gen::<f64>() * size.height;
            let vel_x = sample(rng, (-speed, speed));
            let vel_y = sample(rng, (-speed, speed));
            let radius = sample(rng, config.radius);
            let opacity = sample(rng, config.opacity);
            let color = config.palette.choose(rng).copied().unwrap_or_default();
            particles.push(Particle::new([pos_x, pos_y], [vel_x, vel_y], radius, opacity, color));
        }
        ParticleField { particles, config }
    }

    pub fn from_particles(config: FieldConfig, particles: Vec<Particle>) -> ParticleField {
        ParticleField { particles, config }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Moves every particle one step, reflecting velocity on any axis where
    /// the step would leave the surface. No randomness, no clamping.
    pub fn advance_frame(&mut self, size: Size) {
        for particle in &mut self.particles {
            particle.reflect_axis(0, size.width);
            particle.reflect_axis(1, size.height);
            particle.pos = vecmath::vec2_add(particle.pos, particle.vel);
        }
    }

    // O(n^2) over unordered pairs, fine for a few dozen particles
    pub fn connections(&self) -> Vec<Link> {
        let threshold = self.config.link_distance;
        let scale = self.config.link_opacity_scale;
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = a.distance_to(b);
                if distance < threshold {
                    links.push(Link {
                        from: i,
                        to: j,
                        opacity: (threshold - distance) / threshold * scale,
                    });
                }
            }
        }
        links
    }

    /// Clears the surface, draws every particle, then the connecting lines.
    /// Lines take the colour of the lower-indexed particle.
    pub fn render<S: Surface>(&self, surface: &mut S) -> std::result::Result<(), S::Error> {
        surface.clear()?;
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, p.color, p.opacity)?;
        }
        for link in self.connections() {
            let from = &self.particles[link.from];
            let to = &self.particles[link.to];
            surface.stroke_line(
                from.pos,
                to.pos,
                from.color,
                link.opacity,
                self.config.link_width,
            )?;
        }
        Ok(())
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    rng.gen::<f64>() * (high - low) + low
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SIZE: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    fn seeded(seed: u64) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleField::initialize(FieldConfig::default(), SIZE, &mut rng)
    }

    fn still(pos: [f64; 2], color: Color) -> Particle {
        Particle::new(pos, [0.0, 0.0], 2.0, 0.5, color)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn initialize_respects_config() {
        let field = seeded(7);
        let config = FieldConfig::default();
        assert_eq!(field.len(), 50);
        for p in field.particles() {
            assert!(SIZE.contains(p.pos), "{:?} outside surface", p.pos);
            assert!(p.vel[0].abs() <= config.max_speed);
            assert!(p.vel[1].abs() <= config.max_speed);
            assert!(p.radius >= 1.0 && p.radius <= 4.0);
            assert!(p.opacity >= 0.2 && p.opacity <= 0.7);
            assert!(config.palette.contains(&p.color));
        }
    }

    #[test]
    fn initialize_is_reproducible_with_a_seed() {
        assert_eq!(seeded(42).particles(), seeded(42).particles());
        assert_ne!(seeded(42).particles(), seeded(43).particles());
    }

    #[test]
    fn zero_count_gives_empty_field() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = ParticleField::initialize(FieldConfig::default().with_count(0), SIZE, &mut rng);
        assert!(field.is_empty());
        assert!(field.connections().is_empty());
    }

    #[test]
    fn new_rejects_invalid_config() {
        assert!(ParticleField::new(FieldConfig::default().with_palette(vec![]), SIZE).is_err());
        assert!(ParticleField::new(FieldConfig::default().with_max_speed(f64::INFINITY), SIZE).is_err());
        assert_eq!(ParticleField::new(FieldConfig::default(), SIZE).unwrap().len(), 50);
    }

    #[test]
    fn corner_particle_reflects_on_both_axes() {
        let p = Particle::new([0.0, 0.0], [-0.2, -0.2], 1.0, 1.0, Color::WHITE);
        let mut field = ParticleField::from_particles(FieldConfig::default(), vec![p]);
        field.advance_frame(SIZE);
        let p = field.particles()[0];
        assert_eq!(p.vel, [0.2, 0.2]);
        assert_eq!(p.pos, [0.2, 0.2]);
    }

    #[test]
    fn far_wall_reflects() {
        let p = Particle::new([800.0, 300.0], [0.25, 0.1], 1.0, 1.0, Color::WHITE);
        let mut field = ParticleField::from_particles(FieldConfig::default(), vec![p]);
        field.advance_frame(SIZE);
        let p = field.particles()[0];
        assert_eq!(p.vel, [-0.25, 0.1]);
        assert!(approx(p.pos[0], 799.75));
        assert!(approx(p.pos[1], 300.1));
    }

    #[test]
    fn velocity_flips_exactly_when_a_step_would_escape() {
        let mut field = seeded(3);
        for _ in 0..5_000 {
            let before = field.particles().to_vec();
            field.advance_frame(SIZE);
            for (old, new) in before.iter().zip(field.particles()) {
                for axis in 0..2 {
                    let max = if axis == 0 { SIZE.width } else { SIZE.height };
                    let next = old.pos[axis] + old.vel[axis];
                    if next < 0.0 || next > max {
                        assert_eq!(new.vel[axis], -old.vel[axis]);
                    } else {
                        assert_eq!(new.vel[axis], old.vel[axis]);
                    }
                }
                assert!(SIZE.contains(new.pos), "{:?} escaped", new.pos);
            }
        }
    }

    #[test]
    fn advance_is_deterministic() {
        let mut a = seeded(11);
        let mut b = a.clone();
        for _ in 0..100 {
            a.advance_frame(SIZE);
            b.advance_frame(SIZE);
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn link_opacity_decays_with_distance() {
        let field = ParticleField::from_particles(
            FieldConfig::default(),
            vec![still([100.0, 100.0], Color::WHITE), still([150.0, 100.0], Color::WHITE)],
        );
        let links = field.connections();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].from, links[0].to), (0, 1));
        assert!(approx(links[0].opacity, 0.1));
    }

    #[test]
    fn distant_particles_are_not_linked() {
        let field = ParticleField::from_particles(
            FieldConfig::default(),
            vec![still([100.0, 100.0], Color::WHITE), still([250.0, 100.0], Color::WHITE)],
        );
        assert!(field.connections().is_empty());

        let at_threshold = ParticleField::from_particles(
            FieldConfig::default(),
            vec![still([0.0, 0.0], Color::WHITE), still([100.0, 0.0], Color::WHITE)],
        );
        assert!(at_threshold.connections().is_empty());
    }

    #[test]
    fn render_draws_circles_then_lines() {
        let field = ParticleField::from_particles(
            FieldConfig::default(),
            vec![
                still([100.0, 100.0], Color::STUDIO_CYAN),
                still([150.0, 100.0], Color::STUDIO_GOLD),
                still([700.0, 500.0], Color::STUDIO_PURPLE),
            ],
        );
        let mut surface = RecordingSurface::new(SIZE);
        field.render(&mut surface).unwrap();

        let commands = surface.commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], DrawCommand::Clear);
        assert_eq!(surface.circles().count(), 3);
        assert_eq!(surface.lines().count(), 1);
        match &commands[4] {
            DrawCommand::Line {
                from,
                to,
                color,
                alpha,
                width,
            } => {
                assert_eq!(*from, [100.0, 100.0]);
                assert_eq!(*to, [150.0, 100.0]);
                assert_eq!(*color, Color::STUDIO_CYAN);
                assert!(approx(*alpha, 0.1));
                assert_eq!(*width, 0.5);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn render_is_idempotent() {
        let field = seeded(5);
        let snapshot = field.particles().to_vec();
        let mut first = RecordingSurface::new(SIZE);
        let mut second = RecordingSurface::new(SIZE);
        field.render(&mut first).unwrap();
        field.render(&mut second).unwrap();
        field.render(&mut second).unwrap();
        assert_eq!(first.commands(), second.commands());
        assert_eq!(field.particles(), &snapshot[..]);
    }
}
