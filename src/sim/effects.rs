//! Decorative particles and fireworks
//!
//! Purely visual: nothing here feeds back into gameplay. Particles decay by
//! size, fireworks rise then burst into a particle cloud.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Number of particles in a firework burst
const FIREWORK_BURST: usize = 50;

/// A single decaying point
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub gravity: f32,
    pub color: [f32; 4],
}

impl Particle {
    /// Spawn with random size and a random direction/speed in the given
    /// ranges
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pos: Vec2,
        color: [f32; 4],
        min_size: f32,
        max_size: f32,
        min_speed: f32,
        max_speed: f32,
        gravity: f32,
        rng: &mut Pcg32,
    ) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(min_speed..max_speed);
        Self {
            pos,
            vel: speed * Vec2::new(angle.cos(), angle.sin()),
            size: rng.random_range(min_size..=max_size),
            gravity,
            color,
        }
    }

    /// One Euler step; the size decays a fixed amount per frame
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.size -= 0.1;
    }

    pub fn alive(&self) -> bool {
        self.size > 0.0
    }
}

/// A celebration rocket: rises from the bottom edge, then bursts
#[derive(Debug, Clone)]
pub struct Firework {
    pub pos: Vec2,
    vel_y: f32,
    explosion_y: f32,
    pub exploded: bool,
    pub particles: Vec<Particle>,
}

impl Firework {
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(rng.random_range(0.0..SCREEN_WIDTH), SCREEN_HEIGHT),
            vel_y: -rng.random_range(8.0..12.0),
            explosion_y: rng.random_range(SCREEN_HEIGHT * 0.2..SCREEN_HEIGHT * 0.5),
            exploded: false,
            particles: Vec::new(),
        }
    }

    pub fn update(&mut self, rng: &mut Pcg32) {
        if !self.exploded {
            self.pos.y += self.vel_y;
            if self.pos.y <= self.explosion_y {
                self.exploded = true;
                let color = [
                    rng.random_range(0.2..1.0),
                    rng.random_range(0.2..1.0),
                    rng.random_range(0.2..1.0),
                    1.0,
                ];
                self.particles = (0..FIREWORK_BURST)
                    .map(|_| Particle::new(self.pos, color, 2.0, 4.0, 1.0, 4.0, 0.1, rng))
                    .collect();
            }
        } else {
            for particle in &mut self.particles {
                particle.update();
            }
            self.particles.retain(Particle::alive);
        }
    }

    /// Dead once exploded and every particle has decayed
    pub fn is_dead(&self) -> bool {
        self.exploded && self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_rng() -> Pcg32 {
        Pcg32::seed_from_u64(3)
    }

    #[test]
    fn test_particle_decays_to_death() {
        let mut rng = test_rng();
        let mut p = Particle::new(
            Vec2::new(100.0, 100.0),
            [1.0, 1.0, 0.0, 1.0],
            1.0,
            3.0,
            1.0,
            3.0,
            0.0,
            &mut rng,
        );
        assert!(p.alive());
        // Max size 3.0 decays at 0.1/frame: dead within 31 frames
        for _ in 0..31 {
            p.update();
        }
        assert!(!p.alive());
    }

    #[test]
    fn test_particle_gravity_pulls_down() {
        let mut rng = test_rng();
        let mut p = Particle::new(
            Vec2::new(100.0, 100.0),
            [1.0, 1.0, 1.0, 1.0],
            2.0,
            4.0,
            1.0,
            4.0,
            0.1,
            &mut rng,
        );
        let vy0 = p.vel.y;
        p.update();
        p.update();
        assert!(p.vel.y > vy0);
    }

    #[test]
    fn test_firework_lifecycle() {
        let mut rng = test_rng();
        let mut fw = Firework::new(&mut rng);
        assert!(!fw.exploded);
        assert!(!fw.is_dead());

        // Slowest ascent from y=600 to the lowest burst height (300) at
        // 8 px/frame is under 40 frames
        for _ in 0..40 {
            fw.update(&mut rng);
        }
        assert!(fw.exploded);
        assert_eq!(fw.particles.len(), FIREWORK_BURST);

        // Burst particles have max size 4.0: gone within 41 more frames
        for _ in 0..41 {
            fw.update(&mut rng);
        }
        assert!(fw.is_dead());
    }
}
