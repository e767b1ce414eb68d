//! Ball trail particles
//!
//! A fixed pool: every frame a couple of dead particles are respawned at the
//! ball and all live ones drift and fade. Purely visual.

use glam::{Vec2, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A particle for visual effects
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// RGBA; alpha fades while alive
    pub color: Vec4,
    /// Seconds left; dead at <= 0
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
        }
    }
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleGenerator {
    particles: Vec<Particle>,
    last_used: usize,
}

impl ParticleGenerator {
    pub fn new(count: usize) -> Self {
        Self {
            particles: vec![Particle::default(); count],
            last_used: 0,
        }
    }

    /// Respawn `spawn` particles at `source` (+ `offset`), then age them all
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        source: &Entity,
        spawn: usize,
        offset: Vec2,
        rng: &mut R,
    ) {
        if self.particles.is_empty() {
            return;
        }

        for _ in 0..spawn {
            let slot = self.free_slot();
            let jitter = rng.random_range(-5.0f32..5.0);
            let shade = rng.random_range(0.5f32..1.5);
            self.particles[slot] = Particle {
                pos: source.pos + Vec2::splat(jitter) + offset,
                vel: source.vel * 0.1,
                color: Vec4::new(shade, shade, shade, 1.0),
                life: 1.0,
            };
        }

        for p in &mut self.particles {
            p.life -= dt;
            if p.is_alive() {
                p.pos -= p.vel * dt;
                p.color.w -= dt * 2.5;
            }
        }
    }

    /// First dead slot after the last one used, wrapping; slot 0 if all live
    fn free_slot(&mut self) -> usize {
        let n = self.particles.len();
        let found = (self.last_used..n)
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive())
            .unwrap_or(0);
        self.last_used = found;
        found
    }

    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    /// Kill every particle
    pub fn clear(&mut self) {
        self.particles.fill(Particle::default());
        self.last_used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn source() -> Entity {
        Entity::new(Vec2::new(100.0, 100.0), Vec2::splat(25.0)).with_velocity(Vec2::new(0.0, -300.0))
    }

    #[test]
    fn test_spawns_near_source() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut trail = ParticleGenerator::new(10);
        trail.update(0.016, &source(), 2, Vec2::splat(6.25), &mut rng);

        let alive: Vec<_> = trail.alive().collect();
        assert_eq!(alive.len(), 2);
        for p in alive {
            assert!((p.pos.x - 106.25).abs() <= 6.0);
            assert_eq!(p.vel, Vec2::new(0.0, -30.0));
            assert!(p.life < 1.0);
        }
    }

    #[test]
    fn test_particles_die_after_a_second() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut trail = ParticleGenerator::new(10);
        trail.update(0.1, &source(), 2, Vec2::ZERO, &mut rng);
        trail.update(1.0, &source(), 0, Vec2::ZERO, &mut rng);
        assert_eq!(trail.alive().count(), 0);
    }

    #[test]
    fn test_full_pool_recycles_first_slot() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut trail = ParticleGenerator::new(3);
        trail.update(0.01, &source(), 3, Vec2::ZERO, &mut rng);
        assert_eq!(trail.alive().count(), 3);
        trail.update(0.01, &source(), 1, Vec2::ZERO, &mut rng);
        assert_eq!(trail.alive().count(), 3);
        assert_eq!(trail.last_used, 0);
    }

    #[test]
    fn test_clear() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut trail = ParticleGenerator::new(5);
        trail.update(0.01, &source(), 4, Vec2::ZERO, &mut rng);
        trail.clear();
        assert_eq!(trail.alive().count(), 0);
    }
}
