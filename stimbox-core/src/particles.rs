use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Number of particle slots. Allocation recycles the oldest slot, so this
/// bounds memory regardless of burst rate.
pub const PARTICLE_POOL_SIZE: usize = 2000;

/// Lifetime of a freshly spawned particle, in frame units (60 fps ≡ 1.0).
pub const PARTICLE_LIFETIME: f32 = 40.0;

/// An ephemeral visual-effect point. Inert once `life` reaches zero.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
}

/// Fixed-capacity recycling pool of short-lived kinematic particles.
///
/// Slots are overwritten round-robin in allocation order, irrespective of
/// remaining life, so spawning can never fail or grow memory.
pub struct ParticlePool {
    particles: Vec<Particle>,
    oldest: usize,
    bounds: Vec2,
    rng: StdRng,
}

impl ParticlePool {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Deterministic construction for tests.
    pub fn seeded(width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: f32, height: f32, rng: StdRng) -> Self {
        let inert = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.0,
        };
        Self {
            particles: vec![inert; PARTICLE_POOL_SIZE],
            oldest: 0,
            bounds: Vec2::new(width, height),
            rng,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Copies of every particle with life remaining.
    pub fn live(&self) -> impl Iterator<Item = Particle> + '_ {
        self.particles.iter().filter(|p| p.life > 0.0).copied()
    }

    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.life > 0.0).count()
    }

    /// Moves every live particle by `vel · dt`, bouncing off the bounding
    /// box (single bounce per step: the velocity flips and the displacement
    /// is re-applied with the reflected velocity), then decays `life` by
    /// `dt`.
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        for p in &mut self.particles {
            if p.life <= 0.0 {
                continue;
            }
            p.pos.x += p.vel.x * dt;
            if p.pos.x > self.bounds.x || p.pos.x < 0.0 {
                p.vel.x = -p.vel.x;
                p.pos.x += p.vel.x * dt;
            }
            p.pos.y += p.vel.y * dt;
            if p.pos.y > self.bounds.y || p.pos.y < 0.0 {
                p.vel.y = -p.vel.y;
                p.pos.y += p.vel.y * dt;
            }
            p.life -= dt;
        }
    }

    /// Spawns `count` particles evenly spaced around a full circle, all
    /// sharing one random angular phase so repeated bursts differ.
    pub fn spawn_burst(&mut self, center: Vec2, speed: f32, count: usize) {
        if count == 0 {
            return;
        }
        let phase = self.rng.gen::<f32>() * TAU;
        let step = TAU / count as f32;
        for i in 0..count {
            let angle = phase + step * i as f32;
            self.spawn(center, Vec2::new(angle.cos(), angle.sin()) * speed);
        }
    }

    /// Creates one particle at full lifetime, recycling the oldest slot.
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2) {
        self.particles[self.oldest] = Particle {
            pos,
            vel,
            life: PARTICLE_LIFETIME,
        };
        self.oldest = (self.oldest + 1) % self.particles.len();
    }
}
