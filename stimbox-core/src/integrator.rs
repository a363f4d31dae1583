use glam::Vec2;

use crate::engine::{pair_impulse, Body, RepulsionEngine};

/// Floor for a squared wall distance. A body sitting exactly on a wall gets
/// a large finite push instead of an infinite one.
const MIN_WALL_DIST_SQ: f32 = 1e-6;

impl RepulsionEngine {
    /// Advances the simulation by one step of `dt` simulation-time units.
    ///
    /// All pairwise impulses (including the cursor's one-sided push) are
    /// accumulated before any body state changes, so pair ordering cannot
    /// bias the symmetric force application. Then, per body: wall forces,
    /// per-axis speed clamp, position integration, boundary clamp/reflect,
    /// and drag. Clamping after integration keeps every post-tick position
    /// inside `[radius, dimension - radius]`.
    pub fn tick(&mut self, dt: f32) {
        let Some(size) = self.bounds else {
            return;
        };
        if dt <= 0.0 || self.bodies.is_empty() {
            return;
        }
        let k = self.config.force_constant;

        let mut impulses = vec![Vec2::ZERO; self.bodies.len()];
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let dv = pair_impulse(&self.bodies[i], &self.bodies[j], k, dt);
                impulses[i] -= dv;
                impulses[j] += dv;
            }
            if self.cursor.on_screen {
                let dv = pair_impulse(&self.bodies[i], &self.cursor.body, k, dt);
                impulses[i] -= dv;
            }
        }

        let max_v = self.config.max_velocity;
        let drag = (1.0 - self.config.drag * dt).max(0.0);
        for (body, impulse) in self.bodies.iter_mut().zip(&impulses) {
            body.vel += *impulse;
            body.vel += wall_impulse(body, size, self.wall_charge, k) * dt;
            body.vel.x = body.vel.x.clamp(-max_v, max_v);
            body.vel.y = body.vel.y.clamp(-max_v, max_v);
            body.pos += body.vel * dt;

            // Clamp to the walls, reflecting only a velocity component that
            // points further out.
            if body.pos.x >= size.x - body.radius {
                body.pos.x = size.x - body.radius;
                if body.vel.x > 0.0 {
                    body.vel.x = -body.vel.x;
                }
            }
            if body.pos.x <= body.radius {
                body.pos.x = body.radius;
                if body.vel.x < 0.0 {
                    body.vel.x = -body.vel.x;
                }
            }
            if body.pos.y >= size.y - body.radius {
                body.pos.y = size.y - body.radius;
                if body.vel.y > 0.0 {
                    body.vel.y = -body.vel.y;
                }
            }
            if body.pos.y <= body.radius {
                body.pos.y = body.radius;
                if body.vel.y < 0.0 {
                    body.vel.y = -body.vel.y;
                }
            }

            body.vel *= drag;
        }
    }
}

/// Inverse-square repulsion from all four walls, as a velocity delta per
/// unit time. Opposite walls push in opposite directions, so the net force
/// on an axis is the difference of the two wall terms.
fn wall_impulse(body: &Body, size: Vec2, wall_charge: f32, force_constant: f32) -> Vec2 {
    let strength = body.mass * wall_charge * force_constant;
    Vec2::new(
        strength / dist_sq(body.pos.x) - strength / dist_sq(size.x - body.pos.x),
        strength / dist_sq(body.pos.y) - strength / dist_sq(size.y - body.pos.y),
    )
}

fn dist_sq(d: f32) -> f32 {
    (d * d).max(MIN_WALL_DIST_SQ)
}
