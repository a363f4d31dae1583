use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

use crate::viewport::Viewport;

/// A simulated circular mass participating in pairwise repulsion.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Body {
    /// Creates a body with mass derived from its radius (`r² · π`).
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            mass: radius * radius * PI,
        }
    }
}

/// The pointer-driven body. It pushes every ordinary body but is never
/// pushed back, and exerts no force while off-screen.
#[derive(Debug, Clone, Copy)]
pub struct CursorBody {
    pub body: Body,
    pub on_screen: bool,
}

/// Tuning constants for one engine instance.
///
/// The two presets correspond to the two renditions of the toy: the
/// sprite-rendered one advances in milliseconds-over-timescale units, the
/// vector-rendered one in frame-ratio units. Same model, different knobs.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub body_count: usize,
    pub body_radius: f32,
    pub cursor_radius: f32,
    pub force_constant: f32,
    pub drag: f32,
    pub max_velocity: f32,
    /// Divisor converting host timestamps to simulation time.
    pub timescale: f32,
    pub wall_charge: f32,
    /// Normalization constant for the viewport area factor.
    pub area_norm: f32,
}

impl EngineConfig {
    pub const SPRITE: Self = Self {
        body_count: 200,
        body_radius: 12.0,
        cursor_radius: 128.0,
        force_constant: 2.0,
        drag: 0.01,
        max_velocity: 1000.0,
        timescale: 1500.0,
        wall_charge: 32.0 * 32.0 * PI,
        area_norm: 1200.0,
    };

    pub const VECTOR: Self = Self {
        body_count: 24,
        body_radius: 24.0,
        cursor_radius: 96.0,
        force_constant: 2.0,
        drag: 0.02,
        max_velocity: 600.0,
        timescale: 16.67,
        wall_charge: 24.0 * 24.0 * PI,
        area_norm: 1200.0,
    };
}

/// N-body repulsion simulation: short-range inverse-square repulsion between
/// every pair of bodies, inverse-square wall confinement, drag, and a speed
/// clamp.
pub struct RepulsionEngine {
    pub(crate) config: EngineConfig,
    pub(crate) bodies: Vec<Body>,
    pub(crate) cursor: CursorBody,
    /// Width and height of the simulation area, while visible.
    pub(crate) bounds: Option<Vec2>,
    pub(crate) wall_charge: f32,
    rng: StdRng,
}

impl RepulsionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic construction for scripted runs and tests.
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Self {
        let r = config.cursor_radius;
        let cursor = CursorBody {
            body: Body::new(Vec2::splat(-r / 2.0), Vec2::ZERO, r),
            on_screen: false,
        };
        Self {
            config,
            bodies: Vec::new(),
            cursor,
            bounds: None,
            wall_charge: config.wall_charge,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn cursor(&self) -> &CursorBody {
        &self.cursor
    }

    /// Updates the simulation area. A degenerate viewport clears all bodies;
    /// a valid viewport after a degenerate one (re)spawns the configured
    /// body count. Masses and the wall charge rescale with the new area.
    pub fn set_bounds(&mut self, viewport: Viewport) {
        if viewport.is_degenerate() {
            self.bodies.clear();
            self.bounds = None;
            return;
        }
        let size = Vec2::new(viewport.width, viewport.height);
        if self.bounds.is_none() {
            self.spawn_bodies(size);
        }
        self.bounds = Some(size);

        let factor = viewport.area_factor(self.config.area_norm);
        for body in &mut self.bodies {
            body.mass = body.radius * body.radius * PI * factor;
        }
        let r = self.config.cursor_radius;
        self.cursor.body.mass = r * r * PI * factor;
        self.wall_charge = self.config.wall_charge * factor;
    }

    /// Updates the cursor body between ticks; no forces are recomputed here.
    pub fn set_cursor(&mut self, pos: Vec2, on_screen: bool) {
        self.cursor.body.pos = pos;
        self.cursor.on_screen = on_screen;
    }

    /// Replaces the body set with an explicit one, for scripted setups.
    /// Masses are taken as given until the next `set_bounds` rescale.
    pub fn place_bodies(&mut self, bodies: Vec<Body>) {
        self.bodies = bodies;
    }

    fn spawn_bodies(&mut self, size: Vec2) {
        let r = self.config.body_radius;
        self.bodies.clear();
        for _ in 0..self.config.body_count {
            let x = self.rng.gen_range(r..=(size.x - r).max(r));
            let y = self.rng.gen_range(r..=(size.y - r).max(r));
            let vx = if self.rng.gen_bool(0.5) { -10.0 } else { 10.0 };
            let vy = if self.rng.gen_bool(0.5) { -10.0 } else { 10.0 };
            self.bodies
                .push(Body::new(Vec2::new(x, y), Vec2::new(vx, vy), r));
        }
    }
}

/// Velocity delta that repulsion against `b` applies to `a` over `dt`,
/// negated; the equal-and-opposite `+dv` goes to `b`.
///
/// The per-axis separation is floored at the smaller radius so overlapping
/// bodies see a large but finite force, and the sign defaults to positive
/// when coordinates coincide so two stacked bodies still separate.
pub(crate) fn pair_impulse(a: &Body, b: &Body, force_constant: f32, dt: f32) -> Vec2 {
    let min_r = a.radius.min(b.radius);
    let diff_x = (b.pos.x - a.pos.x).abs().max(min_r);
    let diff_y = (b.pos.y - a.pos.y).abs().max(min_r);
    let scale = 1.0 / diff_x.max(diff_y);
    let force = (a.mass * b.mass * force_constant) / (diff_x * diff_x + diff_y * diff_y);
    let x_sign = if b.pos.x >= a.pos.x { 1.0 } else { -1.0 };
    let y_sign = if b.pos.y >= a.pos.y { 1.0 } else { -1.0 };
    Vec2::new(
        x_sign * force * diff_x * scale,
        y_sign * force * diff_y * scale,
    ) * dt
}
