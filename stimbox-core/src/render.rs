use glam::Vec2;

use crate::grid::Grid;
use crate::particles::{ParticlePool, PARTICLE_LIFETIME};

/// Particle speed of a playhead burst, in pixels per frame unit.
pub const BURST_SPEED: f32 = 8.0;
/// Particles per playhead burst.
pub const BURST_COUNT: usize = 20;

/// Max heat contribution to an unplayed tile's alpha, between 0 and 1.
const MAX_HEAT_BRIGHTNESS: f32 = 0.05;
const BASE_ALPHA: f32 = 51.0 / 255.0;
const HEAT_ALPHA_RANGE: f32 = 204.0 / 255.0;
const HOVER_ALPHA: f32 = 0.3;
const ARMED_ALPHA: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSprite {
    Off,
    Armed,
    /// Armed and currently under the playhead.
    Playing,
}

/// What one tile should look like this frame. The caller maps this onto
/// whatever drawing primitives it has; nothing here draws.
#[derive(Debug, Clone, Copy)]
pub struct TileVisual {
    pub sprite: TileSprite,
    pub alpha: f32,
}

/// Derives per-tile visuals from the grid, the playhead, and a particle
/// pool whose bursts it owns. Reads simulation state, never mutates it.
pub struct HeatRenderer {
    pool: ParticlePool,
    /// One heat value per tile, rebuilt from live particles every frame.
    heatmap: Vec<f32>,
    canvas: Vec2,
    grid_width: usize,
    grid_height: usize,
    last_playhead: Option<usize>,
}

impl HeatRenderer {
    pub fn new(grid_width: usize, grid_height: usize, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            pool: ParticlePool::new(canvas_width, canvas_height),
            heatmap: vec![0.0; grid_width * grid_height],
            canvas: Vec2::new(canvas_width, canvas_height),
            grid_width,
            grid_height,
            last_playhead: None,
        }
    }

    /// Deterministic construction for tests (seeds the burst phase).
    pub fn seeded(
        grid_width: usize,
        grid_height: usize,
        canvas_width: f32,
        canvas_height: f32,
        seed: u64,
    ) -> Self {
        Self {
            pool: ParticlePool::seeded(canvas_width, canvas_height, seed),
            heatmap: vec![0.0; grid_width * grid_height],
            canvas: Vec2::new(canvas_width, canvas_height),
            grid_width,
            grid_height,
            last_playhead: None,
        }
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Pixel size of one grid cell.
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.canvas.x / self.grid_width as f32,
            self.canvas.y / self.grid_height as f32,
        )
    }

    /// Maps a pixel position to the tile it falls in, or `None` outside
    /// the grid.
    pub fn pixel_to_tile(&self, pos: Vec2) -> Option<(usize, usize)> {
        let cell = self.cell_size();
        let x = (pos.x / cell.x).floor();
        let y = (pos.y / cell.y).floor();
        if x < 0.0 || y < 0.0 || x >= self.grid_width as f32 || y >= self.grid_height as f32 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Current heat of a tile: the summed remaining life of live particles
    /// over it as of the last `update`.
    pub fn heat(&self, x: usize, y: usize) -> f32 {
        self.heatmap
            .get(x * self.grid_height + y)
            .copied()
            .unwrap_or(0.0)
    }

    /// Advances particles, rebuilds the heatmap, fires bursts for armed
    /// tiles the playhead newly crossed, and returns one visual per tile in
    /// grid linear order.
    ///
    /// The grid must have the dimensions this renderer was built for.
    pub fn update(&mut self, grid: &Grid, dt: f32, mouse: Option<Vec2>) -> Vec<TileVisual> {
        debug_assert_eq!(
            (grid.width(), grid.height()),
            (self.grid_width, self.grid_height),
            "renderer and grid dimensions must match"
        );
        self.pool.advance(dt);
        self.rebuild_heatmap();

        let playhead = grid.playhead_column();
        let crossed = playhead.is_some() && playhead != self.last_playhead;
        let hovered = mouse.and_then(|pos| self.pixel_to_tile(pos));
        let cell = self.cell_size();

        let len = grid.width() * grid.height();
        let mut visuals = Vec::with_capacity(len);
        for index in 0..len {
            let (x, y) = grid.index_to_coord(index);
            let on = grid.tile(x, y).is_some_and(|tile| !tile.is_empty());
            let visual = if on {
                if Some(x) == playhead {
                    if crossed {
                        let center =
                            Vec2::new((x as f32 + 0.5) * cell.x, (y as f32 + 0.5) * cell.y);
                        self.pool.spawn_burst(center, BURST_SPEED, BURST_COUNT);
                    }
                    TileVisual {
                        sprite: TileSprite::Playing,
                        alpha: 1.0,
                    }
                } else {
                    TileVisual {
                        sprite: TileSprite::Armed,
                        alpha: ARMED_ALPHA,
                    }
                }
            } else if hovered == Some((x, y)) {
                TileVisual {
                    sprite: TileSprite::Off,
                    alpha: HOVER_ALPHA,
                }
            } else {
                TileVisual {
                    sprite: TileSprite::Off,
                    alpha: self.heatmap[index] * MAX_HEAT_BRIGHTNESS * HEAT_ALPHA_RANGE
                        / PARTICLE_LIFETIME
                        + BASE_ALPHA,
                }
            };
            visuals.push(visual);
        }
        self.last_playhead = playhead;
        visuals
    }

    fn rebuild_heatmap(&mut self) {
        self.heatmap.fill(0.0);
        let cell = self.cell_size();
        for p in self.pool.live() {
            let x = (p.pos.x / cell.x).floor();
            let y = (p.pos.y / cell.y).floor();
            if x < 0.0 || y < 0.0 || x >= self.grid_width as f32 || y >= self.grid_height as f32 {
                continue;
            }
            self.heatmap[x as usize * self.grid_height + y as usize] += p.life;
        }
    }
}
