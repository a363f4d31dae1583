pub mod clock;
pub mod engine;
pub mod grid;
pub mod instrument;
pub mod integrator;
pub mod particles;
pub mod pointer;
pub mod render;
pub mod savestate;
pub mod viewport;

pub use clock::FrameClock;
pub use engine::{Body, CursorBody, EngineConfig, RepulsionEngine};
pub use grid::{Grid, GridError, Tile};
pub use instrument::{Instrument, InstrumentError, NoteHandle, RecordingInstrument};
pub use particles::{Particle, ParticlePool, PARTICLE_LIFETIME, PARTICLE_POOL_SIZE};
pub use pointer::{PointerEvent, PointerTracker};
pub use render::{HeatRenderer, TileSprite, TileVisual, BURST_COUNT, BURST_SPEED};
pub use viewport::Viewport;
