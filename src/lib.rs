//! Hill Drive - A side-view vehicle over procedural terrain
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, vehicle physics, collisions)
//! - `game`: Tick scheduler that owns the simulation and its input
//! - `platform`: Host input adapter (keys, focus loss)
//! - `renderer`: Draw list consumed by the host canvas
//! - `tuning`: Data-driven physics constants

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Game, StopHandle};
pub use tuning::{BoundaryMode, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Real time covered by one simulation tick (the host refresh, nominally 60 Hz)
    pub const TICK_SECONDS: f32 = 1.0 / 60.0;
    /// Simulated time units advanced per tick (velocities are in px/tick)
    pub const TICK_DT: f32 = 1.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are treated as a stall, not as elapsed time
    pub const MAX_FRAME_SECONDS: f32 = 0.1;

    /// Drawing surface
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Vehicle footprint (axis-aligned box centered on the vehicle position)
    pub const VEHICLE_WIDTH: f32 = 40.0;
    pub const VEHICLE_HEIGHT: f32 = 20.0;
    /// Spawn point
    pub const VEHICLE_START_X: f32 = 100.0;
    pub const VEHICLE_START_Y: f32 = 100.0;

    /// Downward acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Horizontal velocity kept per tick
    pub const FRICTION: f32 = 0.98;
    /// Horizontal acceleration while an intent is held (px/tick²)
    pub const ACCELERATION: f32 = 0.5;
    /// Horizontal speed cap (px/tick)
    pub const MAX_SPEED: f32 = 10.0;

    /// Terrain never rises above this y
    pub const TERRAIN_MIN_HEIGHT: f32 = 100.0;
    /// Terrain stays at least this far above the bottom of the surface
    pub const TERRAIN_BOTTOM_MARGIN: f32 = 50.0;
    /// Largest change in height between adjacent columns
    pub const TERRAIN_MAX_STEP: f32 = 2.0;
}

/// Replace a non-finite value with `fallback`
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
