//! Simulation state and core types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::{self, Heightfield};
use crate::finite_or;
use crate::tuning::Tuning;

/// Directional intents for a tick
///
/// Written by the host input adapter, read (never mutated) by the integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
}

impl InputIntent {
    pub const NONE: Self = Self {
        left: false,
        right: false,
    };
    pub const LEFT: Self = Self {
        left: true,
        right: false,
    };
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
    };
}

/// Kinematic state of the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Center of the footprint (screen space, y grows downward)
    pub pos: Vec2,
    /// Per-tick velocity
    pub vel: Vec2,
    /// Tilt in radians. Tracked but not integrated or drawn.
    #[serde(default)]
    pub angle: f32,
}

impl VehicleState {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
        }
    }

    pub fn with_velocity(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            angle: 0.0,
        }
    }

    /// Replace non-finite components so integration stays total
    ///
    /// Velocity resets to zero, x moves to `left_limit` and y rests on the
    /// terrain under the (repaired) x. Returns true if anything was changed.
    pub fn sanitize(&mut self, heightfield: &Heightfield, left_limit: f32, half_height: f32) -> bool {
        if self.pos.is_finite() && self.vel.is_finite() && self.angle.is_finite() {
            return false;
        }

        log::warn!(
            "Non-finite vehicle state repaired: pos={:?}, vel={:?}, angle={}",
            self.pos,
            self.vel,
            self.angle
        );
        self.vel.x = finite_or(self.vel.x, 0.0);
        self.vel.y = finite_or(self.vel.y, 0.0);
        self.angle = finite_or(self.angle, 0.0);
        self.pos.x = finite_or(self.pos.x, left_limit);
        if !self.pos.y.is_finite() {
            self.pos.y = heightfield.height_at(self.pos.x) - half_height;
        }
        true
    }
}

/// Complete simulation state for one session
///
/// Owned by the loop controller and handed to the integrator by `&mut`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub vehicle: VehicleState,
    pub terrain: Heightfield,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    /// Fresh session: terrain across the whole surface, vehicle at the spawn point
    pub fn new(tuning: &Tuning, seed: Option<u64>) -> Self {
        let terrain = terrain::generate_with(tuning.terrain_width(), seed, &tuning.terrain_params());
        log::info!(
            "Session initialized: seed={}, terrain width={}",
            terrain.seed(),
            terrain.width()
        );
        Self::with_terrain(tuning, terrain)
    }

    /// Session over a prebuilt heightfield
    pub fn with_terrain(tuning: &Tuning, terrain: Heightfield) -> Self {
        Self {
            vehicle: VehicleState::new(tuning.spawn),
            terrain,
            time_ticks: 0,
        }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.terrain.seed()
    }
}
