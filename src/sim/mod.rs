//! Deterministic simulation module
//!
//! All vehicle and terrain logic lives here. This module must be pure and deterministic:
//! - Explicit timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{clamp_horizontal, resolve_terrain_contact, terrain_penetration};
pub use state::{InputIntent, SimState, VehicleState};
pub use terrain::{Heightfield, HeightfieldError, TerrainParams, generate, generate_with};
pub use tick::{step, tick};
