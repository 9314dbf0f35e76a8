//! Per-tick vehicle integration
//!
//! Advances the vehicle with semi-implicit Euler. At `dt = 1` every update
//! matches the classic per-frame rules exactly; other `dt` values scale
//! accelerations linearly and friction exponentially.

use super::collision::{clamp_horizontal, resolve_terrain_contact};
use super::state::{InputIntent, SimState, VehicleState};
use super::terrain::Heightfield;
use crate::finite_or;
use crate::tuning::Tuning;

/// Advance one vehicle by `dt` ticks
///
/// Order matters: drive, friction, speed clamp, gravity, position, terrain
/// contact, horizontal bounds. A non-finite or non-positive `dt` leaves the
/// state untouched.
pub fn step(
    vehicle: &mut VehicleState,
    intent: &InputIntent,
    terrain: &Heightfield,
    tuning: &Tuning,
    dt: f32,
) {
    if !dt.is_finite() || dt <= 0.0 {
        log::warn!("Ignoring step with unusable dt={}", dt);
        return;
    }

    let half_height = tuning.vehicle_height / 2.0;
    let (min_x, max_x) = tuning.horizontal_limits();
    vehicle.sanitize(terrain, min_x, half_height);

    // Drive (both intents may apply in the same tick)
    if intent.left {
        vehicle.vel.x -= tuning.acceleration * dt;
    }
    if intent.right {
        vehicle.vel.x += tuning.acceleration * dt;
    }

    // Friction decays speed every tick, held input or not
    vehicle.vel.x *= if dt == 1.0 {
        tuning.friction
    } else {
        tuning.friction.powf(dt)
    };

    // The cap is |max_speed|; a NaN cap pins vx to 0
    let max_speed = finite_or(tuning.max_speed.abs(), 0.0);
    vehicle.vel.x = vehicle.vel.x.max(-max_speed).min(max_speed);

    // Gravity is never clamped
    vehicle.vel.y += tuning.gravity * dt;

    vehicle.pos += vehicle.vel * dt;

    resolve_terrain_contact(vehicle, terrain, half_height);

    if clamp_horizontal(vehicle, min_x, max_x) {
        // The wall moved us onto a different column; settle there too
        resolve_terrain_contact(vehicle, terrain, half_height);
    }
}

/// Advance the whole simulation by one tick
pub fn tick(state: &mut SimState, intent: &InputIntent, tuning: &Tuning, dt: f32) {
    step(&mut state.vehicle, intent, &state.terrain, tuning, dt);
    state.time_ticks += 1;
}
