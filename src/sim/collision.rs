//! Terrain contact and surface bounds
//!
//! Collision is one-sided and position-correcting: a vehicle whose bottom edge
//! sinks below the terrain is lifted back onto it and loses its vertical speed.
//! There is no restitution and no sub-tick time-of-impact search, so a fast
//! enough fall can pass through a thin spike between two samples.

use glam::Vec2;

use super::state::VehicleState;
use super::terrain::Heightfield;

/// Terrain surface y under a footprint centered at `pos`, if the footprint reaches into it
pub fn terrain_penetration(pos: Vec2, half_height: f32, terrain: &Heightfield) -> Option<f32> {
    let terrain_y = terrain.height_at(pos.x);
    (pos.y + half_height > terrain_y).then_some(terrain_y)
}

/// Snap a penetrating vehicle onto the terrain and stop its vertical motion
///
/// Returns true if the vehicle was touching ground.
pub fn resolve_terrain_contact(vehicle: &mut VehicleState, terrain: &Heightfield, half_height: f32) -> bool {
    match terrain_penetration(vehicle.pos, half_height, terrain) {
        Some(terrain_y) => {
            vehicle.pos.y = terrain_y - half_height;
            vehicle.vel.y = 0.0;
            true
        }
        None => false,
    }
}

/// Keep the vehicle center inside `[min_x, max_x]`
///
/// Touching a wall kills horizontal speed. Returns true if x was moved.
pub fn clamp_horizontal(vehicle: &mut VehicleState, min_x: f32, max_x: f32) -> bool {
    if vehicle.pos.x < min_x {
        vehicle.pos.x = min_x;
        vehicle.vel.x = 0.0;
        true
    } else if vehicle.pos.x > max_x {
        vehicle.pos.x = max_x;
        vehicle.vel.x = 0.0;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penetration_reports_surface() {
        let terrain = Heightfield::flat(800, 300.0, 400.0);
        assert_eq!(terrain_penetration(Vec2::new(100.0, 295.0), 10.0, &terrain), Some(300.0));
    }

    #[test]
    fn test_resting_exactly_on_surface_is_not_a_hit() {
        let terrain = Heightfield::flat(800, 300.0, 400.0);
        assert_eq!(terrain_penetration(Vec2::new(100.0, 290.0), 10.0, &terrain), None);
    }

    #[test]
    fn test_resolve_snaps_and_stops_fall() {
        let terrain = Heightfield::flat(800, 300.0, 400.0);
        let mut vehicle = VehicleState::with_velocity(Vec2::new(50.0, 320.0), Vec2::new(3.0, 12.0));
        assert!(resolve_terrain_contact(&mut vehicle, &terrain, 10.0));
        assert_eq!(vehicle.pos, Vec2::new(50.0, 290.0));
        assert_eq!(vehicle.vel, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_resolve_leaves_airborne_vehicle() {
        let terrain = Heightfield::flat(800, 300.0, 400.0);
        let mut vehicle = VehicleState::with_velocity(Vec2::new(50.0, 100.0), Vec2::new(0.0, 4.0));
        assert!(!resolve_terrain_contact(&mut vehicle, &terrain, 10.0));
        assert_eq!(vehicle.vel.y, 4.0);
    }

    #[test]
    fn test_off_terrain_uses_fallback_floor() {
        let terrain = Heightfield::flat(10, 300.0, 400.0);
        let mut vehicle = VehicleState::new(Vec2::new(-3.0, 395.0));
        resolve_terrain_contact(&mut vehicle, &terrain, 10.0);
        assert_eq!(vehicle.pos.y, 390.0);
    }

    #[test]
    fn test_clamp_horizontal() {
        let mut vehicle = VehicleState::with_velocity(Vec2::new(-4.9, 100.0), Vec2::new(-4.9, 0.0));
        assert!(clamp_horizontal(&mut vehicle, 0.0, 800.0));
        assert_eq!(vehicle.pos.x, 0.0);
        assert_eq!(vehicle.vel.x, 0.0);

        let mut vehicle = VehicleState::with_velocity(Vec2::new(805.0, 100.0), Vec2::new(5.0, 0.0));
        assert!(clamp_horizontal(&mut vehicle, 0.0, 800.0));
        assert_eq!(vehicle.pos.x, 800.0);
        assert_eq!(vehicle.vel.x, 0.0);

        let mut vehicle = VehicleState::with_velocity(Vec2::new(400.0, 100.0), Vec2::new(5.0, 0.0));
        assert!(!clamp_horizontal(&mut vehicle, 0.0, 800.0));
        assert_eq!(vehicle.vel.x, 5.0);
    }
}
