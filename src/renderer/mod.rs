//! Draw list for the host canvas
//!
//! The simulation never touches a drawing API. Each frame it describes the
//! scene as a short list of fill commands that the host replays in order.

use glam::Vec2;

use crate::sim::SimState;
use crate::tuning::Tuning;

/// Palette
pub const SKY_COLOR: &str = "#87ceeb";
pub const TERRAIN_COLOR: &str = "#228B22";
pub const VEHICLE_COLOR: &str = "#FF0000";

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear { width: f32, height: f32 },
    /// Fill a closed polygon
    FillPolygon {
        points: Vec<Vec2>,
        color: &'static str,
    },
    /// Fill an axis-aligned rectangle around `center`
    FillRect {
        center: Vec2,
        size: Vec2,
        color: &'static str,
    },
}

/// Terrain outline: bottom-left, one vertex per surface column, bottom-right
pub fn terrain_polygon(state: &SimState, tuning: &Tuning) -> Vec<Vec2> {
    let width = tuning.surface.width;
    let height = tuning.surface.height;
    let columns = tuning.terrain_width();

    let mut points = Vec::with_capacity(columns + 2);
    points.push(Vec2::new(0.0, height));
    for x in 0..columns {
        let y = state.terrain.get(x).unwrap_or(height);
        points.push(Vec2::new(x as f32, y));
    }
    points.push(Vec2::new(width, height));
    points
}

/// Build the frame's draw list
///
/// The vehicle box is drawn unrotated; `angle` is not consulted.
pub fn build_scene(state: &SimState, tuning: &Tuning) -> Vec<DrawCommand> {
    vec![
        DrawCommand::Clear {
            width: tuning.surface.width,
            height: tuning.surface.height,
        },
        DrawCommand::FillPolygon {
            points: terrain_polygon(state, tuning),
            color: TERRAIN_COLOR,
        },
        DrawCommand::FillRect {
            center: state.vehicle.pos,
            size: Vec2::new(tuning.vehicle_width, tuning.vehicle_height),
            color: VEHICLE_COLOR,
        },
    ]
}
