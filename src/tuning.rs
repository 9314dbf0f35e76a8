//! Physics and surface tuning
//!
//! Defaults reproduce the classic feel. Hosts may override any field from JSON;
//! missing fields keep their defaults.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::terrain::TerrainParams;

/// How the horizontal bounds clamp treats the vehicle footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Clamp the vehicle center to `[0, width]` (half the body may leave the surface)
    #[default]
    Canvas,
    /// Keep the whole footprint on the surface: `[w/2, width - w/2]`
    Footprint,
}

/// Size of the drawing surface the simulation lives in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// Tuning values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub surface: Surface,

    // === Vehicle ===
    pub vehicle_width: f32,
    pub vehicle_height: f32,
    pub spawn: Vec2,

    // === Physics (per tick at dt = 1) ===
    pub gravity: f32,
    pub friction: f32,
    pub acceleration: f32,
    pub max_speed: f32,

    // === Terrain ===
    pub terrain_min_height: f32,
    pub terrain_bottom_margin: f32,
    pub terrain_max_step: f32,

    pub boundary: BoundaryMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            surface: Surface::default(),

            vehicle_width: VEHICLE_WIDTH,
            vehicle_height: VEHICLE_HEIGHT,
            spawn: Vec2::new(VEHICLE_START_X, VEHICLE_START_Y),

            gravity: GRAVITY,
            friction: FRICTION,
            acceleration: ACCELERATION,
            max_speed: MAX_SPEED,

            terrain_min_height: TERRAIN_MIN_HEIGHT,
            terrain_bottom_margin: TERRAIN_BOTTOM_MARGIN,
            terrain_max_step: TERRAIN_MAX_STEP,

            boundary: BoundaryMode::Canvas,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every field is usable by the integrator
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("surface.width", self.surface.width),
            ("surface.height", self.surface.height),
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("max_speed", self.max_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite and positive",
                });
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("acceleration", self.acceleration),
            ("terrain_min_height", self.terrain_min_height),
            ("terrain_bottom_margin", self.terrain_bottom_margin),
            ("terrain_max_step", self.terrain_max_step),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite and not negative",
                });
            }
        }

        if !self.spawn.is_finite() {
            return Err(TuningError::Invalid {
                field: "spawn",
                reason: "must be finite",
            });
        }
        if !(self.friction.is_finite() && self.friction > 0.0 && self.friction <= 1.0) {
            return Err(TuningError::Invalid {
                field: "friction",
                reason: "must be in (0, 1]",
            });
        }
        if self.terrain_min_height > self.terrain_max_height() {
            return Err(TuningError::Invalid {
                field: "terrain_min_height",
                reason: "must not exceed surface height minus bottom margin",
            });
        }
        if self.boundary == BoundaryMode::Footprint && self.vehicle_width > self.surface.width {
            return Err(TuningError::Invalid {
                field: "vehicle_width",
                reason: "footprint boundary needs the vehicle to fit on the surface",
            });
        }
        Ok(())
    }

    /// Lowest point (largest y) terrain may reach
    #[inline]
    pub fn terrain_max_height(&self) -> f32 {
        self.surface.height - self.terrain_bottom_margin
    }

    /// Terrain generation parameters for this surface
    pub fn terrain_params(&self) -> TerrainParams {
        TerrainParams {
            surface_height: self.surface.height,
            min_height: self.terrain_min_height,
            max_height: self.terrain_max_height(),
            max_step: self.terrain_max_step,
        }
    }

    /// Allowed range for the vehicle center x
    pub fn horizontal_limits(&self) -> (f32, f32) {
        match self.boundary {
            BoundaryMode::Canvas => (0.0, self.surface.width),
            BoundaryMode::Footprint => {
                let half = self.vehicle_width / 2.0;
                (half, self.surface.width - half)
            }
        }
    }

    /// Number of terrain columns (one per integer x across the surface)
    #[inline]
    pub fn terrain_width(&self) -> usize {
        self.surface.width.max(0.0) as usize
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// Parsed, but a value is unusable
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning: {e}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}
