//! Procedural heightfield terrain
//!
//! Terrain is a bounded random walk sampled once per integer x. Heights are
//! screen-space y values: larger means lower on the surface.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::finite_or;

/// Parameters for the random walk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    /// Surface height; the walk starts at half of it and out-of-range lookups return it
    pub surface_height: f32,
    /// Highest point (smallest y) terrain may reach
    pub min_height: f32,
    /// Lowest point (largest y) terrain may reach
    pub max_height: f32,
    /// Largest height change between adjacent columns
    pub max_step: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            surface_height: CANVAS_HEIGHT,
            min_height: TERRAIN_MIN_HEIGHT,
            max_height: CANVAS_HEIGHT - TERRAIN_BOTTOM_MARGIN,
            max_step: TERRAIN_MAX_STEP,
        }
    }
}

/// Immutable per-column terrain heights
///
/// Bounds and smoothness come from `generate`. Hand-built and deserialized
/// fields only guarantee finite samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHeightfield")]
pub struct Heightfield {
    /// Seed the walk was generated from (0 for hand-built fields)
    seed: u64,
    heights: Vec<f32>,
    /// Returned for columns outside `[0, width)`
    fallback: f32,
}

impl Heightfield {
    /// Build a heightfield from explicit samples
    pub fn from_heights(heights: Vec<f32>, fallback: f32) -> Self {
        Self {
            seed: 0,
            heights,
            fallback,
        }
    }

    /// Constant-height terrain
    pub fn flat(width: usize, height: f32, fallback: f32) -> Self {
        Self::from_heights(vec![height; width], fallback)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.heights.len()
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn fallback(&self) -> f32 {
        self.fallback
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height of a single column, if it exists
    #[inline]
    pub fn get(&self, column: usize) -> Option<f32> {
        self.heights.get(column).copied()
    }

    /// Terrain surface y under world x
    ///
    /// Samples column `floor(x)`. Negative, non-finite or past-the-end x
    /// resolves to the fallback height.
    pub fn height_at(&self, x: f32) -> f32 {
        if !x.is_finite() || x < 0.0 {
            return self.fallback;
        }
        // x >= 0 here, so the cast floors; huge values saturate past the end
        self.get(x as usize).unwrap_or(self.fallback)
    }
}

/// Serialized form, checked before it becomes a `Heightfield`
#[derive(Deserialize)]
struct RawHeightfield {
    seed: u64,
    heights: Vec<f32>,
    fallback: f32,
}

/// Why serialized terrain was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum HeightfieldError {
    NonFiniteHeight { column: usize },
    NonFiniteFallback,
}

impl fmt::Display for HeightfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightfieldError::NonFiniteHeight { column } => {
                write!(f, "terrain height at column {column} is not finite")
            }
            HeightfieldError::NonFiniteFallback => write!(f, "terrain fallback height is not finite"),
        }
    }
}

impl std::error::Error for HeightfieldError {}

impl TryFrom<RawHeightfield> for Heightfield {
    type Error = HeightfieldError;

    fn try_from(raw: RawHeightfield) -> Result<Self, Self::Error> {
        if let Some(column) = raw.heights.iter().position(|h| !h.is_finite()) {
            return Err(HeightfieldError::NonFiniteHeight { column });
        }
        if !raw.fallback.is_finite() {
            return Err(HeightfieldError::NonFiniteFallback);
        }
        Ok(Self {
            seed: raw.seed,
            heights: raw.heights,
            fallback: raw.fallback,
        })
    }
}

/// Generate terrain with the default surface parameters
///
/// `None` picks a fresh seed; it is recorded on the returned heightfield.
pub fn generate(width: usize, seed: Option<u64>) -> Heightfield {
    generate_with(width, seed, &TerrainParams::default())
}

/// Generate terrain as a clamped random walk
///
/// Non-finite parameters fall back to the defaults; a non-finite step makes
/// the walk flat.
pub fn generate_with(width: usize, seed: Option<u64>, params: &TerrainParams) -> Heightfield {
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = Pcg32::seed_from_u64(seed);

    let surface_height = finite_or(params.surface_height, CANVAS_HEIGHT);
    let min_height = finite_or(params.min_height, TERRAIN_MIN_HEIGHT);
    let max_height = finite_or(params.max_height, surface_height - TERRAIN_BOTTOM_MARGIN);
    let step = finite_or(params.max_step.abs(), 0.0);

    let mut y = surface_height / 2.0;
    let mut heights = Vec::with_capacity(width);

    for _ in 0..width {
        let delta = if step > 0.0 {
            rng.random_range(-step..=step)
        } else {
            0.0
        };
        // An inverted band (min > max) pins every column to max_height
        y = (y + delta).max(min_height).min(max_height);
        heights.push(y);
    }

    log::debug!(
        "Terrain generated: seed={}, width={}, range={:.1}..{:.1}",
        seed,
        width,
        heights.iter().copied().fold(f32::INFINITY, f32::min),
        heights.iter().copied().fold(f32::NEG_INFINITY, f32::max),
    );

    Heightfield {
        seed,
        heights,
        fallback: surface_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bounds_and_smoothness() {
        let terrain = generate(800, Some(42));
        assert_eq!(terrain.width(), 800);
        assert_eq!(terrain.seed(), 42);

        for &h in terrain.heights() {
            assert!((100.0..=350.0).contains(&h), "height {h} out of bounds");
        }
        for pair in terrain.heights().windows(2) {
            assert!((pair[1] - pair[0]).abs() <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_same_seed_same_terrain() {
        assert_eq!(generate(500, Some(7)), generate(500, Some(7)));
        assert_ne!(generate(500, Some(7)).heights(), generate(500, Some(8)).heights());
    }

    #[test]
    fn test_first_column_starts_near_middle() {
        let terrain = generate(1, Some(1));
        let h = terrain.heights()[0];
        assert!((198.0..=202.0).contains(&h));
    }

    #[test]
    fn test_unseeded_records_seed() {
        let terrain = generate(64, None);
        let again = generate(64, Some(terrain.seed()));
        assert_eq!(terrain, again);
    }

    #[test]
    fn test_height_at_fallback() {
        let terrain = Heightfield::flat(10, 300.0, 400.0);
        assert_eq!(terrain.height_at(0.0), 300.0);
        assert_eq!(terrain.height_at(9.99), 300.0);
        assert_eq!(terrain.height_at(-0.01), 400.0);
        assert_eq!(terrain.height_at(10.0), 400.0);
        assert_eq!(terrain.height_at(f32::NAN), 400.0);
        assert_eq!(terrain.height_at(f32::INFINITY), 400.0);
    }

    #[test]
    fn test_height_at_floors() {
        let terrain = Heightfield::from_heights(vec![300.0, 310.0, 320.0], 400.0);
        assert_eq!(terrain.height_at(1.0), 310.0);
        assert_eq!(terrain.height_at(1.9), 310.0);
        assert_eq!(terrain.height_at(2.5), 320.0);
    }

    #[test]
    fn test_narrow_band_clamps() {
        let params = TerrainParams {
            surface_height: 400.0,
            min_height: 200.0,
            max_height: 200.0,
            max_step: 2.0,
        };
        let terrain = generate_with(50, Some(3), &params);
        assert!(terrain.heights().iter().all(|&h| h == 200.0));
    }

    #[test]
    fn test_infinite_step_gives_flat_walk() {
        let params = TerrainParams {
            max_step: f32::INFINITY,
            ..Default::default()
        };
        let terrain = generate_with(10, Some(1), &params);
        assert!(terrain.heights().iter().all(|&h| h == 200.0));
    }

    #[test]
    fn test_non_finite_band_uses_defaults() {
        let params = TerrainParams {
            surface_height: f32::NAN,
            min_height: f32::NAN,
            max_height: f32::INFINITY,
            max_step: f32::NAN,
        };
        let terrain = generate_with(20, Some(5), &params);
        assert_eq!(terrain.fallback(), 400.0);
        assert!(terrain.heights().iter().all(|h| h.is_finite()));
        assert!(terrain.heights().iter().all(|&h| (100.0..=350.0).contains(&h)));
    }

    #[test]
    fn test_deserialize_round_trip() {
        let terrain = generate(100, Some(11));
        let json = serde_json::to_string(&terrain).unwrap();
        let back: Heightfield = serde_json::from_str(&json).unwrap();
        assert_eq!(back, terrain);
    }

    #[test]
    fn test_deserialize_rejects_non_finite() {
        // An overflowing literal fails either in the parser or the finiteness check
        let err = serde_json::from_str::<Heightfield>(r#"{"seed":0,"heights":[300.0,1e999],"fallback":400.0}"#);
        assert!(err.is_err());

        let raw = RawHeightfield {
            seed: 0,
            heights: vec![300.0, f32::NAN],
            fallback: 400.0,
        };
        assert_eq!(
            Heightfield::try_from(raw),
            Err(HeightfieldError::NonFiniteHeight { column: 1 })
        );

        let raw = RawHeightfield {
            seed: 0,
            heights: vec![300.0],
            fallback: f32::INFINITY,
        };
        assert_eq!(Heightfield::try_from(raw), Err(HeightfieldError::NonFiniteFallback));
    }
}
