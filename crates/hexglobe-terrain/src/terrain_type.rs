//! Terrain categories, their classification thresholds, and material palette.

use serde::{Deserialize, Serialize};

/// Terrain category of a tile. Geometry is bucketed per category for batched rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    Underwater,
    Sand,
    Grass,
    Forest,
    RockLow,
    RockHigh,
    Snow,
}

/// Flat-shaded material for a merged bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Material {
    /// sRGB color.
    pub color: [u8; 3],
    pub casts_shadow: bool,
}

impl TerrainType {
    /// All categories, lowest to highest.
    pub const ALL: [TerrainType; 7] = [
        TerrainType::Underwater,
        TerrainType::Sand,
        TerrainType::Grass,
        TerrainType::Forest,
        TerrainType::RockLow,
        TerrainType::RockHigh,
        TerrainType::Snow,
    ];

    /// Classify a normalized terrain height in `[0, 1]`.
    ///
    /// The height is stretched to `[0, 1.2]` so that snow only appears on the very highest
    /// tiles.
    pub fn classify(terrain_height: f32) -> Self {
        let v = terrain_height * 1.2;
        if v > 1.1 {
            Self::Snow
        } else if v > 0.8 {
            Self::RockHigh
        } else if v > 0.5 {
            Self::RockLow
        } else if v > 0.2 {
            Self::Forest
        } else if v > 0.08 {
            Self::Grass
        } else if v > 0.05 {
            Self::Sand
        } else {
            Self::Underwater
        }
    }

    /// Position in [`TerrainType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rock tiles may carry a separate raised cap; everything else integrates its cap.
    pub fn allows_separate_cap(self) -> bool {
        matches!(self, Self::RockLow | Self::RockHigh)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Underwater => "underwater",
            Self::Sand => "sand",
            Self::Grass => "grass",
            Self::Forest => "forest",
            Self::RockLow => "rock_low",
            Self::RockHigh => "rock_high",
            Self::Snow => "snow",
        }
    }

    pub fn column_material(self) -> Material {
        let color = match self {
            Self::Underwater => [145, 118, 35],
            Self::Sand => [245, 218, 66],
            Self::Grass => [126, 245, 51],
            Self::Forest => [37, 148, 22],
            Self::RockLow => [91, 92, 91],
            Self::RockHigh => [153, 151, 151],
            Self::Snow => [215, 245, 242],
        };
        Material {
            color,
            casts_shadow: true,
        }
    }

    /// Material for separate caps; `None` where the palette has no cap color.
    pub fn cap_material(self) -> Option<Material> {
        let (color, casts_shadow) = match self {
            Self::Underwater | Self::Snow => return None,
            Self::Sand => ([245, 218, 66], true),
            Self::Grass => ([86, 181, 25], true),
            Self::Forest => ([21, 105, 9], true),
            Self::RockLow => ([24, 105, 14], false),
            Self::RockHigh => ([245, 245, 245], false),
        };
        Some(Material {
            color,
            casts_shadow,
        })
    }
}
