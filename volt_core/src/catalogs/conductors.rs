//! Conductor Data
//!
//! Conductor materials with their resistivity, the commercial cable
//! cross-section series, and the overall (conductor + insulation) area of
//! standard building wire used for conduit fill.
//!
//! ## Resistivity
//!
//! Values are in Ω·mm²/m at roughly 20 °C:
//! - Copper: 0.0172
//! - Aluminum: 0.028

use serde::{Deserialize, Serialize};

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConductorMaterial {
    #[default]
    Copper,
    Aluminum,
}

impl ConductorMaterial {
    /// All materials for UI selection
    pub const ALL: [ConductorMaterial; 2] =
        [ConductorMaterial::Copper, ConductorMaterial::Aluminum];

    /// Resistivity ρ in Ω·mm²/m
    pub fn resistivity(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => 0.0172,
            ConductorMaterial::Aluminum => 0.028,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
        }
    }
}

impl std::str::FromStr for ConductorMaterial {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "copper" | "cu" => Ok(ConductorMaterial::Copper),
            "aluminum" | "aluminium" | "al" => Ok(ConductorMaterial::Aluminum),
            other => Err(format!("unknown conductor material '{}'", other)),
        }
    }
}

/// Commercial cable cross-sections in mm² (ascending)
pub const CABLE_CROSS_SECTIONS_MM2: [f64; 11] =
    [1.5, 2.5, 4.0, 6.0, 10.0, 16.0, 25.0, 35.0, 50.0, 70.0, 95.0];

/// A wire gauge and its overall area including insulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEntry {
    /// Nominal conductor cross-section in mm² (lookup key)
    pub cross_section_mm2: f64,
    /// Total area of the insulated wire in mm²
    pub total_area_mm2: f64,
}

/// Standard insulated wire table, IEC 60227 / THHN building wire
pub fn standard_wires() -> Vec<WireEntry> {
    [
        (1.5, 8.5),
        (2.5, 11.9),
        (4.0, 15.2),
        (6.0, 18.8),
        (10.0, 29.2),
        (16.0, 45.4),
        (25.0, 70.6),
        (35.0, 95.0),
        (50.0, 132.7),
    ]
    .into_iter()
    .map(|(cross_section_mm2, total_area_mm2)| WireEntry {
        cross_section_mm2,
        total_area_mm2,
    })
    .collect()
}
