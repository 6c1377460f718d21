//! # Voltage Drop
//!
//! Single-phase voltage drop along a two-conductor run:
//!
//! ```text
//! ΔV = 2 · L · I · ρ / A
//! ΔV% = ΔV / V · 100
//! ```
//!
//! where L is the one-way length (m), I the load current (A), ρ the conductor
//! resistivity (Ω·mm²/m) and A the conductor cross-section (mm²).
//!
//! A drop of up to 4 % is accepted, in line with common branch-circuit
//! guidance (NBR 5410 / IEC 60364-5-52, NEC informational notes). When the
//! drop is excessive the next commercial cable size up is suggested.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::calculations::voltage_drop::{calculate, VoltageDropInput};
//! use volt_core::catalogs::ConductorMaterial;
//!
//! let input = VoltageDropInput {
//!     voltage: 220.0,
//!     current: 10.0,
//!     distance_m: 50.0,
//!     cross_section_mm2: 2.5,
//!     material: ConductorMaterial::Copper,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.drop_volts, 6.88);
//! assert!(result.acceptable);
//! ```

use serde::{Deserialize, Serialize};

use super::{require_finite, require_positive, round_to};
use crate::catalogs::{Catalogs, ConductorMaterial};
use crate::errors::CalcResult;

/// Maximum acceptable drop in percent of source voltage
pub const MAX_DROP_PERCENT: f64 = 4.0;

/// Input parameters for a voltage drop check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "voltage": 220.0,
///   "current": 10.0,
///   "distance_m": 50.0,
///   "cross_section_mm2": 2.5,
///   "material": "copper"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropInput {
    /// Source voltage (V)
    pub voltage: f64,

    /// Load current (A)
    pub current: f64,

    /// One-way run length (m)
    pub distance_m: f64,

    /// Conductor cross-section (mm²)
    pub cross_section_mm2: f64,

    /// Conductor material
    #[serde(default)]
    pub material: ConductorMaterial,
}

impl VoltageDropInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("voltage", self.voltage)?;
        require_positive("current", self.current)?;
        require_positive("distance_m", self.distance_m)?;
        require_positive("cross_section_mm2", self.cross_section_mm2)?;
        Ok(())
    }
}

/// Results of a voltage drop check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropResult {
    /// Drop in volts (2 decimals)
    pub drop_volts: f64,

    /// Drop as a percentage of source voltage (2 decimals)
    pub drop_percentage: f64,

    /// True when the drop does not exceed [`MAX_DROP_PERCENT`]
    pub acceptable: bool,

    /// Next commercial size up when the drop is excessive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_cross_section_mm2: Option<f64>,
}

/// Calculate voltage drop with the standard catalogs.
pub fn calculate(input: &VoltageDropInput) -> CalcResult<VoltageDropResult> {
    calculate_with(input, Catalogs::standard())
}

/// Calculate voltage drop, suggesting sizes from `catalogs`.
pub fn calculate_with(
    input: &VoltageDropInput,
    catalogs: &Catalogs,
) -> CalcResult<VoltageDropResult> {
    input.validate()?;

    let rho = input.material.resistivity();
    let drop = require_finite(
        "drop_volts",
        2.0 * input.distance_m * input.current * rho / input.cross_section_mm2,
    )?;
    let percent = require_finite("drop_percentage", drop / input.voltage * 100.0)?;

    // Threshold applies to the unrounded percentage
    let acceptable = percent <= MAX_DROP_PERCENT;
    let suggested_cross_section_mm2 = if acceptable {
        None
    } else {
        catalogs.next_larger_cross_section(input.cross_section_mm2)
    };

    Ok(VoltageDropResult {
        drop_volts: round_to(drop, 2),
        drop_percentage: round_to(percent, 2),
        acceptable,
        suggested_cross_section_mm2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    fn test_input() -> VoltageDropInput {
        VoltageDropInput {
            voltage: 220.0,
            current: 10.0,
            distance_m: 50.0,
            cross_section_mm2: 2.5,
            material: ConductorMaterial::Copper,
        }
    }

    #[test]
    fn test_copper_reference_case() {
        let result = calculate(&test_input()).unwrap();
        // 2 * 50 * 10 * 0.0172 / 2.5 = 6.88 V, 6.88 / 220 = 3.127 %
        assert_eq!(result.drop_volts, 6.88);
        assert_eq!(result.drop_percentage, 3.13);
        assert!(result.acceptable);
        assert_eq!(result.suggested_cross_section_mm2, None);
    }

    #[test]
    fn test_aluminum_exceeds_limit() {
        let mut input = test_input();
        input.material = ConductorMaterial::Aluminum;
        let result = calculate(&input).unwrap();
        // 2 * 50 * 10 * 0.028 / 2.5 = 11.2 V = 5.09 %
        assert_eq!(result.drop_volts, 11.2);
        assert_eq!(result.drop_percentage, 5.09);
        assert!(!result.acceptable);
        assert_eq!(result.suggested_cross_section_mm2, Some(4.0));
    }

    #[test]
    fn test_no_suggestion_above_largest_cable() {
        let input = VoltageDropInput {
            voltage: 110.0,
            current: 200.0,
            distance_m: 200.0,
            cross_section_mm2: 95.0,
            material: ConductorMaterial::Copper,
        };
        let result = calculate(&input).unwrap();
        assert!(!result.acceptable);
        assert_eq!(result.suggested_cross_section_mm2, None);
    }

    #[test]
    fn test_threshold_uses_unrounded_percentage() {
        // Target a 4.004 % drop: displays as 4.0 but is over the limit
        let mut input = test_input();
        input.distance_m = 0.04004 * 220.0 * 2.5 / (2.0 * 10.0 * 0.0172);
        let result = calculate(&input).unwrap();
        assert_eq!(result.drop_percentage, 4.0);
        assert!(!result.acceptable);
        assert_eq!(result.suggested_cross_section_mm2, Some(4.0));
    }

    #[test]
    fn test_non_positive_inputs() {
        let mut input = test_input();
        input.distance_m = 0.0;
        assert!(matches!(calculate(&input), Err(CalcError::InvalidInput { .. })));

        let mut input = test_input();
        input.cross_section_mm2 = -2.5;
        assert!(matches!(calculate(&input), Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_idempotent() {
        let a = calculate(&test_input()).unwrap();
        let b = calculate(&test_input()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_material_defaults_to_copper() {
        let json = r#"{"voltage":220,"current":10,"distance_m":50,"cross_section_mm2":2.5}"#;
        let input: VoltageDropInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.material, ConductorMaterial::Copper);
    }

    #[test]
    fn test_overflowing_drop_rejected() {
        let mut input = test_input();
        input.current = 1e200;
        input.distance_m = 1e200;
        assert!(matches!(calculate(&input), Err(CalcError::InvalidInput { .. })));
    }
}
