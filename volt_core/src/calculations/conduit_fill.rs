//! # Conduit Fill
//!
//! Percentage of a conduit's internal area occupied by insulated conductors:
//!
//! ```text
//! fill% = n · A_wire / A_conduit · 100
//! ```
//!
//! Fill above 40 % fails, the usual NEC Chapter 9 / NBR 5410 limit for three
//! or more conductors.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::calculations::conduit_fill::{calculate, ConduitFillInput};
//!
//! let input = ConduitFillInput {
//!     conduit_size: "3/4".to_string(),
//!     wire_cross_section_mm2: 2.5,
//!     wire_count: 3,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.fill_percentage, 9.9);
//! assert!(!result.over_limit);
//! ```

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::catalogs::Catalogs;
use crate::errors::{CalcError, CalcResult};

/// Maximum fill in percent
pub const MAX_FILL_PERCENT: f64 = 40.0;

/// Input parameters for a conduit fill check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "conduit_size": "3/4",
///   "wire_cross_section_mm2": 2.5,
///   "wire_count": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillInput {
    /// Conduit trade size key (e.g., "1/2", "3/4", "1 1/4")
    pub conduit_size: String,

    /// Nominal wire cross-section in mm² (catalog key)
    pub wire_cross_section_mm2: f64,

    /// Number of conductors in the conduit
    pub wire_count: u32,
}

impl ConduitFillInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.wire_count < 1 {
            return Err(CalcError::invalid_input(
                "wire_count",
                self.wire_count.to_string(),
                "At least one wire is required",
            ));
        }
        Ok(())
    }
}

/// Results of a conduit fill check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillResult {
    /// Occupied area in percent (1 decimal)
    pub fill_percentage: f64,

    /// True when fill exceeds [`MAX_FILL_PERCENT`]
    pub over_limit: bool,

    /// Total insulated wire area (mm²)
    pub wire_area_mm2: f64,

    /// Conduit internal area (mm²)
    pub conduit_area_mm2: f64,
}

/// Calculate conduit fill with the standard catalogs.
pub fn calculate(input: &ConduitFillInput) -> CalcResult<ConduitFillResult> {
    calculate_with(input, Catalogs::standard())
}

/// Calculate conduit fill using areas from `catalogs`.
pub fn calculate_with(
    input: &ConduitFillInput,
    catalogs: &Catalogs,
) -> CalcResult<ConduitFillResult> {
    input.validate()?;

    let conduit_area = catalogs.conduit_area(&input.conduit_size)?;
    let wire_area = f64::from(input.wire_count) * catalogs.wire_area(input.wire_cross_section_mm2)?;

    let fill_percentage = round_to(wire_area / conduit_area * 100.0, 1);

    Ok(ConduitFillResult {
        fill_percentage,
        over_limit: fill_percentage > MAX_FILL_PERCENT,
        wire_area_mm2: round_to(wire_area, 1),
        conduit_area_mm2: conduit_area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> ConduitFillInput {
        ConduitFillInput {
            conduit_size: "3/4".to_string(),
            wire_cross_section_mm2: 2.5,
            wire_count: 3,
        }
    }

    #[test]
    fn test_reference_case() {
        let result = calculate(&test_input()).unwrap();
        // 3 * 11.9 / 360 = 9.92 %
        assert_eq!(result.fill_percentage, 9.9);
        assert!(!result.over_limit);
        assert_eq!(result.wire_area_mm2, 35.7);
        assert_eq!(result.conduit_area_mm2, 360.0);
    }

    #[test]
    fn test_idempotent() {
        let a = calculate(&test_input()).unwrap();
        let b = calculate(&test_input()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_over_limit() {
        let input = ConduitFillInput {
            conduit_size: "1/2".to_string(),
            wire_cross_section_mm2: 6.0,
            wire_count: 4,
        };
        let result = calculate(&input).unwrap();
        // 4 * 18.8 / 170 = 44.2 %
        assert_eq!(result.fill_percentage, 44.2);
        assert!(result.over_limit);
    }

    #[test]
    fn test_exactly_forty_percent_passes() {
        // 4 x 8.5 mm² in an 85 mm² conduit is exactly 40 %
        let mut catalogs = Catalogs::standard().clone();
        catalogs.conduits[0].internal_area_mm2 = 85.0;
        let input = ConduitFillInput {
            conduit_size: "1/2".to_string(),
            wire_cross_section_mm2: 1.5,
            wire_count: 4,
        };
        let result = calculate_with(&input, &catalogs).unwrap();
        assert_eq!(result.fill_percentage, 40.0);
        assert!(!result.over_limit);
    }

    #[test]
    fn test_unknown_keys() {
        let mut input = test_input();
        input.conduit_size = "5".to_string();
        assert!(matches!(calculate(&input), Err(CalcError::UnknownCatalogKey { .. })));

        let mut input = test_input();
        input.wire_cross_section_mm2 = 70.0;
        assert!(matches!(calculate(&input), Err(CalcError::UnknownCatalogKey { .. })));
    }

    #[test]
    fn test_zero_wires_rejected() {
        let mut input = test_input();
        input.wire_count = 0;
        assert!(matches!(calculate(&input), Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_trade_size_with_inch_mark() {
        let mut input = test_input();
        input.conduit_size = "3/4\"".to_string();
        assert_eq!(calculate(&input).unwrap().fill_percentage, 9.9);
    }
}
