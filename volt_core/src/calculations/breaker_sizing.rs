//! # Breaker Sizing
//!
//! Selects a protective device for a load:
//!
//! 1. Design current I_b, either given directly or derived from power:
//!    - single / two phase: `I = P / (V · pf)` (V line-to-line for two phase)
//!    - three phase: `I = P / (√3 · V · pf)`
//! 2. Nominal rating I_n: the smallest standard rating with `I_n >= I_b`.
//! 3. Minimum conductor from the breaker → cable table.
//!
//! Continuous-load margins (e.g. 125 %) are not applied; I_n >= I_b is the
//! basic coordination condition.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::calculations::breaker_sizing::{calculate, BreakerSizingInput, PhaseCount};
//!
//! let input = BreakerSizingInput::FromPower {
//!     power_watts: 5000.0,
//!     voltage: 220.0,
//!     phases: PhaseCount::Single,
//!     power_factor: 0.9,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.computed_current, 25.25);
//! assert_eq!(result.recommended_breaker_rating, 32.0);
//! assert_eq!(result.minimum_cable_size, "6.0 mm²");
//! ```

use serde::{Deserialize, Serialize};

use super::power_factor::check_power_factor;
use super::{require_positive, round_to};
use crate::catalogs::Catalogs;
use crate::errors::{CalcError, CalcResult};

/// Supply phase count. Serializes as the integer 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum PhaseCount {
    #[default]
    Single,
    Two,
    Three,
}

impl PhaseCount {
    /// Multiplier applied to the voltage in the current formula
    pub fn voltage_factor(&self) -> f64 {
        match self {
            PhaseCount::Single | PhaseCount::Two => 1.0,
            PhaseCount::Three => 3f64.sqrt(),
        }
    }
}

impl TryFrom<u8> for PhaseCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PhaseCount::Single),
            2 => Ok(PhaseCount::Two),
            3 => Ok(PhaseCount::Three),
            other => Err(format!("phase count must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl From<PhaseCount> for u8 {
    fn from(phases: PhaseCount) -> Self {
        match phases {
            PhaseCount::Single => 1,
            PhaseCount::Two => 2,
            PhaseCount::Three => 3,
        }
    }
}

/// How the design current is obtained.
///
/// ## JSON Examples
///
/// ```json
/// {
///   "mode": "from_power",
///   "power_watts": 5000.0,
///   "voltage": 220.0,
///   "phases": 1,
///   "power_factor": 0.9
/// }
/// ```
///
/// ```json
/// { "mode": "from_current", "current_amps": 18.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BreakerSizingInput {
    /// Derive current from load power
    FromPower {
        power_watts: f64,
        voltage: f64,
        phases: PhaseCount,
        power_factor: f64,
    },
    /// Use a known design current
    FromCurrent { current_amps: f64 },
}

impl BreakerSizingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            BreakerSizingInput::FromPower {
                power_watts,
                voltage,
                power_factor,
                ..
            } => {
                require_positive("power_watts", *power_watts)?;
                require_positive("voltage", *voltage)?;
                check_power_factor("power_factor", *power_factor)
            }
            BreakerSizingInput::FromCurrent { current_amps } => {
                require_positive("current_amps", *current_amps)
            }
        }
    }

    /// Unrounded design current in amperes
    pub fn design_current(&self) -> f64 {
        match self {
            BreakerSizingInput::FromPower {
                power_watts,
                voltage,
                phases,
                power_factor,
            } => power_watts / (voltage * phases.voltage_factor() * power_factor),
            BreakerSizingInput::FromCurrent { current_amps } => *current_amps,
        }
    }
}

/// Results of breaker sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerSizingResult {
    /// Design current I_b (A, 2 decimals)
    pub computed_current: f64,

    /// Standard breaker rating I_n (A)
    pub recommended_breaker_rating: f64,

    /// Minimum conductor for the breaker (e.g., "6.0 mm²")
    pub minimum_cable_size: String,
}

/// Size a breaker with the standard catalogs.
pub fn calculate(input: &BreakerSizingInput) -> CalcResult<BreakerSizingResult> {
    calculate_with(input, Catalogs::standard())
}

/// Size a breaker using ratings and cable rows from `catalogs`.
///
/// # Errors
///
/// * `InvalidInput` - non-positive power, voltage or current
/// * `DomainError` - power factor outside (0, 1]
/// * `OutOfCatalogRange` - current above the largest rating
pub fn calculate_with(
    input: &BreakerSizingInput,
    catalogs: &Catalogs,
) -> CalcResult<BreakerSizingResult> {
    input.validate()?;

    let current = input.design_current();
    if !current.is_finite() {
        return Err(CalcError::invalid_input(
            "current",
            current.to_string(),
            "Design current is not a finite number",
        ));
    }

    // Selection uses the unrounded current so 32.004 A never maps to 32 A
    let rating = catalogs.next_breaker_rating(current)?;

    Ok(BreakerSizingResult {
        computed_current: round_to(current, 2),
        recommended_breaker_rating: rating,
        minimum_cable_size: catalogs.minimum_cable_for(rating).to_string(),
    })
}
