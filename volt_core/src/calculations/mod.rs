//! # Electrical Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> CalcResult<*Result>` - Pure calculation function
//!
//! Calculators that read lookup tables also expose `calculate_with(input, &Catalogs)`.
//!
//! ## Available Calculations
//!
//! - [`ohms_law`] - V/I/R/P solver from any two known values
//! - [`voltage_drop`] - Conductor voltage drop and 4 % check
//! - [`conduit_fill`] - Conduit fill and 40 % check
//! - [`power_factor`] - Capacitor kvar for power factor correction
//! - [`breaker_sizing`] - Design current, breaker rating, minimum cable

pub mod breaker_sizing;
pub mod conduit_fill;
pub mod ohms_law;
pub mod power_factor;
pub mod voltage_drop;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalogs::Catalogs;
use crate::errors::{CalcError, CalcResult};

// Re-export commonly used types
pub use breaker_sizing::{BreakerSizingInput, BreakerSizingResult, PhaseCount};
pub use conduit_fill::{ConduitFillInput, ConduitFillResult};
pub use ohms_law::{ElectricalQuantitySet, OhmsLawResult, Quantity};
pub use power_factor::{PowerFactorInput, PowerFactorResult};
pub use voltage_drop::{VoltageDropInput, VoltageDropResult};

/// Round half away from zero to `places` decimals.
///
/// Values too large to scale are already integral and come back unchanged.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Reject a computed value that overflowed or is undefined
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Result is not a finite number; inputs are out of range",
        ));
    }
    Ok(value)
}

/// Reject zero, negative and non-finite values
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
    }
    Ok(())
}

/// Any calculation, tagged by kind.
///
/// Lets a caller submit a single JSON document and get the matching result.
///
/// ## JSON Example
///
/// ```json
/// {
///   "type": "VoltageDrop",
///   "voltage": 220,
///   "current": 10,
///   "distance_m": 50,
///   "cross_section_mm2": 2.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationRequest {
    OhmsLaw(ElectricalQuantitySet),
    VoltageDrop(VoltageDropInput),
    ConduitFill(ConduitFillInput),
    PowerFactor(PowerFactorInput),
    BreakerSizing(BreakerSizingRequest),
}

/// Breaker input wrapped so its own `mode` tag nests cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerSizingRequest {
    pub input: BreakerSizingInput,
}

/// Result of a [`CalculationRequest`], tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    OhmsLaw(OhmsLawResult),
    VoltageDrop(VoltageDropResult),
    ConduitFill(ConduitFillResult),
    PowerFactor(PowerFactorResult),
    BreakerSizing(BreakerSizingResult),
}

impl CalculationRequest {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationRequest::OhmsLaw(_) => "OhmsLaw",
            CalculationRequest::VoltageDrop(_) => "VoltageDrop",
            CalculationRequest::ConduitFill(_) => "ConduitFill",
            CalculationRequest::PowerFactor(_) => "PowerFactor",
            CalculationRequest::BreakerSizing(_) => "BreakerSizing",
        }
    }

    /// Run the calculation against `catalogs`.
    pub fn run(&self, catalogs: &Catalogs) -> CalcResult<CalculationOutput> {
        debug!(calc_type = self.calc_type(), "running calculation");
        let output = match self {
            CalculationRequest::OhmsLaw(set) => CalculationOutput::OhmsLaw(ohms_law::solve(set)?),
            CalculationRequest::VoltageDrop(input) => {
                CalculationOutput::VoltageDrop(voltage_drop::calculate_with(input, catalogs)?)
            }
            CalculationRequest::ConduitFill(input) => {
                CalculationOutput::ConduitFill(conduit_fill::calculate_with(input, catalogs)?)
            }
            CalculationRequest::PowerFactor(input) => {
                CalculationOutput::PowerFactor(power_factor::calculate(input)?)
            }
            CalculationRequest::BreakerSizing(request) => CalculationOutput::BreakerSizing(
                breaker_sizing::calculate_with(&request.input, catalogs)?,
            ),
        };
        Ok(output)
    }
}
