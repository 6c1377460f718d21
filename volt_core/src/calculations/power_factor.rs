//! # Power Factor Correction
//!
//! Reactive compensation needed to move a load from one power factor to
//! another at constant active power:
//!
//! ```text
//! Qc = P · (tan(acos(pf₁)) − tan(acos(pf₂)))
//! ```
//!
//! A target below the present power factor gives a negative result. It is
//! reported as-is; callers decide how to present it.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::calculations::power_factor::{calculate, PowerFactorInput};
//!
//! let input = PowerFactorInput {
//!     active_power_kw: 50.0,
//!     current_pf: 0.75,
//!     target_pf: 0.92,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.required_kvar, 22.8);
//! ```

use serde::{Deserialize, Serialize};

use super::{require_finite, require_positive, round_to};
use crate::errors::{CalcError, CalcResult};

/// Input parameters for power factor correction.
///
/// ## JSON Example
///
/// ```json
/// { "active_power_kw": 50.0, "current_pf": 0.75, "target_pf": 0.92 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerFactorInput {
    /// Active power of the load (kW)
    pub active_power_kw: f64,

    /// Present power factor, in (0, 1]
    pub current_pf: f64,

    /// Desired power factor, in (0, 1]
    pub target_pf: f64,
}

impl PowerFactorInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("active_power_kw", self.active_power_kw)?;
        check_power_factor("current_pf", self.current_pf)?;
        check_power_factor("target_pf", self.target_pf)?;
        Ok(())
    }
}

/// A power factor must lie in (0, 1] for acos to give a real lagging angle.
pub(crate) fn check_power_factor(field: &str, pf: f64) -> CalcResult<()> {
    if !(pf > 0.0 && pf <= 1.0) {
        return Err(CalcError::domain_error(
            field,
            pf.to_string(),
            "Power factor must be greater than 0 and at most 1",
        ));
    }
    Ok(())
}

/// Results of power factor correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerFactorResult {
    /// Capacitor bank size (kvar), negative when target < current
    pub required_kvar: f64,

    /// Apparent power at the present power factor (kVA)
    pub apparent_power_before_kva: f64,

    /// Apparent power at the target power factor (kVA)
    pub apparent_power_after_kva: f64,
}

/// Calculate the reactive compensation.
pub fn calculate(input: &PowerFactorInput) -> CalcResult<PowerFactorResult> {
    input.validate()?;

    let tan_before = input.current_pf.acos().tan();
    let tan_after = input.target_pf.acos().tan();
    let kvar = require_finite("required_kvar", input.active_power_kw * (tan_before - tan_after))?;
    let before = require_finite(
        "apparent_power_before_kva",
        input.active_power_kw / input.current_pf,
    )?;
    let after = require_finite(
        "apparent_power_after_kva",
        input.active_power_kw / input.target_pf,
    )?;

    Ok(PowerFactorResult {
        required_kvar: round_to(kvar, 2),
        apparent_power_before_kva: round_to(before, 2),
        apparent_power_after_kva: round_to(after, 2),
    })
}
