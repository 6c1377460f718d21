//! # Ohm's Law / Power Solver
//!
//! Resolves the four mutually constraining quantities V, I, R and P from any
//! two of them, using V = I·R and P = V·I.
//!
//! | Known  | Derived                     |
//! |--------|-----------------------------|
//! | V, I   | R = V/I, P = V·I            |
//! | V, R   | I = V/R, P = V²/R           |
//! | V, P   | I = P/V, R = V²/P           |
//! | I, R   | V = I·R, P = I²·R           |
//! | I, P   | V = P/I, R = P/I²           |
//! | R, P   | V = √(P·R), I = √(P/R)      |
//!
//! Known values are echoed unchanged; the two derived values are rounded to
//! 2 decimal places and reported in `derived` so a caller can highlight them.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::calculations::ohms_law::{solve, ElectricalQuantitySet, Quantity};
//!
//! let set = ElectricalQuantitySet::new().with_voltage(220.0).with_current(10.0);
//! let result = solve(&set).unwrap();
//!
//! assert_eq!(result.resistance, 22.0);
//! assert_eq!(result.power, 2200.0);
//! assert!(result.is_derived(Quantity::Power));
//! ```

use serde::{Deserialize, Serialize};

use super::{require_finite, round_to};
use crate::errors::{CalcError, CalcResult};

/// One of the four Ohm's-law quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Voltage (V)
    Voltage,
    /// Current (A)
    Current,
    /// Resistance (Ω)
    Resistance,
    /// Power (W)
    Power,
}

impl Quantity {
    /// All quantities in display order
    pub const ALL: [Quantity; 4] = [
        Quantity::Voltage,
        Quantity::Current,
        Quantity::Resistance,
        Quantity::Power,
    ];

    /// Field name used in errors and JSON
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Voltage => "voltage",
            Quantity::Current => "current",
            Quantity::Resistance => "resistance",
            Quantity::Power => "power",
        }
    }

    /// Unit symbol
    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::Voltage => "V",
            Quantity::Current => "A",
            Quantity::Resistance => "Ω",
            Quantity::Power => "W",
        }
    }
}

/// Four optional quantities; `None` means unknown.
///
/// ## JSON Example
///
/// ```json
/// { "voltage": 220.0, "current": 10.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElectricalQuantitySet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
}

impl ElectricalQuantitySet {
    /// An empty set (nothing known)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voltage(mut self, volts: f64) -> Self {
        self.voltage = Some(volts);
        self
    }

    pub fn with_current(mut self, amps: f64) -> Self {
        self.current = Some(amps);
        self
    }

    pub fn with_resistance(mut self, ohms: f64) -> Self {
        self.resistance = Some(ohms);
        self
    }

    pub fn with_power(mut self, watts: f64) -> Self {
        self.power = Some(watts);
        self
    }

    /// Value of a quantity, if known
    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::Voltage => self.voltage,
            Quantity::Current => self.current,
            Quantity::Resistance => self.resistance,
            Quantity::Power => self.power,
        }
    }

    /// Set or clear a quantity
    pub fn set(&mut self, quantity: Quantity, value: Option<f64>) {
        match quantity {
            Quantity::Voltage => self.voltage = value,
            Quantity::Current => self.current = value,
            Quantity::Resistance => self.resistance = value,
            Quantity::Power => self.power = value,
        }
    }

    /// The known quantities, in display order
    pub fn known(&self) -> Vec<Quantity> {
        Quantity::ALL
            .into_iter()
            .filter(|q| self.get(*q).is_some())
            .collect()
    }

    /// Number of known quantities
    pub fn known_count(&self) -> usize {
        self.known().len()
    }
}

/// The unordered pair of known quantities, carrying their values.
///
/// Selecting the pair once per call fixes which formula branch runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownPair {
    VoltageCurrent { voltage: f64, current: f64 },
    VoltageResistance { voltage: f64, resistance: f64 },
    VoltagePower { voltage: f64, power: f64 },
    CurrentResistance { current: f64, resistance: f64 },
    CurrentPower { current: f64, power: f64 },
    ResistancePower { resistance: f64, power: f64 },
}

impl KnownPair {
    /// Classify a set, requiring exactly two finite known values.
    ///
    /// The count is checked first, so three values including a NaN is still
    /// `InvalidInputCount`.
    pub fn from_set(set: &ElectricalQuantitySet) -> CalcResult<Self> {
        let known = set.known_count();
        if known != 2 {
            return Err(CalcError::invalid_input_count(known));
        }

        for quantity in Quantity::ALL {
            if let Some(value) = set.get(quantity) {
                if !value.is_finite() {
                    return Err(CalcError::invalid_input(
                        quantity.name(),
                        value.to_string(),
                        "Value must be a finite number",
                    ));
                }
            }
        }

        let pair = match (set.voltage, set.current, set.resistance, set.power) {
            (Some(voltage), Some(current), None, None) => {
                KnownPair::VoltageCurrent { voltage, current }
            }
            (Some(voltage), None, Some(resistance), None) => {
                KnownPair::VoltageResistance { voltage, resistance }
            }
            (Some(voltage), None, None, Some(power)) => KnownPair::VoltagePower { voltage, power },
            (None, Some(current), Some(resistance), None) => {
                KnownPair::CurrentResistance { current, resistance }
            }
            (None, Some(current), None, Some(power)) => KnownPair::CurrentPower { current, power },
            (None, None, Some(resistance), Some(power)) => {
                KnownPair::ResistancePower { resistance, power }
            }
            _ => return Err(CalcError::invalid_input_count(known)),
        };
        Ok(pair)
    }

    /// The two known quantities
    pub fn known(&self) -> [Quantity; 2] {
        use Quantity::*;
        match self {
            KnownPair::VoltageCurrent { .. } => [Voltage, Current],
            KnownPair::VoltageResistance { .. } => [Voltage, Resistance],
            KnownPair::VoltagePower { .. } => [Voltage, Power],
            KnownPair::CurrentResistance { .. } => [Current, Resistance],
            KnownPair::CurrentPower { .. } => [Current, Power],
            KnownPair::ResistancePower { .. } => [Resistance, Power],
        }
    }

    /// The two quantities this pair derives
    pub fn derived(&self) -> [Quantity; 2] {
        use Quantity::*;
        match self {
            KnownPair::VoltageCurrent { .. } => [Resistance, Power],
            KnownPair::VoltageResistance { .. } => [Current, Power],
            KnownPair::VoltagePower { .. } => [Current, Resistance],
            KnownPair::CurrentResistance { .. } => [Voltage, Power],
            KnownPair::CurrentPower { .. } => [Voltage, Resistance],
            KnownPair::ResistancePower { .. } => [Voltage, Current],
        }
    }

    /// Compute the unrounded (V, I, R, P) for this pair.
    fn evaluate(self) -> CalcResult<(f64, f64, f64, f64)> {
        match self {
            KnownPair::VoltageCurrent { voltage, current } => {
                nonzero(current, Quantity::Current, "R = V / I")?;
                Ok((voltage, current, voltage / current, voltage * current))
            }
            KnownPair::VoltageResistance { voltage, resistance } => {
                nonzero(resistance, Quantity::Resistance, "I = V / R")?;
                Ok((voltage, voltage / resistance, resistance, voltage * voltage / resistance))
            }
            KnownPair::VoltagePower { voltage, power } => {
                nonzero(voltage, Quantity::Voltage, "I = P / V")?;
                nonzero(power, Quantity::Power, "R = V² / P")?;
                Ok((voltage, power / voltage, voltage * voltage / power, power))
            }
            KnownPair::CurrentResistance { current, resistance } => {
                Ok((current * resistance, current, resistance, current * current * resistance))
            }
            KnownPair::CurrentPower { current, power } => {
                nonzero(current, Quantity::Current, "V = P / I")?;
                Ok((power / current, current, power / (current * current), power))
            }
            KnownPair::ResistancePower { resistance, power } => {
                if resistance < 0.0 {
                    return Err(CalcError::domain_error(
                        "resistance",
                        resistance.to_string(),
                        "Negative resistance puts a negative value under √(P·R)",
                    ));
                }
                if power < 0.0 {
                    return Err(CalcError::domain_error(
                        "power",
                        power.to_string(),
                        "Negative power puts a negative value under √(P·R)",
                    ));
                }
                nonzero(resistance, Quantity::Resistance, "I = √(P / R)")?;
                Ok(((power * resistance).sqrt(), (power / resistance).sqrt(), resistance, power))
            }
        }
    }
}

fn nonzero(value: f64, quantity: Quantity, formula: &str) -> CalcResult<()> {
    if value == 0.0 {
        return Err(CalcError::division_by_zero(quantity.name(), formula));
    }
    Ok(())
}

/// Fully resolved quantities.
///
/// ## JSON Example
///
/// ```json
/// {
///   "voltage": 220.0,
///   "current": 10.0,
///   "resistance": 22.0,
///   "power": 2200.0,
///   "known": ["voltage", "current"],
///   "derived": ["resistance", "power"]
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhmsLawResult {
    pub voltage: f64,
    pub current: f64,
    pub resistance: f64,
    pub power: f64,

    /// Quantities supplied by the caller (echoed unchanged)
    pub known: [Quantity; 2],

    /// Quantities computed by the solver (rounded to 2 decimals)
    pub derived: [Quantity; 2],
}

impl OhmsLawResult {
    /// Value of any quantity
    pub fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Voltage => self.voltage,
            Quantity::Current => self.current,
            Quantity::Resistance => self.resistance,
            Quantity::Power => self.power,
        }
    }

    /// Whether a quantity was computed rather than supplied
    pub fn is_derived(&self, quantity: Quantity) -> bool {
        self.derived.contains(&quantity)
    }

    /// All four values as a fully-known set
    pub fn to_set(&self) -> ElectricalQuantitySet {
        ElectricalQuantitySet {
            voltage: Some(self.voltage),
            current: Some(self.current),
            resistance: Some(self.resistance),
            power: Some(self.power),
        }
    }

    /// A set containing only the given two quantities from this result,
    /// ready to be re-solved.
    pub fn subset(&self, keep: [Quantity; 2]) -> ElectricalQuantitySet {
        let mut set = ElectricalQuantitySet::new();
        for quantity in keep {
            set.set(quantity, Some(self.get(quantity)));
        }
        set
    }
}

/// Solve for the two unknown quantities.
///
/// # Errors
///
/// * `InvalidInputCount` - fewer or more than two known values
/// * `DivisionByZero` - a known value is zero where it is a denominator
/// * `DomainError` - negative R or P in the √ branch
/// * `InvalidInput` - a known value is NaN or infinite
pub fn solve(set: &ElectricalQuantitySet) -> CalcResult<OhmsLawResult> {
    let pair = KnownPair::from_set(set)?;
    let known = pair.known();
    let derived = pair.derived();
    let (voltage, current, resistance, power) = pair.evaluate()?;

    let mut result = OhmsLawResult {
        voltage,
        current,
        resistance,
        power,
        known,
        derived,
    };

    // Known values come straight from the input; only derived ones are rounded
    for quantity in derived {
        let value = require_finite(quantity.name(), result.get(quantity))?;
        let rounded = round_to(value, 2);
        match quantity {
            Quantity::Voltage => result.voltage = rounded,
            Quantity::Current => result.current = rounded,
            Quantity::Resistance => result.resistance = rounded,
            Quantity::Power => result.power = rounded,
        }
    }
    Ok(result)
}

/// Alias of [`solve`] matching the other calculators' entry point.
pub fn calculate(input: &ElectricalQuantitySet) -> CalcResult<OhmsLawResult> {
    solve(input)
}
