//! # Catalogs
//!
//! Fixed lookup tables used by the calculators: breaker ratings, the
//! breaker → cable table, conduit areas, insulated wire areas, and the
//! commercial cable series.
//!
//! Catalogs are immutable configuration. The standard set is built once and
//! shared; callers with regional tables can load their own from JSON and pass
//! them to the `calculate_with` entry point of each calculator.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::catalogs::Catalogs;
//!
//! let catalogs = Catalogs::standard();
//! assert_eq!(catalogs.next_breaker_rating(25.25).unwrap(), 32.0);
//! assert_eq!(catalogs.conduit_area("3/4\"").unwrap(), 360.0);
//! ```

pub mod breakers;
pub mod conductors;
pub mod conduits;

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

pub use breakers::{BreakerCableRule, OVERSIZE_CABLE_LABEL, STANDARD_BREAKER_RATINGS_A};
pub use conductors::{ConductorMaterial, WireEntry, CABLE_CROSS_SECTIONS_MM2};
pub use conduits::ConduitEntry;

static STANDARD: Lazy<Catalogs> = Lazy::new(Catalogs::build_standard);

/// Tolerance when matching a wire cross-section key
const KEY_EPSILON: f64 = 1e-9;

/// The full set of lookup tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalogs {
    /// Breaker ratings in amperes (strictly ascending)
    pub breaker_ratings_a: Vec<f64>,

    /// Breaker → minimum cable rows (strictly ascending by rating)
    pub breaker_cable_rules: Vec<BreakerCableRule>,

    /// Cable label for ratings above the last cable row
    pub oversize_cable_label: String,

    /// Conduit trade sizes and internal areas
    pub conduits: Vec<ConduitEntry>,

    /// Insulated wire areas
    pub wires: Vec<WireEntry>,

    /// Commercial cable cross-sections in mm² (strictly ascending)
    pub cable_cross_sections_mm2: Vec<f64>,
}

impl Catalogs {
    /// The shared standard catalogs
    pub fn standard() -> &'static Catalogs {
        &STANDARD
    }

    fn build_standard() -> Catalogs {
        Catalogs {
            breaker_ratings_a: STANDARD_BREAKER_RATINGS_A.to_vec(),
            breaker_cable_rules: breakers::standard_cable_rules(),
            oversize_cable_label: OVERSIZE_CABLE_LABEL.to_string(),
            conduits: conduits::standard_conduits(),
            wires: conductors::standard_wires(),
            cable_cross_sections_mm2: CABLE_CROSS_SECTIONS_MM2.to_vec(),
        }
    }

    /// Parse and validate catalogs from JSON.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let catalogs: Catalogs = serde_json::from_str(json)
            .map_err(|e| CalcError::serialization(format!("Invalid catalog JSON: {}", e)))?;
        catalogs.validate()?;
        Ok(catalogs)
    }

    /// Load and validate catalogs from a JSON file.
    pub fn from_json_file(path: &Path) -> CalcResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read catalog", path.display().to_string(), e.to_string())
        })?;
        Self::from_json_str(&contents)
    }

    /// Check the structural invariants the calculators rely on.
    pub fn validate(&self) -> CalcResult<()> {
        check_ascending("breaker_ratings_a", &self.breaker_ratings_a)?;
        check_ascending(
            "breaker_cable_rules",
            &self
                .breaker_cable_rules
                .iter()
                .map(|r| r.max_rating_a)
                .collect::<Vec<_>>(),
        )?;
        check_ascending("cable_cross_sections_mm2", &self.cable_cross_sections_mm2)?;

        if self.conduits.is_empty() {
            return Err(CalcError::invalid_input("conduits", "[]", "Catalog must not be empty"));
        }
        for (i, entry) in self.conduits.iter().enumerate() {
            if !(entry.internal_area_mm2 > 0.0) || !entry.internal_area_mm2.is_finite() {
                return Err(CalcError::invalid_input(
                    format!("conduits[{}]", entry.trade_size),
                    entry.internal_area_mm2.to_string(),
                    "Area must be positive",
                ));
            }
            let key = conduits::normalize_trade_size(&entry.trade_size);
            let duplicate = self.conduits[..i]
                .iter()
                .any(|other| conduits::normalize_trade_size(&other.trade_size) == key);
            if duplicate {
                return Err(CalcError::invalid_input(
                    "conduits",
                    entry.trade_size.clone(),
                    "Duplicate key",
                ));
            }
        }

        if self.wires.is_empty() {
            return Err(CalcError::invalid_input("wires", "[]", "Catalog must not be empty"));
        }
        for (i, entry) in self.wires.iter().enumerate() {
            if !(entry.total_area_mm2 > 0.0) || !entry.total_area_mm2.is_finite() {
                return Err(CalcError::invalid_input(
                    format!("wires[{}]", entry.cross_section_mm2),
                    entry.total_area_mm2.to_string(),
                    "Area must be positive",
                ));
            }
            let key = entry.cross_section_mm2;
            let duplicate = self.wires[..i]
                .iter()
                .any(|other| (other.cross_section_mm2 - key).abs() < KEY_EPSILON);
            if duplicate {
                return Err(CalcError::invalid_input(
                    "wires",
                    entry.cross_section_mm2.to_string(),
                    "Duplicate key",
                ));
            }
        }
        Ok(())
    }

    /// Smallest breaker rating that is >= `current_a`.
    pub fn next_breaker_rating(&self, current_a: f64) -> CalcResult<f64> {
        self.breaker_ratings_a
            .iter()
            .copied()
            .find(|&rating| rating >= current_a)
            .ok_or_else(|| {
                CalcError::out_of_catalog_range(
                    "breaker rating",
                    format!("{:.2} A", current_a),
                    format!("{} A", self.breaker_ratings_a.last().copied().unwrap_or_default()),
                )
            })
    }

    /// Minimum cable label for a breaker rating
    pub fn minimum_cable_for(&self, rating_a: f64) -> &str {
        self.breaker_cable_rules
            .iter()
            .find(|rule| rating_a <= rule.max_rating_a)
            .map(|rule| rule.cable.as_str())
            .unwrap_or(&self.oversize_cable_label)
    }

    /// Internal area of a conduit by trade size key
    pub fn conduit_area(&self, trade_size: &str) -> CalcResult<f64> {
        let key = conduits::normalize_trade_size(trade_size);
        self.conduits
            .iter()
            .find(|c| c.trade_size == key)
            .map(|c| c.internal_area_mm2)
            .ok_or_else(|| CalcError::unknown_catalog_key("conduit", trade_size))
    }

    /// Insulated area of a wire by nominal cross-section
    pub fn wire_area(&self, cross_section_mm2: f64) -> CalcResult<f64> {
        self.wires
            .iter()
            .find(|w| (w.cross_section_mm2 - cross_section_mm2).abs() < KEY_EPSILON)
            .map(|w| w.total_area_mm2)
            .ok_or_else(|| CalcError::unknown_catalog_key("wire", cross_section_mm2.to_string()))
    }

    /// Next commercial cross-section strictly larger than `cross_section_mm2`
    pub fn next_larger_cross_section(&self, cross_section_mm2: f64) -> Option<f64> {
        self.cable_cross_sections_mm2
            .iter()
            .copied()
            .find(|&size| size > cross_section_mm2)
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Catalogs::standard().clone()
    }
}

fn check_ascending(field: &str, values: &[f64]) -> CalcResult<()> {
    if values.is_empty() {
        return Err(CalcError::invalid_input(field, "[]", "Catalog must not be empty"));
    }
    if values.iter().any(|v| !(*v > 0.0) || !v.is_finite()) {
        return Err(CalcError::invalid_input(
            field,
            format!("{:?}", values),
            "Entries must be positive",
        ));
    }
    if !values.windows(2).all(|w| w[0] < w[1]) {
        return Err(CalcError::invalid_input(
            field,
            format!("{:?}", values),
            "Entries must be strictly ascending",
        ));
    }
    Ok(())
}
