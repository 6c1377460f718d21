//! Standard Breaker Ratings
//!
//! IEC/DIN miniature and moulded-case circuit breaker nominal currents, and
//! the quick-reference minimum conductor for each rating.
//!
//! ## Cable Suggestion
//!
//! The cable table assumes generic PVC-insulated copper at 30 °C ambient.
//! It is a field rule of thumb, not a substitute for a full ampacity check
//! with grouping and installation-method factors.

use serde::{Deserialize, Serialize};

/// Standard breaker ratings in amperes (ascending)
pub const STANDARD_BREAKER_RATINGS_A: [f64; 14] = [
    6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0,
];

/// Label used for ratings above the last row of the cable table
pub const OVERSIZE_CABLE_LABEL: &str = "> 25.0 mm²";

/// One row of the breaker → minimum cable table.
///
/// A breaker of rating `r` maps to the first row with `r <= max_rating_a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerCableRule {
    /// Upper bound (inclusive) of breaker ratings covered by this row
    pub max_rating_a: f64,
    /// Minimum conductor label (e.g., "2.5 mm²")
    pub cable: String,
}

impl BreakerCableRule {
    fn new(max_rating_a: f64, cable: &str) -> Self {
        BreakerCableRule {
            max_rating_a,
            cable: cable.to_string(),
        }
    }
}

/// Standard breaker → cable rows (ascending by rating)
pub fn standard_cable_rules() -> Vec<BreakerCableRule> {
    vec![
        BreakerCableRule::new(10.0, "1.5 mm²"),
        BreakerCableRule::new(16.0, "2.5 mm²"),
        BreakerCableRule::new(20.0, "2.5 mm²"),
        BreakerCableRule::new(25.0, "4.0 mm²"),
        BreakerCableRule::new(32.0, "6.0 mm²"),
        BreakerCableRule::new(40.0, "10.0 mm²"),
        BreakerCableRule::new(50.0, "10.0 mm²"),
        BreakerCableRule::new(63.0, "16.0 mm²"),
    ]
}
