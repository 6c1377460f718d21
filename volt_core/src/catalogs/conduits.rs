//! Conduit Internal Areas
//!
//! Approximate internal cross-section of Schedule 40 / heavy-duty PVC conduit,
//! keyed by trade size in inches.
//!
//! | Trade size | Metric (≈) | Internal area |
//! |------------|------------|---------------|
//! | 1/2"       | 16 mm      | 170 mm²       |
//! | 3/4"       | 20 mm      | 360 mm²       |
//! | 1"         | 25 mm      | 580 mm²       |
//! | 1 1/4"     | 32 mm      | 990 mm²       |
//! | 1 1/2"     | 40 mm      | 1350 mm²      |
//! | 2"         | 50 mm      | 2200 mm²      |

use serde::{Deserialize, Serialize};

/// A conduit trade size and its usable internal area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitEntry {
    /// Trade size key, e.g. "3/4" or "1 1/4"
    pub trade_size: String,
    /// Internal cross-sectional area in mm²
    pub internal_area_mm2: f64,
}

/// Standard conduit table (ascending by area)
pub fn standard_conduits() -> Vec<ConduitEntry> {
    [
        ("1/2", 170.0),
        ("3/4", 360.0),
        ("1", 580.0),
        ("1 1/4", 990.0),
        ("1 1/2", 1350.0),
        ("2", 2200.0),
    ]
    .into_iter()
    .map(|(trade_size, internal_area_mm2)| ConduitEntry {
        trade_size: trade_size.to_string(),
        internal_area_mm2,
    })
    .collect()
}

/// Normalize a user-typed trade size: `3/4"`, ` 1  1/4 ` → `3/4`, `1 1/4`
pub fn normalize_trade_size(key: &str) -> String {
    key.trim()
        .trim_end_matches('"')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trade_size() {
        assert_eq!(normalize_trade_size("3/4\""), "3/4");
        assert_eq!(normalize_trade_size("  1   1/4 "), "1 1/4");
        assert_eq!(normalize_trade_size("2"), "2");
    }

    #[test]
    fn test_standard_table() {
        let table = standard_conduits();
        assert_eq!(table.len(), 6);
        assert!(table.windows(2).all(|w| w[0].internal_area_mm2 < w[1].internal_area_mm2));
    }
}
