//! # Safety Checklist
//!
//! Pre-work checklist: every item must be confirmed before energized work
//! starts.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::safety::{ChecklistOutcome, SafetyChecklist};
//!
//! let mut checklist = SafetyChecklist::new();
//! for id in ["head", "eyes", "hands", "boots", "loto", "test", "tools", "dry"] {
//!     checklist.toggle(id).unwrap();
//! }
//! assert_eq!(checklist.validate(), ChecklistOutcome::Ready);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Checklist grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistCategory {
    /// Personal protective equipment
    Ppe,
    Procedure,
    Tools,
}

impl ChecklistCategory {
    pub const ALL: [ChecklistCategory; 3] = [
        ChecklistCategory::Ppe,
        ChecklistCategory::Procedure,
        ChecklistCategory::Tools,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChecklistCategory::Ppe => "PPE",
            ChecklistCategory::Procedure => "Procedure",
            ChecklistCategory::Tools => "Tools",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub category: ChecklistCategory,
    pub label: &'static str,
    pub checked: bool,
}

const ITEMS: [(&str, ChecklistCategory, &str); 8] = [
    ("head", ChecklistCategory::Ppe, "Helmet with chin strap"),
    ("eyes", ChecklistCategory::Ppe, "Eye protection"),
    ("hands", ChecklistCategory::Ppe, "Insulated gloves rated for the voltage"),
    ("boots", ChecklistCategory::Ppe, "Dielectric safety boots"),
    ("loto", ChecklistCategory::Procedure, "Lock-out / tag-out applied"),
    ("test", ChecklistCategory::Procedure, "Absence of voltage tested"),
    ("tools", ChecklistCategory::Tools, "Insulated tools inspected"),
    ("dry", ChecklistCategory::Tools, "Work area dry"),
];

/// Result of [`SafetyChecklist::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChecklistOutcome {
    Ready,
    /// Ids of unchecked items, in checklist order
    Incomplete { missing: Vec<&'static str> },
}

/// The eight-item pre-work checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyChecklist {
    items: Vec<ChecklistItem>,
}

impl Default for SafetyChecklist {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyChecklist {
    /// All items unchecked
    pub fn new() -> Self {
        SafetyChecklist {
            items: ITEMS
                .iter()
                .map(|&(id, category, label)| ChecklistItem {
                    id,
                    category,
                    label,
                    checked: false,
                })
                .collect(),
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// Items of one category
    pub fn items_in(&self, category: ChecklistCategory) -> impl Iterator<Item = &ChecklistItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Flip one item. Returns the new checked state.
    pub fn toggle(&mut self, id: &str) -> CalcResult<bool> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| {
                CalcError::invalid_input("checklist_item", id, "Unknown checklist item")
            })?;
        item.checked = !item.checked;
        Ok(item.checked)
    }

    pub fn validate(&self) -> ChecklistOutcome {
        let missing: Vec<&'static str> = self
            .items
            .iter()
            .filter(|item| !item.checked)
            .map(|item| item.id)
            .collect();
        if missing.is_empty() {
            ChecklistOutcome::Ready
        } else {
            ChecklistOutcome::Incomplete { missing }
        }
    }

    /// Uncheck everything
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.checked = false;
        }
    }
}
