//! # volt_core - Electrical Calculation Engine
//!
//! `volt_core` is the computational heart of VoltMaster, providing field electrical
//! calculations with a clean, JSON-friendly API. All inputs and outputs are
//! serializable, so the same engine backs the CLI, scripts, and assistants.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Fixed Catalogs**: Lookup tables are immutable data, swappable per region
//!
//! ## Quick Start
//!
//! ```rust
//! use volt_core::calculations::ohms_law::{solve, ElectricalQuantitySet};
//!
//! let known = ElectricalQuantitySet::new().with_voltage(220.0).with_current(10.0);
//! let result = solve(&known).unwrap();
//!
//! assert_eq!(result.resistance, 22.0);
//! assert_eq!(result.power, 2200.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Ohm's law, voltage drop, conduit fill, power factor, breaker sizing
//! - [`catalogs`] - Breaker, cable, conduit and wire lookup tables
//! - [`project`] - Project records and status derivation
//! - [`file_io`] - JSON project store with atomic saves and backups
//! - [`advisory`] - Technical assistant contract and wire types
//! - [`safety`] - Pre-work safety checklist
//! - [`settings`] - TOML settings with environment overrides
//! - [`errors`] - Structured error types

pub mod advisory;
pub mod calculations;
pub mod catalogs;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod safety;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationOutput, CalculationRequest};
pub use catalogs::Catalogs;
pub use errors::{CalcError, CalcResult};
pub use file_io::ProjectStore;
pub use project::{Project, ProjectDraft, ProjectList, ProjectStatus};
pub use settings::Settings;
