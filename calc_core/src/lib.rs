//! # calc_core - Construction Materials Estimation Engine
//!
//! `calc_core` turns room dimensions into purchasable material quantities for
//! drywall partitions, suspended ceilings and steel-frame/EIFS walls, and
//! consolidates many rooms into one shopping list. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless formulas**: Pure functions from a room input to material lines
//! - **Caller-owned state**: The [`Project`] is an explicit value, not a global
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{RoomInput, SystemType};
//! use calc_core::export::totals_to_csv;
//! use calc_core::project::Project;
//!
//! let mut project = Project::new("admin@test.com");
//! project
//!     .add_calculation("Pasillo", RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6))
//!     .unwrap();
//!
//! let csv = totals_to_csv(&project.totals());
//! assert!(csv.starts_with("Categoría,Material,Unidad,Cantidad\n"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Quantity formulas per construction system
//! - [`materials`] - Material catalog and material lines
//! - [`project`] - Room list and consolidated totals
//! - [`export`] - CSV export
//! - [`pdf`] - PDF report rendering
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod export;
pub mod materials;
pub mod pdf;
pub mod project;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, RoomInput, SystemType};
pub use errors::{CalcError, CalcResult};
pub use materials::MaterialLine;
pub use project::{GlobalSettings, Project, ProjectTotals, RoomEntry};
