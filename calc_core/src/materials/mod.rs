//! # Materials
//!
//! Material catalog and the line type every calculation produces.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::{Material, MaterialLine};
//!
//! let line = MaterialLine::from_catalog(Material::ScrewT1, 42);
//! assert_eq!(line.category, "Fijaciones");
//! assert_eq!(line.material, "Tornillos T1");
//! assert_eq!(line.unit, "Unidades");
//! ```

pub mod catalog;

pub use catalog::Material;

use serde::{Deserialize, Serialize};

/// Section of the materials list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Structure,
    Bracing,
    Boarding,
    Insulation,
    Fasteners,
    Finishing,
    EifsSubstrate,
    EifsInsulation,
    EifsBase,
    EifsMesh,
}

impl Category {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Structure => "Estructura",
            Category::Bracing => "Rigidización",
            Category::Boarding => "Emplacado",
            Category::Insulation => "Aislación",
            Category::Fasteners => "Fijaciones",
            Category::Finishing => "Terminación",
            Category::EifsSubstrate => "EIFS - Sustrato",
            Category::EifsInsulation => "EIFS - Aislación",
            Category::EifsBase => "EIFS - Base",
            Category::EifsMesh => "EIFS - Malla",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Purchase unit of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Discrete pieces (profiles, boards, screws)
    Pieces,
    /// Linear meters
    Meters,
    /// Square meters
    SquareMeters,
    /// Kilograms
    Kilograms,
}

impl Unit {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Unit::Pieces => "Unidades",
            Unit::Meters => "Metros",
            Unit::SquareMeters => "m²",
            Unit::Kilograms => "Kg",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of a materials list.
///
/// Fields are plain strings so that lines read back from CSV and lines built
/// from the catalog compare equal.
///
/// ## JSON Example
///
/// ```json
/// {
///   "category": "Estructura",
///   "material": "Solera 70mm (2.6m)",
///   "unit": "Unidades",
///   "quantity": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialLine {
    pub category: String,
    pub material: String,
    pub unit: String,
    /// Whole purchase units, already rounded up
    pub quantity: u64,
}

impl MaterialLine {
    pub fn new(
        category: impl Into<String>,
        material: impl Into<String>,
        unit: impl Into<String>,
        quantity: u64,
    ) -> Self {
        MaterialLine {
            category: category.into(),
            material: material.into(),
            unit: unit.into(),
            quantity,
        }
    }

    /// Build a line for a catalog product, taking unit and category from the catalog
    pub fn from_catalog(material: Material, quantity: u64) -> Self {
        MaterialLine::new(
            material.category().display_name(),
            material.display_name(),
            material.unit().display_name(),
            quantity,
        )
    }
}
