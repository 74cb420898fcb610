//! # Quantity Calculations
//!
//! Material takeoff formulas for the three supported construction systems.
//! Each system module follows the same pattern:
//!
//! - takes a validated [`RoomInput`]
//! - returns the ordered [`MaterialLine`]s for one room
//! - never returns a line with quantity zero
//!
//! ## Available Systems
//!
//! - [`drywall`] - Interior drywall partition on 70mm profiles
//! - [`ceiling`] - Suspended ceiling on 35mm profiles
//! - [`steel_frame`] - Exterior steel-frame wall with EIFS finish
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{calculate, RoomInput, SystemType};
//!
//! let input = RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6);
//! let lines = calculate(&input).unwrap();
//!
//! let soleras = lines.iter().find(|l| l.material == "Solera 70mm (2.6m)").unwrap();
//! assert_eq!(soleras.quantity, 5);
//! ```

pub mod ceiling;
pub mod drywall;
pub mod steel_frame;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::materials::{Material, MaterialLine};
use crate::project::GlobalSettings;

pub use ceiling::CeilingLayout;

/// Length of a steel-frame (PGU/PGC) profile, meters
pub const STEEL_FRAME_PROFILE_LENGTH_M: f64 = 6.00;

/// Length of a drywall (solera/montante) profile, meters
pub const DRYWALL_PROFILE_LENGTH_M: f64 = 2.60;

/// Area covered by one 1.20 x 2.40 board, square meters
pub const BOARD_AREA_M2: f64 = 2.88;

/// Maximum waste allowance, percent
pub const MAX_WASTE_PERCENT: u8 = 20;

/// Longest accepted length or height, meters. Keeps every count far below `u64::MAX`.
pub const MAX_DIMENSION_M: f64 = 1000.0;

/// Slack used when rounding up so float noise never adds a whole unit
const CEIL_TOLERANCE: f64 = 1e-9;

/// Construction system of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemType {
    /// Interior drywall partition
    DrywallPartition,
    /// Suspended ceiling on 35mm profiles
    SuspendedCeiling35,
    /// Exterior steel-frame wall with EIFS finish
    SteelFrameEifs,
}

impl SystemType {
    /// All system types for selection lists
    pub const ALL: [SystemType; 3] = [
        SystemType::DrywallPartition,
        SystemType::SuspendedCeiling35,
        SystemType::SteelFrameEifs,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SystemType::DrywallPartition => "Tabique Drywall (Interior)",
            SystemType::SuspendedCeiling35 => "Cielorraso (Perfileria 35mm)",
            SystemType::SteelFrameEifs => "Muro Steel Frame (EIFS)",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "drywall" | "tabique" | "partition" | "drywall-partition" => Ok(SystemType::DrywallPartition),
            "ceiling" | "cielorraso" | "suspended-ceiling" | "ceiling-35" => {
                Ok(SystemType::SuspendedCeiling35)
            }
            "steel" | "steel-frame" | "eifs" | "steel-frame-eifs" | "muro" => Ok(SystemType::SteelFrameEifs),
            other => Err(CalcError::invalid_input(
                "system",
                other,
                "Expected one of: drywall, ceiling, steel-frame",
            )),
        }
    }
}

impl std::fmt::Display for SystemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Stud / joist spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spacing {
    #[serde(rename = "40")]
    Cm40,
    #[serde(rename = "48")]
    Cm48,
    #[serde(rename = "60")]
    Cm60,
}

impl Spacing {
    pub const ALL: [Spacing; 3] = [Spacing::Cm40, Spacing::Cm48, Spacing::Cm60];

    /// Spacing in meters
    pub fn meters(&self) -> f64 {
        match self {
            Spacing::Cm40 => 0.40,
            Spacing::Cm48 => 0.48,
            Spacing::Cm60 => 0.60,
        }
    }

    /// Spacing in whole centimeters
    pub fn centimeters(&self) -> u32 {
        match self {
            Spacing::Cm40 => 40,
            Spacing::Cm48 => 48,
            Spacing::Cm60 => 60,
        }
    }

    pub fn from_centimeters(cm: u32) -> CalcResult<Self> {
        Spacing::ALL
            .iter()
            .copied()
            .find(|s| s.centimeters() == cm)
            .ok_or_else(|| CalcError::invalid_input("spacing", cm.to_string(), "Spacing must be 40, 48 or 60 cm"))
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::Cm40
    }
}

/// Gypsum board thickness for ceilings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardThickness {
    /// Standard 9.5mm board
    #[serde(rename = "9.5")]
    Mm9_5,
    /// Reinforced 12.5mm board
    #[serde(rename = "12.5")]
    Mm12_5,
}

impl BoardThickness {
    /// Catalog board for this thickness
    pub fn board(&self) -> Material {
        match self {
            BoardThickness::Mm9_5 => Material::GypsumBoard95,
            BoardThickness::Mm12_5 => Material::GypsumBoard125,
        }
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().trim_end_matches("mm").replace(',', ".").as_str() {
            "9.5" => Ok(BoardThickness::Mm9_5),
            "12.5" => Ok(BoardThickness::Mm12_5),
            other => Err(CalcError::invalid_input(
                "ceiling_thickness",
                other,
                "Board thickness must be 9.5 or 12.5",
            )),
        }
    }
}

impl Default for BoardThickness {
    fn default() -> Self {
        BoardThickness::Mm9_5
    }
}

impl std::fmt::Display for BoardThickness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardThickness::Mm9_5 => write!(f, "9.5mm"),
            BoardThickness::Mm12_5 => write!(f, "12.5mm"),
        }
    }
}

/// Geometry and options for one room.
///
/// For walls, `length_m` is the wall run and `height_m` the wall height. For
/// ceilings both are plan dimensions (width and depth of the room).
///
/// ## JSON Example
///
/// ```json
/// {
///   "system": "DrywallPartition",
///   "length_m": 5.0,
///   "height_m": 2.6,
///   "spacing": "40",
///   "waste_percent": 10,
///   "faces": 2,
///   "layers": 1,
///   "insulation": false,
///   "ceiling_thickness": "9.5"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomInput {
    pub system: SystemType,

    /// Wall length, or first ceiling side (m)
    pub length_m: f64,

    /// Wall height, or second ceiling side (m)
    pub height_m: f64,

    pub spacing: Spacing,

    /// Extra material allowance, 0-20 %
    pub waste_percent: u8,

    /// Boarded faces of a partition (1 or 2)
    pub faces: u8,

    /// Boards per face (1 or 2)
    pub layers: u8,

    /// Add thermal/acoustic insulation
    pub insulation: bool,

    /// Only used by ceilings
    pub ceiling_thickness: BoardThickness,
}

impl RoomInput {
    /// Create an input with the stock defaults (40cm spacing, 10% waste, 2 faces, 1 layer)
    pub fn new(system: SystemType, length_m: f64, height_m: f64) -> Self {
        RoomInput::with_settings(system, length_m, height_m, &GlobalSettings::default())
    }

    /// Create an input using project defaults
    pub fn with_settings(system: SystemType, length_m: f64, height_m: f64, settings: &GlobalSettings) -> Self {
        RoomInput {
            system,
            length_m,
            height_m,
            spacing: settings.spacing,
            waste_percent: settings.waste_percent,
            faces: settings.faces,
            layers: settings.layers,
            insulation: false,
            ceiling_thickness: settings.ceiling_thickness,
        }
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_waste(mut self, waste_percent: u8) -> Self {
        self.waste_percent = waste_percent;
        self
    }

    pub fn with_faces(mut self, faces: u8) -> Self {
        self.faces = faces;
        self
    }

    pub fn with_layers(mut self, layers: u8) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_insulation(mut self, insulation: bool) -> Self {
        self.insulation = insulation;
        self
    }

    pub fn with_ceiling_thickness(mut self, thickness: BoardThickness) -> Self {
        self.ceiling_thickness = thickness;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("length_m", self.length_m), ("height_m", self.height_m)] {
            if !(value > 0.0 && value <= MAX_DIMENSION_M) {
                return Err(CalcError::invalid_dimension(field, value));
            }
        }
        if self.waste_percent > MAX_WASTE_PERCENT {
            return Err(CalcError::invalid_input(
                "waste_percent",
                self.waste_percent.to_string(),
                "Waste must be between 0 and 20 %",
            ));
        }
        if !(1..=2).contains(&self.faces) {
            return Err(CalcError::invalid_input(
                "faces",
                self.faces.to_string(),
                "A partition is boarded on 1 or 2 faces",
            ));
        }
        if !(1..=2).contains(&self.layers) {
            return Err(CalcError::invalid_input(
                "layers",
                self.layers.to_string(),
                "Each face takes 1 or 2 boards",
            ));
        }
        Ok(())
    }

    /// Multiplier applied to raw needs: 1 + waste/100
    pub fn waste_multiplier(&self) -> f64 {
        1.0 + f64::from(self.waste_percent) / 100.0
    }

    /// Surface L x H (m²)
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.height_m
    }
}

/// Compute the materials list for one room.
///
/// # Returns
///
/// * `Ok(Vec<MaterialLine>)` - Lines in the system's fixed order, zero lines removed
/// * `Err(CalcError)` - If the input fails validation
pub fn calculate(input: &RoomInput) -> CalcResult<Vec<MaterialLine>> {
    input.validate()?;

    let lines = match input.system {
        SystemType::DrywallPartition => drywall::material_lines(input),
        SystemType::SuspendedCeiling35 => ceiling::material_lines(input),
        SystemType::SteelFrameEifs => steel_frame::material_lines(input),
    };

    debug!(
        system = ?input.system,
        length_m = input.length_m,
        height_m = input.height_m,
        lines = lines.len(),
        "calculated room materials"
    );

    Ok(lines)
}

/// Round a raw need up to whole units. Needs beyond `u64::MAX` saturate.
pub(crate) fn ceil_count(raw: f64) -> u64 {
    if !(raw > CEIL_TOLERANCE) {
        return 0;
    }
    (raw - CEIL_TOLERANCE).ceil() as u64
}

/// Append a catalog line unless its quantity is zero.
pub(crate) fn push_line(lines: &mut Vec<MaterialLine>, material: Material, quantity: u64) {
    if quantity > 0 {
        lines.push(MaterialLine::from_catalog(material, quantity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_count_ignores_float_noise() {
        assert_eq!(ceil_count(13.000000000000002), 13);
        assert_eq!(ceil_count(13.01), 14);
        assert_eq!(ceil_count(14.85), 15);
        assert_eq!(ceil_count(0.0), 0);
        assert_eq!(ceil_count(-3.0), 0);
        assert_eq!(ceil_count(f64::NAN), 0);
    }

    #[test]
    fn test_validate_dimensions() {
        let ok = RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6);
        assert!(ok.validate().is_ok());

        let zero = RoomInput::new(SystemType::DrywallPartition, 0.0, 2.6);
        assert_eq!(zero.validate().unwrap_err().error_code(), "INVALID_DIMENSION");

        let negative = RoomInput::new(SystemType::SteelFrameEifs, 5.0, -1.0);
        assert!(matches!(
            negative.validate(),
            Err(CalcError::InvalidDimension { ref field, .. }) if field == "height_m"
        ));

        let nan = RoomInput::new(SystemType::SuspendedCeiling35, f64::NAN, 3.0);
        assert!(nan.validate().is_err());

        let infinite = RoomInput::new(SystemType::DrywallPartition, f64::INFINITY, 2.6);
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn test_dimension_upper_bound() {
        let largest = RoomInput::new(SystemType::SteelFrameEifs, MAX_DIMENSION_M, MAX_DIMENSION_M);
        let lines = calculate(&largest).unwrap();
        assert!(lines.iter().all(|l| l.quantity > 0 && l.quantity < u64::MAX));

        for system in SystemType::ALL {
            let huge = RoomInput::new(system, 1e19, 3.5);
            assert!(matches!(
                calculate(&huge),
                Err(CalcError::InvalidDimension { ref field, .. }) if field == "length_m"
            ));
            let tall = RoomInput::new(system, 5.0, 1000.5);
            assert_eq!(calculate(&tall).unwrap_err().error_code(), "INVALID_DIMENSION");
        }
    }

    #[test]
    fn test_validate_options() {
        let base = RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6);
        assert!(base.with_waste(20).validate().is_ok());
        assert_eq!(base.with_waste(21).validate().unwrap_err().error_code(), "INVALID_INPUT");
        assert!(base.with_faces(0).validate().is_err());
        assert!(base.with_faces(3).validate().is_err());
        assert!(base.with_layers(3).validate().is_err());
    }

    #[test]
    fn test_calculate_rejects_invalid_input() {
        let input = RoomInput::new(SystemType::DrywallPartition, -5.0, 2.6);
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_waste_multiplier() {
        let input = RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6).with_waste(0);
        assert_eq!(input.waste_multiplier(), 1.0);
        let input = input.with_waste(10);
        assert!((input.waste_multiplier() - 1.10).abs() < 1e-12);
    }

    #[test]
    fn test_system_type_parsing() {
        assert_eq!(SystemType::from_str_flexible("Drywall").unwrap(), SystemType::DrywallPartition);
        assert_eq!(SystemType::from_str_flexible("cielorraso").unwrap(), SystemType::SuspendedCeiling35);
        assert_eq!(SystemType::from_str_flexible("steel_frame").unwrap(), SystemType::SteelFrameEifs);
        assert!(SystemType::from_str_flexible("brick").is_err());
    }

    #[test]
    fn test_spacing_and_thickness() {
        assert_eq!(Spacing::from_centimeters(48).unwrap(), Spacing::Cm48);
        assert!(Spacing::from_centimeters(50).is_err());
        assert_eq!(serde_json::to_string(&Spacing::Cm60).unwrap(), "\"60\"");
        assert_eq!(BoardThickness::from_str_flexible("12.5mm").unwrap(), BoardThickness::Mm12_5);
        assert_eq!(BoardThickness::from_str_flexible("9,5").unwrap(), BoardThickness::Mm9_5);
        assert!(BoardThickness::from_str_flexible("15").is_err());
    }

    #[test]
    fn test_every_quantity_is_positive() {
        for system in SystemType::ALL {
            for spacing in Spacing::ALL {
                for waste in [0, 7, 20] {
                    let input = RoomInput::new(system, 0.35, 4.1)
                        .with_spacing(spacing)
                        .with_waste(waste)
                        .with_insulation(true);
                    let lines = calculate(&input).unwrap();
                    assert!(!lines.is_empty());
                    assert!(lines.iter().all(|l| l.quantity > 0), "{:?}", lines);
                }
            }
        }
    }
}
