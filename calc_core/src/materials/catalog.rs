//! Material Catalog
//!
//! Every product the quantity formulas can emit, with its purchase unit and
//! list category. The category is a pure function of the material, so the
//! same product always lands in the same section of the shopping list no
//! matter which system produced it.

use serde::{Deserialize, Serialize};

use super::{Category, Unit};

/// Purchasable construction products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    // Drywall framing (70mm)
    Solera70,
    Montante69,
    // Ceiling framing (35mm)
    Solera35,
    Montante35,
    // Steel frame
    Pgu100,
    Pgc100,
    SteelStrap,
    // Boards
    GypsumBoard95,
    GypsumBoard125,
    OsbBoard,
    // Insulation and EIFS layers
    Insulation,
    WeatherBarrier,
    EpsBoard,
    BaseCoat,
    FiberglassMesh,
    // Fasteners
    ScrewT1,
    ScrewT2Needle,
    ScrewT2Drill,
    HexScrew,
    EpsFastener,
    WallPlug,
    // Finishing
    PaperTape,
    JointCompound,
}

impl Material {
    /// All catalog entries
    pub const ALL: [Material; 23] = [
        Material::Solera70,
        Material::Montante69,
        Material::Solera35,
        Material::Montante35,
        Material::Pgu100,
        Material::Pgc100,
        Material::SteelStrap,
        Material::GypsumBoard95,
        Material::GypsumBoard125,
        Material::OsbBoard,
        Material::Insulation,
        Material::WeatherBarrier,
        Material::EpsBoard,
        Material::BaseCoat,
        Material::FiberglassMesh,
        Material::ScrewT1,
        Material::ScrewT2Needle,
        Material::ScrewT2Drill,
        Material::HexScrew,
        Material::EpsFastener,
        Material::WallPlug,
        Material::PaperTape,
        Material::JointCompound,
    ];

    /// Name as printed on the materials list
    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Solera70 => "Solera 70mm (2.6m)",
            Material::Montante69 => "Montante 69mm (2.6m)",
            Material::Solera35 => "Solera 35mm (2.6m)",
            Material::Montante35 => "Montante 35mm (2.6m)",
            Material::Pgu100 => "PGU 100mm (6m)",
            Material::Pgc100 => "PGC 100mm (6m)",
            Material::SteelStrap => "Fleje Acero Galvanizado",
            Material::GypsumBoard95 => "Placa Yeso 9.5mm",
            Material::GypsumBoard125 => "Placa Yeso 12.5mm",
            Material::OsbBoard => "Placa OSB 11.1mm",
            Material::Insulation => "Aislación Térmica/Acústica",
            Material::WeatherBarrier => "Barrera Agua/Viento (Tyvek)",
            Material::EpsBoard => "Plancha EPS Alta Densidad",
            Material::BaseCoat => "Base Coat",
            Material::FiberglassMesh => "Malla Fibra de Vidrio",
            Material::ScrewT1 => "Tornillos T1",
            Material::ScrewT2Needle => "Tornillos T2 Aguja",
            Material::ScrewT2Drill => "Tornillos T2 Mecha",
            Material::HexScrew => "Tornillo Hexagonal",
            Material::EpsFastener => "Tornillos + Arandelas PVC (EPS)",
            Material::WallPlug => "Tarugos 8mm + Tornillo",
            Material::PaperTape => "Cinta de Papel",
            Material::JointCompound => "Masilla (Juntas)",
        }
    }

    /// Purchase unit
    pub fn unit(&self) -> Unit {
        match self {
            Material::SteelStrap | Material::PaperTape => Unit::Meters,
            Material::Insulation
            | Material::WeatherBarrier
            | Material::EpsBoard
            | Material::FiberglassMesh => Unit::SquareMeters,
            Material::BaseCoat | Material::JointCompound => Unit::Kilograms,
            _ => Unit::Pieces,
        }
    }

    /// List section this product belongs to
    pub fn category(&self) -> Category {
        match self {
            Material::Solera70
            | Material::Montante69
            | Material::Solera35
            | Material::Montante35
            | Material::Pgu100
            | Material::Pgc100 => Category::Structure,
            Material::SteelStrap => Category::Bracing,
            Material::GypsumBoard95 | Material::GypsumBoard125 => Category::Boarding,
            Material::OsbBoard => Category::EifsSubstrate,
            Material::Insulation => Category::Insulation,
            Material::WeatherBarrier | Material::EpsBoard => Category::EifsInsulation,
            Material::BaseCoat => Category::EifsBase,
            Material::FiberglassMesh => Category::EifsMesh,
            Material::ScrewT1
            | Material::ScrewT2Needle
            | Material::ScrewT2Drill
            | Material::HexScrew
            | Material::EpsFastener
            | Material::WallPlug => Category::Fasteners,
            Material::PaperTape | Material::JointCompound => Category::Finishing,
        }
    }

    /// Look up a catalog entry by its printed name
    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Material::ALL.iter().copied().find(|m| m.display_name() == name)
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Material::ALL.iter().map(|m| m.display_name()).collect();
        assert_eq!(names.len(), Material::ALL.len());
    }

    #[test]
    fn test_lookup_by_name() {
        for material in Material::ALL {
            assert_eq!(Material::from_display_name(material.display_name()), Some(material));
        }
        assert_eq!(Material::from_display_name(" Tornillos T1 "), Some(Material::ScrewT1));
        assert_eq!(Material::from_display_name("Ladrillo"), None);
    }

    #[test]
    fn test_shared_products_have_one_category() {
        // T1 screws show up in partitions and ceilings, 12.5mm board in all three systems
        assert_eq!(Material::ScrewT1.category(), Category::Fasteners);
        assert_eq!(Material::GypsumBoard125.category(), Category::Boarding);
        assert_eq!(Material::Insulation.unit(), Unit::SquareMeters);
        assert_eq!(Material::JointCompound.unit(), Unit::Kilograms);
        assert_eq!(Material::Pgc100.unit(), Unit::Pieces);
    }
}
