//! # Drywall Partition
//!
//! Interior partition on 70mm soleras (floor/ceiling tracks) and 69mm
//! montantes (studs), boarded with 12.5mm gypsum on one or both faces.
//!
//! ## Assumptions
//!
//! - Tracks run along floor and ceiling (2 x length)
//! - One stud per spacing plus the closing stud, stud length scaled by height / 2.60
//! - Track anchored every 0.60 m
//! - Tape and joint compound are taken on board area without waste allowance

use crate::materials::{Material, MaterialLine};

use super::{ceil_count, push_line, RoomInput, BOARD_AREA_M2, DRYWALL_PROFILE_LENGTH_M};

/// T1 (metal-to-metal) screws per m² of wall
const T1_PER_M2: f64 = 15.0;

/// T2 needle-point screws per m² per board layer
const T2_PER_M2_PER_LAYER: f64 = 30.0;

/// Anchor spacing along the tracks (m)
const ANCHOR_SPACING_M: f64 = 0.60;

/// Paper tape per m² of board (m)
const TAPE_M_PER_M2: f64 = 1.6;

/// Joint compound per m² of board (kg)
const COMPOUND_KG_PER_M2: f64 = 0.9;

pub(crate) fn material_lines(input: &RoomInput) -> Vec<MaterialLine> {
    let waste = input.waste_multiplier();
    let area = input.area_m2();
    let faces = f64::from(input.faces);
    let layers = f64::from(input.layers);

    let track_m = input.length_m * 2.0;
    let studs_per_run = input.length_m / input.spacing.meters() + 1.0;
    let board_area = area * faces * layers;

    let mut lines = Vec::new();
    push_line(
        &mut lines,
        Material::Solera70,
        ceil_count(track_m * waste / DRYWALL_PROFILE_LENGTH_M),
    );
    push_line(
        &mut lines,
        Material::Montante69,
        ceil_count(studs_per_run * (input.height_m / DRYWALL_PROFILE_LENGTH_M) * waste),
    );
    if input.insulation {
        push_line(&mut lines, Material::Insulation, ceil_count(area * waste));
    }
    push_line(
        &mut lines,
        Material::GypsumBoard125,
        ceil_count(board_area * waste / BOARD_AREA_M2),
    );
    push_line(&mut lines, Material::ScrewT1, ceil_count(area * T1_PER_M2 * waste));
    push_line(
        &mut lines,
        Material::ScrewT2Needle,
        ceil_count(area * faces * T2_PER_M2_PER_LAYER * layers * waste),
    );
    push_line(
        &mut lines,
        Material::WallPlug,
        ceil_count(track_m / ANCHOR_SPACING_M * waste),
    );
    push_line(&mut lines, Material::PaperTape, ceil_count(board_area * TAPE_M_PER_M2));
    push_line(
        &mut lines,
        Material::JointCompound,
        ceil_count(board_area * COMPOUND_KG_PER_M2),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate, Spacing, SystemType};

    fn quantity(lines: &[MaterialLine], material: Material) -> Option<u64> {
        lines
            .iter()
            .find(|l| l.material == material.display_name())
            .map(|l| l.quantity)
    }

    fn wall_5x2_6() -> RoomInput {
        RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6)
            .with_spacing(Spacing::Cm40)
            .with_waste(10)
            .with_faces(2)
            .with_layers(1)
            .with_insulation(false)
    }

    #[test]
    fn test_reference_wall() {
        let lines = calculate(&wall_5x2_6()).unwrap();

        // ceil(10 * 1.10 / 2.60) = ceil(4.23)
        assert_eq!(quantity(&lines, Material::Solera70), Some(5));
        // ceil((5 / 0.40 + 1) * (2.6 / 2.6) * 1.10) = ceil(14.85)
        assert_eq!(quantity(&lines, Material::Montante69), Some(15));
        // ceil(13 * 2 * 1.10 / 2.88) = ceil(9.93)
        assert_eq!(quantity(&lines, Material::GypsumBoard125), Some(10));
        // ceil(13 * 15 * 1.10) = ceil(214.5)
        assert_eq!(quantity(&lines, Material::ScrewT1), Some(215));
        // 13 * 2 * 30 * 1.10 = 858 exactly
        assert_eq!(quantity(&lines, Material::ScrewT2Needle), Some(858));
        // ceil(10 / 0.60 * 1.10) = ceil(18.33)
        assert_eq!(quantity(&lines, Material::WallPlug), Some(19));
        // ceil(26 * 1.6) = ceil(41.6)
        assert_eq!(quantity(&lines, Material::PaperTape), Some(42));
        // ceil(26 * 0.9) = ceil(23.4)
        assert_eq!(quantity(&lines, Material::JointCompound), Some(24));
        assert_eq!(quantity(&lines, Material::Insulation), None);
    }

    #[test]
    fn test_line_order_and_categories() {
        let lines = calculate(&wall_5x2_6().with_insulation(true)).unwrap();
        let names: Vec<&str> = lines.iter().map(|l| l.material.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Solera 70mm (2.6m)",
                "Montante 69mm (2.6m)",
                "Aislación Térmica/Acústica",
                "Placa Yeso 12.5mm",
                "Tornillos T1",
                "Tornillos T2 Aguja",
                "Tarugos 8mm + Tornillo",
                "Cinta de Papel",
                "Masilla (Juntas)",
            ]
        );
        assert_eq!(lines[0].category, "Estructura");
        assert_eq!(lines[2].unit, "m²");
        // ceil(13 * 1.10) = ceil(14.3)
        assert_eq!(lines[2].quantity, 15);
    }

    #[test]
    fn test_double_layer_single_face() {
        let lines = calculate(&wall_5x2_6().with_faces(1).with_layers(2)).unwrap();
        // Same board area as 2 faces x 1 layer
        assert_eq!(quantity(&lines, Material::GypsumBoard125), Some(10));
        assert_eq!(quantity(&lines, Material::ScrewT2Needle), Some(858));
    }

    #[test]
    fn test_zero_waste_and_wide_spacing() {
        let input = wall_5x2_6().with_waste(0).with_spacing(Spacing::Cm60).with_faces(1);
        let lines = calculate(&input).unwrap();
        // ceil(10 / 2.6) = ceil(3.85)
        assert_eq!(quantity(&lines, Material::Solera70), Some(4));
        // ceil(5 / 0.60 + 1) = ceil(9.33)
        assert_eq!(quantity(&lines, Material::Montante69), Some(10));
        // ceil(13 / 2.88) = ceil(4.51)
        assert_eq!(quantity(&lines, Material::GypsumBoard125), Some(5));
    }

    #[test]
    fn test_tall_wall_scales_studs() {
        let input = RoomInput::new(SystemType::DrywallPartition, 4.0, 5.2).with_waste(0);
        let lines = calculate(&input).unwrap();
        // (4 / 0.40 + 1) * (5.2 / 2.6) = 11 * 2
        assert_eq!(quantity(&lines, Material::Montante69), Some(22));
    }
}
