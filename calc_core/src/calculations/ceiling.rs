//! # Suspended Ceiling (35mm)
//!
//! Suspended ceiling framed with 35mm profiles:
//!
//! ```text
//!        long side
//!   +-----------------+  perimeter: solera 35mm
//!   |  |  |  |  |  |  |  secondary joists span the short side,
//!   |--+--+--+--+--+--|  one row every `spacing` along the long side
//!   |  |  |  |  |  |  |
//!   |--+--+--+--+--+--|  main runners span the long side every 1.00 m,
//!   |  |  |  |  |  |  |  internal only (none on the perimeter)
//!   +-----------------+
//! ```
//!
//! Main runners hang from rigid hangers, one per running meter, each cut
//! from 0.60 m of solera stock and anchored to the slab. Every joist/runner
//! crossing takes one T1 screw and every hanger two.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{CeilingLayout, Spacing};
//!
//! let layout = CeilingLayout::new(3.0, 4.0, Spacing::Cm40);
//! assert_eq!(layout.main_rows, 2);
//! assert_eq!(layout.secondary_rows, 11);
//! assert_eq!(layout.intersections, 22);
//! ```

use serde::{Deserialize, Serialize};

use crate::materials::{Material, MaterialLine};

use super::{ceil_count, push_line, RoomInput, Spacing, BOARD_AREA_M2, DRYWALL_PROFILE_LENGTH_M};

/// Distance between main runners (m)
pub const MAIN_RUNNER_SPACING_M: f64 = 1.00;

/// Hangers per running meter of main runner
pub const HANGER_SPACING_M: f64 = 1.00;

/// Solera stock consumed by one rigid hanger (m)
pub const HANGER_STOCK_M: f64 = 0.60;

/// Perimeter anchor spacing (m)
const ANCHOR_SPACING_M: f64 = 0.60;

/// T2 needle-point screws per m² of ceiling
const T2_PER_M2: f64 = 25.0;

const TAPE_M_PER_M2: f64 = 1.6;
const COMPOUND_KG_PER_M2: f64 = 0.9;

/// Framing counts for a rectangular ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CeilingLayout {
    pub short_side_m: f64,
    pub long_side_m: f64,
    pub perimeter_m: f64,
    /// Secondary joist rows, each spanning the short side
    pub secondary_rows: u64,
    /// Internal main runner rows, each spanning the long side
    pub main_rows: u64,
    pub hangers: u64,
    /// Secondary x main crossings
    pub intersections: u64,
}

impl CeilingLayout {
    /// Lay out a ceiling from its two plan sides, in any order.
    pub fn new(side_a_m: f64, side_b_m: f64, spacing: Spacing) -> Self {
        let short_side_m = side_a_m.min(side_b_m);
        let long_side_m = side_a_m.max(side_b_m);

        let secondary_rows = ceil_count(long_side_m / spacing.meters()).saturating_add(1);
        let main_rows = ceil_count(short_side_m / MAIN_RUNNER_SPACING_M).saturating_sub(1);
        let hangers = main_rows.saturating_mul(ceil_count(long_side_m / HANGER_SPACING_M));

        CeilingLayout {
            short_side_m,
            long_side_m,
            perimeter_m: 2.0 * (side_a_m + side_b_m),
            secondary_rows,
            main_rows,
            hangers,
            intersections: secondary_rows.saturating_mul(main_rows),
        }
    }

    /// Total joist and runner length (m)
    pub fn profile_length_m(&self) -> f64 {
        self.secondary_rows as f64 * self.short_side_m + self.main_rows as f64 * self.long_side_m
    }

    /// Perimeter track plus hanger stock (m)
    pub fn track_length_m(&self) -> f64 {
        self.perimeter_m + self.hangers as f64 * HANGER_STOCK_M
    }

    /// Screws at crossings plus two per hanger
    pub fn t1_screws(&self) -> u64 {
        self.intersections.saturating_add(self.hangers.saturating_mul(2))
    }
}

pub(crate) fn material_lines(input: &RoomInput) -> Vec<MaterialLine> {
    let waste = input.waste_multiplier();
    let area = input.area_m2();
    let layout = CeilingLayout::new(input.length_m, input.height_m, input.spacing);

    let mut lines = Vec::new();
    push_line(
        &mut lines,
        Material::Solera35,
        ceil_count(layout.track_length_m() * waste / DRYWALL_PROFILE_LENGTH_M),
    );
    push_line(
        &mut lines,
        Material::Montante35,
        ceil_count(layout.profile_length_m() * waste / DRYWALL_PROFILE_LENGTH_M),
    );
    push_line(
        &mut lines,
        Material::ScrewT1,
        ceil_count(layout.t1_screws() as f64 * waste),
    );
    push_line(
        &mut lines,
        Material::WallPlug,
        ceil_count((layout.perimeter_m / ANCHOR_SPACING_M + layout.hangers as f64) * waste),
    );
    if input.insulation {
        push_line(&mut lines, Material::Insulation, ceil_count(area * waste));
    }
    push_line(
        &mut lines,
        input.ceiling_thickness.board(),
        ceil_count(area * waste / BOARD_AREA_M2),
    );
    push_line(&mut lines, Material::ScrewT2Needle, ceil_count(area * T2_PER_M2 * waste));
    push_line(&mut lines, Material::JointCompound, ceil_count(area * COMPOUND_KG_PER_M2));
    push_line(&mut lines, Material::PaperTape, ceil_count(area * TAPE_M_PER_M2));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate, BoardThickness, SystemType};

    fn quantity(lines: &[MaterialLine], material: Material) -> Option<u64> {
        lines
            .iter()
            .find(|l| l.material == material.display_name())
            .map(|l| l.quantity)
    }

    #[test]
    fn test_reference_layout() {
        let layout = CeilingLayout::new(3.0, 4.0, Spacing::Cm40);
        assert_eq!(layout.short_side_m, 3.0);
        assert_eq!(layout.long_side_m, 4.0);
        assert_eq!(layout.main_rows, 2);
        assert_eq!(layout.secondary_rows, 11);
        assert_eq!(layout.intersections, 22);
        assert_eq!(layout.hangers, 8);
        assert_eq!(layout.t1_screws(), 38);
    }

    #[test]
    fn test_huge_layout_saturates() {
        let layout = CeilingLayout::new(1e19, 1e19, Spacing::Cm40);
        assert_eq!(layout.secondary_rows, u64::MAX);
        assert_eq!(layout.hangers, u64::MAX);
        assert_eq!(layout.intersections, u64::MAX);
        assert_eq!(layout.t1_screws(), u64::MAX);
    }

    #[test]
    fn test_layout_is_orientation_independent() {
        assert_eq!(
            CeilingLayout::new(4.0, 3.0, Spacing::Cm48),
            CeilingLayout::new(3.0, 4.0, Spacing::Cm48)
        );
    }

    #[test]
    fn test_narrow_ceiling_has_no_main_runners() {
        for short in [0.4, 0.99, 1.0] {
            let layout = CeilingLayout::new(short, 6.0, Spacing::Cm60);
            assert_eq!(layout.main_rows, 0, "short side {}", short);
            assert_eq!(layout.hangers, 0);
            assert_eq!(layout.intersections, 0);
        }
        assert_eq!(CeilingLayout::new(1.01, 6.0, Spacing::Cm60).main_rows, 1);
    }

    #[test]
    fn test_reference_ceiling() {
        let input = RoomInput::new(SystemType::SuspendedCeiling35, 3.0, 4.0)
            .with_spacing(Spacing::Cm40)
            .with_waste(10);
        let lines = calculate(&input).unwrap();

        // ceil((14 + 8 * 0.60) * 1.10 / 2.60) = ceil(7.95)
        assert_eq!(quantity(&lines, Material::Solera35), Some(8));
        // ceil((11 * 3 + 2 * 4) * 1.10 / 2.60) = ceil(17.35)
        assert_eq!(quantity(&lines, Material::Montante35), Some(18));
        // ceil((22 + 2 * 8) * 1.10) = ceil(41.8)
        assert_eq!(quantity(&lines, Material::ScrewT1), Some(42));
        // ceil((14 / 0.60 + 8) * 1.10) = ceil(34.47)
        assert_eq!(quantity(&lines, Material::WallPlug), Some(35));
        // ceil(12 * 1.10 / 2.88) = ceil(4.58)
        assert_eq!(quantity(&lines, Material::GypsumBoard95), Some(5));
        assert_eq!(quantity(&lines, Material::GypsumBoard125), None);
        // 12 * 25 * 1.10 = 330
        assert_eq!(quantity(&lines, Material::ScrewT2Needle), Some(330));
        // ceil(12 * 0.9) = ceil(10.8)
        assert_eq!(quantity(&lines, Material::JointCompound), Some(11));
        // ceil(12 * 1.6) = ceil(19.2)
        assert_eq!(quantity(&lines, Material::PaperTape), Some(20));
    }

    #[test]
    fn test_thickness_selects_board() {
        let input = RoomInput::new(SystemType::SuspendedCeiling35, 3.0, 4.0)
            .with_ceiling_thickness(BoardThickness::Mm12_5)
            .with_insulation(true);
        let lines = calculate(&input).unwrap();
        assert_eq!(quantity(&lines, Material::GypsumBoard125), Some(5));
        assert_eq!(quantity(&lines, Material::GypsumBoard95), None);
        assert_eq!(quantity(&lines, Material::Insulation), Some(14));
    }

    #[test]
    fn test_t1_screws_are_fasteners() {
        let input = RoomInput::new(SystemType::SuspendedCeiling35, 3.0, 4.0);
        let lines = calculate(&input).unwrap();
        let t1 = lines.iter().find(|l| l.material == "Tornillos T1").unwrap();
        assert_eq!(t1.category, "Fijaciones");
    }

    #[test]
    fn test_narrow_ceiling_skips_zero_lines() {
        let input = RoomInput::new(SystemType::SuspendedCeiling35, 0.9, 2.0).with_waste(0);
        let lines = calculate(&input).unwrap();
        // No crossings, no hangers: T1 drops out entirely
        assert_eq!(quantity(&lines, Material::ScrewT1), None);
        assert!(lines.iter().all(|l| l.quantity > 0));
    }
}
