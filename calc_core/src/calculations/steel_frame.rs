//! # Steel Frame Wall with EIFS
//!
//! Exterior load-bearing wall on 100mm PGU tracks and PGC studs (6 m stock),
//! sheathed with OSB and finished with an EIFS system (weather barrier, EPS
//! board, base coat and fiberglass mesh). The interior face takes one or two
//! layers of 12.5mm gypsum board.
//!
//! Studs are cut from 6 m stock, so walls taller than 3.00 m need a full
//! profile per stud instead of getting two studs out of each.

use crate::materials::{Material, MaterialLine};

use super::{ceil_count, push_line, RoomInput, BOARD_AREA_M2, STEEL_FRAME_PROFILE_LENGTH_M};

/// Tallest wall that still gets two studs per 6 m profile
pub const MAX_HALF_PROFILE_HEIGHT_M: f64 = 3.00;

/// Flat strap bracing per m² of wall (m)
const STRAP_M_PER_M2: f64 = 1.5;

/// Base coat per m² (kg)
const BASE_COAT_KG_PER_M2: f64 = 3.5;

/// Mesh per m², including overlaps
const MESH_M2_PER_M2: f64 = 1.1;

/// Fasteners per EPS board
const EPS_FASTENERS_PER_BOARD: u64 = 20;

/// Hex head screws per m² of OSB
const HEX_SCREWS_PER_M2: f64 = 20.0;

/// T2 drill-point screws per m² per board layer
const T2_DRILL_PER_M2: f64 = 30.0;

pub(crate) fn material_lines(input: &RoomInput) -> Vec<MaterialLine> {
    let waste = input.waste_multiplier();
    let area = input.area_m2();
    let layers = f64::from(input.layers);

    let track_m = input.length_m * 2.0;
    let mut studs = ceil_count((input.length_m / input.spacing.meters() + 1.0) * waste);
    if input.height_m > MAX_HALF_PROFILE_HEIGHT_M {
        studs = studs.saturating_mul(2);
    }
    let sheathing_boards = ceil_count(area * waste / BOARD_AREA_M2);

    let mut lines = Vec::new();
    push_line(
        &mut lines,
        Material::Pgu100,
        ceil_count(track_m * waste / STEEL_FRAME_PROFILE_LENGTH_M),
    );
    push_line(&mut lines, Material::Pgc100, studs);
    push_line(&mut lines, Material::SteelStrap, ceil_count(area * STRAP_M_PER_M2));
    push_line(&mut lines, Material::OsbBoard, sheathing_boards);
    push_line(&mut lines, Material::WeatherBarrier, ceil_count(area * waste));
    push_line(&mut lines, Material::EpsBoard, ceil_count(area * waste));
    push_line(
        &mut lines,
        Material::BaseCoat,
        ceil_count(area * BASE_COAT_KG_PER_M2 * waste),
    );
    push_line(
        &mut lines,
        Material::FiberglassMesh,
        ceil_count(area * MESH_M2_PER_M2 * waste),
    );
    push_line(
        &mut lines,
        Material::EpsFastener,
        sheathing_boards.saturating_mul(EPS_FASTENERS_PER_BOARD),
    );
    if input.insulation {
        push_line(&mut lines, Material::Insulation, ceil_count(area * waste));
    }
    push_line(
        &mut lines,
        Material::GypsumBoard125,
        ceil_count(area * layers * waste / BOARD_AREA_M2),
    );
    push_line(&mut lines, Material::HexScrew, ceil_count(area * HEX_SCREWS_PER_M2 * waste));
    let t2_osb = ceil_count(area * T2_DRILL_PER_M2 * waste);
    let t2_interior = ceil_count(area * T2_DRILL_PER_M2 * layers * waste);
    push_line(&mut lines, Material::ScrewT2Drill, t2_osb.saturating_add(t2_interior));
    lines
}
