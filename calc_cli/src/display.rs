//! Plain-text tables for the terminal.

use calc_core::materials::MaterialLine;
use calc_core::RoomEntry;

const HEADERS: [&str; 4] = ["Categoría", "Material", "Unidad", "Cantidad"];

/// Format material lines as an aligned table. Quantities are right-aligned.
pub fn materials_table(lines: &[MaterialLine]) -> String {
    if lines.is_empty() {
        return "(sin materiales)\n".to_string();
    }

    let rows: Vec<[String; 4]> = lines
        .iter()
        .map(|l| {
            [
                l.category.clone(),
                l.material.clone(),
                l.unit.clone(),
                l.quantity.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&HEADERS.map(String::from), &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }
    out
}

/// One line per room: `N. name - system (L x H m)`, numbered from 1
pub fn rooms_list(rooms: &[RoomEntry]) -> String {
    if rooms.is_empty() {
        return "(proyecto vacío)\n".to_string();
    }
    rooms
        .iter()
        .enumerate()
        .map(|(i, room)| {
            format!(
                "{}. {} - {} ({} x {} m)\n",
                i + 1,
                room.name,
                room.system.display_name(),
                room.input.length_m,
                room.input.height_m
            )
        })
        .collect()
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let pad = " ".repeat(width - cell.chars().count());
        if i == 3 {
            line.push_str(&pad);
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&pad);
            line.push_str("  ");
        }
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::calculations::{RoomInput, SystemType};

    #[test]
    fn test_empty_table() {
        assert_eq!(materials_table(&[]), "(sin materiales)\n");
    }

    #[test]
    fn test_table_alignment() {
        let lines = vec![
            MaterialLine::new("Fijaciones", "Tornillos T1", "Unidades", 215),
            MaterialLine::new("Aislación", "Lana de Vidrio", "m²", 15),
        ];
        let table = materials_table(&lines);
        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("Categoría   Material"));
        assert!(rows[2].starts_with("Fijaciones  Tornillos T1    Unidades  "));
        assert!(rows[2].ends_with("215"));
        assert!(rows[3].ends_with(" 15"));
        // Accented characters count as one column
        let widths: Vec<usize> = rows.iter().map(|r| r.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_rooms_list() {
        let rooms = vec![
            RoomEntry::calculate("Pasillo", RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6)).unwrap(),
            RoomEntry::calculate("Living", RoomInput::new(SystemType::SuspendedCeiling35, 3.0, 4.0)).unwrap(),
        ];
        let list = rooms_list(&rooms);
        assert!(list.starts_with("1. Pasillo - "));
        assert!(list.contains("(5 x 2.6 m)"));
        assert!(list.contains("2. Living - "));
        assert_eq!(rooms_list(&[]), "(proyecto vacío)\n");
    }
}
