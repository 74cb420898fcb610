//! # CSV Export
//!
//! Writes project totals as a UTF-8 CSV shopping list and reads such a list
//! back.
//!
//! ```text
//! Categoría,Material,Unidad,Cantidad
//! Estructura,Solera 70mm (2.6m),Unidades,5
//! ```
//!
//! Fields containing a comma, a double quote or a line break are quoted and
//! inner quotes doubled. An empty project produces the header line only.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::export::{parse_totals_csv, totals_to_csv};
//! use calc_core::project::Project;
//!
//! let project = Project::new("admin@test.com");
//! let csv = totals_to_csv(&project.totals());
//! assert_eq!(csv, "Categoría,Material,Unidad,Cantidad\n");
//! assert!(parse_totals_csv(&csv).unwrap().is_empty());
//! ```

use tracing::warn;

use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialLine;
use crate::project::ProjectTotals;

/// Column headers, in order
pub const CSV_HEADER: [&str; 4] = ["Categoría", "Material", "Unidad", "Cantidad"];

/// Render totals as CSV text.
pub fn totals_to_csv(totals: &ProjectTotals) -> String {
    if totals.is_empty() {
        warn!("exporting CSV for a project with no materials");
    }

    let mut csv = CSV_HEADER.join(",");
    csv.push('\n');
    for line in &totals.lines {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            escape_field(&line.category),
            escape_field(&line.material),
            escape_field(&line.unit),
            line.quantity
        ));
    }
    csv
}

/// Read a CSV produced by [`totals_to_csv`] back into lines.
pub fn parse_totals_csv(text: &str) -> CalcResult<Vec<MaterialLine>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_records(text)?.into_iter().enumerate();

    match records.next() {
        Some((_, header)) if header == CSV_HEADER => {}
        Some((_, header)) => {
            return Err(CalcError::serialization(format!(
                "unexpected CSV header: {}",
                header.join(",")
            )))
        }
        None => return Err(CalcError::serialization("empty CSV document")),
    }

    records
        .map(|(row, fields)| {
            let [category, material, unit, quantity]: [String; 4] = fields.try_into().map_err(|f: Vec<String>| {
                CalcError::serialization(format!("line {}: expected 4 fields, found {}", row + 1, f.len()))
            })?;
            let quantity = quantity.trim().parse::<u64>().map_err(|e| {
                CalcError::serialization(format!("line {}: invalid quantity '{}': {}", row + 1, quantity, e))
            })?;
            Ok(MaterialLine::new(category, material, unit, quantity))
        })
        .collect()
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split CSV text into records of fields, honoring quotes.
fn split_records(text: &str) -> CalcResult<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CalcError::serialization("unterminated quoted field"));
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}
