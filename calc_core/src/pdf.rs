//! # PDF Generation Module
//!
//! Renders the consolidated materials list as a printable PDF using Typst.
//!
//! ## Architecture
//!
//! - The report is built as Typst markup from the project totals
//! - User-provided text (identity, material names) is escaped before insertion
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::calculations::{RoomInput, SystemType};
//! use calc_core::pdf::render_project_pdf;
//! use calc_core::project::Project;
//!
//! let mut project = Project::new("cliente@obra.com");
//! project
//!     .add_calculation("Pasillo", RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6))
//!     .unwrap();
//!
//! let pdf_bytes = render_project_pdf(&project).unwrap();
//! std::fs::write("lista_compras_oficial.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::layout::PagedDocument;
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, ProjectTotals};

/// Longest category printed before truncation
const MAX_CATEGORY_CHARS: usize = 28;

/// Longest material name printed before truncation
const MAX_MATERIAL_CHARS: usize = 50;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    fn load_fonts() -> Vec<Font> {
        let mut fonts = Vec::new();

        // Bundled fonts from typst-assets (Libertinus Serif is Typst's default text font)
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }

        fonts
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Report
// ============================================================================

/// Attribution stamped on the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInfo {
    /// Licensed identity (email) the report is issued to
    pub identity: String,
    pub generated_on: NaiveDate,
}

impl ReportInfo {
    /// Attribution for `identity`, dated today (UTC)
    pub fn today(identity: impl Into<String>) -> Self {
        ReportInfo {
            identity: identity.into(),
            generated_on: Utc::now().date_naive(),
        }
    }
}

/// Build the Typst source for a materials report.
pub fn render_report_source(totals: &ProjectTotals, info: &ReportInfo) -> String {
    let identity = escape_typst(&info.identity);
    let date = info.generated_on.format("%d/%m/%Y");

    format!(
        r##"
#set page(
  paper: "a4",
  margin: (top: 15mm, bottom: 20mm, x: 10mm),
  footer: align(center)[
    #text(size: 8pt, style: "italic", fill: rgb(128, 128, 128))[Generado el {date} por {identity}. Licencia intransferible. Prohibida su copia.]
  ]
)

#set text(size: 10pt, lang: "es")

#align(center)[
  #text(size: 16pt, weight: "bold")[LISTA DE MATERIALES CONSOLIDADA]
]

#v(5pt)

#align(center)[
  #text(size: 10pt, fill: rgb(80, 80, 80))[Licencia otorgada a: {identity}]
]

#v(5pt)

#text(size: 11pt, fill: rgb(50, 50, 50))[Proyecto: {rooms} ambientes calculados.]

#v(5pt)

#table(
  columns: (55mm, 95mm, 20mm, 20mm),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, left, center, center),
  fill: (_, y) => if y == 0 {{ rgb(220, 230, 241) }},
  table.header([*Categoría*], [*Material*], [*Unid.*], [*Cant.*]),
{rows}
)
"##,
        date = date,
        identity = identity,
        rooms = totals.room_count,
        rows = build_table_rows(totals),
    )
}

/// Render project totals to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError)` - If Typst compilation or PDF emission fails
pub fn render_totals_pdf(totals: &ProjectTotals, info: &ReportInfo) -> CalcResult<Vec<u8>> {
    if totals.room_count == 0 {
        warn!("rendering PDF for a project with no rooms");
    }

    let source = render_report_source(totals, info);
    let pdf = compile_pdf(source)?;
    debug!(bytes = pdf.len(), lines = totals.lines.len(), "rendered materials report");
    Ok(pdf)
}

/// Render a project's totals to PDF, attributed to the project identity and dated today.
pub fn render_project_pdf(project: &Project) -> CalcResult<Vec<u8>> {
    render_totals_pdf(&project.totals(), &ReportInfo::today(&project.meta.identity))
}

fn compile_pdf(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);
    let warned = typst::compile::<PagedDocument>(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render(format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render(format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '~' | '/' | '-' | '=' | '+'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Cut `s` to `max` characters, marking the cut with ".."
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut cut: String = s.chars().take(max).collect();
        cut.push_str("..");
        cut
    } else {
        s.to_string()
    }
}

/// Build table rows for the materials table
fn build_table_rows(totals: &ProjectTotals) -> String {
    totals
        .lines
        .iter()
        .map(|line| {
            format!(
                "  [{}], [{}], [{}], [{}],",
                escape_typst(&truncate(&line.category, MAX_CATEGORY_CHARS)),
                escape_typst(&truncate(&line.material, MAX_MATERIAL_CHARS)),
                escape_typst(&line.unit),
                line.quantity
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{RoomInput, SystemType};
    use crate::materials::MaterialLine;

    fn info() -> ReportInfo {
        ReportInfo {
            identity: "admin@test.com".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        }
    }

    fn sample_project() -> Project {
        let mut project = Project::new("admin@test.com");
        project
            .add_calculation("Tabique", RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6))
            .unwrap();
        project
            .add_calculation("Cielo", RoomInput::new(SystemType::SuspendedCeiling35, 3.0, 4.0))
            .unwrap();
        project
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("admin@test.com"), "admin\\@test.com");
        assert_eq!(escape_typst("EIFS - Base"), "EIFS \\- Base");
        assert_eq!(escape_typst("Agua/Viento [x]"), "Agua\\/Viento \\[x\\]");
        assert_eq!(escape_typst("Placa Yeso 12.5mm"), "Placa Yeso 12.5mm");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Fijaciones", 28), "Fijaciones");
        assert_eq!(truncate("Aislación Térmica", 9), "Aislación..");
        assert_eq!(truncate(&"x".repeat(50), 50), "x".repeat(50));
    }

    #[test]
    fn test_empty_report_source() {
        let totals = Project::new("admin@test.com").totals();
        let source = render_report_source(&totals, &info());
        assert!(source.contains("LISTA DE MATERIALES CONSOLIDADA"));
        assert!(source.contains("Proyecto: 0 ambientes calculados."));
        assert!(source.contains("Generado el 09/03/2026 por admin\\@test.com."));
        assert!(source.contains("table.header([*Categoría*], [*Material*], [*Unid.*], [*Cant.*]),\n\n)"));
    }

    #[test]
    fn test_report_source_rows() {
        let totals = sample_project().totals();
        let source = render_report_source(&totals, &info());
        assert!(source.contains("Proyecto: 2 ambientes calculados."));
        assert!(source.contains("Licencia otorgada a: admin\\@test.com"));
        assert!(source.contains("  [Fijaciones], [Tornillos T1], [Unidades], [257],"));
        assert_eq!(source.matches("\n  [").count(), totals.lines.len());
    }

    #[test]
    fn test_long_names_are_truncated() {
        let totals = ProjectTotals {
            room_count: 1,
            lines: vec![MaterialLine::new("C".repeat(40), "M".repeat(60), "Unidades", 1)],
        };
        let source = render_report_source(&totals, &info());
        assert!(source.contains(&format!("[{}..]", "C".repeat(28))));
        assert!(source.contains(&format!("[{}..]", "M".repeat(50))));
    }

    #[test]
    fn test_pdf_generation() {
        let pdf = render_totals_pdf(&sample_project().totals(), &info());

        // Should succeed
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_empty_project_pdf() {
        let pdf = render_project_pdf(&Project::new("cliente@obra.com")).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
