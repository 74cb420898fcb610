//! Interactive session.
//!
//! Reads one command per line and keeps the rooms of the current project in
//! memory until the user quits. Command failures are reported and the loop
//! continues; only I/O errors on the terminal end the session.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use calc_core::calculations::{BoardThickness, RoomInput, Spacing, SystemType};
use calc_core::export::totals_to_csv;
use calc_core::pdf::render_project_pdf;
use calc_core::{CalcError, Project};
use tracing::info;

use crate::display::{materials_table, rooms_list};
use crate::error::CliResult;

const HELP: &str = "\
Comandos:
  add            Calcular un ambiente y agregarlo al proyecto
  list           Listar ambientes
  show N         Ver materiales del ambiente N
  remove N       Eliminar el ambiente N
  clear          Vaciar el proyecto
  totals [--json] Lista consolidada de materiales
  csv RUTA       Exportar lista consolidada a CSV
  pdf RUTA       Exportar reporte PDF
  help           Mostrar esta ayuda
  quit           Salir
";

/// A parsed session command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add,
    List,
    /// 1-based room number
    Show(usize),
    /// 1-based room number
    Remove(usize),
    Clear,
    Totals { json: bool },
    Csv(PathBuf),
    Pdf(PathBuf),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> CliResult<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let rest: Vec<&str> = words.collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("add" | "agregar", []) => Command::Add,
            ("list" | "ls", []) => Command::List,
            ("show", [n]) => Command::Show(parse_room_number(n)?),
            ("remove" | "rm", [n]) => Command::Remove(parse_room_number(n)?),
            ("clear", []) => Command::Clear,
            ("totals", []) => Command::Totals { json: false },
            ("totals", ["--json"]) => Command::Totals { json: true },
            ("csv", [path]) => Command::Csv(PathBuf::from(path)),
            ("pdf", [path]) => Command::Pdf(PathBuf::from(path)),
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "salir", []) => Command::Quit,
            _ => {
                return Err(CalcError::invalid_input("command", line.trim(), "Unknown command, type 'help'").into());
            }
        };
        Ok(command)
    }
}

fn parse_room_number(s: &str) -> CliResult<usize> {
    s.parse::<usize>()
        .map_err(|_| CalcError::invalid_input("room", s, "Expected a room number").into())
}

/// Write the project totals as CSV to `path`.
pub fn export_csv(project: &Project, path: &Path) -> CliResult<()> {
    std::fs::write(path, totals_to_csv(&project.totals()))?;
    info!(path = %path.display(), "CSV exported");
    Ok(())
}

/// Write the project report as PDF to `path`.
pub fn export_pdf(project: &Project, path: &Path) -> CliResult<()> {
    let pdf = render_project_pdf(project)?;
    std::fs::write(path, pdf)?;
    info!(path = %path.display(), "PDF exported");
    Ok(())
}

pub struct Session<R, W> {
    project: Project,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(project: Project, input: R, output: W) -> Self {
        Session { project, input, output }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.output, "Licencia otorgada a: {}", self.project.meta.identity)?;
        writeln!(self.output, "Escriba 'help' para ver los comandos.")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse(&line).and_then(|cmd| self.execute(cmd)) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
        Ok(())
    }

    /// Execute one command. Returns `false` when the session should end.
    pub fn execute(&mut self, command: Command) -> CliResult<bool> {
        match command {
            Command::Add => {
                let (name, input) = self.prompt_room()?;
                let position = self.project.add_calculation(name, input)?;
                let room = self.project.room(position)?;
                writeln!(self.output, "Ambiente {} agregado: {}", position + 1, room.name)?;
                write!(self.output, "{}", materials_table(&room.lines))?;
            }
            Command::List => write!(self.output, "{}", rooms_list(self.project.rooms()))?,
            Command::Show(n) => {
                let room = self.project.room(self.position(n)?)?;
                writeln!(self.output, "{}. {} - {}", n, room.name, room.system.display_name())?;
                write!(self.output, "{}", materials_table(&room.lines))?;
            }
            Command::Remove(n) => {
                let room = self.project.remove(self.position(n)?)?;
                writeln!(self.output, "Ambiente eliminado: {}", room.name)?;
            }
            Command::Clear => {
                self.project.clear();
                writeln!(self.output, "Proyecto vacío.")?;
            }
            Command::Totals { json } => {
                let totals = self.project.totals();
                if json {
                    writeln!(self.output, "{}", serde_json::to_string_pretty(&totals)?)?;
                } else {
                    writeln!(self.output, "Proyecto: {} ambientes calculados.", totals.room_count)?;
                    write!(self.output, "{}", materials_table(&totals.lines))?;
                }
            }
            Command::Csv(path) => {
                export_csv(&self.project, &path)?;
                writeln!(self.output, "CSV guardado en {}", path.display())?;
            }
            Command::Pdf(path) => {
                export_pdf(&self.project, &path)?;
                writeln!(self.output, "PDF guardado en {}", path.display())?;
            }
            Command::Help => write!(self.output, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Map a 1-based room number to a project position
    fn position(&self, n: usize) -> CliResult<usize> {
        let len = self.project.room_count();
        if n == 0 || n > len {
            return Err(CalcError::index_out_of_range(n, len).into());
        }
        Ok(n - 1)
    }

    /// Ask for a room. Options the chosen system ignores are not asked and keep the defaults.
    fn prompt_room(&mut self) -> CliResult<(String, RoomInput)> {
        let settings = self.project.settings.clone();

        let system = self.prompt("Sistema (1=Tabique, 2=Cielorraso, 3=Steel Frame)", "1")?;
        let system = match system.as_str() {
            "1" => SystemType::DrywallPartition,
            "2" => SystemType::SuspendedCeiling35,
            "3" => SystemType::SteelFrameEifs,
            other => SystemType::from_str_flexible(other)?,
        };

        let default_name = format!("Ambiente {}", self.project.room_count() + 1);
        let name = self.prompt("Nombre", &default_name)?;

        let (first, second) = match system {
            SystemType::SuspendedCeiling35 => ("Ancho (m)", "Largo (m)"),
            _ => ("Largo (m)", "Alto (m)"),
        };
        let length_m = parse_meters("length_m", &self.prompt(first, "")?)?;
        let height_m = parse_meters("height_m", &self.prompt(second, "")?)?;

        let mut input = RoomInput::with_settings(system, length_m, height_m, &settings);

        let spacing = self.prompt("Separación (cm: 40/48/60)", &settings.spacing.centimeters().to_string())?;
        input = input.with_spacing(Spacing::from_centimeters(parse_number("spacing", &spacing)?)?);

        let waste = self.prompt("Desperdicio (%)", &settings.waste_percent.to_string())?;
        input = input.with_waste(parse_number("waste_percent", &waste)?);

        match system {
            SystemType::DrywallPartition => {
                let faces = self.prompt("Caras (1/2)", &settings.faces.to_string())?;
                input = input.with_faces(parse_number("faces", &faces)?);
                let layers = self.prompt("Capas por cara (1/2)", &settings.layers.to_string())?;
                input = input.with_layers(parse_number("layers", &layers)?);
            }
            SystemType::SuspendedCeiling35 => {
                let thickness = self.prompt("Espesor placa (9.5/12.5)", &settings.ceiling_thickness.to_string())?;
                input = input.with_ceiling_thickness(BoardThickness::from_str_flexible(&thickness)?);
            }
            SystemType::SteelFrameEifs => {
                let layers = self.prompt("Placas cara interior (1/2)", &settings.layers.to_string())?;
                input = input.with_layers(parse_number("layers", &layers)?);
            }
        }

        let insulation = self.prompt("Incluir aislación (s/n)", "n")?;
        input = input.with_insulation(parse_yes_no(&insulation)?);

        Ok((name, input))
    }

    /// Show `label [default]: ` and read an answer; blank or end of input takes the default.
    fn prompt(&mut self, label: &str, default: &str) -> CliResult<String> {
        if default.is_empty() {
            write!(self.output, "{}: ", label)?;
        } else {
            write!(self.output, "{} [{}]: ", label, default)?;
        }
        self.output.flush()?;

        let answer = self.read_line()?.unwrap_or_default();
        let answer = answer.trim();
        Ok(if answer.is_empty() { default } else { answer }.to_string())
    }

    fn read_line(&mut self) -> CliResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Parse a length in meters, accepting a decimal comma
fn parse_meters(field: &str, s: &str) -> CliResult<f64> {
    let value = s
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| CalcError::invalid_input(field, s, "Expected a number of meters"))?;
    if !(value.is_finite() && value > 0.0) {
        return Err(CalcError::invalid_dimension(field, value).into());
    }
    Ok(value)
}

fn parse_number<T: std::str::FromStr>(field: &str, s: &str) -> CliResult<T> {
    s.parse::<T>()
        .map_err(|_| CalcError::invalid_input(field, s, "Expected a whole number").into())
}

fn parse_yes_no(s: &str) -> CliResult<bool> {
    match s.to_lowercase().as_str() {
        "s" | "si" | "sí" | "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(CalcError::invalid_input("insulation", other, "Answer s or n").into()),
    }
}
