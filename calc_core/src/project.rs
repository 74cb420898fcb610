//! # Project Data Structures
//!
//! The `Project` is the caller-owned context holding every room calculated in
//! a session. It lives for the process lifetime only and is never written to
//! disk; JSON serialization exists for machine-readable output.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (identity, timestamps)
//! ├── settings: GlobalSettings (defaults for new rooms)
//! └── rooms: Vec<RoomEntry> (ordered, in insertion order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{RoomInput, SystemType};
//! use calc_core::project::Project;
//!
//! let mut project = Project::new("cliente@obra.com");
//! project
//!     .add_calculation("Pasillo", RoomInput::new(SystemType::DrywallPartition, 5.0, 2.6))
//!     .unwrap();
//! project
//!     .add_calculation("Living", RoomInput::new(SystemType::SuspendedCeiling35, 3.0, 4.0))
//!     .unwrap();
//!
//! let totals = project.totals();
//! assert_eq!(totals.room_count, 2);
//! assert!(totals.lines.iter().any(|l| l.material == "Tornillos T1"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::{calculate, BoardThickness, RoomInput, Spacing, SystemType};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialLine;

/// One calculated room. Immutable once added to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomEntry {
    /// User label (e.g., "Pasillo"); duplicates are allowed
    pub name: String,
    pub system: SystemType,
    /// What was entered for this room
    pub input: RoomInput,
    pub lines: Vec<MaterialLine>,
}

impl RoomEntry {
    /// Validate the input and calculate the room's materials.
    pub fn calculate(name: impl Into<String>, input: RoomInput) -> CalcResult<Self> {
        let lines = calculate(&input)?;
        Ok(RoomEntry {
            name: name.into(),
            system: input.system,
            input,
            lines,
        })
    }
}

/// Consolidated materials list for a whole project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTotals {
    /// Number of rooms that went into the totals
    pub room_count: usize,
    /// Grouped lines sorted by (category, material)
    pub lines: Vec<MaterialLine>,
}

impl ProjectTotals {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,
    pub settings: GlobalSettings,
    rooms: Vec<RoomEntry>,
}

impl Project {
    /// Create a new empty project for the given licensed identity.
    pub fn new(identity: impl Into<String>) -> Self {
        Project::with_settings(identity, GlobalSettings::default())
    }

    pub fn with_settings(identity: impl Into<String>, settings: GlobalSettings) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                identity: identity.into(),
                created: now,
                modified: now,
            },
            settings,
            rooms: Vec::new(),
        }
    }

    /// Append a room. Returns its position.
    pub fn add(&mut self, room: RoomEntry) -> usize {
        info!(room = %room.name, system = ?room.system, lines = room.lines.len(), "room added");
        self.rooms.push(room);
        self.touch();
        self.rooms.len() - 1
    }

    /// Calculate a room from `input` and append it.
    pub fn add_calculation(&mut self, name: impl Into<String>, input: RoomInput) -> CalcResult<usize> {
        let room = RoomEntry::calculate(name, input)?;
        Ok(self.add(room))
    }

    /// Remove the room at `index` (0-based).
    pub fn remove(&mut self, index: usize) -> CalcResult<RoomEntry> {
        if index >= self.rooms.len() {
            return Err(CalcError::index_out_of_range(index, self.rooms.len()));
        }
        let room = self.rooms.remove(index);
        info!(index, room = %room.name, "room removed");
        self.touch();
        Ok(room)
    }

    /// Remove every room.
    pub fn clear(&mut self) {
        info!(rooms = self.rooms.len(), "project cleared");
        self.rooms.clear();
        self.touch();
    }

    pub fn room(&self, index: usize) -> CalcResult<&RoomEntry> {
        self.rooms
            .get(index)
            .ok_or_else(|| CalcError::index_out_of_range(index, self.rooms.len()))
    }

    pub fn rooms(&self) -> &[RoomEntry] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Consolidate every room into one materials list.
    ///
    /// Lines are grouped by (material, unit) and their quantities summed. A
    /// material's category is the one it carried the first time it appeared,
    /// scanning rooms in insertion order. The result is sorted by
    /// (category, material).
    ///
    /// Sums saturate at `u64::MAX` instead of wrapping; validated rooms never
    /// get close, only hand-built entries can.
    pub fn totals(&self) -> ProjectTotals {
        let mut categories: HashMap<&str, &str> = HashMap::new();
        let mut sums: HashMap<(&str, &str), u64> = HashMap::new();

        for line in self.rooms.iter().flat_map(|room| room.lines.iter()) {
            categories.entry(line.material.as_str()).or_insert(line.category.as_str());
            let sum = sums.entry((line.material.as_str(), line.unit.as_str())).or_insert(0);
            *sum = sum.saturating_add(line.quantity);
        }

        let mut lines: Vec<MaterialLine> = sums
            .into_iter()
            .filter(|(_, quantity)| *quantity > 0)
            .map(|((material, unit), quantity)| {
                let category = categories.get(material).copied().unwrap_or_default();
                MaterialLine::new(category, material, unit, quantity)
            })
            .collect();

        lines.sort_by(|a, b| {
            (&a.category, &a.material, &a.unit).cmp(&(&b.category, &b.material, &b.unit))
        });

        ProjectTotals {
            room_count: self.rooms.len(),
            lines,
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("")
    }
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Licensed identity (email) the project belongs to
    pub identity: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Defaults applied to new room calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub spacing: Spacing,

    /// Waste allowance, 0-20 %
    pub waste_percent: u8,

    /// Boarded faces for partitions
    pub faces: u8,

    /// Boards per face
    pub layers: u8,

    pub ceiling_thickness: BoardThickness,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            spacing: Spacing::Cm40,
            waste_percent: 10,
            faces: 2,
            layers: 1,
            ceiling_thickness: BoardThickness::Mm9_5,
        }
    }
}
