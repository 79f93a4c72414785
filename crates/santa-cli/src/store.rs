//! File locations and the on-disk assignment record.

use anyhow::{Context, Result};
use santa_core::{Assignment, AssignmentSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable overriding the roster path
pub const ROSTER_ENV: &str = "SANTA_ROSTER";
/// Environment variable overriding the assignments path
pub const DATA_ENV: &str = "SANTA_DATA";

/// Roster path: `$SANTA_ROSTER`, else the platform config dir
pub fn default_roster_path() -> PathBuf {
    if let Ok(path) = std::env::var(ROSTER_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("santa_roster.json")
}

/// Assignments path: `$SANTA_DATA`, else the platform local data dir
pub fn default_assignments_path() -> PathBuf {
    if let Ok(path) = std::env::var(DATA_ENV) {
        return PathBuf::from(path);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("santa_assignments.json")
}

/// A saved draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Unix timestamp of the draw
    pub generated_at: u64,
    /// Seed passed on the command line, if any
    #[serde(default)]
    pub seed: Option<u64>,
    pub assignments: Vec<Assignment>,
}

impl AssignmentRecord {
    pub fn new(set: AssignmentSet, seed: Option<u64>) -> Self {
        let generated_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            generated_at,
            seed,
            assignments: set.into_edges(),
        }
    }

    pub fn assignment_set(&self) -> AssignmentSet {
        AssignmentSet::new(self.assignments.clone())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read assignments from {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("invalid assignments file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write assignments to {}", path.display()))
    }
}
