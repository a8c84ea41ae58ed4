//! Configuration types for statusboard.
//!
//! [`Config::load`] layers an optional TOML file and `STATUSBOARD__*`
//! environment variables on top of the embedded defaults.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).

use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[source]
workbook     = "Team Daily Status.xlsx"
status_sheet = "2026"
tracked_year = 2026

[ledger]
name_column     = "Name of project"
tracking_column = "JIRA"
tabs = [
    { sheet = "3D Project Ledger",         category = "three_d" },
    { sheet = "WEB-Shell--Project Ledger", category = "web_shell" },
    { sheet = "LNOO Venues",               category = "lnoo" },
    { sheet = "PDA Venues",                category = "pda" },
    { sheet = "Connected Camera Venuer",   category = "connected_cam" },
]
synonyms = [
    { from = "Jira Link",        to = "JIRA" },
    { from = "Jira",             to = "JIRA" },
    { from = "Web Shell update", to = "Name of project" },
    { from = "Project",          to = "Name of project" },
]

[status]
missing_marker     = "nan"
header_label       = "Member"
note_marker        = "Note:"
default_attendance = "Out"
default_status     = "In Process"

[status.columns]
marker          = 0
team_lead       = 1
member          = 2
attendance      = 3
project_archive = 4
project_name    = 5
project_status  = 10
comments        = 11

[vocabulary]
attendance     = ["Present", "Out", "Half Day", "WFH", "Leave"]
project_status = ["In Process", "Completed", "On Hold", "Blocked", "In Review"]
task_category  = ["Modeling", "Texturing", "Rigging", "Lighting", "Rendering", "QA"]
"#;

const ENV_PREFIX: &str = "STATUSBOARD";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub ledger: LedgerConfig,
    pub status: StatusConfig,
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

/// `[source]` section: where the workbook lives and which tab is the status tab.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub workbook: PathBuf,
    pub status_sheet: String,
    /// Only date headers in this year start a status section.
    pub tracked_year: i32,
}

/// `[ledger]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Tabs in precedence order; ledger rows are concatenated in this order.
    pub tabs: Vec<LedgerTab>,
    pub name_column: String,
    pub tracking_column: String,
    /// Header renames applied to every tab, in order.
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerTab {
    pub sheet: String,
    pub category: Category,
    /// Extra renames for this tab only, applied after the shared ones.
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
}

/// Rename header `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Synonym {
    pub from: String,
    pub to: String,
}

/// `[status]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    pub missing_marker: String,
    pub header_label: String,
    pub note_marker: String,
    pub default_attendance: String,
    pub default_status: String,
    pub columns: StatusColumns,
}

/// Fixed column positions in the status tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatusColumns {
    /// Holds date headers and `Note:` annotations.
    pub marker: usize,
    pub team_lead: usize,
    pub member: usize,
    pub attendance: usize,
    pub project_archive: usize,
    pub project_name: usize,
    pub project_status: usize,
    pub comments: usize,
}

impl StatusColumns {
    /// Minimum row width every status row is padded to before extraction.
    pub fn width(&self) -> usize {
        [
            self.marker,
            self.team_lead,
            self.member,
            self.attendance,
            self.project_archive,
            self.project_name,
            self.project_status,
            self.comments,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// `[vocabulary]` section: suggested values for editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub attendance: Vec<String>,
    #[serde(default)]
    pub project_status: Vec<String>,
    #[serde(default)]
    pub task_category: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration, layered on top of the built-in defaults.
    ///
    /// When `path` is given the file must exist. Environment variables of the
    /// form `STATUSBOARD__SOURCE__WORKBOOK` override both.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Same configuration, reading from `workbook` instead.
    pub fn with_workbook(mut self, workbook: impl Into<PathBuf>) -> Self {
        self.source.workbook = workbook.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
