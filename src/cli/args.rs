//! CLI argument definitions for `NuBoard`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nu_board::config::ConfigOverrides;
use nu_board::core::ids::IdStrategy;
use nu_board::core::models::BoardType;
use nu_board::core::payload::SubjectShape;
use nu_board::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `drafts_dir`, `target_policy`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum BoardSubcommand {
    /// Add an empty board for a curriculum type.
    Add {
        /// Board type: core, pe, skill, english, philosophy, custom
        #[arg(value_name = "TYPE")]
        board_type: BoardType,
    },
}

#[derive(Debug, Subcommand)]
pub enum SemesterSubcommand {
    /// Append the next semester column to a board.
    Add {
        /// Board id
        #[arg(value_name = "BOARD")]
        board: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ColumnSubcommand {
    /// Delete a column and every placement in it.
    Remove {
        /// Board id
        #[arg(value_name = "BOARD")]
        board: String,
        /// Column id
        #[arg(value_name = "COLUMN")]
        column: String,
    },
    /// Rename a column.
    Rename {
        /// Board id
        #[arg(value_name = "BOARD")]
        board: String,
        /// Column id
        #[arg(value_name = "COLUMN")]
        column: String,
        /// New title
        #[arg(value_name = "TITLE")]
        title: String,
    },
    /// Move a column to a new position within its board.
    Move {
        /// Board id
        #[arg(value_name = "BOARD")]
        board: String,
        /// Column id
        #[arg(value_name = "COLUMN")]
        column: String,
        /// Destination index (clamped; out of range appends)
        #[arg(value_name = "INDEX")]
        index: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubjectSubcommand {
    /// Place catalog subjects at the end of a column.
    Add {
        /// Board id
        #[arg(value_name = "BOARD")]
        board: String,
        /// Column id
        #[arg(value_name = "COLUMN")]
        column: String,
        /// Catalog subject ids
        #[arg(value_name = "SUBJECTS", num_args = 1..)]
        subjects: Vec<String>,
    },
    /// Remove a placement from a column.
    Remove {
        /// Board id
        #[arg(value_name = "BOARD")]
        board: String,
        /// Column id
        #[arg(value_name = "COLUMN")]
        column: String,
        /// Placement id
        #[arg(value_name = "PLACEMENT")]
        placement: String,
    },
    /// Move a placement within its column or into another column.
    Move {
        /// Placement id
        #[arg(value_name = "PLACEMENT")]
        placement: String,
        /// Destination column id
        #[arg(value_name = "COLUMN")]
        to_column: String,
        /// Destination index (defaults to the end of the column)
        #[arg(long, value_name = "INDEX")]
        index: Option<usize>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrereqSubcommand {
    /// Set the prerequisites of a placement, adding missing ones to the previous semester.
    Set {
        /// Placement id
        #[arg(value_name = "PLACEMENT")]
        placement: String,
        /// Catalog subject ids
        #[arg(value_name = "SUBJECTS", num_args = 1..)]
        subjects: Vec<String>,
    },
    /// Remove every prerequisite from a placement.
    Clear {
        /// Placement id
        #[arg(value_name = "PLACEMENT")]
        placement: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Start a new, empty curriculum draft.
    New {
        /// Draft file, or a bare name stored under the configured drafts directory
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
        /// Curriculum name
        #[arg(long, value_name = "NAME")]
        name: String,
        /// Curriculum code
        #[arg(long, value_name = "CODE", default_value = "")]
        code: String,
        /// Curriculum id (defaults to the draft name)
        #[arg(long, value_name = "ID")]
        id: Option<String>,
        /// Overwrite an existing draft
        #[arg(long)]
        force: bool,
    },
    /// Print the boards, columns and placements of a draft.
    Show {
        /// Draft file or name
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
    },
    /// Manage boards.
    Board {
        /// Draft file or name
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
        #[command(subcommand)]
        subcommand: BoardSubcommand,
    },
    /// Manage semester columns.
    Semester {
        /// Draft file or name
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
        #[command(subcommand)]
        subcommand: SemesterSubcommand,
    },
    /// Remove, rename or reorder columns.
    Column {
        /// Draft file or name
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
        #[command(subcommand)]
        subcommand: ColumnSubcommand,
    },
    /// Add, remove or move subject placements.
    Subject {
        /// Draft file or name
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
        #[command(subcommand)]
        subcommand: SubjectSubcommand,
    },
    /// Attach or clear prerequisites.
    Prereq {
        /// Draft file or name
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
        #[command(subcommand)]
        subcommand: PrereqSubcommand,
    },
    /// Search the catalog for subjects not yet placed in the draft.
    Search {
        /// Draft file or name
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
        /// Text matched against subject id and name
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
        /// Restrict to a department
        #[arg(long, value_name = "DEPT")]
        department: Option<String>,
    },
    /// Write the save payload for a draft.
    Export {
        /// Draft file or name
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
        /// Subject shape: rich or simplified
        #[arg(long, value_name = "SHAPE", default_value = "rich")]
        shape: SubjectShape,
        /// Output file (prints to stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Summarize a bulk-import response.
    ImportSummary {
        /// JSON response body
        #[arg(value_name = "FILE")]
        input_file: PathBuf,
    },
    /// Generate a board report for a draft.
    Report {
        /// Draft file or name
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
        /// Output file path (optional; defaults to the reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Report format: markdown (md)
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "nuboard",
    about = "NuBoard curriculum board editor",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config drafts directory
    #[arg(long = "config-drafts-dir", value_name = "DIR")]
    pub config_drafts_dir: Option<PathBuf>,

    /// Override config drafts directory (short form)
    #[arg(long = "drafts-dir", value_name = "DIR")]
    pub drafts_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config catalog file
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Override config id strategy (uuid|sequential)
    #[arg(long = "id-strategy", value_name = "STRATEGY")]
    pub id_strategy: Option<IdStrategy>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--drafts-dir`) take precedence over long-form
    /// flags (e.g., `--config-drafts-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            drafts_dir: path_string(self.drafts_dir.as_ref())
                .or_else(|| path_string(self.config_drafts_dir.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref()),
            catalog_file: path_string(self.catalog.as_ref()),
            id_strategy: self.id_strategy,
        }
    }
}
