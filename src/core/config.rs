//! Configuration module for `NuBoard`

use crate::core::ids::IdStrategy;
use crate::core::options::{EditorConfig, TargetColumnPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside config values
const DIR_VARIABLE: &str = "$NU_BOARD";

const fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory where draft files are kept
    #[serde(default)]
    pub drafts_dir: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
    /// Default subject catalog (JSON) used for search
    #[serde(default)]
    pub catalog_file: String,
}

/// Editing policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Where auto-inserted prerequisites go when the target semester has no column
    #[serde(default)]
    pub target_policy: TargetColumnPolicy,
    /// Reject prerequisites that would form a cycle
    #[serde(default = "default_true")]
    pub reject_cycles: bool,
    /// Refuse to remove columns holding prerequisites of other subjects
    #[serde(default)]
    pub guard_column_removal: bool,
    /// Id generator (`uuid` or `sequential`)
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl Default for EditorSettings {
    fn default() -> Self {
        let defaults = EditorConfig::default();
        Self {
            target_policy: defaults.target_policy,
            reject_cycles: defaults.reject_cycles,
            guard_column_removal: defaults.guard_column_removal,
            id_strategy: defaults.id_strategy,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Editing policies
    #[serde(default)]
    pub editor: EditorSettings,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override drafts directory
    pub drafts_dir: Option<String>,
    /// Override reports directory
    pub reports_dir: Option<String>,
    /// Override catalog file
    pub catalog_file: Option<String>,
    /// Override id strategy
    pub id_strategy: Option<IdStrategy>,
}

impl Config {
    /// Get the `$NU_BOARD` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/nuboard`
    /// - macOS: `~/Library/Application Support/nuboard`
    /// - Windows: `%APPDATA%\nuboard`
    #[must_use]
    pub fn get_nuboard_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nuboard")
    }

    /// Library-facing editing policies
    #[must_use]
    pub const fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            target_policy: self.editor.target_policy,
            reject_cycles: self.editor.reject_cycles,
            guard_column_removal: self.editor.guard_column_removal,
            id_strategy: self.editor.id_strategy,
        }
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled; editor switches always carry a value once parsed.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        let pairs = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.drafts_dir, &defaults.paths.drafts_dir),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            (&mut self.paths.catalog_file, &defaults.paths.catalog_file),
        ];
        for (field, default) in pairs {
            if field.is_empty() && !default.is_empty() {
                field.clone_from(default);
                changed = true;
            }
        }
        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(drafts_dir) = &overrides.drafts_dir {
            self.paths.drafts_dir.clone_from(drafts_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(catalog_file) = &overrides.catalog_file {
            self.paths.catalog_file.clone_from(catalog_file);
        }
        if let Some(strategy) = overrides.id_strategy {
            self.editor.id_strategy = strategy;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_nuboard_dir`](Self::get_nuboard_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_nuboard_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$NU_BOARD` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_nuboard_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$NU_BOARD` is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.drafts_dir = Self::expand_variables(&config.paths.drafts_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.catalog_file = Self::expand_variables(&config.paths.catalog_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled into the binary, so this cannot happen at runtime.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// An existing file is merged with any newly added defaults and re-saved.
    /// Any read or parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        match Self::load_from(&config_file) {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Err(_) => defaults,
        }
    }

    /// Read a config file at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration as TOML to `path`, creating parent directories
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `drafts_dir`, `reports_dir`,
    /// `catalog_file`, `target_policy`, `reject_cycles`, `guard_column_removal`,
    /// `id_strategy` (dashes accepted in place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "drafts_dir" => Some(self.paths.drafts_dir.clone()),
            "reports_dir" => Some(self.paths.reports_dir.clone()),
            "catalog_file" => Some(self.paths.catalog_file.clone()),
            "target_policy" => Some(self.editor.target_policy.to_string()),
            "reject_cycles" => Some(self.editor.reject_cycles.to_string()),
            "guard_column_removal" => Some(self.editor.guard_column_removal.to_string()),
            "id_strategy" => Some(self.editor.id_strategy.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let parse_bool = |name: &str| {
            value
                .parse::<bool>()
                .map_err(|_| format!("Invalid boolean value for '{name}': '{value}'"))
        };
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool("verbose")?,
            "drafts_dir" => self.paths.drafts_dir = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "catalog_file" => self.paths.catalog_file = value.to_string(),
            "target_policy" => self.editor.target_policy = value.parse()?,
            "reject_cycles" => self.editor.reject_cycles = parse_bool("reject_cycles")?,
            "guard_column_removal" => {
                self.editor.guard_column_removal = parse_bool("guard_column_removal")?;
            }
            "id_strategy" => self.editor.id_strategy = value.parse()?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to the value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "drafts_dir" => self.paths.drafts_dir.clone_from(&defaults.paths.drafts_dir),
            "reports_dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "catalog_file" => self
                .paths
                .catalog_file
                .clone_from(&defaults.paths.catalog_file),
            "target_policy" => self.editor.target_policy = defaults.editor.target_policy,
            "reject_cycles" => self.editor.reject_cycles = defaults.editor.reject_cycles,
            "guard_column_removal" => {
                self.editor.guard_column_removal = defaults.editor.guard_column_removal;
            }
            "id_strategy" => self.editor.id_strategy = defaults.editor.id_strategy,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  drafts_dir = \"{}\"", self.paths.drafts_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  catalog_file = \"{}\"", self.paths.catalog_file)?;

        writeln!(f, "\n[editor]")?;
        writeln!(f, "  target_policy = \"{}\"", self.editor.target_policy)?;
        writeln!(f, "  reject_cycles = {}", self.editor.reject_cycles)?;
        writeln!(
            f,
            "  guard_column_removal = {}",
            self.editor.guard_column_removal
        )?;
        writeln!(f, "  id_strategy = \"{}\"", self.editor.id_strategy)?;

        Ok(())
    }
}
