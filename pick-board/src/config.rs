// Configuration loading and parsing (board.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const BOARD_FILE: &str = "board.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub database: DatabaseConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Replace the roster source location (e.g. from a `--source` flag).
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.data.source = source.into();
        self
    }
}

// ---------------------------------------------------------------------------
// board.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire board.toml file.
#[derive(Debug, Clone, Deserialize)]
struct BoardFile {
    data: DataConfig,
    database: DatabaseConfig,
    #[serde(default)]
    ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// CSV location: a filesystem path or an http(s) URL.
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file written by `pick-board import`.
    pub path: String,
    /// Destination table name for the import.
    pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub title: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            title: "Draft Picks".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/board.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let board_path = base_dir.join("config").join(BOARD_FILE);
    let board_text = read_file(&board_path)?;
    let board_file: BoardFile =
        toml::from_str(&board_text).map_err(|e| ConfigError::ParseError {
            path: board_path.clone(),
            source: e,
        })?;

    let config = Config {
        data: board_file.data,
        database: board_file.database,
        ui: board_file.ui,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/board.toml` from `defaults/board.toml` when the user has no
/// copy yet. Returns the path written, or `None` if an existing copy was kept.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let default_board = base_dir.join("defaults").join(BOARD_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(BOARD_FILE);

    if !default_board.is_file() {
        if target.is_file() {
            return Ok(None);
        }
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither defaults/{BOARD_FILE} nor config/{BOARD_FILE} found in {}; \
                 run from the crate root",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;

    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            })
        }
    };

    let content =
        std::fs::read(&default_board).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read {}: {e}", default_board.display()),
        })?;
    std::io::Write::write_all(&mut dest, &content).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;

    info!("Seeded {} from defaults", target.display());
    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// True if `name` is usable as an unquoted SQL table name.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let required: &[(&str, &str)] = &[
        ("data.source", &config.data.source),
        ("database.path", &config.database.path),
        ("ui.title", &config.ui.title),
    ];
    for (name, val) in required {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if !is_plain_identifier(&config.database.table) {
        return Err(ConfigError::ValidationError {
            field: "database.table".into(),
            message: format!(
                "must be a plain identifier (letters, digits, underscore), got {:?}",
                config.database.table
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Helper: returns the path to the pick-board crate root
    /// (works whether `cargo test` runs from the crate root or repo root).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("pick-board/defaults").exists() {
            cwd.join("pick-board")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    fn write_board(dir: &Path, contents: &str) {
        let config_dir = dir.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("board.toml"), contents).unwrap();
    }

    const VALID_BOARD: &str = r#"
[data]
source = "picks.csv"

[database]
path = "data/draft.sql"
table = "draft"

[ui]
title = "Test Board"
"#;

    #[test]
    fn load_default_board_config() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("defaults")).unwrap();
        fs::copy(
            project_root().join("defaults/board.toml"),
            tmp.path().join("defaults/board.toml"),
        )
        .unwrap();

        let copied = ensure_config_files(tmp.path()).expect("should copy default config");
        assert_eq!(copied, Some(tmp.path().join("config/board.toml")));

        let config = load_config_from(tmp.path()).expect("should load valid config");
        assert_eq!(config.data.source, "Steeler Picks.csv");
        assert_eq!(config.database.path, "data/draft.sql");
        assert_eq!(config.database.table, "draft");
        assert_eq!(config.ui.title, "Steelers Draft Picks");
    }

    #[test]
    fn ensure_config_files_keeps_existing_copy() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("defaults")).unwrap();
        fs::write(tmp.path().join("defaults/board.toml"), VALID_BOARD).unwrap();
        write_board(tmp.path(), "# user edited\n");

        let copied = ensure_config_files(tmp.path()).unwrap();
        assert!(copied.is_none());
        assert_eq!(
            fs::read_to_string(tmp.path().join("config/board.toml")).unwrap(),
            "# user edited\n"
        );
    }

    #[test]
    fn ensure_config_files_only_seeds_board_toml() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("defaults")).unwrap();
        fs::write(tmp.path().join("defaults/board.toml"), VALID_BOARD).unwrap();
        fs::write(tmp.path().join("defaults/notes.txt"), "not config").unwrap();

        ensure_config_files(tmp.path()).unwrap();
        let entries: Vec<_> = fs::read_dir(tmp.path().join("config"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("board.toml")]);

        // A second run keeps the seeded copy
        assert!(ensure_config_files(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn ensure_config_files_accepts_config_without_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        write_board(tmp.path(), VALID_BOARD);
        assert!(ensure_config_files(tmp.path()).unwrap().is_none());
        assert!(load_config_from(tmp.path()).is_ok());
    }

    #[test]
    fn ensure_config_files_errors_without_any_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ensure_config_files(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));
    }

    #[test]
    fn missing_board_toml_is_file_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_config_from(tmp.path()).unwrap_err();
        match err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("config/board.toml"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn ui_section_is_optional() {
        let tmp = tempfile::tempdir().unwrap();
        write_board(
            tmp.path(),
            "[data]\nsource = \"a.csv\"\n[database]\npath = \"x.db\"\ntable = \"t\"\n",
        );
        let config = load_config_from(tmp.path()).unwrap();
        assert_eq!(config.ui.title, "Draft Picks");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        write_board(tmp.path(), "[data\nsource = ");
        let err = load_config_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn empty_source_fails_validation() {
        let tmp = tempfile::tempdir().unwrap();
        write_board(tmp.path(), &VALID_BOARD.replace("picks.csv", "  "));
        let err = load_config_from(tmp.path()).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "data.source"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn table_name_must_be_identifier() {
        let tmp = tempfile::tempdir().unwrap();
        write_board(
            tmp.path(),
            &VALID_BOARD.replace("table = \"draft\"", "table = \"draft; DROP\""),
        );
        let err = load_config_from(tmp.path()).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "database.table"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn plain_identifier_rules() {
        assert!(is_plain_identifier("draft"));
        assert!(is_plain_identifier("_picks_2025"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("2025_draft"));
        assert!(!is_plain_identifier("draft table"));
        assert!(!is_plain_identifier("draft\"--"));
    }

    #[test]
    fn with_source_overrides_data_source() {
        let tmp = tempfile::tempdir().unwrap();
        write_board(tmp.path(), VALID_BOARD);
        let config = load_config_from(tmp.path())
            .unwrap()
            .with_source("https://example.com/picks.csv");
        assert_eq!(config.data.source, "https://example.com/picks.csv");
    }
}
