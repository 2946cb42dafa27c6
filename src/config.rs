//! Generator configuration, read from an optional `codenav.toml`.
//!
//! ```toml
//! base_dir = "/srv/code-navigator"
//! output = "dist/index.html"
//! strict_keys = true
//!
//! [[tables]]
//! name = "ModelCode"
//!
//! [[tables]]
//! name = "CodeChapter"
//! file = "chapters.json"
//!
//! [selectors]
//! chapter_list = "#librarySection #chapterList"
//! ```

use crate::hierarchy::DuplicateKeys;
use crate::page::Selectors;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tables a code navigator page is built from.
pub const DEFAULT_TABLES: &[&str] = &[
    "CodeType",
    "ModelCode",
    "ModelCodeVersion",
    "Discipline",
    "ModelCodeDiscipline",
    "CodeChapter",
    "Jurisdiction",
    "CodeContent",
    "CodeAttachment",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory the other relative paths are resolved against
    pub base_dir: PathBuf,
    pub schema: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    /// Fail on duplicate primary keys instead of keeping the last row
    pub strict_keys: bool,
    pub tables: Vec<TableSource>,
    pub selectors: Selectors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            schema: PathBuf::from("schema-meta.json"),
            template: PathBuf::from("reference.txt"),
            output: PathBuf::from("index.html"),
            strict_keys: false,
            tables: DEFAULT_TABLES.iter().map(|name| TableSource::new(name)).collect(),
            selectors: Selectors::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSource {
    pub name: String,
    /// Defaults to `<name>.json`
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl TableSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            file: None,
        }
    }

    pub fn file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", self.name)))
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Resolve `path` against `base_dir` unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn schema_path(&self) -> PathBuf {
        self.resolve(&self.schema)
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.template)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    pub fn duplicate_keys(&self) -> DuplicateKeys {
        if self.strict_keys {
            DuplicateKeys::Reject
        } else {
            DuplicateKeys::LastWins
        }
    }
}
