//! Reading the manifest, table dumps and template from disk.

use crate::config::TableSource;
use crate::hierarchy::Dataset;
use crate::key::Record;
use crate::schema::{Schema, SchemaError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid schema {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        source: SchemaError,
    },
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_schema(path: &Path) -> Result<Schema, LoadError> {
    tracing::info!("Loading schema from {}", path.display());
    Schema::from_json(&read(path)?).map_err(|source| LoadError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

/// Load one table dump: a JSON array of objects.
pub fn load_table(path: &Path) -> Result<Vec<Record>, LoadError> {
    serde_json::from_str(&read(path)?).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every configured table from `base_dir`. The first missing or
/// malformed file aborts the load.
pub fn load_dataset(base_dir: &Path, sources: &[TableSource]) -> Result<Dataset, LoadError> {
    let mut data = Dataset::new();
    for source in sources {
        let file = source.file();
        let path = if file.is_absolute() {
            file
        } else {
            base_dir.join(file)
        };
        tracing::info!(table = %source.name, "Loading {}", path.display());
        let records = load_table(&path)?;
        tracing::debug!(table = %source.name, rows = records.len(), "loaded table");
        data.insert(source.name.clone(), records);
    }
    Ok(data)
}

/// Parse a whole dataset given as one JSON object of table name to record array.
pub fn parse_dataset(input: &str) -> Result<Dataset, serde_json::Error> {
    serde_json::from_str(input)
}

pub fn load_template(path: &Path) -> Result<String, LoadError> {
    tracing::info!("Loading template {}", path.display());
    read(path)
}

pub fn write_output(path: &Path, html: &str) -> Result<(), LoadError> {
    tracing::info!(bytes = html.len(), "Writing HTML to {}", path.display());
    fs::write(path, html).map_err(|source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    })
}
