//! Library view model: one entry per model code, joined through the hierarchy.
//!
//! Rows of the tables this module knows are decoded into typed structs; the
//! joins themselves go through [`Hierarchy`] parent and child lookups.

use crate::hierarchy::{Hierarchy, HierarchyError};
use crate::icons::icon_for;
use crate::key::{Record, Scalar};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const MODEL_CODE: &str = "ModelCode";
pub const MODEL_CODE_VERSION: &str = "ModelCodeVersion";
pub const MODEL_CODE_DISCIPLINE: &str = "ModelCodeDiscipline";
pub const DISCIPLINE: &str = "Discipline";
pub const CODE_CHAPTER: &str = "CodeChapter";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unexpected row shape in `{table}`: {source}")]
    Row {
        table: &'static str,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

#[derive(Debug, Deserialize)]
struct ModelCodeRow {
    #[serde(rename = "ModelCodeID")]
    id: Value,
    #[serde(rename = "ModelCodeName", default)]
    name: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VersionRow {
    #[serde(rename = "ModelCodeVersionID")]
    id: Value,
    #[serde(rename = "Year", default)]
    year: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DisciplineRow {
    #[serde(rename = "DisciplineNameKR", default)]
    name_kr: Option<String>,
}

fn decode<T: DeserializeOwned>(table: &'static str, record: &Record) -> Result<T, CatalogError> {
    serde_json::from_value(Value::Object(record.clone()))
        .map_err(|source| CatalogError::Row { table, source })
}

/// Discipline badge shown in the card corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Building,
    Fire,
}

impl Badge {
    fn for_discipline(name: &str) -> Self {
        if name.contains("소방") || name.contains("안전") {
            Self::Fire
        } else {
            Self::Building
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Building => "#A8D0E6",
            Self::Fire => "#F76C6C",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Building => "건축·구조",
            Self::Fire => "소방",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LibraryEntry {
    pub code_id: String,
    pub code_name: String,
    pub description: String,
    /// Short code name plus the latest edition year, e.g. `IBC 2024`
    pub display_name: String,
    pub version_id: Option<String>,
    pub discipline: Option<String>,
    pub badge: Badge,
    pub icon: &'static str,
    /// Chapters of the latest version
    pub chapter_count: usize,
}

impl LibraryEntry {
    /// Only codes whose latest version has chapters can be opened.
    pub fn is_active(&self) -> bool {
        self.version_id.is_some() && self.chapter_count > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub entries: Vec<LibraryEntry>,
}

impl Catalog {
    /// One entry per `ModelCode` row, in table order.
    pub fn build(hierarchy: &Hierarchy) -> Result<Self, CatalogError> {
        let entries = hierarchy
            .rows(MODEL_CODE)
            .iter()
            .map(|record| build_entry(hierarchy, record))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            codes = entries.len(),
            active = entries.iter().filter(|e| e.is_active()).count(),
            "library catalog built"
        );
        Ok(Self { entries })
    }

    pub fn active(&self) -> impl Iterator<Item = &LibraryEntry> {
        self.entries.iter().filter(|e| e.is_active())
    }
}

fn build_entry(hierarchy: &Hierarchy, record: &Record) -> Result<LibraryEntry, CatalogError> {
    let code: ModelCodeRow = decode(MODEL_CODE, record)?;
    let code_name = code.name.unwrap_or_default();

    let discipline = find_discipline(hierarchy, record)?;
    let badge = discipline
        .as_deref()
        .map(Badge::for_discipline)
        .unwrap_or(Badge::Building);

    let (version_id, year, chapter_count) = match latest_version(hierarchy, record)? {
        Some((version_record, version)) => {
            let chapters = hierarchy
                .children_in(MODEL_CODE_VERSION, version_record, CODE_CHAPTER)
                .len();
            (Some(value_text(&version.id)), year_of(&version), chapters)
        }
        None => (None, 0, 0),
    };

    Ok(LibraryEntry {
        code_id: value_text(&code.id),
        display_name: display_name(&code_name, year),
        icon: icon_for(&code_name),
        code_name,
        description: code.description.unwrap_or_default(),
        version_id,
        discipline,
        badge,
        chapter_count,
    })
}

/// First linked discipline that resolves to a `Discipline` row.
fn find_discipline(hierarchy: &Hierarchy, code: &Record) -> Result<Option<String>, CatalogError> {
    for link in hierarchy.children_in(MODEL_CODE, code, MODEL_CODE_DISCIPLINE) {
        if let Some(discipline) = hierarchy.get_related(MODEL_CODE_DISCIPLINE, link, DISCIPLINE)? {
            let row: DisciplineRow = decode(DISCIPLINE, discipline)?;
            return Ok(Some(row.name_kr.unwrap_or_default()));
        }
    }
    Ok(None)
}

/// The version with the greatest year; a missing year counts as 0 and the
/// first of equal years wins.
fn latest_version<'a>(
    hierarchy: &'a Hierarchy,
    code: &Record,
) -> Result<Option<(&'a Record, VersionRow)>, CatalogError> {
    let mut latest: Option<(&Record, VersionRow)> = None;
    for record in hierarchy.children_in(MODEL_CODE, code, MODEL_CODE_VERSION) {
        let version: VersionRow = decode(MODEL_CODE_VERSION, record)?;
        let newer = match &latest {
            Some((_, best)) => year_value(&version) > year_value(best),
            None => true,
        };
        if newer {
            latest = Some((record, version));
        }
    }
    Ok(latest)
}

fn year_value(version: &VersionRow) -> f64 {
    match &version.year {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn year_of(version: &VersionRow) -> i64 {
    year_value(version).trunc() as i64
}

/// `IBC: International Building Code` with year 2024 becomes `IBC 2024`.
pub fn display_name(code_name: &str, year: i64) -> String {
    let short = code_name.split(':').next().unwrap_or_default().trim();
    if year != 0 {
        format!("{} {}", short, year)
    } else {
        short.to_string()
    }
}

/// Render an id value the way it appears in attributes: strings verbatim,
/// integral numbers without a fraction (`7.0` as `7`), null as empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(_) => match Scalar::from_json(value) {
            Some(Scalar::Int(i)) => i.to_string(),
            Some(Scalar::UInt(u)) => u.to_string(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use serde_json::json;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("IBC: International Building Code", 2024), "IBC 2024");
        assert_eq!(display_name("NEC", 0), "NEC");
        assert_eq!(display_name("  ADA : Standards ", 0), "ADA");
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("V-1")), "V-1");
        assert_eq!(value_text(&json!(7)), "7");
        assert_eq!(value_text(&json!(7.0)), "7");
        assert_eq!(value_text(&json!(7.5)), "7.5");
        assert_eq!(value_text(&json!(null)), "");
    }

    #[test]
    fn test_catalog_entries() {
        let hierarchy = fixtures::navigator();
        let catalog = Catalog::build(&hierarchy).unwrap();
        assert_eq!(catalog.entries.len(), 4);

        let ibc = &catalog.entries[0];
        assert_eq!(ibc.code_id, "MC1");
        assert_eq!(ibc.display_name, "IBC 2024");
        assert_eq!(ibc.version_id.as_deref(), Some("V2"));
        assert_eq!(ibc.discipline.as_deref(), Some("건축"));
        assert_eq!(ibc.badge, Badge::Building);
        assert_eq!(ibc.chapter_count, 2);
        assert!(ibc.is_active());

        let nfpa = &catalog.entries[1];
        assert_eq!(nfpa.display_name, "NFPA 13 2025");
        assert_eq!(nfpa.badge, Badge::Fire);
        assert_eq!(nfpa.badge.text(), "소방");
        assert!(nfpa.is_active());
    }

    #[test]
    fn test_inactive_entries() {
        let hierarchy = fixtures::navigator();
        let catalog = Catalog::build(&hierarchy).unwrap();

        let ada = &catalog.entries[2];
        assert_eq!(ada.display_name, "ADA");
        assert!(ada.version_id.is_none());
        assert!(ada.discipline.is_none());
        assert!(!ada.is_active());

        let nec = &catalog.entries[3];
        assert_eq!(nec.display_name, "NEC");
        assert_eq!(nec.version_id.as_deref(), Some("V4"));
        assert!(!nec.is_active());

        let active: Vec<&str> = catalog.active().map(|e| e.code_id.as_str()).collect();
        assert_eq!(active, vec!["MC1", "MC2"]);
    }

    #[test]
    fn test_bad_row_shape() {
        let mut data = fixtures::navigator_data();
        data.get_mut(MODEL_CODE)
            .unwrap()
            .push(json!({"ModelCodeName": "No id"}).as_object().cloned().unwrap());
        let hierarchy = Hierarchy::new(fixtures::navigator_schema(), data).unwrap();
        assert!(matches!(
            Catalog::build(&hierarchy),
            Err(CatalogError::Row { table: MODEL_CODE, .. })
        ));
    }
}
