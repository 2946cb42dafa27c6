//! Schema manifest model and the relationship table derived from it.
//!
//! Manifest shape:
//!
//! ```json
//! { "tables": { "Child": { "pk": ["id"],
//!     "fks": [ { "columns": ["parent_id"], "ref": { "table": "Parent", "columns": ["id"] } } ] } } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Malformed schema manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Schema manifest has no `tables` object")]
    MissingTables,
    #[error("Table `{table}`: {source}")]
    InvalidTable {
        table: String,
        source: serde_json::Error,
    },
    #[error("Table `{table}`, foreign key #{index}: {source}")]
    InvalidForeignKey {
        table: String,
        index: usize,
        source: serde_json::Error,
    },
    #[error("Table `{0}` declares an empty primary key")]
    EmptyPrimaryKey(String),
    #[error("Table `{table}`, foreign key #{index}: no local columns")]
    EmptyForeignKey { table: String, index: usize },
    #[error(
        "Table `{table}`, foreign key #{index}: {local} local column(s) but {referenced} referenced column(s)"
    )]
    ColumnCountMismatch {
        table: String,
        index: usize,
        local: usize,
        referenced: usize,
    },
    #[error("Table `{table}`, foreign key #{index}: references unknown table `{target}`")]
    UnknownTable {
        table: String,
        index: usize,
        target: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyDef {
    /// Optional label used to tell apart several keys into the same table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub columns: Vec<String>,
    #[serde(rename = "ref")]
    pub reference: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub pk: Vec<String>,
    pub fks: Vec<ForeignKeyDef>,
}

#[derive(Deserialize)]
struct RawTable {
    pk: Vec<String>,
    #[serde(default)]
    fks: Vec<Value>,
}

/// Parsed manifest. Table order follows the manifest.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    tables: Vec<TableSchema>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    pub fn from_json(input: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Parse a manifest value. Every foreign key entry is decoded on its own
    /// so a malformed one is reported with its table and position.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let Value::Object(mut root) = value else {
            return Err(SchemaError::MissingTables);
        };
        let Some(Value::Object(entries)) = root.remove("tables") else {
            return Err(SchemaError::MissingTables);
        };

        let mut schema = Self::default();
        for (name, entry) in entries {
            let raw: RawTable =
                serde_json::from_value(entry).map_err(|source| SchemaError::InvalidTable {
                    table: name.clone(),
                    source,
                })?;

            if raw.pk.is_empty() {
                return Err(SchemaError::EmptyPrimaryKey(name));
            }

            let fks = raw
                .fks
                .into_iter()
                .enumerate()
                .map(|(index, fk)| {
                    serde_json::from_value::<ForeignKeyDef>(fk).map_err(|source| {
                        SchemaError::InvalidForeignKey {
                            table: name.clone(),
                            index,
                            source,
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            schema.push(TableSchema {
                name,
                pk: raw.pk,
                fks,
            });
        }

        Ok(schema)
    }

    fn push(&mut self, table: TableSchema) {
        self.by_name.insert(table.name.clone(), self.tables.len());
        self.tables.push(table);
    }

    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.by_name.get(name).map(|&i| &self.tables[i])
    }

    pub fn primary_key(&self, table: &str) -> Option<&[String]> {
        self.table(table).map(|t| t.pk.as_slice())
    }

    pub fn contains(&self, table: &str) -> bool {
        self.by_name.contains_key(table)
    }
}

/// Position of a relationship in manifest order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipId(usize);

impl RelationshipId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed edge `table(columns) -> ref_table(ref_columns)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: RelationshipId,
    pub name: Option<String>,
    pub table: String,
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
}

impl Relationship {
    /// Human-readable identity, e.g. `Child(parent_id) -> Parent(id)`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!(
                "{}({}) -> {}({})",
                self.table,
                self.columns.join(", "),
                self.ref_table,
                self.ref_columns.join(", ")
            ),
        }
    }
}

/// Normalized relationship table, indexed both by owning and by referenced table.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    all: Vec<Relationship>,
    outgoing: BTreeMap<String, Vec<RelationshipId>>,
    incoming: BTreeMap<String, Vec<RelationshipId>>,
}

impl Relationships {
    /// Emit one relationship per declared foreign key, in manifest order.
    pub fn build(schema: &Schema) -> Result<Self, SchemaError> {
        let mut rels = Self::default();

        for table in schema.tables() {
            for (index, fk) in table.fks.iter().enumerate() {
                if fk.columns.is_empty() {
                    return Err(SchemaError::EmptyForeignKey {
                        table: table.name.clone(),
                        index,
                    });
                }
                if fk.columns.len() != fk.reference.columns.len() {
                    return Err(SchemaError::ColumnCountMismatch {
                        table: table.name.clone(),
                        index,
                        local: fk.columns.len(),
                        referenced: fk.reference.columns.len(),
                    });
                }
                let Some(target) = schema.table(&fk.reference.table) else {
                    return Err(SchemaError::UnknownTable {
                        table: table.name.clone(),
                        index,
                        target: fk.reference.table.clone(),
                    });
                };
                if target.pk != fk.reference.columns {
                    tracing::warn!(
                        table = %table.name,
                        target = %target.name,
                        "foreign key #{} references {:?}, not the primary key {:?}; lookups use the primary key",
                        index,
                        fk.reference.columns,
                        target.pk
                    );
                }

                let id = RelationshipId(rels.all.len());
                rels.all.push(Relationship {
                    id,
                    name: fk.name.clone(),
                    table: table.name.clone(),
                    columns: fk.columns.clone(),
                    ref_table: fk.reference.table.clone(),
                    ref_columns: fk.reference.columns.clone(),
                });
                rels.outgoing.entry(table.name.clone()).or_default().push(id);
                rels.incoming
                    .entry(fk.reference.table.clone())
                    .or_default()
                    .push(id);
            }
        }

        Ok(rels)
    }

    pub fn get(&self, id: RelationshipId) -> &Relationship {
        &self.all[id.0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relationship> {
        self.all.iter()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Number of tables declaring at least one foreign key.
    pub fn source_table_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Relationships owned by `table`, in declaration order.
    pub fn outgoing(&self, table: &str) -> Vec<&Relationship> {
        self.resolve(self.outgoing.get(table))
    }

    /// Relationships pointing at `table`, in manifest order.
    pub fn incoming(&self, table: &str) -> Vec<&Relationship> {
        self.resolve(self.incoming.get(table))
    }

    /// Every relationship from `table` to `target`.
    pub fn between(&self, table: &str, target: &str) -> Vec<&Relationship> {
        self.outgoing(table)
            .into_iter()
            .filter(|r| r.ref_table == target)
            .collect()
    }

    /// The relationship from `table` to `target` over exactly `columns`.
    pub fn find(&self, table: &str, target: &str, columns: &[&str]) -> Option<&Relationship> {
        self.outgoing(table)
            .into_iter()
            .find(|r| r.ref_table == target && r.columns.iter().eq(columns.iter().copied()))
    }

    fn resolve(&self, ids: Option<&Vec<RelationshipId>>) -> Vec<&Relationship> {
        ids.map(|ids| ids.iter().map(|&id| self.get(id)).collect())
            .unwrap_or_default()
    }
}
