//! Schema-driven relational index over in-memory tables.
//!
//! A [`Hierarchy`] owns the raw tables, the relationship table derived from the
//! schema, one primary-key index per table and one reverse (foreign key to
//! child rows) index per relationship. Everything is built once in the
//! constructor; queries are plain reads that borrow into it.

use crate::key::{Key, Record};
use crate::schema::{Relationship, RelationshipId, Relationships, Schema, SchemaError};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// Raw table data: table name to its records, in file order.
pub type Dataset = BTreeMap<String, Vec<Record>>;

/// Result of a child lookup: child table to matching records. Never holds an
/// empty list.
pub type Children<'a> = BTreeMap<&'a str, Vec<&'a Record>>;

#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Duplicate primary key {key} in table `{table}`")]
    DuplicateKey { table: String, key: Key },
    #[error(
        "`{table}` references `{target}` through {} foreign keys ({}); select one explicitly",
        .candidates.len(),
        .candidates.join("; ")
    )]
    AmbiguousRelationship {
        table: String,
        target: String,
        candidates: Vec<String>,
    },
}

/// What to do when two records of a table share a primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// The later record replaces the earlier one in the index
    #[default]
    LastWins,
    /// Construction fails
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub rows: usize,
    /// Distinct keys in the index
    pub indexed: usize,
    /// Rows with no usable primary key
    pub unindexed: usize,
    /// Rows whose key was already present
    pub duplicates: usize,
}

#[derive(Debug, Default)]
struct PrimaryIndex {
    by_key: HashMap<Key, usize>,
    stats: TableStats,
}

#[derive(Debug)]
pub struct Hierarchy {
    schema: Schema,
    data: Dataset,
    relationships: Relationships,
    indexes: HashMap<String, PrimaryIndex>,
    /// Indexed by `RelationshipId`: foreign key to child row positions
    reverse: Vec<HashMap<Key, Vec<usize>>>,
}

impl Hierarchy {
    pub fn new(schema: Schema, data: Dataset) -> Result<Self, HierarchyError> {
        Self::with_options(schema, data, DuplicateKeys::default())
    }

    pub fn with_options(
        schema: Schema,
        data: Dataset,
        duplicates: DuplicateKeys,
    ) -> Result<Self, HierarchyError> {
        let relationships = Relationships::build(&schema)?;
        let indexes = build_indexes(&schema, &data, duplicates)?;
        let reverse = build_reverse(&relationships, &data);

        tracing::info!(
            tables = indexes.len(),
            relationships = relationships.len(),
            "data hierarchy built with {} table relationships",
            relationships.source_table_count()
        );

        Ok(Self {
            schema,
            data,
            relationships,
            indexes,
            reverse,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn tables(&self) -> &Dataset {
        &self.data
    }

    pub fn table(&self, name: &str) -> Option<&[Record]> {
        self.data.get(name).map(Vec::as_slice)
    }

    /// Records of `name`, or nothing when the table was not loaded.
    pub fn rows(&self, name: &str) -> &[Record] {
        self.table(name).unwrap_or_default()
    }

    pub fn stats(&self, table: &str) -> Option<TableStats> {
        self.indexes.get(table).map(|i| i.stats)
    }

    /// Primary-key lookup within `table`.
    pub fn lookup(&self, table: &str, key: &Key) -> Option<&Record> {
        let pos = *self.indexes.get(table)?.by_key.get(key)?;
        self.data.get(table)?.get(pos)
    }

    /// The record `record` (from `table`) points to in `target`.
    ///
    /// `Ok(None)` when no foreign key from `table` targets `target`, when the
    /// key columns are missing or falsy, or when nothing matches. Several
    /// foreign keys into `target` are reported as ambiguous; pick one with
    /// [`Relationships::find`] and [`Hierarchy::get_related_via`].
    pub fn get_related(
        &self,
        table: &str,
        record: &Record,
        target: &str,
    ) -> Result<Option<&Record>, HierarchyError> {
        match self.relationships.between(table, target).as_slice() {
            [] => Ok(None),
            [rel] => Ok(self.resolve_parent(rel, record)),
            many => Err(HierarchyError::AmbiguousRelationship {
                table: table.to_string(),
                target: target.to_string(),
                candidates: many.iter().map(|r| r.label()).collect(),
            }),
        }
    }

    /// Parent lookup through one specific relationship.
    pub fn get_related_via(&self, id: RelationshipId, record: &Record) -> Option<&Record> {
        self.resolve_parent(self.relationships.get(id), record)
    }

    fn resolve_parent(&self, rel: &Relationship, record: &Record) -> Option<&Record> {
        let key = Key::from_record(record, &rel.columns)?;
        self.lookup(&rel.ref_table, &key)
    }

    /// Every record, in any table, that points at `record` (from `table`).
    ///
    /// The parent key is computed from `record` itself using `table`'s primary
    /// key; the record does not have to be present in the index. Matches are
    /// grouped by child table, concatenated per relationship in manifest
    /// order. Tables without matches are left out.
    pub fn get_children(&self, table: &str, record: &Record) -> Children<'_> {
        let mut children = Children::new();
        let Some(key) = self.parent_key(table, record) else {
            return children;
        };

        for rel in self.relationships.incoming(table) {
            let found = self.children_via(rel, &key);
            if !found.is_empty() {
                children
                    .entry(rel.table.as_str())
                    .or_default()
                    .extend(found);
            }
        }
        children
    }

    /// Records of `child_table` pointing at `record`.
    pub fn children_in(&self, table: &str, record: &Record, child_table: &str) -> Vec<&Record> {
        let Some(key) = self.parent_key(table, record) else {
            return Vec::new();
        };
        self.relationships
            .incoming(table)
            .into_iter()
            .filter(|rel| rel.table == child_table)
            .flat_map(|rel| self.children_via(rel, &key))
            .collect()
    }

    fn parent_key(&self, table: &str, record: &Record) -> Option<Key> {
        Key::from_record(record, self.schema.primary_key(table)?)
    }

    fn children_via(&self, rel: &Relationship, key: &Key) -> Vec<&Record> {
        let (Some(positions), Some(rows)) = (
            self.reverse[rel.id.index()].get(key),
            self.data.get(&rel.table),
        ) else {
            return Vec::new();
        };
        positions.iter().map(|&pos| &rows[pos]).collect()
    }
}

fn build_indexes(
    schema: &Schema,
    data: &Dataset,
    policy: DuplicateKeys,
) -> Result<HashMap<String, PrimaryIndex>, HierarchyError> {
    let mut indexes = HashMap::new();

    for (name, records) in data {
        let Some(pk) = schema.primary_key(name) else {
            tracing::debug!(table = %name, "table not in schema, left unindexed");
            continue;
        };

        let mut index = PrimaryIndex::default();
        index.stats.rows = records.len();

        for (pos, record) in records.iter().enumerate() {
            let Some(key) = Key::from_record(record, pk) else {
                index.stats.unindexed += 1;
                continue;
            };
            match index.by_key.entry(key) {
                Entry::Occupied(mut slot) => {
                    if policy == DuplicateKeys::Reject {
                        return Err(HierarchyError::DuplicateKey {
                            table: name.clone(),
                            key: slot.key().clone(),
                        });
                    }
                    index.stats.duplicates += 1;
                    slot.insert(pos);
                }
                Entry::Vacant(slot) => {
                    slot.insert(pos);
                }
            }
        }
        index.stats.indexed = index.by_key.len();

        if index.stats.duplicates > 0 {
            tracing::warn!(
                table = %name,
                duplicates = index.stats.duplicates,
                "duplicate primary keys, later rows replace earlier ones"
            );
        }
        tracing::debug!(
            table = %name,
            rows = index.stats.rows,
            indexed = index.stats.indexed,
            unindexed = index.stats.unindexed,
            "indexed table"
        );

        indexes.insert(name.clone(), index);
    }

    Ok(indexes)
}

fn build_reverse(relationships: &Relationships, data: &Dataset) -> Vec<HashMap<Key, Vec<usize>>> {
    relationships
        .iter()
        .map(|rel| {
            let mut by_key: HashMap<Key, Vec<usize>> = HashMap::new();
            for (pos, record) in data.get(&rel.table).into_iter().flatten().enumerate() {
                if let Some(key) = Key::from_record(record, &rel.columns) {
                    by_key.entry(key).or_default().push(pos);
                }
            }
            by_key
        })
        .collect()
}
