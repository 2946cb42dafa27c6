//! Plain-text diagnostics for `codenav inspect`.

use crate::catalog::Catalog;
use crate::hierarchy::Hierarchy;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Column-aligned text table. Widths are measured in terminal cells so
/// Hangul and other wide text lines up.
#[derive(Debug, Clone)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.width());
                } else {
                    widths.push(cell.width());
                }
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();
        write_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(&mut out, &rule, &widths);
        for row in &self.rows {
            write_line(&mut out, row, &widths);
        }
        out
    }
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(cell.width());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    writeln!(out, "{}", line.trim_end()).unwrap();
}

/// Per-table counts in schema order, then tables loaded without a schema entry.
pub fn tables(hierarchy: &Hierarchy) -> TextTable {
    let mut table = TextTable::new([
        "Table",
        "Rows",
        "Indexed",
        "Unindexed",
        "Duplicates",
        "Parents",
        "Referenced by",
    ]);
    let relationships = hierarchy.relationships();

    let mut names: Vec<&str> = hierarchy
        .schema()
        .tables()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    for name in hierarchy.tables().keys() {
        if !hierarchy.schema().contains(name) {
            names.push(name);
        }
    }

    for name in names {
        let rows = hierarchy.table(name).map(|r| r.len().to_string());
        let stats = hierarchy.stats(name);
        table.row([
            name.to_string(),
            rows.unwrap_or_else(|| "missing".to_string()),
            stats.map_or("-".to_string(), |s| s.indexed.to_string()),
            stats.map_or("-".to_string(), |s| s.unindexed.to_string()),
            stats.map_or("-".to_string(), |s| s.duplicates.to_string()),
            relationships.outgoing(name).len().to_string(),
            relationships.incoming(name).len().to_string(),
        ]);
    }
    table
}

pub fn relationships(hierarchy: &Hierarchy) -> TextTable {
    let mut table = TextTable::new(["#", "Relationship", "Child rows"]);
    let data = hierarchy.tables();
    for rel in hierarchy.relationships().iter() {
        let rows = data.get(&rel.table).map_or(0, Vec::len);
        table.row([rel.id.index().to_string(), rel.label(), rows.to_string()]);
    }
    table
}

pub fn library(catalog: &Catalog) -> TextTable {
    let mut table = TextTable::new(["Code", "Latest", "Discipline", "Badge", "Chapters"]);
    for entry in &catalog.entries {
        table.row([
            entry.display_name.clone(),
            entry.version_id.clone().unwrap_or_else(|| "-".to_string()),
            entry.discipline.clone().unwrap_or_else(|| "-".to_string()),
            entry.badge.text().to_string(),
            entry.chapter_count.to_string(),
        ]);
    }
    table
}

/// Full inspection report.
pub fn render(hierarchy: &Hierarchy, catalog: &Catalog) -> String {
    let mut out = String::new();
    writeln!(out, "Tables").unwrap();
    out.push_str(&tables(hierarchy).render());
    writeln!(
        out,
        "\nRelationships ({} across {} tables)",
        hierarchy.relationships().len(),
        hierarchy.relationships().source_table_count()
    )
    .unwrap();
    out.push_str(&relationships(hierarchy).render());
    writeln!(out, "\nLibrary").unwrap();
    out.push_str(&library(catalog).render());
    out
}
