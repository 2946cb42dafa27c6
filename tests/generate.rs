use codenav::config::{Config, TableSource};
use codenav::{Catalog, DuplicateKeys, Hierarchy, HierarchyError, loader, report};
use std::fs;
use std::path::Path;

const SCHEMA: &str = r#"{ "tables": {
    "ModelCode": { "pk": ["ModelCodeID"] },
    "ModelCodeVersion": { "pk": ["ModelCodeVersionID"], "fks": [
        { "columns": ["ModelCodeID"], "ref": { "table": "ModelCode", "columns": ["ModelCodeID"] } }
    ] },
    "Discipline": { "pk": ["DisciplineID"] },
    "ModelCodeDiscipline": { "pk": ["ModelCodeID", "DisciplineID"], "fks": [
        { "columns": ["ModelCodeID"], "ref": { "table": "ModelCode", "columns": ["ModelCodeID"] } },
        { "columns": ["DisciplineID"], "ref": { "table": "Discipline", "columns": ["DisciplineID"] } }
    ] },
    "CodeChapter": { "pk": ["ChapterID"], "fks": [
        { "columns": ["ModelCodeVersionID"], "ref": { "table": "ModelCodeVersion", "columns": ["ModelCodeVersionID"] } }
    ] }
} }"#;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html><body>
<aside class="fixed"><div class="sidebar-item" data-section="library"><span>Library</span></div></aside>
<section><h2>Libraries</h2><div class="grid"><div>placeholder card</div></div></section>
<div id="librarySection"><div id="chapterList">static</div><div id="contentArea">static</div></div>
</body></html>"#;

fn write_fixture(dir: &Path) {
    fs::write(dir.join("schema-meta.json"), SCHEMA).unwrap();
    fs::write(dir.join("reference.txt"), TEMPLATE).unwrap();
    fs::write(
        dir.join("ModelCode.json"),
        r#"[{"ModelCodeID": 1, "ModelCodeName": "NFPA 72: National Fire Alarm and Signaling Code", "Description": "Fire Alarm"}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("ModelCodeVersion.json"),
        r#"[{"ModelCodeVersionID": 7, "ModelCodeID": 1, "Year": 2022}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("Discipline.json"),
        r#"[{"DisciplineID": 3, "DisciplineNameKR": "소방"}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("ModelCodeDiscipline.json"),
        r#"[{"ModelCodeID": 1, "DisciplineID": 3}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("chapters.json"),
        r#"[{"ChapterID": 70, "ModelCodeVersionID": 7, "Chapter": 1}, {"ChapterID": 71, "ModelCodeVersionID": 7.0, "Chapter": 2}]"#,
    )
    .unwrap();
}

fn config(dir: &Path) -> Config {
    let mut tables: Vec<TableSource> = ["ModelCode", "ModelCodeVersion", "Discipline", "ModelCodeDiscipline"]
        .into_iter()
        .map(TableSource::new)
        .collect();
    tables.push(TableSource {
        name: "CodeChapter".into(),
        file: Some("chapters.json".into()),
    });
    Config {
        base_dir: dir.to_path_buf(),
        tables,
        ..Config::default()
    }
}

fn load(config: &Config) -> Hierarchy {
    let schema = loader::load_schema(&config.schema_path()).unwrap();
    let data = loader::load_dataset(&config.base_dir, &config.tables).unwrap();
    Hierarchy::with_options(schema, data, config.duplicate_keys()).unwrap()
}

#[test]
fn build_writes_page() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let config = config(dir.path());

    let hierarchy = load(&config);
    let template = loader::load_template(&config.template_path()).unwrap();
    let html = codenav::generate(&hierarchy, &template, &config.selectors).unwrap();
    loader::write_output(&config.output_path(), &html).unwrap();

    let written = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert_eq!(written, html);
    assert!(written.contains(r#"data-code-id="1" data-version-id="7""#));
    assert!(written.contains("NFPA 72 2022"));
    assert!(written.contains("loadCodeFromSidebar('7', '1')"));
    // Numeric ids in appData are matched against the string arguments above.
    assert!(written.contains("String(a) === String(b)"));
    assert!(!written.contains("placeholder card"));
    assert!(written.contains("const appData"));
}

#[test]
fn numeric_keys_join_across_int_and_float() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let hierarchy = load(&config(dir.path()));

    let catalog = Catalog::build(&hierarchy).unwrap();
    assert_eq!(catalog.entries[0].chapter_count, 2);
    assert_eq!(catalog.entries[0].discipline.as_deref(), Some("소방"));
}

#[test]
fn inspect_report_lists_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let hierarchy = load(&config(dir.path()));
    let catalog = Catalog::build(&hierarchy).unwrap();

    let text = report::render(&hierarchy, &catalog);
    assert!(text.contains("CodeChapter"));
    assert!(text.contains("Relationships (4 across 3 tables)"));
}

#[test]
fn strict_keys_rejects_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(
        dir.path().join("Discipline.json"),
        r#"[{"DisciplineID": 3, "DisciplineNameKR": "소방"}, {"DisciplineID": 3.0, "DisciplineNameKR": "건축"}]"#,
    )
    .unwrap();

    let mut config = config(dir.path());
    let lenient = load(&config);
    assert_eq!(lenient.stats("Discipline").unwrap().duplicates, 1);

    config.strict_keys = true;
    assert_eq!(config.duplicate_keys(), DuplicateKeys::Reject);
    let schema = loader::load_schema(&config.schema_path()).unwrap();
    let data = loader::load_dataset(&config.base_dir, &config.tables).unwrap();
    assert!(matches!(
        Hierarchy::with_options(schema, data, config.duplicate_keys()),
        Err(HierarchyError::DuplicateKey { .. })
    ));
}

#[test]
fn missing_table_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::remove_file(dir.path().join("chapters.json")).unwrap();

    let config = config(dir.path());
    let err = loader::load_dataset(&config.base_dir, &config.tables).unwrap_err();
    assert!(err.to_string().contains("chapters.json"));
}
