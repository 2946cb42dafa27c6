//! Small code-navigator dataset shared by unit tests.

use crate::hierarchy::{Dataset, Hierarchy};
use crate::key::Record;
use crate::schema::Schema;
use serde_json::{Value, json};

pub const SCHEMA: &str = r#"{ "tables": {
    "CodeType": { "pk": ["CodeTypeID"] },
    "ModelCode": { "pk": ["ModelCodeID"], "fks": [
        { "columns": ["CodeTypeID"], "ref": { "table": "CodeType", "columns": ["CodeTypeID"] } }
    ] },
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
    ] },
    "Jurisdiction": { "pk": ["JurisdictionID"] },
    "CodeContent": { "pk": ["ContentID"], "fks": [
        { "columns": ["ChapterID"], "ref": { "table": "CodeChapter", "columns": ["ChapterID"] } }
    ] },
    "CodeAttachment": { "pk": ["AttachmentID"], "fks": [
        { "columns": ["ModelCodeVersionID"], "ref": { "table": "ModelCodeVersion", "columns": ["ModelCodeVersionID"] } }
    ] }
} }"#;

fn rows(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

pub fn navigator_schema() -> Schema {
    Schema::from_json(SCHEMA).unwrap()
}

/// IBC and NFPA 13 have chapters; ADA has no version; NEC has a version
/// without a year and without chapters.
pub fn navigator_data() -> Dataset {
    let mut data = Dataset::new();
    data.insert(
        "CodeType".into(),
        rows(vec![json!({"CodeTypeID": "CT1", "Name": "Model"})]),
    );
    data.insert(
        "ModelCode".into(),
        rows(vec![
            json!({"ModelCodeID": "MC1", "CodeTypeID": "CT1",
                   "ModelCodeName": "IBC: International Building Code",
                   "Description": "International Building Code"}),
            json!({"ModelCodeID": "MC2", "CodeTypeID": "CT1",
                   "ModelCodeName": "NFPA 13: Standard for the Installation of Sprinkler Systems",
                   "Description": "Sprinkler Systems"}),
            json!({"ModelCodeID": "MC3", "CodeTypeID": "CT1",
                   "ModelCodeName": "ADA: Standards for Accessible Design",
                   "Description": "Accessible <Design>"}),
            json!({"ModelCodeID": "MC4", "CodeTypeID": "CT1",
                   "ModelCodeName": "NEC", "Description": null}),
        ]),
    );
    data.insert(
        "ModelCodeVersion".into(),
        rows(vec![
            json!({"ModelCodeVersionID": "V1", "ModelCodeID": "MC1", "Year": 2021}),
            json!({"ModelCodeVersionID": "V2", "ModelCodeID": "MC1", "Year": 2024.0}),
            json!({"ModelCodeVersionID": "V3", "ModelCodeID": "MC2", "Year": 2025}),
            json!({"ModelCodeVersionID": "V4", "ModelCodeID": "MC4", "Year": null}),
        ]),
    );
    data.insert(
        "Discipline".into(),
        rows(vec![
            json!({"DisciplineID": "D1", "DisciplineNameKR": "건축"}),
            json!({"DisciplineID": "D2", "DisciplineNameKR": "소방안전"}),
        ]),
    );
    data.insert(
        "ModelCodeDiscipline".into(),
        rows(vec![
            json!({"ModelCodeID": "MC1", "DisciplineID": "D1"}),
            json!({"ModelCodeID": "MC2", "DisciplineID": "D2"}),
        ]),
    );
    data.insert(
        "CodeChapter".into(),
        rows(vec![
            json!({"ChapterID": "CH1", "ModelCodeVersionID": "V2", "Chapter": 1, "TitleEN": "Scope"}),
            json!({"ChapterID": "CH2", "ModelCodeVersionID": "V2", "Chapter": 2, "TitleEN": "Definitions"}),
            json!({"ChapterID": "CH3", "ModelCodeVersionID": "V3", "Chapter": 1, "TitleEN": "General"}),
            json!({"ChapterID": "CH4", "ModelCodeVersionID": "V1", "Chapter": 1, "TitleEN": "Old scope"}),
        ]),
    );
    data.insert("Jurisdiction".into(), Vec::new());
    data.insert(
        "CodeContent".into(),
        rows(vec![
            json!({"ContentID": "C1", "ChapterID": "CH1", "Section": "101", "Subsection": "1",
                   "ContentEN": "Applies to all buildings </script>"}),
        ]),
    );
    data.insert(
        "CodeAttachment".into(),
        rows(vec![json!({"AttachmentID": "A1", "ModelCodeVersionID": "V2", "Type": "Table"})]),
    );
    data
}

pub fn navigator() -> Hierarchy {
    Hierarchy::new(navigator_schema(), navigator_data()).unwrap()
}
