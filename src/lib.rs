pub mod catalog;
pub mod config;
pub mod hierarchy;
pub mod html;
pub mod icons;
pub mod key;
pub mod loader;
pub mod page;
pub mod report;
pub mod schema;

#[cfg(test)]
mod fixtures;

use wasm_bindgen::prelude::*;

pub use catalog::{Catalog, CatalogError, LibraryEntry};
pub use hierarchy::{Children, Dataset, DuplicateKeys, Hierarchy, HierarchyError};
pub use key::{Key, Record, Scalar};
pub use page::{PageBuilder, PageError, Selectors};
pub use schema::{Relationship, RelationshipId, Relationships, Schema, SchemaError};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("Invalid data: {0}")]
    Data(#[from] serde_json::Error),
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Page(#[from] PageError),
}

/// Build the library catalog from `hierarchy` and splice it into `template`.
pub fn generate(
    hierarchy: &Hierarchy,
    template: &str,
    selectors: &Selectors,
) -> Result<String, RenderError> {
    let catalog = Catalog::build(hierarchy)?;
    let page = PageBuilder::new(selectors.clone()).render(template, hierarchy.tables(), &catalog)?;
    Ok(page.html)
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render the navigator page from a schema manifest, a dataset object
/// (table name to record array) and the reference template
#[wasm_bindgen(js_name = "renderPage")]
pub fn render_page(schema_json: &str, data_json: &str, template: &str) -> Result<String, String> {
    render_page_inner(schema_json, data_json, template).map_err(|e| e.to_string())
}

fn render_page_inner(
    schema_json: &str,
    data_json: &str,
    template: &str,
) -> Result<String, RenderError> {
    let schema = Schema::from_json(schema_json)?;
    let data = loader::parse_dataset(data_json)?;
    let hierarchy = Hierarchy::new(schema, data)?;
    generate(&hierarchy, template, &Selectors::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_page() {
        let data = serde_json::to_string(&fixtures::navigator_data()).unwrap();
        let html = render_page(
            fixtures::SCHEMA,
            &data,
            "<html><body><div id=\"librarySection\"><div id=\"chapterList\"></div></div></body></html>",
        )
        .unwrap();
        assert!(html.contains("Select a code from the library to view chapters"));
        assert!(html.contains("const appData"));
    }

    #[test]
    fn test_render_page_errors() {
        let err = render_page("{}", "{}", "").unwrap_err();
        assert!(err.starts_with("Invalid schema"));

        let err = render_page(fixtures::SCHEMA, "[1, 2]", "").unwrap_err();
        assert!(err.starts_with("Invalid data"));
    }
}
