//! HTML fragments injected into the page template.

use crate::catalog::{Catalog, LibraryEntry};
use crate::hierarchy::Dataset;
use std::fmt::Write;

/// Browser-side viewer: data access, chapter and content rendering, sidebar
/// and card wiring. Expects a global `appData`.
pub const VIEWER_JS: &str = include_str!("../assets/viewer.js");

pub const CHEVRON: &str = r#"<svg class="w-4 h-4 ml-auto transition-transform" id="libraryChevron" fill="none" stroke="currentColor" viewBox="0 0 24 24">
  <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7"></path>
</svg>"#;

pub const CHAPTER_PLACEHOLDER: &str =
    r#"<p class="text-gray-500 text-sm p-4">Select a code from the library to view chapters</p>"#;

const BOOK_PATH: &str = "M12 6.253v13m0-13C10.832 5.477 9.246 5 7.5 5S4.168 5.477 3 6.253v13C4.168 18.477 5.754 18 7.5 18s3.332.477 4.5 1.253m0-13C13.168 5.477 14.754 5 16.5 5c1.747 0 3.332.477 4.5 1.253v13C19.832 18.477 18.247 18 16.5 18c-1.746 0-3.332.477-4.5 1.253";

/// The replacement library grid, one card per model code.
pub fn library_grid(catalog: &Catalog) -> String {
    let mut html = String::from(r#"<div class="grid grid-cols-4 gap-4">"#);
    for entry in &catalog.entries {
        library_card(&mut html, entry);
    }
    html.push_str("\n</div>");
    html
}

fn library_card(html: &mut String, entry: &LibraryEntry) {
    let active = entry.is_active();
    let mut classes = vec![
        "code-card",
        "bg-white",
        "p-4",
        "rounded-lg",
        "border-2",
        "border-gray-200",
        if active { "cursor-pointer" } else { "cursor-not-allowed" },
        "relative",
    ];
    if !active {
        classes.push("opacity-50");
    }

    let data_attrs = match (&entry.version_id, active) {
        (Some(version), true) => format!(
            r#" data-code-id="{}" data-version-id="{}""#,
            escape_html(&entry.code_id),
            escape_html(version)
        ),
        _ => String::new(),
    };
    let color = entry.badge.color();

    writeln!(html).unwrap();
    writeln!(
        html,
        r#"<div class="{}" data-nav="library"{}>"#,
        classes.join(" "),
        data_attrs
    )
    .unwrap();
    writeln!(
        html,
        r#"  <span class="absolute top-3 right-3 text-xs font-medium text-[{color}] bg-[{color}] bg-opacity-20 px-2 py-1 rounded">{}</span>"#,
        entry.badge.text()
    )
    .unwrap();
    writeln!(
        html,
        r#"  <div class="w-12 h-12 bg-[#F8E9A1] rounded-lg flex items-center justify-center mb-3">"#
    )
    .unwrap();
    writeln!(html, "{}", entry.icon).unwrap();
    writeln!(html, "  </div>").unwrap();
    writeln!(
        html,
        r#"  <h3 class="text-lg font-bold text-[#24305E] mb-1">{}</h3>"#,
        escape_html(&entry.display_name)
    )
    .unwrap();
    writeln!(
        html,
        r#"  <p class="text-gray-600 text-xs">{}</p>"#,
        escape_html(&entry.description)
    )
    .unwrap();
    write!(html, "</div>").unwrap();
}

/// Collapsed submenu placed after the sidebar library item; lists active
/// codes only.
pub fn sidebar_submenu(catalog: &Catalog) -> String {
    let mut html = String::from(
        r#"<div class="library-submenu overflow-hidden transition-all duration-300" style="max-height: 0;" id="librarySubmenu">"#,
    );
    for entry in catalog.active() {
        let Some(version) = &entry.version_id else {
            continue;
        };
        let onclick = format!(
            "loadCodeFromSidebar('{}', '{}')",
            escape_js(version),
            escape_js(&entry.code_id)
        );
        write!(
            html,
            r#"
<div class="submenu-item pl-12 py-2 text-sm text-white hover:bg-[#374785] cursor-pointer transition-all rounded-r-lg" data-code-id="{}" data-version-id="{}" onclick="{}">
  <span>{}</span>
</div>"#,
            escape_html(&entry.code_id),
            escape_html(version),
            escape_html(&onclick),
            escape_html(&entry.display_name)
        )
        .unwrap();
    }
    html.push_str("\n</div>");
    html
}

/// Initial content-area panel, listing the codes that can be opened.
pub fn welcome_panel(catalog: &Catalog) -> String {
    let mut items = String::new();
    for entry in catalog.active() {
        if entry.description.is_empty() {
            writeln!(items, "      <li>• {}</li>", escape_html(&entry.display_name)).unwrap();
        } else {
            writeln!(
                items,
                "      <li>• {} - {}</li>",
                escape_html(&entry.display_name),
                escape_html(&entry.description)
            )
            .unwrap();
        }
    }
    if items.is_empty() {
        items.push_str("      <li>No codes with chapters yet</li>\n");
    }

    format!(
        r#"<div class="bg-white rounded-lg shadow-sm p-8 text-center">
  <div class="max-w-2xl mx-auto">
    <svg class="w-24 h-24 mx-auto mb-6 text-[#A8D0E6]" fill="none" stroke="currentColor" viewBox="0 0 24 24">
      <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="{BOOK_PATH}"></path>
    </svg>
    <h2 class="text-3xl font-bold text-[#24305E] mb-4">Welcome to US Code Navigator</h2>
    <p class="text-gray-600 text-lg mb-6">Select a code from the home page library to browse chapters and content</p>
    <div class="bg-blue-50 border-l-4 border-blue-400 p-4 rounded text-left">
      <p class="text-sm text-gray-700"><strong>Available Codes:</strong></p>
      <ul class="text-sm text-gray-700 mt-2 space-y-1">
{items}      </ul>
    </div>
  </div>
</div>"#
    )
}

/// `<script>` block defining `appData` followed by the viewer script.
pub fn script_block(data: &Dataset) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(data)?;
    Ok(format!(
        "<script>\n// Data layer\nconst appData = {};\n\n{}</script>\n",
        script_json(&json),
        VIEWER_JS
    ))
}

/// Keep embedded JSON from closing the surrounding script element.
pub fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape for a single- or double-quoted JavaScript string literal.
pub fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
