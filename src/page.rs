//! Page assembly: stream the reference template through `lol_html` and splice
//! in the generated fragments.
//!
//! Five hooks are rewritten:
//!
//! 1. the sidebar library item gets a chevron and a collapsible submenu,
//! 2. the first grid inside the section headed "Libraries" (nested sections
//!    included) is replaced with the cards,
//! 3. the chapter list is cleared down to a placeholder,
//! 4. the content area shows the welcome panel,
//! 5. `body` receives the data blob and the viewer script.
//!
//! A hook that matches nothing leaves the template as it is and is reported
//! as a warning.

use crate::catalog::Catalog;
use crate::hierarchy::Dataset;
use crate::html;
use lol_html::errors::{RewritingError, SelectorError};
use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, Selector, element, rewrite_str, text};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Invalid selector `{selector}`: {source}")]
    Selector {
        selector: String,
        source: SelectorError,
    },
    #[error("Failed to serialize page data: {0}")]
    Data(#[from] serde_json::Error),
    #[error("Template rewrite failed: {0}")]
    Rewrite(#[from] RewritingError),
}

/// CSS selectors locating the template hooks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub library_item: String,
    /// Scope for the library heading and grid
    pub section: String,
    pub section_heading: String,
    /// Text the library heading has to contain
    pub library_heading_text: String,
    pub library_grid: String,
    pub chapter_list: String,
    pub content_area: String,
    pub body: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            library_item: r#"aside.fixed div.sidebar-item[data-section="library"]"#.to_string(),
            section: "section".to_string(),
            section_heading: "section h2".to_string(),
            library_heading_text: "Libraries".to_string(),
            library_grid: "section div.grid".to_string(),
            chapter_list: "#librarySection #chapterList".to_string(),
            content_area: "#librarySection #contentArea".to_string(),
            body: "body".to_string(),
        }
    }
}

impl Selectors {
    /// Parse every selector up front so a bad one is an error, not a panic
    /// inside the rewriter.
    pub fn validate(&self) -> Result<(), PageError> {
        for selector in [
            &self.library_item,
            &self.section,
            &self.section_heading,
            &self.library_grid,
            &self.chapter_list,
            &self.content_area,
            &self.body,
        ] {
            selector
                .parse::<Selector>()
                .map_err(|source| PageError::Selector {
                    selector: selector.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

/// Which hooks were found in the template.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hooks {
    pub sidebar: bool,
    pub library_grid: bool,
    pub chapter_list: bool,
    pub content_area: bool,
    pub body: bool,
}

impl Hooks {
    pub fn all() -> Self {
        Self {
            sidebar: true,
            library_grid: true,
            chapter_list: true,
            content_area: true,
            body: true,
        }
    }

    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.sidebar, "sidebar library item"),
            (self.library_grid, "library grid"),
            (self.chapter_list, "chapter list"),
            (self.content_area, "content area"),
            (self.body, "body"),
        ]
        .into_iter()
        .filter(|(found, _)| !found)
        .map(|(_, name)| name)
        .collect()
    }
}

#[derive(Debug)]
pub struct Page {
    pub html: String,
    pub hooks: Hooks,
}

#[derive(Default)]
struct SectionFrame {
    heading: String,
    replaced: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PageBuilder {
    selectors: Selectors,
}

impl PageBuilder {
    pub fn new(selectors: Selectors) -> Self {
        Self { selectors }
    }

    pub fn render(
        &self,
        template: &str,
        data: &Dataset,
        catalog: &Catalog,
    ) -> Result<Page, PageError> {
        let s = &self.selectors;
        s.validate()?;

        let submenu = html::sidebar_submenu(catalog);
        let grid = html::library_grid(catalog);
        let welcome = html::welcome_panel(catalog);
        let script = html::script_block(data)?;

        let sidebar = Cell::new(false);
        let library_grid = Cell::new(false);
        let chapter_list = Cell::new(false);
        let content_area = Cell::new(false);
        let body = Cell::new(false);
        let sections: Rc<RefCell<Vec<SectionFrame>>> = Rc::default();

        let output = rewrite_str(
            template,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(s.library_item.as_str(), |el| {
                        if sidebar.replace(true) {
                            return Ok(());
                        }
                        el.set_attribute("onclick", "toggleLibrarySubmenu(event)")?;
                        let class = el.get_attribute("class").unwrap_or_default();
                        el.set_attribute("class", &add_class(&class, "relative"))?;
                        el.append(html::CHEVRON, ContentType::Html);
                        el.after(&submenu, ContentType::Html);
                        Ok(())
                    }),
                    element!(s.section.as_str(), |el| {
                        sections.borrow_mut().push(SectionFrame::default());
                        let frames = Rc::clone(&sections);
                        match el.end_tag_handlers() {
                            Some(handlers) => handlers.push(Box::new(move |_| {
                                frames.borrow_mut().pop();
                                Ok(())
                            })),
                            None => {
                                sections.borrow_mut().pop();
                            }
                        }
                        Ok(())
                    }),
                    text!(s.section_heading.as_str(), |chunk| {
                        if let Some(frame) = sections.borrow_mut().last_mut() {
                            frame.heading.push_str(chunk.as_str());
                        }
                        Ok(())
                    }),
                    element!(s.library_grid.as_str(), |el| {
                        let mut frames = sections.borrow_mut();
                        let Some(frame) = frames
                            .iter_mut()
                            .rev()
                            .find(|f| f.heading.contains(&s.library_heading_text))
                        else {
                            return Ok(());
                        };
                        if frame.replaced {
                            return Ok(());
                        }
                        frame.replaced = true;
                        library_grid.set(true);
                        el.replace(&grid, ContentType::Html);
                        Ok(())
                    }),
                    element!(s.chapter_list.as_str(), |el| {
                        chapter_list.set(true);
                        el.set_inner_content(html::CHAPTER_PLACEHOLDER, ContentType::Html);
                        Ok(())
                    }),
                    element!(s.content_area.as_str(), |el| {
                        content_area.set(true);
                        el.set_inner_content(&welcome, ContentType::Html);
                        Ok(())
                    }),
                    element!(s.body.as_str(), |el| {
                        if !body.replace(true) {
                            el.append(&script, ContentType::Html);
                        }
                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::default()
            },
        )?;

        let hooks = Hooks {
            sidebar: sidebar.get(),
            library_grid: library_grid.get(),
            chapter_list: chapter_list.get(),
            content_area: content_area.get(),
            body: body.get(),
        };
        for hook in hooks.missing() {
            tracing::warn!(hook, "template hook not found, left unchanged");
        }
        tracing::info!(
            cards = catalog.entries.len(),
            submenu = catalog.active().count(),
            bytes = output.len(),
            "page assembled"
        );

        Ok(Page {
            html: output,
            hooks,
        })
    }
}

fn add_class(existing: &str, class: &str) -> String {
    if existing.split_whitespace().any(|c| c == class) {
        existing.to_string()
    } else if existing.trim().is_empty() {
        class.to_string()
    } else {
        format!("{} {}", existing.trim(), class)
    }
}
