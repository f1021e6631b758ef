//! Rendering Module
//!
//! Turns extracted modules into documentation pages plus index pages.
//!
//! # Architecture
//!
//! - `style.rs` - role-to-template configuration
//! - `markdown.rs` - MarkdownRenderer: per-module pages with a table of contents
//! - `index.rs` - index pages grouped by directory
//!
//! [`build`] produces every output file in memory, keyed by the module's relative path;
//! [`Documentation::save`] writes them under an output root.

pub mod index;
pub mod markdown;
pub mod style;

pub use markdown::{module_title, MarkdownRenderer};
pub use style::{Role, Style};

use crate::error::RenderError;
use crate::extractors::Module;
use crate::utils::paths::{key_leaf, key_parent, module_key, to_absolute_native};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Title of the index page at the output root
pub const ROOT_INDEX_TITLE: &str = "Index";

/// File stem of every index page
pub const INDEX_NAME: &str = "index";

/// A heading recorded for the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    /// Text as it appears in the output, escaping already applied
    pub text: String,
}

/// One rendered module page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedModule {
    pub text: String,
    pub headings: Vec<Heading>,
}

/// An output format
pub trait Renderer {
    /// Default style for this format
    fn configure(&self) -> Style;

    /// Render one module; table-of-contents state never outlives the call
    fn render_module(&self, style: &Style, module: &Module) -> RenderedModule;

    /// Render an index page listing `entries`, links relative to `base_dir`
    fn render_index(
        &self,
        style: &Style,
        title: &str,
        base_dir: &str,
        entries: &[IndexEntry],
    ) -> String;
}

/// A module as listed on an index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Module key, e.g. `pkg/sub/module`
    pub key: String,
    /// Key of the module's page; differs from `key` only when the key is taken by an index
    pub page: String,
}

impl IndexEntry {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            page: key.clone(),
            key,
        }
    }
}

/// A rendered file, addressed relative to the output root with `/` separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: String,
    pub text: String,
}

/// Every file produced by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    pub files: Vec<OutputFile>,
}

/// Render `modules` and, when the style asks for it, their index pages
///
/// Each directory holding modules gets an `index` page listing its own modules. The
/// output root gets one listing every module; modules directly under the input root
/// appear only there. A module whose own page would be named `index` is moved aside
/// to a free name so no index page overwrites it.
pub fn build<R, I>(renderer: &R, style: &Style, modules: I, input_root: &Path) -> Documentation
where
    R: Renderer + ?Sized,
    I: IntoIterator<Item = Module>,
{
    let keyed: Vec<(String, Module)> = modules
        .into_iter()
        .map(|module| (module_key(&module.path, input_root), module))
        .collect();
    let taken: HashSet<&str> = keyed.iter().map(|(key, _)| key.as_str()).collect();

    let mut files = Vec::new();
    let mut directories: BTreeMap<String, Vec<IndexEntry>> = BTreeMap::new();
    let mut all_entries = Vec::new();

    for (key, module) in &keyed {
        let entry = IndexEntry {
            key: key.clone(),
            page: page_key(key, style.index, &taken),
        };
        if entry.page != entry.key {
            warn!(
                "Module {} collides with an index page; writing it as {}",
                key, entry.page
            );
        }

        let rendered = renderer.render_module(style, module);
        debug!(
            "Rendered {} ({} headings, {} bytes)",
            key,
            rendered.headings.len(),
            rendered.text.len()
        );

        files.push(OutputFile {
            path: style.file_name(&entry.page),
            text: rendered.text,
        });
        directories
            .entry(key_parent(key).to_string())
            .or_default()
            .push(entry.clone());
        all_entries.push(entry);
    }

    if style.index {
        for (dir, entries) in &directories {
            if dir.is_empty() {
                continue;
            }
            files.push(OutputFile {
                path: style.file_name(&format!("{}/{}", dir, INDEX_NAME)),
                text: renderer.render_index(style, dir, dir, entries),
            });
        }
        files.push(OutputFile {
            path: style.file_name(INDEX_NAME),
            text: renderer.render_index(style, ROOT_INDEX_TITLE, "", &all_entries),
        });
    }

    Documentation { files }
}

/// Page key for a module: its own key unless an index page needs that name
fn page_key(key: &str, with_index: bool, taken: &HashSet<&str>) -> String {
    if !with_index || key_leaf(key) != INDEX_NAME {
        return key.to_string();
    }
    let mut candidate = format!("{}_module", key);
    while taken.contains(candidate.as_str()) {
        candidate.push('_');
    }
    candidate
}

impl Documentation {
    /// Write every file under `out_root`, creating directories as needed
    pub fn save(&self, out_root: &Path) -> Result<(), RenderError> {
        for file in &self.files {
            let target = to_absolute_native(&file.path, out_root);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&target, &file.text).map_err(|source| RenderError::Io {
                path: target.clone(),
                source,
            })?;
            debug!("Wrote {}", target.display());
        }

        info!(
            "Wrote {} files to {}",
            self.files.len(),
            out_root.display()
        );
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.path == path)
    }
}
