/// Python extractor turning a parsed tree into a Module record
///
/// This module is organized into focused sub-modules:
/// - helpers: definition lookup and token splitting
/// - docstrings: docstring lookup and string literal unescaping
/// - imports: import statement handling
/// - assignments: module constants and class attributes
/// - signatures: parameter and return annotation extraction
/// - decorators: decorator names and factory arguments
/// - functions: function and method extraction
/// - types: class extraction
pub(crate) mod assignments;
pub(crate) mod decorators;
pub(crate) mod docstrings;
pub(crate) mod functions;
pub(crate) mod helpers;
pub(crate) mod imports;
pub(crate) mod signatures;
pub(crate) mod types;

pub use docstrings::unquote;

use crate::error::ExtractResult;
use crate::extractors::base::{BaseExtractor, Module};
use std::path::PathBuf;
use tree_sitter::Tree;

/// Python extractor for one source file
pub struct PythonExtractor {
    base: BaseExtractor,
}

impl PythonExtractor {
    pub fn new(file_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            base: BaseExtractor::new(file_path, content),
        }
    }

    /// Assemble the Module record for a tree parsed from this extractor's content
    pub fn extract_module(&self, name: String, tree: &Tree) -> ExtractResult<Module> {
        let root = tree.root_node();

        Ok(Module {
            name,
            path: self.base.file_path.clone(),
            docstring: docstrings::extract_docstring(self, &root),
            imports: imports::extract_imports(self, &root)?,
            statements: assignments::extract_statements(self, &root, false)?,
            classes: types::extract_classes(self, &root)?,
            functions: functions::extract_functions(self, &root)?,
        })
    }

    pub(crate) fn base(&self) -> &BaseExtractor {
        &self.base
    }
}
