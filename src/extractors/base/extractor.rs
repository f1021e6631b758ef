// BaseExtractor implementation for moduledocs
//
// Holds the source text of one file so extractors can slice node text out of it.

use std::path::PathBuf;
use tracing::warn;
use tree_sitter::Node;

/// Source access shared by every extractor of one file
pub struct BaseExtractor {
    pub file_path: PathBuf,
    pub content: String,
}

impl BaseExtractor {
    pub fn new(file_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            content: content.into(),
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Offsets can only split a char if the tree was parsed from other text
        match self.content.get(start_byte..end_byte) {
            Some(text) => text.to_string(),
            None => {
                warn!(
                    "Node '{}' spans invalid byte range {}..{} in {}",
                    node.kind(),
                    start_byte,
                    end_byte,
                    self.file_path.display()
                );
                String::from_utf8_lossy(
                    &self.content.as_bytes()[start_byte.min(self.content.len())
                        ..end_byte.min(self.content.len())],
                )
                .to_string()
            }
        }
    }

    /// Get field text safely, trimmed
    pub fn get_field_text(&self, node: &Node, field_name: &str) -> Option<String> {
        node.child_by_field_name(field_name)
            .map(|field_node| self.get_node_text(&field_node).trim().to_string())
    }

    /// 1-based line of a node, for error messages
    pub fn line_of(&self, node: &Node) -> usize {
        node.start_position().row + 1
    }
}
