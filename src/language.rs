//! Language Support - tree-sitter grammar wiring
//!
//! Every place that needs a parser or has to decide whether a path is a source file
//! goes through here, so the grammar version is pinned in exactly one spot.

use crate::error::{ExtractError, ExtractResult};
use std::path::Path;
use tree_sitter::{Parser, Tree};

/// File suffix (without the dot) of the documented language
pub const SOURCE_SUFFIX: &str = "py";

/// Get the tree-sitter grammar for Python
pub fn get_tree_sitter_language() -> tree_sitter::Language {
    tree_sitter_python::LANGUAGE.into()
}

/// Build a parser with the Python grammar loaded
pub fn new_parser() -> ExtractResult<Parser> {
    let mut parser = Parser::new();
    parser.set_language(&get_tree_sitter_language())?;
    Ok(parser)
}

/// Check whether a path names a source file by its suffix
pub fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_SUFFIX)
}

/// Parse source text into a syntax tree, rejecting trees with ERROR or MISSING nodes
///
/// tree-sitter recovers from any input, so "no tree" only happens on cancellation;
/// recovered trees are what actually signal a syntax error.
pub fn parse_source(path: &Path, content: &str) -> ExtractResult<Tree> {
    let mut parser = new_parser()?;
    let tree = parser
        .parse(content, None)
        .ok_or_else(|| ExtractError::SyntaxParse {
            path: path.to_path_buf(),
            message: "parser produced no tree".to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        let line = first_error_line(&root).unwrap_or(root.start_position().row) + 1;
        return Err(ExtractError::SyntaxParse {
            path: path.to_path_buf(),
            message: format!("invalid syntax near line {}", line),
        });
    }

    Ok(tree)
}

fn first_error_line(node: &tree_sitter::Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .iter()
        .filter(|child| child.has_error())
        .find_map(first_error_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_source_suffix() {
        assert!(is_source_file(Path::new("pkg/module.py")));
        assert!(!is_source_file(Path::new("pkg/module.pyc")));
        assert!(!is_source_file(Path::new("pkg/README")));
    }

    #[test]
    fn test_parse_valid_source() {
        let tree = parse_source(Path::new("ok.py"), "x = 1\n").unwrap();
        assert_eq!(tree.root_node().kind(), "module");
    }

    #[test]
    fn test_parse_rejects_broken_source() {
        let err = parse_source(Path::new("broken.py"), "def f(:\n    pass\n").unwrap_err();
        match err {
            ExtractError::SyntaxParse { path, .. } => assert_eq!(path, Path::new("broken.py")),
            other => panic!("expected SyntaxParse, got {:?}", other),
        }
    }
}
