/// Import statement extraction
/// Handles import, from...import, relative, aliased, wildcard and __future__ imports
use super::PythonExtractor;
use crate::error::{ExtractError, ExtractResult};
use crate::extractors::base::tree_methods::search_in_scope;
use crate::extractors::base::{Import, Token};
use tree_sitter::Node;

const IMPORT_KINDS: &[&str] = &[
    "import_statement",
    "import_from_statement",
    "future_import_statement",
];

/// Extract every import in the module scope, in source order
pub fn extract_imports(extractor: &PythonExtractor, root: &Node) -> ExtractResult<Vec<Import>> {
    search_in_scope(*root, IMPORT_KINDS)
        .map(|node| extract_import(extractor, &node))
        .collect()
}

/// Extract one import construct as its token stream
pub fn extract_import(extractor: &PythonExtractor, node: &Node) -> ExtractResult<Import> {
    let base = extractor.base();
    let tokens = base.tokens(*node)?;

    if tokens.iter().any(|t| matches!(t, Token::Literal(_))) {
        return Err(ExtractError::MalformedImport {
            line: base.line_of(node),
            code: base.get_node_text(node),
        });
    }

    let from_module = tokens
        .iter()
        .find_map(|t| match t {
            Token::Name(name) => Some(name.value.clone()),
            _ => None,
        })
        .unwrap_or_default();

    Ok(Import {
        from_module,
        tokens,
    })
}
