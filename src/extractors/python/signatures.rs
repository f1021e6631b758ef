/// Function signatures and parameter extraction
/// Handles parameter lists, type hints and return annotations
use super::PythonExtractor;
use crate::error::ExtractResult;
use crate::extractors::base::{Name, Parameter};
use tree_sitter::Node;

/// Extract every declared parameter of a function definition
pub fn extract_parameters(
    extractor: &PythonExtractor,
    function_node: &Node,
) -> ExtractResult<Vec<Parameter>> {
    let Some(parameters_node) = function_node.child_by_field_name("parameters") else {
        return Ok(Vec::new());
    };

    let mut cursor = parameters_node.walk();
    let declared: Vec<_> = parameters_node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();

    declared
        .into_iter()
        .map(|param| {
            Ok(Parameter {
                tokens: extractor.base().tokens(param)?,
            })
        })
        .collect()
}

/// Return annotation as a value-less name; empty annotation when absent
pub fn extract_return_annotation(extractor: &PythonExtractor, function_node: &Node) -> Name {
    let annotation = extractor
        .base()
        .get_field_text(function_node, "return_type")
        .unwrap_or_default();
    Name::annotation_only(annotation)
}

/// Check if a function has an async keyword
pub(super) fn has_async_keyword(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == "async");
    found
}
