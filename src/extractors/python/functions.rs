/// Function and method extraction
/// Handles regular and async functions plus their return/yield/raise expressions
use super::helpers::{definitions, Definition};
use super::PythonExtractor;
use super::{decorators, docstrings, signatures};
use crate::error::ExtractResult;
use crate::extractors::base::tree_methods::search_in_scope;
use crate::extractors::base::{Function, Token};
use tracing::trace;
use tree_sitter::Node;

const RETURN_KINDS: &[&str] = &["return_statement"];
const YIELD_KINDS: &[&str] = &["yield"];
const RAISE_KINDS: &[&str] = &["raise_statement"];

/// Extract the functions defined in a module or class body scope
pub fn extract_functions(extractor: &PythonExtractor, scope: &Node) -> ExtractResult<Vec<Function>> {
    definitions(*scope, "function_definition")
        .into_iter()
        .map(|def| extract_function(extractor, def))
        .collect()
}

/// Extract a function definition
pub fn extract_function(extractor: &PythonExtractor, def: Definition) -> ExtractResult<Function> {
    let node = def.node;
    let name = extractor
        .base()
        .get_field_text(&node, "name")
        .unwrap_or_else(|| "Anonymous".to_string());
    trace!("Extracting function '{}'", name);

    let (returns, yields, raises) = match node.child_by_field_name("body") {
        Some(body) => (
            expressions(extractor, &body, RETURN_KINDS)?,
            expressions(extractor, &body, YIELD_KINDS)?,
            expressions(extractor, &body, RAISE_KINDS)?,
        ),
        None => (Vec::new(), Vec::new(), Vec::new()),
    };

    Ok(Function {
        docstring: docstrings::extract_docstring(extractor, &node),
        parameters: signatures::extract_parameters(extractor, &node)?,
        decorators: decorators::extract_decorators(extractor, def.decorated.as_ref())?,
        return_annotation: signatures::extract_return_annotation(extractor, &node),
        returns,
        yields,
        raises,
        is_async: signatures::has_async_keyword(&node),
        name,
    })
}

/// Expression tokens of every construct of `kinds` in the body, minus its keyword
fn expressions(
    extractor: &PythonExtractor,
    body: &Node,
    kinds: &'static [&'static str],
) -> ExtractResult<Vec<Vec<Token>>> {
    search_in_scope(*body, kinds)
        .map(|node| {
            let mut tokens = extractor.base().tokens(node)?;
            if tokens.first().is_some_and(Token::is_keyword) {
                tokens.remove(0);
            }
            Ok(tokens)
        })
        .collect()
}
