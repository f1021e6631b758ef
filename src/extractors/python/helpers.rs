/// Helper utilities for Python extraction
/// Definition lookup and token-stream splitting shared by the extractors
use crate::extractors::base::tree_methods::search_in_scope;
use crate::extractors::base::Token;
use tree_sitter::Node;

const DEFINITION_KINDS: &[&str] = &[
    "function_definition",
    "class_definition",
    "decorated_definition",
];

/// A definition together with the decorated wrapper it sits in, if any
#[derive(Clone, Copy)]
pub struct Definition<'tree> {
    pub node: Node<'tree>,
    pub decorated: Option<Node<'tree>>,
}

/// Definitions of `kind` in the scope of `scope`, in source order
///
/// Looks through `if`/`try`/`with` blocks but not into other definitions.
pub fn definitions<'tree>(scope: Node<'tree>, kind: &'static str) -> Vec<Definition<'tree>> {
    search_in_scope(scope, DEFINITION_KINDS)
        .filter_map(|node| {
            if node.kind() == "decorated_definition" {
                let inner = node.child_by_field_name("definition")?;
                Some(Definition {
                    node: inner,
                    decorated: Some(node),
                })
            } else {
                Some(Definition {
                    node,
                    decorated: None,
                })
            }
        })
        .filter(|def| def.node.kind() == kind)
        .collect()
}

/// Split tokens at depth-0 commas, tracking (), [] and {}
pub fn split_top_level_commas(tokens: &[Token]) -> Vec<&[Token]> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        if let Token::Operator(op) = token {
            match op.value.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth = depth.saturating_sub(1),
                "," if depth == 0 => {
                    groups.push(&tokens[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
    }
    groups.push(&tokens[start..]);

    groups.into_iter().filter(|g| !g.is_empty()).collect()
}

/// Bracket depth change caused by one token
pub fn bracket_delta(token: &Token) -> isize {
    match token {
        Token::Operator(op) => match op.value.as_str() {
            "(" | "[" | "{" => 1,
            ")" | "]" | "}" => -1,
            _ => 0,
        },
        _ => 0,
    }
}
