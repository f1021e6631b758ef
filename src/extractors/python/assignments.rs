/// Variable and constant assignment extraction
/// Handles module constants, class attributes, annotations and tuple unpacking
use super::helpers::bracket_delta;
use super::PythonExtractor;
use crate::error::ExtractResult;
use crate::extractors::base::tree_methods::shallow_search;
use crate::extractors::base::{join_tokens, Name, Spacing, Statement, Token};
use tree_sitter::Node;

/// How far below a module or class body an assignment may sit
const STATEMENT_DEPTH: usize = 3;

const ASSIGNMENT_KINDS: &[&str] = &["assignment", "augmented_assignment"];

const AUGMENTED_OPERATORS: &[&str] = &[
    "+=", "-=", "*=", "@=", "/=", "//=", "%=", "**=", ">>=", "<<=", "&=", "^=", "|=",
];

fn is_assign_operator(token: &Token) -> bool {
    match token {
        Token::Operator(op) => op.value == "=" || AUGMENTED_OPERATORS.contains(&op.value.as_str()),
        _ => false,
    }
}

/// Extract the assignments that sit directly in a module or class body
///
/// `descend_all` is needed for class bodies, where wrapper nodes other than the
/// generic ones sit between the body and its statements.
pub fn extract_statements(
    extractor: &PythonExtractor,
    body: &Node,
    descend_all: bool,
) -> ExtractResult<Vec<Statement>> {
    shallow_search(*body, ASSIGNMENT_KINDS, STATEMENT_DEPTH, descend_all)
        .map(|node| extract_assignment(extractor, &node))
        .collect()
}

/// Split one assignment into its targets and value tokens
pub fn extract_assignment(extractor: &PythonExtractor, node: &Node) -> ExtractResult<Statement> {
    let tokens = extractor.base().tokens(*node)?;
    Ok(normalize_statement(tokens))
}

#[derive(Default)]
struct Target {
    value: Vec<Token>,
    annotation: Vec<Token>,
    in_annotation: bool,
}

impl Target {
    fn push(&mut self, token: Token) {
        if self.in_annotation {
            self.annotation.push(token);
        } else {
            self.value.push(token);
        }
    }

    fn finish(self, targets: &mut Vec<Name>) {
        if self.value.is_empty() {
            return;
        }
        targets.push(Name {
            value: join_tokens(&self.value, Spacing::Verbatim),
            annotation: join_tokens(&self.annotation, Spacing::Punctuated),
        });
    }
}

/// Everything before the first top-level assignment operator is the target side,
/// everything after it the value
fn normalize_statement(tokens: Vec<Token>) -> Statement {
    let mut targets = Vec::new();
    let mut operator = String::from("=");
    let mut value = Vec::new();
    let mut current = Target::default();
    let mut depth = 0isize;
    let mut on_target_side = true;

    for token in tokens {
        if !on_target_side {
            value.push(token);
            continue;
        }

        let at_top = depth == 0;
        depth += bracket_delta(&token);

        if at_top && is_assign_operator(&token) {
            std::mem::take(&mut current).finish(&mut targets);
            operator = token.text().to_string();
            on_target_side = false;
        } else if at_top && token.is_operator(",") && !current.in_annotation {
            std::mem::take(&mut current).finish(&mut targets);
        } else if at_top && token.is_operator(":") && !current.in_annotation {
            current.in_annotation = true;
        } else {
            current.push(token);
        }
    }
    current.finish(&mut targets);

    Statement {
        targets,
        operator,
        value,
    }
}
