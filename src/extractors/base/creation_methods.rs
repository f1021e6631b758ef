// Token creation methods for BaseExtractor
//
// Classifies terminal nodes into the four token roles and wraps their source text.

use super::extractor::BaseExtractor;
use super::tree_methods::search;
use super::types::Token;
use crate::error::{ExtractError, ExtractResult};
use tree_sitter::Node;

/// Structural role of a terminal node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    Name,
    Operator,
    Keyword,
    Literal,
}

impl TokenRole {
    /// Role of a node, or `None` when it is composite or has no token role
    ///
    /// Strings are literals as a whole; their quote and content children are never
    /// looked at.
    pub fn of(node: &Node) -> Option<TokenRole> {
        match node.kind() {
            "identifier" | "keyword_identifier" | "__future__" => Some(TokenRole::Name),
            "integer" | "float" | "string" | "concatenated_string" | "true" | "false"
            | "none" | "ellipsis" => Some(TokenRole::Literal),
            "wildcard_import" | "import_prefix" | "keyword_separator" | "positional_separator" => {
                Some(TokenRole::Operator)
            }
            kind if !node.is_named() && node.child_count() == 0 => {
                if kind.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
                    Some(TokenRole::Keyword)
                } else {
                    Some(TokenRole::Operator)
                }
            }
            _ => None,
        }
    }
}

/// Terminal nodes that need a role: anything with a role plus any non-extra leaf
fn is_terminal(node: &Node) -> bool {
    TokenRole::of(node).is_some() || (node.child_count() == 0 && !node.is_extra())
}

impl BaseExtractor {
    /// Wrap one terminal node in its token record
    pub fn create_token(&self, node: &Node) -> ExtractResult<Token> {
        let role = TokenRole::of(node).ok_or_else(|| ExtractError::UnrecognizedTokenKind {
            kind: node.kind().to_string(),
            line: self.line_of(node),
        })?;
        let text = self.get_node_text(node);

        Ok(match role {
            TokenRole::Name => Token::name(text),
            TokenRole::Operator => Token::operator(text),
            TokenRole::Keyword => Token::keyword(text),
            TokenRole::Literal => Token::literal(text),
        })
    }

    /// Flatten a subtree into its classified tokens, in source order
    ///
    /// Comments and line continuations are skipped.
    pub fn tokens(&self, node: Node) -> ExtractResult<Vec<Token>> {
        search(node, |n: &Node| is_terminal(n))
            .map(|n| self.create_token(&n))
            .collect()
    }
}
