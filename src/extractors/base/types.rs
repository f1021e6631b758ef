// IR record types for moduledocs
//
// Every record is built once from a parsed tree and then only read. Records own their
// children by value; nothing points back at its parent.

use serde::Serialize;
use std::path::PathBuf;

/// An identifier, optionally carrying annotation source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Name {
    pub value: String,
    pub annotation: String,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            annotation: String::new(),
        }
    }

    /// A name whose only content is an annotation (used for return types)
    pub fn annotation_only(annotation: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            annotation: annotation.into(),
        }
    }

    pub fn code(&self) -> String {
        if self.annotation.is_empty() {
            self.value.clone()
        } else {
            format!("{}: {}", self.value, self.annotation)
        }
    }
}

/// Punctuation or an operator token, verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operator {
    pub value: String,
}

/// A reserved word token, verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub value: String,
}

/// A number, string, boolean, None or ellipsis token, verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub value: String,
}

/// One classified terminal token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", content = "value")]
pub enum Token {
    Name(Name),
    Operator(Operator),
    Keyword(Keyword),
    Literal(Literal),
}

impl Token {
    pub fn name(value: impl Into<String>) -> Self {
        Token::Name(Name::new(value))
    }

    pub fn operator(value: impl Into<String>) -> Self {
        Token::Operator(Operator {
            value: value.into(),
        })
    }

    pub fn keyword(value: impl Into<String>) -> Self {
        Token::Keyword(Keyword {
            value: value.into(),
        })
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Token::Literal(Literal {
            value: value.into(),
        })
    }

    /// Source text of the token
    pub fn text(&self) -> &str {
        match self {
            Token::Name(name) => &name.value,
            Token::Operator(op) => &op.value,
            Token::Keyword(kw) => &kw.value,
            Token::Literal(lit) => &lit.value,
        }
    }

    pub fn is_operator(&self, value: &str) -> bool {
        matches!(self, Token::Operator(op) if op.value == value)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Token::Keyword(_))
    }
}

/// How tokens are glued back into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Concatenate as-is; only keywords get surrounding spaces
    Verbatim,
    /// Like `Verbatim`, plus a single space after every `,` and `:`
    Punctuated,
}

/// Join tokens into source-like text
pub fn join_tokens(tokens: &[Token], spacing: Spacing) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Keyword(kw) => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push_str(&kw.value);
                out.push(' ');
            }
            Token::Operator(op)
                if spacing == Spacing::Punctuated && (op.value == "," || op.value == ":") =>
            {
                out.push_str(&op.value);
                out.push(' ');
            }
            other => out.push_str(other.text()),
        }
    }
    out.trim().to_string()
}

/// A docstring and its display form
///
/// `rendered` is always derived from `raw` when the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Docstring {
    raw: String,
    rendered: String,
}

impl Docstring {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let rendered = raw.clone();
        Self { raw, rendered }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// An import statement as a token stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// First name in the statement: the source module for `from` imports, the imported
    /// module itself for bare `import x`
    pub from_module: String,
    pub tokens: Vec<Token>,
}

impl Import {
    /// Rebuild the import line from its tokens
    pub fn code(&self) -> String {
        let text = join_tokens(&self.tokens, Spacing::Punctuated);
        match text.strip_prefix("from.") {
            Some(rest) => format!("from .{}", rest),
            None => text,
        }
    }
}

/// An assignment at module or class level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// One entry per assignment target; an annotated target keeps its annotation
    pub targets: Vec<Name>,
    /// `=` or an augmented operator such as `+=`
    pub operator: String,
    pub value: Vec<Token>,
}

impl Statement {
    /// Rebuild as `targets <operator> value`
    pub fn code(&self) -> String {
        let lhs = self
            .targets
            .iter()
            .map(Name::code)
            .collect::<Vec<_>>()
            .join(", ");
        if self.value.is_empty() {
            lhs
        } else {
            format!(
                "{} {} {}",
                lhs,
                self.operator,
                join_tokens(&self.value, Spacing::Verbatim)
            )
        }
    }
}

/// One declared parameter as its flat token stream
///
/// The stream is kept as written; name, annotation and default are recovered from the
/// `:` and `=` markers on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub tokens: Vec<Token>,
}

impl Parameter {
    pub fn code(&self) -> String {
        join_tokens(&self.tokens, Spacing::Punctuated)
    }

    /// Parameter name including any `*`/`**` prefix
    pub fn name(&self) -> String {
        let end = self
            .tokens
            .iter()
            .position(|t| t.is_operator(":") || t.is_operator("="))
            .unwrap_or(self.tokens.len());
        join_tokens(&self.tokens[..end], Spacing::Verbatim)
    }

    pub fn annotation(&self) -> Option<String> {
        let colon = self.tokens.iter().position(|t| t.is_operator(":"))?;
        let end = self
            .tokens
            .iter()
            .position(|t| t.is_operator("="))
            .unwrap_or(self.tokens.len());
        (colon < end).then(|| join_tokens(&self.tokens[colon + 1..end], Spacing::Punctuated))
    }

    pub fn default(&self) -> Option<String> {
        let eq = self.tokens.iter().position(|t| t.is_operator("="))?;
        Some(join_tokens(&self.tokens[eq + 1..], Spacing::Punctuated))
    }
}

/// An argument passed to a decorator factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub value: String,
    pub name: Option<String>,
}

impl Argument {
    pub fn code(&self) -> String {
        match &self.name {
            Some(name) => format!("{}={}", name, self.value),
            None => self.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decorator {
    /// Dotted name without the leading `@`
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl Decorator {
    pub fn code(&self) -> String {
        if self.arguments.is_empty() {
            format!("@{}", self.name)
        } else {
            let args = self
                .arguments
                .iter()
                .map(Argument::code)
                .collect::<Vec<_>>()
                .join(", ");
            format!("@{}({})", self.name, args)
        }
    }
}

/// A function or method definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub docstring: Docstring,
    pub parameters: Vec<Parameter>,
    pub decorators: Vec<Decorator>,
    /// Empty `value`; `annotation` holds the `->` clause text or is empty
    pub return_annotation: Name,
    /// Expression tokens of every `return` in the body
    pub returns: Vec<Vec<Token>>,
    /// Expression tokens of every `yield` in the body
    pub yields: Vec<Vec<Token>>,
    /// Expression tokens of every `raise` in the body
    pub raises: Vec<Vec<Token>>,
    pub is_async: bool,
}

impl Function {
    /// Parenthesised parameter list, e.g. `(a: int, b=2)`
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(Parameter::code)
            .collect::<Vec<_>>()
            .join(", ");
        format!("({})", params)
    }

    pub fn has_return_annotation(&self) -> bool {
        !self.return_annotation.annotation.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    pub name: String,
    pub docstring: Docstring,
    /// Dotted parent reference, empty when the class has no bases
    pub parent: String,
    pub decorators: Vec<Decorator>,
    pub statements: Vec<Statement>,
    pub methods: Vec<Function>,
}

/// Everything extracted from one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// File name with the source suffix stripped
    pub name: String,
    pub path: PathBuf,
    pub docstring: Docstring,
    pub imports: Vec<Import>,
    pub statements: Vec<Statement>,
    pub classes: Vec<Class>,
    pub functions: Vec<Function>,
}

impl Module {
    /// Source modules named by the imports, first-seen order, no repeats
    pub fn required_modules(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for import in &self.imports {
            let name = import.from_module.as_str();
            if !name.is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_code_relative_spacing() {
        let import = Import {
            from_module: "x".to_string(),
            tokens: vec![
                Token::keyword("from"),
                Token::operator("."),
                Token::keyword("import"),
                Token::name("x"),
            ],
        };
        assert_eq!(import.code(), "from . import x");
    }

    #[test]
    fn test_statement_code_without_value() {
        let stmt = Statement {
            targets: vec![Name {
                value: "x".to_string(),
                annotation: "int".to_string(),
            }],
            operator: "=".to_string(),
            value: vec![],
        };
        assert_eq!(stmt.code(), "x: int");
    }

    #[test]
    fn test_parameter_parts() {
        let param = Parameter {
            tokens: vec![
                Token::name("b"),
                Token::operator(":"),
                Token::name("int"),
                Token::operator("="),
                Token::literal("2"),
            ],
        };
        assert_eq!(param.code(), "b: int=2");
        assert_eq!(param.name(), "b");
        assert_eq!(param.annotation().as_deref(), Some("int"));
        assert_eq!(param.default().as_deref(), Some("2"));
    }

    #[test]
    fn test_keyword_spacing_in_verbatim_join() {
        let tokens = vec![
            Token::name("a"),
            Token::keyword("if"),
            Token::name("b"),
            Token::keyword("else"),
            Token::name("c"),
        ];
        assert_eq!(join_tokens(&tokens, Spacing::Verbatim), "a if b else c");
    }

    #[test]
    fn test_docstring_rendered_follows_raw() {
        let doc = Docstring::new("Some text");
        assert_eq!(doc.raw(), "Some text");
        assert_eq!(doc.rendered(), doc.raw());
        assert!(Docstring::default().is_empty());
    }
}
