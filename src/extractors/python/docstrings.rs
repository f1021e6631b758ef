/// Docstring lookup and string literal unescaping
/// The unescaper only ever sees text the parser already isolated as a string literal
use super::PythonExtractor;
use crate::extractors::base::Docstring;
use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

/// Optional prefix letters followed by the opening quote
static LITERAL_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([rRuUbBfF]{0,2})("""|'''|"|')"#).expect("valid literal regex"));

/// Extract the docstring of a module, class or function node
pub fn extract_docstring(extractor: &PythonExtractor, node: &Node) -> Docstring {
    match find_doc_node(node) {
        Some(doc_node) => {
            let text = literal_value(extractor, &doc_node);
            Docstring::new(text.trim())
        }
        None => Docstring::default(),
    }
}

/// Leading string statement of the node's body, if any
fn find_doc_node<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    let body = if node.kind() == "module" {
        *node
    } else {
        node.child_by_field_name("body")?
    };

    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|child| !child.is_extra())?;
    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }

    let expr = first.named_child(0)?;
    matches!(expr.kind(), "string" | "concatenated_string").then_some(expr)
}

fn literal_value(extractor: &PythonExtractor, node: &Node) -> String {
    let base = extractor.base();
    if node.kind() == "concatenated_string" {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|part| part.kind() == "string")
            .map(|part| unquote(&base.get_node_text(&part)))
            .collect()
    } else {
        unquote(&base.get_node_text(node))
    }
}

/// Recover the value of a single Python string literal
///
/// Prefix letters and quotes are removed; escapes are resolved unless the literal is raw.
/// Text that does not look like a literal comes back unchanged.
pub fn unquote(literal: &str) -> String {
    let Some(open) = LITERAL_OPEN.captures(literal) else {
        return literal.to_string();
    };
    let prefix = open.get(1).map_or("", |m| m.as_str());
    let quote = open.get(2).map_or("", |m| m.as_str());
    let start = prefix.len() + quote.len();

    if literal.len() < start + quote.len() || !literal.ends_with(quote) {
        return literal.to_string();
    }
    let body = &literal[start..literal.len() - quote.len()];

    if prefix.contains(['r', 'R']) {
        body.to_string()
    } else {
        resolve_escapes(body)
    }
}

fn resolve_escapes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut digits = String::from(next);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                match u32::from_str_radix(&digits, 8).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push_str(&digits);
                    }
                }
            }
            'x' => push_hex_escape(&mut out, &mut chars, 'x', 2),
            'u' => push_hex_escape(&mut out, &mut chars, 'u', 4),
            'U' => push_hex_escape(&mut out, &mut chars, 'U', 8),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

fn push_hex_escape(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars>,
    marker: char,
    width: usize,
) {
    let mut digits = String::new();
    while digits.len() < width {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }

    let decoded = (digits.len() == width)
        .then(|| u32::from_str_radix(&digits, 16).ok())
        .flatten()
        .and_then(char::from_u32);
    match decoded {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push(marker);
            out.push_str(&digits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_quote_styles() {
        assert_eq!(unquote(r#""plain""#), "plain");
        assert_eq!(unquote("'single'"), "single");
        assert_eq!(unquote("\"\"\"triple\n  text\"\"\""), "triple\n  text");
        assert_eq!(unquote("'''it's'''"), "it's");
    }

    #[test]
    fn test_unquote_prefixes() {
        assert_eq!(unquote(r#"r"a\nb""#), r"a\nb");
        assert_eq!(unquote(r#"Rb'\t'"#), r"\t");
        assert_eq!(unquote(r#"u"caf\xe9""#), "café");
        assert_eq!(unquote(r#"f"{x}""#), "{x}");
    }

    #[test]
    fn test_unquote_escapes() {
        assert_eq!(unquote(r#""tab\there""#), "tab\there");
        assert_eq!(unquote(r#""quote\"d""#), "quote\"d");
        assert_eq!(unquote(r#""\101é\U0001F600""#), "Aé😀");
        assert_eq!(unquote("\"line\\\ncontinued\""), "linecontinued");
    }

    #[test]
    fn test_unquote_keeps_unknown_escapes() {
        assert_eq!(unquote(r#""\d+""#), r"\d+");
        assert_eq!(unquote(r#""\N{BULLET}""#), r"\N{BULLET}");
        assert_eq!(unquote(r#""\xZZ""#), r"\xZZ");
    }

    #[test]
    fn test_unquote_non_literal_unchanged() {
        assert_eq!(unquote("not a literal"), "not a literal");
    }
}
