/// Decorator extraction and handling
/// Supports bare decorators (@property) and factory calls (@lru_cache(maxsize=128))
use super::helpers::split_top_level_commas;
use super::PythonExtractor;
use crate::error::ExtractResult;
use crate::extractors::base::{join_tokens, Argument, Decorator, Spacing, Token};
use tree_sitter::Node;

/// Extract the decorators attached to a decorated_definition, in source order
pub fn extract_decorators(
    extractor: &PythonExtractor,
    decorated: Option<&Node>,
) -> ExtractResult<Vec<Decorator>> {
    let Some(decorated) = decorated else {
        return Ok(Vec::new());
    };

    let mut cursor = decorated.walk();
    let decorator_nodes: Vec<_> = decorated
        .children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .collect();

    decorator_nodes
        .into_iter()
        .map(|node| {
            let tokens = extractor.base().tokens(node)?;
            Ok(normalize_decorator(&tokens))
        })
        .collect()
}

/// Name is everything before the first `(`; arguments sit between it and its `)`
fn normalize_decorator(tokens: &[Token]) -> Decorator {
    let tokens = match tokens.first() {
        Some(first) if first.is_operator("@") => &tokens[1..],
        _ => tokens,
    };

    let Some(open) = tokens.iter().position(|t| t.is_operator("(")) else {
        return Decorator {
            name: join_tokens(tokens, Spacing::Verbatim),
            arguments: Vec::new(),
        };
    };

    let mut depth = 0usize;
    let mut close = tokens.len();
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token.is_operator("(") {
            depth += 1;
        } else if token.is_operator(")") {
            depth -= 1;
            if depth == 0 {
                close = i;
                break;
            }
        }
    }

    Decorator {
        name: join_tokens(&tokens[..open], Spacing::Verbatim),
        arguments: split_top_level_commas(&tokens[open + 1..close])
            .into_iter()
            .map(normalize_argument)
            .collect(),
    }
}

fn normalize_argument(tokens: &[Token]) -> Argument {
    match tokens {
        [Token::Name(name), eq, rest @ ..] if eq.is_operator("=") => Argument {
            value: join_tokens(rest, Spacing::Punctuated),
            name: Some(name.value.clone()),
        },
        _ => Argument {
            value: join_tokens(tokens, Spacing::Punctuated),
            name: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::python::tests::module_of;

    #[test]
    fn test_bare_and_dotted_decorators() {
        let module = module_of("@property\n@functools.wraps\ndef f(): pass\n");
        let names: Vec<_> = module.functions[0]
            .decorators
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["property", "functools.wraps"]);
        assert!(module.functions[0].decorators[0].arguments.is_empty());
    }

    #[test]
    fn test_decorator_factory_arguments() {
        let module = module_of(
            "@app.route('/items', methods=['GET', 'POST'], strict=f(1, 2))\ndef view(): pass\n",
        );
        let decorator = &module.functions[0].decorators[0];

        assert_eq!(decorator.name, "app.route");
        assert_eq!(
            decorator.arguments,
            vec![
                Argument {
                    value: "'/items'".to_string(),
                    name: None,
                },
                Argument {
                    value: "['GET', 'POST']".to_string(),
                    name: Some("methods".to_string()),
                },
                Argument {
                    value: "f(1, 2)".to_string(),
                    name: Some("strict".to_string()),
                },
            ]
        );
        assert_eq!(
            decorator.code(),
            "@app.route('/items', methods=['GET', 'POST'], strict=f(1, 2))"
        );
    }

    #[test]
    fn test_class_decorators() {
        let module = module_of("@dataclass(frozen=True)\nclass Point:\n    x: int = 0\n");
        let decorator = &module.classes[0].decorators[0];
        assert_eq!(decorator.name, "dataclass");
        assert_eq!(decorator.arguments[0].name.as_deref(), Some("frozen"));
        assert_eq!(decorator.arguments[0].value, "True");
    }
}
