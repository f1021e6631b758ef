/// Class extraction for Python
/// Handles class definitions, parent references, class attributes and methods
use super::helpers::{definitions, Definition};
use super::PythonExtractor;
use super::{assignments, decorators, docstrings, functions};
use crate::error::ExtractResult;
use crate::extractors::base::{Class, Token};
use tracing::trace;
use tree_sitter::Node;

/// Extract the classes defined in a module scope
pub fn extract_classes(extractor: &PythonExtractor, scope: &Node) -> ExtractResult<Vec<Class>> {
    definitions(*scope, "class_definition")
        .into_iter()
        .map(|def| extract_class(extractor, def))
        .collect()
}

/// Extract a class definition from a class_definition node
pub fn extract_class(extractor: &PythonExtractor, def: Definition) -> ExtractResult<Class> {
    let node = def.node;
    let name = extractor
        .base()
        .get_field_text(&node, "name")
        .unwrap_or_else(|| "Anonymous".to_string());
    trace!("Extracting class '{}'", name);

    let (statements, methods) = match node.child_by_field_name("body") {
        Some(body) => (
            assignments::extract_statements(extractor, &body, true)?,
            functions::extract_functions(extractor, &body)?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    Ok(Class {
        docstring: docstrings::extract_docstring(extractor, &node),
        parent: extract_parent(extractor, &node)?,
        decorators: decorators::extract_decorators(extractor, def.decorated.as_ref())?,
        statements,
        methods,
        name,
    })
}

/// Parent reference from the superclass list
///
/// A single plain name is used as-is; anything more complex becomes every name in
/// the list joined with `.`.
fn extract_parent(extractor: &PythonExtractor, node: &Node) -> ExtractResult<String> {
    let Some(superclasses) = node.child_by_field_name("superclasses") else {
        return Ok(String::new());
    };

    let mut cursor = superclasses.walk();
    let args: Vec<_> = superclasses
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();

    if let [single] = args.as_slice() {
        if single.kind() == "identifier" {
            return Ok(extractor.base().get_node_text(single));
        }
    }

    let names: Vec<_> = extractor
        .base()
        .tokens(superclasses)?
        .into_iter()
        .filter_map(|token| match token {
            Token::Name(name) => Some(name.value),
            _ => None,
        })
        .collect();
    Ok(names.join("."))
}

#[cfg(test)]
mod tests {
    use crate::extractors::python::tests::module_of;

    #[test]
    fn test_class_members() {
        let code = r#"
class Config(Base):
    """Runtime settings."""

    DEBUG = False
    retries: int = 3

    def __init__(self, name):
        """Build it."""
        self.name = name

    @staticmethod
    def create() -> "Config":
        return Config("x")

    class Inner:
        pass
"#;
        let module = module_of(code);
        let class = &module.classes[0];

        assert_eq!(class.name, "Config");
        assert_eq!(class.parent, "Base");
        assert_eq!(class.docstring.raw(), "Runtime settings.");
        let statements: Vec<_> = class.statements.iter().map(|s| s.code()).collect();
        assert_eq!(statements, vec!["DEBUG = False", "retries: int = 3"]);
        let methods: Vec<_> = class.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, vec!["__init__", "create"]);
        assert_eq!(class.methods[0].docstring.raw(), "Build it.");
        assert_eq!(class.methods[1].decorators[0].name, "staticmethod");
        assert_eq!(class.methods[1].return_annotation.annotation, "\"Config\"");
        assert_eq!(module.classes.len(), 1);
    }

    #[test]
    fn test_parent_references() {
        let module = module_of(
            "class A:\n    pass\nclass B():\n    pass\nclass C(models.Model):\n    pass\nclass D(X, Y):\n    pass\n",
        );
        let parents: Vec<_> = module.classes.iter().map(|c| c.parent.as_str()).collect();
        assert_eq!(parents, vec!["", "", "models.Model", "X.Y"]);
    }
}
