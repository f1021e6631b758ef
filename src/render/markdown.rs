//! Markdown renderer
//!
//! Section order per module: title, table of contents, Require, docstring,
//! Configuration (Imports, Statements), Classes, Functions. Only the title and the
//! class/function headings go into the table of contents; section headings do not.

use super::index;
use super::style::{escape_emphasis, Role, Style};
use super::{Heading, IndexEntry, RenderedModule, Renderer};
use crate::extractors::{Class, Function, Module, Statement};

/// Renderer for the built-in text-markup style
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn configure(&self) -> Style {
        Style::markdown()
    }

    fn render_module(&self, style: &Style, module: &Module) -> RenderedModule {
        let mut page = Page::new(style);

        page.heading(1, &module_title(&module.name), true);
        let toc_at = page.body.len();

        render_requirements(&mut page, module);
        if !module.docstring.is_empty() {
            page.push(Role::Text, module.docstring.rendered(), true);
        }
        render_configuration(&mut page, module);

        if !module.classes.is_empty() {
            page.section(2, "Classes");
            for class in &module.classes {
                render_class(&mut page, class);
            }
        }

        if !module.functions.is_empty() {
            page.section(2, "Functions");
            for function in &module.functions {
                render_function(&mut page, 3, function);
            }
        }

        page.finish(toc_at)
    }

    fn render_index(
        &self,
        style: &Style,
        title: &str,
        base_dir: &str,
        entries: &[IndexEntry],
    ) -> String {
        index::render_index(style, title, base_dir, entries)
    }
}

/// Title derived from a module name: `my_module` becomes `My module`
///
/// A doubled underscore survives as `__` so dunder names stay recognisable.
pub fn module_title(name: &str) -> String {
    let spaced = name.replace('_', " ").replace("  ", "__");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Output buffer plus the headings that feed the table of contents
struct Page<'s> {
    style: &'s Style,
    body: String,
    headings: Vec<Heading>,
}

impl<'s> Page<'s> {
    fn new(style: &'s Style) -> Self {
        Self {
            style,
            body: String::new(),
            headings: Vec::new(),
        }
    }

    fn push(&mut self, role: Role, text: &str, escape: bool) {
        let formatted = self.style.format(role, text, escape);
        self.body.push_str(&formatted);
    }

    fn raw(&mut self, text: &str) {
        self.body.push_str(text);
    }

    /// Heading recorded in the table of contents
    fn heading(&mut self, level: u8, text: &str, escape: bool) {
        self.push(Role::Heading(level), text, escape);
        let shown = if escape {
            super::style::escape_text(text)
        } else {
            text.to_string()
        };
        self.headings.push(Heading { level, text: shown });
    }

    /// Structural heading, kept out of the table of contents
    fn section(&mut self, level: u8, text: &str) {
        self.push(Role::Heading(level), text, true);
    }

    fn finish(self, toc_at: usize) -> RenderedModule {
        let toc = render_toc(self.style, &self.headings);
        let mut text = self.body;
        text.insert_str(toc_at, &toc);
        RenderedModule {
            text,
            headings: self.headings,
        }
    }
}

/// Nested list of the recorded headings
///
/// Nesting follows the levels actually present, so a page with levels 1, 3 and 4
/// indents them 0, 1 and 2 steps.
fn render_toc(style: &Style, headings: &[Heading]) -> String {
    let mut levels: Vec<u8> = headings.iter().map(|h| h.level).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut toc = String::new();
    for heading in headings {
        let depth = levels.iter().take_while(|&&l| l < heading.level).count();
        toc.push_str(&"  ".repeat(depth));
        toc.push_str(&style.format(Role::Item, &heading.text, false));
    }
    toc.push('\n');
    toc.push_str(&style.format(Role::HorizontalRule, "", false));
    toc
}

fn render_requirements(page: &mut Page, module: &Module) {
    let required = module.required_modules();
    if required.is_empty() {
        return;
    }
    page.section(2, "Require");
    for name in required {
        page.push(Role::NumberedItem, name, true);
    }
    page.raw("\n");
}

fn render_configuration(page: &mut Page, module: &Module) {
    if module.imports.is_empty() && module.statements.is_empty() {
        return;
    }
    page.section(2, "Configuration");

    if !module.imports.is_empty() {
        page.section(3, "Imports");
        let lines: Vec<_> = module.imports.iter().map(|i| i.code()).collect();
        page.push(Role::MultilineCode, &lines.join("\n"), false);
    }

    if !module.statements.is_empty() {
        page.section(3, "Statements");
        render_statements(page, &module.statements);
    }
}

fn render_statements(page: &mut Page, statements: &[Statement]) {
    let lines: Vec<_> = statements.iter().map(Statement::code).collect();
    page.push(Role::MultilineCode, &lines.join("\n"), false);
}

fn render_class(page: &mut Page, class: &Class) {
    page.heading(3, &class.name, true);

    if !class.decorators.is_empty() {
        render_decorators(page, class.decorators.iter().map(|d| d.code()));
    }
    if !class.parent.is_empty() {
        let line = format!(
            "{} {}",
            page.style.format(Role::Italic, "Inherits", false),
            page.style.format(Role::Code, &class.parent, false)
        );
        page.push(Role::Text, &line, false);
    }
    if !class.docstring.is_empty() {
        page.push(Role::Text, class.docstring.rendered(), true);
    }
    if !class.statements.is_empty() {
        render_statements(page, &class.statements);
    }

    for method in &class.methods {
        render_function(page, 4, method);
    }
}

/// Shared by module functions and class methods
fn render_function(page: &mut Page, level: u8, function: &Function) {
    page.heading(level, &function.name, false);

    if !function.decorators.is_empty() {
        render_decorators(page, function.decorators.iter().map(|d| d.code()));
    }

    let mut line = String::new();
    if function.is_async {
        line.push_str(&page.style.format(Role::Italic, "async", false));
        line.push(' ');
    }
    let signature = escape_emphasis(&function.signature());
    line.push_str(&page.style.format(Role::Bold, &signature, false));
    if function.has_return_annotation() {
        let annotation = escape_emphasis(&function.return_annotation.annotation);
        line.push_str(" -> ");
        line.push_str(&page.style.format(Role::Bold, &annotation, false));
    }
    page.push(Role::Text, &line, false);

    if !function.docstring.is_empty() {
        page.push(Role::Text, function.docstring.rendered(), true);
    }
}

fn render_decorators(page: &mut Page, decorators: impl Iterator<Item = String>) {
    let line = decorators
        .map(|code| page.style.format(Role::Code, &code, false))
        .collect::<Vec<_>>()
        .join(" ");
    page.push(Role::Text, &line, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::python::tests::module_of;

    fn named(code: &str, name: &str) -> Module {
        let mut module = module_of(code);
        module.name = name.to_string();
        module
    }

    #[test]
    fn test_module_title() {
        assert_eq!(module_title("my_module"), "My module");
        assert_eq!(module_title("__init__"), "__init__");
        assert_eq!(module_title("HTTPClient"), "Httpclient");
        assert_eq!(module_title(""), "");
    }

    #[test]
    fn test_toc_headings_in_source_order() {
        let code = "class Shape:\n    def area(self):\n        pass\n    def grow(self, by):\n        pass\n\ndef make():\n    pass\n";
        let style = Style::markdown();
        let rendered = MarkdownRenderer.render_module(&style, &named(code, "shapes"));

        let headings: Vec<_> = rendered.headings.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(headings, vec!["Shapes", "Shape", "area", "grow", "make"]);
        let levels: Vec<_> = rendered.headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![1, 3, 4, 4, 3]);
    }

    #[test]
    fn test_toc_does_not_leak_between_modules() {
        let style = Style::markdown();
        let first = MarkdownRenderer.render_module(&style, &named("def a():\n    pass\n", "one"));
        let second = MarkdownRenderer.render_module(&style, &named("def b():\n    pass\n", "two"));

        assert_eq!(first.headings.len(), 2);
        let headings: Vec<_> = second.headings.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(headings, vec!["Two", "b"]);
        assert!(!second.text.contains("- a\n"));
    }

    #[test]
    fn test_toc_follows_title() {
        let style = Style::markdown();
        let rendered =
            MarkdownRenderer.render_module(&style, &named("import os\ndef run():\n    pass\n", "tool"));

        assert!(rendered
            .text
            .starts_with("# Tool\n\n- Tool\n  - run\n\n---\n\n## Require\n\n1. os\n"));
    }

    #[test]
    fn test_toc_nests_methods_under_classes() {
        let style = Style::markdown();
        let code = "class Shape:\n    def area(self):\n        pass\n\ndef make():\n    pass\n";
        let rendered = MarkdownRenderer.render_module(&style, &named(code, "shapes"));

        assert!(rendered
            .text
            .starts_with("# Shapes\n\n- Shapes\n  - Shape\n    - area\n  - make\n\n---\n\n"));
    }

    #[test]
    fn test_signature_stars_do_not_break_bold() {
        let style = Style::markdown();
        let code = "def call(*args, **kwargs) -> Optional[my_type]:\n    pass\n";
        let rendered = MarkdownRenderer.render_module(&style, &named(code, "calls"));

        assert!(rendered
            .text
            .contains("**(\\*args, \\*\\*kwargs)** -> **Optional[my\\_type]**\n\n"));
    }

    #[test]
    fn test_require_lists_each_module_once() {
        let style = Style::markdown();
        let code = "import os\nimport sys as system\nfrom os import path as p\nfrom os import sep as s\n";
        let rendered = MarkdownRenderer.render_module(&style, &named(code, "deps"));

        assert_eq!(rendered.text.matches("1. os\n").count(), 1);
        let os_at = rendered.text.find("1. os\n").unwrap();
        let sys_at = rendered.text.find("1. sys\n").unwrap();
        assert!(os_at < sys_at);
    }

    #[test]
    fn test_configuration_code_is_verbatim() {
        let style = Style::markdown();
        let code = "import my_pkg.sub_mod as alias_name\nMAX_SIZE = 10\n";
        let rendered = MarkdownRenderer.render_module(&style, &named(code, "cfg"));

        assert!(rendered.text.contains(
            "## Configuration\n\n### Imports\n\n```python\nimport my_pkg.sub_mod as alias_name\n```\n\n"
        ));
        assert!(rendered
            .text
            .contains("### Statements\n\n```python\nMAX_SIZE = 10\n```\n\n"));
        assert!(rendered.text.contains("1. my\\_pkg\n"));
    }

    #[test]
    fn test_function_routine() {
        let style = Style::markdown();
        let code = "@cached\nasync def fetch_all(url: str, retries=3) -> List[str]:\n    \"\"\"Fetch every page.\"\"\"\n    return []\n";
        let rendered = MarkdownRenderer.render_module(&style, &named(code, "net"));

        assert!(rendered.text.contains("### fetch_all\n\n"));
        assert!(rendered.text.contains("`@cached`\n\n"));
        assert!(rendered
            .text
            .contains("*async* **(url: str, retries=3)** -> **List[str]**\n\n"));
        assert!(rendered.text.contains("Fetch every page.\n\n"));
    }

    #[test]
    fn test_class_rendering() {
        let style = Style::markdown();
        let code = "class Point(Base):\n    \"\"\"A point_like thing.\"\"\"\n    x = 0\n";
        let rendered = MarkdownRenderer.render_module(&style, &named(code, "geo"));

        assert!(rendered.text.contains("## Classes\n\n### Point\n\n"));
        assert!(rendered.text.contains("*Inherits* `Base`\n\n"));
        assert!(rendered.text.contains("A point\\_like thing.\n\n"));
        assert!(rendered.text.contains("```python\nx = 0\n```\n\n"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let style = Style::markdown();
        let rendered = MarkdownRenderer.render_module(&style, &named("\n", "empty"));

        assert_eq!(rendered.text, "# Empty\n\n- Empty\n\n---\n\n");
    }
}
