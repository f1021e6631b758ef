// Moduledocs - tree-sitter powered documentation for Python source trees
//
// Two stages: extractors turn each source file into an immutable Module record,
// render turns a sequence of modules into Markdown pages and index pages.

pub mod error;
pub mod extractors;
pub mod language;
pub mod render;

// Path key helpers shared by rendering and the binary
pub mod utils;

pub use error::{ExtractError, ExtractResult, RenderError};
pub use extractors::{
    Class, Decorator, Docstring, ExtractorManager, FailurePolicy, Function, Import, Module,
    Statement, Token,
};
pub use render::{build, Documentation, MarkdownRenderer, Renderer, Style};
