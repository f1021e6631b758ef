// Base extractor building blocks for moduledocs
//
// - types.rs: IR records (Name, Token, Import, Statement, Function, Class, Module, ...)
// - extractor.rs: BaseExtractor, the per-file source holder
// - creation_methods.rs: token classification into IR tokens
// - tree_methods.rs: lazy tree searches shared by every extractor

pub mod creation_methods;
pub mod extractor;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use creation_methods::TokenRole;
pub use extractor::BaseExtractor;
pub use types::{
    join_tokens, Argument, Class, Decorator, Docstring, Function, Import, Keyword, Literal,
    Module, Name, Operator, Parameter, Spacing, Statement, Token,
};
