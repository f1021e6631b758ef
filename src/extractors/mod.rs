//! Extraction Module
//!
//! Turns Python source files into IR records using tree-sitter.
//!
//! # Architecture
//!
//! - `base/` - IR records, token classification and tree search
//! - `python/` - per-construct extractors (imports, assignments, functions, classes, ...)
//! - `manager.rs` - ExtractorManager: file reading, parsing and directory discovery

pub mod base;
pub mod manager;
pub mod python;

// Re-export the public API
pub use base::{
    Argument, Class, Decorator, Docstring, Function, Import, Keyword, Literal, Module, Name,
    Operator, Parameter, Statement, Token, TokenRole,
};
pub use manager::{module_name, ExtractorManager, FailurePolicy};
