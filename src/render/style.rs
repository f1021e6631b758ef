//! Style configuration
//!
//! Maps formatting roles to output templates. Templates use `{text}` as the
//! placeholder; the link template also uses `{target}`. A style is built once and
//! passed by reference into every render call.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Formatting role of a piece of output text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Text,
    Bold,
    Italic,
    /// Heading level 1-4; other levels are clamped
    Heading(u8),
    Item,
    NumberedItem,
    Code,
    MultilineCode,
    HorizontalRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub text: String,
    pub bold: String,
    pub italic: String,
    pub heading1: String,
    pub heading2: String,
    pub heading3: String,
    pub heading4: String,
    pub item: String,
    pub numbered_item: String,
    pub link: String,
    pub code: String,
    pub multiline_code: String,
    pub horizontal_rule: String,
    /// Extension of output files, without the dot
    pub extension: String,
    /// Whether index pages are emitted
    pub index: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self::markdown()
    }
}

impl Style {
    /// Built-in Markdown style
    pub fn markdown() -> Self {
        Self {
            text: "{text}\n\n".to_string(),
            bold: "**{text}**".to_string(),
            italic: "*{text}*".to_string(),
            heading1: "# {text}\n\n".to_string(),
            heading2: "## {text}\n\n".to_string(),
            heading3: "### {text}\n\n".to_string(),
            heading4: "#### {text}\n\n".to_string(),
            item: "- {text}\n".to_string(),
            numbered_item: "1. {text}\n".to_string(),
            link: "[{text}]({target})".to_string(),
            code: "`{text}`".to_string(),
            multiline_code: "```python\n{text}\n```\n\n".to_string(),
            horizontal_rule: "---\n\n".to_string(),
            extension: "md".to_string(),
            index: true,
        }
    }

    /// Load a style from a JSON file; missing fields keep their Markdown defaults
    pub fn from_json_file(path: &Path) -> Result<Self, RenderError> {
        let content = fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| RenderError::StyleConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn template(&self, role: Role) -> &str {
        match role {
            Role::Text => &self.text,
            Role::Bold => &self.bold,
            Role::Italic => &self.italic,
            Role::Heading(level) => match level {
                0 | 1 => &self.heading1,
                2 => &self.heading2,
                3 => &self.heading3,
                _ => &self.heading4,
            },
            Role::Item => &self.item,
            Role::NumberedItem => &self.numbered_item,
            Role::Code => &self.code,
            Role::MultilineCode => &self.multiline_code,
            Role::HorizontalRule => &self.horizontal_rule,
        }
    }

    /// Insert `text` into the template for `role`
    ///
    /// With `escape` set, underscores are backslash-escaped first. Verbatim code and
    /// already-formatted bodies pass `escape = false`.
    pub fn format(&self, role: Role, text: &str, escape: bool) -> String {
        let text = if escape {
            escape_text(text)
        } else {
            text.to_string()
        };
        self.template(role).replace("{text}", &text)
    }

    /// Hyperlink; only the visible text is escaped
    pub fn link(&self, text: &str, target: &str, escape: bool) -> String {
        let text = if escape {
            escape_text(text)
        } else {
            text.to_string()
        };
        self.link
            .replace("{target}", target)
            .replace("{text}", &text)
    }

    /// Output file name for a key
    pub fn file_name(&self, key: &str) -> String {
        format!("{}.{}", key, self.extension)
    }
}

/// Backslash-escape underscores in user-authored text
pub fn escape_text(text: &str) -> String {
    text.replace('_', "\\_")
}

/// [`escape_text`] plus `*`, for text placed inside emphasis markers
pub fn escape_emphasis(text: &str) -> String {
    escape_text(text).replace('*', "\\*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_escapes_underscores() {
        let style = Style::markdown();
        assert_eq!(style.format(Role::Heading(2), "my_var", true), "## my\\_var\n\n");
        assert_eq!(style.format(Role::Code, "my_var", false), "`my_var`");
    }

    #[test]
    fn test_heading_levels_clamp() {
        let style = Style::markdown();
        assert_eq!(style.template(Role::Heading(0)), style.heading1);
        assert_eq!(style.template(Role::Heading(9)), style.heading4);
    }

    #[test]
    fn test_link_escapes_text_only() {
        let style = Style::markdown();
        assert_eq!(
            style.link("my_mod", "pkg/my_mod.md", true),
            "[my\\_mod](pkg/my_mod.md)"
        );
    }

    #[test]
    fn test_partial_json_style_keeps_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"extension": "txt", "index": false}"#).unwrap();

        let style = Style::from_json_file(file.path()).unwrap();
        assert_eq!(style.extension, "txt");
        assert!(!style.index);
        assert_eq!(style.bold, Style::markdown().bold);
    }

    #[test]
    fn test_invalid_json_style() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();

        let err = Style::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, RenderError::StyleConfig { .. }));
    }
}
