//! Index page rendering
//!
//! Entries are sorted by module key and listed as links to their pages. Consecutive
//! entries sharing a parent directory are grouped under one directory line.

use super::style::{Role, Style};
use super::IndexEntry;
use crate::utils::paths::{key_leaf, key_parent};

/// Label used for the directory line of keys at the output root
const ROOT_LABEL: &str = ".";

/// Render the index of `entries`, with link targets relative to `base_dir`
pub fn render_index(style: &Style, title: &str, base_dir: &str, entries: &[IndexEntry]) -> String {
    let mut sorted: Vec<&IndexEntry> = entries.iter().collect();
    sorted.sort_unstable_by(|a, b| a.key.cmp(&b.key));

    let mut out = style.format(Role::Heading(1), title, true);
    let mut previous_dir: Option<&str> = None;

    for entry in sorted {
        let dir = key_parent(&entry.key);
        if previous_dir != Some(dir) {
            let label = if dir.is_empty() { ROOT_LABEL } else { dir };
            out.push_str(&style.format(Role::Item, label, true));
            previous_dir = Some(dir);
        }

        let target = style.file_name(relative_to(&entry.page, base_dir));
        let link = style.link(key_leaf(&entry.key), &target, true);
        out.push_str("  ");
        out.push_str(&style.format(Role::Item, &link, false));
    }

    out.push('\n');
    out
}

fn relative_to<'k>(key: &'k str, base_dir: &str) -> &'k str {
    if base_dir.is_empty() {
        return key;
    }
    key.strip_prefix(base_dir)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<IndexEntry> {
        list.iter().map(|k| IndexEntry::new(*k)).collect()
    }

    #[test]
    fn test_groups_by_directory() {
        let style = Style::markdown();
        let out = render_index(&style, "Index", "", &keys(&["a/c/three", "a/b/two", "a/b/one"]));

        let lines: Vec<_> = out.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(
            lines,
            vec![
                "# Index",
                "- a/b",
                "  - [one](a/b/one.md)",
                "  - [two](a/b/two.md)",
                "- a/c",
                "  - [three](a/c/three.md)",
            ]
        );
        assert_eq!(out.matches("- a/b\n").count(), 1);
    }

    #[test]
    fn test_links_relative_to_base_dir() {
        let style = Style::markdown();
        let out = render_index(&style, "Index", "pkg", &keys(&["pkg/my_mod"]));
        assert!(out.contains("- [my\\_mod](my_mod.md)"));
    }

    #[test]
    fn test_root_level_keys() {
        let style = Style::markdown();
        let out = render_index(&style, "Index", "", &keys(&["setup", "pkg/core"]));
        let lines: Vec<_> = out.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(
            lines,
            vec!["# Index", "- pkg", "  - [core](pkg/core.md)", "- .", "  - [setup](setup.md)"]
        );
    }

    #[test]
    fn test_link_targets_the_page_not_the_key() {
        let style = Style::markdown();
        let entries = vec![IndexEntry {
            key: "web/index".to_string(),
            page: "web/index_module".to_string(),
        }];
        let out = render_index(&style, "web", "web", &entries);
        assert!(out.contains("  - [index](index_module.md)\n"));
    }
}
