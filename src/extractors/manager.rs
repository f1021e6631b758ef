//! ExtractorManager - Module assembly and source discovery
//!
//! Reads and parses files, hands the tree to the Python extractor, and walks
//! directory trees to produce a lazy sequence of Module records.

use crate::error::{ExtractError, ExtractResult};
use crate::extractors::base::Module;
use crate::extractors::python::PythonExtractor;
use crate::language::{is_source_file, parse_source, SOURCE_SUFFIX};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What a directory run does when one file fails to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Yield the error; callers collecting into `Result` stop there
    #[default]
    Abort,
    /// Log the error and continue with the next file
    SkipAndReport,
}

/// Manager for source extraction
pub struct ExtractorManager {
    policy: FailurePolicy,
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self {
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    /// Read, parse and extract one source file
    pub fn extract(&self, path: &Path) -> ExtractResult<Module> {
        let content = fs::read_to_string(path).map_err(|source| ExtractError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.extract_source(path, &content)
    }

    /// Extract already-loaded source text as if it were read from `path`
    pub fn extract_source(&self, path: &Path, content: &str) -> ExtractResult<Module> {
        let tree = parse_source(path, content)?;
        let module = PythonExtractor::new(path, content).extract_module(module_name(path), &tree)?;

        debug!(
            "Extracted {}: {} imports, {} statements, {} classes, {} functions",
            path.display(),
            module.imports.len(),
            module.statements.len(),
            module.classes.len(),
            module.functions.len()
        );
        Ok(module)
    }

    /// Every source file under `root`, depth-first
    ///
    /// A `root` that is itself a source file yields just that file. Unreadable
    /// directory entries are logged and skipped.
    pub fn find_source_files(&self, root: &Path) -> Box<dyn Iterator<Item = PathBuf>> {
        if root.is_file() {
            return if is_source_file(root) {
                Box::new(std::iter::once(root.to_path_buf()))
            } else {
                Box::new(std::iter::empty())
            };
        }

        let pattern = format!(
            "{}/**/*.{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            SOURCE_SUFFIX
        );
        match glob::glob(&pattern) {
            Ok(paths) => Box::new(paths.filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    warn!("⚠️  Skipping unreadable path {}: {}", e.path().display(), e.error());
                    None
                }
            })),
            Err(e) => {
                warn!("⚠️  Invalid search pattern '{}': {}", pattern, e);
                Box::new(std::iter::empty())
            }
        }
    }

    /// Lazily extract every source file under `root`, in discovery order
    ///
    /// With [`FailurePolicy::SkipAndReport`] failing files are logged and left out;
    /// otherwise their errors are yielded in place.
    pub fn find_and_extract<'a>(
        &'a self,
        root: &Path,
    ) -> impl Iterator<Item = ExtractResult<Module>> + 'a {
        self.find_source_files(root)
            .map(move |path| self.extract(&path))
            .filter_map(move |result| match (result, self.policy) {
                (Err(e), FailurePolicy::SkipAndReport) => {
                    warn!("⚠️  Skipping file: {}", e);
                    None
                }
                (result, _) => Some(result),
            })
    }
}

/// File name with the source suffix stripped
pub fn module_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    match file_name.strip_suffix(&format!(".{}", SOURCE_SUFFIX)) {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_module_name_strips_suffix() {
        assert_eq!(module_name(Path::new("pkg/my_module.py")), "my_module");
        assert_eq!(module_name(Path::new("pkg/__init__.py")), "__init__");
    }

    #[test]
    fn test_extract_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "tools.py", "import os\nimport sys as system\n");

        let module = ExtractorManager::new().extract(&path).unwrap();
        assert_eq!(module.name, "tools");
        assert_eq!(module.path, path);
        assert_eq!(module.required_modules(), vec!["os", "sys"]);
    }

    #[test]
    fn test_extract_missing_file() {
        let err = ExtractorManager::new()
            .extract(Path::new("/definitely/not/here.py"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::FileRead { .. }));
    }

    #[test]
    fn test_find_source_files_recurses() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.py", "");
        write(temp.path(), "pkg/b.py", "");
        write(temp.path(), "pkg/deep/c.py", "");
        write(temp.path(), "pkg/notes.txt", "");

        let manager = ExtractorManager::new();
        let mut found: Vec<_> = manager
            .find_source_files(temp.path())
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        found.sort();
        assert_eq!(
            found,
            vec![
                PathBuf::from("a.py"),
                PathBuf::from("pkg/b.py"),
                PathBuf::from("pkg/deep/c.py"),
            ]
        );
    }

    #[test]
    fn test_find_source_files_single_file_root() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "solo.py", "");
        let found: Vec<_> = ExtractorManager::new().find_source_files(&path).collect();
        assert_eq!(found, vec![path]);
    }

    #[test]
    fn test_abort_policy_yields_errors() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "good.py", "x = 1\n");
        write(temp.path(), "bad.py", "def broken(:\n");

        let manager = ExtractorManager::new();
        let result: ExtractResult<Vec<_>> = manager.find_and_extract(temp.path()).collect();
        assert!(matches!(result, Err(ExtractError::SyntaxParse { .. })));
    }

    #[test]
    fn test_skip_policy_continues_past_failures() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "good.py", "x = 1\n");
        write(temp.path(), "bad.py", "def broken(:\n");

        let manager = ExtractorManager::with_policy(FailurePolicy::SkipAndReport);
        let modules: Vec<_> = manager
            .find_and_extract(temp.path())
            .collect::<ExtractResult<_>>()
            .unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "good");
    }
}
