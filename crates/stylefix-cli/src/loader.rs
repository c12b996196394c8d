//! Filesystem discovery and workspace snapshot construction.
//!
//! Walks the target tree (honoring `.gitignore` when configured), filters
//! files through include/exclude patterns, sniffs encodings and builds one
//! immutable [`Workspace`] snapshot. Documents carry paths relative to the
//! workspace root so diagnostics stay stable across machines.

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use stylefix_core::{EngineConfig, TextEncoding, Workspace};
use tracing::{debug, warn};

/// UTF-8 byte-order mark.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A workspace snapshot plus the root it was loaded from.
#[derive(Debug)]
pub struct LoadedWorkspace {
    /// Directory all document paths are relative to.
    pub root: PathBuf,
    /// The initial snapshot.
    pub workspace: Workspace,
    /// Number of files that were read into the snapshot.
    pub files_loaded: usize,
}

impl LoadedWorkspace {
    /// Absolute on-disk path of a document path from this workspace.
    #[must_use]
    pub fn absolute_path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

/// Loads a workspace snapshot from a file or directory.
///
/// `extra_excludes` are appended to the engine's configured exclude
/// patterns. Files that are not valid UTF-8 are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the target path does not exist or a directory walk
/// fails outright. Unreadable individual files are skipped, not fatal.
pub fn load(path: &Path, engine: &EngineConfig, extra_excludes: &[String]) -> Result<LoadedWorkspace> {
    if !path.exists() {
        anyhow::bail!("path does not exist: {}", path.display());
    }

    let mut excludes = engine.exclude.clone();
    excludes.extend_from_slice(extra_excludes);

    let (root, files) = if path.is_file() {
        let root = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        (root, vec![path.to_path_buf()])
    } else {
        let files = discover(path, engine, &excludes)?;
        (path.to_path_buf(), files)
    };

    let project_name = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "workspace".to_string());

    let mut builder = Workspace::builder().project(project_name);
    let mut files_loaded = 0;

    for file in files {
        let relative = file
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| file.clone());

        let bytes = match std::fs::read(&file) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping unreadable file {}: {e}", file.display());
                continue;
            }
        };

        let (encoding, content) = if bytes.starts_with(UTF8_BOM) {
            (TextEncoding::Utf8Bom, bytes[UTF8_BOM.len()..].to_vec())
        } else {
            (TextEncoding::Utf8, bytes)
        };

        let text = match String::from_utf8(content) {
            Ok(text) => text,
            Err(_) => {
                debug!("Skipping non-UTF-8 file: {}", file.display());
                continue;
            }
        };

        builder = builder.document_with_encoding(relative, text, encoding);
        files_loaded += 1;
    }

    Ok(LoadedWorkspace {
        root,
        workspace: builder.build(),
        files_loaded,
    })
}

/// Walks `root` and returns the files eligible for analysis, sorted.
fn discover(root: &Path, engine: &EngineConfig, excludes: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .git_ignore(engine.respect_gitignore)
        .git_global(engine.respect_gitignore)
        .git_exclude(engine.respect_gitignore)
        .hidden(true)
        .build();

    for entry in walker {
        let entry = entry.context("directory walk failed")?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.into_path();

        if should_exclude(&path, excludes) {
            debug!("Excluding: {}", path.display());
            continue;
        }
        if !matches_includes(&path, &engine.include) {
            continue;
        }

        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Checks if a path matches any exclude pattern.
fn should_exclude(path: &Path, patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Glob matching with substring fallback for bare directory names
        if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
            if glob_pattern.matches(&path_str) {
                return true;
            }
        }
        if path_str.contains(pattern.as_str()) {
            return true;
        }
    }

    false
}

/// Checks if a path matches the include patterns (empty = include all).
fn matches_includes(path: &Path, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return true;
    }
    let path_str = path.to_string_lossy();
    patterns.iter().any(|pattern| {
        glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&path_str))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_files_with_relative_paths() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/main.rs"), "fn main() {}\n").unwrap();

        let loaded = load(tmp.path(), &EngineConfig::default(), &[]).unwrap();
        assert_eq!(loaded.files_loaded, 1);

        let doc = loaded.workspace.documents().next().unwrap();
        assert_eq!(doc.path(), Path::new("src/main.rs"));
        assert_eq!(doc.text(), "fn main() {}\n");
        assert_eq!(doc.encoding(), TextEncoding::Utf8);
    }

    #[test]
    fn single_file_target_loads_only_that_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "a\n").unwrap();
        fs::write(tmp.path().join("b.txt"), "b\n").unwrap();

        let loaded = load(&tmp.path().join("a.txt"), &EngineConfig::default(), &[]).unwrap();
        assert_eq!(loaded.files_loaded, 1);
        assert_eq!(
            loaded.workspace.documents().next().unwrap().path(),
            Path::new("a.txt")
        );
    }

    #[test]
    fn strips_bom_and_records_encoding() {
        let tmp = TempDir::new().unwrap();
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"hello\n");
        fs::write(tmp.path().join("bom.txt"), bytes).unwrap();

        let loaded = load(tmp.path(), &EngineConfig::default(), &[]).unwrap();
        let doc = loaded.workspace.documents().next().unwrap();
        assert_eq!(doc.text(), "hello\n");
        assert_eq!(doc.encoding(), TextEncoding::Utf8Bom);
    }

    #[test]
    fn skips_non_utf8_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("binary.bin"), [0xFF, 0xFE, 0x00, 0x01]).unwrap();
        fs::write(tmp.path().join("ok.txt"), "ok\n").unwrap();

        let loaded = load(tmp.path(), &EngineConfig::default(), &[]).unwrap();
        assert_eq!(loaded.files_loaded, 1);
    }

    #[test]
    fn exclude_patterns_match_glob_and_substring() {
        assert!(should_exclude(
            Path::new("/foo/target/debug/main.rs"),
            &["**/target/**".to_string()]
        ));
        assert!(should_exclude(
            Path::new("/foo/vendor/lib.rs"),
            &["vendor".to_string()]
        ));
        assert!(!should_exclude(
            Path::new("/foo/src/lib.rs"),
            &["**/target/**".to_string()]
        ));
    }

    #[test]
    fn include_patterns_restrict_discovery() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.rs"), "a\n").unwrap();
        fs::write(tmp.path().join("b.txt"), "b\n").unwrap();

        let engine = EngineConfig {
            include: vec!["**/*.rs".to_string()],
            ..EngineConfig::default()
        };
        let loaded = load(tmp.path(), &engine, &[]).unwrap();
        assert_eq!(loaded.files_loaded, 1);
        assert_eq!(
            loaded.workspace.documents().next().unwrap().path(),
            Path::new("a.rs")
        );
    }
}
