//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleep() calls in production code
//! - No blocking I/O inside the async widget paths
//!
//! The helpers here walk the production sources of every crate and hand the
//! tests only the code that ships, with `#[cfg(test)]` modules cut off.

use std::fs;
use std::path::{Path, PathBuf};

/// Source directories checked by the enforcement tests, relative to the
/// workspace root
pub const PRODUCTION_DIRS: &[&str] = &["namegen/core/src", "tui/src"];

/// One production source file
#[derive(Debug)]
pub struct SourceFile {
    /// Path relative to the workspace root
    pub path: PathBuf,
    /// Lines before the first `#[cfg(test)]`
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Lines with trailing `//` comments removed, numbered from 1
    pub fn code_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().map(|(idx, line)| {
            let code = line.split("//").next().unwrap_or(line);
            (idx + 1, code)
        })
    }

    /// Whether this file lives at `suffix` (e.g. `core/src/config.rs`)
    pub fn is(&self, suffix: &str) -> bool {
        self.path.ends_with(suffix)
    }
}

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../.."))
}

/// Every production `.rs` file under [`PRODUCTION_DIRS`]
pub fn production_sources() -> Vec<SourceFile> {
    let root = workspace_root();
    let mut files = Vec::new();

    for dir in PRODUCTION_DIRS {
        let path = root.join(dir);
        if !path.exists() {
            continue;
        }

        for entry in walkdir::WalkDir::new(&path)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
                continue;
            }
            let Ok(content) = fs::read_to_string(entry.path()) else {
                continue;
            };

            let lines = content
                .lines()
                .take_while(|line| !line.trim_start().starts_with("#[cfg(test)]"))
                .map(str::to_string)
                .collect();

            files.push(SourceFile {
                path: entry
                    .path()
                    .strip_prefix(&root)
                    .unwrap_or(entry.path())
                    .to_path_buf(),
                lines,
            });
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_both_crates() {
        let files = production_sources();
        assert!(files.iter().any(|f| f.is("namegen/core/src/lib.rs")));
        assert!(files.iter().any(|f| f.is("tui/src/app.rs")));
    }

    #[test]
    fn test_test_modules_are_cut() {
        for file in production_sources() {
            assert!(
                !file.lines.iter().any(|l| l.contains("#[cfg(test)]")),
                "{}",
                file.path.display()
            );
        }
    }
}
