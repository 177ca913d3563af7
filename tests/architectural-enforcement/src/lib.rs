//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles
//! of the retrier crates:
//! - No sleep() calls in production code (retries are immediate)
//! - No panicking shortcuts (`unwrap`, `expect`, `panic!`) in production code
//!
//! The helpers below collect production source lines so each test only has
//! to describe what a violation looks like.

use std::fs;
use std::path::{Path, PathBuf};

/// Files that only exist for tests even though they live under `src/`
const TEST_ONLY_FILES: &[&str] = &["test_utils.rs"];

/// Production source file with test-only code removed
#[derive(Debug)]
pub struct SourceFile {
    /// Path of the file on disk
    pub path: PathBuf,
    /// Source lines, with `#[cfg(test)]` items blanked out
    pub lines: Vec<String>,
}

/// Root of the workspace this crate belongs to
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

/// Collect production sources under `dir` (relative to the workspace root)
///
/// Panics if the directory does not exist, so a moved crate cannot make the
/// checks pass vacuously.
pub fn production_sources(dir: &str) -> Vec<SourceFile> {
    let root = workspace_root().join(dir);
    assert!(root.is_dir(), "source directory {} not found", root.display());

    walkdir::WalkDir::new(&root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            !TEST_ONLY_FILES.contains(&&*name)
        })
        .filter_map(|e| {
            let content = fs::read_to_string(e.path()).ok()?;
            Some(SourceFile {
                path: e.path().to_path_buf(),
                lines: strip_test_code(&content),
            })
        })
        .collect()
}

/// Drop every item annotated with `#[cfg(test)]`
///
/// Skipped lines are replaced by empty strings so reported line numbers still
/// match the file on disk. An item ends at its first top-level `;` or at the
/// brace closing its body.
pub fn strip_test_code(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut skipping = false;
    let mut depth: usize = 0;
    let mut opened = false;

    for line in content.lines() {
        if !skipping && line.trim_start().starts_with("#[cfg(test)]") {
            skipping = true;
            depth = 0;
            opened = false;
            lines.push(String::new());
            continue;
        }
        if !skipping {
            lines.push(line.to_string());
            continue;
        }

        lines.push(String::new());
        let code = code_part(line);
        if code.trim_start().starts_with("#[") {
            continue;
        }
        for ch in code.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        let ends_statement = !opened && code.trim_end().ends_with(';');
        if ends_statement || (opened && depth == 0) {
            skipping = false;
        }
    }
    lines
}

/// Part of a line before any `//` comment
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Report every production line matching `is_violation` as `path:line - code`
pub fn find_violations<F>(sources: &[SourceFile], is_violation: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut violations = Vec::new();
    for source in sources {
        for (idx, line) in source.lines.iter().enumerate() {
            if is_violation(code_part(line)) {
                violations.push(format!(
                    "{}:{} - {}",
                    source.path.display(),
                    idx + 1,
                    line.trim()
                ));
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_lines(content: &str) -> Vec<String> {
        strip_test_code(content)
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect()
    }

    #[test]
    fn test_strip_test_code() {
        let content = "fn a() {}\n#[cfg(test)]\nmod tests {\n    fn b() { x.unwrap(); }\n}\n";
        assert_eq!(code_lines(content), vec!["fn a() {}".to_string()]);
    }

    #[test]
    fn test_strip_test_code_keeps_items_after_test_module_declaration() {
        let content =
            "pub mod a;\n\n#[cfg(test)]\npub mod test_utils;\n\npub use a::B;\nfn c() { x.unwrap(); }\n";
        assert_eq!(
            code_lines(content),
            vec![
                "pub mod a;".to_string(),
                "pub use a::B;".to_string(),
                "fn c() { x.unwrap(); }".to_string(),
            ]
        );
    }

    #[test]
    fn test_strip_test_code_preserves_line_numbers() {
        let content = "#[cfg(test)]\nmod tests {\n}\nfn late() {}\n";
        let lines = strip_test_code(content);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "fn late() {}");
    }

    #[test]
    fn test_code_part_ignores_comments() {
        assert_eq!(code_part("let a = 1; // tokio::time::sleep(d)"), "let a = 1; ");
        assert_eq!(code_part("/// Never call `.unwrap()` here"), "");
    }
}
