//! Literal-prefix pathspec matching.

/// Restricts a walk to entries under a set of literal path prefixes.
///
/// Patterns are matched against base-relative paths on component
/// boundaries: pattern `sub` matches `sub`, `sub/` and `sub/file`, but not
/// `submarine`. An empty pattern set matches everything. Directories also
/// match when a pattern lies somewhere beneath them, so descent can reach
/// the pattern.
#[derive(Debug, Clone, Default)]
pub struct Pathspec {
    patterns: Vec<String>,
}

impl Pathspec {
    /// Build a pathspec from literal path patterns.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.into().trim_end_matches('/').to_string())
            .collect();
        Self { patterns }
    }

    /// Returns `true` when no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether the entry at `path` should be visited. `is_dir` marks
    /// tree entries, for which a partial match (the pattern lies deeper)
    /// is enough to keep descending.
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        let path = path.trim_end_matches('/');
        self.patterns.iter().any(|pattern| {
            if pattern.is_empty() {
                return true;
            }
            if under(path, pattern) {
                return true;
            }
            is_dir && under(pattern, path)
        })
    }
}

/// True when `path` equals `prefix` or lies beneath it.
fn under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = Pathspec::default();
        assert!(spec.is_empty());
        assert!(spec.matches("anything", false));
        assert!(spec.matches("a/b/c", true));
    }

    #[test]
    fn test_exact_and_nested_match() {
        let spec = Pathspec::new(["sub"]);
        assert!(spec.matches("sub", true));
        assert!(spec.matches("sub/", true));
        assert!(spec.matches("sub/file.txt", false));
        assert!(spec.matches("sub/deep/file.txt", false));
    }

    #[test]
    fn test_component_boundary() {
        let spec = Pathspec::new(["sub"]);
        assert!(!spec.matches("submarine", false));
        assert!(!spec.matches("submarine/file", false));
    }

    #[test]
    fn test_directory_on_the_way_to_pattern() {
        let spec = Pathspec::new(["a/b/c.txt"]);
        assert!(spec.matches("a", true));
        assert!(spec.matches("a/b", true));
        assert!(spec.matches("a/b/c.txt", false));
        // Files on the way are not matches, and unrelated dirs are pruned.
        assert!(!spec.matches("a/b/other.txt", false));
        assert!(!spec.matches("x", true));
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let spec = Pathspec::new(["docs/"]);
        assert!(spec.matches("docs", true));
        assert!(spec.matches("docs/guide.md", false));
        assert!(!spec.matches("docs-old", true));
    }

    #[test]
    fn test_multiple_patterns() {
        let spec = Pathspec::new(["src", "README.md"]);
        assert!(spec.matches("src/main.rs", false));
        assert!(spec.matches("README.md", false));
        assert!(!spec.matches("LICENSE", false));
    }
}
