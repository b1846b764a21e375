//! Export-attribute decisions for archive paths.

use crate::source::{AttrState, AttributeSource};
use tracing::debug;

/// Attribute excluding a path (and its subtree) from archives.
pub const EXPORT_IGNORE: &str = "export-ignore";

/// Attribute marking a path's content eligible for keyword substitution.
pub const EXPORT_SUBST: &str = "export-subst";

/// Boolean gate over the attribute engine's tri-state answers.
///
/// Constructed once per walk over the caller's pattern engine. A lookup is
/// true only when the attribute is explicitly set; unset, unspecified, and
/// engine failures all read as false (fail-open), so a broken attribute
/// source never aborts an archive.
pub struct AttributeGate<'a> {
    attrs: &'a dyn AttributeSource,
}

impl<'a> AttributeGate<'a> {
    /// Create a gate over an attribute source.
    pub fn new(attrs: &'a dyn AttributeSource) -> Self {
        Self { attrs }
    }

    /// Whether `path` is excluded from the archive.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.check(path, EXPORT_IGNORE)
    }

    /// Whether `path`'s content is eligible for keyword substitution.
    pub fn is_substitutable(&self, path: &str) -> bool {
        self.check(path, EXPORT_SUBST)
    }

    fn check(&self, path: &str, attr: &str) -> bool {
        match self.attrs.check(path, attr) {
            Ok(AttrState::Set) => true,
            Ok(AttrState::Unset) | Ok(AttrState::Unspecified) => false,
            Err(err) => {
                debug!(path, attr, %err, "attribute lookup failed, treating as unspecified");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use std::collections::HashMap;

    /// Fixed attribute table keyed by (path, attr).
    struct TableAttrs {
        table: HashMap<(String, String), AttrState>,
        fail: bool,
    }

    impl TableAttrs {
        fn new(rows: &[(&str, &str, AttrState)]) -> Self {
            let table = rows
                .iter()
                .map(|(p, a, s)| ((p.to_string(), a.to_string()), *s))
                .collect();
            Self { table, fail: false }
        }

        fn failing() -> Self {
            Self {
                table: HashMap::new(),
                fail: true,
            }
        }
    }

    impl AttributeSource for TableAttrs {
        fn check(&self, path: &str, attr: &str) -> Result<AttrState> {
            if self.fail {
                return Err(Error::invalid_tree_entry("engine exploded"));
            }
            Ok(self
                .table
                .get(&(path.to_string(), attr.to_string()))
                .copied()
                .unwrap_or(AttrState::Unspecified))
        }
    }

    #[test]
    fn test_set_is_true() {
        let attrs = TableAttrs::new(&[
            ("secret.txt", EXPORT_IGNORE, AttrState::Set),
            ("version.txt", EXPORT_SUBST, AttrState::Set),
        ]);
        let gate = AttributeGate::new(&attrs);

        assert!(gate.is_ignored("secret.txt"));
        assert!(gate.is_substitutable("version.txt"));
    }

    #[test]
    fn test_unset_and_unspecified_are_false() {
        let attrs = TableAttrs::new(&[("a.txt", EXPORT_IGNORE, AttrState::Unset)]);
        let gate = AttributeGate::new(&attrs);

        assert!(!gate.is_ignored("a.txt"));
        assert!(!gate.is_ignored("never-mentioned.txt"));
        assert!(!gate.is_substitutable("a.txt"));
    }

    #[test]
    fn test_engine_failure_is_fail_open() {
        let attrs = TableAttrs::failing();
        let gate = AttributeGate::new(&attrs);

        assert!(!gate.is_ignored("anything"));
        assert!(!gate.is_substitutable("anything"));
    }
}
