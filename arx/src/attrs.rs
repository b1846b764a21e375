//! Export attributes resolved from gitignore-style glob sets.

use anyhow::{Context, Result};
use arx_core::{AttrState, AttributeSource, EXPORT_IGNORE, EXPORT_SUBST};
use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// [`AttributeSource`] backed by two glob sets: one for `export-ignore`,
/// one for `export-subst`.
///
/// Globs use gitignore syntax, so `!`-prefixed patterns explicitly unset
/// the attribute for matching paths.
pub struct GlobAttributes {
    ignore: Gitignore,
    subst: Gitignore,
}

impl GlobAttributes {
    /// Build matchers from the two pattern lists.
    pub fn new(ignore_globs: &[String], subst_globs: &[String]) -> Result<Self> {
        Ok(Self {
            ignore: build_matcher(ignore_globs)?,
            subst: build_matcher(subst_globs)?,
        })
    }
}

fn build_matcher(globs: &[String]) -> Result<Gitignore> {
    let mut builder = GitignoreBuilder::new(Path::new(""));
    for glob in globs {
        builder
            .add_line(None, glob)
            .with_context(|| format!("Invalid glob pattern: {}", glob))?;
    }
    Ok(builder.build()?)
}

impl AttributeSource for GlobAttributes {
    fn check(&self, path: &str, attr: &str) -> arx_core::Result<AttrState> {
        let matcher = match attr {
            EXPORT_IGNORE => &self.ignore,
            EXPORT_SUBST => &self.subst,
            _ => return Ok(AttrState::Unspecified),
        };

        let is_dir = path.ends_with('/');
        match matcher.matched(path.trim_end_matches('/'), is_dir) {
            Match::Ignore(_) => Ok(AttrState::Set),
            Match::Whitelist(_) => Ok(AttrState::Unset),
            Match::None => Ok(AttrState::Unspecified),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globs(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ignore_glob_sets_attribute() {
        let attrs = GlobAttributes::new(&globs(&["*.log", "secret"]), &[]).unwrap();

        assert_eq!(
            attrs.check("debug.log", EXPORT_IGNORE).unwrap(),
            AttrState::Set
        );
        assert_eq!(
            attrs.check("secret", EXPORT_IGNORE).unwrap(),
            AttrState::Set
        );
        assert_eq!(
            attrs.check("kept.txt", EXPORT_IGNORE).unwrap(),
            AttrState::Unspecified
        );
    }

    #[test]
    fn test_negated_glob_unsets_attribute() {
        let attrs = GlobAttributes::new(&globs(&["*.log", "!keep.log"]), &[]).unwrap();

        assert_eq!(
            attrs.check("debug.log", EXPORT_IGNORE).unwrap(),
            AttrState::Set
        );
        assert_eq!(
            attrs.check("keep.log", EXPORT_IGNORE).unwrap(),
            AttrState::Unset
        );
    }

    #[test]
    fn test_attribute_sets_are_independent() {
        let attrs = GlobAttributes::new(&globs(&["*.log"]), &globs(&["VERSION"])).unwrap();

        assert_eq!(
            attrs.check("VERSION", EXPORT_SUBST).unwrap(),
            AttrState::Set
        );
        assert_eq!(
            attrs.check("VERSION", EXPORT_IGNORE).unwrap(),
            AttrState::Unspecified
        );
        assert_eq!(
            attrs.check("debug.log", EXPORT_SUBST).unwrap(),
            AttrState::Unspecified
        );
    }

    #[test]
    fn test_unknown_attribute_is_unspecified() {
        let attrs = GlobAttributes::new(&globs(&["*"]), &[]).unwrap();
        assert_eq!(
            attrs.check("anything", "delta-base").unwrap(),
            AttrState::Unspecified
        );
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        assert!(GlobAttributes::new(&globs(&["a/**b["]), &[]).is_err());
    }

    #[test]
    fn test_nested_path_glob() {
        let attrs = GlobAttributes::new(&globs(&["docs/internal"]), &[]).unwrap();
        assert_eq!(
            attrs.check("docs/internal", EXPORT_IGNORE).unwrap(),
            AttrState::Set
        );
        assert_eq!(
            attrs.check("docs/public", EXPORT_IGNORE).unwrap(),
            AttrState::Unspecified
        );
    }
}
