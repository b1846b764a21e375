//! Commit metadata formatting for `$Format:...$` specs.

use arx_core::{CommitFormatter, CommitRef};

/// Abbreviated id length, matching git's default.
const SHORT_LEN: usize = 7;

/// Expands `%`-placeholders against the source commit and root tree:
/// `%H`/`%h` full and abbreviated commit id, `%T`/`%t` full and
/// abbreviated tree id, `%%` a literal percent. Unknown placeholders pass
/// through unchanged.
pub struct TemplateFormatter {
    tree_id: String,
}

impl TemplateFormatter {
    /// Create a formatter knowing the archive's root tree id.
    pub fn new(tree_id: impl Into<String>) -> Self {
        Self {
            tree_id: tree_id.into(),
        }
    }
}

impl CommitFormatter for TemplateFormatter {
    fn format(&self, commit: &CommitRef, spec: &str) -> String {
        let mut out = String::with_capacity(spec.len());
        let mut chars = spec.chars();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('H') => out.push_str(commit.as_str()),
                Some('h') => out.push_str(short(commit.as_str())),
                Some('T') => out.push_str(&self.tree_id),
                Some('t') => out.push_str(short(&self.tree_id)),
                Some('%') => out.push('%'),
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            }
        }

        out
    }
}

fn short(id: &str) -> &str {
    id.get(..SHORT_LEN).unwrap_or(id)
}
