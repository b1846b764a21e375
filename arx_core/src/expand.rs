//! Keyword expansion of `$Format:...$` tokens in blob content.

use crate::source::{CommitFormatter, CommitRef};
use memchr::{memchr, memmem};
use std::borrow::Cow;

/// Literal start marker of a format token.
pub const FORMAT_MARKER: &[u8] = b"$Format:";

/// Terminating delimiter of a format token.
const TERMINATOR: u8 = b'$';

/// Replace every `$Format:<spec>$` token in `content` with the formatter's
/// rendering of `<spec>` for `commit`.
///
/// Content without the marker is returned borrowed, untouched. A marker
/// with no terminator before end of content is not an error: scanning
/// stops and the remaining bytes, dangling marker included, are copied
/// through literally.
pub fn expand<'a>(
    formatter: &dyn CommitFormatter,
    commit: &CommitRef,
    content: &'a [u8],
) -> Cow<'a, [u8]> {
    let finder = memmem::Finder::new(FORMAT_MARKER);
    if finder.find(content).is_none() {
        return Cow::Borrowed(content);
    }

    let mut out = Vec::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = finder.find(rest) {
        let after = &rest[start + FORMAT_MARKER.len()..];
        let Some(end) = memchr(TERMINATOR, after) else {
            break;
        };

        out.extend_from_slice(&rest[..start]);
        // Specs are caller-authored text; anything non-UTF-8 is handed to
        // the formatter lossily rather than failing the archive.
        let spec = String::from_utf8_lossy(&after[..end]);
        out.extend_from_slice(formatter.format(commit, &spec).as_bytes());
        rest = &after[end + 1..];
    }
    out.extend_from_slice(rest);
    Cow::Owned(out)
}
