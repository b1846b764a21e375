//! Depth-first tree walking and archive entry emission.

use crate::attrs::AttributeGate;
use crate::error::{Error, Result};
use crate::hash::ObjectId;
use crate::pathspec::Pathspec;
use crate::pipeline::ContentPipeline;
use crate::source::{AttributeSource, CommitFormatter, CommitRef, ContentFilter, ObjectSource};
use crate::tree::{FileMode, modes};
use tracing::debug;

/// Immutable per-run configuration for one archive walk.
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    /// Root tree to walk.
    pub root: ObjectId,
    /// Prefix prepended verbatim to every emitted path. When it ends in
    /// '/' a synthetic directory entry is emitted for it before descent.
    pub base: String,
    /// Length of `base`; emitted paths minus this prefix form the
    /// attribute-relative path.
    pub base_len: usize,
    /// Optional filter restricting which entries are visited.
    pub pathspec: Option<Pathspec>,
    /// Commit the archive is taken from. Absent means keyword expansion
    /// is skipped entirely.
    pub commit: Option<CommitRef>,
    /// Log each emitted path at debug level.
    pub verbose: bool,
}

impl ArchiveRequest {
    /// Create a request for the given root tree with no prefix, no
    /// pathspec, and no commit.
    pub fn new(root: ObjectId) -> Self {
        Self {
            root,
            base: String::new(),
            base_len: 0,
            pathspec: None,
            commit: None,
            verbose: false,
        }
    }

    /// Set the base path prefix.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self.base_len = self.base.len();
        self
    }

    /// Restrict the walk to a pathspec.
    pub fn with_pathspec(mut self, pathspec: Pathspec) -> Self {
        self.pathspec = Some(pathspec);
        self
    }

    /// Attach the source commit, enabling keyword expansion.
    pub fn with_commit(mut self, commit: CommitRef) -> Self {
        self.commit = Some(commit);
        self
    }

    /// Enable per-entry debug logging.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// What the sink wants the walker to do after an entry.
pub enum SinkOutcome {
    /// Entry consumed; move on to the next sibling.
    Continue,
    /// Entry consumed; descend into the subtree (directories only —
    /// requesting this for anything else behaves like `Continue`).
    Recurse,
    /// Entry failed; abort the entire walk with this error.
    Abort(Box<dyn std::error::Error + Send + Sync>),
}

/// Consumer of the entry stream, typically an archive-format writer.
///
/// Directory and gitlink entries arrive with `data = None` and a path
/// ending in '/'; file and symlink entries carry their final bytes. The
/// path and data borrows are valid only for the duration of the call —
/// sinks that need them longer must copy.
pub trait EntrySink {
    /// Consume one entry and decide how the walk proceeds.
    fn write_entry(
        &mut self,
        path: &str,
        id: &ObjectId,
        mode: FileMode,
        data: Option<&[u8]>,
    ) -> SinkOutcome;
}

impl<F> EntrySink for F
where
    F: FnMut(&str, &ObjectId, FileMode, Option<&[u8]>) -> SinkOutcome,
{
    fn write_entry(
        &mut self,
        path: &str,
        id: &ObjectId,
        mode: FileMode,
        data: Option<&[u8]>,
    ) -> SinkOutcome {
        self(path, id, mode, data)
    }
}

/// Drives a filtered, content-transformed, path-ordered entry stream out
/// of a content-addressed tree.
///
/// Single-threaded and synchronous: every object fetch and sink call
/// blocks the walk. One walk is in flight per invocation; the path
/// accumulator lives on the walk's stack, so concurrent walks through the
/// same `Walker` are independent.
pub struct Walker<'a> {
    objects: &'a dyn ObjectSource,
    gate: AttributeGate<'a>,
    pipeline: ContentPipeline<'a>,
}

impl<'a> Walker<'a> {
    /// Create a walker over the caller's collaborators.
    pub fn new(
        objects: &'a dyn ObjectSource,
        attrs: &'a dyn AttributeSource,
        filter: &'a dyn ContentFilter,
        formatter: &'a dyn CommitFormatter,
    ) -> Self {
        Self {
            objects,
            gate: AttributeGate::new(attrs),
            pipeline: ContentPipeline::new(objects, attrs, filter, formatter),
        }
    }

    /// Standalone ignore predicate, usable outside a walk for
    /// pre-filtering. Takes an attribute-relative path.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.gate.is_ignored(path)
    }

    /// Walk the request's tree depth-first, pre-order, feeding every
    /// included entry to `sink`.
    ///
    /// Terminates with an error as soon as an object fetch fails or the
    /// sink aborts; entries already emitted are not rolled back.
    pub fn walk(&self, request: &ArchiveRequest, sink: &mut dyn EntrySink) -> Result<()> {
        if request.base_len > 0 && request.base.ends_with('/') {
            // Collapse redundant trailing separators down to one for the
            // synthetic container-root entry.
            let mut len = request.base_len;
            let bytes = request.base.as_bytes();
            while len > 1 && bytes[len - 2] == b'/' {
                len -= 1;
            }
            let base = &request.base[..len];
            if request.verbose {
                debug!(path = base, "archive entry");
            }
            if let SinkOutcome::Abort(err) =
                sink.write_entry(base, &request.root, modes::DIRECTORY, None)
            {
                return Err(Error::sink(base, err));
            }
        }

        let mut path = String::with_capacity(256);
        path.push_str(&request.base);
        self.walk_tree(request, &request.root, &mut path, sink)
    }

    /// One recursion frame: visit every entry of `tree_id`. On entry the
    /// shared path buffer holds this frame's base; it is restored before
    /// returning.
    fn walk_tree(
        &self,
        request: &ArchiveRequest,
        tree_id: &ObjectId,
        path: &mut String,
        sink: &mut dyn EntrySink,
    ) -> Result<()> {
        let entries = self.objects.read_tree(tree_id).map_err(|err| match err {
            already @ Error::ObjectRead { .. } => already,
            other => Error::object_read(*tree_id, other.to_string()),
        })?;
        let frame_len = path.len();

        for entry in &entries {
            path.truncate(frame_len);
            path.push_str(&entry.name);

            let is_dir = modes::is_directory(entry.mode);
            let is_gitlink = modes::is_gitlink(entry.mode);
            let rel = &path[request.base_len..];

            if let Some(spec) = &request.pathspec
                && !spec.matches(rel, is_dir)
            {
                continue;
            }

            // Pruned entries are never fetched and never reach the sink.
            if self.gate.is_ignored(rel) {
                continue;
            }

            if is_dir || is_gitlink {
                path.push('/');
                if request.verbose {
                    debug!(path = %path, "archive entry");
                }
                match sink.write_entry(path, &entry.id, entry.mode, None) {
                    SinkOutcome::Abort(err) => return Err(Error::sink(path.clone(), err)),
                    // Gitlinks reference a foreign object namespace and
                    // are never descended into.
                    SinkOutcome::Recurse if is_dir => {
                        self.walk_tree(request, &entry.id, path, sink)?;
                    }
                    SinkOutcome::Recurse | SinkOutcome::Continue => {}
                }
            } else {
                let data =
                    self.pipeline
                        .materialize(rel, &entry.id, entry.mode, request.commit.as_ref())?;
                if request.verbose {
                    debug!(path = %path, "archive entry");
                }
                if let SinkOutcome::Abort(err) =
                    sink.write_entry(path, &entry.id, entry.mode, Some(&data))
                {
                    return Err(Error::sink(path.clone(), err));
                }
            }
        }

        path.truncate(frame_len);
        Ok(())
    }
}
