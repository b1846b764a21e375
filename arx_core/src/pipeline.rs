//! Content materialization: object bytes → filtered → expanded.

use crate::attrs::AttributeGate;
use crate::error::{Error, Result};
use crate::expand::expand;
use crate::hash::ObjectId;
use crate::source::{
    AttributeSource, CommitFormatter, CommitRef, ContentFilter, ObjectKind, ObjectSource,
};
use crate::tree::{FileMode, modes};
use std::borrow::Cow;

/// Produces the final bytes of one archive entry.
///
/// Fetches the object, then for regular-file blobs applies the working-tree
/// filter and, when a commit reference is supplied and the path carries
/// `export-subst`, keyword expansion. Directories never reach this; symlink
/// and non-blob content is returned as fetched.
pub struct ContentPipeline<'a> {
    objects: &'a dyn ObjectSource,
    filter: &'a dyn ContentFilter,
    formatter: &'a dyn CommitFormatter,
    gate: AttributeGate<'a>,
}

impl<'a> ContentPipeline<'a> {
    /// Create a pipeline over the caller's collaborators.
    pub fn new(
        objects: &'a dyn ObjectSource,
        attrs: &'a dyn AttributeSource,
        filter: &'a dyn ContentFilter,
        formatter: &'a dyn CommitFormatter,
    ) -> Self {
        Self {
            objects,
            filter,
            formatter,
            gate: AttributeGate::new(attrs),
        }
    }

    /// Materialize the archive content for the entry at `path`.
    ///
    /// A fetch failure is fatal for the caller's walk and names the
    /// offending object id. Ownership of the returned buffer transfers to
    /// the caller.
    pub fn materialize(
        &self,
        path: &str,
        id: &ObjectId,
        mode: FileMode,
        commit: Option<&CommitRef>,
    ) -> Result<Vec<u8>> {
        let obj = self.objects.read_object(id).map_err(|err| match err {
            already @ Error::ObjectRead { .. } => already,
            other => Error::object_read(*id, other.to_string()),
        })?;

        // Only regular-file blobs are converted; symlink targets and
        // oddly-typed objects are archived byte for byte.
        if obj.kind != ObjectKind::Blob || !modes::is_regular_file(mode) {
            return Ok(obj.data);
        }

        let data = self.filter.convert(path, obj.data);

        if let Some(commit) = commit
            && self.gate.is_substitutable(path)
            && let Cow::Owned(expanded) = expand(self.formatter, commit, &data)
        {
            return Ok(expanded);
        }

        Ok(data)
    }
}
