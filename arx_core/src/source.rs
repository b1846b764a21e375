//! Collaborator interfaces consumed by the entry-stream pipeline.
//!
//! The core never owns an object database, an attribute pattern engine, a
//! working-tree filter, or a commit formatter. It drives them through the
//! traits defined here; callers supply the implementations.

use crate::error::{Error, Result};
use crate::hash::ObjectId;
use crate::tree::{TreeEntry, decode_tree};

/// Kind of a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Raw byte content (file data or symlink target).
    Blob,
    /// Encoded directory listing.
    Tree,
}

impl ObjectKind {
    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
        }
    }

    /// Returns the kind tag byte used for id computation.
    pub fn tag(&self) -> u8 {
        match self {
            ObjectKind::Blob => b'b',
            ObjectKind::Tree => b't',
        }
    }
}

/// One object as fetched from the store: declared kind plus raw bytes.
#[derive(Debug, Clone)]
pub struct RawObject {
    /// Declared kind of the object.
    pub kind: ObjectKind,
    /// Raw object payload.
    pub data: Vec<u8>,
}

impl RawObject {
    /// Create a raw object.
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Compute the content id: BLAKE3 over the kind tag byte followed by
    /// the payload, so a blob and a tree with identical bytes get
    /// distinct ids.
    pub fn compute_id(&self) -> ObjectId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[self.kind.tag()]);
        hasher.update(&self.data);
        ObjectId::from_bytes(*hasher.finalize().as_bytes())
    }
}

/// Read-only content-addressed object source.
///
/// A failed read is fatal for the surrounding walk; implementations should
/// return [`Error::ObjectRead`] naming the offending id where possible.
pub trait ObjectSource {
    /// Fetch an object's kind and raw bytes by content id.
    fn read_object(&self, id: &ObjectId) -> Result<RawObject>;

    /// Fetch and decode a tree object into its entries.
    fn read_tree(&self, id: &ObjectId) -> Result<Vec<TreeEntry>> {
        let obj = self.read_object(id)?;
        if obj.kind != ObjectKind::Tree {
            return Err(Error::wrong_object_kind("tree", obj.kind.as_str()));
        }
        decode_tree(&obj.data)
    }
}

/// Tri-state result of an attribute lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrState {
    /// The attribute is explicitly set (true).
    Set,
    /// The attribute is explicitly unset (false).
    Unset,
    /// No pattern said anything about this path.
    Unspecified,
}

/// Resolves a named attribute for a path against configured patterns.
pub trait AttributeSource {
    /// Look up `attr` for `path`, returning the tri-state match result.
    fn check(&self, path: &str, attr: &str) -> Result<AttrState>;
}

/// Working-tree content conversion applied to blob bytes before archiving
/// (line-ending normalization and the like). Infallible by contract: a
/// filter that cannot convert returns its input unchanged.
pub trait ContentFilter {
    /// Convert `data` for the file at `path`.
    fn convert(&self, path: &str, data: Vec<u8>) -> Vec<u8>;
}

/// A filter that passes content through untouched.
pub struct IdentityFilter;

impl ContentFilter for IdentityFilter {
    fn convert(&self, _path: &str, data: Vec<u8>) -> Vec<u8> {
        data
    }
}

/// Opaque reference to the commit an archive is taken from. The core never
/// interprets it; the [`CommitFormatter`] does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef(String);

impl CommitRef {
    /// Create a commit reference from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        CommitRef(id.into())
    }

    /// The textual form of the reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Expands a format specifier against a commit's metadata.
pub trait CommitFormatter {
    /// Render `spec` for `commit`, returning the replacement text.
    fn format(&self, commit: &CommitRef, spec: &str) -> String;
}
