//! In-memory object source for tests and embedding.

use crate::error::{Error, Result};
use crate::hash::ObjectId;
use crate::source::{ObjectKind, ObjectSource, RawObject};
use crate::tree::{TreeEntry, encode_tree};
use std::collections::HashMap;

/// HashMap-backed [`ObjectSource`].
///
/// Objects are immutable once written; writing the same content twice is a
/// no-op since content-addressing maps it to the same id.
#[derive(Default)]
pub struct MemoryStore {
    objects: HashMap<ObjectId, RawObject>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a blob and return its content id.
    pub fn put_blob(&mut self, data: impl Into<Vec<u8>>) -> ObjectId {
        self.put(RawObject::new(ObjectKind::Blob, data.into()))
    }

    /// Encode and store a tree, returning its content id.
    ///
    /// Entries are canonically sorted by name before encoding, so the id
    /// is independent of insertion order.
    pub fn put_tree(&mut self, entries: Vec<TreeEntry>) -> ObjectId {
        self.put(RawObject::new(ObjectKind::Tree, encode_tree(entries)))
    }

    fn put(&mut self, object: RawObject) -> ObjectId {
        let id = object.compute_id();
        self.objects.entry(id).or_insert(object);
        id
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Check whether an object exists.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }
}

impl ObjectSource for MemoryStore {
    fn read_object(&self, id: &ObjectId) -> Result<RawObject> {
        self.objects
            .get(id)
            .cloned()
            .ok_or_else(|| Error::object_read(*id, "object not found"))
    }
}
