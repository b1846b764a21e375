//! # Arx Core
//!
//! Filtered, content-transformed, path-ordered entry streams for archive
//! writers, produced by walking a content-addressed tree.
//!
//! The library sits between a content-addressed object store and a
//! format-specific archive serializer. It decides, per path, whether an
//! entry is included (`export-ignore` attributes, pathspecs), whether its
//! content is rewritten before archiving (working-tree filtering,
//! `$Format:...$` keyword expansion under `export-subst`), and feeds the
//! result to a sink callback in a single depth-first pass.
//!
//! Object storage, attribute pattern matching, content filtering, and
//! commit formatting are collaborator traits supplied by the caller; an
//! in-memory store is included for tests and embedding.
//!
//! ## Example
//!
//! ```
//! use arx_core::{
//!     ArchiveRequest, CommitFormatter, CommitRef, EntryKind, IdentityFilter, MemoryStore,
//!     ObjectId, SinkOutcome, TreeEntry, Walker, modes,
//! };
//! use arx_core::{AttrState, AttributeSource};
//!
//! struct NoAttrs;
//! impl AttributeSource for NoAttrs {
//!     fn check(&self, _path: &str, _attr: &str) -> arx_core::Result<AttrState> {
//!         Ok(AttrState::Unspecified)
//!     }
//! }
//!
//! struct NoFormat;
//! impl CommitFormatter for NoFormat {
//!     fn format(&self, _commit: &CommitRef, spec: &str) -> String {
//!         spec.to_string()
//!     }
//! }
//!
//! # fn main() -> arx_core::Result<()> {
//! let mut store = MemoryStore::new();
//! let blob = store.put_blob(b"hello".as_slice());
//! let entry = TreeEntry::new(EntryKind::Blob, modes::REGULAR, blob, "hello.txt".into())?;
//! let root = store.put_tree(vec![entry]);
//!
//! let walker = Walker::new(&store, &NoAttrs, &IdentityFilter, &NoFormat);
//! let request = ArchiveRequest::new(root).with_base("proj/");
//! let mut sink = |path: &str, _id: &ObjectId, _mode: u32, data: Option<&[u8]>| {
//!     println!("{} ({} bytes)", path, data.map_or(0, |d| d.len()));
//!     SinkOutcome::Recurse
//! };
//! walker.walk(&request, &mut sink)?;
//! # Ok(())
//! # }
//! ```

mod attrs;
mod error;
mod expand;
mod hash;
mod memory;
mod pathspec;
mod pipeline;
mod source;
mod tree;
mod walk;

pub use attrs::{AttributeGate, EXPORT_IGNORE, EXPORT_SUBST};
pub use error::{Error, Result};
pub use expand::{FORMAT_MARKER, expand};
pub use hash::{ID_SIZE, ObjectId};
pub use memory::MemoryStore;
pub use pathspec::Pathspec;
pub use pipeline::ContentPipeline;
pub use source::{
    AttrState, AttributeSource, CommitFormatter, CommitRef, ContentFilter, IdentityFilter,
    ObjectKind, ObjectSource, RawObject,
};
pub use tree::{EntryKind, FileMode, TreeEntry, decode_tree, encode_tree, modes};
pub use walk::{ArchiveRequest, EntrySink, SinkOutcome, Walker};
