//! Tree encoding and directory structure.

use crate::error::{Error, Result};
use crate::hash::ObjectId;
use std::io::Read;

/// Entry kind in a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A blob (file or symlink target).
    Blob = 1,
    /// A subtree (directory).
    Tree = 2,
    /// A commit in a foreign object namespace. Never recursed into.
    Gitlink = 3,
}

impl EntryKind {
    /// Convert to byte representation.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Parse from byte representation.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            1 => Ok(EntryKind::Blob),
            2 => Ok(EntryKind::Tree),
            3 => Ok(EntryKind::Gitlink),
            _ => Err(Error::invalid_tree_entry(format!(
                "Invalid entry kind: {}",
                value
            ))),
        }
    }
}

/// File mode (POSIX-style, same layout git uses).
pub type FileMode = u32;

/// Common file modes and mode predicates.
pub mod modes {
    use super::FileMode;

    /// Regular file (non-executable).
    pub const REGULAR: FileMode = 0o100644;

    /// Executable file.
    pub const EXECUTABLE: FileMode = 0o100755;

    /// Symbolic link.
    pub const SYMLINK: FileMode = 0o120000;

    /// Directory.
    pub const DIRECTORY: FileMode = 0o040755;

    /// Reference to a commit in another object namespace.
    pub const GITLINK: FileMode = 0o160000;

    const TYPE_MASK: FileMode = 0o170000;

    /// True for regular files (executable or not).
    pub fn is_regular_file(mode: FileMode) -> bool {
        mode & TYPE_MASK == 0o100000
    }

    /// True for directories.
    pub fn is_directory(mode: FileMode) -> bool {
        mode & TYPE_MASK == 0o040000
    }

    /// True for symbolic links.
    pub fn is_symlink(mode: FileMode) -> bool {
        mode & TYPE_MASK == 0o120000
    }

    /// True for gitlinks.
    pub fn is_gitlink(mode: FileMode) -> bool {
        mode & TYPE_MASK == 0o160000
    }
}

/// An entry in a tree (file, symlink, subdirectory, or gitlink).
///
/// Transient during a walk: produced while one tree object is being
/// visited, not retained across recursion frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Kind of entry (blob, tree, or gitlink).
    pub kind: EntryKind,
    /// POSIX-style file mode.
    pub mode: FileMode,
    /// Content id of the referenced object.
    pub id: ObjectId,
    /// Name of the entry (UTF-8, single path component).
    pub name: String,
}

impl TreeEntry {
    /// Create a new tree entry.
    pub fn new(kind: EntryKind, mode: FileMode, id: ObjectId, name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid_tree_entry("Name cannot be empty"));
        }

        if name.len() > 255 {
            return Err(Error::invalid_tree_entry(format!(
                "Name too long: {} bytes (max 255)",
                name.len()
            )));
        }

        if name.contains('\0') {
            return Err(Error::invalid_tree_entry("Name cannot contain null bytes"));
        }

        if name.contains('/') {
            return Err(Error::invalid_tree_entry(
                "Name must be a single path component",
            ));
        }

        Ok(Self {
            kind,
            mode,
            id,
            name,
        })
    }

    /// Encode the entry to bytes.
    ///
    /// Format:
    /// - 1 byte: kind (1=blob, 2=tree, 3=gitlink)
    /// - 4 bytes: mode (u32 LE)
    /// - 32 bytes: object id
    /// - 1 byte: name_len
    /// - N bytes: name (UTF-8)
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.push(self.kind.to_u8());
        buf.extend_from_slice(&self.mode.to_le_bytes());
        buf.extend_from_slice(self.id.as_bytes());
        buf.push(self.name.len() as u8);
        buf.extend_from_slice(self.name.as_bytes());

        buf
    }

    /// Decode an entry from a reader.
    pub fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        let mut kind_buf = [0u8; 1];
        reader.read_exact(&mut kind_buf)?;
        let kind = EntryKind::from_u8(kind_buf[0])?;

        let mut mode_buf = [0u8; 4];
        reader.read_exact(&mut mode_buf)?;
        let mode = u32::from_le_bytes(mode_buf);

        let mut id_buf = [0u8; 32];
        reader.read_exact(&mut id_buf)?;
        let id = ObjectId::from_bytes(id_buf);

        let mut name_len_buf = [0u8; 1];
        reader.read_exact(&mut name_len_buf)?;
        let name_len = name_len_buf[0] as usize;

        if name_len == 0 {
            return Err(Error::invalid_tree_entry("Name length is zero"));
        }

        let mut name_buf = vec![0u8; name_len];
        reader.read_exact(&mut name_buf)?;
        let name = String::from_utf8(name_buf)
            .map_err(|e| Error::invalid_tree_entry(format!("Invalid UTF-8 in name: {}", e)))?;

        Self::new(kind, mode, id, name)
    }
}

impl PartialOrd for TreeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreeEntry {
    /// Compare by name (bytewise UTF-8) for canonical ordering.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.as_bytes().cmp(other.name.as_bytes())
    }
}

/// Encode a list of tree entries (sorted by name).
pub fn encode_tree(mut entries: Vec<TreeEntry>) -> Vec<u8> {
    // Sort entries by name for canonical ordering
    entries.sort();

    let mut buf = Vec::new();
    for entry in entries {
        buf.extend_from_slice(&entry.encode());
    }
    buf
}

/// Decode a list of tree entries from bytes.
pub fn decode_tree(data: &[u8]) -> Result<Vec<TreeEntry>> {
    let mut reader = std::io::Cursor::new(data);
    let mut entries = Vec::new();

    while reader.position() < data.len() as u64 {
        let entry = TreeEntry::decode(&mut reader)?;
        entries.push(entry);
    }

    Ok(entries)
}
