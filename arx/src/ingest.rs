//! Directory ingestion into the in-memory object store.

use anyhow::{Context, Result, bail};
use arx_core::{EntryKind, MemoryStore, ObjectId, TreeEntry, modes};
use std::fs;
use std::path::Path;

/// Ingest a directory recursively, returning the root tree id.
pub fn ingest_dir(store: &mut MemoryStore, path: &Path) -> Result<ObjectId> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Cannot read directory: {}", path.display()))?;
    if !metadata.is_dir() {
        bail!("Not a directory: {}", path.display());
    }
    ingest_tree(store, path)
}

fn ingest_tree(store: &mut MemoryStore, dir: &Path) -> Result<ObjectId> {
    let mut entries = Vec::new();

    // Use ignore crate to respect .gitignore
    let walker = ignore::WalkBuilder::new(dir)
        .max_depth(Some(1)) // Only immediate children
        .hidden(false) // Include hidden files
        .git_ignore(true) // Respect .gitignore
        .build();

    for entry in walker {
        let entry = entry?;
        let entry_path = entry.path();

        // Skip the directory itself
        if entry_path == dir {
            continue;
        }

        let metadata = fs::symlink_metadata(entry_path)
            .with_context(|| format!("Cannot stat: {}", entry_path.display()))?;
        let file_name = entry_path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid filename: {}", entry_path.display()))?
            .to_string();

        if metadata.file_type().is_symlink() {
            // Symlinks become blobs holding the link target.
            let target = fs::read_link(entry_path)
                .with_context(|| format!("Cannot read link: {}", entry_path.display()))?;
            let id = store.put_blob(target.to_string_lossy().as_bytes().to_vec());
            entries.push(TreeEntry::new(EntryKind::Blob, modes::SYMLINK, id, file_name)?);
        } else if metadata.is_file() {
            let data = fs::read(entry_path)
                .with_context(|| format!("Cannot read file: {}", entry_path.display()))?;
            let id = store.put_blob(data);
            let mode = file_mode(&metadata);
            entries.push(TreeEntry::new(EntryKind::Blob, mode, id, file_name)?);
        } else if metadata.is_dir() {
            // Recursively process subdirectory
            let id = ingest_tree(store, entry_path)?;
            entries.push(TreeEntry::new(
                EntryKind::Tree,
                modes::DIRECTORY,
                id,
                file_name,
            )?);
        }
    }

    Ok(store.put_tree(entries))
}

/// Get the file mode (permissions) from metadata.
#[cfg(unix)]
fn file_mode(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    let perms = metadata.permissions();
    let mode = perms.mode();

    // Check if executable
    if mode & 0o111 != 0 {
        modes::EXECUTABLE
    } else {
        modes::REGULAR
    }
}

/// Get the file mode (permissions) from metadata (Windows fallback).
#[cfg(not(unix))]
fn file_mode(_metadata: &fs::Metadata) -> u32 {
    // On Windows, default to regular file mode
    modes::REGULAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use arx_core::ObjectSource;
    use tempfile::TempDir;

    #[test]
    fn test_ingest_flat_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("file1.txt"), b"content1").unwrap();
        fs::write(temp_dir.path().join("file2.txt"), b"content2").unwrap();

        let mut store = MemoryStore::new();
        let root = ingest_dir(&mut store, temp_dir.path()).unwrap();

        let tree = store.read_tree(&root).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "file1.txt");
        assert_eq!(tree[1].name, "file2.txt");

        let blob = store.read_object(&tree[0].id).unwrap();
        assert_eq!(blob.data, b"content1");
    }

    #[test]
    fn test_ingest_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("root_file.txt"), b"root").unwrap();
        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();
        fs::write(sub_dir.join("sub_file.txt"), b"sub").unwrap();

        let mut store = MemoryStore::new();
        let root = ingest_dir(&mut store, temp_dir.path()).unwrap();

        let tree = store.read_tree(&root).unwrap();
        assert_eq!(tree.len(), 2);

        let subdir_entry = tree.iter().find(|e| e.name == "subdir").unwrap();
        assert_eq!(subdir_entry.kind, EntryKind::Tree);

        let subtree = store.read_tree(&subdir_entry.id).unwrap();
        assert_eq!(subtree.len(), 1);
        assert_eq!(subtree[0].name, "sub_file.txt");
    }

    #[test]
    fn test_ingest_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, b"data").unwrap();

        let mut store = MemoryStore::new();
        assert!(ingest_dir(&mut store, &file).is_err());
    }

    #[test]
    fn test_ingest_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), b"same").unwrap();

        let mut store1 = MemoryStore::new();
        let mut store2 = MemoryStore::new();
        let root1 = ingest_dir(&mut store1, temp_dir.path()).unwrap();
        let root2 = ingest_dir(&mut store2, temp_dir.path()).unwrap();
        assert_eq!(root1, root2);
    }

    #[test]
    #[cfg(unix)]
    fn test_executable_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("script.sh");
        fs::write(&script, b"#!/bin/bash\necho hello").unwrap();
        let mut perms = fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).unwrap();

        let mut store = MemoryStore::new();
        let root = ingest_dir(&mut store, temp_dir.path()).unwrap();

        let tree = store.read_tree(&root).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].mode, modes::EXECUTABLE);
    }

    #[test]
    #[cfg(unix)]
    fn test_symlink_stored_as_target_blob() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("real.txt"), b"real").unwrap();
        std::os::unix::fs::symlink("real.txt", temp_dir.path().join("link")).unwrap();

        let mut store = MemoryStore::new();
        let root = ingest_dir(&mut store, temp_dir.path()).unwrap();

        let tree = store.read_tree(&root).unwrap();
        let link = tree.iter().find(|e| e.name == "link").unwrap();
        assert_eq!(link.mode, modes::SYMLINK);

        let blob = store.read_object(&link.id).unwrap();
        assert_eq!(blob.data, b"real.txt");
    }
}
