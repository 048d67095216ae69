//! Virtual file system for webtop.
//!
//! The tree is a nested mapping from names to [`Node`]s rooted at a single
//! directory. All operations address nodes by [`VfsPath`]; callers resolve
//! user input against their own current directory before calling in.

mod memory;
mod path;
mod seed;

use std::collections::BTreeMap;

use webtop_types::error::{Result, WebtopError};

pub use memory::MemoryVfs;
pub use path::VfsPath;
pub use seed::populate_demo_tree;

/// Nominal size reported for directories in listings.
pub const DIR_SIZE: u64 = 4096;

/// A file or directory in the virtual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory { children: BTreeMap<String, Node> },
    File { content: String },
}

impl Node {
    /// An empty directory.
    pub fn dir() -> Self {
        Node::Directory {
            children: BTreeMap::new(),
        }
    }

    /// A file holding `content`.
    pub fn file(content: impl Into<String>) -> Self {
        Node::File {
            content: content.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Node::Directory { .. } => EntryKind::Directory,
            Node::File { .. } => EntryKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    /// Content length for files, [`DIR_SIZE`] for directories.
    pub fn size(&self) -> u64 {
        match self {
            Node::File { content } => content.len() as u64,
            Node::Directory { .. } => DIR_SIZE,
        }
    }

    /// Child map of a directory, `None` for files.
    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Directory { children } => Some(children),
            Node::File { .. } => None,
        }
    }

    /// Content of a file, `None` for directories.
    pub fn content(&self) -> Option<&str> {
        match self {
            Node::File { content } => Some(content),
            Node::Directory { .. } => None,
        }
    }
}

/// Type of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A single entry returned by [`Vfs::list_children`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
}

/// Metadata for a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsMetadata {
    pub kind: EntryKind,
    pub size: u64,
}

/// Operations on a virtual file tree.
pub trait Vfs {
    /// Walk from root to the node at `path`.
    fn resolve(&self, path: &VfsPath) -> Result<&Node>;

    /// Direct children of the directory at `path`, sorted by name.
    fn list_children(&self, path: &VfsPath) -> Result<Vec<VfsEntry>>;

    /// Content of the file at `path`.
    fn read_file(&self, path: &VfsPath) -> Result<String>;

    /// Create an empty directory `name` under `parent`.
    fn create_directory(&mut self, parent: &VfsPath, name: &str) -> Result<()>;

    /// Create (or overwrite) file `name` under `parent`.
    fn create_file(&mut self, parent: &VfsPath, name: &str, content: &str) -> Result<()>;

    /// Create or overwrite the file at `path`.
    fn write_file(&mut self, path: &VfsPath, content: &str) -> Result<()>;

    /// Remove the node at `path`, including everything below it.
    fn remove(&mut self, path: &VfsPath) -> Result<()>;

    /// Deep-copy the subtree at `src` to the new path `dst`.
    fn copy(&mut self, src: &VfsPath, dst: &VfsPath) -> Result<()>;

    /// Relocate the subtree at `src` to the new path `dst`.
    fn move_node(&mut self, src: &VfsPath, dst: &VfsPath) -> Result<()>;

    fn stat(&self, path: &VfsPath) -> Result<VfsMetadata> {
        let node = self.resolve(path)?;
        Ok(VfsMetadata {
            kind: node.kind(),
            size: node.size(),
        })
    }

    fn exists(&self, path: &VfsPath) -> bool {
        self.resolve(path).is_ok()
    }

    fn is_dir(&self, path: &VfsPath) -> bool {
        self.resolve(path).is_ok_and(Node::is_dir)
    }

    /// Resolve `input` against `base` one component at a time, the way a
    /// shell walks it. `..` only steps out of a directory that exists, so
    /// `missing/..` and `file/..` fail instead of cancelling out.
    fn canonicalize(&self, base: &VfsPath, input: &str) -> Result<VfsPath> {
        let mut out = if input.starts_with('/') {
            VfsPath::root()
        } else {
            base.clone()
        };
        for component in input.split('/') {
            match component {
                "" | "." => {},
                ".." => {
                    let node = self.resolve(&out)?;
                    if !node.is_dir() {
                        return Err(WebtopError::NotADirectory(out.to_string()));
                    }
                    out.pop();
                },
                name => out = out.join(name),
            }
        }
        Ok(out)
    }
}
