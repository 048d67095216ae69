//! In-memory VFS implementation.
//!
//! The whole tree hangs off a single root [`Node::Directory`]. Lookups walk
//! the path segment by segment through the children maps, so a path resolves
//! to at most one node and sibling names are unique by construction.

use std::collections::BTreeMap;

use webtop_types::error::{Result, WebtopError};

use crate::{Node, Vfs, VfsEntry, VfsPath, populate_demo_tree};

/// A fully in-memory virtual file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryVfs {
    root: Node,
}

impl MemoryVfs {
    /// Create a new tree with only the root directory.
    pub fn new() -> Self {
        Self { root: Node::dir() }
    }

    /// Create a tree pre-populated with the sample hierarchy.
    pub fn seeded() -> Result<Self> {
        let mut vfs = Self::new();
        populate_demo_tree(&mut vfs)?;
        Ok(vfs)
    }

    /// The root directory node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    fn node_mut(&mut self, path: &VfsPath) -> Result<&mut Node> {
        let mut current = &mut self.root;
        for seg in path.segments() {
            current = match current {
                Node::Directory { children } => children
                    .get_mut(seg)
                    .ok_or_else(|| WebtopError::NotFound(path.to_string()))?,
                Node::File { .. } => return Err(WebtopError::NotFound(path.to_string())),
            };
        }
        Ok(current)
    }

    fn children_mut(&mut self, dir: &VfsPath) -> Result<&mut BTreeMap<String, Node>> {
        match self.node_mut(dir)? {
            Node::Directory { children } => Ok(children),
            Node::File { .. } => Err(WebtopError::NotADirectory(dir.to_string())),
        }
    }

    /// Validate that `src` exists and `dst` names a free slot in an existing
    /// directory outside the `src` subtree. Returns the destination parent
    /// and name.
    fn check_destination<'p>(
        &self,
        src: &VfsPath,
        dst: &'p VfsPath,
    ) -> Result<(VfsPath, &'p str)> {
        self.resolve(src)?;
        if dst == src {
            return Err(WebtopError::AlreadyExists(dst.to_string()));
        }
        if dst.starts_with(src) {
            return Err(WebtopError::InvalidPath(format!(
                "cannot place '{src}' inside itself at '{dst}'"
            )));
        }
        let (Some(parent), Some(name)) = (dst.parent(), dst.file_name()) else {
            return Err(WebtopError::AlreadyExists(dst.to_string()));
        };
        validate_name(name)?;
        let children = self
            .resolve(&parent)?
            .children()
            .ok_or_else(|| WebtopError::NotADirectory(parent.to_string()))?;
        if children.contains_key(name) {
            return Err(WebtopError::AlreadyExists(dst.to_string()));
        }
        Ok((parent, name))
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

/// Names are non-empty, contain no `/`, and are not `.` or `..`.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') || name == "." || name == ".." {
        return Err(WebtopError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl Vfs for MemoryVfs {
    fn resolve(&self, path: &VfsPath) -> Result<&Node> {
        let mut current = &self.root;
        for seg in path.segments() {
            current = match current {
                Node::Directory { children } => children
                    .get(seg)
                    .ok_or_else(|| WebtopError::NotFound(path.to_string()))?,
                Node::File { .. } => return Err(WebtopError::NotFound(path.to_string())),
            };
        }
        Ok(current)
    }

    fn list_children(&self, path: &VfsPath) -> Result<Vec<VfsEntry>> {
        let children = self
            .resolve(path)?
            .children()
            .ok_or_else(|| WebtopError::NotADirectory(path.to_string()))?;
        // BTreeMap iteration is already sorted by name.
        Ok(children
            .iter()
            .map(|(name, node)| VfsEntry {
                name: name.clone(),
                kind: node.kind(),
                size: node.size(),
            })
            .collect())
    }

    fn read_file(&self, path: &VfsPath) -> Result<String> {
        self.resolve(path)?
            .content()
            .map(str::to_string)
            .ok_or_else(|| WebtopError::NotAFile(path.to_string()))
    }

    fn create_directory(&mut self, parent: &VfsPath, name: &str) -> Result<()> {
        validate_name(name)?;
        let children = self.children_mut(parent)?;
        if children.contains_key(name) {
            return Err(WebtopError::AlreadyExists(parent.join(name).to_string()));
        }
        children.insert(name.to_string(), Node::dir());
        log::debug!("vfs: mkdir {}", parent.join(name));
        Ok(())
    }

    fn create_file(&mut self, parent: &VfsPath, name: &str, content: &str) -> Result<()> {
        validate_name(name)?;
        let children = self.children_mut(parent)?;
        match children.get_mut(name) {
            Some(Node::Directory { .. }) => {
                return Err(WebtopError::NotAFile(parent.join(name).to_string()));
            },
            Some(Node::File { content: existing }) => {
                content.clone_into(existing);
            },
            None => {
                children.insert(name.to_string(), Node::file(content));
            },
        }
        log::debug!("vfs: write {} ({} bytes)", parent.join(name), content.len());
        Ok(())
    }

    fn write_file(&mut self, path: &VfsPath, content: &str) -> Result<()> {
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => self.create_file(&parent, name, content),
            _ => Err(WebtopError::NotAFile(path.to_string())),
        }
    }

    fn remove(&mut self, path: &VfsPath) -> Result<()> {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return Err(WebtopError::PermissionDenied(path.to_string()));
        };
        let children = self
            .children_mut(&parent)
            .map_err(|_| WebtopError::NotFound(path.to_string()))?;
        children
            .remove(name)
            .ok_or_else(|| WebtopError::NotFound(path.to_string()))?;
        log::debug!("vfs: remove {path}");
        Ok(())
    }

    fn copy(&mut self, src: &VfsPath, dst: &VfsPath) -> Result<()> {
        let (parent, name) = self.check_destination(src, dst)?;
        let clone = self.resolve(src)?.clone();
        self.children_mut(&parent)?.insert(name.to_string(), clone);
        log::debug!("vfs: copy {src} -> {dst}");
        Ok(())
    }

    fn move_node(&mut self, src: &VfsPath, dst: &VfsPath) -> Result<()> {
        let (Some(src_parent), Some(src_name)) = (src.parent(), src.file_name()) else {
            return Err(WebtopError::PermissionDenied(src.to_string()));
        };
        let (dst_parent, dst_name) = self.check_destination(src, dst)?;
        let node = self
            .children_mut(&src_parent)?
            .remove(src_name)
            .ok_or_else(|| WebtopError::NotFound(src.to_string()))?;
        // The destination was validated above and lies outside the detached
        // subtree, so this lookup cannot observe the removal.
        match self.children_mut(&dst_parent) {
            Ok(children) => {
                children.insert(dst_name.to_string(), node);
                log::debug!("vfs: move {src} -> {dst}");
                Ok(())
            },
            Err(e) => {
                log::warn!("vfs: move {src} -> {dst} failed after detach, restoring");
                if let Ok(children) = self.children_mut(&src_parent) {
                    children.insert(src_name.to_string(), node);
                }
                Err(e)
            },
        }
    }
}
