//! Segment-based virtual paths.

use std::fmt;

/// An absolute path in the virtual tree, stored as its segments.
///
/// Parsing normalizes: empty segments and `.` are dropped, `..` pops one
/// segment and is clamped at root. A `VfsPath` therefore never contains
/// `""`, `"."` or `".."` segments and never escapes root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct VfsPath {
    segments: Vec<String>,
}

impl VfsPath {
    /// The root directory.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a path relative to root. A leading `/` is optional.
    ///
    /// `..` is collapsed textually. Use [`Vfs::canonicalize`] for user input
    /// that must be walked against a tree.
    ///
    /// [`Vfs::canonicalize`]: crate::Vfs::canonicalize
    pub fn parse(input: &str) -> Self {
        let mut out = Self::root();
        for component in input.split('/') {
            match component {
                "" | "." => {},
                ".." => {
                    out.segments.pop();
                },
                other => out.segments.push(other.to_string()),
            }
        }
        out
    }

    /// Append a single child name.
    pub fn join(&self, name: &str) -> Self {
        let mut out = self.clone();
        out.segments.push(name.to_string());
        out
    }

    /// The containing directory, or `None` for root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let mut out = self.clone();
        out.segments.pop();
        Some(out)
    }

    /// Drop the last segment in place. A no-op at root.
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// The final segment, or `None` for root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether `self` equals `ancestor` or lies below it.
    pub fn starts_with(&self, ancestor: &VfsPath) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for seg in &self.segments {
            write!(f, "/{seg}")?;
        }
        Ok(())
    }
}

impl From<&str> for VfsPath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}
