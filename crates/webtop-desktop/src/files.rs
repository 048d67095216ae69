//! File manager navigation over the virtual tree.

use std::fmt;

use webtop_types::error::{Result, WebtopError};
use webtop_vfs::{EntryKind, Vfs, VfsPath};

/// Icon shown next to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIcon {
    Folder,
    Parent,
    Text,
    Image,
    Document,
    Archive,
}

impl FileIcon {
    /// Icon for a file, chosen by its last extension.
    pub fn for_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" => FileIcon::Image,
            "pdf" => FileIcon::Document,
            "zip" | "tar" | "gz" => FileIcon::Archive,
            _ => FileIcon::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileIcon::Folder => "folder",
            FileIcon::Parent => "up",
            FileIcon::Text => "text",
            FileIcon::Image => "image",
            FileIcon::Document => "document",
            FileIcon::Archive => "archive",
        }
    }
}

impl fmt::Display for FileIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the file listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub name: String,
    pub kind: EntryKind,
    pub icon: FileIcon,
    pub size: u64,
    /// The synthetic `..` row.
    pub is_parent: bool,
}

/// What activating an entry did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The navigator moved to a new directory.
    Navigated,
    /// The entry is a file; the caller opens it.
    OpenFile(VfsPath),
}

/// Directory navigation with back/forward history.
///
/// `history[index]` is always the current directory. Navigating somewhere
/// new drops every entry after `index`.
#[derive(Debug, Clone)]
pub struct FileNavigator {
    history: Vec<VfsPath>,
    index: usize,
}

impl FileNavigator {
    pub fn new(start: VfsPath) -> Self {
        Self {
            history: vec![start],
            index: 0,
        }
    }

    pub fn current(&self) -> &VfsPath {
        &self.history[self.index]
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    /// Go to `path`, which must be a directory.
    ///
    /// Going to the current directory is a refresh and leaves the history
    /// alone.
    pub fn navigate_to(&mut self, vfs: &dyn Vfs, path: VfsPath) -> Result<()> {
        require_dir(vfs, &path)?;
        if &path == self.current() {
            return Ok(());
        }
        self.history.truncate(self.index + 1);
        self.history.push(path);
        self.index += 1;
        log::debug!("files: navigate to {}", self.current());
        Ok(())
    }

    /// Resolve `input` against the current directory and go there.
    pub fn navigate_str(&mut self, vfs: &dyn Vfs, input: &str) -> Result<()> {
        let target = vfs.canonicalize(self.current(), input)?;
        self.navigate_to(vfs, target)
    }

    /// Step back. Returns `false` when there is nothing behind.
    pub fn back(&mut self, vfs: &dyn Vfs) -> Result<bool> {
        if !self.can_go_back() {
            return Ok(false);
        }
        require_dir(vfs, &self.history[self.index - 1])?;
        self.index -= 1;
        Ok(true)
    }

    /// Step forward. Returns `false` when there is nothing ahead.
    pub fn forward(&mut self, vfs: &dyn Vfs) -> Result<bool> {
        if !self.can_go_forward() {
            return Ok(false);
        }
        require_dir(vfs, &self.history[self.index + 1])?;
        self.index += 1;
        Ok(true)
    }

    /// Go to the parent directory. Returns `false` at the root.
    pub fn up(&mut self, vfs: &dyn Vfs) -> Result<bool> {
        match self.current().parent() {
            Some(parent) => self.navigate_to(vfs, parent).map(|()| true),
            None => Ok(false),
        }
    }

    /// The current directory's listing, with a leading `..` row below the
    /// root.
    pub fn entries(&self, vfs: &dyn Vfs) -> Result<Vec<NavEntry>> {
        let children = vfs.list_children(self.current())?;
        let mut rows = Vec::with_capacity(children.len() + 1);
        if !self.current().is_root() {
            rows.push(NavEntry {
                name: "..".to_string(),
                kind: EntryKind::Directory,
                icon: FileIcon::Parent,
                size: 0,
                is_parent: true,
            });
        }
        rows.extend(children.into_iter().map(|e| NavEntry {
            icon: match e.kind {
                EntryKind::Directory => FileIcon::Folder,
                EntryKind::File => FileIcon::for_name(&e.name),
            },
            name: e.name,
            kind: e.kind,
            size: e.size,
            is_parent: false,
        }));
        Ok(rows)
    }

    /// Activate the entry called `name` in the current directory.
    pub fn open_entry(&mut self, vfs: &dyn Vfs, name: &str) -> Result<Activation> {
        if name == ".." {
            self.up(vfs)?;
            return Ok(Activation::Navigated);
        }
        let path = self.current().join(name);
        if vfs.is_dir(&path) {
            self.navigate_to(vfs, path)?;
            Ok(Activation::Navigated)
        } else if vfs.exists(&path) {
            Ok(Activation::OpenFile(path))
        } else {
            Err(WebtopError::NotFound(path.to_string()))
        }
    }

    /// Create a directory called `name` in the current directory.
    pub fn new_folder(&self, vfs: &mut dyn Vfs, name: &str) -> Result<VfsPath> {
        let name = name.trim();
        vfs.create_directory(self.current(), name)?;
        Ok(self.current().join(name))
    }
}

fn require_dir(vfs: &dyn Vfs, path: &VfsPath) -> Result<()> {
    if vfs.is_dir(path) {
        Ok(())
    } else if vfs.exists(path) {
        Err(WebtopError::NotADirectory(path.to_string()))
    } else {
        Err(WebtopError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webtop_vfs::MemoryVfs;

    fn p(s: &str) -> VfsPath {
        VfsPath::parse(s)
    }

    fn setup() -> (MemoryVfs, FileNavigator) {
        (MemoryVfs::seeded().unwrap(), FileNavigator::new(p("/home/user")))
    }

    #[test]
    fn icons_by_extension() {
        assert_eq!(FileIcon::for_name("a.txt"), FileIcon::Text);
        assert_eq!(FileIcon::for_name("a.md"), FileIcon::Text);
        assert_eq!(FileIcon::for_name("pic.JPG"), FileIcon::Image);
        assert_eq!(FileIcon::for_name("paper.pdf"), FileIcon::Document);
        assert_eq!(FileIcon::for_name("archive.tar.gz"), FileIcon::Archive);
        assert_eq!(FileIcon::for_name("software.deb"), FileIcon::Text);
        assert_eq!(FileIcon::for_name("README"), FileIcon::Text);
    }

    #[test]
    fn entries_include_parent_row_below_root() {
        let (vfs, nav) = setup();
        let rows = nav.entries(&vfs).unwrap();
        assert!(rows[0].is_parent);
        assert_eq!(rows[0].icon, FileIcon::Parent);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["..", ".bashrc", "Desktop", "Documents", "Downloads", "Pictures"]
        );

        let root = FileNavigator::new(VfsPath::root());
        assert!(!root.entries(&vfs).unwrap()[0].is_parent);
    }

    #[test]
    fn entry_icons() {
        let (vfs, mut nav) = setup();
        nav.navigate_str(&vfs, "Downloads").unwrap();
        let rows = nav.entries(&vfs).unwrap();
        let archive = rows.iter().find(|r| r.name == "archive.tar.gz").unwrap();
        assert_eq!(archive.icon, FileIcon::Archive);
        assert_eq!(rows.iter().filter(|r| r.icon == FileIcon::Folder).count(), 0);
    }

    #[test]
    fn back_and_forward() {
        let (vfs, mut nav) = setup();
        assert!(!nav.back(&vfs).unwrap());
        nav.navigate_str(&vfs, "Documents").unwrap();
        nav.navigate_str(&vfs, "/etc").unwrap();
        assert!(nav.back(&vfs).unwrap());
        assert_eq!(nav.current().to_string(), "/home/user/Documents");
        assert!(nav.back(&vfs).unwrap());
        assert_eq!(nav.current().to_string(), "/home/user");
        assert!(nav.forward(&vfs).unwrap());
        assert!(nav.forward(&vfs).unwrap());
        assert_eq!(nav.current().to_string(), "/etc");
        assert!(!nav.forward(&vfs).unwrap());
    }

    #[test]
    fn navigate_truncates_forward_history() {
        let (vfs, mut nav) = setup();
        nav.navigate_str(&vfs, "Documents").unwrap();
        nav.back(&vfs).unwrap();
        nav.navigate_str(&vfs, "Pictures").unwrap();
        assert!(!nav.can_go_forward());
        nav.back(&vfs).unwrap();
        assert_eq!(nav.current().to_string(), "/home/user");
    }

    #[test]
    fn navigate_to_current_is_refresh() {
        let (vfs, mut nav) = setup();
        nav.navigate_str(&vfs, ".").unwrap();
        assert!(!nav.can_go_back());
    }

    #[test]
    fn navigate_rejects_files_and_missing() {
        let (vfs, mut nav) = setup();
        assert!(matches!(
            nav.navigate_str(&vfs, ".bashrc"),
            Err(WebtopError::NotADirectory(_))
        ));
        assert!(matches!(
            nav.navigate_str(&vfs, "nope"),
            Err(WebtopError::NotFound(_))
        ));
        assert!(matches!(
            nav.navigate_str(&vfs, ".bashrc/.."),
            Err(WebtopError::NotADirectory(_))
        ));
        assert_eq!(nav.current().to_string(), "/home/user");
    }

    #[test]
    fn up_stops_at_root() {
        let (vfs, mut nav) = setup();
        assert!(nav.up(&vfs).unwrap());
        assert!(nav.up(&vfs).unwrap());
        assert!(nav.current().is_root());
        assert!(!nav.up(&vfs).unwrap());
    }

    #[test]
    fn open_entry_directory_file_and_parent() {
        let (vfs, mut nav) = setup();
        assert_eq!(nav.open_entry(&vfs, "Documents").unwrap(), Activation::Navigated);
        assert_eq!(
            nav.open_entry(&vfs, "notes.txt").unwrap(),
            Activation::OpenFile(p("/home/user/Documents/notes.txt"))
        );
        assert_eq!(nav.open_entry(&vfs, "..").unwrap(), Activation::Navigated);
        assert_eq!(nav.current().to_string(), "/home/user");
        assert!(nav.open_entry(&vfs, "ghost").is_err());
    }

    #[test]
    fn back_fails_if_directory_vanished() {
        let (mut vfs, mut nav) = setup();
        nav.navigate_str(&vfs, "/tmp").unwrap();
        nav.navigate_str(&vfs, "/etc").unwrap();
        vfs.remove(&p("/tmp")).unwrap();
        assert!(nav.back(&vfs).is_err());
        assert_eq!(nav.current().to_string(), "/etc");
    }

    #[test]
    fn new_folder_in_current_directory() {
        let (mut vfs, nav) = setup();
        let path = nav.new_folder(&mut vfs, "Projects").unwrap();
        assert!(vfs.is_dir(&path));
        assert!(nav.new_folder(&mut vfs, "Projects").is_err());
        assert!(nav.new_folder(&mut vfs, "").is_err());
    }
}
