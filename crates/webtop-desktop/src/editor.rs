//! Text editor document model.

use std::fmt;

use webtop_types::error::{Result, WebtopError};
use webtop_vfs::{EntryKind, Vfs, VfsPath};

use crate::storage::{EDITOR_FILENAME_KEY, EDITOR_TEXT_KEY, KeyValueStore};

/// Title of a document that has never been saved.
pub const UNTITLED: &str = "Untitled Document";

/// Name offered when an untitled document is saved.
pub const DEFAULT_FILENAME: &str = "document.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Ready,
    Modified,
    Saved,
    Opened,
}

impl fmt::Display for EditorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EditorStatus::Ready => "Ready",
            EditorStatus::Modified => "Modified",
            EditorStatus::Saved => "Saved",
            EditorStatus::Opened => "Opened",
        })
    }
}

/// The document open in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    text: String,
    status: EditorStatus,
}

impl Document {
    pub fn new() -> Self {
        Self {
            title: UNTITLED.to_string(),
            text: String::new(),
            status: EditorStatus::Ready,
        }
    }

    /// The last saved document from `store`, or a new one.
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        let mut doc = Self::new();
        if let Some(text) = store.get(EDITOR_TEXT_KEY) {
            doc.text = text;
        }
        if let Some(name) = store.get(EDITOR_FILENAME_KEY).filter(|n| !n.is_empty()) {
            doc.title = name;
        }
        doc
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    pub fn is_untitled(&self) -> bool {
        self.title == UNTITLED
    }

    /// Discard the current text and start over untitled.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.status = EditorStatus::Modified;
    }

    /// Append `line` followed by a newline.
    pub fn append_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
        self.status = EditorStatus::Modified;
    }

    /// Character and line counts. An empty document has one line.
    pub fn counts(&self) -> (usize, usize) {
        (self.text.chars().count(), self.text.split('\n').count())
    }

    /// `"<n> characters, <m> lines"`.
    pub fn status_line(&self) -> String {
        let (chars, lines) = self.counts();
        format!("{chars} characters, {lines} lines")
    }

    /// Save under the current title, or [`DEFAULT_FILENAME`] if untitled.
    pub fn save(
        &mut self,
        store: &mut dyn KeyValueStore,
        vfs: &mut dyn Vfs,
        dir: &VfsPath,
    ) -> Result<VfsPath> {
        let name = if self.is_untitled() {
            DEFAULT_FILENAME.to_string()
        } else {
            self.title.clone()
        };
        self.save_as(&name, store, vfs, dir)
    }

    /// Write the text to `dir/<name>` and to the store, and take `name` as
    /// the title.
    pub fn save_as(
        &mut self,
        name: &str,
        store: &mut dyn KeyValueStore,
        vfs: &mut dyn Vfs,
        dir: &VfsPath,
    ) -> Result<VfsPath> {
        let name = name.trim();
        if name.is_empty() || name.contains('/') {
            return Err(WebtopError::InvalidName(name.to_string()));
        }
        vfs.create_file(dir, name, &self.text)?;
        store.set(EDITOR_TEXT_KEY, &self.text)?;
        store.set(EDITOR_FILENAME_KEY, name)?;
        self.title = name.to_string();
        self.status = EditorStatus::Saved;
        let path = dir.join(name);
        log::info!("editor: saved {path} ({} bytes)", self.text.len());
        Ok(path)
    }

    /// Stash the text in the store without touching the tree or the status.
    pub fn autosave(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(EDITOR_TEXT_KEY, &self.text)
    }

    /// Replace the document with the file at `path`.
    pub fn open(&mut self, vfs: &dyn Vfs, path: &VfsPath) -> Result<()> {
        let text = vfs.read_file(path)?;
        self.title = path.file_name().unwrap_or(UNTITLED).to_string();
        self.text = text;
        self.status = EditorStatus::Opened;
        Ok(())
    }

    /// Names of the files in `dir`, for the open dialog.
    pub fn list_documents(vfs: &dyn Vfs, dir: &VfsPath) -> Result<Vec<String>> {
        Ok(vfs
            .list_children(dir)?
            .into_iter()
            .filter(|e| e.kind == EntryKind::File)
            .map(|e| e.name)
            .collect())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use webtop_vfs::MemoryVfs;

    fn docs() -> VfsPath {
        VfsPath::parse("/home/user/Documents")
    }

    #[test]
    fn new_document_is_untitled_and_ready() {
        let doc = Document::new();
        assert_eq!(doc.title(), "Untitled Document");
        assert_eq!(doc.status(), EditorStatus::Ready);
        assert_eq!(doc.status_line(), "0 characters, 1 lines");
    }

    #[test]
    fn editing_marks_modified_and_counts() {
        let mut doc = Document::new();
        doc.append_line("hello");
        doc.append_line("wörld");
        assert_eq!(doc.status(), EditorStatus::Modified);
        assert_eq!(doc.status_line(), "12 characters, 3 lines");
    }

    #[test]
    fn save_as_writes_tree_and_store() {
        let mut vfs = MemoryVfs::seeded().unwrap();
        let mut store = MemoryStore::new();
        let mut doc = Document::new();
        doc.set_text("draft");
        let path = doc.save_as("draft.txt", &mut store, &mut vfs, &docs()).unwrap();
        assert_eq!(path.to_string(), "/home/user/Documents/draft.txt");
        assert_eq!(vfs.read_file(&path).unwrap(), "draft");
        assert_eq!(store.get(EDITOR_TEXT_KEY).as_deref(), Some("draft"));
        assert_eq!(store.get(EDITOR_FILENAME_KEY).as_deref(), Some("draft.txt"));
        assert_eq!(doc.title(), "draft.txt");
        assert_eq!(doc.status(), EditorStatus::Saved);
    }

    #[test]
    fn save_untitled_uses_default_name() {
        let mut vfs = MemoryVfs::seeded().unwrap();
        let mut store = MemoryStore::new();
        let mut doc = Document::new();
        doc.set_text("x");
        let path = doc.save(&mut store, &mut vfs, &docs()).unwrap();
        assert_eq!(path.file_name(), Some("document.txt"));
        doc.set_text("y");
        doc.save(&mut store, &mut vfs, &docs()).unwrap();
        assert_eq!(vfs.read_file(&path).unwrap(), "y");
    }

    #[test]
    fn save_as_rejects_bad_names() {
        let mut vfs = MemoryVfs::seeded().unwrap();
        let mut store = MemoryStore::new();
        let mut doc = Document::new();
        assert!(doc.save_as("a/b", &mut store, &mut vfs, &docs()).is_err());
        assert!(doc.save_as("  ", &mut store, &mut vfs, &docs()).is_err());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn save_into_missing_directory_fails_cleanly() {
        let mut vfs = MemoryVfs::new();
        let mut store = MemoryStore::new();
        let mut doc = Document::new();
        assert!(doc.save_as("a.txt", &mut store, &mut vfs, &docs()).is_err());
        assert!(store.keys().is_empty());
        assert!(doc.is_untitled());
    }

    #[test]
    fn open_reads_file() {
        let vfs = MemoryVfs::seeded().unwrap();
        let mut doc = Document::new();
        doc.open(&vfs, &docs().join("todo.md")).unwrap();
        assert_eq!(doc.title(), "todo.md");
        assert!(doc.text().starts_with("# TODO List"));
        assert_eq!(doc.status(), EditorStatus::Opened);
        assert!(doc.open(&vfs, &docs().join("missing.txt")).is_err());
        assert_eq!(doc.title(), "todo.md");
    }

    #[test]
    fn restore_from_store() {
        let mut store = MemoryStore::new();
        assert_eq!(Document::restore(&store), Document::new());
        store.set(EDITOR_TEXT_KEY, "kept").unwrap();
        store.set(EDITOR_FILENAME_KEY, "kept.txt").unwrap();
        let doc = Document::restore(&store);
        assert_eq!(doc.text(), "kept");
        assert_eq!(doc.title(), "kept.txt");
    }

    #[test]
    fn list_documents_only_files() {
        let vfs = MemoryVfs::seeded().unwrap();
        let names = Document::list_documents(&vfs, &VfsPath::parse("/home/user")).unwrap();
        assert_eq!(names, vec![".bashrc"]);
        let names = Document::list_documents(&vfs, &docs()).unwrap();
        assert_eq!(names, vec!["notes.txt", "todo.md", "welcome.txt"]);
    }

    #[test]
    fn autosave_keeps_status_and_tree() {
        let mut store = MemoryStore::new();
        let mut doc = Document::new();
        doc.set_text("wip");
        doc.autosave(&mut store).unwrap();
        assert_eq!(store.get(EDITOR_TEXT_KEY).as_deref(), Some("wip"));
        assert_eq!(store.get(EDITOR_FILENAME_KEY), None);
        assert_eq!(doc.status(), EditorStatus::Modified);
    }

    #[test]
    fn clear_resets() {
        let mut doc = Document::new();
        doc.set_text("abc");
        doc.clear();
        assert_eq!(doc, Document::new());
    }
}
