//! Non-visual models of the desktop applications.
//!
//! Each model is driven by direct calls from a front end and persists
//! through a [`KeyValueStore`] and the virtual file tree.

pub mod editor;
pub mod files;
pub mod settings;
pub mod storage;

pub use editor::{DEFAULT_FILENAME, Document, EditorStatus, UNTITLED};
pub use files::{Activation, FileIcon, FileNavigator, NavEntry};
pub use settings::{FontSize, Settings, Theme};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
