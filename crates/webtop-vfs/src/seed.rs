//! Sample hierarchy every session starts with.

use webtop_types::error::Result;

use crate::{Vfs, VfsPath};

const WELCOME: &str = "Welcome to LinuxOS!\n\n\
This is a web-based Linux desktop environment.\n\n\
Features:\n\
- File manager with navigation\n\
- Terminal with real commands\n\
- Text editor with save/load\n\
- Calculator\n\
- System settings\n\n\
Enjoy exploring!";

const NOTES: &str = "My Notes\n========\n\n\
- Remember to backup files\n\
- Check system updates\n\
- Learn more Linux commands";

const TODO: &str = "# TODO List\n\n\
- [x] Set up desktop environment\n\
- [ ] Install applications\n\
- [ ] Configure settings\n\
- [ ] Create backup script";

const BASHRC: &str = "# ~/.bashrc\n\
export PATH=$PATH:/usr/local/bin\n\
alias ll=\"ls -la\"\n\
alias la=\"ls -A\"";

const PASSWD: &str = "root:x:0:0:root:/root:/bin/bash\n\
user:x:1000:1000:User:/home/user:/bin/bash";

/// Populate `vfs` with the demo desktop tree rooted at `/`.
///
/// Expects an empty tree; fails with `AlreadyExists` otherwise.
pub fn populate_demo_tree(vfs: &mut dyn Vfs) -> Result<()> {
    let root = VfsPath::root();
    for dir in ["home", "usr", "etc", "var", "tmp"] {
        vfs.create_directory(&root, dir)?;
    }
    vfs.create_directory(&VfsPath::parse("/home"), "user")?;
    vfs.create_directory(&VfsPath::parse("/usr"), "bin")?;
    vfs.create_directory(&VfsPath::parse("/usr"), "lib")?;

    let home = VfsPath::parse("/home/user");
    for dir in ["Documents", "Pictures", "Downloads", "Desktop"] {
        vfs.create_directory(&home, dir)?;
    }
    vfs.create_file(&home, ".bashrc", BASHRC)?;

    let docs = home.join("Documents");
    vfs.create_file(&docs, "welcome.txt", WELCOME)?;
    vfs.create_file(&docs, "notes.txt", NOTES)?;
    vfs.create_file(&docs, "todo.md", TODO)?;

    let pictures = home.join("Pictures");
    vfs.create_file(&pictures, "screenshot.png", "Image: Desktop screenshot")?;
    vfs.create_file(&pictures, "wallpaper.jpg", "Image: Beautiful landscape wallpaper")?;

    let downloads = home.join("Downloads");
    vfs.create_file(&downloads, "software.deb", "Package: Software installer")?;
    vfs.create_file(&downloads, "archive.tar.gz", "Archive: Compressed files")?;

    vfs.create_file(&VfsPath::parse("/etc"), "passwd", PASSWD)?;
    log::debug!("vfs: demo tree populated");
    Ok(())
}
