//! Built-in file and shell commands for the webtop terminal.

use webtop_types::error::{Result, WebtopError};
use webtop_vfs::{EntryKind, VfsEntry, VfsPath};

use crate::interpreter::{AppKind, Command, CommandOutput, CommandRegistry, Environment};

/// Register all built-in commands (file, shell, system, power) into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(CatCmd));
    reg.register(Box::new(MkdirCmd));
    reg.register(Box::new(RmdirCmd));
    reg.register(Box::new(TouchCmd));
    reg.register(Box::new(RmCmd));
    reg.register(Box::new(CpCmd));
    reg.register(Box::new(MvCmd));
    reg.register(Box::new(EchoCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(OpenCmd));
    crate::register_system_commands(reg);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Short strerror-style text for a file-tree failure.
pub(crate) fn reason(err: &WebtopError) -> &'static str {
    match err {
        WebtopError::NotFound(_) => "No such file or directory",
        WebtopError::NotADirectory(_) => "Not a directory",
        WebtopError::NotAFile(_) => "Is a directory",
        WebtopError::AlreadyExists(_) => "File exists",
        WebtopError::PermissionDenied(_) => "Operation not permitted",
        WebtopError::InvalidName(_) | WebtopError::InvalidPath(_) => "Invalid argument",
        _ => "Input/output error",
    }
}

fn fail(msg: String) -> WebtopError {
    WebtopError::Command(msg)
}

fn missing(command: &str, operand: &str) -> WebtopError {
    WebtopError::MissingOperand {
        command: command.to_string(),
        operand: operand.to_string(),
    }
}

/// Split `args` into single-letter flags and operands.
///
/// Every flag letter must appear in `allowed`. A lone `-` is an operand.
fn parse_flags<'a>(cmd: &str, args: &[&'a str], allowed: &str) -> Result<(String, Vec<&'a str>)> {
    let mut flags = String::new();
    let mut operands = Vec::new();
    for &arg in args {
        match arg.strip_prefix('-') {
            Some(letters) if !letters.is_empty() => {
                for ch in letters.chars() {
                    if !allowed.contains(ch) {
                        return Err(fail(format!("{cmd}: invalid option -- '{ch}'")));
                    }
                    flags.push(ch);
                }
            },
            _ => operands.push(arg),
        }
    }
    Ok((flags, operands))
}

/// Split a target path into (parent, leaf name) for create operations.
fn split_target(path: &VfsPath) -> Option<(VfsPath, &str)> {
    Some((path.parent()?, path.file_name()?))
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        "ls [-l] [-a] [path]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (flags, operands) = parse_flags("ls", args, "laA")?;
        let shown = operands.first().copied();
        let cannot = |shown: &str, e: &WebtopError| {
            fail(format!("ls: cannot access '{shown}': {}", reason(e)))
        };
        let path = match shown {
            Some(p) => env.resolve(p).map_err(|e| cannot(p, &e))?,
            None => env.cwd.clone(),
        };
        let entries = env.vfs.list_children(&path).map_err(|e| {
            let shown = shown.map_or_else(|| path.to_string(), str::to_string);
            cannot(&shown, &e)
        })?;

        if flags.contains('l') {
            let user = env.config.user.as_str();
            let lines: Vec<String> = entries.iter().map(|e| long_line(e, user)).collect();
            return Ok(CommandOutput::Text(lines.join("\n")));
        }

        let (dirs, files): (Vec<&VfsEntry>, Vec<&VfsEntry>) = entries
            .iter()
            .partition(|e| e.kind == EntryKind::Directory);
        let names: Vec<String> = dirs
            .iter()
            .map(|d| format!("{}/", d.name))
            .chain(files.iter().map(|f| f.name.clone()))
            .collect();
        Ok(CommandOutput::Text(names.join("  ")))
    }
}

/// One `ls -l` row. Permissions, sizes and dates are fixed placeholders.
fn long_line(entry: &VfsEntry, user: &str) -> String {
    let (perms, size) = match entry.kind {
        EntryKind::Directory => ("drwxr-xr-x", 4096),
        EntryKind::File => ("-rw-r--r--", 1024),
    };
    format!(
        "{perms} 1 {user} {user} {size:>8} Jan  1 12:00 {}",
        entry.name
    )
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change directory"
    }
    fn usage(&self) -> &str {
        "cd [path]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let shown = args.first().copied().unwrap_or("~");
        let target = env
            .resolve(shown)
            .map_err(|e| fail(format!("cd: {shown}: {}", reason(&e))))?;
        match env.vfs.resolve(&target) {
            Ok(node) if node.is_dir() => {
                env.cwd = target;
                Ok(CommandOutput::None)
            },
            Ok(_) => Err(fail(format!("cd: {shown}: Not a directory"))),
            Err(e) => Err(fail(format!("cd: {shown}: {}", reason(&e)))),
        }
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.cwd.to_string()))
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Print file contents"
    }
    fn usage(&self) -> &str {
        "cat <file>..."
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(missing("cat", "file operand"));
        }
        let mut parts = Vec::with_capacity(args.len());
        for &arg in args {
            let content = env
                .resolve(arg)
                .and_then(|path| env.vfs.read_file(&path))
                .map_err(|e| fail(format!("cat: {arg}: {}", reason(&e))))?;
            parts.push(content);
        }
        Ok(CommandOutput::Text(parts.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// mkdir
// ---------------------------------------------------------------------------

struct MkdirCmd;
impl Command for MkdirCmd {
    fn name(&self) -> &str {
        "mkdir"
    }
    fn description(&self) -> &str {
        "Create a directory"
    }
    fn usage(&self) -> &str {
        "mkdir <dir>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let shown = *args.first().ok_or_else(|| missing("mkdir", "operand"))?;
        let cannot = |why: &str| fail(format!("mkdir: cannot create directory '{shown}': {why}"));
        let target = env.resolve(shown).map_err(|e| cannot(reason(&e)))?;
        let (parent, name) = split_target(&target).ok_or_else(|| cannot("File exists"))?;
        env.vfs
            .create_directory(&parent, name)
            .map_err(|e| cannot(reason(&e)))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// rmdir
// ---------------------------------------------------------------------------

struct RmdirCmd;
impl Command for RmdirCmd {
    fn name(&self) -> &str {
        "rmdir"
    }
    fn description(&self) -> &str {
        "Remove an empty directory"
    }
    fn usage(&self) -> &str {
        "rmdir <dir>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let shown = *args.first().ok_or_else(|| missing("rmdir", "operand"))?;
        let failed = |why: &str| fail(format!("rmdir: failed to remove '{shown}': {why}"));
        let target = env.resolve(shown).map_err(|e| failed(reason(&e)))?;
        let children = env
            .vfs
            .list_children(&target)
            .map_err(|e| failed(reason(&e)))?;
        if !children.is_empty() {
            return Err(failed("Directory not empty"));
        }
        env.vfs.remove(&target).map_err(|e| failed(reason(&e)))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// touch
// ---------------------------------------------------------------------------

struct TouchCmd;
impl Command for TouchCmd {
    fn name(&self) -> &str {
        "touch"
    }
    fn description(&self) -> &str {
        "Create an empty file"
    }
    fn usage(&self) -> &str {
        "touch <file>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let shown = *args.first().ok_or_else(|| missing("touch", "file operand"))?;
        let cannot = |why: &str| fail(format!("touch: cannot touch '{shown}': {why}"));
        let target = env.resolve(shown).map_err(|e| cannot(reason(&e)))?;
        // Existing nodes keep their content.
        if env.vfs.exists(&target) {
            return Ok(CommandOutput::None);
        }
        let (parent, name) = split_target(&target).ok_or_else(|| cannot("Invalid argument"))?;
        env.vfs
            .create_file(&parent, name, "")
            .map_err(|e| cannot(reason(&e)))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// rm
// ---------------------------------------------------------------------------

struct RmCmd;
impl Command for RmCmd {
    fn name(&self) -> &str {
        "rm"
    }
    fn description(&self) -> &str {
        "Remove a file or directory"
    }
    fn usage(&self) -> &str {
        "rm [-r] [-f] <path>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (flags, operands) = parse_flags("rm", args, "rRf")?;
        let recursive = flags.contains('r') || flags.contains('R');
        let force = flags.contains('f');
        let shown = *operands.first().ok_or_else(|| missing("rm", "operand"))?;
        let cannot = |why: &str| fail(format!("rm: cannot remove '{shown}': {why}"));

        let target = match env.resolve(shown) {
            Ok(target) => target,
            Err(_) if force => return Ok(CommandOutput::None),
            Err(e) => return Err(cannot(reason(&e))),
        };
        let meta = match env.vfs.stat(&target) {
            Ok(meta) => meta,
            Err(_) if force => return Ok(CommandOutput::None),
            Err(e) => return Err(cannot(reason(&e))),
        };
        if meta.kind == EntryKind::Directory && !recursive {
            return Err(cannot("Is a directory"));
        }
        env.vfs.remove(&target).map_err(|e| cannot(reason(&e)))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// cp / mv
// ---------------------------------------------------------------------------

/// Resolved operands for `cp` and `mv`.
struct Transfer<'a> {
    src_shown: &'a str,
    dst_shown: &'a str,
    src: VfsPath,
    dst: VfsPath,
}

/// Resolve source and destination. An existing destination directory
/// receives the source under its own name.
fn plan_transfer<'a>(
    cmd: &str,
    operands: &[&'a str],
    env: &Environment<'_>,
) -> Result<Transfer<'a>> {
    let (src_shown, dst_shown) = match operands {
        [] => return Err(missing(cmd, "file operand")),
        [src] => {
            return Err(missing(
                cmd,
                &format!("destination file operand after '{src}'"),
            ));
        },
        [src, dst, ..] => (*src, *dst),
    };
    let cannot_stat =
        |shown: &str, why: &str| fail(format!("{cmd}: cannot stat '{shown}': {why}"));
    let src = env
        .resolve(src_shown)
        .map_err(|e| cannot_stat(src_shown, reason(&e)))?;
    if !env.vfs.exists(&src) {
        return Err(cannot_stat(src_shown, "No such file or directory"));
    }
    let mut dst = env
        .resolve(dst_shown)
        .map_err(|e| cannot_stat(dst_shown, reason(&e)))?;
    if env.vfs.is_dir(&dst)
        && let Some(name) = src.file_name()
    {
        dst = dst.join(name);
    }
    Ok(Transfer {
        src_shown,
        dst_shown,
        src,
        dst,
    })
}

struct CpCmd;
impl Command for CpCmd {
    fn name(&self) -> &str {
        "cp"
    }
    fn description(&self) -> &str {
        "Copy a file or directory"
    }
    fn usage(&self) -> &str {
        "cp [-r] <src> <dst>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (_flags, operands) = parse_flags("cp", args, "rRf")?;
        let t = plan_transfer("cp", &operands, env)?;
        env.vfs.copy(&t.src, &t.dst).map_err(|e| match e {
            WebtopError::InvalidPath(_) => fail(format!(
                "cp: cannot copy a directory, '{}', into itself, '{}'",
                t.src_shown, t.dst_shown
            )),
            other => fail(format!("cp: cannot create '{}': {}", t.dst_shown, reason(&other))),
        })?;
        Ok(CommandOutput::None)
    }
}

struct MvCmd;
impl Command for MvCmd {
    fn name(&self) -> &str {
        "mv"
    }
    fn description(&self) -> &str {
        "Move or rename a file or directory"
    }
    fn usage(&self) -> &str {
        "mv <src> <dst>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (_flags, operands) = parse_flags("mv", args, "f")?;
        let t = plan_transfer("mv", &operands, env)?;
        env.vfs.move_node(&t.src, &t.dst).map_err(|e| match e {
            WebtopError::InvalidPath(_) => fail(format!(
                "mv: cannot move '{}' to a subdirectory of itself, '{}'",
                t.src_shown, t.dst_shown
            )),
            other => fail(format!(
                "mv: cannot move '{}' to '{}': {}",
                t.src_shown,
                t.dst_shown,
                reason(&other)
            )),
        })?;
        // Moving the working directory away leaves it dangling.
        if env.cwd.starts_with(&t.src) {
            let tail = &env.cwd.segments()[t.src.depth()..];
            env.cwd = tail.iter().fold(t.dst.clone(), |p, seg| p.join(seg));
        }
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// echo / clear / open
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Print text"
    }
    fn usage(&self) -> &str {
        "echo [text...]"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.raw_args.clone()))
    }
}

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

struct OpenCmd;
impl Command for OpenCmd {
    fn name(&self) -> &str {
        "open"
    }
    fn description(&self) -> &str {
        "Open a desktop application"
    }
    fn usage(&self) -> &str {
        "open <terminal|files|editor|calculator|settings>"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = *args.first().ok_or_else(|| missing("open", "application operand"))?;
        let app: AppKind = name.parse().map_err(|_| {
            let known: Vec<&str> = AppKind::ALL.iter().map(|a| a.name()).collect();
            fail(format!(
                "open: unknown application '{name}' (try: {})",
                known.join(", ")
            ))
        })?;
        Ok(CommandOutput::Launch(app))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webtop_types::config::WebtopConfig;
    use webtop_vfs::{MemoryVfs, Vfs};

    struct Fixture {
        reg: CommandRegistry,
        vfs: MemoryVfs,
        config: WebtopConfig,
        cwd: VfsPath,
    }

    impl Fixture {
        fn new() -> Self {
            let mut reg = CommandRegistry::new();
            register_builtins(&mut reg);
            Self {
                reg,
                vfs: MemoryVfs::seeded().unwrap(),
                config: WebtopConfig::default(),
                cwd: VfsPath::parse("/home/user"),
            }
        }

        fn run(&mut self, line: &str) -> Result<CommandOutput> {
            let mut env = Environment {
                cwd: self.cwd.clone(),
                vfs: &mut self.vfs,
                time: None,
                config: &self.config,
                raw_args: String::new(),
            };
            let result = self.reg.execute(line, &mut env);
            if result.is_ok() {
                self.cwd = env.cwd;
            }
            result
        }

        fn text(&mut self, line: &str) -> String {
            match self.run(line) {
                Ok(CommandOutput::Text(s)) => s,
                other => panic!("expected text from {line:?}, got {other:?}"),
            }
        }

        fn err(&mut self, line: &str) -> String {
            match self.run(line) {
                Err(WebtopError::Command(msg)) => msg,
                Err(other) => other.to_string(),
                Ok(out) => panic!("expected error from {line:?}, got {out:?}"),
            }
        }
    }

    #[test]
    fn ls_short_lists_dirs_first() {
        let mut f = Fixture::new();
        assert_eq!(
            f.text("ls"),
            "Desktop/  Documents/  Downloads/  Pictures/  .bashrc"
        );
    }

    #[test]
    fn ls_long_format() {
        let mut f = Fixture::new();
        let out = f.text("ls -l Documents");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "-rw-r--r-- 1 user user     1024 Jan  1 12:00 notes.txt"
        );
        let out = f.text("ls -la /");
        assert!(out.starts_with("drwxr-xr-x 1 user user     4096 Jan  1 12:00 etc"));
    }

    #[test]
    fn ls_empty_directory_is_blank() {
        let mut f = Fixture::new();
        assert_eq!(f.text("ls /tmp"), "");
    }

    #[test]
    fn ls_missing_path() {
        let mut f = Fixture::new();
        assert_eq!(
            f.err("ls ghost"),
            "ls: cannot access 'ghost': No such file or directory"
        );
    }

    #[test]
    fn ls_rejects_unknown_flag() {
        let mut f = Fixture::new();
        assert_eq!(f.err("ls -z"), "ls: invalid option -- 'z'");
    }

    #[test]
    fn cd_and_pwd() {
        let mut f = Fixture::new();
        f.run("cd Documents").unwrap();
        assert_eq!(f.text("pwd"), "/home/user/Documents");
        f.run("cd ../..").unwrap();
        assert_eq!(f.text("pwd"), "/home");
        f.run("cd").unwrap();
        assert_eq!(f.text("pwd"), "/home/user");
        f.run("cd /").unwrap();
        f.run("cd ..").unwrap();
        assert_eq!(f.text("pwd"), "/");
    }

    #[test]
    fn cd_failures_leave_cwd() {
        let mut f = Fixture::new();
        assert_eq!(f.err("cd nowhere"), "cd: nowhere: No such file or directory");
        assert_eq!(f.err("cd .bashrc"), "cd: .bashrc: Not a directory");
        assert_eq!(f.text("pwd"), "/home/user");
    }

    #[test]
    fn dotdot_does_not_cancel_missing_or_file_segments() {
        let mut f = Fixture::new();
        assert_eq!(f.err("cd ghost/.."), "cd: ghost/..: No such file or directory");
        assert_eq!(f.err("cd .bashrc/.."), "cd: .bashrc/..: Not a directory");
        assert_eq!(f.text("pwd"), "/home/user");
        assert_eq!(
            f.err("mkdir ghost/../x"),
            "mkdir: cannot create directory 'ghost/../x': No such file or directory"
        );
        assert!(!f.vfs.exists(&VfsPath::parse("/home/user/x")));
        assert_eq!(
            f.err("cat .bashrc/../Documents/notes.txt"),
            "cat: .bashrc/../Documents/notes.txt: Not a directory"
        );
        assert_eq!(
            f.err("cp ghost/../.bashrc copy"),
            "cp: cannot stat 'ghost/../.bashrc': No such file or directory"
        );
        f.run("rm -f ghost/../.bashrc").unwrap();
        assert!(f.vfs.exists(&VfsPath::parse("/home/user/.bashrc")));
        f.run("cd Documents/..").unwrap();
        assert_eq!(f.text("pwd"), "/home/user");
    }

    #[test]
    fn cd_dotdot_stops_at_root() {
        let mut f = Fixture::new();
        for expected in ["/home", "/", "/", "/"] {
            f.run("cd ..").unwrap();
            assert_eq!(f.text("pwd"), expected);
        }
        f.run("cd ../../tmp").unwrap();
        assert_eq!(f.text("pwd"), "/tmp");
    }

    #[test]
    fn cat_reads_and_reports() {
        let mut f = Fixture::new();
        assert!(f.text("cat Documents/notes.txt").starts_with("My Notes"));
        assert_eq!(f.err("cat"), "cat: missing file operand");
        assert_eq!(
            f.err("cat nope.txt"),
            "cat: nope.txt: No such file or directory"
        );
        assert_eq!(f.err("cat Documents"), "cat: Documents: Is a directory");
    }

    #[test]
    fn mkdir_creates_and_rejects_duplicates() {
        let mut f = Fixture::new();
        f.run("mkdir projects").unwrap();
        assert!(f.vfs.is_dir(&VfsPath::parse("/home/user/projects")));
        assert_eq!(
            f.err("mkdir projects"),
            "mkdir: cannot create directory 'projects': File exists"
        );
        assert_eq!(
            f.err("mkdir a/b"),
            "mkdir: cannot create directory 'a/b': No such file or directory"
        );
        assert_eq!(f.err("mkdir"), "mkdir: missing operand");
    }

    #[test]
    fn touch_creates_empty_and_keeps_existing() {
        let mut f = Fixture::new();
        f.run("touch new.txt").unwrap();
        assert_eq!(
            f.vfs.read_file(&VfsPath::parse("/home/user/new.txt")).unwrap(),
            ""
        );
        f.run("touch Documents/notes.txt").unwrap();
        assert!(f.text("cat Documents/notes.txt").starts_with("My Notes"));
        assert_eq!(f.err("touch"), "touch: missing file operand");
    }

    #[test]
    fn rm_file_and_directory() {
        let mut f = Fixture::new();
        f.run("rm .bashrc").unwrap();
        assert!(!f.vfs.exists(&VfsPath::parse("/home/user/.bashrc")));
        assert_eq!(f.err("rm Documents"), "rm: cannot remove 'Documents': Is a directory");
        f.run("rm -r Documents").unwrap();
        assert!(!f.vfs.exists(&VfsPath::parse("/home/user/Documents")));
        assert_eq!(
            f.err("rm ghost"),
            "rm: cannot remove 'ghost': No such file or directory"
        );
        assert_eq!(f.run("rm -f ghost").unwrap(), CommandOutput::None);
        assert_eq!(f.err("rm -rf /"), "rm: cannot remove '/': Operation not permitted");
    }

    #[test]
    fn rmdir_requires_empty_directory() {
        let mut f = Fixture::new();
        assert_eq!(
            f.err("rmdir Documents"),
            "rmdir: failed to remove 'Documents': Directory not empty"
        );
        f.run("rmdir Desktop").unwrap();
        assert!(!f.vfs.exists(&VfsPath::parse("/home/user/Desktop")));
        assert_eq!(
            f.err("rmdir .bashrc"),
            "rmdir: failed to remove '.bashrc': Not a directory"
        );
    }

    #[test]
    fn cp_file_into_directory() {
        let mut f = Fixture::new();
        f.run("cp .bashrc /tmp").unwrap();
        assert_eq!(
            f.vfs.read_file(&VfsPath::parse("/tmp/.bashrc")).unwrap(),
            f.vfs.read_file(&VfsPath::parse("/home/user/.bashrc")).unwrap()
        );
    }

    #[test]
    fn cp_directory_is_deep() {
        let mut f = Fixture::new();
        f.run("cp -r Documents /tmp/docs").unwrap();
        f.run("rm -r Documents").unwrap();
        assert!(f.text("cat /tmp/docs/welcome.txt").starts_with("Welcome"));
    }

    #[test]
    fn cp_operand_errors() {
        let mut f = Fixture::new();
        assert_eq!(f.err("cp"), "cp: missing file operand");
        assert_eq!(
            f.err("cp a"),
            "cp: missing destination file operand after 'a'"
        );
        assert_eq!(
            f.err("cp ghost /tmp"),
            "cp: cannot stat 'ghost': No such file or directory"
        );
        assert_eq!(
            f.err("cp Documents Documents/sub"),
            "cp: cannot copy a directory, 'Documents', into itself, 'Documents/sub'"
        );
    }

    #[test]
    fn mv_renames_and_relocates() {
        let mut f = Fixture::new();
        f.run("mv Documents/notes.txt Documents/notes.md").unwrap();
        assert!(f.text("cat Documents/notes.md").starts_with("My Notes"));
        f.run("mv Pictures /tmp").unwrap();
        assert!(f.vfs.is_dir(&VfsPath::parse("/tmp/Pictures")));
        assert!(!f.vfs.exists(&VfsPath::parse("/home/user/Pictures")));
    }

    #[test]
    fn mv_onto_existing_file_fails() {
        let mut f = Fixture::new();
        assert_eq!(
            f.err("mv Documents/notes.txt Documents/todo.md"),
            "mv: cannot move 'Documents/notes.txt' to 'Documents/todo.md': File exists"
        );
    }

    #[test]
    fn mv_working_directory_follows() {
        let mut f = Fixture::new();
        f.run("cd Documents").unwrap();
        f.run("mv /home/user/Documents /tmp/docs").unwrap();
        assert_eq!(f.text("pwd"), "/tmp/docs");
    }

    #[test]
    fn echo_is_verbatim() {
        let mut f = Fixture::new();
        assert_eq!(f.text("echo hello   world"), "hello   world");
        assert_eq!(f.text("echo"), "");
    }

    #[test]
    fn clear_and_open_signal() {
        let mut f = Fixture::new();
        assert_eq!(f.run("clear").unwrap(), CommandOutput::Clear);
        assert_eq!(
            f.run("open calc").unwrap(),
            CommandOutput::Launch(AppKind::Calculator)
        );
        assert!(f.err("open browser").starts_with("open: unknown application 'browser'"));
        assert_eq!(f.err("open"), "open: missing application operand");
    }
}
