use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::{Environment, SearchPath};
use crate::error::ShellError;
use crate::interpreter::Factory;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Command that is not a builtin, already resolved against the search path.
pub struct ExternalCommand {
    /// Name as the user typed it; becomes the child's `argv[0]`.
    name: OsString,
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(name: OsString, program: PathBuf, args: Vec<OsString>) -> Self {
        Self {
            name,
            program,
            args,
        }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &OsStr,
        args: &[OsString],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let program = find_command_path(&env.search_path, name)?;
        Some(Box::new(ExternalCommand::new(
            name.to_os_string(),
            program,
            args.to_vec(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(self: Box<Self>, _env: &mut Environment) -> Result<ExitCode, ShellError> {
        let ExternalCommand {
            name,
            program,
            args,
        } = *self;
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(name);
        argv.extend(args);
        run(&program, &argv)
    }
}

/// Spawn `program` with `argv` and block until it terminates.
///
/// `argv[0]` is handed to the child as its own name, so it sees what the user
/// typed rather than the resolved path. If the program can't be loaded the
/// child never runs any of our code: the failure comes back here as an error.
pub fn run(program: &Path, argv: &[OsString]) -> Result<ExitCode, ShellError> {
    let mut cmd = std::process::Command::new(program);
    if let Some((arg0, args)) = argv.split_first() {
        set_arg0(&mut cmd, arg0);
        cmd.args(args);
    }

    tracing::debug!(program = %program.display(), ?argv, "spawning");
    let mut child = cmd.spawn().map_err(|source| ShellError::Spawn {
        program: program.display().to_string(),
        source,
    })?;

    let exit_status = child.wait().map_err(|source| ShellError::Wait {
        program: program.display().to_string(),
        source,
    })?;
    let code = match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    };
    tracing::debug!(pid = child.id(), code, "child finished");
    Ok(code)
}

#[cfg(unix)]
fn set_arg0(cmd: &mut std::process::Command, arg0: &OsStr) {
    use std::os::unix::process::CommandExt;
    cmd.arg0(arg0);
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut std::process::Command, _arg0: &OsStr) {}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command name against the search path.
///
/// Each directory is tried in order as `dir + "/" + name`; the first candidate
/// that is an executable file wins, even if a later one is also executable.
/// The name is never interpreted on its own, so `/bin/ls` is only found if some
/// directory joins with it into an executable path. An empty search path finds
/// nothing.
pub fn find_command_path(search_path: &SearchPath, name: &OsStr) -> Option<PathBuf> {
    for dir in search_path.paths() {
        let candidate = candidate_path(dir, name);
        if is_executable(&candidate) {
            tracing::trace!(candidate = %candidate.display(), "resolved");
            return Some(candidate);
        }
    }
    tracing::trace!(?name, dirs = search_path.paths().len(), "not found");
    None
}

/// Plain concatenation: `Path::join` would drop `dir` when `name` is absolute.
fn candidate_path(dir: &Path, name: &OsStr) -> PathBuf {
    let dir = dir.as_os_str();
    let mut candidate = OsString::with_capacity(dir.len() + 1 + name.len());
    candidate.push(dir);
    candidate.push("/");
    candidate.push(name);
    PathBuf::from(candidate)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
