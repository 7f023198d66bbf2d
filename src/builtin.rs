use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use argh::{EarlyExit, FromArgs};
use std::borrow::Cow;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process. Their arguments are always taken
/// literally, so argh only checks how many there are.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "exit" or "cd".
    fn name() -> &'static str;

    /// argh only sees a UTF-8 rendering of the arguments. Builtins that use
    /// their arguments take the bytes as typed from `raw` here.
    fn keep_raw_args(&mut self, _raw: &[OsString]) {}

    fn execute(self, env: &mut Environment) -> Result<ExitCode, ShellError>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<ExitCode, ShellError> {
        <T as BuiltinCommand>::execute(*self, env)
    }
}

/// Stands in for a builtin whose arguments didn't fit its shape.
struct InvalidArgs {
    command: &'static str,
    got: Vec<String>,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, _env: &mut Environment) -> Result<ExitCode, ShellError> {
        Err(ShellError::Usage {
            command: self.command,
            got: self.got,
        })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &OsStr,
        args: &[OsString],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name != OsStr::new(T::name()) {
            return None;
        }

        let shown: Vec<Cow<'_, str>> = args.iter().map(|a| a.to_string_lossy()).collect();
        // "--" stops argh from reading `-x` or `--help` as options.
        let mut literal = Vec::with_capacity(args.len() + 1);
        literal.push("--");
        literal.extend(shown.iter().map(|a| a.as_ref()));

        Some(match T::from_args(&[T::name()], &literal) {
            Ok(mut cmd) => {
                cmd.keep_raw_args(args);
                Box::new(cmd)
            }
            Err(EarlyExit { output, .. }) => {
                tracing::debug!(command = T::name(), %output, "rejected builtin arguments");
                Box::new(InvalidArgs {
                    command: T::name(),
                    got: shown.into_iter().map(Cow::into_owned).collect(),
                })
            }
        })
    }
}

#[derive(FromArgs)]
/// Leave the shell with a success status. Takes no arguments.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, env: &mut Environment) -> Result<ExitCode, ShellError> {
        env.should_exit = true;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Change the current working directory of the shell.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: PathBuf,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn keep_raw_args(&mut self, raw: &[OsString]) {
        if let [target] = raw {
            self.target = PathBuf::from(target);
        }
    }

    fn execute(self, _env: &mut Environment) -> Result<ExitCode, ShellError> {
        env::set_current_dir(&self.target).map_err(|source| ShellError::ChangeDir {
            target: self.target.display().to_string(),
            source,
        })?;
        tracing::debug!(dir = %self.target.display(), "changed directory");
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Replace the search path used to find external commands.
pub struct Path {
    #[argh(positional)]
    /// directories to search, highest priority first. None leaves the search path empty.
    pub dirs: Vec<PathBuf>,
}

impl BuiltinCommand for Path {
    fn name() -> &'static str {
        "path"
    }

    fn keep_raw_args(&mut self, raw: &[OsString]) {
        self.dirs = raw.iter().map(PathBuf::from).collect();
    }

    fn execute(self, env: &mut Environment) -> Result<ExitCode, ShellError> {
        env.search_path.set_paths(&self.dirs)?;
        tracing::debug!(dirs = ?self.dirs, "search path replaced");
        Ok(0)
    }
}
