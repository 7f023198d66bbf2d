use crate::env::Environment;
use crate::error::ShellError;
use std::ffi::{OsStr, OsString};

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// External programs killed by a signal report `128 + signal`.
pub type ExitCode = i32;

/// Object-safe trait for any command the shell can execute.
///
/// This is implemented by built-ins via a blanket impl and by external commands.
pub trait ExecutableCommand {
    /// Executes the command, blocking until it has finished.
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<ExitCode, ShellError>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
/// Implementations can use the environment to resolve executables through the
/// current search path.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &OsStr,
        args: &[OsString],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
