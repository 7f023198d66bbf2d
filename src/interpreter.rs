use crate::command::{CommandFactory, ExitCode};
use crate::config::Config;
use crate::env::{Environment, SearchPath};
use crate::error::{ShellError, report};
use crate::input::LineSource;
use crate::lexer;
use std::ffi::{OsStr, OsString};
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// It is implemented for the built-ins and for ExternalCommand in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal shell that runs built-ins and programs found on its search path.
///
/// The interpreter owns an [`Environment`] and a list of [`CommandFactory`] objects
/// that are queried in order to create commands by name. See [`Default`] for the
/// factories included out of the box.
///
/// Example
/// ```
/// use wish::Interpreter;
/// let mut sh = Interpreter::default();
/// sh.execute_line("path").unwrap();
/// assert!(sh.env().search_path.is_empty());
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(search_path: SearchPath, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(search_path),
            commands,
        }
    }

    /// Create an interpreter with the standard commands and `config`'s search path.
    pub fn with_config(config: &Config) -> Self {
        use crate::builtin::{Cd, Exit, Path};
        use crate::external::ExternalCommand;
        Self::new(
            config.search_path(),
            vec![
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Path>::default()),
                Box::new(Factory::<ExternalCommand>::default()),
            ],
        )
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// True once `exit` has run; no further lines should be read.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Returns the command's exit code, or an error if no factory recognizes the
    /// name or the command fails.
    pub fn run(&mut self, name: &OsStr, args: &[OsString]) -> Result<ExitCode, ShellError> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                return cmd.execute(&mut self.env);
            }
        }
        Err(ShellError::CommandNotFound {
            name: name.to_string_lossy().into_owned(),
        })
    }

    /// Tokenize and run one line. Blank lines do nothing and succeed.
    ///
    /// The line is raw bytes; tokens reach the command without being decoded.
    pub fn execute_line(&mut self, line: impl AsRef<[u8]>) -> Result<ExitCode, ShellError> {
        let tokens = lexer::split_into_tokens(line.as_ref());
        let Some((name, args)) = tokens.split_first() else {
            return Ok(0);
        };

        tracing::debug!(?name, ?args, "dispatching");
        self.run(name, args)
    }

    /// Read-eval loop: runs every line from `source` until it is exhausted or
    /// `exit` runs.
    ///
    /// Errors are reported on `diag` and the loop moves on to the next line. A
    /// failure to read input is reported once and treated as end of input.
    pub fn repl(&mut self, source: &mut dyn LineSource, diag: &mut dyn Write) {
        while !self.env.should_exit {
            let line = match source.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    report(&err, diag);
                    break;
                }
            };

            if let Err(err) = self.execute_line(&line) {
                report(&err, diag);
            }
        }
        tracing::debug!(exit_requested = self.env.should_exit, "loop finished");
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default commands:
    /// - built-ins: `exit`, `cd`, `path`
    /// - external command launcher, searching `/bin`
    fn default() -> Self {
        Self::with_config(&Config::default())
    }
}
