use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Everything that can go wrong while interpreting a line or starting the shell.
///
/// The variants carry detail for the diagnostics log only. Users always see
/// [`ShellError::REPORT`], whatever the variant.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ShellError {
    #[error("{command}: wrong number of arguments, got {got:?}")]
    Usage { command: &'static str, got: Vec<String> },
    #[error("{name}: not found in search path")]
    CommandNotFound { name: String },
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("lost track of {program} while waiting for it")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("cd: can't chdir to {target}")]
    ChangeDir {
        target: String,
        #[source]
        source: io::Error,
    },
    #[error("path: can't store {count} directories")]
    PathUpdate {
        count: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("can't open batch file {file}")]
    BatchOpen {
        file: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid invocation: {msg}")]
    Invocation { msg: String },
    #[error("failed to read input line")]
    Read(#[source] io::Error),
}

impl ShellError {
    /// The one message written to stderr for every error.
    pub const REPORT: &'static str = "An error has occurred\n";

    /// Fatal errors end the process with a non-zero status instead of
    /// returning control to the loop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShellError::BatchOpen { .. } | ShellError::Invocation { .. }
        )
    }
}

/// Writes the fixed error message and logs the underlying detail.
pub fn report(err: &ShellError, diag: &mut dyn io::Write) {
    tracing::warn!(error = %err, fatal = err.is_fatal(), "reporting error");
    // nothing left to tell anyone if stderr itself is gone
    let _ = diag.write_all(ShellError::REPORT.as_bytes());
    let _ = diag.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_writes_fixed_message_regardless_of_variant() {
        let errors = vec![
            ShellError::Usage {
                command: "exit",
                got: vec!["1".to_string()],
            },
            ShellError::CommandNotFound {
                name: "ls".to_string(),
            },
            ShellError::ChangeDir {
                target: "/nonexistent".to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
        ];

        for err in errors {
            let mut out = Vec::new();
            report(&err, &mut out);
            assert_eq!(String::from_utf8(out).unwrap(), "An error has occurred\n");
        }
    }

    #[test]
    fn only_startup_errors_are_fatal() {
        let batch = ShellError::BatchOpen {
            file: "missing.sh".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let invocation = ShellError::Invocation {
            msg: "too many arguments".to_string(),
        };
        let not_found = ShellError::CommandNotFound {
            name: "ls".to_string(),
        };

        assert!(batch.is_fatal());
        assert!(invocation.is_fatal());
        assert!(!not_found.is_fatal());
    }
}
