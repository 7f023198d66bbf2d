//! `wish`: a tiny command interpreter.
//!
//! Lines are split on whitespace; `exit`, `cd` and `path` are handled in-process
//! and anything else is looked up in an explicit search path and run as a child
//! process, one at a time. Every failure is reported with the same message,
//! [`ShellError::REPORT`].
//!
//! The main entry point is [`Interpreter`]. Lines come from a [`input::LineSource`]:
//! a batch file, or an interactive console that prompts before each read.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod external;
pub mod input;
mod interpreter;
mod lexer;
pub mod logging;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::ShellError;
/// Just a convenient re-export of the command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
pub use lexer::split_into_tokens;
