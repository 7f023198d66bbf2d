use argh::FromArgs;
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use wish::error::report;
use wish::input::{BatchSource, ConsoleSource, LineSource, PromptedSource};
use wish::{Config, Interpreter, ShellError, logging};

#[derive(FromArgs)]
/// A minimal shell. Runs the commands in FILE, or reads them from the console.
struct Invocation {
    #[argh(positional)]
    /// batch file to run instead of prompting for commands.
    batch_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    // the shell behaves the same without diagnostics
    let _ = logging::init_logging();

    match run(&Config::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, &mut io::stderr());
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), ShellError> {
    let invocation = parse_invocation(std::env::args_os().collect())?;
    let mut sh = Interpreter::with_config(config);
    let mut stderr = io::stderr();

    match invocation.batch_file {
        Some(file) => {
            let mut source = BatchSource::open(&file)?;
            sh.repl(&mut source, &mut stderr);
        }
        None => {
            let mut source = interactive_source(config);
            sh.repl(source.as_mut(), &mut stderr);
        }
    }
    Ok(())
}

/// Zero or one argument, taken literally: a file called `--help` is still a file.
fn parse_invocation(args: Vec<OsString>) -> Result<Invocation, ShellError> {
    let shown: Vec<String> = args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let (cmd, rest) = match shown.split_first() {
        Some((cmd, rest)) => (cmd.as_str(), rest),
        None => ("wish", &[][..]),
    };

    let mut literal = Vec::with_capacity(rest.len() + 1);
    literal.push("--");
    literal.extend(rest.iter().map(String::as_str));

    let mut invocation =
        Invocation::from_args(&[cmd], &literal).map_err(|early| ShellError::Invocation {
            msg: early.output,
        })?;
    // argh saw a decoded copy; open the file under the name actually given
    invocation.batch_file = args.into_iter().nth(1).map(PathBuf::from);
    Ok(invocation)
}

fn interactive_source(config: &Config) -> Box<dyn LineSource> {
    if io::stdin().is_terminal() {
        match ConsoleSource::new(config.prompt.clone()) {
            Ok(console) => return Box::new(console),
            Err(err) => tracing::debug!(error = %err, "no line editor, using plain prompt"),
        }
    }
    Box::new(PromptedSource::new(
        io::stdin().lock(),
        io::stdout(),
        config.prompt.clone(),
    ))
}
