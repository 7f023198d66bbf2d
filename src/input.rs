//! Where command lines come from.
//!
//! The interpreter only asks for the next line; sources decide whether a
//! prompt is shown first. `None` means the input is exhausted. Lines are
//! handed over as raw bytes, never decoded.

use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

pub trait LineSource {
    /// Next line, including its newline if it had one.
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, ShellError>;
}

fn read_raw_line<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>, ShellError> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).map_err(ShellError::Read)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// Batch input: lines from a script file (or any reader), no prompt.
pub struct BatchSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> BatchSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl BatchSource<BufReader<File>> {
    /// Open a batch file for reading.
    pub fn open(file: &Path) -> Result<Self, ShellError> {
        let f = File::open(file).map_err(|source| ShellError::BatchOpen {
            file: file.display().to_string(),
            source,
        })?;
        Ok(Self::new(BufReader::new(f)))
    }
}

impl<R: BufRead> LineSource for BatchSource<R> {
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, ShellError> {
        read_raw_line(&mut self.reader)
    }
}

/// Interactive input without line editing: writes the prompt, then reads.
///
/// Used when stdin is not a terminal, or when no line editor is available.
pub struct PromptedSource<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    prompt: String,
}

impl<R: BufRead, W: Write> PromptedSource<R, W> {
    pub fn new(reader: R, writer: W, prompt: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            prompt: prompt.into(),
        }
    }
}

impl<R: BufRead, W: Write> LineSource for PromptedSource<R, W> {
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, ShellError> {
        write!(self.writer, "{}", self.prompt).map_err(ShellError::Read)?;
        self.writer.flush().map_err(ShellError::Read)?;
        read_raw_line(&mut self.reader)
    }
}

/// Interactive input from a terminal through rustyline.
///
/// Nothing is added to the editor's history. Ctrl-C discards the current line.
pub struct ConsoleSource {
    editor: DefaultEditor,
    prompt: String,
}

impl ConsoleSource {
    pub fn new(prompt: impl Into<String>) -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            prompt: prompt.into(),
        })
    }
}

impl LineSource for ConsoleSource {
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, ShellError> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => Ok(Some(line.into_bytes())),
            Err(ReadlineError::Interrupted) => Ok(Some(Vec::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(err)) => Err(ShellError::Read(err)),
            Err(err) => Err(ShellError::Read(io::Error::other(err.to_string()))),
        }
    }
}
