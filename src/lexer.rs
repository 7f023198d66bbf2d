//! Splits a command line into argument tokens.
//!
//! The only syntax is whitespace: runs of spaces, tabs and newlines separate
//! tokens. Quotes, backslashes and `#` are ordinary characters. Lines are raw
//! bytes, so tokens keep whatever encoding the user typed.

use std::ffi::OsString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord,
}

struct LexingFSM<'a> {
    input: &'a [u8],
    state: LexingState,
    word_start: usize,
}

impl<'a> LexingFSM<'a> {
    fn new(input: &'a [u8]) -> Self {
        LexingFSM {
            input,
            state: LexingState::Start,
            word_start: 0,
        }
    }

    fn make_tokens(&mut self) -> Vec<OsString> {
        let mut out = Vec::new();

        for (pos, &byte) in self.input.iter().enumerate() {
            match (self.state, is_separator(byte)) {
                (LexingState::Start, true) => {}
                (LexingState::Start, false) => {
                    self.word_start = pos;
                    self.state = LexingState::ReadingWord;
                }
                (LexingState::ReadingWord, true) => {
                    out.push(token(&self.input[self.word_start..pos]));
                    self.state = LexingState::Start;
                }
                (LexingState::ReadingWord, false) => {}
            }
        }

        // Line ended inside a word (no trailing newline)
        if self.state == LexingState::ReadingWord {
            out.push(token(&self.input[self.word_start..]));
        }

        out
    }
}

fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n')
}

#[cfg(unix)]
fn token(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    std::ffi::OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn token(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Tokenize one line. A blank or whitespace-only line yields no tokens.
///
/// The first token, if any, is the command name; the rest are its arguments.
pub fn split_into_tokens(line: &[u8]) -> Vec<OsString> {
    LexingFSM::new(line).make_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_runs_of_whitespace() {
        assert_eq!(
            split_into_tokens(b"ls  -la\t/tmp \n"),
            vec!["ls", "-la", "/tmp"]
        );
    }

    #[test]
    fn blank_lines_have_no_tokens() {
        assert!(split_into_tokens(b"").is_empty());
        assert!(split_into_tokens(b"\n").is_empty());
        assert!(split_into_tokens(b" \t \t\n").is_empty());
    }

    #[test]
    fn quotes_and_hashes_are_literal() {
        assert_eq!(
            split_into_tokens(b"echo \"hello world\" # not a comment"),
            vec!["echo", "\"hello", "world\"", "#", "not", "a", "comment"]
        );
    }

    #[test]
    fn last_token_without_newline_is_kept() {
        assert_eq!(split_into_tokens(b"  cd /usr"), vec!["cd", "/usr"]);
    }

    #[test]
    fn other_whitespace_is_part_of_a_token() {
        // Only space, tab and newline separate tokens.
        assert_eq!(split_into_tokens(b"ls\r\n"), vec!["ls\r"]);
    }

    #[test]
    fn multibyte_characters_survive() {
        assert_eq!(
            split_into_tokens("cd  ñandú\t日本".as_bytes()),
            vec!["cd", "ñandú", "日本"]
        );
    }

    #[test]
    #[cfg(unix)]
    fn invalid_utf8_bytes_are_kept_verbatim() {
        use std::os::unix::ffi::OsStrExt;
        let tokens = split_into_tokens(b"path /tmp/bin\xff\n");

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], "path");
        assert_eq!(tokens[1].as_bytes(), b"/tmp/bin\xff");
    }
}
