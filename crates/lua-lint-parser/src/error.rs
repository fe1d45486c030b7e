//! Parse errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while lexing or parsing Lua source.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A character the lexer cannot interpret.
    #[error("unexpected character {ch:?} at line {line}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// 1-based line of the character.
        line: usize,
    },

    /// A quoted string with no closing quote on its line.
    #[error("unterminated string starting at line {line}")]
    UnterminatedString {
        /// Line the string started on.
        line: usize,
    },

    /// A `[[`/`[=[` bracket (string or comment) with no closing bracket.
    #[error("unterminated long bracket starting at line {line}")]
    UnterminatedLongBracket {
        /// Line the bracket opened on.
        line: usize,
    },

    /// A numeric literal that does not parse.
    #[error("malformed number {text:?} at line {line}")]
    MalformedNumber {
        /// The literal text.
        text: String,
        /// Line of the literal.
        line: usize,
    },

    /// A token that does not fit the grammar at this position.
    #[error("unexpected {found} at line {line}, expected {expected}")]
    UnexpectedToken {
        /// What the grammar expected.
        expected: String,
        /// Display name of the token found.
        found: String,
        /// Line of the token.
        line: usize,
    },

    /// Input ended in the middle of a construct.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What the grammar expected.
        expected: String,
    },

    /// IO error reading a source file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Result alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;
