//! Compile errors. The first error aborts the compilation; there is no recovery.

use std::{error, fmt};

use spike_source::Position;

use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// The character does not begin any token.
    UnexpectedChar(char),
    /// End of input was reached before the closing `"`.
    UnterminatedString,
}

/// Represents a lexical error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    pub fn unexpected_char(ch: char, position: Position) -> Self {
        Self::new(LexErrorKind::UnexpectedChar(ch), position)
    }

    /// `position` is that of the opening quote.
    pub fn unterminated_string(position: Position) -> Self {
        Self::new(LexErrorKind::UnterminatedString, position)
    }

    fn new(kind: LexErrorKind, position: Position) -> Self {
        Self {
            kind,
            line: position.line,
            column: position.column,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LexErrorKind::UnexpectedChar(ch) => write!(
                f,
                "Unexpected character {:?} at {}:{}",
                ch, self.line, self.column
            ),
            LexErrorKind::UnterminatedString => write!(
                f,
                "Unterminated string literal starting at {}:{}",
                self.line, self.column
            ),
        }
    }
}

impl error::Error for LexError {}

/// What the parser required at the position of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    /// Start of an expression (identifier, literal or `(`).
    Expression,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Expression => f.write_str("expression"),
        }
    }
}

/// Represents a syntax error: the next token does not fit the current production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub expected: Expected,
    pub found: TokenKind,
    pub found_text: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(expected: Expected, found: &Token) -> Self {
        let position = found.position();
        Self {
            expected,
            found: found.kind,
            found_text: found.text.clone(),
            line: position.line,
            column: position.column,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected {} but found {}", self.expected, self.found)?;
        if !self.found_text.is_empty() {
            write!(f, " {:?}", self.found_text)?;
        }
        write!(f, " at {}:{}", self.line, self.column)
    }
}

impl error::Error for ParseError {}

/// Either error produced by the compile pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
}

impl CompileError {
    pub fn line(&self) -> usize {
        match self {
            CompileError::Lex(err) => err.line,
            CompileError::Parse(err) => err.line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            CompileError::Lex(err) => err.column,
            CompileError::Parse(err) => err.column,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(err) => write!(f, "{}", err),
            CompileError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for CompileError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            CompileError::Lex(err) => Some(err),
            CompileError::Parse(err) => Some(err),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex(err)
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}
