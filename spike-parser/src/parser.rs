use crate::ast::{Expr, Program, Stmt};
use crate::error::{Expected, ParseError};
use crate::lexer::{Token, TokenKind};
use spike_source::{Cursor, Position};

mod expr;
mod stmt;

pub struct Parser<'a> {
    cursor: Cursor<'a, Token>,
    /// Returned when peeking past the last token. Positioned at the end of the source.
    eof: Token,
}

impl<'a> Parser<'a> {
    /// `end` is the position just past the last source character, as returned by
    /// [`Lexer::lex_with_end`](crate::lexer::Lexer::lex_with_end).
    pub fn new(tokens: &'a [Token], end: Position) -> Self {
        Self {
            cursor: Cursor::new(tokens),
            eof: Token::new(TokenKind::Eof, "", end),
        }
    }
}

impl<'a> Parser<'a> {
    /// Parses statements until the tokens are exhausted.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        while !self.cursor.at_end() {
            body.push(self.parse_stmt()?);
        }
        Ok(Program { body })
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// The next unconsumed token, or [`TokenKind::Eof`].
    fn current(&self) -> &Token {
        match self.cursor.peek() {
            Ok(token) => token,
            Err(_) => &self.eof,
        }
    }

    /// Predicate that tests whether the next token is of `kind` and eats it if yes as a side effect.
    fn eat(&mut self, kind: TokenKind) -> bool {
        self.cursor.next_if(|token| token.is(kind)).is_some()
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        match self.cursor.next_if(|token| token.is(kind)) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(Expected::Token(kind))),
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        self.expect(TokenKind::Identifier).map(|token| token.text.clone())
    }

    /// Expects a `;` and silently eats any `;` immediately following it.
    fn expect_semis(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Semi)?;
        while self.eat(TokenKind::Semi) {}
        Ok(())
    }

    /// Creates an unexpected token error at the current token.
    fn unexpected(&self, expected: Expected) -> ParseError {
        ParseError::new(expected, self.current())
    }
}
