use std::fmt;

use spike_source::{CharCursor, Position};

use crate::error::LexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // literals
    StringLit,
    NumberLit,

    // identifiers
    Identifier,

    // keywords
    Fn,
    Return,
    Var,
    If,
    Else,

    // binary operators
    // - arithmetics
    Plus,
    Minus,
    Asterisk,
    Slash,
    // - assignment
    Equals,

    // punctuation
    Comma,
    Semi,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,

    /// Only generated in parse phase when the token cursor is exhausted.
    Eof,
}

impl TokenKind {
    /// Returns the binary precedence or `None` if not a binop token.
    /// Higher binds tighter. Assignment (`TokenKind::Equals`) has the lowest precedence.
    pub fn binop_precedence(self) -> Option<u8> {
        match self {
            /* Multiplicative */
            TokenKind::Asterisk | TokenKind::Slash => Some(3),
            /* Additive */
            TokenKind::Plus | TokenKind::Minus => Some(2),
            /* Assignment */
            TokenKind::Equals => Some(1),
            _ => None,
        }
    }

    /// Maps a single punctuation or operator character to its kind.
    fn from_punctuation(ch: char) -> Option<Self> {
        let kind = match ch {
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semi,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Equals,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::StringLit => "string literal",
            TokenKind::NumberLit => "number literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Fn => "`fn`",
            TokenKind::Return => "`return`",
            TokenKind::Var => "`var`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Asterisk => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Equals => "`=`",
            TokenKind::Comma => "`,`",
            TokenKind::Semi => "`;`",
            TokenKind::OpenBrace => "`{`",
            TokenKind::CloseBrace => "`}`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A classified lexical unit. `line` and `column` locate its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            line: position.line,
            column: position.column,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("fn", TokenKind::Fn),
    ("return", TokenKind::Return),
    ("var", TokenKind::Var),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
];

/// Converts source text into [`Token`]s.
#[derive(Debug, Clone, Copy)]
pub struct Lexer {
    keywords: &'static [(&'static str, TokenKind)],
}

impl Lexer {
    pub fn new() -> Self {
        Self { keywords: KEYWORDS }
    }

    /// Lexes `text` in a single pass. Fails on the first character that does not begin a token.
    pub fn lex(&self, text: &str) -> Result<Vec<Token>, LexError> {
        self.lex_with_end(text).map(|(tokens, _)| tokens)
    }

    /// Like [`Self::lex`], but also returns the position just past the last character of `text`.
    pub fn lex_with_end(&self, text: &str) -> Result<(Vec<Token>, Position), LexError> {
        let chars: Vec<char> = text.chars().collect();
        let mut cursor = CharCursor::new(&chars);
        let mut tokens = Vec::new();

        loop {
            let position = cursor.position();
            let ch = match cursor.next() {
                Ok(ch) => ch,
                Err(_) => break, // no more characters
            };

            let token = if is_whitespace(ch) {
                continue;
            } else if let Some(kind) = TokenKind::from_punctuation(ch) {
                Token::new(kind, ch.to_string(), position)
            } else if ch == '"' {
                self.lex_string(&mut cursor, position)?
            } else if is_identifier_start(ch) {
                self.lex_identifier(&mut cursor, ch, position)
            } else if ch.is_ascii_digit() {
                let mut number = ch.to_string();
                eat_while(&mut cursor, &mut number, |ch| ch.is_ascii_digit());
                Token::new(TokenKind::NumberLit, number, position)
            } else {
                return Err(LexError::unexpected_char(ch, position));
            };
            tokens.push(token);
        }

        Ok((tokens, cursor.position()))
    }

    /// Returns the keyword kind for `ident`, ignoring ASCII case.
    pub fn keyword(&self, ident: &str) -> Option<TokenKind> {
        self.keywords
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(ident))
            .map(|&(_, kind)| kind)
    }

    /// The opening quote has already been consumed. Text excludes both quotes; no escapes.
    fn lex_string(&self, cursor: &mut CharCursor, position: Position) -> Result<Token, LexError> {
        let mut string = String::new();
        eat_while(cursor, &mut string, |ch| ch != '"');
        if cursor.next_if(|ch| ch == '"').is_none() {
            return Err(LexError::unterminated_string(position));
        }
        Ok(Token::new(TokenKind::StringLit, string, position))
    }

    fn lex_identifier(&self, cursor: &mut CharCursor, first: char, position: Position) -> Token {
        let mut ident = first.to_string();
        eat_while(cursor, &mut ident, is_identifier_continue);
        let kind = self.keyword(&ident).unwrap_or(TokenKind::Identifier);
        Token::new(kind, ident, position)
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

fn eat_while(cursor: &mut CharCursor, buf: &mut String, predicate: impl Fn(char) -> bool) {
    while let Some(ch) = cursor.next_if(&predicate) {
        buf.push(ch);
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\r' | '\n')
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexErrorKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new()
            .lex(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("{ } ( ) , ; + - * / ="),
            vec![
                TokenKind::OpenBrace,
                TokenKind::CloseBrace,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::Comma,
                TokenKind::Semi,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Asterisk,
                TokenKind::Slash,
                TokenKind::Equals,
            ]
        );
        // no multi-character operators
        assert_eq!(kinds("=="), vec![TokenKind::Equals, TokenKind::Equals]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("fn return var if else"),
            vec![
                TokenKind::Fn,
                TokenKind::Return,
                TokenKind::Var,
                TokenKind::If,
                TokenKind::Else,
            ]
        );
        let tokens = Lexer::new().lex("RETURN Var").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Return);
        assert_eq!(tokens[0].text, "RETURN");
        assert_eq!(tokens[1].kind, TokenKind::Var);
        assert_eq!(kinds("fnord _if var1"), vec![TokenKind::Identifier; 3]);
    }

    #[test]
    fn test_literals() {
        let tokens = Lexer::new().lex(r#"x_1 42 "hello world""#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Identifier, "x_1", Position::new(1, 1)),
                Token::new(TokenKind::NumberLit, "42", Position::new(1, 5)),
                Token::new(TokenKind::StringLit, "hello world", Position::new(1, 8)),
            ]
        );
    }

    #[test]
    fn test_negative_number() {
        let tokens = Lexer::new().lex("-12").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Minus);
        assert_eq!(tokens[1].kind, TokenKind::NumberLit);
        assert_eq!(tokens[1].text, "12");
    }

    #[test]
    fn test_no_escapes() {
        let tokens = Lexer::new().lex(r#""a\" b"#).unwrap();
        assert_eq!(tokens[0].text, r"a\");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new().lex("var x = 1;\r\n  x;").unwrap();
        let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 5), (1, 7), (1, 9), (1, 10), (2, 3), (2, 4)]
        );
    }

    #[test]
    fn test_end_position() {
        let (_, end) = Lexer::new().lex_with_end(r#"abc "de""#).unwrap();
        assert_eq!(end, Position::new(1, 9));
        let (_, end) = Lexer::new().lex_with_end("x = \"a\nbc\"").unwrap();
        assert_eq!(end, Position::new(2, 4));
        let (tokens, end) = Lexer::new().lex_with_end("x;\n  \n").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(end, Position::new(3, 1));
        let (_, end) = Lexer::new().lex_with_end("").unwrap();
        assert_eq!(end, Position::new(1, 1));
    }

    #[test]
    fn test_multi_line_string() {
        let tokens = Lexer::new().lex("\"a\nb\" c").unwrap();
        assert_eq!(tokens[0].text, "a\nb");
        assert_eq!(tokens[0].position(), Position::new(1, 1));
        assert_eq!(tokens[1].position(), Position::new(2, 4));
    }

    #[test]
    fn test_empty() {
        assert_eq!(kinds(""), vec![]);
        assert_eq!(kinds(" \n\r\n "), vec![]);
    }

    #[test]
    fn test_unexpected_char() {
        let err = Lexer::new().lex("@").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('@'));
        assert_eq!((err.line, err.column), (1, 1));

        let err = Lexer::new().lex("x;\n\tfoo").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('\t'));
        assert_eq!((err.line, err.column), (2, 1));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new().lex("x = \"abc").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!((err.line, err.column), (1, 5));
    }
}
