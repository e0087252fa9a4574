use super::*;
use crate::ast::BinOp;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_prec`] with `min_prec = 0`.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_prec(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        match self.current().kind {
            TokenKind::NumberLit | TokenKind::StringLit => self.parse_literal_expr(),
            TokenKind::Identifier => self.parse_identifier_or_call_expr(),
            TokenKind::OpenParen => {
                self.expect(TokenKind::OpenParen)?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected(Expected::Expression)),
        }
    }

    /// Parses an expression whose binary operators all bind tighter than `min_prec`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_prec(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let kind = self.current().kind;
            let prec = match kind.binop_precedence() {
                Some(prec) => prec,
                None => break, // not a valid binop, stop parsing
            };
            if prec <= min_prec {
                break; // does not bind tighter than min_prec, stop parsing
            }
            let op = match kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                TokenKind::Asterisk => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Equals => BinOp::Assign,
                _ => break,
            };
            self.expect(kind)?;

            // assignment takes the whole remaining expression (including further assignments) as its rhs
            let rhs_prec = if op == BinOp::Assign { prec - 1 } else { prec };
            let rhs = self.parse_expr_prec(rhs_prec)?;

            lhs = Expr::binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A literal can be either a number literal or a string literal.
    fn parse_literal_expr(&mut self) -> Result<Expr, ParseError> {
        if let Some(token) = self.cursor.next_if(|token| token.is(TokenKind::NumberLit)) {
            Ok(Expr::NumberLit(token.text.clone()))
        } else if let Some(token) = self.cursor.next_if(|token| token.is(TokenKind::StringLit)) {
            Ok(Expr::StringLit(token.text.clone()))
        } else {
            Err(self.unexpected(Expected::Expression))
        }
    }

    /* Expressions.Identifier */
    /// Parses an identifier or a call expression.
    fn parse_identifier_or_call_expr(&mut self) -> Result<Expr, ParseError> {
        let ident = self.expect_ident()?;

        // step back onto the identifier and re-parse it as the callee
        if self.current().is(TokenKind::OpenParen) && self.cursor.back().is_ok() {
            return self.parse_call_expr();
        }
        Ok(Expr::Identifier(ident))
    }

    fn parse_call_expr(&mut self) -> Result<Expr, ParseError> {
        let ident = self.expect_ident()?;
        self.expect(TokenKind::OpenParen)?;

        let mut args = Vec::new();
        if !self.eat(TokenKind::CloseParen) {
            loop {
                args.push(self.parse_expr()?);

                if self.eat(TokenKind::CloseParen) {
                    break;
                }
                self.expect(TokenKind::Comma)?;
            }
        }

        Ok(Expr::FnCall { ident, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use insta::assert_debug_snapshot;

    fn try_expr(source: &str) -> Result<Expr, ParseError> {
        let (tokens, end) = Lexer::new().lex_with_end(source).unwrap();
        Parser::new(&tokens, end).parse_expr()
    }

    fn expr(source: &str) -> Expr {
        try_expr(source).unwrap()
    }

    fn num(text: &str) -> Expr {
        Expr::NumberLit(text.to_string())
    }

    fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }

    #[test]
    fn test_literal() {
        assert_eq!(expr("1"), num("1"));
        assert_eq!(expr("007"), num("007"));
        assert_eq!(expr(r#""hi there""#), Expr::StringLit("hi there".to_string()));
        // no numeric interpretation
        assert_eq!(expr("99999999999999999999999999"), num("99999999999999999999999999"));
    }

    #[test]
    fn test_binary_expr() {
        assert_debug_snapshot!(expr("1 + 2 * 3"), @r###"
        Binary {
            lhs: NumberLit(
                "1",
            ),
            op: Add,
            rhs: Binary {
                lhs: NumberLit(
                    "2",
                ),
                op: Mul,
                rhs: NumberLit(
                    "3",
                ),
            },
        }
        "###);
        assert_eq!(
            expr("1 * 2 + 3"),
            Expr::binary(
                Expr::binary(num("1"), BinOp::Mul, num("2")),
                BinOp::Add,
                num("3")
            )
        );
    }

    #[test]
    fn test_associativity() {
        // should be (2 * 2) * 2
        assert_eq!(
            expr("2 * 2 * 2"),
            Expr::binary(
                Expr::binary(num("2"), BinOp::Mul, num("2")),
                BinOp::Mul,
                num("2")
            )
        );
        // should be (8 - 4) - 2
        assert_eq!(
            expr("8 - 4 - 2"),
            Expr::binary(
                Expr::binary(num("8"), BinOp::Sub, num("4")),
                BinOp::Sub,
                num("2")
            )
        );
        // should be a = (b = 3)
        assert_debug_snapshot!(expr("a = b = 3"), @r###"
        Binary {
            lhs: Identifier(
                "a",
            ),
            op: Assign,
            rhs: Binary {
                lhs: Identifier(
                    "b",
                ),
                op: Assign,
                rhs: NumberLit(
                    "3",
                ),
            },
        }
        "###);
    }

    #[test]
    fn test_assignment_takes_whole_rhs() {
        assert_eq!(
            expr("x = y / 2 + 1"),
            Expr::binary(
                ident("x"),
                BinOp::Assign,
                Expr::binary(
                    Expr::binary(ident("y"), BinOp::Div, num("2")),
                    BinOp::Add,
                    num("1")
                )
            )
        );
    }

    #[test]
    fn test_parens() {
        assert_eq!(
            expr("(1 + 2) * 3"),
            Expr::binary(
                Expr::binary(num("1"), BinOp::Add, num("2")),
                BinOp::Mul,
                num("3")
            )
        );
        assert_eq!(expr("((a))"), ident("a"));
    }

    #[test]
    fn test_identifier() {
        assert_eq!(expr("foo"), ident("foo"));
    }

    #[test]
    fn test_fn_call() {
        assert_eq!(
            expr("foo()"),
            Expr::FnCall {
                ident: "foo".to_string(),
                args: vec![]
            }
        );
        assert_debug_snapshot!(expr("foo(1, bar, baz())"), @r###"
        FnCall {
            ident: "foo",
            args: [
                NumberLit(
                    "1",
                ),
                Identifier(
                    "bar",
                ),
                FnCall {
                    ident: "baz",
                    args: [],
                },
            ],
        }
        "###);
        assert_eq!(
            expr("f(a + 1) * 2"),
            Expr::binary(
                Expr::FnCall {
                    ident: "f".to_string(),
                    args: vec![Expr::binary(ident("a"), BinOp::Add, num("1"))]
                },
                BinOp::Mul,
                num("2")
            )
        );
    }

    #[test]
    fn test_errors() {
        let err = try_expr("1 +").unwrap_err();
        assert_eq!(err.expected, Expected::Expression);
        assert_eq!(err.found, TokenKind::Eof);
        assert_eq!((err.line, err.column), (1, 4));

        let err = try_expr("-1").unwrap_err();
        assert_eq!(err.expected, Expected::Expression);
        assert_eq!(err.found, TokenKind::Minus);

        let err = try_expr("(1").unwrap_err();
        assert_eq!(err.expected, Expected::Token(TokenKind::CloseParen));

        let err = try_expr("f(1 2)").unwrap_err();
        assert_eq!(err.expected, Expected::Token(TokenKind::Comma));
        assert_eq!(err.found, TokenKind::NumberLit);
        assert_eq!(err.found_text, "2");
        assert_eq!((err.line, err.column), (1, 5));

        let err = try_expr("f(1,").unwrap_err();
        assert_eq!(err.expected, Expected::Expression);
        assert_eq!(err.found, TokenKind::Eof);
    }
}
