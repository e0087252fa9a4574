use super::*;

impl<'a> Parser<'a> {
    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.current().kind {
            TokenKind::Fn => self.parse_fn_declaration(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Var => self.parse_var_declaration(),
            TokenKind::If => self.parse_if_stmt(),
            _ => {
                // expression statement
                let expr = self.parse_expr()?;
                self.expect_semis()?;
                Ok(Stmt::ExprStmt(expr))
            }
        }
    }

    /// Parses `{ stmt* }` and returns the statements.
    pub fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::OpenBrace)?;

        let mut body = Vec::new();
        while !self.eat(TokenKind::CloseBrace) {
            if self.cursor.at_end() {
                return Err(self.unexpected(Expected::Token(TokenKind::CloseBrace)));
            }
            body.push(self.parse_stmt()?);
        }

        Ok(body)
    }

    fn parse_var_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Var)?;
        let ident = self.expect_ident()?;
        self.expect(TokenKind::Equals)?;
        let initializer = self.parse_expr()?;
        self.expect_semis()?;
        Ok(Stmt::VarDeclaration { ident, initializer })
    }

    fn parse_fn_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Fn)?;
        let ident = self.expect_ident()?;

        self.expect(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        while let Some(param) = self.cursor.next_if(|token| token.is(TokenKind::Identifier)) {
            params.push(param.text.clone());
            // the separator after a parameter is skipped without checking its kind
            if !self.current().is(TokenKind::CloseParen) {
                self.cursor.next().ok();
            }
        }
        self.expect(TokenKind::CloseParen)?;

        let body = self.parse_block()?;

        Ok(Stmt::FnDeclaration {
            ident,
            params,
            body,
        })
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Return)?;
        let expr = self.parse_expr()?;
        self.expect_semis()?;
        Ok(Stmt::ReturnStmt(expr))
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::OpenParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::CloseParen)?;
        let then_body = self.parse_block()?;

        if !self.eat(TokenKind::Else) {
            return Ok(Stmt::IfStmt {
                condition,
                then_body,
            });
        }
        let else_body = self.parse_block()?;
        Ok(Stmt::IfElseStmt {
            condition,
            then_body,
            else_body,
        })
    }
}
