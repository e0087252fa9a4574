use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Assign,
}

impl BinOp {
    /// Operator symbol, identical in source and output.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Assign => "=",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Kept as source text; never parsed to a numeric value.
    NumberLit(String),
    /// Raw text between the quotes.
    StringLit(String),
    /// A variable reference (e.g. `foo`).
    Identifier(String),
    /// A function call (e.g. `foo(1, bar)`).
    FnCall { ident: String, args: Vec<Expr> },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinOp,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Self {
        Expr::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FnDeclaration {
        ident: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    VarDeclaration {
        ident: String,
        initializer: Expr,
    },
    ReturnStmt(Expr),
    ExprStmt(Expr),
    IfStmt {
        condition: Expr,
        then_body: Vec<Stmt>,
    },
    IfElseStmt {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
}

/// Root node. Created once per compilation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}
