//! Lowers AST into Lua source lines.

use spike_parser::ast::{Expr, Program, Stmt};

/// Prepended to every user-defined function name so it cannot clash with Lua globals.
pub const FUNCTION_PREFIX: &str = "spike_";
/// One level of indentation.
pub const INDENT: &str = "    ";
/// Calls to this name are redirected to [`OUTPUT_INTRINSIC`] instead of being renamed.
pub const PRINT_FN: &str = "print";
pub const OUTPUT_INTRINSIC: &str = "print";

/// Generate Lua lines from an abstract syntax tree.
#[derive(Debug, Default)]
pub struct Emitter {
    lines: Vec<String>,
    /// Current block nesting. Every written line is indented by this many levels.
    depth: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
        }
    }

    /// Consumes `self` and returns the generated lines.
    #[must_use]
    pub fn into_inner_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn emit_program(&mut self, program: &Program) {
        for stmt in &program.body {
            self.emit_stmt(stmt);
        }
    }

    pub fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FnDeclaration {
                ident,
                params,
                body,
            } => {
                self.write_line(format!("function {}({})", mangle(ident), params.join(", ")));
                self.emit_block(body);
                self.write_line("end");
            }
            Stmt::VarDeclaration { ident, initializer } => {
                self.write_line(format!("local {} = {}", ident, emit_expr(initializer)));
            }
            Stmt::ReturnStmt(expr) => {
                self.write_line(format!("return {}", emit_expr(expr)));
            }
            Stmt::ExprStmt(expr) => {
                self.write_line(emit_expr(expr));
            }
            Stmt::IfStmt {
                condition,
                then_body,
            } => {
                self.write_line(format!("if {} then", emit_expr(condition)));
                self.emit_block(then_body);
                self.write_line("end");
            }
            Stmt::IfElseStmt {
                condition,
                then_body,
                else_body,
            } => {
                self.write_line(format!("if {} then", emit_expr(condition)));
                self.emit_block(then_body);
                self.write_line("else");
                self.emit_block(else_body);
                self.write_line("end");
            }
        }
    }

    fn emit_block(&mut self, body: &[Stmt]) {
        self.enter_scope();
        for stmt in body {
            self.emit_stmt(stmt);
        }
        self.exit_scope();
    }

    fn enter_scope(&mut self) {
        self.depth += 1;
    }

    fn exit_scope(&mut self) {
        self.depth -= 1;
    }

    fn write_line(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("{}{}", INDENT.repeat(self.depth), line.as_ref()));
    }
}

/// Renders `expr` as a single-line fragment.
/// No parentheses are inserted; the fragment mirrors the tree shape operand by operand.
pub fn emit_expr(expr: &Expr) -> String {
    match expr {
        Expr::NumberLit(val) => val.clone(),
        // embedded quotes are not escaped
        Expr::StringLit(val) => format!("\"{}\"", val),
        Expr::Identifier(ident) => ident.clone(),
        Expr::FnCall { ident, args } => {
            let callee = if ident == PRINT_FN {
                OUTPUT_INTRINSIC.to_string()
            } else {
                mangle(ident)
            };
            let args: Vec<String> = args.iter().map(emit_expr).collect();
            format!("{}({})", callee, args.join(", "))
        }
        Expr::Binary { lhs, op, rhs } => {
            format!("{} {} {}", emit_expr(lhs), op.symbol(), emit_expr(rhs))
        }
    }
}

/// The output name of the user function `ident`.
pub fn mangle(ident: &str) -> String {
    format!("{}{}", FUNCTION_PREFIX, ident)
}
