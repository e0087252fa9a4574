pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

use ast::Program;
use error::CompileError;
use lexer::Lexer;
use parser::Parser;

/// Lexes and parses `source` into a [`Program`].
pub fn parse(source: &str) -> Result<Program, CompileError> {
    let (tokens, end) = Lexer::new().lex_with_end(source)?;
    let program = Parser::new(&tokens, end).parse_program()?;
    Ok(program)
}
