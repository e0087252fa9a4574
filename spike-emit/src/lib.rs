pub mod emitter;

use emitter::Emitter;
use spike_parser::ast::Program;

/// Renders `program` into output lines.
pub fn emit(program: &Program) -> Vec<String> {
    let mut emitter = Emitter::new();
    emitter.emit_program(program);
    emitter.into_inner_lines()
}
