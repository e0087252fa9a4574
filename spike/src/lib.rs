use std::path::{Path, PathBuf};

pub use spike_emit::emit;
pub use spike_parser::ast;
pub use spike_parser::error::{CompileError, Expected, LexError, LexErrorKind, ParseError};
pub use spike_parser::lexer::TokenKind;
pub use spike_parser::parse;
pub use spike_source::Position;

/// Extension of the files written by [`compile`]'s callers.
pub const OUTPUT_EXTENSION: &str = "lua";

/// Compiles `source` into Lua lines. The first lex or parse error aborts the compilation.
pub fn compile(source: &str) -> Result<Vec<String>, CompileError> {
    let program = parse(source)?;
    Ok(emit(&program))
}

/// Returns the sibling path the compiled output of `input` is written to.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("dir/main.spike")),
            PathBuf::from("dir/main.lua")
        );
        assert_eq!(output_path(Path::new("main")), PathBuf::from("main.lua"));
    }
}
