use std::{error::Error, fs, path::PathBuf, process};

use clap::Parser;
use log::{debug, info};

#[derive(Debug, Parser)]
#[clap(name = "spike", about = "Compiles spike source files to Lua")]
struct CommandLine {
    /// Source file to compile.
    input: PathBuf,
    /// Print the parsed AST instead of writing Lua output.
    #[clap(long)]
    ast: bool,
    /// Where to write the Lua output. Defaults to the input path with a `.lua` extension.
    #[clap(short, long)]
    output: Option<PathBuf>,
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let cli = CommandLine::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(cli: &CommandLine) -> Result<(), Box<dyn Error>> {
    info!("compiling {}", cli.input.display());
    let source = fs::read_to_string(&cli.input)
        .map_err(|err| format!("could not read {}: {}", cli.input.display(), err))?;

    let program = spike::parse(&source)?;
    debug!("parsed {} top-level statements", program.body.len());

    if cli.ast {
        println!("{:#?}", program);
        return Ok(());
    }

    let lines = spike::emit(&program);
    debug!("emitted {} lines", lines.len());

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| spike::output_path(&cli.input));
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(&output, contents)
        .map_err(|err| format!("could not write {}: {}", output.display(), err))?;
    info!("wrote {}", output.display());

    Ok(())
}
