//! The driver: wires the lexer, parser, and code generator together behind
//! a thin CLI.
//!
//! Source-level errors (lex/parse/semantic) never reach this crate as
//! values: the [`tinyc_util::Handler`] they go through prints to stderr and
//! exits the process directly. Everything this crate's `run` function
//! returns as an `Err` is therefore an *environmental* failure — a missing
//! file, a stdin read error — which is the only kind `anyhow` is used for
//! here.

use std::io::Read as _;
use std::path::PathBuf;

use clap::Parser as ClapParser;

use tinyc_par::Parser as TinycParser;
use tinyc_util::Handler;

mod error;
pub use error::DriverError;

/// `tinyc [--input PATH] [--emit-tokens] [--emit-ast] [-v|--verbose]`
///
/// With no arguments, source is read from standard input and IR is written
/// to standard output — the ambient flags below are pure ergonomics layered
/// on top of that unchanged core contract.
#[derive(Debug, ClapParser)]
#[command(name = "tinyc", about = "Compiles a tinyc source file to textual SSA IR")]
pub struct Cli {
    /// Source file to compile. Reads standard input when omitted.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Dumps the lexed token stream to stderr before parsing.
    #[arg(long)]
    pub emit_tokens: bool,

    /// Dumps the parsed AST to stderr before code generation.
    #[arg(long)]
    pub emit_ast: bool,

    /// Emits pipeline-stage progress to stderr. Equivalent to `RUST_LOG=tinyc_drv=info`.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Installs the `tracing` subscriber, gated behind `-v`/`RUST_LOG`, and
/// silent by default so it never interferes with the fixed diagnostic/IR
/// channels.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let filter = if verbose {
        EnvFilter::new("tinyc_drv=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Reads the whole program text from `cli.input`, or from standard input
/// when no path was given. Returns the crate's own [`DriverError`] rather
/// than `anyhow::Error` directly — `run`'s `?` converts it at the boundary,
/// keeping a typed error enum for the library side and `anyhow` for the
/// binary edge only.
fn read_source(cli: &Cli) -> Result<String, DriverError> {
    match &cli.input {
        Some(path) => std::fs::read_to_string(path).map_err(|source| DriverError::ReadFile {
            path: path.clone(),
            source,
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(DriverError::ReadStdin)?;
            Ok(buf)
        }
    }
}

/// Runs the full lex → parse → visit pipeline and writes the finished IR
/// module to standard output. Returns `Err` only for the environmental
/// failures described at the module level; every source-level error exits
/// the process from inside the pipeline before this function would return.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose);

    let source = read_source(&cli)?;
    let handler = Handler::new();

    tracing::info!("lexing and parsing");
    if cli.emit_tokens {
        let tokens: Vec<_> = tinyc_lex::Lexer::new(&source, &handler).collect();
        eprintln!("-- tokens --");
        for (token, line) in &tokens {
            eprintln!("{line}: {token:?}");
        }
    }

    let mut program = TinycParser::new(&source, &handler).parse_program();
    if cli.emit_ast {
        eprintln!("-- ast --");
        eprintln!("{program:#?}");
    }

    tracing::info!("generating IR");
    let ir = tinyc_gen::compile(&mut program, &handler);

    print!("{ir}");
    Ok(())
}
