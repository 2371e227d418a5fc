//! chemtex CLI - Translate mhchem `\ce{}` / `\pu{}` notation into plain TeX

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::process;

#[cfg(feature = "cli")]
use chemtex::{core::parser::machines, parse, texify, ChemError, Mode, Node};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "chemtex")]
#[command(version)]
#[command(about = "chemtex - Translate mhchem \\ce and \\pu notation into plain TeX", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Input notation: ce (equation), pu (unit) or tex (text with embedded commands)
    #[arg(short, long, default_value_t = Mode::Equation)]
    mode: Mode,

    /// Translate every input line on its own
    #[arg(short, long)]
    lines: bool,

    /// Print the parsed node tree as JSON instead of TeX
    #[arg(long)]
    ast: bool,

    /// Quiet mode: suppress status output to stderr
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List the registered parser machines
    Machines,

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    if let Some(cmd) = cli.command {
        handle_subcommand(cmd);
        return;
    }

    if let Err(message) = run(&cli) {
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<(), String> {
    let input = read_input(cli.input_file.as_deref()).map_err(|e| e.to_string())?;

    let chunks: Vec<&str> = if cli.lines {
        input.lines().collect()
    } else {
        vec![input.trim_end_matches(&['\r', '\n'][..])]
    };

    let mut results = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let result = if cli.ast {
            ast_json(chunk, cli.mode)
        } else {
            chemtex::translate(chunk, cli.mode).map_err(|e| describe(&e))
        };
        match result {
            Ok(output) => results.push(output),
            Err(message) if cli.lines => return Err(format!("line {}: {}", index + 1, message)),
            Err(message) => return Err(message),
        }
    }
    let result = results.join("\n");

    match &cli.output {
        Some(path) => {
            let mut file = fs::File::create(path).map_err(|e| e.to_string())?;
            writeln!(file, "{}", result).map_err(|e| e.to_string())?;
            if !cli.quiet {
                eprintln!("✓ Output written to: {}", path);
            }
        }
        None => println!("{}", result),
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn ast_json(input: &str, mode: Mode) -> Result<String, String> {
    let nodes: Vec<Node> = parse(input, mode.machine()).map_err(|e| describe(&e))?;
    // Rendering as well surfaces generator errors (unknown bond kinds, ...)
    texify::go(&nodes, false).map_err(|e| describe(&e))?;
    serde_json::to_string_pretty(&nodes).map_err(|e| e.to_string())
}

#[cfg(feature = "cli")]
fn describe(err: &ChemError) -> String {
    if err.is_internal() {
        format!("{} (internal error, please report)", err)
    } else {
        err.to_string()
    }
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) {
    match cmd {
        Commands::Machines => {
            for name in machines::names() {
                println!("{}", name);
            }
        }
        Commands::Info => {
            println!("chemtex - Translate mhchem \\ce and \\pu notation into plain TeX");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Modes:");
            println!("  ce   chemical equations, e.g. \"CO2 + C -> 2 CO\"");
            println!("  pu   physical units, e.g. \"123 kJ mol-1\"");
            println!("  tex  TeX text with embedded \\ce{{...}} and \\pu{{...}}");
            println!();
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install chemtex --features cli");
    eprintln!("  chemtex [OPTIONS] [INPUT_FILE]");
}
