//! `jsonkit` CLI — validate, reformat, and query JSON documents from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print (stdin → stdout)
//! echo '{"name":"json","integers":[1,2,"3"]}' | jsonkit pretty
//!
//! # Pretty-print a file into another file with a 4-space indent
//! jsonkit pretty -i data.json -o data.pretty.json --indent 4
//!
//! # Strip insignificant whitespace
//! jsonkit compact -i data.json
//!
//! # Validate, reporting the first error position
//! jsonkit check -i data.json
//!
//! # Select a nested value; numeric segments index arrays
//! jsonkit get properties.integers.2 -i data.json
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use jsonkit_core::{PrettyPrinter, Printer, Value};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "jsonkit",
    version,
    about = "Validate, reformat and query JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and pretty-print a document
    Pretty {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per nesting level
        #[arg(long, default_value_t = jsonkit_core::printer::DEFAULT_INDENT)]
        indent: usize,
    },
    /// Parse and print without insignificant whitespace
    Compact {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check that the input is a single valid JSON document
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the value at a dotted path, e.g. `a.3.b`
    Get {
        /// Dotted path; an empty path selects the whole document
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pretty {
            input,
            output,
            indent,
        } => {
            let value = read_document(input.as_deref())?;
            let text = PrettyPrinter::with_indent(indent).print(&value);
            write_output(output.as_deref(), &text)?;
        }
        Commands::Compact { input, output } => {
            let value = read_document(input.as_deref())?;
            let text = Printer::new().print(&value);
            write_output(output.as_deref(), &text)?;
        }
        Commands::Check { input } => {
            let bytes = read_input(input.as_deref())?;
            if let Err(err) = jsonkit_core::parse_bytes(&bytes) {
                anyhow::bail!("line {}, column {}: {}", err.line, err.column, err.message);
            }
            println!("valid");
        }
        Commands::Get { path, input } => {
            let value = read_document(input.as_deref())?;
            let selected =
                select(&value, &path).ok_or_else(|| anyhow!("Path '{}' does not resolve", path))?;
            println!("{}", Printer::new().print(selected));
        }
    }

    Ok(())
}

/// Walk a dotted path without promoting or inserting anything.
///
/// A segment addresses an array element when the current node is an Array
/// and the segment is a decimal index, and an object entry otherwise.
fn select<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Array(_) => node.get(segment.parse::<usize>().ok()?),
        Value::Object(_) => node.get(segment),
        _ => None,
    })
}

fn read_document(path: Option<&str>) -> Result<Value> {
    let bytes = read_input(path)?;
    jsonkit_core::parse_bytes(&bytes).context("Failed to parse JSON input")
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
