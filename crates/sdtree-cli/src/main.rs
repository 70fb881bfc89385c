//! `sdtree` CLI: format, check, query and merge semi-structured documents.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print (keys sorted) from stdin to stdout
//! echo '{b: 1, "a": [true, null],}' | sdtree fmt
//!
//! # Compact output from a YAML file into a file
//! sdtree fmt --yaml --compact -i config.yaml -o config.json
//!
//! # Validate and report the first error code
//! sdtree check -i data.json
//!
//! # Select a subtree by path
//! sdtree select -i data.json servers 0 host
//!
//! # Merge two documents, recursing into nested objects
//! sdtree merge --deep base.json override.json
//!
//! # Escape arbitrary bytes into printable ASCII
//! sdtree escape -i blob.bin
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `sdtree=warn`).

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sdtree_core::{
    deep_merge, escape_bytes, load_text, merge, parse_document, parse_file, parse_value,
    parse_yaml, select_mut, to_compact, to_pretty, Element, Format, TreeError,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_MAX_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Parser)]
#[command(
    name = "sdtree",
    version,
    about = "Format, check, query and merge semi-structured documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where a document comes from and how to read it.
#[derive(Args)]
struct SourceArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Read the input as YAML instead of the native JSON grammar
    #[arg(long)]
    yaml: bool,
    /// Refuse inputs longer than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes: u64,
}

impl SourceArgs {
    fn format(&self) -> Format {
        if self.yaml {
            Format::Yaml
        } else {
            Format::Native
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Re-serialize a document with sorted keys
    Fmt {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write without whitespace
        #[arg(long)]
        compact: bool,
        /// Parse only the leading value and ignore anything after it
        #[arg(long, conflicts_with = "yaml")]
        leading: bool,
    },
    /// Validate a document and report the first error
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the subtree at a path of keys and array indices
    Select {
        #[command(flatten)]
        source: SourceArgs,
        /// Write without whitespace
        #[arg(long)]
        compact: bool,
        /// Path segments; an empty path selects the whole document
        #[arg(allow_hyphen_values = true)]
        path: Vec<String>,
    },
    /// Merge two documents; the right side wins on key conflicts
    Merge {
        /// Left document
        left: PathBuf,
        /// Right document
        right: PathBuf,
        /// Recurse into nested objects and append nested arrays (both inputs must be objects)
        #[arg(long)]
        deep: bool,
        /// Write without whitespace
        #[arg(long)]
        compact: bool,
        /// Read both inputs as YAML
        #[arg(long)]
        yaml: bool,
        /// Refuse inputs longer than this many bytes
        #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
        max_bytes: u64,
    },
    /// Escape raw bytes into printable ASCII
    Escape {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sdtree=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt {
            source,
            output,
            compact,
            leading,
        } => {
            let mut tree = load_tree(&source, leading).context("Failed to parse input")?;
            let text = render(&mut tree, compact);
            write_output(output.as_deref(), &text)?;
        }
        Commands::Check { source } => match load_tree(&source, false) {
            Ok(_) => println!("ok"),
            Err(TreeError::Parse(err)) => {
                println!("error {}: {err}", err.code.code());
                process::exit(1);
            }
            Err(err) => {
                println!("error: {err}");
                process::exit(1);
            }
        },
        Commands::Select {
            source,
            compact,
            path,
        } => {
            let mut tree = load_tree(&source, false).context("Failed to parse input")?;
            let Some(hit) = select_mut(&mut tree, &path) else {
                eprintln!("no match for path: {}", path.join(" "));
                process::exit(1);
            };
            let text = render(hit, compact);
            write_output(None, &text)?;
        }
        Commands::Merge {
            left,
            right,
            deep,
            compact,
            yaml,
            max_bytes,
        } => {
            let format = if yaml { Format::Yaml } else { Format::Native };
            let mut left_tree = parse_file(&left, max_bytes, format)
                .with_context(|| format!("Failed to parse {}", left.display()))?;
            let right_tree = parse_file(&right, max_bytes, format)
                .with_context(|| format!("Failed to parse {}", right.display()))?;

            let mut merged = if deep {
                if !left_tree.is_object() || !right_tree.is_object() {
                    bail!(
                        "--deep requires two objects, found {} and {}",
                        left_tree.kind(),
                        right_tree.kind()
                    );
                }
                deep_merge(&mut left_tree, &right_tree);
                left_tree
            } else {
                match merge(&left_tree, &right_tree) {
                    Some(merged) => merged,
                    None => bail!("Cannot merge a primitive; both inputs must be objects or arrays"),
                }
            };
            let text = render(&mut merged, compact);
            write_output(None, &text)?;
        }
        Commands::Escape { input } => {
            let bytes = read_bytes(input.as_deref())?;
            write_output(None, &escape_bytes(&bytes))?;
        }
    }

    Ok(())
}

fn render(tree: &mut Element, compact: bool) -> String {
    if compact {
        to_compact(tree)
    } else {
        to_pretty(tree)
    }
}

/// Read and parse one document. Files in document mode go through `parse_file`; stdin and
/// `--leading` read the text first so the right parse entry point can be chosen.
fn load_tree(source: &SourceArgs, leading: bool) -> sdtree_core::Result<Element> {
    let format = source.format();
    if let (Some(path), false) = (&source.input, leading) {
        return parse_file(path, source.max_bytes, format);
    }

    let text = match &source.input {
        Some(path) => load_text(path, source.max_bytes)?,
        None => read_stdin_text(source.max_bytes)?,
    };
    if text.is_empty() {
        return Err(TreeError::NoData);
    }
    match (format, leading) {
        (Format::Yaml, _) => parse_yaml(&text),
        (Format::Native, true) => Ok(parse_value(&text)?),
        (Format::Native, false) => Ok(parse_document(&text)?),
    }
}

fn read_stdin_text(max_bytes: u64) -> sdtree_core::Result<String> {
    let mut bytes = Vec::new();
    io::stdin()
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        return Err(TreeError::Truncated { limit: max_bytes });
    }
    String::from_utf8(bytes)
        .map_err(|err| TreeError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

fn read_bytes(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
