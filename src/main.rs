//! lifedoc — append a life-cycle directive to a doc string.
//!
//! Reads a doc string from a file (`-i`) or stdin and writes it back with
//! the directive appended:
//!
//! - `lifedoc versionadded --version 1.4 < doc.txt`
//! - `lifedoc deprecated --version 2.0 -r "Use bar." -i doc.txt -o out.txt`
//!
//! With `--message NAME` the deprecation warning text a caller of NAME
//! would see is printed instead.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use lifedoc::{
    Annotation, DirectiveKind, Documented, Entity, EntityKind, WarningOptions, DEFAULT_LINE_LENGTH,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "lifedoc=warn";

#[derive(Parser)]
#[command(
    name = "lifedoc",
    about = "Append versionadded, versionchanged or deprecated directives to doc strings"
)]
struct Cli {
    /// Directive to append
    #[arg(value_enum)]
    directive: DirectiveArg,

    /// Version the directive refers to (required)
    #[arg(long, default_value = "")]
    version: String,

    /// Reason text placed in the directive body
    #[arg(short = 'r', long, default_value = "")]
    reason: String,

    /// Maximum directive line length; 3 or less disables wrapping
    #[arg(short = 'w', long, default_value_t = DEFAULT_LINE_LENGTH, allow_negative_numbers = true)]
    line_length: isize,

    /// Input file. If omitted, reads from stdin.
    #[arg(short = 'i')]
    input: Option<PathBuf>,

    /// Output file. If omitted, writes to stdout.
    #[arg(short = 'o')]
    output: Option<PathBuf>,

    /// Print the warning message for the named entity instead (deprecated only)
    #[arg(long, value_name = "NAME")]
    message: Option<String>,

    /// Kind of the entity named by --message
    #[arg(long, value_enum, default_value = "function")]
    kind: KindArg,

    /// Log decoration details to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectiveArg {
    #[value(name = "versionadded")]
    VersionAdded,
    #[value(name = "versionchanged")]
    VersionChanged,
    #[value(name = "deprecated")]
    Deprecated,
}

impl From<DirectiveArg> for DirectiveKind {
    fn from(arg: DirectiveArg) -> Self {
        match arg {
            DirectiveArg::VersionAdded => DirectiveKind::VersionAdded,
            DirectiveArg::VersionChanged => DirectiveKind::VersionChanged,
            DirectiveArg::Deprecated => DirectiveKind::Deprecated,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    #[value(name = "function")]
    Function,
    #[value(name = "staticmethod")]
    StaticMethod,
    #[value(name = "classmethod")]
    ClassMethod,
    #[value(name = "method")]
    Method,
    #[value(name = "class")]
    Class,
}

impl From<KindArg> for EntityKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Function => EntityKind::Function,
            KindArg::StaticMethod => EntityKind::StaticMethod,
            KindArg::ClassMethod => EntityKind::ClassMethod,
            KindArg::Method => EntityKind::Method,
            KindArg::Class => EntityKind::Class,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let annotation = Annotation::new(
        cli.directive.into(),
        cli.reason.as_str(),
        cli.version.as_str(),
        cli.line_length,
        WarningOptions::default(),
    )?;

    if let Some(name) = cli.message.as_deref() {
        if annotation.kind() != DirectiveKind::Deprecated {
            bail!("--message only applies to deprecated directives");
        }
        let target = Entity::new(name, cli.kind.into(), |_: ()| ());
        let message = format!("{}\n", annotation.build_message(&target));
        return write_output(cli.output.as_deref(), &message);
    }

    let doc = read_input(cli.input.as_deref())?;
    let name = cli
        .input
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
    let mut target = Entity::new(name, EntityKind::Function, |_: ()| ());
    if !doc.is_empty() {
        target = target.with_doc(doc);
    }

    annotation.annotate(&mut target);
    write_output(cli.output.as_deref(), target.doc().unwrap_or_default())
}

/// stderr logging; `RUST_LOG` wins unless --verbose is given.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("lifedoc=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("failed to write stdout")?;
            stdout.flush().context("failed to write stdout")
        }
    }
}
