//! gramcov: writes unique grammar-generated inputs for a target program.

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use gramcov::{ExpansionSet, Fuzzer, Grammar, DEFAULT_MAX_DEPTH, DEFAULT_START_SYMBOL};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gramcov")]
#[command(about = "Generate unique test inputs from a context-free grammar")]
#[command(version)]
struct Cli {
    /// Program under test; the inputs are written next to it with the extension `.in`
    target: PathBuf,

    /// Grammar file, a dictionary literal mapping symbols to lists of productions
    grammar: PathBuf,

    /// Number of unique inputs to write
    count: usize,

    /// Write the inputs here instead
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Symbol every input is derived from
    #[arg(short, long, default_value = DEFAULT_START_SYMBOL)]
    start: String,

    /// Maximum nesting of productions
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Give up after this many duplicate inputs in a row
    #[arg(long, default_value_t = 10_000)]
    max_attempts: usize,

    /// Log every generated input
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.grammar)
        .with_context(|| format!("failed to read grammar {}", cli.grammar.display()))?;
    let grammar: Grammar = text
        .parse()
        .with_context(|| format!("failed to parse grammar {}", cli.grammar.display()))?;

    let mut fuzzer = Fuzzer::new(grammar)
        .with_start_symbol(cli.start)
        .with_max_depth(cli.max_depth)
        .with_logging(cli.verbose);
    let ceiling = fuzzer
        .max_expansion_coverage(None, None)
        .context("grammar is not usable for coverage tracking")?;

    let output = cli.output.unwrap_or_else(|| output_path(&cli.target));
    let file = File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut out = BufWriter::new(file);

    let mut seen: HashSet<String> = HashSet::with_capacity(cli.count);
    let mut duplicates = 0;
    while seen.len() < cli.count {
        let (input, used): (String, ExpansionSet) = fuzzer.fuzz_visit()?;
        fuzzer.add_coverage(used);

        if seen.contains(&input) {
            duplicates += 1;
            if duplicates >= cli.max_attempts {
                warn!(
                    written = seen.len(),
                    requested = cli.count,
                    "giving up after {} duplicate inputs in a row",
                    duplicates
                );
                break;
            }
            continue;
        }

        duplicates = 0;
        writeln!(out, "{}", input)?;
        seen.insert(input);
    }
    out.flush()
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        inputs = seen.len(),
        output = %output.display(),
        "covered {} of {} expansions",
        fuzzer.expansion_coverage().len(),
        ceiling.len()
    );

    if seen.is_empty() && cli.count > 0 {
        bail!("no inputs could be generated");
    }
    Ok(())
}

/// `prog.py` -> `prog.in`, `prog` -> `prog.in`
fn output_path(target: &Path) -> PathBuf {
    target.with_extension("in")
}
