//! Thin driver binding the lexer/parser/interpreter pipeline to a batch
//! file runner and an interactive REPL (§6). Grounded on the teacher's
//! `clap`-derive entry-point shape (`crates/cadenza/src/main.rs`'s `Cli`),
//! narrowed to a single parse-then-evaluate pass — there is no multi-crate
//! IR/codegen pipeline to drive once lexing, parsing, and tree-walking
//! evaluation are the whole system.

mod config;
mod repl;

pub use config::Config;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use schematika_gc::{GcConfig, Heap};
use schematika_interp::Interpreter;
use schematika_util::Handler;

/// Run the driver end to end: configure the collector, run the requested
/// mode, then report `--gc-stats` if asked.
pub fn run(config: &Config) -> Result<()> {
    let mut gc_config = GcConfig::from_env();
    if let Some(bytes) = config.nursery_bytes {
        gc_config.nursery_bytes = bytes;
    }
    gc_config.verbose = config.verbose;
    gc_config.stats_enabled = config.gc_stats;
    // schematika-interp's `Value`s are `Rc`-managed rather than allocated
    // on this heap (see DESIGN.md), so the collector runs idle alongside
    // evaluation; `--gc-stats` still reports on it so the flag matches §6's
    // documented surface, even though today it always reads zero traffic.
    let heap = Heap::new(gc_config).context("failed to initialize the collector")?;

    let interp = Interpreter::new();
    match &config.file {
        Some(path) => run_file(&interp, path, &heap, config.gc_stats)?,
        None => repl::run(&interp, &heap, config.gc_stats)?,
    }
    Ok(())
}

/// Batch mode (§6): parse the whole file, then evaluate its top-level
/// `def`s one at a time so `--gc-stats` can report after each, matching
/// the REPL's per-definition granularity.
fn run_file(interp: &Interpreter, path: &Path, heap: &Heap, gc_stats: bool) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut handler = Handler::new();
    let program = schematika_parse::parse_source(&source, &mut handler)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let defs = &program.as_sequence().expect("parse_source always returns a Sequence").body;
    for def in defs {
        interp.eval(def, None).map_err(|e| anyhow::anyhow!("{e}"))?;
        if gc_stats {
            eprintln!("{}", heap.stats());
        }
    }
    Ok(())
}
