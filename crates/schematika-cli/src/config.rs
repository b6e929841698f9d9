//! CLI configuration (§6): batch-mode file execution, the REPL, and the
//! collector's tunables, all surfaced as one `clap` derive struct the way
//! the teacher's driver crate surfaces its own flags.

use std::path::PathBuf;

use clap::Parser;

/// `schematika [FILE] [FLAGS]` — runs `FILE` in batch mode, or starts an
/// interactive REPL when no file is given.
#[derive(Parser, Debug)]
#[command(name = "schematika", version, about = "Schematika language interpreter")]
pub struct Config {
    /// Source file to run. Omit to start an interactive REPL.
    pub file: Option<PathBuf>,

    /// Log collector activity and evaluation steps at `debug` level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print collector statistics after the program runs (§4.D).
    #[arg(long)]
    pub gc_stats: bool,

    /// Size in bytes of each nursery semispace (§4.D). Overrides
    /// `SCHEMATIKA_NURSERY_BYTES` when given explicitly.
    #[arg(long)]
    pub nursery_bytes: Option<usize>,
}
