//! The query driver: batch versus interactive mode.
//!
//! Mode is chosen by raw argument count alone. Exactly one argument means
//! interactive; any other count means batch. A caller passing just
//! `--index=NAME` therefore always gets the interactive loop, while zero or
//! two-plus arguments run a single batch query with whatever `index` and
//! `query` values the mapping holds (absence is the engine's problem).

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::args::ArgMap;
use crate::engine::SearchEngine;

/// Clears the screen and scrollback before the interactive loop starts.
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J\x1b[3J";

/// Typing this exact line ends the interactive session.
pub const QUIT_SENTINEL: &str = "!q";

const PROMPT: &str = "> ";

/// What the driver needs from the engine: one synchronous query at a time.
pub trait SearchBackend {
    fn search(&self, index_id: Option<&str>, query: Option<&str>) -> Result<String>;
}

impl SearchBackend for SearchEngine {
    fn search(&self, index_id: Option<&str>, query: Option<&str>) -> Result<String> {
        Ok(SearchEngine::search(self, index_id, query)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Batch,
    Interactive,
}

impl Mode {
    /// Select the mode from the RAW argument count, not from resolved keys.
    pub fn select(raw_arg_count: usize) -> Self {
        if raw_arg_count == 1 {
            Mode::Interactive
        } else {
            Mode::Batch
        }
    }
}

/// Drive one run of the client. Errors from the backend are not caught:
/// they unwind out and fail the process.
pub fn run<B, R, W>(
    backend: &B,
    args: &ArgMap,
    mode: Mode,
    input: &mut R,
    output: &mut W,
) -> Result<()>
where
    B: SearchBackend,
    R: BufRead,
    W: Write,
{
    match mode {
        Mode::Batch => run_batch(backend, args, output),
        Mode::Interactive => run_interactive(backend, args, input, output),
    }
}

fn run_batch<B: SearchBackend, W: Write>(
    backend: &B,
    args: &ArgMap,
    output: &mut W,
) -> Result<()> {
    let result = backend.search(args.get("index"), args.get("query"))?;
    writeln!(output, "{result}")?;
    Ok(())
}

fn run_interactive<B: SearchBackend, R: BufRead, W: Write>(
    backend: &B,
    args: &ArgMap,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    write!(output, "{CLEAR_SCREEN}")?;
    // The index identifier is captured once; it never changes mid-session.
    let index_id = args.get("index");

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        if read == 0 {
            // Exhausted input is a fault, not an implicit quit.
            anyhow::bail!("input stream closed before '{QUIT_SENTINEL}'");
        }
        let line = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&line);

        if line == QUIT_SENTINEL {
            return Ok(());
        }

        let result = backend.search(index_id, Some(line))?;
        writeln!(output, "{result}")?;
    }
}
