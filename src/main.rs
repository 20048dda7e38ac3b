use std::io;

use anyhow::Result;

use ftsearch::driver::{self, Mode};
use ftsearch::engine::{SearchEngine, CONFIG_PATH};
use ftsearch::{args, logging};

fn main() -> Result<()> {
    logging::init_tracing();

    // Resolution failure is strictly prior to mode selection: a malformed
    // argument fails here, before any mode logic runs.
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let resolved = args::resolve(&raw)?;
    let mode = Mode::select(raw.len());

    let engine = SearchEngine::open(CONFIG_PATH)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    driver::run(&engine, &resolved, mode, &mut input, &mut output)
}
