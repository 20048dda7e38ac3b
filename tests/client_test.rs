//! End-to-end tests: build an index on disk, open the engine with a real
//! config file, and drive batch and interactive sessions through the
//! driver exactly as the binary wires them up.

use std::io::Cursor;
use std::path::Path;

use ftsearch::driver::{self, Mode, CLEAR_SCREEN};
use ftsearch::{args, BinaryIndexWriter, IndexBuilder, SearchEngine};

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{"ngram_min_length": 3, "ngram_max_length": 6, "stop_words": ["the", "of"]}"#,
    )
    .unwrap();
    path
}

fn write_movie_index(dir: &Path, engine: &SearchEngine) -> String {
    let mut builder = IndexBuilder::new();
    builder.add_document(1, "star wars", engine.config());
    builder.add_document(2, "the terminator", engine.config());
    builder.add_document(3, "star trek", engine.config());
    let index_dir = dir.join("movies");
    BinaryIndexWriter::write(&index_dir, &builder.build()).unwrap();
    index_dir.to_str().unwrap().to_string()
}

#[test]
fn batch_mode_prints_one_result() {
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::open(write_config(dir.path())).unwrap();
    let index_dir = write_movie_index(dir.path(), &engine);

    let raw = [format!("--index={index_dir}"), "--query=starwars".to_string()];
    let resolved = args::resolve(&raw).unwrap();
    let mode = Mode::select(raw.len());
    assert_eq!(mode, Mode::Batch);

    let mut input = Cursor::new(Vec::new());
    let mut output = Vec::new();
    driver::run(&engine, &resolved, mode, &mut input, &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.starts_with("\tSearch result:\n\tTop\tId\tScore\t\tText\n"));
    // "starwars" shares the "sta"/"star" prefixes with both star movies.
    assert!(output.contains("star wars"));
    assert!(output.contains("star trek"));
    assert!(!output.contains("terminator"));
}

#[test]
fn interactive_session_queries_until_quit() {
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::open(write_config(dir.path())).unwrap();
    let index_dir = write_movie_index(dir.path(), &engine);

    let raw = [format!("--index={index_dir}")];
    let resolved = args::resolve(&raw).unwrap();
    let mode = Mode::select(raw.len());
    assert_eq!(mode, Mode::Interactive);

    let mut input = Cursor::new(b"terminator\n!q\n".to_vec());
    let mut output = Vec::new();
    driver::run(&engine, &resolved, mode, &mut input, &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.starts_with(CLEAR_SCREEN));
    assert!(output.contains("the terminator"));
    // One prompt per loop iteration: the query and the quit line.
    assert_eq!(output.matches("> ").count(), 2);
}

#[test]
fn zero_arguments_surface_the_engines_missing_parameter_failure() {
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::open(write_config(dir.path())).unwrap();

    let raw: [String; 0] = [];
    let resolved = args::resolve(&raw).unwrap();
    let mode = Mode::select(raw.len());
    assert_eq!(mode, Mode::Batch);

    let mut input = Cursor::new(Vec::new());
    let mut output = Vec::new();
    let err = driver::run(&engine, &resolved, mode, &mut input, &mut output).unwrap_err();
    assert!(err.to_string().contains("missing required parameter"));
}

#[test]
fn interactive_engine_failure_ends_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::open(write_config(dir.path())).unwrap();

    // Index key present but pointing nowhere: the first query faults.
    let raw = ["--index=/nonexistent/movies".to_string()];
    let resolved = args::resolve(&raw).unwrap();

    let mut input = Cursor::new(b"hello\nnever reached\n!q\n".to_vec());
    let mut output = Vec::new();
    let outcome = driver::run(
        &engine,
        &resolved,
        Mode::select(raw.len()),
        &mut input,
        &mut output,
    );
    assert!(outcome.is_err());

    let output = String::from_utf8(output).unwrap();
    // Only the first prompt was ever printed.
    assert_eq!(output.matches("> ").count(), 1);
}
