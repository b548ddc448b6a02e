//! The CLI commands against real directories.

use std::fs;
use std::path::Path;

use fable_eval::{buffer_console, Value};
use fable_ir::cache;
use fable_ir::{Expr, Program, Stmt, VariableType};
use fablec::commands::{check_cache, run_dir, show_composition, CommandError, RunOptions};
use pretty_assertions::assert_eq;

fn write_story(dir: &Path) {
    fs::write(
        dir.join("camp.ftx"),
        "$camp\n[night]\nThe fire crackles, {hero}.\n``\nStars overhead.\n",
    )
    .unwrap_or_else(|e| panic!("{e}"));
    let main = Program::new(
        "main",
        vec![
            Stmt::declare("hero", VariableType::String, Some(Expr::string("Ada"))),
            Stmt::reference("camp", None),
            Stmt::ret(Expr::int32(0)),
        ],
    );
    let epilogue = Program::new("epilogue", vec![Stmt::ret(Expr::string("fin"))]);
    cache::store(&main, &cache::cache_path(&dir.join("main.fable"))).unwrap_or_else(|e| panic!("{e}"));
    cache::store(&epilogue, &cache::cache_path(&dir.join("epilogue.fable")))
        .unwrap_or_else(|e| panic!("{e}"));
}

#[test]
fn run_uses_main_by_default() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    write_story(dir.path());
    let console = buffer_console();
    let mut options = RunOptions::new(dir.path());
    options.console = Some(console.clone());

    let value = run_dir(&options).unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(value, Value::int32(0));
    assert_eq!(
        console.output(),
        "night\nThe fire crackles, Ada.\nStars overhead.\n"
    );
}

#[test]
fn run_with_explicit_entry() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    write_story(dir.path());
    let mut options = RunOptions::new(dir.path());
    options.console = Some(buffer_console());
    options.entry = "epilogue".to_string();

    let value = run_dir(&options).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(value, Value::string("fin"));
}

#[test]
fn run_reports_missing_entry() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    write_story(dir.path());
    let mut options = RunOptions::new(dir.path());
    options.console = Some(buffer_console());
    options.entry = "prologue".to_string();

    let Err(err) = run_dir(&options) else {
        panic!("unknown entry should fail");
    };
    assert!(matches!(err, CommandError::MissingEntry { .. }));
    assert!(err.to_string().starts_with("no program named prologue"));
}

#[test]
fn compose_outlines_paragraphs() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    write_story(dir.path());
    let outline = show_composition(&dir.path().join("camp.ftx")).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        outline,
        "$camp\n#0 [night]\n    The fire crackles, {hero}.\n#1\n    Stars overhead.\n"
    );
}

#[test]
fn check_cache_lists_every_cache() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    write_story(dir.path());
    let mut report = String::new();
    check_cache(dir.path(), &mut report).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(report.lines().count(), 2);
    assert!(report.lines().all(|line| line.starts_with("fresh")));

    fs::write(dir.path().join("junk.fable.fbc"), b"garbage").unwrap_or_else(|e| panic!("{e}"));
    let mut report = String::new();
    let Err(err) = check_cache(dir.path(), &mut report) else {
        panic!("a broken cache should fail the check");
    };
    assert!(matches!(err, CommandError::UnusableCaches(1)));
    assert_eq!(report.lines().count(), 3);
}
