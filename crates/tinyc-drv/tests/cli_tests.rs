//! End-to-end CLI tests for the `tinyc` binary: spawn the real binary with
//! `assert_cmd`, assert on stdout/stderr with `predicates`, and use a
//! `tempfile` scratch directory for on-disk fixtures. These exercise the
//! driver's actual contract: textual IR on stdout, a one-line diagnostic on
//! stderr, a non-zero exit code on the first error.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write as _;

fn tinyc() -> Command {
    Command::cargo_bin("tinyc").expect("the tinyc binary should build")
}

#[test]
fn help_flag_prints_usage() {
    tinyc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tinyc"));
}

#[test]
fn compiles_a_minimal_program_from_stdin() {
    tinyc()
        .write_stdin("void main(){ int x=5; printi(x); }")
        .assert()
        .success()
        .stdout(predicate::str::contains("define void @main"))
        .stdout(predicate::str::contains("declare i32 @printf"));
}

#[test]
fn reads_source_from_an_input_file() {
    let dir = tempfile::tempdir().expect("failed to create a scratch directory");
    let path = dir.path().join("hello.tiny");
    let mut file = std::fs::File::create(&path).expect("failed to create fixture file");
    writeln!(file, "void main(){{ print(\"hi\"); }}").expect("failed to write fixture file");

    tinyc()
        .arg("--input")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("@str0"))
        .stdout(predicate::str::contains("@.str_specifier"));
}

#[test]
fn missing_input_file_reports_an_environmental_error_and_exits_nonzero() {
    tinyc()
        .arg("--input")
        .arg("/does/not/exist.tiny")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read source file"));
}

#[test]
fn missing_main_exits_nonzero_with_the_main_missing_diagnostic() {
    tinyc()
        .write_stdin("int f(){ return 1; }")
        .assert()
        .failure()
        .stderr(predicate::str::contains("void main()"));
}

#[test]
fn break_outside_a_loop_reports_unexpected_break_and_nothing_else() {
    tinyc()
        .write_stdin("void main(){ break; }")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'break'"));
}

#[test]
fn printi_called_with_a_bool_reports_prototype_mismatch() {
    tinyc()
        .write_stdin("void main(){ bool t = true; printi(t); }")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("prototype mismatch calling 'printi'"));
}

#[test]
fn var_decl_initialised_from_a_bare_function_name_reports_def_as_func() {
    tinyc()
        .write_stdin("void main(){ int x = main; }")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'main' is already defined as a function"));
}

#[test]
fn assign_from_a_bare_function_name_reports_def_as_func() {
    tinyc()
        .write_stdin("int f(){ return 1; } void main(){ int x = 0; x = f; }")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'f' is already defined as a function"));
}

#[test]
fn emit_tokens_flag_dumps_the_token_stream_to_stderr() {
    tinyc()
        .arg("--emit-tokens")
        .write_stdin("void main(){ }")
        .assert()
        .success()
        .stderr(predicate::str::contains("-- tokens --"));
}

#[test]
fn emit_ast_flag_dumps_the_parsed_tree_to_stderr() {
    tinyc()
        .arg("--emit-ast")
        .write_stdin("void main(){ }")
        .assert()
        .success()
        .stderr(predicate::str::contains("-- ast --"))
        .stderr(predicate::str::contains("FuncDecl"));
}
