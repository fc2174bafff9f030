//! Usage errors and stage-labelled failures.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_unsupported_decoder_is_usage_error() {
    let project = TestProject::new();
    project.write("t.tmpl", "t");

    project
        .tpl()
        .args(["-d", "xml", "t.tmpl"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn test_undefined_variable_suggests_close_key() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ usrename }}");

    project
        .tpl()
        .arg("t.tmpl")
        .write_stdin("username = \"x\"")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("render"))
        .stderr(predicate::str::contains("usrename"))
        .stderr(predicate::str::contains("did you mean: username"));
}

#[test]
fn test_bad_data_names_source() {
    let project = TestProject::new();
    project.write("t.tmpl", "t");
    project.write("broken.toml", "key = ");

    project
        .tpl()
        .args(["t.tmpl", "broken.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("decode all"))
        .stderr(predicate::str::contains("broken.toml"));

    project
        .tpl()
        .arg("t.tmpl")
        .write_stdin("key = ")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<stdin>"));
}

#[test]
fn test_missing_data_file() {
    let project = TestProject::new();
    project.write("t.tmpl", "t");

    project
        .tpl()
        .args(["t.tmpl", "absent.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn test_template_syntax_error_names_file() {
    let project = TestProject::new();
    project.write("bad.tmpl", "{% if %}");

    project
        .tpl()
        .arg("bad.tmpl")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("load templates"))
        .stderr(predicate::str::contains("bad.tmpl"));
}

#[test]
fn test_non_mapping_data_rejected() {
    let project = TestProject::new();
    project.write("t.tmpl", "t");

    project
        .tpl()
        .args(["-d", "json", "t.tmpl"])
        .write_stdin("[1, 2, 3]")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("top level must be a mapping"));
}
