//! Output files, preamble preservation and all-or-nothing writes.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_output_file_written() {
    let project = TestProject::new();
    project.write("hello.tmpl", "Hello {{ name }}");

    project
        .tpl()
        .args(["-o", "out/hello.txt", "hello.tmpl"])
        .write_stdin("name = \"World\"")
        .assert()
        .success()
        .stdout("");

    assert_eq!(project.read("out/hello.txt").as_deref(), Some("Hello World\n"));
}

#[test]
fn test_preserve_preamble() {
    let project = TestProject::new();
    project.write("conf.tmpl", "port = {{ port }}");
    project.write("app.conf", "# Managed by tpl.\n# Edit conf.tmpl instead.\nport = 1\n");

    project
        .tpl()
        .args(["-p", "-o", "app.conf", "conf.tmpl"])
        .write_stdin("port = 8080")
        .assert()
        .success();

    assert_eq!(
        project.read("app.conf").as_deref(),
        Some("# Managed by tpl.\n# Edit conf.tmpl instead.\nport = 8080\n")
    );
}

#[test]
fn test_preserve_preamble_new_file() {
    let project = TestProject::new();
    project.write("conf.tmpl", "x");

    project.tpl().args(["--preserve-preamble", "-o", "fresh.conf", "conf.tmpl"]).assert().success();
    assert_eq!(project.read("fresh.conf").as_deref(), Some("x\n"));
}

#[test]
fn test_preserve_preamble_requires_output_file() {
    let project = TestProject::new();
    // Neither the template nor the data would load; the flag check comes first.
    project
        .tpl()
        .args(["-p", "missing.tmpl"])
        .write_stdin("not = = toml")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("--preserve-preamble specified but output is stdout"))
        .stderr(predicate::str::contains("decode").not())
        .stderr(predicate::str::contains("load templates").not());
}

#[test]
fn test_failed_render_keeps_previous_file() {
    let project = TestProject::new();
    project.write("t.tmpl", "start {{ undefined_value }} end");
    project.write("out.txt", "previous contents\n");

    project.tpl().args(["-o", "out.txt", "t.tmpl"]).assert().code(1);
    assert_eq!(project.read("out.txt").as_deref(), Some("previous contents\n"));
}

#[test]
fn test_failed_render_creates_no_file() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ undefined_value }}");

    project.tpl().args(["-o", "never.txt", "t.tmpl"]).assert().code(1);
    assert!(project.read("never.txt").is_none());
}

#[test]
fn test_failed_render_prints_nothing_to_stdout() {
    let project = TestProject::new();
    project.write("t.tmpl", "a lot of text before {{ undefined_value }}");

    project
        .tpl()
        .arg("t.tmpl")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("undefined_value"));
}
