//! Rendering with merged data from files and standard input.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_hello_world() {
    let project = TestProject::new();
    project.write("hello.tmpl", "Hello {{ name }}");
    project.write("data.toml", "name = \"World\"\n");

    project.tpl().args(["hello.tmpl", "data.toml"]).assert().success().stdout("Hello World\n");
}

#[test]
fn test_no_newline() {
    let project = TestProject::new();
    project.write("hello.tmpl", "Hello {{ name }}");
    project.write("data.toml", "name = \"World\"\n");

    project
        .tpl()
        .args(["--no-newline", "hello.tmpl", "data.toml"])
        .assert()
        .success()
        .stdout("Hello World");
}

#[test]
fn test_stdin_merges_over_files() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ a.x }},{{ a.y }},{{ a.who }}");
    project.write("defaults.toml", "[a]\nx = 1\nwho = \"file\"\n");

    project
        .tpl()
        .args(["t.tmpl", "defaults.toml"])
        .write_stdin("[a]\ny = 2\nwho = \"stdin\"\n")
        .assert()
        .success()
        .stdout("1,2,stdin\n");
}

// Intentional: a later scalar replaces an earlier mapping without an error.
#[test]
fn test_scalar_overwrites_mapping() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ a }}");
    project.write("first.toml", "[a]\nx = 1\n");
    project.write("second.toml", "a = 5\n");

    project
        .tpl()
        .args(["t.tmpl", "first.toml", "second.toml"])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_json_decoder_and_extension() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ items | join(sep=\"+\") }}");
    project.write("data.json", r#"{"items": ["a", "b"]}"#);

    project
        .tpl()
        .args(["-d", "json", "t.tmpl", "data.json"])
        .assert()
        .success()
        .stdout("a+b\n");
}

#[test]
fn test_yaml_multi_document_stdin() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ a }}-{{ b }}");

    project
        .tpl()
        .args(["--decoder", "yaml", "t.tmpl"])
        .write_stdin("a: 1\nb: 1\n---\nb: 2\n")
        .assert()
        .success()
        .stdout("1-2\n");
}

#[test]
fn test_extension_match_is_case_insensitive() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ v }}");
    project.write("DATA.TOML", "v = \"upper\"\n");

    project.tpl().args(["t.tmpl", "DATA.TOML"]).assert().success().stdout("upper\n");
}

#[test]
fn test_no_data_renders_with_empty_context() {
    let project = TestProject::new();
    project.write("static.tmpl", "{% for i in range(end=3) %}{{ i }}{% endfor %}");

    project.tpl().arg("static.tmpl").assert().success().stdout("012\n");
}

#[test]
fn test_table_and_yaml_helpers() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ hosts | table }}");
    project.write(
        "hosts.toml",
        "[[hosts]]\nname = \"web\"\naddr = \"10.0.0.1\"\n[[hosts]]\nname = \"db\"\naddr = \"10.0.0.2\"\n",
    );

    project
        .tpl()
        .args(["t.tmpl", "hosts.toml"])
        .assert()
        .success()
        .stdout("ADDR\t\tNAME\n10.0.0.1\tweb\n10.0.0.2\tdb\n");
}

#[test]
fn test_version() {
    let project = TestProject::new();
    project
        .tpl()
        .arg("--version")
        .assert()
        .success()
        .stdout(format!("tpl {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let project = TestProject::new();
    project.write("hello.tmpl", "Hello {{ name }}");

    project
        .tpl()
        .args(["--verbose", "hello.tmpl"])
        .write_stdin("name = \"World\"")
        .assert()
        .success()
        .stdout("Hello World\n")
        .stderr(predicate::str::contains("rendering"));
}
