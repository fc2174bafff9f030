//! Template load order and entry point selection.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_first_template_file_is_entry_point() {
    let project = TestProject::new();
    project.write("zz_main.tmpl", "main[{% include \"aa_part.tmpl\" %}]");
    project.write("aa_part.tmpl", "part");

    project
        .tpl()
        .args(["zz_main.tmpl", "aa_part.tmpl"])
        .assert()
        .success()
        .stdout("main[part]\n");

    project
        .tpl()
        .args(["aa_part.tmpl", "zz_main.tmpl"])
        .assert()
        .success()
        .stdout("part\n");
}

#[test]
fn test_template_in_subdirectory_selected_by_base_name() {
    let project = TestProject::new();
    project.write("templates/deep/page.tmpl", "page {{ n }}");

    project
        .tpl()
        .arg("templates/deep/page.tmpl")
        .write_stdin("n = 1")
        .assert()
        .success()
        .stdout("page 1\n");
}

#[test]
fn test_globs_only_require_name() {
    let project = TestProject::new();
    project.write("parts/b.tmpl", "b");
    project.write("parts/a.tmpl", "a");

    project
        .tpl()
        .args(["-g", "parts/*.tmpl"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("select template"))
        .stderr(predicate::str::contains("--name flag is required"))
        .stderr(predicate::str::contains("0: 'a.tmpl'"))
        .stderr(predicate::str::contains("1: 'b.tmpl'"));

    project
        .tpl()
        .args(["-g", "parts/*.tmpl", "--name", "b.tmpl"])
        .assert()
        .success()
        .stdout("b\n");
}

#[test]
fn test_unknown_name_suggests_loaded_templates() {
    let project = TestProject::new();
    project.write("report.tmpl", "r");

    project
        .tpl()
        .args(["-n", "reprot.tmpl", "report.tmpl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("render"))
        .stderr(predicate::str::contains("report.tmpl"));
}

#[test]
fn test_glob_between_files_loads_in_place() {
    let project = TestProject::new();
    project.write("layouts/base.tmpl", "<{% block body %}{% endblock %}>");
    project.write("page.tmpl", "{% extends \"base.tmpl\" %}{% block body %}page{% endblock %}");
    project.write("intro.tmpl", "intro");

    // The parent comes from a glob written before the child.
    project
        .tpl()
        .args(["intro.tmpl", "-g", "layouts/*.tmpl", "page.tmpl", "-n", "page.tmpl"])
        .assert()
        .success()
        .stdout("<page>\n");

    // Written after the child, the parent is not loaded yet when the child is added.
    project
        .tpl()
        .args(["intro.tmpl", "page.tmpl", "-g", "layouts/*.tmpl", "-n", "page.tmpl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("load templates"))
        .stderr(predicate::str::contains("page.tmpl"));
}

#[test]
fn test_later_file_with_same_name_replaces_body() {
    let project = TestProject::new();
    project.write("one/same.tmpl", "first");
    project.write("two/same.tmpl", "second");

    project
        .tpl()
        .args(["one/same.tmpl", "two/same.tmpl"])
        .assert()
        .success()
        .stdout("second\n");
}

#[test]
fn test_glob_without_matches_fails() {
    let project = TestProject::new();
    project.write("t.tmpl", "t");

    project
        .tpl()
        .args(["-g", "missing/*.tmpl", "t.tmpl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("load templates"))
        .stderr(predicate::str::contains("missing/*.tmpl"));
}

#[test]
fn test_nothing_to_render() {
    let project = TestProject::new();
    project.write("data.toml", "a = 1\n");

    project
        .tpl()
        .arg("data.toml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no templates found"));
}
