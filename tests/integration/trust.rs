//! Privileged template functions and the `--trusted` gate.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_from_file_requires_trusted() {
    let project = TestProject::new();
    project.write("t.tmpl", "before {{ from_file(path=\"secret.txt\") }} after");
    project.write("secret.txt", "secret");

    project
        .tpl()
        .arg("t.tmpl")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("fatal"))
        .stderr(predicate::str::contains("from_file called, but '--trusted' mode not enabled"));

    project
        .tpl()
        .args(["--trusted", "t.tmpl"])
        .assert()
        .success()
        .stdout("before secret after\n");
}

#[test]
fn test_from_file_relative_to_last_data_file() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ from_file(path=\"note.txt\") }}");
    project.write("note.txt", "from cwd");
    project.write("conf/values.toml", "");
    project.write("conf/note.txt", "from data dir");

    project
        .tpl()
        .args(["--trusted", "t.tmpl", "conf/values.toml"])
        .assert()
        .success()
        .stdout("from data dir\n");

    project
        .tpl()
        .args(["--trusted", "t.tmpl"])
        .assert()
        .success()
        .stdout("from cwd\n");
}

#[test]
fn test_from_file_missing_is_render_error() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ from_file(path=\"absent.txt\") }}");

    project
        .tpl()
        .args(["--trusted", "t.tmpl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("render"))
        .stderr(predicate::str::contains("absent.txt"));
}

#[test]
fn test_shell_requires_trusted() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ shell(cmd=\"echo\", args=[\"hi\"]) }}");

    project
        .tpl()
        .arg("t.tmpl")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("shell called, but '--trusted' mode not enabled"));
}

#[cfg(unix)]
#[test]
fn test_shell_output_is_rendered() {
    let project = TestProject::new();
    project.write("t.tmpl", "[{{ shell(cmd=\"echo\", args=[\"hi\", \"there\"]) | trim }}]");

    project
        .tpl()
        .args(["--trusted", "t.tmpl"])
        .assert()
        .success()
        .stdout("[hi there]\n");
}

#[cfg(unix)]
#[test]
fn test_shell_failure_exits_with_child_code() {
    let project = TestProject::new();
    project.write(
        "t.tmpl",
        "{{ shell(cmd=\"sh\", args=[\"-c\", \"echo broken >&2; exit 7\"]) }}",
    );

    project
        .tpl()
        .args(["--trusted", "t.tmpl"])
        .assert()
        .code(7)
        .stdout("")
        .stderr(predicate::str::contains("exited with code: 7"))
        .stderr(predicate::str::contains("stderr: broken"));
}

#[cfg(unix)]
#[test]
fn test_shell_missing_program_is_fatal() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ shell(cmd=\"tpl-no-such-program\") }}");

    project
        .tpl()
        .args(["--trusted", "t.tmpl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fatal"))
        .stderr(predicate::str::contains("tpl-no-such-program"));
}

#[cfg(unix)]
#[test]
fn test_shell_timeout_from_environment() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ shell(cmd=\"sleep\", args=[\"5\"]) }}");

    project
        .tpl()
        .args(["--trusted", "t.tmpl"])
        .env("TPL_SHELL_TIMEOUT", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("was killed"));
}

#[cfg(unix)]
#[test]
fn test_untrusted_shell_leaves_output_file_alone() {
    let project = TestProject::new();
    project.write("t.tmpl", "{{ shell(cmd=\"echo\") }}");
    project.write("out.txt", "previous");

    project.tpl().args(["-o", "out.txt", "t.tmpl"]).assert().code(1);
    assert_eq!(project.read("out.txt").as_deref(), Some("previous"));
}
