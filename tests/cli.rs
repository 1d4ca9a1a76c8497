use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn write_inputs(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn manager() -> Command {
    Command::cargo_bin("wordlist-manager").unwrap()
}

#[test]
fn test_dedup_merges_inputs() {
    let dir = write_inputs(&[("a.txt", "x.txt\nx.txt\ny\n"), ("b.txt", "z.exe\n")]);
    let out = dir.path().join("out.txt");

    manager()
        .arg("-i")
        .arg(dir.path().join("a.txt"))
        .arg(dir.path().join("b.txt"))
        .arg("-rd")
        .arg("-o")
        .arg(&out)
        .arg("-q")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out).unwrap(), "x.txt\ny\nz.exe\n");
}

#[test]
fn test_missing_input_is_reported_not_fatal() {
    let dir = write_inputs(&[("good.txt", "admin\nadmin\nroot\n")]);

    manager()
        .arg("-i")
        .arg(dir.path().join("good.txt"))
        .arg(dir.path().join("nope.txt"))
        .arg("-sd")
        .assert()
        .success()
        .stderr(predicate::str::contains("does not exist"))
        .stdout(predicate::str::contains("admin (Count: 2)"))
        .stdout(predicate::str::contains("root").not());
}

#[test]
fn test_filter_without_output_warns() {
    let dir = write_inputs(&[("in.txt", "a\nb\n")]);

    manager()
        .arg("-i")
        .arg(dir.path().join("in.txt"))
        .arg("-rd")
        .assert()
        .success()
        .stdout(predicate::str::contains("Output file not specified"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_filters_compose_in_fixed_order() {
    let dir = write_inputs(&[(
        "in.txt",
        "index.php\nadmin\ncafé.html\nindex.php\nlogin.aspx\n\nimages\n",
    )]);
    let out = dir.path().join("out.txt");

    // flags given out of order still run as -rd, -rf, -rt
    manager()
        .arg("-rt")
        .arg("-rf")
        .arg("-i")
        .arg(dir.path().join("in.txt"))
        .arg("-rd")
        .arg("-o")
        .arg(&out)
        .arg("-q")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out).unwrap(), "index.php\nlogin.aspx\n");
}

#[test]
fn test_show_unique_prints_sorted_lines() {
    let dir = write_inputs(&[("in.txt", "b\n a \n\nb\nc\n")]);

    manager()
        .arg("-i")
        .arg(dir.path().join("in.txt"))
        .arg("--show-unique")
        .assert()
        .success()
        .stdout(predicate::str::contains("a\nb\nc\n"));
}

#[test]
fn test_input_is_required() {
    manager()
        .arg("-rd")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn test_prefix_strip() {
    let dir = write_inputs(&[("in.txt", "/api/v1/users\napi/health\n/api   login\nstatic/app.js\n")]);
    let out = dir.path().join("out.txt");

    Command::cargo_bin("prefix-strip")
        .unwrap()
        .arg(dir.path().join("in.txt"))
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed text has been saved to"))
        .stdout(predicate::str::contains("4 lines, 3 with a prefix removed"));

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "v1/users\nhealth\nlogin\nstatic/app.js\n"
    );
}

#[test]
fn test_prefix_strip_quiet() {
    let dir = write_inputs(&[("in.txt", "/api/a\n")]);
    let out = dir.path().join("out.txt");

    Command::cargo_bin("prefix-strip")
        .unwrap()
        .arg(dir.path().join("in.txt"))
        .arg(&out)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&out).unwrap(), "a\n");
}

#[test]
fn test_prefix_strip_missing_input_fails() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("prefix-strip")
        .unwrap()
        .arg(dir.path().join("missing.txt"))
        .arg(dir.path().join("out.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_slash_strip() {
    let dir = write_inputs(&[("in.txt", "///etc/passwd\nadmin/\n/\n")]);
    let out = dir.path().join("out.txt");

    Command::cargo_bin("slash-strip")
        .unwrap()
        .arg(dir.path().join("in.txt"))
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 lines, 2 with leading slashes removed"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "etc/passwd\nadmin/\n\n");
}
