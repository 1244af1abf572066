use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, TODO, stderr};

const EQEQEQ_SOURCE: &str = "export function foo(a, b) {
  return a == b;
}
";

#[test]
fn test_suppress_dry_run() -> Result<()> {
    let test = CliTest::with_file("src/app.js", EQEQEQ_SOURCE)?;
    test.write_report(&[("src/app.js", 2, "eqeqeq")])?;

    assert_cmd_snapshot!(test.suppress_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Would insert 1 comment(s), update 0 comment(s) in 1 file(s):
      - src/app.js: 1 new, 0 updated
    Run with --apply to write these comments.

    ----- stderr -----
    ");
    assert_eq!(test.read_file("src/app.js")?, EQEQEQ_SOURCE);
    Ok(())
}

#[test]
fn test_suppress_apply() -> Result<()> {
    let test = CliTest::with_file("src/app.js", EQEQEQ_SOURCE)?;
    test.write_report(&[("src/app.js", 2, "eqeqeq")])?;

    assert_cmd_snapshot!(test.suppress_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Inserted 1 comment(s), updated 0 comment(s) in 1 file(s)

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("src/app.js")?,
        format!(
            "export function foo(a, b) {{\n  // eslint-disable-next-line eqeqeq -- {TODO}\n  return a == b;\n}}\n"
        )
    );
    Ok(())
}

#[test]
fn test_suppress_second_run_changes_nothing() -> Result<()> {
    let test = CliTest::with_file("src/app.js", EQEQEQ_SOURCE)?;
    test.write_report(&[("src/app.js", 2, "eqeqeq")])?;
    test.suppress_command().arg("--apply").output()?;
    let once = test.read_file("src/app.js")?;

    // ESLint would now report the violation one line further down.
    test.write_report(&[("src/app.js", 3, "eqeqeq")])?;

    assert_cmd_snapshot!(test.suppress_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - nothing to suppress (1 already suppressed)

    ----- stderr -----
    ");
    assert_eq!(test.read_file("src/app.js")?, once);
    Ok(())
}

#[test]
fn test_suppress_markup_second_run_changes_nothing() -> Result<()> {
    let source = "export function App({ a, b }) {
  return (
    <div>
      <span>{a == b}</span>
    </div>
  );
}
";
    let test = CliTest::with_file("src/App.jsx", source)?;
    test.write_report(&[("src/App.jsx", 4, "eqeqeq")])?;
    test.suppress_command().arg("--apply").output()?;
    let once = test.read_file("src/App.jsx")?;

    // The same report again: line 4 now holds the inserted comment.
    assert_cmd_snapshot!(test.suppress_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - nothing to suppress (1 already suppressed)

    ----- stderr -----
    ");
    assert_eq!(test.read_file("src/App.jsx")?, once);
    Ok(())
}

#[test]
fn test_suppress_rule_filter_and_message() -> Result<()> {
    let test = CliTest::with_file("index.js", "foo(a == b);\n")?;
    test.write_report(&[("index.js", 1, "eqeqeq"), ("index.js", 1, "no-undef")])?;

    assert_cmd_snapshot!(
        test.suppress_command()
            .args(["--apply", "--rules", "no-undef", "--message", "legacy code"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Inserted 1 comment(s), updated 0 comment(s) in 1 file(s)

    ----- stderr -----
    "
    );
    assert_eq!(
        test.read_file("index.js")?,
        "// eslint-disable-next-line no-undef -- legacy code\nfoo(a == b);\n"
    );
    Ok(())
}

#[test]
fn test_suppress_inline_from_config() -> Result<()> {
    let test = CliTest::with_file("src/app.js", EQEQEQ_SOURCE)?;
    test.write_file(".hushlintrc.json", r#"{ "inline": true }"#)?;
    test.write_report(&[("src/app.js", 2, "eqeqeq")])?;

    assert_cmd_snapshot!(test.suppress_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Inserted 1 comment(s), updated 0 comment(s) in 1 file(s)

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("src/app.js")?,
        format!(
            "export function foo(a, b) {{\n  return a == b; // eslint-disable-line eqeqeq -- {TODO}\n}}\n"
        )
    );
    Ok(())
}

#[test]
fn test_suppress_markup() -> Result<()> {
    let source = "export function App({ a, b }) {
  return (
    <div>
      <span>{a == b}</span>
    </div>
  );
}
";
    let test = CliTest::with_file("src/App.jsx", source)?;
    test.write_report(&[("src/App.jsx", 4, "eqeqeq")])?;

    assert_cmd_snapshot!(test.suppress_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Would insert 1 comment(s), update 0 comment(s) in 1 file(s):
      - src/App.jsx: 1 new, 0 updated
    Run with --apply to write these comments.

    ----- stderr -----
    ");

    test.suppress_command().arg("--apply").output()?;
    assert_eq!(
        test.read_file("src/App.jsx")?,
        format!(
            "export function App({{ a, b }}) {{
  return (
    <div>
      {{/* eslint-disable-next-line eqeqeq -- {TODO} */}}
      <span>{{a == b}}</span>
    </div>
  );
}}
"
        )
    );
    Ok(())
}

#[test]
fn test_suppress_only_selected_paths() -> Result<()> {
    let test = CliTest::with_file("src/app.js", EQEQEQ_SOURCE)?;
    test.write_file("scripts/build.js", EQEQEQ_SOURCE)?;
    test.write_report(&[("src/app.js", 2, "eqeqeq"), ("scripts/build.js", 2, "eqeqeq")])?;

    assert_cmd_snapshot!(test.suppress_command().arg("src"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Would insert 1 comment(s), update 0 comment(s) in 1 file(s):
      - src/app.js: 1 new, 0 updated
    Run with --apply to write these comments.

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_suppress_respects_eslintignore() -> Result<()> {
    let test = CliTest::with_file("src/app.js", EQEQEQ_SOURCE)?;
    test.write_file("dist/bundle.js", EQEQEQ_SOURCE)?;
    test.write_file("build/app.js", EQEQEQ_SOURCE)?;
    test.write_file("build/nested/app.js", EQEQEQ_SOURCE)?;
    test.write_file(".eslintignore", "dist/\n/build/*.js\n")?;
    test.write_report(&[
        ("src/app.js", 2, "eqeqeq"),
        ("dist/bundle.js", 2, "eqeqeq"),
        ("build/app.js", 2, "eqeqeq"),
        ("build/nested/app.js", 2, "eqeqeq"),
    ])?;

    assert_cmd_snapshot!(test.suppress_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Would insert 2 comment(s), update 0 comment(s) in 2 file(s):
      - build/nested/app.js: 1 new, 0 updated
      - src/app.js: 1 new, 0 updated
    Run with --apply to write these comments.

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_suppress_warns_about_unplaceable_diagnostic() -> Result<()> {
    let test = CliTest::with_file("index.js", "foo(\n  a\n);\n")?;
    test.write_report(&[("index.js", 3, "no-undef")])?;

    assert_cmd_snapshot!(test.suppress_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: could not suppress "no-undef"  no syntax node starts on this line
      --> index.js:3
      |
    3 | );
      | ^^

    ✘ 1 diagnostic(s) left unsuppressed
    ✓ Checked 1 source file - nothing to suppress

    ----- stderr -----
    "#);
    Ok(())
}

#[test]
fn test_suppress_parse_error() -> Result<()> {
    let test = CliTest::with_file("bad.js", "const = ;\n")?;
    test.write_report(&[("bad.js", 1, "no-undef")])?;

    assert_cmd_snapshot!(test.suppress_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----
    ✓ Checked 1 source file - nothing to suppress

    ----- stderr -----
    warning: 1 file(s) could not be parsed (use -v for details)
    ");

    let verbose = test.suppress_command().arg("-v").output()?;
    assert!(stderr(&verbose).contains("error: bad.js: Failed to parse"));
    Ok(())
}

#[test]
fn test_suppress_rejects_message_that_closes_comment() -> Result<()> {
    let test = CliTest::with_file("index.js", "foo(a == b);\n")?;
    test.write_report(&[("index.js", 1, "eqeqeq")])?;

    assert_cmd_snapshot!(test.suppress_command().args(["--message", "done */ here"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid 'message': must not contain "*/"
    "#);
    assert_eq!(test.read_file("index.js")?, "foo(a == b);\n");
    Ok(())
}

#[test]
fn test_suppress_missing_report() -> Result<()> {
    let test = CliTest::with_file("index.js", "foo();\n")?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.suppress_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to read ESLint report [TEMP]/eslint.json: No such file or directory (os error 2)
        ");
    });
    Ok(())
}
