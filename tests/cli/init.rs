use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, TODO};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .hushlintrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".hushlintrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["message"], TODO);
    assert_eq!(parsed["inline"], false);
    assert_eq!(parsed["useIgnoreFiles"], true);
    assert!(parsed["rules"].as_array().is_some_and(Vec::is_empty));
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".hushlintrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: .hushlintrc.json already exists
    ");
    assert_eq!(test.read_file(".hushlintrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_then_suppress_uses_written_config() -> Result<()> {
    let test = CliTest::with_file("index.js", "foo(a == b);\n")?;
    test.write_report(&[("index.js", 1, "eqeqeq")])?;

    test.command().arg("init").output()?;
    assert!(test.root().join(".hushlintrc.json").exists());

    assert_cmd_snapshot!(test.suppress_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Inserted 1 comment(s), updated 0 comment(s) in 1 file(s)

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("index.js")?,
        format!("// eslint-disable-next-line eqeqeq -- {TODO}\nfoo(a == b);\n")
    );
    Ok(())
}
