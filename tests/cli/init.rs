use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["interfaceRoot"], "./src/main/java");
    assert_eq!(parsed["generatedRoot"], "./target/generated-sources/annotations");
    assert_eq!(parsed["extension"], "java");
    assert_eq!(parsed["rootLocale"], "Locale.ROOT");
    assert_eq!(parsed["localeConstants"].as_array().map(Vec::len), Some(18));
    assert_eq!(parsed["localeConstants"][0]["suffix"], "en_CA");
    assert_eq!(parsed["localeConstants"][0]["initializer"], "Locale.CANADA");
    assert!(parsed["targets"].as_array().is_some_and(Vec::is_empty));

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "✓ Created .bundlecheckrc.json\n");

    assert!(test.root().join(".bundlecheckrc.json").exists());
    let content = test.read_file(".bundlecheckrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_config("{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Error: .bundlecheckrc.json already exists\n");
    assert_eq!(test.read_file(".bundlecheckrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    test.write_file(
        "src/main/java/org/acme/Messages.java",
        "package org.acme;\npublic interface Messages { String hello(); }",
    )?;
    test.write_file(
        "target/generated-sources/annotations/org/acme/Messages_$bundle.java",
        r#"
package org.acme;

import java.util.Locale;

public class Messages_$bundle implements Messages, java.io.Serializable {
    private static final long serialVersionUID = 1L;
    public static final Messages_$bundle INSTANCE = new Messages_$bundle();

    protected Messages_$bundle() {}

    protected Locale getLoggingLocale() {
        return null;
    }

    @Override
    public final String hello() {
        return "Hello";
    }
}
"#,
    )?;

    let output = test
        .check_command()
        .args(["--interface", "org.acme.Messages", "--kind", "bundle"])
        .output()?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("Verified 1 check - no issues found"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage: bundlecheck"));

    Ok(())
}
