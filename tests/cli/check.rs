use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const PACKAGE: &str = "org.acme";

const LOGGER_INTERFACE: &str = r#"
package org.acme;

import org.jboss.logging.BasicLogger;
import org.jboss.logging.Logger;
import org.jboss.logging.annotations.LogMessage;
import org.jboss.logging.annotations.Message;
import org.jboss.logging.annotations.MessageLogger;

@MessageLogger(projectCode = "ACME")
public interface DefaultLogger extends BasicLogger {
    DefaultLogger LOGGER = Logger.getMessageLogger(DefaultLogger.class, "org.acme");

    @LogMessage(level = Logger.Level.INFO)
    @Message(id = 1, value = "Hello %s.")
    void hello(String name);

    @LogMessage
    @Message(id = 2, value = "Goodbye %s.")
    void goodbye(Object name);
}
"#;

const LOGGER_IMPLEMENTATION: &str = r#"
package org.acme;

import java.io.Serializable;
import java.util.Locale;
import javax.annotation.processing.Generated;
import org.jboss.logging.DelegatingBasicLogger;
import org.jboss.logging.Logger;

/**
 * Warning this class consists of generated code.
 */
@Generated(value = "org.jboss.logging.processor.generator.model.MessageLoggerImplementor")
public class DefaultLogger_$logger extends DelegatingBasicLogger implements DefaultLogger, Serializable {
    private static final long serialVersionUID = 1L;
    private static final String FQCN = DefaultLogger_$logger.class.getName();
    private static final Locale LOCALE = Locale.ROOT;

    public DefaultLogger_$logger(final Logger log) {
        super(log);
    }

    protected Locale getLoggingLocale() {
        return LOCALE;
    }

    @Override
    public final void hello(final String name) {
        super.log.logf(FQCN, Logger.Level.INFO, null, hello$str(), name);
    }

    protected String hello$str() {
        return "ACME000001: Hello %s.";
    }

    @Override
    public final void goodbye(final Object name) {
        super.log.logf(FQCN, Logger.Level.INFO, null, goodbye$str(), name);
    }

    protected String goodbye$str() {
        return "ACME000002: Goodbye %s.";
    }
}
"#;

const BUNDLE_INTERFACE: &str = r#"
package org.acme;

import org.jboss.logging.annotations.Message;
import org.jboss.logging.annotations.MessageBundle;

@MessageBundle(projectCode = "ACME")
public interface Messages {
    @Message(id = 100, value = "Invalid value %s")
    String invalidValue(String value);
}
"#;

const BUNDLE_IMPLEMENTATION: &str = r#"
package org.acme;

import java.io.Serializable;
import java.util.Locale;

public class Messages_$bundle implements Messages, Serializable {
    private static final long serialVersionUID = 1L;
    public static final Messages_$bundle INSTANCE = new Messages_$bundle();
    private static final Locale LOCALE = Locale.ROOT;

    protected Messages_$bundle() {}

    protected Object readResolve() {
        return INSTANCE;
    }

    protected Locale getLoggingLocale() {
        return LOCALE;
    }

    @Override
    public final String invalidValue(final String value) {
        return String.format(getLoggingLocale(), invalidValue$str(), value);
    }

    protected String invalidValue$str() {
        return "ACME000100: Invalid value %s";
    }
}
"#;

fn logger_translation(suffix: &str, constant: &str) -> String {
    format!(
        r#"
package org.acme;

import java.util.Locale;
import org.jboss.logging.Logger;

public class DefaultLogger_$logger_{suffix} extends DefaultLogger_$logger {{
    private static final long serialVersionUID = 1L;
    private static final Locale LOCALE = {constant};

    public DefaultLogger_$logger_{suffix}(final Logger log) {{
        super(log);
    }}

    @Override
    protected Locale getLoggingLocale() {{
        return LOCALE;
    }}

    @Override
    protected String hello$str() {{
        return "ACME000001: translated %s.";
    }}
}}
"#
    )
}

const CONFIG: &str = r#"{
  "targets": [
    { "interface": "org.acme.DefaultLogger", "kind": "logger", "translations": true, "rootLocale": "Locale.ROOT" },
    { "interface": "org.acme.Messages", "kind": "bundle" }
  ]
}"#;

/// A project whose generated sources all conform.
fn conforming_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_config(CONFIG)?;
    test.write_interface(PACKAGE, "DefaultLogger", LOGGER_INTERFACE)?;
    test.write_interface(PACKAGE, "Messages", BUNDLE_INTERFACE)?;
    test.write_generated(PACKAGE, "DefaultLogger_$logger", LOGGER_IMPLEMENTATION)?;
    test.write_generated(
        PACKAGE,
        "DefaultLogger_$logger_fr",
        &logger_translation("fr", "Locale.FRENCH"),
    )?;
    test.write_generated(
        PACKAGE,
        "DefaultLogger_$logger_en_US",
        &logger_translation("en_US", "Locale.US"),
    )?;
    test.write_generated(PACKAGE, "Messages_$bundle", BUNDLE_IMPLEMENTATION)?;
    Ok(test)
}

#[test]
fn test_conforming_project_passes() -> Result<()> {
    let test = conforming_project()?;

    let output = test.check_command().output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(out.contains("✓ org.acme.DefaultLogger  logger"));
    assert!(out.contains("✓ org.acme.DefaultLogger  translations"));
    assert!(out.contains("✓ org.acme.DefaultLogger  root-locale"));
    assert!(out.contains("✓ org.acme.Messages       bundle"));
    assert!(out.contains("Verified 4 checks - no issues found"));

    Ok(())
}

#[test]
fn test_positional_checks_filter() -> Result<()> {
    let test = conforming_project()?;

    let output = test.check_command().arg("bundle").output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("org.acme.Messages  bundle"));
    assert!(!out.contains("DefaultLogger"));
    assert!(out.contains("Verified 1 check - no issues found"));

    Ok(())
}

#[test]
fn test_missing_method_and_marker() -> Result<()> {
    let test = conforming_project()?;
    let broken = BUNDLE_IMPLEMENTATION
        .replace("    private static final long serialVersionUID = 1L;\n", "")
        .replace("public final String invalidValue(", "public final String otherValue(");
    test.write_generated(PACKAGE, "Messages_$bundle", &broken)?;

    let output = test.check_command().arg("bundle").output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains(
        "error: implementation is missing methods from interface Messages: [invalidValue]  method-completeness"
    ));
    assert!(out.contains("error: expected a serialVersionUID field  serialization-marker"));
    assert!(out.contains("Messages_$bundle.java"));
    assert!(out.contains("✘ org.acme.Messages  bundle  2 issues"));
    assert!(out.contains("2 problems in 1 of 1 check"));

    Ok(())
}

#[test]
fn test_translation_with_wrong_locale_constant() -> Result<()> {
    let test = conforming_project()?;
    test.write_generated(
        PACKAGE,
        "DefaultLogger_$logger_de",
        &logger_translation("de", "Locale.FRENCH"),
    )?;

    let output = test.check_command().arg("translations").output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("expected LOCALE to be set to Locale.GERMAN, found Locale.FRENCH"));
    assert!(out.contains("locale-constant-naming"));
    assert!(out.contains("= unit: DefaultLogger_$logger_de"));

    Ok(())
}

#[test]
fn test_unparsable_translation_does_not_hide_others() -> Result<()> {
    let test = conforming_project()?;
    test.write_generated(PACKAGE, "DefaultLogger_$logger_it", "public class DefaultLogger_$logger_it {")?;
    test.write_generated(
        PACKAGE,
        "DefaultLogger_$logger_ja",
        &logger_translation("ja", "Locale.JAPAN"),
    )?;

    let output = test.check_command().arg("translations").output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("parse-error"));
    assert!(out.contains("DefaultLogger_$logger_it.java:1"));
    assert!(out.contains("expected LOCALE to be set to Locale.JAPANESE, found Locale.JAPAN"));
    let err = stderr(&output);
    assert!(err.contains("warning: 1 file could not be located or parsed; its rules were not evaluated"));
    assert!(!err.contains("-v"));

    Ok(())
}

#[test]
fn test_root_locale_override() -> Result<()> {
    let test = conforming_project()?;
    test.write_config(
        r#"{ "targets": [ { "interface": "org.acme.DefaultLogger", "rootLocale": "Locale.forLanguageTag(\"en-UK\")" } ] }"#,
    )?;

    let output = test.check_command().arg("root-locale").output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains(
        r#"expected LOCALE to be set to Locale.forLanguageTag("en-UK"), found Locale.ROOT"#
    ));

    Ok(())
}

#[test]
fn test_missing_implementation() -> Result<()> {
    let test = conforming_project()?;
    test.write_interface(PACKAGE, "Unbuilt", "package org.acme;\npublic interface Unbuilt { void run(); }")?;

    let output = test
        .check_command()
        .args(["--interface", "org.acme.Unbuilt", "--kind", "bundle"])
        .output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("discovery-error"));
    assert!(out.contains("bundle implementation"));
    assert!(out.contains("= unit: org.acme.Unbuilt"));

    Ok(())
}

#[test]
fn test_interface_flag_replaces_targets() -> Result<()> {
    let test = conforming_project()?;

    let output = test
        .check_command()
        .args(["--interface", "org.acme.DefaultLogger"])
        .output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("org.acme.DefaultLogger  logger"));
    assert!(!out.contains("Messages"));
    assert!(out.contains("Verified 1 check"));

    Ok(())
}

#[test]
fn test_positional_bundle_sets_interface_kind() -> Result<()> {
    let test = conforming_project()?;
    test.write_generated(
        PACKAGE,
        "Messages_$bundle",
        &BUNDLE_IMPLEMENTATION.replace("protected Messages_$bundle() {}", "public Messages_$bundle() {}"),
    )?;

    let output = test
        .check_command()
        .args(["bundle", "--interface", "org.acme.Messages"])
        .output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(out.contains("✘ org.acme.Messages  bundle"));
    assert!(out.contains("bundle-shape"));

    Ok(())
}

#[test]
fn test_conflicting_kind_is_error() -> Result<()> {
    let test = conforming_project()?;

    let output = test
        .check_command()
        .args(["bundle", "--interface", "org.acme.Messages", "--kind", "logger"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--kind logger conflicts with the `bundle` check."));

    Ok(())
}

#[test]
fn test_selection_without_applicable_checks_is_error() -> Result<()> {
    let test = conforming_project()?;
    test.write_config(r#"{ "targets": [ { "interface": "org.acme.Messages", "kind": "bundle" } ] }"#)?;

    let output = test.check_command().arg("translations").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert_eq!(
        stderr(&output),
        "Error: None of the selected checks (translations) apply to the selected interfaces.\n"
    );

    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let test = conforming_project()?;
    test.write_generated(
        PACKAGE,
        "Messages_$bundle",
        &BUNDLE_IMPLEMENTATION.replace("protected Messages_$bundle() {}", "public Messages_$bundle() {}"),
    )?;

    let output = test.check_command().args(["--format", "json"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["passed"], false);
    let reports = value["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 4);

    let bundle = reports.iter().find(|r| r["check"] == "bundle").unwrap();
    assert_eq!(bundle["passed"], false);
    assert_eq!(bundle["issues"][0]["rule"], "bundle-shape");
    assert_eq!(bundle["issues"][0]["unit"], "Messages_$bundle");
    assert_eq!(
        bundle["issues"][0]["message"],
        "expected the constructor to be protected, found public"
    );

    Ok(())
}

#[test]
fn test_roots_from_flags() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("api/org/acme/DefaultLogger.java", LOGGER_INTERFACE)?;
    test.write_file("gen/org/acme/DefaultLogger_$logger.java", LOGGER_IMPLEMENTATION)?;

    let output = test
        .check_command()
        .args([
            "--interface-root",
            "api",
            "--generated-root",
            "gen",
            "--interface",
            "org.acme.DefaultLogger",
            "logger",
            "root-locale",
        ])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Verified 2 checks"));

    Ok(())
}

#[test]
fn test_missing_root_is_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_config(CONFIG)?;
    test.write_interface(PACKAGE, "DefaultLogger", LOGGER_INTERFACE)?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Generated root is not a directory"));

    Ok(())
}

#[test]
fn test_no_targets_is_error() -> Result<()> {
    let test = conforming_project()?;
    test.write_config("{}")?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No interfaces to verify"));

    Ok(())
}

#[test]
fn test_invalid_config_is_error() -> Result<()> {
    let test = conforming_project()?;
    test.write_config(r#"{ "localeConstants": [ { "suffix": "", "initializer": "Locale.US" } ] }"#)?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("localeConstants"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.check_command().arg("--help").output()?;
    let out = stdout(&output);
    assert!(output.status.success());
    assert!(out.contains("--interface-root"));
    assert!(out.contains("--generated-root"));
    assert!(out.contains("root-locale"));

    Ok(())
}
