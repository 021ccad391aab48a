//! CLI integration tests for `scripts` and `flow`.
//!
//! These tests verify the command-line interface behavior using assert_cmd.
//! stdin is never a terminal here, so any path that reaches the selector
//! fails fast instead of waiting for input.

use predicates::prelude::*;

use crate::integration::fixtures::{
    create_config, create_scripts_dir, described_scripts, flow, scripts, standard_scripts,
    write_file, write_script, FLOW_COMMANDS, PRINT_ARGS,
};

// ==================== Help and Version ====================

#[test]
fn test_scripts_help_output() {
    scripts()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scripts directory"))
        .stdout(predicate::str::contains("Usage: scripts"))
        .stdout(predicate::str::contains("--list"))
        .stdout(predicate::str::contains("--select-1"))
        .stdout(predicate::str::contains("--dir"));
}

#[test]
fn test_flow_help_output() {
    flow()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: flow"))
        .stdout(predicate::str::contains("--list"))
        .stdout(predicate::str::contains("--dir").not());
}

#[test]
fn test_version_output() {
    scripts()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

#[test]
fn test_unknown_flag_is_search_text() {
    let dir = create_scripts_dir(&standard_scripts());

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .args(["--bogus", "--list"])
        .assert()
        .success()
        .stdout("clean\ndeploy\nupdate\n");

    // Without --list it narrows the selector, which needs a terminal
    scripts()
        .arg("--dir")
        .arg(dir.path())
        .arg("--bogus")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("needs a terminal"));
}

#[test]
fn test_trailing_option_without_value_is_usage_error() {
    let dir = create_scripts_dir(&standard_scripts());

    scripts()
        .args(["--dir"])
        .arg(dir.path())
        .args(["deploy", "--config"])
        .assert()
        .code(2);
}

// ==================== List Mode ====================

#[test]
fn test_list_scan_sorted_by_name() {
    let dir = create_scripts_dir(&standard_scripts());

    scripts()
        .arg("--list")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("clean\ndeploy\nupdate\n");
}

#[test]
fn test_list_flow_keeps_declaration_order() {
    let (_config_dir, config) = create_config(FLOW_COMMANDS);

    flow()
        .arg("--list")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("hello  Say hello to someone.\nupdate\ndeploy\nclean\n");
}

#[test]
fn test_list_flow_without_config() {
    flow()
        .args(["-l", "--no-config"])
        .assert()
        .success()
        .stdout("hello  Say hello to someone.\n");
}

#[test]
fn test_list_shows_summaries() {
    let dir = create_scripts_dir(&described_scripts());

    scripts()
        .arg("-l")
        .arg("-d")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("update  Pull the latest changes\n"))
        .stdout(predicate::str::contains("deploy  Ship the site to production\n"))
        .stdout(predicate::str::contains("clean\n"));
}

#[test]
fn test_list_ignores_query_and_args() {
    let dir = create_scripts_dir(&standard_scripts());

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .args(["deploy", "--list", "--", "--force"])
        .assert()
        .success()
        .stdout("clean\ndeploy\nupdate\n");
}

#[test]
fn test_list_empty_directory() {
    let dir = tempfile::TempDir::new().unwrap();

    scripts()
        .arg("--list")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_list_with_exclude() {
    let dir = create_scripts_dir(&standard_scripts());

    scripts()
        .arg("--list")
        .arg("--dir")
        .arg(dir.path())
        .args(["--exclude", "de*", "-e", "clean"])
        .assert()
        .success()
        .stdout("update\n");
}

#[test]
fn test_list_json() {
    let dir = create_scripts_dir(&described_scripts());

    let output = scripts()
        .args(["--list", "--json", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["name"], "clean");
    assert_eq!(entries[1]["name"], "deploy");
    assert_eq!(entries[1]["summary"], "Ship the site to production");
}

#[test]
fn test_json_requires_list() {
    scripts().args(["--json", "--no-config"]).assert().code(2);
}

#[test]
fn test_hidden_and_plain_files_not_listed() {
    let dir = create_scripts_dir(&standard_scripts());
    write_script(dir.path(), ".secret", "#!/bin/sh\nexit 0\n");
    write_script(dir.path(), "_helper", "#!/bin/sh\nexit 0\n");
    write_file(dir.path(), "README.md", "# notes\n");
    std::fs::create_dir(dir.path().join("lib")).unwrap();

    scripts()
        .arg("--list")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("clean\ndeploy\nupdate\n");
}

// ==================== Source Errors ====================

#[test]
fn test_missing_directory_exits_66() {
    let dir = tempfile::TempDir::new().unwrap();

    scripts()
        .arg("--list")
        .arg("--dir")
        .arg(dir.path().join("missing"))
        .assert()
        .code(66)
        .stdout("")
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn test_file_as_directory_exits_66() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = write_file(dir.path(), "not-a-dir", "");

    scripts()
        .arg("--dir")
        .arg(&file)
        .arg("deploy")
        .assert()
        .code(66)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_finds_scripts_dir_from_working_directory() {
    let project = tempfile::TempDir::new().unwrap();
    let scripts_dir = project.path().join("scripts");
    std::fs::create_dir(&scripts_dir).unwrap();
    write_script(&scripts_dir, "update", "#!/bin/sh\nexit 0\n");
    let nested = project.path().join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();

    scripts()
        .arg("--list")
        .current_dir(&nested)
        .assert()
        .success()
        .stdout("update\n");
}

// ==================== Running Commands ====================

#[cfg(unix)]
#[test]
fn test_run_by_name_forwards_args_verbatim() {
    let dir = create_scripts_dir(&[("show", PRINT_ARGS)]);

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .args(["show", "--", "--flag", "two words", "", "--", "*"])
        .assert()
        .success()
        .stdout("--flag\ntwo words\n\n--\n*\n");
}

#[cfg(unix)]
#[test]
fn test_run_by_name_with_leftover_operands() {
    let dir = create_scripts_dir(&[("show", PRINT_ARGS)]);

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .args(["show", "a", "b", "--", "c"])
        .assert()
        .success()
        .stdout("a\nb\nc\n");
}

#[cfg(unix)]
#[test]
fn test_exit_code_propagates() {
    let dir = create_scripts_dir(&[("fail", "exit 7")]);

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .arg("fail")
        .assert()
        .code(7);
}

#[cfg(unix)]
#[test]
fn test_killed_by_signal_exits_128_plus_signal() {
    let dir = create_scripts_dir(&[("die", "kill -TERM $$")]);

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .arg("die")
        .assert()
        .code(143);
}

#[cfg(unix)]
#[test]
fn test_bad_interpreter_exits_126() {
    let dir = tempfile::TempDir::new().unwrap();
    write_script(dir.path(), "broken", "#!/nonexistent/interpreter\nexit 0\n");

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .arg("broken")
        .assert()
        .code(126)
        .stderr(predicate::str::contains("Failed to launch"));
}

#[cfg(unix)]
#[test]
fn test_dry_run_does_not_execute() {
    let dir = create_scripts_dir(&[("touchy", "touch \"$0.ran\"")]);

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .args(["--dry-run", "touchy", "--", "two words"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Would run: "))
        .stdout(predicate::str::contains("touchy 'two words'"));

    assert!(!dir.path().join("touchy.ran").exists());
}

#[cfg(unix)]
#[test]
fn test_select_one_runs_unique_match() {
    let dir = create_scripts_dir(&[("deploy", "echo deployed"), ("update", "echo updated")]);

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .args(["-1", "dpl"])
        .assert()
        .success()
        .stdout("deployed\n");
}

#[cfg(unix)]
#[test]
fn test_interpreter_runs_plain_file() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "greet.sh", "echo \"greet $1\"\n");
    let (_config_dir, config) = create_config("[scripts.interpreters]\nsh = \"/bin/sh\"\n");

    scripts()
        .arg("--config")
        .arg(&config)
        .arg("--dir")
        .arg(dir.path())
        .args(["greet", "--", "you"])
        .assert()
        .success()
        .stdout("greet you\n");
}

// ==================== Selection Without a Terminal ====================

#[test]
fn test_no_query_without_terminal_fails() {
    let dir = create_scripts_dir(&standard_scripts());

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("needs a terminal"));
}

#[test]
fn test_unknown_name_without_terminal_fails() {
    let dir = create_scripts_dir(&standard_scripts());

    for backend in ["builtin", "fzf", "auto"] {
        scripts()
            .arg("--dir")
            .arg(dir.path())
            .args(["--backend", backend, "--no-select-1", "dep"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("needs a terminal"));
    }
}

#[cfg(unix)]
#[test]
fn test_unique_match_runs_by_default() {
    let dir = create_scripts_dir(&[("deploy", "echo deployed"), ("update", "echo updated")]);

    scripts()
        .arg("--no-config")
        .arg("--dir")
        .arg(dir.path())
        .arg("dpl")
        .assert()
        .success()
        .stdout("deployed\n");
}

#[test]
fn test_select_one_off_in_config_opens_selector() {
    let dir = create_scripts_dir(&standard_scripts());
    let (_config_dir, config) = create_config("[selector]\nselect_one = false\n");

    scripts()
        .arg("--config")
        .arg(&config)
        .arg("--dir")
        .arg(dir.path())
        .args(["--backend", "builtin", "dpl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("needs a terminal"));
}

#[test]
fn test_ambiguous_select_one_falls_back_to_selector() {
    let dir = create_scripts_dir(&[("deploy", "exit 0"), ("deploy-docs", "exit 0")]);

    scripts()
        .arg("--dir")
        .arg(dir.path())
        .args(["--select-1", "dep"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("needs a terminal"));
}

// ==================== Flow ====================

#[test]
fn test_flow_rejects_dir() {
    flow()
        .args(["--no-config", "--dir", "/tmp", "hello"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--dir only applies to `scripts`"));
}

#[test]
fn test_print_config() {
    for mut cmd in [scripts(), flow()] {
        cmd.arg("--print-config")
            .assert()
            .success()
            .stdout(predicate::str::contains("[selector]"))
            .stdout(predicate::str::contains("select_one = true"));
    }
}

#[test]
fn test_flow_hello_default() {
    flow()
        .args(["--no-config", "hello"])
        .assert()
        .success()
        .stdout("Hello, world!\n");
}

#[test]
fn test_flow_hello_with_name() {
    flow()
        .args(["--no-config", "hello", "Alice"])
        .assert()
        .success()
        .stdout("Hello, Alice!\n");

    flow()
        .args(["--no-config", "hello", "--", "Bob"])
        .assert()
        .success()
        .stdout("Hello, Bob!\n");
}

#[test]
fn test_flow_hello_help_after_separator() {
    flow()
        .args(["--no-config", "hello", "--", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Say hello to someone."));
}

#[test]
fn test_flow_hello_too_many_args() {
    flow()
        .args(["--no-config", "hello", "a", "b"])
        .assert()
        .code(2);
}

#[test]
fn test_flow_dry_run_builtin() {
    flow()
        .args(["--no-config", "-n", "hello", "Alice"])
        .assert()
        .success()
        .stdout("Would run: hello Alice\n");
}

#[cfg(unix)]
#[test]
fn test_flow_configured_command() {
    let (_config_dir, config) = create_config(FLOW_COMMANDS);

    flow()
        .arg("--config")
        .arg(&config)
        .args(["deploy", "--", "now"])
        .assert()
        .success()
        .stdout("deploying now\n");
}

#[test]
fn test_flow_builtin_wins_over_configured_duplicate() {
    let (_config_dir, config) = create_config(
        "[[commands]]\nname = \"hello\"\nprogram = \"/bin/echo\"\nargs = [\"impostor\"]\n",
    );

    flow()
        .arg("--config")
        .arg(&config)
        .arg("hello")
        .assert()
        .success()
        .stdout("Hello, world!\n");
}

// ==================== Config Errors and Completions ====================

#[test]
fn test_invalid_config_exits_78() {
    let (_config_dir, config) = create_config("[selector\nbackend = ");

    flow()
        .arg("--config")
        .arg(&config)
        .arg("hello")
        .assert()
        .code(78)
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_missing_config_exits_78() {
    flow()
        .args(["--config", "/nonexistent/toolbox/config.toml", "hello"])
        .assert()
        .code(78);
}

#[test]
fn test_completions() {
    scripts()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scripts"));

    flow()
        .args(["--completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flow"));
}
