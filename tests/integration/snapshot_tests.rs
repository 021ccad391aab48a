//! Snapshot tests using insta.
//!
//! These tests capture the exact listing output of both palettes.

use crate::integration::fixtures::{
    create_config, create_scripts_dir, described_scripts, flow, scripts, FLOW_COMMANDS,
};

fn stdout_of(mut cmd: assert_cmd::Command) -> String {
    let output = cmd.output().expect("Failed to run binary");
    assert!(output.status.success(), "{output:?}");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ==================== List Output Snapshots ====================

#[test]
fn test_snapshot_list_with_summaries() {
    let dir = create_scripts_dir(&described_scripts());

    let mut cmd = scripts();
    cmd.arg("--list").arg("--dir").arg(dir.path());

    insta::assert_snapshot!(stdout_of(cmd), @r"
    clean
    deploy  Ship the site to production
    update  Pull the latest changes
    ");
}

#[test]
fn test_snapshot_list_long_names() {
    let dir = create_scripts_dir(&[
        ("a", "# Short name\nexit 0"),
        ("rotate-nightly-backups", "# Long name\nexit 0"),
        ("bare", "exit 0"),
    ]);

    let mut cmd = scripts();
    cmd.arg("--list").arg("--dir").arg(dir.path());

    insta::assert_snapshot!(stdout_of(cmd), @r"
    a                       Short name
    bare
    rotate-nightly-backups  Long name
    ");
}

#[test]
fn test_snapshot_flow_list() {
    let (_config_dir, config) = create_config(&format!(
        "{FLOW_COMMANDS}\n[[commands]]\nname = \"backup\"\nprogram = \"restic\"\nsummary = \"Back up home\"\n"
    ));

    let mut cmd = flow();
    cmd.arg("--list").arg("--config").arg(&config);

    insta::assert_snapshot!(stdout_of(cmd), @r"
    hello   Say hello to someone.
    update
    deploy
    clean
    backup  Back up home
    ");
}

#[test]
fn test_snapshot_docstring_summary() {
    let dir = tempfile::TempDir::new().unwrap();
    crate::integration::fixtures::write_script(
        dir.path(),
        "rotate.py",
        "#!/usr/bin/env python3\n# -*- coding: utf-8 -*-\n\"\"\"Rotate the log files.\n\nLonger text.\n\"\"\"\n",
    );

    let mut cmd = scripts();
    cmd.arg("--list").arg("--dir").arg(dir.path());

    insta::assert_snapshot!(stdout_of(cmd), @"rotate  Rotate the log files.");
}
