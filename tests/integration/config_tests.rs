//! Integration tests for configuration loading and merging.

use predicates::prelude::*;
use toolbox::config::{
    generate_example_config, load_config, load_config_from_path, AppearanceLayer, Config,
    ConfigLayer, ExcludeConfig, SelectorBackend, SelectorLayer, Theme,
};
use toolbox::error::LauncherError;

use crate::integration::fixtures::{create_config, create_scripts_dir, scripts, standard_scripts};

// ==================== Config Defaults ====================

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.selector.backend, SelectorBackend::Auto);
    assert!(config.selector.select_one);
    assert!(config.selector.search_summaries);
    assert!(config.scripts.read_summaries);
    assert!(config.appearance.show_footer);
    assert!(config.exclude.patterns.is_empty());
    assert!(config.commands.is_empty());
}

#[test]
fn test_no_config_ignores_file() {
    let (_dir, path) = create_config("[selector\nbroken");

    let config = load_config(Some(&path), true).unwrap();
    assert!(config.exclude.patterns.is_empty());
}

// ==================== Config Merging ====================

#[test]
fn test_config_merge() {
    let mut base = Config::default();
    base.exclude.patterns = vec!["base".to_string()];
    base.scripts.dir = Some("~/scripts".to_string());

    base.selector.backend = SelectorBackend::Fzf;
    base.selector.select_one = false;

    let overlay = ConfigLayer {
        appearance: AppearanceLayer {
            theme: Some(Theme::Minimal),
            show_footer: Some(false),
        },
        exclude: ExcludeConfig {
            patterns: vec!["overlay".to_string()],
        },
        ..Default::default()
    };

    base.apply(overlay);

    // Overlay values win
    assert_eq!(base.appearance.theme, Theme::Minimal);
    assert!(!base.appearance.show_footer);
    // Keys the overlay leaves out keep their values
    assert_eq!(base.selector.backend, SelectorBackend::Fzf);
    assert!(!base.selector.select_one);
    // Unset values survive
    assert_eq!(base.scripts.dir.as_deref(), Some("~/scripts"));
    // Patterns accumulate
    assert_eq!(base.exclude.patterns, vec!["base", "overlay"]);

    base.apply(ConfigLayer {
        selector: SelectorLayer {
            select_one: Some(true),
            ..Default::default()
        },
        ..Default::default()
    });
    assert!(base.selector.select_one);
    assert_eq!(base.appearance.theme, Theme::Minimal);
}

// ==================== Loading From Files ====================

#[test]
fn test_load_full_config() {
    let (_dir, path) = create_config(
        r#"
[selector]
backend = "builtin"
select_one = true
case_sensitive = true

[scripts]
dir = "/srv/scripts"
read_summaries = false

[scripts.interpreters]
py = "python3"

[scripts.summaries]
deploy = "Ship it"

[exclude]
patterns = ["tmp-*"]

[appearance]
theme = "none"

[[commands]]
name = "backup"
program = "restic"
args = ["backup", "--one-file-system"]
summary = "Back up the home directory"
"#,
    );

    let config = load_config_from_path(&path).unwrap();

    assert_eq!(config.selector.backend, SelectorBackend::Builtin);
    assert!(config.selector.select_one);
    assert!(config.selector.case_sensitive);
    assert!(config.selector.search_summaries);
    assert_eq!(config.scripts_dir(), Some("/srv/scripts".into()));
    assert!(!config.scripts.read_summaries);
    assert_eq!(config.scripts.interpreters["py"], "python3");
    assert_eq!(config.scripts.summaries["deploy"], "Ship it");
    assert_eq!(config.exclude.patterns, vec!["tmp-*"]);
    assert_eq!(config.appearance.theme, Theme::None);
    assert!(config.appearance.show_footer);

    let backup = config.commands[0].to_descriptor();
    assert_eq!(backup.name(), "backup");
    assert_eq!(backup.summary(), Some("Back up the home directory"));
    assert_eq!(
        backup.command_line(&["--dry-run".to_string()]),
        vec!["restic", "backup", "--one-file-system", "--dry-run"]
    );
}

#[test]
fn test_load_unknown_backend_is_invalid() {
    let (_dir, path) = create_config("[selector]\nbackend = \"dmenu\"\n");

    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, LauncherError::InvalidConfig { .. }));
    assert_eq!(err.exit_code(), 78);
}

#[test]
fn test_load_missing_file_is_invalid() {
    let err = load_config_from_path("/nonexistent/toolbox.toml".as_ref()).unwrap_err();
    assert!(matches!(err, LauncherError::InvalidConfig { .. }));
}

#[test]
fn test_example_config_parses() {
    let example = generate_example_config();
    let config: Config = toml::from_str(&example).unwrap();

    assert_eq!(config.selector.backend, SelectorBackend::Auto);
    assert!(config.scripts.read_summaries);
}

// ==================== Layering Through the Binary ====================

#[test]
fn test_config_excludes_apply_with_cli_excludes() {
    let dir = create_scripts_dir(&standard_scripts());
    let (_config_dir, config) = create_config("[exclude]\npatterns = [\"clean\"]\n");

    scripts()
        .arg("--config")
        .arg(&config)
        .arg("--list")
        .arg("--dir")
        .arg(dir.path())
        .args(["--exclude", "update"])
        .assert()
        .success()
        .stdout("deploy\n");
}

#[test]
fn test_config_scripts_dir_used_without_flag() {
    let dir = create_scripts_dir(&standard_scripts());
    let (_config_dir, config) = create_config(&format!(
        "[scripts]\ndir = {:?}\n",
        dir.path().display().to_string()
    ));

    scripts()
        .arg("--config")
        .arg(&config)
        .arg("--list")
        .assert()
        .success()
        .stdout("clean\ndeploy\nupdate\n");
}

#[test]
fn test_config_summaries_override_file_headers() {
    let dir = create_scripts_dir(&[("deploy", "# From the file\nexit 0")]);
    let (_config_dir, config) = create_config("[scripts.summaries]\ndeploy = \"From config\"\n");

    scripts()
        .arg("--config")
        .arg(&config)
        .arg("--list")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("deploy  From config\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_user_config_layer() {
    let home = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("toolbox")).unwrap();
    std::fs::write(
        home.path().join("toolbox").join("config.toml"),
        "[exclude]\npatterns = [\"deploy\"]\n",
    )
    .unwrap();
    let dir = create_scripts_dir(&standard_scripts());

    scripts()
        .env("XDG_CONFIG_HOME", home.path())
        .arg("--list")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("clean\nupdate\n");

    // --no-config skips it
    scripts()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["--list", "--no-config", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("clean\ndeploy\nupdate\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_broken_user_config_warns_and_continues() {
    let home = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("toolbox")).unwrap();
    std::fs::write(home.path().join("toolbox").join("config.toml"), "[[[").unwrap();
    let dir = create_scripts_dir(&standard_scripts());

    scripts()
        .env("XDG_CONFIG_HOME", home.path())
        .arg("--list")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("clean\ndeploy\nupdate\n")
        .stderr(predicate::str::contains("Invalid config"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_flag_keeps_user_selector_settings() {
    let home = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("toolbox")).unwrap();
    std::fs::write(
        home.path().join("toolbox").join("config.toml"),
        "[selector]\nbackend = \"builtin\"\nselect_one = false\n",
    )
    .unwrap();
    let (_config_dir, config) = create_config("[appearance]\ntheme = \"minimal\"\n");
    let dir = create_scripts_dir(&standard_scripts());

    // select_one = false from the user layer still applies: the single
    // match opens the picker instead of running
    scripts()
        .env("XDG_CONFIG_HOME", home.path())
        .arg("--config")
        .arg(&config)
        .arg("--dir")
        .arg(dir.path())
        .arg("dpl")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("needs a terminal"));
}
