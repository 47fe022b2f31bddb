use std::io::Write;

use rune_config::{ConfigError, RuneConfig};

#[test]
fn loads_transition_table_from_file() -> Result<(), ConfigError> {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
[transition]
appear = true
enter_timeout_ms = 200.0
exit_timeout_ms = 450.0
appear_timeout_ms = 90.0
class_prefix = "slide"
"#
    )
    .expect("write config");

    let config = RuneConfig::load_from_file(file.path())?;
    let transition = config.transition;

    assert!(transition.appear);
    assert_eq!(transition.enter_timeout_ms, 200.0);
    assert_eq!(transition.exit_timeout_ms, 450.0);
    assert_eq!(transition.appear_timeout_ms, Some(90.0));
    assert_eq!(transition.class_prefix.as_deref(), Some("slide"));
    assert!(!transition.mount_on_demand);

    Ok(())
}

#[test]
fn missing_file_reports_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("rune.toml");

    let err = RuneConfig::load_from_file(&missing).unwrap_err();
    match err {
        ConfigError::Read { path, .. } => assert_eq!(path, missing),
        other => panic!("expected read error, got {other:?}"),
    }
}
