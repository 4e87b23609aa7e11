use super::*;
use std::collections::HashMap;
use tempfile::TempDir;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults_match_viewer_layout() {
    let config = DocsiteConfig::default();

    assert_eq!(config.compress.pattern, "2_CamScanner*.png");
    assert_eq!(config.compress.output_dir, PathBuf::from("compressed_images"));
    assert_eq!(config.compress.quality, 85);
    assert_eq!(config.compress.max_width, 1200);
    assert_eq!(config.compress.patch.file, PathBuf::from("script.js"));
    assert!(config.compress.patch.to.starts_with("`{output_dir}/"));
    assert_eq!(config.deploy.branch, "main");
    assert_eq!(config.deploy.remote, "origin");
    assert_eq!(
        config.deploy.default_commit_message,
        "Initial commit: Document viewer with compressed images"
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = DocsiteConfig::from_toml_str(
        r#"
        [compress]
        quality = 70

        [deploy]
        git_host = "git.example.org"
        "#,
    )
    .unwrap();

    assert_eq!(config.compress.quality, 70);
    assert_eq!(config.compress.max_width, 1200);
    assert_eq!(config.deploy.git_host, "git.example.org");
    assert_eq!(config.deploy.pages_host, "github.io");
    assert_eq!(config.deploy.compressor.args, vec!["compress".to_string()]);
}

#[test]
fn test_compressor_install_command() {
    let config = DocsiteConfig::from_toml_str(
        r#"
        [deploy.compressor]
        program = "docsite"
        install = ["cargo", "install", "docsite"]
        "#,
    )
    .unwrap();

    assert_eq!(config.deploy.compressor.program.as_deref(), Some("docsite"));
    assert_eq!(
        config.deploy.compressor.install,
        Some(vec![
            "cargo".to_string(),
            "install".to_string(),
            "docsite".to_string()
        ])
    );
}

#[test]
fn test_env_overrides() {
    let mut config = DocsiteConfig::default();
    config.merge_env_from(lookup_from(&[
        ("DOCSITE_LOG_LEVEL", "debug"),
        ("DOCSITE_PATTERN", "*.png"),
        ("DOCSITE_QUALITY", "60"),
        ("DOCSITE_MAX_WIDTH", "800"),
        ("DOCSITE_GIT_HOST", "gitlab.com"),
    ]));

    assert_eq!(config.log_level.as_deref(), Some("debug"));
    assert_eq!(config.compress.pattern, "*.png");
    assert_eq!(config.compress.quality, 60);
    assert_eq!(config.compress.max_width, 800);
    assert_eq!(config.deploy.git_host, "gitlab.com");
}

#[test]
fn test_invalid_env_numbers_are_ignored() {
    let mut config = DocsiteConfig::default();
    config.merge_env_from(lookup_from(&[
        ("DOCSITE_QUALITY", "high"),
        ("DOCSITE_MAX_WIDTH", "-5"),
    ]));

    assert_eq!(config.compress.quality, 85);
    assert_eq!(config.compress.max_width, 1200);
}

#[test]
fn test_validation_reports_every_problem() {
    let mut config = DocsiteConfig::default();
    config.compress.quality = 0;
    config.compress.max_width = 0;
    config.deploy.branch = " ".to_string();

    let err = config.validate().unwrap_err();
    match &err {
        ConfigError::Invalid(errors) => assert_eq!(errors.len(), 3),
        other => panic!("unexpected error: {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("compress.quality"));
    assert!(message.contains("compress.max_width"));
    assert!(message.contains("deploy.branch"));
}

#[test]
fn test_load_reads_site_config_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        "[compress]\nmax_width = 640\n",
    )
    .unwrap();

    let config = DocsiteConfig::load(temp_dir.path(), None).unwrap();
    assert_eq!(config.compress.max_width, 640);
}

#[test]
fn test_load_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = DocsiteConfig::from_file(&temp_dir.path().join(CONFIG_FILE_NAME));
    assert!(matches!(config, Err(ConfigError::Read { .. })));

    let config = DocsiteConfig::load(temp_dir.path(), None).unwrap();
    assert_eq!(config.compress.output_dir, PathBuf::from("compressed_images"));
}

#[test]
fn test_load_rejects_malformed_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    std::fs::write(&path, "[compress\nquality = ").unwrap();

    let err = DocsiteConfig::load(temp_dir.path(), Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
