//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("hexmark_{}_{}.toml", name, std::process::id()));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

/// Removes the variable on creation and again on drop.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

mod paths {
    use super::*;

    #[test]
    fn default_config_path_is_under_hexmark() {
        let path = default_config_path().expect("Should have default path");
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("hexmark") && path_str.ends_with("config.toml"),
            "got: {}",
            path_str
        );
    }

    #[test]
    fn default_log_path_ends_with_hexmark_log() {
        let path = default_log_path();
        assert!(path.ends_with("hexmark.log"), "got: {}", path.display());
    }

    #[test]
    fn default_log_path_has_hexmark_directory_when_state_dir_known() {
        if dirs::state_dir().is_some() {
            let path = default_log_path();
            assert_eq!(
                path.parent().and_then(|p| p.file_name()),
                Some(std::ffi::OsStr::new("hexmark"))
            );
        }
    }
}

mod file {
    use super::*;

    #[test]
    fn missing_file_is_not_an_error() {
        let result = load_config_file("/nonexistent/path/to/hexmark.toml");
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn parses_every_field() {
        let path = write_temp_config(
            "full",
            r#"
grouping_size = 4
scroll_lines = 5
log_file_path = "/tmp/custom.log"
"#,
        );

        let config = load_config_file(&path).unwrap().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.grouping_size, Some(GroupingSize::Four));
        assert_eq!(config.scroll_lines, Some(5));
        assert_eq!(config.log_file_path, Some(PathBuf::from("/tmp/custom.log")));
    }

    #[test]
    fn partial_config_leaves_rest_unset() {
        let path = write_temp_config("partial", "scroll_lines = 2\n# rest omitted\n");

        let config = load_config_file(&path).unwrap().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.scroll_lines, Some(2));
        assert_eq!(config.grouping_size, None);
        assert_eq!(config.log_file_path, None);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let path = write_temp_config("invalid", "this is not valid TOML ][}{");

        let result = load_config_file(&path);
        fs::remove_file(&path).ok();

        match result {
            Err(ConfigError::ParseError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn unsupported_grouping_is_parse_error() {
        let path = write_temp_config("grouping3", "grouping_size = 3\n");

        let result = load_config_file(&path);
        fs::remove_file(&path).ok();

        match result {
            Err(ConfigError::ParseError { reason, .. }) => {
                assert!(reason.contains("grouping"), "got: {}", reason)
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn directory_is_read_error() {
        let result = load_config_file(env::temp_dir());
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}

mod precedence {
    use super::*;

    #[test]
    #[serial(hexmark_config)]
    fn explicit_path_beats_env_var() {
        let _guard = EnvGuard::new(CONFIG_ENV);
        let explicit = write_temp_config("explicit", "scroll_lines = 7\n");
        let from_env = write_temp_config("from_env", "scroll_lines = 9\n");
        env::set_var(CONFIG_ENV, &from_env);

        let config = load_config_with_precedence(Some(explicit.clone()))
            .unwrap()
            .unwrap();
        fs::remove_file(&explicit).ok();
        fs::remove_file(&from_env).ok();

        assert_eq!(config.scroll_lines, Some(7));
    }

    #[test]
    #[serial(hexmark_config)]
    fn env_var_used_without_explicit_path() {
        let _guard = EnvGuard::new(CONFIG_ENV);
        let from_env = write_temp_config("env_only", "grouping_size = 2\n");
        env::set_var(CONFIG_ENV, &from_env);

        let config = load_config_with_precedence(None).unwrap().unwrap();
        fs::remove_file(&from_env).ok();

        assert_eq!(config.grouping_size, Some(GroupingSize::Two));
    }

    #[test]
    fn merge_without_file_gives_defaults() {
        assert_eq!(merge_config(None), ResolvedConfig::default());
    }

    #[test]
    fn merge_uses_file_values_and_defaults_for_gaps() {
        let resolved = merge_config(Some(ConfigFile {
            grouping_size: Some(GroupingSize::Four),
            ..ConfigFile::default()
        }));

        assert_eq!(resolved.grouping, GroupingSize::Four);
        assert_eq!(resolved.scroll_lines, ResolvedConfig::default().scroll_lines);
        assert_eq!(resolved.log_file_path, default_log_path());
    }

    #[test]
    #[serial(hexmark_grouping)]
    fn env_grouping_overrides_file() {
        let _guard = EnvGuard::new(GROUPING_ENV);
        let merged = merge_config(Some(ConfigFile {
            grouping_size: Some(GroupingSize::Four),
            scroll_lines: Some(3),
            ..ConfigFile::default()
        }));
        env::set_var(GROUPING_ENV, "2");

        let with_env = apply_env_overrides(merged).unwrap();

        assert_eq!(with_env.grouping, GroupingSize::Two);
        assert_eq!(with_env.scroll_lines, 3);
    }

    #[test]
    #[serial(hexmark_grouping)]
    fn env_unset_changes_nothing() {
        let _guard = EnvGuard::new(GROUPING_ENV);
        let base = ResolvedConfig::default();
        assert_eq!(apply_env_overrides(base.clone()), Ok(base));
    }

    #[test]
    #[serial(hexmark_grouping)]
    fn env_invalid_grouping_is_error() {
        let _guard = EnvGuard::new(GROUPING_ENV);
        env::set_var(GROUPING_ENV, "8");

        let result = apply_env_overrides(ResolvedConfig::default());

        assert_eq!(
            result,
            Err(ConfigError::InvalidEnv {
                var: GROUPING_ENV,
                value: "8".to_string()
            })
        );
    }

    #[test]
    #[serial(hexmark_grouping)]
    fn cli_beats_env() {
        let _guard = EnvGuard::new(GROUPING_ENV);
        env::set_var(GROUPING_ENV, "4");

        let with_env = apply_env_overrides(ResolvedConfig::default()).unwrap();
        let with_cli = apply_cli_overrides(with_env, Some(GroupingSize::Two));

        assert_eq!(with_cli.grouping, GroupingSize::Two);
    }

    #[test]
    fn cli_without_flags_changes_nothing() {
        let base = ResolvedConfig {
            grouping: GroupingSize::Four,
            scroll_lines: 6,
            log_file_path: PathBuf::from("x.log"),
        };
        assert_eq!(apply_cli_overrides(base.clone(), None), base);
    }
}
