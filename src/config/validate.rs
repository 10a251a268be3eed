//! configuration validation stuff
use {
    crate::config::options::*,
    lightningcss::targets::Browsers,
};

/// trait for validating config structs
pub trait Validate {
    /// validate the config
    fn validate(&self) -> Result<(), Vec<String>>;

    /// check if the config is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// check that a string can be used as a single file name
fn is_file_name(v: &String) -> bool {
    !v.trim().is_empty() && !v.contains(['/', '\\']) && v != "." && v != ".."
}

validator! { PathsConfig,
    registry => |v: &std::path::PathBuf| v.file_name().is_some(),
        "must point to a file";
    src => |v: &std::path::PathBuf| !v.as_os_str().is_empty(),
        "must not be empty";
    out => |v: &std::path::PathBuf| !v.as_os_str().is_empty(),
        "must not be empty";
}

validator! { JsConfig,
    files => |v: &Vec<CopySpec>| v.iter().all(|spec| is_file_name(&spec.target)),
        "every target must be a plain file name";
}

validator! { FontsConfig,
    glob => |v: &String| glob::Pattern::new(v).is_ok(),
        "must be a valid glob pattern";
}

validator! { CssConfig,
    less_command => |v: &String| !v.trim().is_empty(),
        "must not be empty";
    source_dir => is_file_name,
        "must be a plain directory name";
    entry => is_file_name,
        "must be a plain file name";
    output => is_file_name,
        "must be a plain file name";
    minified_output => is_file_name,
        "must be a plain file name";
    browsers => |v: &Vec<String>| v.is_empty() || Browsers::from_browserslist(v.iter()).is_ok(),
        "must be valid browserslist queries";
}

validator! { BannerConfig,
    name => |v: &String| !v.trim().is_empty(),
        "must not be empty";
    version => |v: &String| !v.trim().is_empty(),
        "must not be empty";
}

impl Validate for ArchiveConfig {
    fn validate(&self) -> Result<(), Vec<String>> {
        Ok(())
    }
}

validator! { WatchConfig,
    debounce_ms => |v: &u64| *v > 0 && *v <= 60_000,
        "must be between 1 and 60000";
}

/// valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

validator! { LoggingConfig,
    level => |v: &String| VALID_LOG_LEVELS.contains(&v.to_lowercase().as_str()),
        "must be one of: trace, debug, info, warn, error, off";
}

validator_nested! { ThemeKitConfig,
    nested: {
        paths;
        js;
        fonts;
        css;
        banner;
        archive;
        watch;
        logging;
    }
}

/// format validation errors into a nice message
pub fn format_validation_errors(errors: &[String]) -> String {
    let mut msg = String::from("Configuration validation failed:\n");

    for (i, err) in errors.iter().enumerate() {
        msg.push_str(&format!("  {}. {}\n", i + 1, err));
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ThemeKitConfig::default().is_valid());
    }

    #[test]
    fn test_collects_nested_errors() {
        let mut cfg = ThemeKitConfig::default();
        cfg.css.entry = "../theme.less".to_string();
        cfg.watch.debounce_ms = 0;
        cfg.logging.level = "shouty".to_string();

        let errors = cfg.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&"css.entry: must be a plain file name".to_string()));
        assert!(errors.iter().any(|e| e.starts_with("watch.debounce_ms")));
        assert!(errors.iter().any(|e| e.starts_with("logging.level")));
    }

    #[test]
    fn test_rejects_bad_browser_query() {
        let mut cfg = CssConfig::default();
        cfg.browsers = vec!["netscape navigator >= 4".to_string()];

        assert!(!cfg.is_valid());
    }

    #[test]
    fn test_format_validation_errors() {
        let msg = format_validation_errors(&["a: bad".to_string(), "b: worse".to_string()]);
        assert!(msg.contains("  1. a: bad\n"));
        assert!(msg.contains("  2. b: worse\n"));
    }
}
