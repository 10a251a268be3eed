//! every single available configuration option and its type is listed in this file
use {
    crate::config::validate::{Validate, format_validation_errors},
    color_eyre::{
        Section, SectionExt,
        eyre::{Context, Result, eyre},
    },
    config::{Config, ConfigBuilder},
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    smart_default::SmartDefault,
    std::path::{Path, PathBuf},
    tracing::debug,
};

/// the name of the config file looked up in the project and the user's config dir
pub const CONFIG_FILE_NAME: &str = "themekit.toml";

/// Paths to the registry, the source and output trees, and the template files
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// The theme registry (a JSON array of theme names)
    #[default(PathBuf::from("themes.json"))]
    pub registry: PathBuf,

    /// The directory holding each theme's stylesheet sources
    #[default(PathBuf::from("src"))]
    pub src: PathBuf,

    /// The directory built themes are written to
    #[default(PathBuf::from("dist"))]
    pub out: PathBuf,

    /// The HTML page copied into every built theme
    #[default(PathBuf::from("misc/index.html"))]
    pub html_template: PathBuf,

    /// The base theme stylesheet copied into new themes
    #[default(PathBuf::from("misc/theme.less"))]
    pub theme_template: PathBuf,

    /// The base variables stylesheet copied into new themes
    #[default(PathBuf::from("node_modules/bootstrap/less/variables.less"))]
    pub variables_template: PathBuf,

    /// A package.json-style manifest to read banner metadata from
    #[default(PathBuf::from("package.json"))]
    pub manifest: PathBuf,
}

/// A file copied into a theme's output under a new name
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct CopySpec {
    /// Where to copy from
    pub source: PathBuf,

    /// The file name to copy to
    pub target: String,
}

impl CopySpec {
    /// make a new copy spec
    pub fn new(source: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Settings for the JavaScript step
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault, PartialEq)]
#[serde(default)]
pub struct JsConfig {
    /// The vendor scripts copied into `<out>/<theme>/js/`
    #[default(vec![
        CopySpec::new("node_modules/bootstrap/dist/js/bootstrap.js", "vendor.js"),
        CopySpec::new("node_modules/bootstrap/dist/js/bootstrap.min.js", "vendor.min.js"),
    ])]
    pub files: Vec<CopySpec>,
}

/// Settings for the fonts step
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault, PartialEq)]
#[serde(default)]
pub struct FontsConfig {
    /// A glob matching the font files copied into `<out>/<theme>/fonts/`
    #[default("node_modules/bootstrap/dist/fonts/*".to_string())]
    pub glob: String,
}

/// The stylesheet language themes are written in
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, SmartDefault, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompilerKind {
    /// LESS, compiled by an external `lessc`
    #[default]
    Less,

    /// SCSS, compiled in-process
    Scss,
}

impl CompilerKind {
    /// the file extension sources in this language use
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Less => "less",
            Self::Scss => "scss",
        }
    }
}

/// Settings for the CSS step
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault, PartialEq)]
#[serde(default)]
pub struct CssConfig {
    /// Which stylesheet compiler to use
    pub compiler: CompilerKind,

    /// The LESS compiler program
    #[default("lessc".to_string())]
    pub less_command: String,

    /// Extra arguments passed to the LESS compiler before the entry file
    pub less_args: Vec<String>,

    /// Extra directories searched by `@import`/`@use`
    pub load_paths: Vec<PathBuf>,

    /// The stylesheet directory inside `<src>/<theme>/`
    #[default("less".to_string())]
    pub source_dir: String,

    /// The stylesheet entry point inside the stylesheet directory
    #[default("theme.less".to_string())]
    pub entry: String,

    /// The unminified output file name
    #[default("theme.css".to_string())]
    pub output: String,

    /// The minified output file name
    #[default("theme.min.css".to_string())]
    pub minified_output: String,

    /// Browserslist queries used for vendor prefixing
    #[default(vec![
        "android 2.3".to_string(),
        "android >= 4".to_string(),
        "chrome >= 20".to_string(),
        "firefox >= 24".to_string(),
        "ie >= 8".to_string(),
        "ios >= 6".to_string(),
        "opera >= 12".to_string(),
        "safari >= 6".to_string(),
    ])]
    pub browsers: Vec<String>,
}

/// Fallback package metadata for the license banner, used when no manifest is found
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault, PartialEq)]
#[serde(default)]
pub struct BannerConfig {
    /// Prepend the banner to compiled stylesheets
    #[default(true)]
    pub enable: bool,

    /// The package name
    #[default("themes".to_string())]
    pub name: String,

    /// A short description
    #[default("Custom Bootstrap themes".to_string())]
    pub description: String,

    /// The package version
    #[default("0.1.0".to_string())]
    pub version: String,

    /// Who wrote it
    pub author: String,

    /// The license identifier
    #[default("MIT".to_string())]
    pub license: String,

    /// Where the source lives
    pub repository: String,
}

/// Settings for packaging built themes
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault, PartialEq)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Zip every built theme into `<out>/<theme>.zip`
    #[default(true)]
    pub enabled: bool,
}

/// Settings for watch mode
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault, PartialEq)]
#[serde(default)]
pub struct WatchConfig {
    /// How long to batch filesystem events for before rebuilding, in milliseconds
    #[default(250)]
    pub debounce_ms: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, SmartDefault, PartialEq, Eq)]
/// The format to log in
pub enum LoggingFormat {
    /// Use the compact output format
    #[default]
    Compact,

    /// Use an excessively pretty output format
    Pretty,
}

/// Settings for logging
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging (HIGHLY RECOMMENDED TO KEEP ON, usage hints are logged)
    #[default(true)]
    pub enable: bool,

    /// The max level to log at
    #[default("info".to_string())]
    pub level: String,

    /// The output format
    pub format: LoggingFormat,

    /// Enable ANSI escape codes for colors and stuff
    #[default(true)]
    pub ansi: bool,

    /// Display event targets in log messages
    #[default(false)]
    pub event_targets: bool,

    /// Display line numbers in log messages
    #[default(false)]
    pub line_numbers: bool,
}

/// themekit's configuration
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault, PartialEq)]
#[serde(default)]
pub struct ThemeKitConfig {
    /// Where things are
    pub paths: PathsConfig,

    /// JavaScript step settings
    pub js: JsConfig,

    /// Fonts step settings
    pub fonts: FontsConfig,

    /// CSS step settings
    pub css: CssConfig,

    /// Banner settings
    pub banner: BannerConfig,

    /// Archive settings
    pub archive: ArchiveConfig,

    /// Watch settings
    pub watch: WatchConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl ThemeKitConfig {
    /// load config from default locations
    ///
    /// load prio: env > explicit file > local > global > defaults
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Self::create_builder(Self::default())?;

        if let Some(global) = Self::global_config_path() {
            builder = builder.add_source(config::File::from(global).required(false));
        }

        if let Some(local) = Self::find_local_config(root) {
            debug!("Using local config {}", local.display());
            builder = builder.add_source(config::File::from(local).required(false));
        }

        if let Some(explicit) = explicit {
            builder = builder.add_source(config::File::from(explicit.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("THEMEKIT")
                .prefix_separator("_")
                .separator("__"),
        );

        let settings = builder.build().wrap_err("Failed to build configuration")?;
        let cfg: ThemeKitConfig = settings
            .try_deserialize()
            .wrap_err("Failed to deserialize configuration")?;

        cfg.run_validation()?;
        Ok(cfg)
    }

    /// get the global config file path
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// create a config builder with defaults
    fn create_builder(
        defaults: ThemeKitConfig,
    ) -> Result<ConfigBuilder<config::builder::DefaultState>> {
        let config_source = Config::try_from(&defaults)
            .wrap_err("Failed to convert default config struct to config source")?;

        Ok(Config::builder().add_source(config_source))
    }

    /// run validation and return a pretty error if it fails
    fn run_validation(&self) -> Result<()> {
        self.validate()
            .map_err(|errors| eyre!(format_validation_errors(&errors)))
            .wrap_err("config validation failed")
            .suggestion(format!("Check your {} for invalid values", CONFIG_FILE_NAME))
            .suggestion("Run `themekit --gen-default` to see valid options")
    }

    /// find the config file in `root` or one of its ancestors
    fn find_local_config(root: &Path) -> Option<PathBuf> {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

        root.ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|path| path.is_file())
    }

    /// save config to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let toml_str =
            toml::to_string_pretty(self).wrap_err("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }

        std::fs::write(path, &toml_str)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))
            .with_section(|| path.display().to_string().header("File path"))
            .with_section(|| format!("{} bytes", toml_str.len()).header("Content size:"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::fs, tempfile::TempDir};

    #[test]
    fn test_defaults_match_layout() {
        let cfg = ThemeKitConfig::default();

        assert_eq!(cfg.paths.registry, PathBuf::from("themes.json"));
        assert_eq!(cfg.css.entry, "theme.less");
        assert_eq!(cfg.css.compiler, CompilerKind::Less);
        assert_eq!(cfg.js.files.len(), 2);
        assert_eq!(cfg.js.files[0].target, "vendor.js");
        assert!(cfg.archive.enabled);
    }

    #[test]
    fn test_defaults_survive_toml() {
        let cfg = ThemeKitConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: ThemeKitConfig = toml::from_str(&text).unwrap();

        assert_eq!(cfg, back);
    }

    #[test]
    fn test_local_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[css]\ncompiler = \"scss\"\nentry = \"theme.scss\"\n\n[archive]\nenabled = false\n",
        )
        .unwrap();

        let cfg = ThemeKitConfig::load(tmp.path(), None).unwrap();
        assert_eq!(cfg.css.compiler, CompilerKind::Scss);
        assert_eq!(cfg.css.entry, "theme.scss");
        assert!(!cfg.archive.enabled);
        assert_eq!(cfg.css.output, "theme.css");
    }

    #[test]
    fn test_saved_file_loads_back() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = ThemeKitConfig::default();
        cfg.css.compiler = CompilerKind::Scss;
        cfg.watch.debounce_ms = 1000;

        let path = tmp.path().join("resources").join("custom.toml");
        cfg.save_to_file(&path).unwrap();

        assert_eq!(ThemeKitConfig::load(tmp.path(), Some(&path)).unwrap(), cfg);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "[logging]\nlevel = \"loud\"\n").unwrap();

        assert!(ThemeKitConfig::load(tmp.path(), Some(&explicit)).is_err());
    }
}
