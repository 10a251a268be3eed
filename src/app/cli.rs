//! cli stuff
use {
    crate::config::ThemeKitConfig,
    clap::{Args, Parser, Subcommand},
    color_eyre::{Report, eyre::Result},
    schemars::generate::SchemaSettings,
    std::{
        fs::{self, OpenOptions},
        io::{BufWriter, Write},
        path::{Path, PathBuf},
    },
};

/// the CLI
#[derive(Parser, Debug)]
#[command(name = "themekit", version, about)]
pub struct Cli {
    /// The project root
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// An extra config file, applied over the global and local ones
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Don't zip themes after building them
    #[arg(long, global = true)]
    pub no_archive: bool,

    /// Save instead of printing
    #[arg(long)]
    pub save: bool,

    /// Generate a JSON schemafile based on the defaults
    #[arg(short = 's', long)]
    pub gen_schema: bool,

    /// Generate the default config file
    #[arg(short = 'd', long)]
    pub gen_default: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// a theme name, given positionally or with `--name`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeArg {
    /// The theme
    #[arg(value_name = "THEME")]
    pub theme: Option<String>,

    /// The theme (takes priority over the positional one)
    #[arg(short, long)]
    pub name: Option<String>,
}

impl ThemeArg {
    /// the name that was given, if any
    pub fn raw(&self) -> Option<&str> {
        self.name.as_deref().or(self.theme.as_deref())
    }
}

/// arguments to the install commands
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallArgs {
    /// the theme
    #[command(flatten)]
    pub theme: ThemeArg,

    /// Overwrite files that are already there
    #[arg(short, long)]
    pub force: bool,
}

/// the subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new theme from the templates and register it
    Add(ThemeArg),

    /// Build every registered theme
    Build,

    /// Compile a theme's stylesheet
    #[command(alias = "build_css")]
    BuildCss(ThemeArg),

    /// Copy the vendor scripts into a theme
    #[command(alias = "build_js")]
    BuildJs(ThemeArg),

    /// Copy the preview page into a theme
    #[command(alias = "build_html")]
    BuildHtml(ThemeArg),

    /// Copy the fonts into a theme
    #[command(alias = "build_fonts")]
    BuildFonts(ThemeArg),

    /// Run every step for one theme
    #[command(alias = "build_theme")]
    BuildTheme(ThemeArg),

    /// Zip a built theme
    Compress(ThemeArg),

    /// Copy both templates into a registered theme
    Install(InstallArgs),

    /// Copy the theme template into a registered theme
    #[command(alias = "install_custom_theme")]
    InstallCustomTheme(InstallArgs),

    /// Copy the variables template into a registered theme
    #[command(alias = "install_custom_variables")]
    InstallCustomVariables(InstallArgs),

    /// Rebuild stylesheets as they change
    Watch,

    /// List the registered themes
    List,
}

impl Cli {
    /// handle the generator flags
    ///
    /// returns true if any of them were given, in which case nothing else should run
    ///
    /// # Errors
    ///
    /// returns an error if it fails to generate and/or save the json schema  
    /// returns an error if it fails to generate and/or save the default config  
    pub fn run_generators(&self) -> Result<bool> {
        if self.gen_schema {
            Self::gen_schema(self.save)?;
        }

        if self.gen_default {
            Self::gen_defaults(self.save)?;
        }

        Ok(self.gen_schema || self.gen_default)
    }

    /// save a string to a file
    ///
    /// # Arguments
    ///
    /// * `path` - the path to the file being written
    /// * `contents` - the data to write to the file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to open `path`
    pub fn write_to_file(path: impl AsRef<Path>, contents: &str) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        let mut w = BufWriter::new(file);
        w.write_all(contents.as_bytes()).map_err(Report::new)
    }

    /// generate/save the config schema
    ///
    /// # Errors
    ///
    /// returns an error if it fails to convert the schema to a JSON string  
    /// returns an error if it fails to save the schema to `resources/themekit.schema.json`
    pub fn gen_schema(save: bool) -> Result<()> {
        let settings = SchemaSettings::draft2020_12().for_serialize();
        let generator = settings.into_generator();
        let schema = generator.into_root_schema_for::<ThemeKitConfig>();
        let schema_str = serde_json::to_string_pretty(&schema)?;

        if save {
            Self::write_to_file("resources/themekit.schema.json", &schema_str)?;
        } else {
            println!("{}", schema_str);
        }

        Ok(())
    }

    /// generate/save the default config file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to convert the default config to TOML  
    /// returns an error if it fails to save the default config to `resources/themekit.default.toml`
    pub fn gen_defaults(save: bool) -> Result<()> {
        let defaults = ThemeKitConfig::default();

        if save {
            defaults.save_to_file("resources/themekit.default.toml")?;
        } else {
            println!("{}", toml::to_string_pretty(&defaults)?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("themekit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_name_flag_wins() {
        let cli = parse(&["add", "positional", "--name", "flagged"]);
        let Some(Command::Add(arg)) = cli.command else {
            panic!("expected add");
        };

        assert_eq!(arg.raw(), Some("flagged"));
    }

    #[test]
    fn test_positional_name() {
        let cli = parse(&["build-css", "dark"]);
        assert_eq!(
            cli.command,
            Some(Command::BuildCss(ThemeArg {
                theme: Some("dark".into()),
                name: None,
            }))
        );
    }

    #[test]
    fn test_snake_case_aliases() {
        assert!(matches!(
            parse(&["build_fonts", "-n", "x"]).command,
            Some(Command::BuildFonts(_))
        ));
        assert!(matches!(
            parse(&["install_custom_variables", "x", "--force"]).command,
            Some(Command::InstallCustomVariables(InstallArgs { force: true, .. }))
        ));
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["build", "--root", "site", "--no-archive"]);

        assert_eq!(cli.root, PathBuf::from("site"));
        assert!(cli.no_archive);
        assert_eq!(cli.command, Some(Command::Build));
    }

    #[test]
    fn test_missing_name_still_parses() {
        assert_eq!(
            parse(&["compress"]).command,
            Some(Command::Compress(ThemeArg::default()))
        );
    }
}
