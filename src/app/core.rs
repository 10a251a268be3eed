//! the core app
use {
    super::{cli::Cli, handlers::Handlers, logging},
    crate::config::ThemeKitConfig,
    clap::Parser,
    color_eyre::{
        Section,
        eyre::{Result, WrapErr},
    },
    std::path::{Path, PathBuf},
    tracing::{debug, info},
};

/// the themekit app
pub struct ThemeKitApp {
    /// the parsed command line
    cli: Cli,
    /// the logic handlers, None when only generators were asked for
    handlers: Option<Handlers>,
}

impl ThemeKitApp {
    /// initialize themekit
    ///
    /// - 1. parses the command line
    /// - 2. runs the schema/default config generators if asked to
    /// - 3. loads and validates the config
    /// - 4. sets up logging
    ///
    /// # Errors
    ///
    /// returns an error if a generator fails  
    /// returns an error if the project root doesn't exist  
    /// returns an error if it fails to load the configuration  
    /// returns an error if it fails to setup logging  
    pub fn init() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// initialize themekit from already parsed arguments
    ///
    /// # Errors
    ///
    /// see [`ThemeKitApp::init`]
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.run_generators()? {
            return Ok(Self {
                cli,
                handlers: None,
            });
        }

        let root = Self::resolve_root(&cli.root)?;
        let cfg = ThemeKitConfig::load(&root, cli.config.as_deref())?;
        logging::setup(&cfg.logging)?;

        info!(
            "Starting {} v{} in {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            root.display()
        );

        let handlers = Handlers::new(&root, cfg, cli.no_archive);
        Ok(Self {
            cli,
            handlers: Some(handlers),
        })
    }

    /// canonicalize the project root
    fn resolve_root(root: &Path) -> Result<PathBuf> {
        root.canonicalize()
            .wrap_err_with(|| format!("Project root {} doesn't exist", root.display()))
            .suggestion("pass an existing directory with --root")
    }

    /// run the requested command
    ///
    /// # Errors
    ///
    /// returns an error if the command fails
    pub async fn run(&self) -> Result<()> {
        let Some(handlers) = &self.handlers else {
            return Ok(());
        };

        match &self.cli.command {
            Some(command) => {
                debug!("Running {:?}", command);
                handlers
                    .handle(command)
                    .await
                    .wrap_err("themekit failed")
            }
            None => {
                info!("Nothing to do, see themekit --help");
                Ok(())
            }
        }
    }
}
