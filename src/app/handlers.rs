//! logic handler stuff
use {
    crate::{
        app::cli::{Command, InstallArgs, ThemeArg},
        config::ThemeKitConfig,
        error::Result,
        layout::Layout,
        orchestrator::Builder,
        pipeline::{Pipeline, Step},
        registry::{RegistryLock, ThemeRegistry},
        scaffold::{self, Template},
        theme::{InvalidName, ThemeName},
        watch,
    },
    std::{path::Path, sync::Arc},
    tracing::info,
};

/// pull a usable theme name out of the arguments
///
/// logs a usage hint and returns None if there isn't one
fn resolve_theme(command: &str, arg: &ThemeArg) -> Option<ThemeName> {
    match ThemeName::new(arg.raw().unwrap_or_default()) {
        Ok(theme) => Some(theme),
        Err(InvalidName::Missing) => {
            usage_hint!(command);
            None
        }
        Err(e) => {
            usage_hint!(command, e);
            None
        }
    }
}

/// logic handlers
pub struct Handlers {
    /// the loaded config
    cfg: ThemeKitConfig,
    /// the resolved paths
    layout: Layout,
    /// whether full builds end with the compress step
    archive: bool,
}

impl Handlers {
    /// make a new set of handlers for a project
    pub fn new(root: impl AsRef<Path>, cfg: ThemeKitConfig, no_archive: bool) -> Self {
        Self {
            layout: Layout::resolve(root, &cfg),
            archive: cfg.archive.enabled && !no_archive,
            cfg,
        }
    }

    /// make a builder over the project
    fn builder(&self) -> Result<Builder> {
        let pipeline = Pipeline::new(self.layout.clone(), &self.cfg)?;
        Ok(Builder::new(pipeline, self.archive))
    }

    /// run a single step for the named theme
    fn step(&self, step: Step, arg: &ThemeArg) -> Result<()> {
        let Some(theme) = resolve_theme(step.command(), arg) else {
            return Ok(());
        };

        self.builder()?.pipeline().run(step, &theme)
    }

    /// copy templates into the named theme
    fn install(&self, command: &str, args: &InstallArgs, templates: &[Template]) -> Result<()> {
        let Some(theme) = resolve_theme(command, &args.theme) else {
            return Ok(());
        };

        let written = scaffold::install(&self.layout, &theme, templates, args.force)?;
        info!("Installed {} files into {}", written.len(), theme);

        Ok(())
    }

    /// print the registered themes, one per line
    fn list(&self) -> Result<()> {
        let registry = {
            let _lock = RegistryLock::shared(&self.layout.registry)?;
            ThemeRegistry::load(&self.layout.registry)?
        };

        if registry.is_empty() {
            info!("No themes found");
        }

        for theme in &registry {
            println!("{}", theme);
        }

        Ok(())
    }

    /// run a command
    pub async fn handle(&self, command: &Command) -> Result<()> {
        match command {
            Command::Add(arg) => {
                if let Some(theme) = resolve_theme("add", arg) {
                    scaffold::add(&self.layout, &theme)?;
                }
                Ok(())
            }
            Command::Build => self.builder()?.build_all().map(drop),
            Command::BuildCss(arg) => self.step(Step::Css, arg),
            Command::BuildJs(arg) => self.step(Step::Js, arg),
            Command::BuildHtml(arg) => self.step(Step::Html, arg),
            Command::BuildFonts(arg) => self.step(Step::Fonts, arg),
            Command::Compress(arg) => self.step(Step::Compress, arg),
            Command::BuildTheme(arg) => {
                if let Some(theme) = resolve_theme("build-theme", arg) {
                    self.builder()?.build_theme(&theme)?;
                }
                Ok(())
            }
            Command::Install(args) => self.install("install", args, &Template::ALL),
            Command::InstallCustomTheme(args) => {
                self.install("install-custom-theme", args, &[Template::Theme])
            }
            Command::InstallCustomVariables(args) => {
                self.install("install-custom-variables", args, &[Template::Variables])
            }
            Command::Watch => {
                watch::watch(Arc::new(self.builder()?), self.cfg.watch.debounce_ms).await
            }
            Command::List => self.list(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::pipeline::testutil::{Project, write},
        std::fs,
    };

    fn handlers(project: &Project) -> Handlers {
        Handlers::new(project.root(), project.cfg.clone(), false)
    }

    fn snapshot(project: &Project) -> Vec<String> {
        let mut files: Vec<String> = walkdir::WalkDir::new(project.root())
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.path().display().to_string())
            .collect();
        files.sort();
        files
    }

    #[tokio::test]
    async fn test_missing_name_is_a_clean_noop() {
        let project = Project::new();
        let handlers = handlers(&project);
        let before = snapshot(&project);

        let nameless = [
            Command::Add(ThemeArg::default()),
            Command::BuildCss(ThemeArg::default()),
            Command::BuildJs(ThemeArg::default()),
            Command::BuildHtml(ThemeArg::default()),
            Command::BuildFonts(ThemeArg::default()),
            Command::BuildTheme(ThemeArg::default()),
            Command::Compress(ThemeArg::default()),
            Command::Install(InstallArgs::default()),
            Command::InstallCustomTheme(InstallArgs::default()),
            Command::InstallCustomVariables(InstallArgs::default()),
        ];

        for command in &nameless {
            handlers.handle(command).await.unwrap();
        }

        assert_eq!(before, snapshot(&project));
    }

    #[tokio::test]
    async fn test_bad_name_is_a_clean_noop() {
        let project = Project::new();
        let before = snapshot(&project);

        let command = Command::Add(ThemeArg {
            theme: None,
            name: Some("../escape".into()),
        });
        handlers(&project).handle(&command).await.unwrap();

        assert_eq!(before, snapshot(&project));
    }

    #[tokio::test]
    async fn test_add_then_build_theme() {
        let project = Project::new();
        let handlers = handlers(&project);
        let arg = ThemeArg {
            theme: Some("dark".into()),
            name: None,
        };

        handlers.handle(&Command::Add(arg.clone())).await.unwrap();
        handlers.handle(&Command::BuildTheme(arg)).await.unwrap();

        assert!(project.root().join("dist/dark/css/theme.min.css").is_file());
        assert!(project.root().join("dist/dark.zip").is_file());
    }

    #[tokio::test]
    async fn test_no_archive_flag() {
        let project = Project::new();
        write(project.root(), "themes.json", "[\"default\"]\n");

        Handlers::new(project.root(), project.cfg.clone(), true)
            .handle(&Command::Build)
            .await
            .unwrap();

        assert!(project.root().join("dist/default/index.html").is_file());
        assert!(!project.root().join("dist/default.zip").exists());
    }

    #[tokio::test]
    async fn test_list_without_registry_writes_nothing() {
        let project = Project::new();
        let before = snapshot(&project);

        handlers(&project).handle(&Command::List).await.unwrap();
        assert_eq!(before, snapshot(&project));
        assert!(!fs::exists(project.root().join("themes.json")).unwrap());
    }
}
