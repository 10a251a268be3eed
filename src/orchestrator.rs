//! building whole themes, and every registered theme
use {
    crate::{
        error::Result,
        pipeline::{Pipeline, Step},
        registry::{RegistryLock, ThemeRegistry},
        theme::ThemeName,
    },
    owo_colors::OwoColorize,
    std::time::Instant,
    tracing::{debug, info},
};

/// what a multi-theme build did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// the themes that were built, in build order
    pub built: Vec<ThemeName>,
}

impl BuildSummary {
    /// check if nothing was built
    pub fn is_empty(&self) -> bool {
        self.built.is_empty()
    }
}

/// runs the full pipeline for one or all themes
pub struct Builder {
    /// the steps
    pipeline: Pipeline,
    /// whether a full build ends with the compress step
    archive: bool,
}

impl Builder {
    /// make a new builder
    pub fn new(pipeline: Pipeline, archive: bool) -> Self {
        Self { pipeline, archive }
    }

    /// get the underlying pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// load the registry under a shared lock
    pub fn registry(&self) -> Result<ThemeRegistry> {
        let path = &self.pipeline.layout().registry;
        let _lock = RegistryLock::shared(path)?;

        ThemeRegistry::load(path)
    }

    /// the steps a full build of one theme runs
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = Step::BUILD_ORDER.to_vec();

        if self.archive {
            steps.push(Step::Compress);
        }

        steps
    }

    /// build a single theme, stopping at the first step that fails
    pub fn build_theme(&self, theme: &ThemeName) -> Result<()> {
        let started = Instant::now();
        defer! {
            debug!("{} finished after {:?}", theme, started.elapsed());
        }

        info!("Building theme {}...", theme.cyan());
        for step in self.steps() {
            debug!("Running {} for {}", step, theme);
            self.pipeline.run(step, theme)?;
        }

        Ok(())
    }

    /// build every registered theme, in registration order
    ///
    /// the registry is read once up front. with no themes registered nothing is written at all
    pub fn build_all(&self) -> Result<BuildSummary> {
        let registry = self.registry()?;
        let mut summary = BuildSummary::default();

        if registry.is_empty() {
            info!("No themes found");
            return Ok(summary);
        }

        for theme in &registry {
            self.build_theme(theme)?;
            summary.built.push(theme.clone());
        }

        info!("Built {} themes", summary.built.len().green());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::pipeline::testutil::{Project, theme, write},
        std::fs,
    };

    fn builder(project: &Project) -> Builder {
        Builder::new(project.pipeline(), project.cfg.archive.enabled)
    }

    #[test]
    fn test_build_all_end_to_end() {
        let project = Project::new();
        write(project.root(), "themes.json", "[\"default\"]\n");

        let summary = builder(&project).build_all().unwrap();
        assert_eq!(summary.built, vec![theme("default")]);

        let out = project.root().join("dist/default");
        for file in [
            "index.html",
            "css/theme.css",
            "css/theme.min.css",
            "js/vendor.js",
            "js/vendor.min.js",
            "fonts/icons.woff",
        ] {
            assert!(out.join(file).is_file(), "missing {file}");
        }
        assert!(
            fs::read_to_string(out.join("css/theme.css"))
                .unwrap()
                .starts_with("/*!")
        );
        assert!(project.root().join("dist/default.zip").is_file());
    }

    #[test]
    fn test_empty_registry_writes_nothing() {
        let project = Project::new();
        let before: Vec<_> = fs::read_dir(project.root()).unwrap().map(|e| e.unwrap().path()).collect();

        let summary = builder(&project).build_all().unwrap();
        assert!(summary.is_empty());

        let after: Vec<_> = fs::read_dir(project.root()).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(before.len(), after.len());
        assert!(!project.root().join("dist").exists());
    }

    #[test]
    fn test_no_archive() {
        let project = Project::new();
        let builder = Builder::new(project.pipeline(), false);

        assert_eq!(builder.steps(), Step::BUILD_ORDER.to_vec());
        builder.build_theme(&theme("default")).unwrap();
        assert!(!project.root().join("dist/default.zip").exists());
    }

    #[test]
    fn test_failing_step_stops_the_theme() {
        let project = Project::new();
        let err = builder(&project).build_theme(&theme("ghost"));

        assert!(err.is_err());
        assert!(!project.root().join("dist/ghost/index.html").exists());
    }
}
