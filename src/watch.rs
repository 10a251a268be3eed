//! rebuilding stylesheets when their sources change
use {
    crate::{
        error::Result,
        layout::Layout,
        orchestrator::Builder,
        registry::ThemeRegistry,
        theme::ThemeName,
    },
    notify_debouncer_mini::{
        DebounceEventResult, Debouncer, new_debouncer,
        notify::{RecommendedWatcher, RecursiveMode, Watcher},
    },
    owo_colors::OwoColorize,
    std::{
        path::{Path, PathBuf},
        sync::Arc,
        time::Duration,
    },
    tokio::sync::mpsc,
    tracing::{debug, error, info, warn},
};

/// check if `path` is a stylesheet with the given extension
fn is_stylesheet(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// watches every registered theme's source directory
pub struct ThemeWatcher {
    /// keeps the watcher alive
    _debouncer: Debouncer<RecommendedWatcher>,
    /// batches of changed stylesheets
    event_rx: mpsc::UnboundedReceiver<Vec<PathBuf>>,
    /// each theme and its source directory
    themes: Vec<(ThemeName, PathBuf)>,
}

impl ThemeWatcher {
    /// start watching the themes in `registry`
    pub fn new(layout: &Layout, registry: &ThemeRegistry, debounce_ms: u64) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let extension = layout.compiler.extension();

        let mut debouncer = new_debouncer(
            Duration::from_millis(debounce_ms),
            move |res: DebounceEventResult| match res {
                Ok(events) => {
                    let changed: Vec<PathBuf> = events
                        .into_iter()
                        .map(|event| event.path)
                        .filter(|path| is_stylesheet(path, extension))
                        .collect();

                    if !changed.is_empty() && event_tx.send(changed).is_err() {
                        debug!("Watch receiver dropped");
                    }
                }
                Err(e) => warn!("Filesystem watch error: {}", e),
            },
        )?;

        let mut themes = Vec::with_capacity(registry.len());
        for theme in registry {
            let dir = layout.theme_src(theme);

            if !dir.is_dir() {
                warn!("{} doesn't exist, not watching it", dir.display().magenta());
                continue;
            }

            debouncer.watcher().watch(&dir, RecursiveMode::Recursive)?;
            debug!("Watching {}", dir.display());
            themes.push((theme.clone(), dir));
        }

        Ok(Self {
            _debouncer: debouncer,
            event_rx,
            themes,
        })
    }

    /// the themes being watched
    pub fn themes(&self) -> impl Iterator<Item = &ThemeName> {
        self.themes.iter().map(|(theme, _)| theme)
    }

    /// find the theme a changed file belongs to
    pub fn theme_for(&self, path: &Path) -> Option<&ThemeName> {
        self.themes
            .iter()
            .find(|(_, dir)| path.starts_with(dir))
            .map(|(theme, _)| theme)
    }

    /// the themes touched by a batch of changes, each once, in watch order
    pub fn affected(&self, changed: &[PathBuf]) -> Vec<ThemeName> {
        self.themes()
            .filter(|theme| {
                changed
                    .iter()
                    .any(|path| self.theme_for(path) == Some(*theme))
            })
            .cloned()
            .collect()
    }

    /// wait for the next batch of changed stylesheets
    ///
    /// returns None once the watcher has stopped
    pub async fn recv(&mut self) -> Option<Vec<PathBuf>> {
        self.event_rx.recv().await
    }
}

/// rebuild the css of some themes, logging failures
///
/// returns how many themes rebuilt cleanly
pub fn rebuild(builder: &Builder, themes: &[ThemeName]) -> usize {
    let mut ok = 0;

    for theme in themes {
        info!("Change detected in {}", theme.cyan());
        match builder.pipeline().build_css(theme) {
            Ok(_) => ok += 1,
            Err(e) => error!("Failed to rebuild {}: {}", theme, e),
        }
    }

    ok
}

/// rebuild a theme's css whenever its stylesheets change, until ctrl+c
///
/// rebuilds run on the blocking pool so ctrl+c is noticed mid-build. failed rebuilds are logged
/// and watching carries on
pub async fn watch(builder: Arc<Builder>, debounce_ms: u64) -> Result<()> {
    let registry = builder.registry()?;

    if registry.is_empty() {
        info!("No themes found");
        return Ok(());
    }

    let mut watcher = ThemeWatcher::new(builder.pipeline().layout(), &registry, debounce_ms)?;
    info!(
        "Watching {} themes, press {} to stop",
        watcher.themes().count().green(),
        "ctrl+c".yellow()
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping watch");
                break;
            }
            changed = watcher.recv() => {
                let Some(changed) = changed else {
                    warn!("Watcher stopped");
                    break;
                };

                let themes = watcher.affected(&changed);
                let builder = Arc::clone(&builder);
                let job = tokio::task::spawn_blocking(move || rebuild(&builder, &themes));

                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        info!("Stopping watch after the current rebuild");
                        break;
                    }
                    done = job => {
                        if let Err(e) = done {
                            error!("Rebuild task failed: {}", e);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::pipeline::testutil::{Project, theme, write},
        std::fs,
    };

    fn registry(project: &Project, names: &[&str]) -> ThemeRegistry {
        let mut registry = ThemeRegistry::empty(project.root().join("themes.json"));
        for name in names {
            registry.append(theme(name));
        }
        registry
    }

    #[test]
    fn test_is_stylesheet() {
        assert!(is_stylesheet(Path::new("a/theme.less"), "less"));
        assert!(is_stylesheet(Path::new("a/THEME.SCSS"), "scss"));
        assert!(!is_stylesheet(Path::new("a/theme.less"), "scss"));
        assert!(!is_stylesheet(Path::new("a/theme"), "less"));
    }

    #[tokio::test]
    async fn test_maps_paths_to_themes() {
        let project = Project::new();
        fs::create_dir_all(project.root().join("src/dark/scss")).unwrap();

        let watcher = ThemeWatcher::new(
            &project.layout(),
            &registry(&project, &["default", "dark", "missing"]),
            50,
        )
        .unwrap();

        let src = project.root().join("src");
        assert_eq!(watcher.themes().count(), 2);
        assert_eq!(
            watcher.theme_for(&src.join("dark/scss/theme.scss")),
            Some(&theme("dark"))
        );
        assert_eq!(watcher.theme_for(&src.join("darker/theme.scss")), None);

        let changed = vec![
            src.join("dark/scss/a.scss"),
            src.join("default/scss/theme.scss"),
            src.join("dark/scss/b.scss"),
        ];
        assert_eq!(
            watcher.affected(&changed),
            vec![theme("default"), theme("dark")]
        );
    }

    #[tokio::test]
    async fn test_reports_stylesheet_changes() {
        let project = Project::new();
        let root = project.root().canonicalize().unwrap();
        let layout = Layout::resolve(&root, &project.cfg);

        let mut watcher =
            ThemeWatcher::new(&layout, &registry(&project, &["default"]), 50).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        write(&root, "src/default/scss/notes.txt", "ignored");
        write(&root, "src/default/scss/theme.scss", ".a { color: red; }\n");

        let changed = tokio::time::timeout(Duration::from_secs(5), watcher.recv())
            .await
            .expect("timed out waiting for a change")
            .expect("watcher stopped");

        assert!(changed.iter().all(|p| is_stylesheet(p, "scss")));
        assert_eq!(watcher.affected(&changed), vec![theme("default")]);
    }

    #[tokio::test]
    async fn test_empty_registry_returns() {
        let project = Project::new();
        let builder = Arc::new(Builder::new(project.pipeline(), false));

        watch(builder, 50).await.unwrap();
        assert!(!project.root().join("dist").exists());
    }

    #[tokio::test]
    async fn test_rebuild_runs_off_the_async_thread() {
        let project = Project::new();
        let builder = Arc::new(Builder::new(project.pipeline(), false));
        let themes = vec![theme("ghost"), theme("default")];

        let job_builder = Arc::clone(&builder);
        let ok = tokio::task::spawn_blocking(move || rebuild(&job_builder, &themes))
            .await
            .unwrap();

        assert_eq!(ok, 1);
        assert!(project.root().join("dist/default/css/theme.css").is_file());
    }
}
