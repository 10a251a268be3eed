//! creating new themes and refreshing their templates
use {
    crate::{
        error::Result,
        layout::Layout,
        registry::{RegistryLock, ThemeRegistry},
        theme::ThemeName,
        utils::{DeferGuard, copy_into, ensure_dir},
    },
    owo_colors::OwoColorize,
    std::{
        fs,
        path::{Path, PathBuf},
    },
    tracing::{debug, info, warn},
};

/// what `add` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// the theme was created, its stylesheets live in the given directory
    Added(PathBuf),
    /// a theme by that name is already registered, nothing was touched
    AlreadyExists,
}

/// which templates to copy into a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// the base variables stylesheet
    Variables,
    /// the base theme stylesheet
    Theme,
}

impl Template {
    /// both templates, in the order `add` copies them
    pub const ALL: [Template; 2] = [Template::Variables, Template::Theme];

    /// where this template comes from
    pub fn source<'a>(&self, layout: &'a Layout) -> &'a Path {
        match self {
            Self::Variables => &layout.variables_template,
            Self::Theme => &layout.theme_template,
        }
    }
}

/// remove the directories an unfinished `add` created, innermost first
fn remove_created(created: &[PathBuf]) {
    for dir in created.iter().rev() {
        debug!("Removing {}", dir.display());
        if let Err(e) = fs::remove_dir_all(dir) {
            warn!("Failed to clean up {}: {}", dir.display(), e);
        }
    }
}

/// create a new theme from the templates and register it
///
/// if anything fails after the theme directory is created, the directories made by this call are
/// removed again and the registry is left as it was
pub fn add(layout: &Layout, theme: &ThemeName) -> Result<AddOutcome> {
    let _lock = RegistryLock::exclusive(&layout.registry)?;
    let mut registry = ThemeRegistry::load(&layout.registry)?;

    if registry.contains(theme) {
        warn!("{}", format!("'{}' already exists", theme).red());
        return Ok(AddOutcome::AlreadyExists);
    }

    info!("Initializing new '{}' theme...", theme.cyan());

    let dir = layout.stylesheet_dir(theme);
    info!("Creating {}...", dir.display().magenta());
    let created = ensure_dir(&dir)?;
    let rollback = DeferGuard::new(|| remove_created(&created));

    for template in Template::ALL {
        let copied = copy_into(template.source(layout), &dir)?;
        info!("Created {}", copied.display().magenta());
    }

    info!("Saving {}...", registry.path().display().magenta());
    registry.append(theme.clone());
    registry.save()?;

    rollback.cancel();
    Ok(AddOutcome::Added(dir))
}

/// copy templates into an already registered theme
///
/// files that are already there are kept unless `force` is set. returns the files written, which
/// is empty for an unregistered theme
pub fn install(
    layout: &Layout,
    theme: &ThemeName,
    templates: &[Template],
    force: bool,
) -> Result<Vec<PathBuf>> {
    let registry = {
        let _lock = RegistryLock::shared(&layout.registry)?;
        ThemeRegistry::load(&layout.registry)?
    };

    if !registry.contains(theme) {
        warn!(
            "'{}' is not a registered theme, add it first with {}",
            theme,
            format!("themekit add --name {}", theme).blue()
        );
        return Ok(Vec::new());
    }

    let dir = layout.stylesheet_dir(theme);
    ensure_dir(&dir)?;

    let mut written = Vec::new();
    for template in templates {
        let source = template.source(layout);
        let target = dir.join(source.file_name().unwrap_or_default());

        if target.exists() && !force {
            warn!(
                "Keeping existing {} (use --force to overwrite)",
                target.display().magenta()
            );
            continue;
        }

        info!("Creating {}...", target.display().magenta());
        written.push(copy_into(source, &dir)?);
    }

    Ok(written)
}
