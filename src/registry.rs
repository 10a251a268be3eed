//! theme registry stuff
//!
//! the registry is a compact JSON array of theme names (`["default","dark"]`) kept next to the
//! project. it is append-only: `add` is the only thing that ever writes it.
use {
    crate::{
        error::{Result, ThemeError},
        theme::ThemeName,
        utils::write_json_line,
    },
    fs2::FileExt,
    owo_colors::OwoColorize,
    std::{
        fs::{self, File, OpenOptions},
        io::ErrorKind,
        path::{Path, PathBuf},
    },
    tracing::{debug, warn},
};

/// the theme registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeRegistry {
    /// where the registry is saved
    path: PathBuf,
    /// the registered themes, in registration order
    themes: Vec<ThemeName>,
}

impl ThemeRegistry {
    /// make an empty registry that saves to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            themes: Vec::new(),
        }
    }

    /// load the registry from `path`
    ///
    /// a missing file is an empty registry. so is a malformed one, but that gets logged, since it
    /// usually means somebody's hand edit went wrong. unusable or repeated names are skipped.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let mut registry = Self::empty(path);

        let text = match fs::read_to_string(&registry.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No registry at {}, starting empty", registry.path.display());
                return Ok(registry);
            }
            Err(e) => return Err(ThemeError::at(&registry.path)(e)),
        };

        let names: Vec<String> = match serde_json::from_str(&text) {
            Ok(names) => names,
            Err(e) => {
                warn!(
                    "{} is not a JSON list of theme names ({}), treating it as empty",
                    registry.path.display().magenta(),
                    e
                );
                return Ok(registry);
            }
        };

        for name in names {
            match ThemeName::new(name.clone()) {
                Ok(theme) => {
                    if !registry.append(theme) {
                        warn!("Skipping duplicate theme '{}' in registry", name);
                    }
                }
                Err(e) => warn!("Skipping registry entry: {}", e),
            }
        }

        Ok(registry)
    }

    /// check if a theme is registered
    pub fn contains(&self, name: &ThemeName) -> bool {
        self.themes.contains(name)
    }

    /// register a theme, returns false if it was already registered
    pub fn append(&mut self, name: ThemeName) -> bool {
        if self.contains(&name) {
            return false;
        }

        self.themes.push(name);
        true
    }

    /// write the registry back to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving {} themes to {}", self.len(), self.path.display());
        write_json_line(&self.path, &self.themes)
    }

    /// the path the registry lives at
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// the registered themes
    pub fn names(&self) -> &[ThemeName] {
        &self.themes
    }

    /// iterate over the registered themes
    pub fn iter(&self) -> impl Iterator<Item = &ThemeName> {
        self.themes.iter()
    }

    /// the number of registered themes
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// check if there are no themes
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ThemeRegistry {
    type Item = &'a ThemeName;
    type IntoIter = std::slice::Iter<'a, ThemeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.themes.iter()
    }
}

/// an advisory lock on the registry, released on drop
///
/// the lock lives on a sibling `<registry>.lock` file so the registry itself can be replaced by
/// rename while it's held
#[derive(Debug)]
pub struct RegistryLock {
    /// the locked file
    file: File,
    /// where the lock file is
    path: PathBuf,
}

impl RegistryLock {
    /// block until no one else holds the lock, then take it for writing
    pub fn exclusive(registry: impl AsRef<Path>) -> Result<Self> {
        let path = Self::lock_path(registry.as_ref());
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(ThemeError::at(&path))?;

        FileExt::lock_exclusive(&file).map_err(ThemeError::at(&path))?;
        Ok(Self { file, path })
    }

    /// block until no writer holds the lock, then take it for reading
    ///
    /// readers never create the lock file. if it doesn't exist, nothing has ever written the
    /// registry through themekit and there's nothing to wait for
    pub fn shared(registry: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = Self::lock_path(registry.as_ref());
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ThemeError::at(&path)(e)),
        };

        FileExt::lock_shared(&file).map_err(ThemeError::at(&path))?;
        Ok(Some(Self { file, path }))
    }

    /// `<registry>.lock`
    fn lock_path(registry: &Path) -> PathBuf {
        let mut name = registry.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        registry.with_file_name(name)
    }
}

impl Drop for RegistryLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release {}: {}", self.path.display(), e);
        }
    }
}
