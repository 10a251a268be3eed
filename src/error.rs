//! error handling stuff
use {std::path::PathBuf, thiserror::Error};

#[derive(Debug, Error)]
/// An error
pub enum ThemeError {
    /// an IO error that isn't tied to a specific path
    #[error("i/o error: {0}")]
    IO(#[from] std::io::Error),

    /// an IO error on a known path
    #[error("i/o error on {}: {source}", .path.display())]
    PathIO {
        /// the path being read/written
        path: PathBuf,
        /// the underlying error
        source: std::io::Error,
    },

    /// a json error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// the stylesheet compiler failed
    #[error("failed to compile {}: {message}", .entry.display())]
    Compile {
        /// the stylesheet entry point
        entry: PathBuf,
        /// what the compiler said
        message: String,
    },

    /// prefixing or minifying the compiled css failed
    #[error("css processing error: {0}")]
    Css(String),

    /// an invalid browserslist query
    #[error("invalid browser targets: {0}")]
    Browserslist(String),

    /// an invalid glob pattern
    #[error("glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// a glob match that couldn't be read
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// a zip error
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// a directory walk error
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// a filesystem watcher error
    #[error("watch error: {0}")]
    Watch(#[from] notify_debouncer_mini::notify::Error),

    /// a custom error
    #[error("error: {0}")]
    Other(String),
}

impl ThemeError {
    /// make a closure that attaches `path` to an io error
    pub fn at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::PathIO { path, source }
    }
}

impl From<String> for ThemeError {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

/// A result using [`ThemeError`] as the `Err` variant
pub type Result<T, U = ThemeError> = std::result::Result<T, U>;

/// bail
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::ThemeError::from(String::from($msg)))
    };

    ($err:expr $(,)?) => {
        return Err($crate::error::ThemeError::from($err))
    };

    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::ThemeError::from(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_io_mentions_path() {
        let err = ThemeError::at("dist/default/css")(std::io::Error::from(
            std::io::ErrorKind::PermissionDenied,
        ));

        assert!(err.to_string().contains("dist/default/css"));
    }

    #[test]
    fn test_bail_formats() {
        fn fails(name: &str) -> Result<()> {
            bail!("theme '{}' is broken", name);
        }

        let err = fails("dark").unwrap_err();
        assert_eq!(err.to_string(), "error: theme 'dark' is broken");
    }
}
