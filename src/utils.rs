//! misc utils
use {
    crate::{
        bail,
        error::{Result, ThemeError},
    },
    serde::Serialize,
    std::{
        fs::{self, File, OpenOptions},
        io::{BufWriter, Write},
        path::{Path, PathBuf},
    },
    tracing::Level,
};

/// convert a string to a log level
///
/// takes a given string and converts it into a [`tracing::Level`] for later use when setting up
/// tracing in the app module (see [`crate::app::logging`])
pub fn string_to_log_level(lvl: &str) -> tracing::Level {
    match lvl.to_lowercase().as_str() {
        "d" | "debug" | "dbg" => Level::DEBUG,
        "t" | "trace" | "trc" => Level::TRACE,
        "e" | "error" | "err" => Level::ERROR,
        "i" | "info" | "inf" => Level::INFO,
        "w" | "warn" | "wrn" => Level::WARN,
        _ => Level::ERROR,
    }
}

/// make sure a directory (and its parents) exists
///
/// returns every directory that had to be created, outermost first, so callers can undo the
/// creation if a later step fails
pub fn ensure_dir(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let missing: Vec<PathBuf> = dir
        .ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
        .map(Path::to_path_buf)
        .collect();

    fs::create_dir_all(dir).map_err(ThemeError::at(dir))?;

    Ok(missing.into_iter().rev().collect())
}

/// copy a single file, attaching the failing path to any error
pub fn copy_file(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<u64> {
    let (from, to) = (from.as_ref(), to.as_ref());

    if !from.is_file() {
        return Err(ThemeError::PathIO {
            path: from.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "source file not found"),
        });
    }

    fs::copy(from, to).map_err(ThemeError::at(to))
}

/// copy a file into a directory, keeping its file name
pub fn copy_into(from: impl AsRef<Path>, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let from = from.as_ref();
    let Some(name) = from.file_name() else {
        bail!("{} doesn't name a file", from.display());
    };
    let target = dir.as_ref().join(name);

    copy_file(from, &target)?;
    Ok(target)
}

/// write compact json followed by a newline
///
/// the data goes to a sibling temp file first, which is then renamed over `path`, so readers
/// never see a half-written file
pub fn write_json_line<T: Serialize>(path: impl AsRef<Path>, data: &T) -> Result<()> {
    let path = path.as_ref();
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp)
            .map_err(ThemeError::at(&tmp))?;
        let mut w = BufWriter::new(file);

        serde_json::to_writer(&mut w, data)?;
        w.write_all(b"\n").map_err(ThemeError::at(&tmp))?;
        w.flush().map_err(ThemeError::at(&tmp))?;
    }

    fs::rename(&tmp, path).map_err(ThemeError::at(path))
}

/// write text to a file, creating or truncating it
pub fn write_text(path: impl AsRef<Path>, text: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(ThemeError::at(path))?;

    file.write_all(text.as_ref()).map_err(ThemeError::at(path))
}

/// a guard that runs a closure when dropped
///
/// used by the [`crate::defer`] macro, and directly wherever a cleanup needs to be cancelled
/// once the guarded work succeeds
pub struct DeferGuard<F: FnOnce()> {
    /// the closure to run
    pub func: Option<F>,
}

impl<F: FnOnce()> DeferGuard<F> {
    /// make a new guard
    pub fn new(func: F) -> Self {
        Self { func: Some(func) }
    }

    /// drop the closure without running it
    pub fn cancel(mut self) {
        self.func = None;
    }
}

impl<F: FnOnce()> Drop for DeferGuard<F> {
    fn drop(&mut self) {
        if let Some(func) = self.func.take() {
            func();
        }
    }
}
