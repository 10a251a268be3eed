//! the compress step
use {
    crate::{
        error::{Result, ThemeError},
        pipeline::Pipeline,
        theme::ThemeName,
        utils::ensure_dir,
    },
    owo_colors::OwoColorize,
    std::{
        fs::File,
        io::{self, BufWriter, ErrorKind},
        path::{Path, PathBuf},
    },
    tracing::{debug, info},
    walkdir::WalkDir,
    zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions},
};

/// zip every file under `dir` into `target`
///
/// entries are added in file name order with a fixed timestamp, so zipping the same tree twice
/// gives the same bytes
pub fn zip_dir(dir: &Path, target: &Path) -> Result<usize> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let file = File::create(target).map_err(ThemeError::at(target))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let mut count = 0;

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = entry.path().strip_prefix(dir).map_err(|e| {
            ThemeError::Other(format!("{} escaped {}: {}", entry.path().display(), dir.display(), e))
        })?;
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            zip.add_directory(name, options.unix_permissions(0o755))?;
            continue;
        }

        debug!("Adding {}", name);
        zip.start_file(name, options)?;
        let mut src = File::open(entry.path()).map_err(ThemeError::at(entry.path()))?;
        io::copy(&mut src, &mut zip).map_err(ThemeError::at(entry.path()))?;
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}

impl Pipeline {
    /// zip `<out>/<theme>/` into `<out>/<theme>.zip`
    ///
    /// the theme has to be built first, a missing output directory is an error
    pub fn compress(&self, theme: &ThemeName) -> Result<PathBuf> {
        let dir = self.layout().theme_out(theme);
        let target = self.layout().archive(theme);

        if !dir.is_dir() {
            return Err(ThemeError::PathIO {
                path: dir,
                source: io::Error::new(ErrorKind::NotFound, "theme has not been built"),
            });
        }

        info!("Compressing into {}...", target.display().magenta());
        ensure_dir(&self.layout().out)?;

        let count = zip_dir(&dir, &target)?;
        debug!("Wrote {} files to {}", count, target.display());

        Ok(target)
    }
}
