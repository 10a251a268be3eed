//! the fonts step
use {
    crate::{
        error::Result,
        pipeline::Pipeline,
        theme::ThemeName,
        utils::{copy_into, ensure_dir},
    },
    owo_colors::OwoColorize,
    tracing::{debug, info, warn},
};

impl Pipeline {
    /// copy every font matching the configured glob into `<out>/<theme>/fonts/`
    ///
    /// returns how many files were copied
    pub fn copy_fonts(&self, theme: &ThemeName) -> Result<usize> {
        let dir = self.layout().fonts_out(theme);

        info!("Creating {} and files...", dir.display().magenta());
        ensure_dir(&dir)?;

        let mut copied = 0;
        for entry in glob::glob(&self.layout().fonts_glob)? {
            let path = entry?;

            if !path.is_file() {
                continue;
            }

            debug!("Copying {}", path.display());
            copy_into(&path, &dir)?;
            copied += 1;
        }

        if copied == 0 {
            warn!("No fonts matched {}", self.layout().fonts_glob.yellow());
        }

        Ok(copied)
    }
}
