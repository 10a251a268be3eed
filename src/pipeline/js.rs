//! the js step
use {
    crate::{
        error::Result,
        pipeline::Pipeline,
        theme::ThemeName,
        utils::{copy_file, ensure_dir},
    },
    owo_colors::OwoColorize,
    std::path::PathBuf,
    tracing::{debug, info},
};

impl Pipeline {
    /// copy the vendor scripts into `<out>/<theme>/js/`
    pub fn copy_js(&self, theme: &ThemeName) -> Result<Vec<PathBuf>> {
        let dir = self.layout().js_out(theme);

        info!("Creating {} and files...", dir.display().magenta());
        ensure_dir(&dir)?;

        self.layout()
            .js_files
            .iter()
            .map(|spec| {
                let target = dir.join(&spec.target);
                debug!("{} -> {}", spec.source.display(), target.display());
                copy_file(&spec.source, &target).map(|_| target)
            })
            .collect()
    }
}
