//! the html step
use {
    crate::{
        error::Result,
        pipeline::Pipeline,
        theme::ThemeName,
        utils::{copy_file, ensure_dir},
    },
    owo_colors::OwoColorize,
    std::path::PathBuf,
    tracing::info,
};

/// the preview page's name in the output
pub const INDEX_HTML: &str = "index.html";

impl Pipeline {
    /// copy the preview page to `<out>/<theme>/index.html`
    pub fn copy_html(&self, theme: &ThemeName) -> Result<PathBuf> {
        let dir = self.layout().theme_out(theme);

        info!("Creating HTML in {}...", dir.display().magenta());
        ensure_dir(&dir)?;

        let target = dir.join(INDEX_HTML);
        copy_file(&self.layout().html_template, &target)?;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            error::ThemeError,
            pipeline::testutil::{Project, theme},
        },
        std::fs,
    };

    #[test]
    fn test_copies_template() {
        let project = Project::new();
        let target = project.pipeline().copy_html(&theme("default")).unwrap();

        assert_eq!(target, project.root().join("dist/default/index.html"));
        assert_eq!(
            fs::read_to_string(target).unwrap(),
            "<!doctype html><title>preview</title>\n"
        );
    }

    #[test]
    fn test_missing_template() {
        let project = Project::new();
        fs::remove_file(project.root().join("misc/index.html")).unwrap();

        let err = project.pipeline().copy_html(&theme("default")).unwrap_err();
        assert!(matches!(err, ThemeError::PathIO { .. }));
        assert!(err.to_string().contains("index.html"));
    }
}
