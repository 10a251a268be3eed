//! the css step
use {
    crate::{
        error::{Result, ThemeError},
        pipeline::Pipeline,
        theme::ThemeName,
        utils::{ensure_dir, write_text},
    },
    lightningcss::{
        stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet},
        targets::{Browsers, Targets},
    },
    owo_colors::OwoColorize,
    std::{
        path::PathBuf,
        sync::{Arc, RwLock},
    },
    tracing::{info, warn},
};

/// compiled css, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedCss {
    /// prefixed, readable css
    pub expanded: String,
    /// prefixed, minified css
    pub minified: String,
}

/// vendor prefixing and minification
///
/// declarations lightningcss can't parse (old IE hacks like `*zoom: 1`) are dropped with a warning
/// instead of failing the build. IE-only `filter` values (`alpha(...)`, `progid:...`) get a
/// `-webkit-filter` twin when the targets need one, which browsers ignore
#[derive(Debug, Clone, Copy, Default)]
pub struct CssPostProcessor {
    /// the browsers to prefix for
    targets: Targets,
}

impl CssPostProcessor {
    /// make a post-processor for some browserslist queries
    ///
    /// an empty list means no prefixing at all
    pub fn new(browsers: &[String]) -> Result<Self> {
        let browsers = if browsers.is_empty() {
            None
        } else {
            Browsers::from_browserslist(browsers.iter())
                .map_err(|e| ThemeError::Browserslist(e.to_string()))?
        };

        Ok(Self {
            targets: Targets {
                browsers,
                ..Targets::default()
            },
        })
    }

    /// prefix css and produce both the readable and minified forms
    pub fn process(&self, css: &str) -> Result<ProcessedCss> {
        let warnings = Arc::new(RwLock::new(Vec::new()));
        let options = ParserOptions {
            error_recovery: true,
            warnings: Some(Arc::clone(&warnings)),
            ..ParserOptions::default()
        };

        let mut sheet =
            StyleSheet::parse(css, options).map_err(|e| ThemeError::Css(e.to_string()))?;

        if let Ok(warnings) = warnings.read() {
            for w in warnings.iter() {
                warn!("Skipping invalid css: {}", w);
            }
        }

        sheet
            .minify(MinifyOptions {
                targets: self.targets,
                ..MinifyOptions::default()
            })
            .map_err(|e| ThemeError::Css(e.to_string()))?;

        let expanded = sheet
            .to_css(PrinterOptions {
                targets: self.targets,
                ..PrinterOptions::default()
            })
            .map_err(|e| ThemeError::Css(e.to_string()))?
            .code;

        let minified = sheet
            .to_css(PrinterOptions {
                minify: true,
                targets: self.targets,
                ..PrinterOptions::default()
            })
            .map_err(|e| ThemeError::Css(e.to_string()))?
            .code;

        Ok(ProcessedCss { expanded, minified })
    }
}

/// stick the banner on top and make sure the file ends in a newline
fn with_banner(banner: Option<&str>, css: &str) -> String {
    let mut out = String::with_capacity(css.len() + 256);

    if let Some(banner) = banner {
        out.push_str(banner);
    }

    out.push_str(css);

    if !out.ends_with('\n') {
        out.push('\n');
    }

    out
}

impl Pipeline {
    /// compile a theme's stylesheet into `<out>/<theme>/css/`
    ///
    /// returns the paths of the unminified and minified files
    pub fn build_css(&self, theme: &ThemeName) -> Result<(PathBuf, PathBuf)> {
        let layout = self.layout();
        let entry = layout.stylesheet_entry(theme);
        let dir = layout.css_out(theme);

        info!("Creating {}...", dir.display().magenta());
        ensure_dir(&dir)?;

        info!(
            "Compiling {} with {}...",
            entry.display().magenta(),
            self.compiler.name()
        );
        let compiled = self.compiler.compile(&entry)?;
        let processed = self.postprocess.process(&compiled)?;

        let expanded = dir.join(&layout.css_output);
        let minified = dir.join(&layout.css_minified_output);

        info!("Writing CSS files to {}...", dir.display().magenta());
        write_text(&expanded, with_banner(self.banner(), &processed.expanded))?;
        write_text(&minified, with_banner(self.banner(), &processed.minified))?;

        Ok((expanded, minified))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::pipeline::testutil::{Project, theme},
        std::fs,
    };

    fn old_browsers() -> CssPostProcessor {
        CssPostProcessor::new(&["safari >= 6".to_string(), "ie >= 10".to_string()]).unwrap()
    }

    #[test]
    fn test_prefixes_for_old_browsers() {
        let out = old_browsers()
            .process(".a { display: flex; user-select: none; }")
            .unwrap();

        assert!(out.expanded.contains("-webkit-"));
        assert!(out.minified.contains("-webkit-"));
        assert!(out.minified.len() < out.expanded.len());
    }

    #[test]
    fn test_no_browsers_no_prefixes() {
        let out = CssPostProcessor::new(&[])
            .unwrap()
            .process(".a { user-select: none; }")
            .unwrap();

        assert!(!out.expanded.contains("-webkit-"));
    }

    #[test]
    fn test_old_ie_hacks_dont_fail_the_build() {
        let out = old_browsers()
            .process(".clearfix { *zoom: 1; }\n.a { color: red; }\n")
            .unwrap();

        assert!(out.minified.contains(".a{color:red}"));
    }

    #[test]
    fn test_ie_filters_survive() {
        let out = old_browsers()
            .process(".btn { filter: alpha(opacity=65); }")
            .unwrap();

        assert!(out.minified.contains("filter:alpha(opacity=65)"));
    }

    #[test]
    fn test_bad_queries() {
        assert!(matches!(
            CssPostProcessor::new(&["not a browser at all 9000".to_string()]),
            Err(ThemeError::Browserslist(_))
        ));
    }

    #[test]
    fn test_build_css_writes_both_files_with_banner() {
        let project = Project::new();
        let (expanded, minified) = project.pipeline().build_css(&theme("default")).unwrap();

        let expanded = fs::read_to_string(expanded).unwrap();
        let minified = fs::read_to_string(minified).unwrap();

        assert!(expanded.starts_with("/*!\n * Copyright (c) "));
        assert!(expanded.contains("Jane Doe"));
        assert!(expanded.contains(".btn"));
        assert!(minified.starts_with("/*!\n"));
        assert!(minified.contains(".btn{"));
        assert!(project.root().join("dist/default/css/theme.css").is_file());
        assert!(project.root().join("dist/default/css/theme.min.css").is_file());
    }

    #[test]
    fn test_build_css_missing_source() {
        let project = Project::new();
        let err = project.pipeline().build_css(&theme("ghost")).unwrap_err();

        assert!(matches!(err, ThemeError::PathIO { .. }));
    }
}
