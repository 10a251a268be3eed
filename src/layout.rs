//! where everything lives on disk
use {
    crate::{
        config::{
            ThemeKitConfig,
            options::{CompilerKind, CopySpec},
        },
        theme::ThemeName,
    },
    std::path::{Path, PathBuf},
};

/// the project's configured paths, resolved against the project root
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// the project root everything else is relative to
    pub root: PathBuf,
    /// the theme registry file
    pub registry: PathBuf,
    /// the theme source tree
    pub src: PathBuf,
    /// the output tree
    pub out: PathBuf,
    /// the html page copied into each theme
    pub html_template: PathBuf,
    /// the base theme stylesheet
    pub theme_template: PathBuf,
    /// the base variables stylesheet
    pub variables_template: PathBuf,
    /// the package manifest used for the banner
    pub manifest: PathBuf,
    /// vendor scripts and their target names
    pub js_files: Vec<CopySpec>,
    /// the font glob, as an absolute pattern
    pub fonts_glob: String,
    /// extra stylesheet load paths
    pub load_paths: Vec<PathBuf>,
    /// the stylesheet directory name inside a theme
    pub source_dir: String,
    /// the stylesheet entry file name
    pub entry: String,
    /// the unminified css file name
    pub css_output: String,
    /// the minified css file name
    pub css_minified_output: String,
    /// the stylesheet language
    pub compiler: CompilerKind,
}

impl Layout {
    /// resolve every configured path against `root`
    pub fn resolve(root: impl AsRef<Path>, cfg: &ThemeKitConfig) -> Self {
        let root = root.as_ref().to_path_buf();
        let at = |p: &PathBuf| root.join(p);
        let paths = &cfg.paths;

        let fonts_glob = if Path::new(&cfg.fonts.glob).is_absolute() {
            cfg.fonts.glob.clone()
        } else {
            let base = glob::Pattern::escape(&root.to_string_lossy());
            format!("{}/{}", base.trim_end_matches('/'), cfg.fonts.glob)
        };

        Self {
            registry: at(&paths.registry),
            src: at(&paths.src),
            out: at(&paths.out),
            html_template: at(&paths.html_template),
            theme_template: at(&paths.theme_template),
            variables_template: at(&paths.variables_template),
            manifest: at(&paths.manifest),
            js_files: cfg
                .js
                .files
                .iter()
                .map(|spec| CopySpec::new(at(&spec.source), spec.target.clone()))
                .collect(),
            fonts_glob,
            load_paths: cfg.css.load_paths.iter().map(at).collect(),
            source_dir: cfg.css.source_dir.clone(),
            entry: cfg.css.entry.clone(),
            css_output: cfg.css.output.clone(),
            css_minified_output: cfg.css.minified_output.clone(),
            compiler: cfg.css.compiler,
            root,
        }
    }

    /// `<src>/<theme>/`
    pub fn theme_src(&self, theme: &ThemeName) -> PathBuf {
        self.src.join(theme)
    }

    /// `<src>/<theme>/<stylesheet dir>/`
    pub fn stylesheet_dir(&self, theme: &ThemeName) -> PathBuf {
        self.theme_src(theme).join(&self.source_dir)
    }

    /// the stylesheet entry point of a theme
    pub fn stylesheet_entry(&self, theme: &ThemeName) -> PathBuf {
        self.stylesheet_dir(theme).join(&self.entry)
    }

    /// `<out>/<theme>/`
    pub fn theme_out(&self, theme: &ThemeName) -> PathBuf {
        self.out.join(theme)
    }

    /// `<out>/<theme>/css/`
    pub fn css_out(&self, theme: &ThemeName) -> PathBuf {
        self.theme_out(theme).join("css")
    }

    /// `<out>/<theme>/js/`
    pub fn js_out(&self, theme: &ThemeName) -> PathBuf {
        self.theme_out(theme).join("js")
    }

    /// `<out>/<theme>/fonts/`
    pub fn fonts_out(&self, theme: &ThemeName) -> PathBuf {
        self.theme_out(theme).join("fonts")
    }

    /// `<out>/<theme>.zip`
    pub fn archive(&self, theme: &ThemeName) -> PathBuf {
        self.out.join(format!("{}.zip", theme))
    }
}
