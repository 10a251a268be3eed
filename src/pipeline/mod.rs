//! the per-theme build steps
//!
//! every step is independent of the others, writes only below `<out>/<theme>/` (or
//! `<out>/<theme>.zip`), creates the directories it needs, and produces the same bytes when run
//! again on the same inputs
use {
    crate::{
        config::ThemeKitConfig,
        error::Result,
        layout::Layout,
        pipeline::{
            banner::PackageMeta,
            compiler::{StylesheetCompiler, compiler_for},
            css::CssPostProcessor,
        },
        theme::ThemeName,
    },
    std::fmt,
    tracing::debug,
};

pub mod archive;
pub mod banner;
pub mod compiler;
pub mod css;
pub mod fonts;
pub mod html;
pub mod js;

/// a single pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// compile, prefix, banner and minify the stylesheet
    Css,
    /// copy the font files
    Fonts,
    /// copy the vendor scripts
    Js,
    /// copy the preview page
    Html,
    /// zip the theme's output
    Compress,
}

impl Step {
    /// the order a full theme build runs the asset steps in
    pub const BUILD_ORDER: [Step; 4] = [Step::Css, Step::Fonts, Step::Js, Step::Html];

    /// the command that runs only this step
    pub fn command(&self) -> &'static str {
        match self {
            Self::Css => "build-css",
            Self::Fonts => "build-fonts",
            Self::Js => "build-js",
            Self::Html => "build-html",
            Self::Compress => "compress",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Css => "css",
            Self::Fonts => "fonts",
            Self::Js => "js",
            Self::Html => "html",
            Self::Compress => "compress",
        };

        f.write_str(name)
    }
}

/// runs pipeline steps for themes
pub struct Pipeline {
    /// where everything is
    layout: Layout,
    /// turns stylesheet sources into css
    compiler: Box<dyn StylesheetCompiler>,
    /// prefixes and minifies compiled css
    postprocess: CssPostProcessor,
    /// the license banner, if enabled
    banner: Option<String>,
}

impl Pipeline {
    /// make a new pipeline from the config
    ///
    /// the banner is rendered once here, from the package manifest if there is one and from the
    /// `[banner]` config section otherwise
    pub fn new(layout: Layout, cfg: &ThemeKitConfig) -> Result<Self> {
        let banner = if cfg.banner.enable {
            let meta = match PackageMeta::from_manifest(&layout.manifest)? {
                Some(meta) => {
                    debug!("Using banner metadata from {}", layout.manifest.display());
                    meta.or_fallback(&cfg.banner)
                }
                None => PackageMeta::from(&cfg.banner),
            };

            Some(meta.banner())
        } else {
            None
        };

        Ok(Self {
            compiler: compiler_for(&layout, &cfg.css),
            postprocess: CssPostProcessor::new(&cfg.css.browsers)?,
            layout,
            banner,
        })
    }

    /// swap in a different stylesheet compiler
    pub fn with_compiler(mut self, compiler: Box<dyn StylesheetCompiler>) -> Self {
        self.compiler = compiler;
        self
    }

    /// get the layout this pipeline writes to
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// get the rendered banner
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// run one step for a theme
    pub fn run(&self, step: Step, theme: &ThemeName) -> Result<()> {
        match step {
            Step::Css => self.build_css(theme).map(drop),
            Step::Fonts => self.copy_fonts(theme).map(drop),
            Step::Js => self.copy_js(theme).map(drop),
            Step::Html => self.copy_html(theme).map(drop),
            Step::Compress => self.compress(theme).map(drop),
        }
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    //! a throwaway project on disk for pipeline tests
    use {
        crate::{
            config::{ThemeKitConfig, options::CompilerKind},
            layout::Layout,
            pipeline::Pipeline,
            theme::ThemeName,
        },
        std::{fs, path::Path},
        tempfile::TempDir,
    };

    /// the scss every test theme starts from
    pub const THEME_SCSS: &str = "$brand: #337ab7;\n\n.btn {\n  color: $brand;\n  display: flex;\n}\n";

    /// a project with templates, vendor files, fonts and one theme
    pub struct Project {
        /// keeps the directory alive
        pub dir: TempDir,
        /// the project config
        pub cfg: ThemeKitConfig,
    }

    impl Project {
        /// make a project with a `default` theme
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path();

            let mut cfg = ThemeKitConfig::default();
            cfg.css.compiler = CompilerKind::Scss;
            cfg.css.source_dir = "scss".to_string();
            cfg.css.entry = "theme.scss".to_string();
            cfg.paths.theme_template = "misc/theme.scss".into();
            cfg.paths.variables_template = "node_modules/bootstrap/scss/_variables.scss".into();
            cfg.banner.author = "Jane Doe".to_string();
            cfg.banner.repository = "https://example.com/themes".to_string();

            write(root, "misc/index.html", "<!doctype html><title>preview</title>\n");
            write(root, "misc/theme.scss", THEME_SCSS);
            write(
                root,
                "node_modules/bootstrap/scss/_variables.scss",
                "$brand: #000 !default;\n",
            );
            write(root, "node_modules/bootstrap/dist/js/bootstrap.js", "/* bs */\n");
            write(root, "node_modules/bootstrap/dist/js/bootstrap.min.js", "/*bs*/");
            write(root, "node_modules/bootstrap/dist/fonts/icons.woff", "woff");
            write(root, "node_modules/bootstrap/dist/fonts/icons.ttf", "ttf");
            write(root, "src/default/scss/theme.scss", THEME_SCSS);

            Self { dir, cfg }
        }

        /// the project root
        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        /// the resolved layout
        pub fn layout(&self) -> Layout {
            Layout::resolve(self.root(), &self.cfg)
        }

        /// a pipeline over this project
        pub fn pipeline(&self) -> Pipeline {
            Pipeline::new(self.layout(), &self.cfg).unwrap()
        }
    }

    /// write a file, creating parents
    pub fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// shorthand for a valid theme name
    pub fn theme(name: &str) -> ThemeName {
        ThemeName::new(name).unwrap()
    }
}
