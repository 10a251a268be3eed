//! stylesheet compilers
use {
    crate::{
        config::options::{CompilerKind, CssConfig},
        error::{Result, ThemeError},
        layout::Layout,
    },
    std::{
        fs,
        path::{Path, PathBuf},
        process::Command,
    },
    tracing::debug,
};

/// something that turns a stylesheet entry point into css
pub trait StylesheetCompiler: Send + Sync {
    /// compile `entry` (and whatever it imports) to css
    fn compile(&self, entry: &Path) -> Result<String>;

    /// a short name for logs
    fn name(&self) -> &'static str;
}

/// pick the compiler the config asks for
pub fn compiler_for(layout: &Layout, css: &CssConfig) -> Box<dyn StylesheetCompiler> {
    match layout.compiler {
        CompilerKind::Less => Box::new(LessCompiler {
            command: css.less_command.clone(),
            args: css.less_args.clone(),
            load_paths: layout.load_paths.clone(),
        }),
        CompilerKind::Scss => Box::new(ScssCompiler {
            load_paths: layout.load_paths.clone(),
        }),
    }
}

/// compiles LESS by running an external `lessc`
#[derive(Debug, Clone)]
pub struct LessCompiler {
    /// the program to run
    pub command: String,
    /// extra arguments passed before the entry file
    pub args: Vec<String>,
    /// extra `--include-path` directories
    pub load_paths: Vec<PathBuf>,
}

impl StylesheetCompiler for LessCompiler {
    fn compile(&self, entry: &Path) -> Result<String> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);

        if !self.load_paths.is_empty() {
            let joined = std::env::join_paths(&self.load_paths).map_err(|e| {
                ThemeError::Other(format!("bad less include path: {}", e))
            })?;
            let mut arg = std::ffi::OsString::from("--include-path=");
            arg.push(joined);
            cmd.arg(arg);
        }

        cmd.arg(entry);
        debug!("Running {:?}", cmd);

        let output = cmd.output().map_err(ThemeError::at(&self.command))?;

        if !output.status.success() {
            return Err(ThemeError::Compile {
                entry: entry.to_path_buf(),
                message: format!(
                    "{} exited with {}: {}",
                    self.command,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| ThemeError::Compile {
            entry: entry.to_path_buf(),
            message: format!("{} printed invalid utf-8: {}", self.command, e),
        })
    }

    fn name(&self) -> &'static str {
        "less"
    }
}

/// compiles SCSS in-process with grass
#[derive(Debug, Clone, Default)]
pub struct ScssCompiler {
    /// extra `@use`/`@import` directories, searched after the entry's own directory
    pub load_paths: Vec<PathBuf>,
}

impl StylesheetCompiler for ScssCompiler {
    fn compile(&self, entry: &Path) -> Result<String> {
        let source = fs::read_to_string(entry).map_err(ThemeError::at(entry))?;

        let mut load_paths: Vec<PathBuf> = entry.parent().map(Path::to_path_buf).into_iter().collect();
        load_paths.extend(self.load_paths.iter().cloned());

        let options = grass::Options::default()
            .style(grass::OutputStyle::Expanded)
            .load_paths(&load_paths);

        grass::from_string(source, &options).map_err(|e| ThemeError::Compile {
            entry: entry.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "scss"
    }
}
