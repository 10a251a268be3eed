//! license banner stuff
use {
    crate::{
        config::options::BannerConfig,
        error::{Result, ThemeError},
    },
    chrono::Datelike,
    serde::Deserialize,
    std::{fs, io::ErrorKind, path::Path},
};

/// a field that's either a plain string or an object carrying the string under some key
///
/// package.json allows both `"author": "Jane"` and `"author": {"name": "Jane"}`, same for
/// `repository` with `url`
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum StringOrObject {
    /// `"value"`
    Plain(String),
    /// `{"name": "value"}` / `{"url": "value"}`
    Object {
        /// the author's name
        #[serde(default)]
        name: Option<String>,
        /// the repository url
        #[serde(default)]
        url: Option<String>,
    },
}

impl StringOrObject {
    /// get the interesting string out
    fn into_string(self) -> Option<String> {
        match self {
            Self::Plain(s) => Some(s),
            Self::Object { name, url } => url.or(name),
        }
    }
}

/// the subset of a package.json the banner needs
#[derive(Deserialize, Debug, Default)]
struct Manifest {
    /// the package name
    name: Option<String>,
    /// the package description
    description: Option<String>,
    /// the package version
    version: Option<String>,
    /// the author
    author: Option<StringOrObject>,
    /// the license
    license: Option<String>,
    /// the repository
    repository: Option<StringOrObject>,
}

/// package metadata shown in the banner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMeta {
    /// the package name
    pub name: String,
    /// a short description
    pub description: String,
    /// the package version
    pub version: String,
    /// who wrote it
    pub author: String,
    /// the license
    pub license: String,
    /// where it lives
    pub repository: String,
}

impl PackageMeta {
    /// read metadata from a package.json, or None if there isn't one
    pub fn from_manifest(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ThemeError::at(path)(e)),
        };

        let manifest: Manifest = serde_json::from_str(&text)?;

        Ok(Some(Self {
            name: manifest.name.unwrap_or_default(),
            description: manifest.description.unwrap_or_default(),
            version: manifest.version.unwrap_or_default(),
            author: manifest
                .author
                .and_then(StringOrObject::into_string)
                .unwrap_or_default(),
            license: manifest.license.unwrap_or_default(),
            repository: manifest
                .repository
                .and_then(StringOrObject::into_string)
                .unwrap_or_default(),
        }))
    }

    /// fill any field the manifest left empty from the config
    pub fn or_fallback(self, cfg: &BannerConfig) -> Self {
        let pick = |own: String, fallback: &String| {
            if own.is_empty() {
                fallback.clone()
            } else {
                own
            }
        };

        Self {
            name: pick(self.name, &cfg.name),
            description: pick(self.description, &cfg.description),
            version: pick(self.version, &cfg.version),
            author: pick(self.author, &cfg.author),
            license: pick(self.license, &cfg.license),
            repository: pick(self.repository, &cfg.repository),
        }
    }

    /// render the banner for the current year
    pub fn banner(&self) -> String {
        self.banner_for_year(chrono::Local::now().year())
    }

    /// render the banner for a given year
    pub fn banner_for_year(&self, year: i32) -> String {
        [
            "/*!".to_string(),
            format!(" * Copyright (c) {} {}", year, self.author),
            format!(
                " * {} - {} - Based on Bootstrap",
                self.name, self.description
            ),
            format!(" * @version v{}", self.version),
            format!(" * @link {}", self.repository),
            format!(" * @license {}", self.license),
            " */".to_string(),
            String::new(),
        ]
        .join("\n")
    }
}

impl From<&BannerConfig> for PackageMeta {
    fn from(cfg: &BannerConfig) -> Self {
        Self {
            name: cfg.name.clone(),
            description: cfg.description.clone(),
            version: cfg.version.clone(),
            author: cfg.author.clone(),
            license: cfg.license.clone(),
            repository: cfg.repository.clone(),
        }
    }
}
