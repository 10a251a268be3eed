//! theme name stuff
use {
    serde::{Deserialize, Serialize},
    std::{fmt, path::Path, str::FromStr},
    thiserror::Error,
};

/// why a theme name was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidName {
    /// no name (or an empty one) was given
    #[error("no theme name given")]
    Missing,

    /// `.` and `..` would escape the theme directory
    #[error("'{0}' is a reserved path segment")]
    Reserved(String),

    /// the name contains a separator or a control character
    #[error("'{0}' contains {1:?}, which can't be used in a directory name")]
    BadChar(String, char),
}

/// the name of a theme
///
/// doubles as a directory name under both the source and output trees, so it has to be a single
/// well-formed path component
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeName(String);

impl ThemeName {
    /// validate and wrap a theme name
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidName> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(InvalidName::Missing);
        }

        if name == "." || name == ".." {
            return Err(InvalidName::Reserved(name));
        }

        if let Some(c) = name
            .chars()
            .find(|c| matches!(c, '/' | '\\') || c.is_control())
        {
            return Err(InvalidName::BadChar(name, c));
        }

        Ok(Self(name))
    }

    /// get the name as a str
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ThemeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for ThemeName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ThemeName {
    type Err = InvalidName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ThemeName {
    type Error = InvalidName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThemeName> for String {
    fn from(value: ThemeName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        for name in ["default", "dark-mode", "cosmo_2", "solar.v3"] {
            assert_eq!(ThemeName::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_rejects_missing() {
        assert_eq!(ThemeName::new(""), Err(InvalidName::Missing));
        assert_eq!(ThemeName::new("   "), Err(InvalidName::Missing));
    }

    #[test]
    fn test_rejects_path_tricks() {
        assert!(matches!(ThemeName::new(".."), Err(InvalidName::Reserved(_))));
        assert!(matches!(
            ThemeName::new("a/b"),
            Err(InvalidName::BadChar(_, '/'))
        ));
        assert!(matches!(
            ThemeName::new("a\\b"),
            Err(InvalidName::BadChar(_, '\\'))
        ));
        assert!(matches!(
            ThemeName::new("a\0b"),
            Err(InvalidName::BadChar(_, '\0'))
        ));
    }

    #[test]
    fn test_serde_validates() {
        let ok: ThemeName = serde_json::from_str("\"paper\"").unwrap();
        assert_eq!(ok.as_str(), "paper");
        assert!(serde_json::from_str::<ThemeName>("\"../etc\"").is_err());
    }
}
