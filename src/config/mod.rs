//! configuration stuff
pub mod options;
pub mod validate;

pub use options::ThemeKitConfig;
