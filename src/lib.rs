//! themekit builds, packages and watches Bootstrap-based CSS themes
//!
//! themes are registered in a small JSON file, their stylesheets live under `<src>/<theme>/` and
//! every build lands in `<out>/<theme>/` (plus `<out>/<theme>.zip`)
#![forbid(
    clippy::missing_docs_in_private_items,
    missing_docs,
    rustdoc::missing_crate_level_docs
)]

#[macro_use]
pub mod macros;

pub mod app;
pub mod config;
pub mod error;
pub mod layout;
pub mod orchestrator;
pub mod pipeline;
pub mod registry;
pub mod scaffold;
pub mod theme;
pub mod utils;
pub mod watch;
