//! Command line front end for `tmconf-core`.
//!
//! - [`settings`]: TOML settings with embedded defaults
//! - [`inspect`]: key tree and diagnostics rendering

pub mod inspect;
pub mod settings;
