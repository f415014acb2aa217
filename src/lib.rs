//! Theme configuration for a static blog, plus the small renderer that
//! shows what each setting does.
//!
//! The configuration is a plain [ThemeConfig] record. Load it once at startup
//! with [ThemeConfig::load_or_default], [install] it, and read it anywhere
//! through [theme_config].

pub mod assets;
pub mod config;
pub mod date;
pub mod error;
pub mod logging;
pub mod models;
pub mod parser;
pub mod render;

pub use config::{install, theme_config, ThemeConfig};
pub use date::{format_date, DateFormat, DateSeparator};
pub use error::ConfigError;
