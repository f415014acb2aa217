//! Configuration logic for the theme.
//!
//! This module handles the deserialization of `theme.toml` and provides the
//! theme's literal defaults for any missing fields. It is structured into four
//! groups (Site, General, Date and Post) mirroring the tables of the file.
//!
//! The configuration is built once at startup and then shared read-only for
//! the rest of the process via [install] and [theme_config].

use crate::date::{DateFormat, DateSeparator};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, sync::OnceLock};
use tracing::{debug, info};

/// The root configuration schema of the theme.
///
/// Keys are camelCase in `theme.toml` and in the serialized form handed to
/// templates, e.g. `config.general.contentWidth`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Identity of the site, used for page metadata.
    pub site: SiteSettings,

    /// Layout and behavior toggles shared by every page.
    pub general: GeneralSettings,

    /// How post dates are printed and aligned.
    pub date: DateSettings,

    /// Features enabled on individual post pages.
    pub post: PostSettings,
}

/// Metadata describing the website for SEO purposes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteSettings {
    /// The canonical origin of the site (e.g., "https://example.com/").
    pub website: String,

    /// The name of the website, used in `<title>` tags.
    pub title: String,

    /// The author name shown in metadata and the footer.
    pub author: String,

    /// A short description of the site for meta tags.
    pub description: String,

    /// Default content language tag, emitted as `<html lang>`.
    pub language: String,
}

/// Layout toggles.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneralSettings {
    /// Maximum width of the content column, as a CSS length.
    pub content_width: String,

    /// Center the content column. Left-aligned when false.
    pub centered_layout: bool,

    /// Show a manual light/dark switch. The system theme is used otherwise.
    pub theme_toggle: bool,

    /// Use a dotted divider between rows of the post list.
    pub post_list_dotted_divider: bool,

    /// Render the page footer.
    pub footer: bool,

    /// Fade pages in on load.
    pub fade_animation: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DateSettings {
    pub date_format: DateFormat,

    /// Only used by the numeric formats.
    pub date_separator: DateSeparator,

    /// Place dates on the right of post list rows.
    pub date_on_right: bool,
}

/// Per-post feature flags.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PostSettings {
    /// Show the estimated reading time.
    pub reading_time: bool,

    /// Show a table of contents when there is enough page width.
    pub toc: bool,

    /// Open images in a lightbox.
    pub image_viewer: bool,

    /// Add a copy button to code blocks.
    pub copy_code: bool,

    /// Render bare links as preview cards.
    pub link_card: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            website: "https://jameshartig.dev/".to_string(),
            title: "James Hartig".to_string(),
            author: "James Hartig".to_string(),
            description: "The technical blog of James Hartig. Deep dives into real-world \
                          engineering challenges and technology explorations."
                .to_string(),
            language: "en-US".to_string(),
        }
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            content_width: "48rem".to_string(),
            centered_layout: false,
            theme_toggle: false,
            post_list_dotted_divider: false,
            footer: true,
            fade_animation: false,
        }
    }
}

impl Default for DateSettings {
    fn default() -> Self {
        Self {
            date_format: DateFormat::YearMonthDay,
            date_separator: DateSeparator::Dash,
            date_on_right: true,
        }
    }
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            reading_time: false,
            toc: false,
            image_viewer: false,
            copy_code: true,
            link_card: false,
        }
    }
}

impl ThemeConfig {
    /// Parses a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(src)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&src).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded theme config");
        Ok(config)
    }

    /// Like [ThemeConfig::load], but a missing file yields the default record.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no theme config found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

/// Advisory notes about a configuration that loaded successfully.
///
/// `src` is the raw file the configuration came from, used to tell explicit
/// settings apart from defaults. Notes never make a configuration invalid.
pub fn lint(src: &str, config: &ThemeConfig) -> Vec<String> {
    let mut notes = Vec::new();

    let explicit_separator = src
        .parse::<toml::Table>()
        .map(|t| t.get("date").and_then(|d| d.get("dateSeparator")).is_some())
        .unwrap_or(false);

    if explicit_separator && !config.date.date_format.is_numeric() {
        notes.push(format!(
            "date.dateSeparator is ignored by the `{}` date format",
            config.date.date_format
        ));
    }
    notes
}

static THEME: OnceLock<ThemeConfig> = OnceLock::new();

/// Installs the process-wide configuration. Only the first call succeeds.
pub fn install(config: ThemeConfig) -> Result<&'static ThemeConfig, ConfigError> {
    THEME.set(config).map_err(|_| ConfigError::AlreadyInstalled)?;
    Ok(theme_config())
}

/// The process-wide configuration; the default record if none was installed.
pub fn theme_config() -> &'static ThemeConfig {
    THEME.get_or_init(ThemeConfig::default)
}
