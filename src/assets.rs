//! Files compiled into the binary: the default `theme.toml` and the page
//! templates.

use anyhow::Context;
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Asset;

/// Returns an embedded file as UTF-8 text.
pub fn text(name: &str) -> anyhow::Result<String> {
    let file = Asset::get(name).with_context(|| format!("embedded asset `{}` is missing", name))?;
    let text = std::str::from_utf8(&file.data)
        .with_context(|| format!("embedded asset `{}` is not UTF-8", name))?;
    Ok(text.to_string())
}

/// The `theme.toml` written by `init`, equal to the default record.
pub fn default_config() -> anyhow::Result<String> {
    text("theme.toml")
}

/// Embedded templates as `(name, source)` pairs, named without the
/// `templates/` prefix.
pub fn templates() -> anyhow::Result<Vec<(String, String)>> {
    Asset::iter()
        .filter_map(|path| {
            path.strip_prefix("templates/")
                .map(|name| (name.to_string(), path.to_string()))
        })
        .map(|(name, path)| text(&path).map(|src| (name, src)))
        .collect()
}
