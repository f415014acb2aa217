use crate::{
    config::PostSettings,
    date::parse_date,
    models::{Post, RenderedMarkdown, TocEntry},
};
use anyhow::Context;
use pulldown_cmark::{html, CodeBlockKind, Event, LinkType, Options, Parser, Tag, TagEnd};
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path};
use tracing::{debug, warn};

/// Average reading speed used for the reading time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

const COPY_BUTTON: &str =
    "<div class=\"code-block\"><button class=\"copy-code\" type=\"button\" aria-label=\"Copy code\">Copy</button>\n";

#[derive(Debug, Deserialize, Default)]
struct TomlFrontmatter {
    title: Option<String>,
    date: Option<FrontmatterDate>,
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// A `+++` date, written either as a bare TOML datetime or as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FrontmatterDate {
    Datetime(toml::value::Datetime),
    Text(String),
}

impl FrontmatterDate {
    fn into_string(self) -> String {
        match self {
            FrontmatterDate::Datetime(dt) => dt.to_string(),
            FrontmatterDate::Text(s) => s,
        }
    }
}

/// Splits `raw` into the block between two `fence` lines and the rest.
///
/// Both fences must sit on a line of their own.
fn split_frontmatter<'a>(raw: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let mut lines = raw.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != fence {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == fence {
            return Some((&raw[start..offset], &raw[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parses front matter from a file and returns a Post struct.
///
/// `---` blocks are read as simple `key: value` lines, `+++` blocks as TOML.
pub fn parse_frontmatter(raw: &str, slug: &str) -> Post {
    let (mut title, mut date, mut description, mut tags) = (slug.to_string(), String::new(), None, Vec::new());
    let mut content = raw.to_string();

    if let Some((block, body)) = split_frontmatter(raw, "---") {
        for line in block.lines() {
            if let Some((k, v)) = line.split_once(':') {
                let v = v.trim().trim_matches('"');
                match k.trim() {
                    "title" => title = v.to_string(),
                    "date" => date = v.to_string(),
                    "description" => description = Some(v.to_string()),
                    "tags" => {
                        tags = v
                            .trim_start_matches('[')
                            .trim_end_matches(']')
                            .split(',')
                            .map(|s| s.trim().trim_matches('"').to_string())
                            .filter(|s| !s.is_empty())
                            .collect();
                    }
                    _ => {}
                }
            }
        }
        content = body.trim().to_string();
    } else if let Some((block, body)) = split_frontmatter(raw, "+++") {
        match toml::from_str::<TomlFrontmatter>(block) {
            Ok(fm) => {
                if let Some(t) = fm.title {
                    title = t;
                }
                date = fm.date.map(FrontmatterDate::into_string).unwrap_or_default();
                description = fm.description;
                tags = fm.tags;
            }
            Err(e) => warn!(slug, error = %e, "ignoring invalid TOML front matter"),
        }
        content = body.trim().to_string();
    }

    Post {
        slug: slug.to_string(),
        title,
        date,
        description,
        tags,
        raw_content: content,
    }
}

/// Reads every `*.md` file in `dir`, newest first. Undated posts sort last.
pub fn load_posts(dir: &Path) -> anyhow::Result<Vec<Post>> {
    let mut posts = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().map(|s| s == "md").unwrap_or(false) {
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
            posts.push(parse_frontmatter(&raw, slug));
        }
    }
    debug!(count = posts.len(), dir = %dir.display(), "loaded posts");

    posts.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date)).then_with(|| a.slug.cmp(&b.slug)));
    Ok(posts)
}

/// Rewrites single events for the copyCode and imageViewer features.
///
/// Images that already sit inside a link are left alone so anchors never nest.
struct FeatureRewriter<'f> {
    features: &'f PostSettings,
    link_depth: usize,
    image_wrapped: bool,
}

impl<'f> FeatureRewriter<'f> {
    fn new(features: &'f PostSettings) -> Self {
        Self { features, link_depth: 0, image_wrapped: false }
    }

    fn push<'a>(&mut self, event: &Event<'a>, out: &mut Vec<Event<'a>>) {
        match event {
            Event::Start(Tag::Link { .. }) => {
                self.link_depth += 1;
                out.push(event.clone());
            }
            Event::End(TagEnd::Link) => {
                self.link_depth = self.link_depth.saturating_sub(1);
                out.push(event.clone());
            }
            Event::Start(Tag::CodeBlock(kind)) if self.features.copy_code => {
                if let CodeBlockKind::Fenced(lang) = kind {
                    debug!(lang = %lang, "wrapping code block");
                }
                out.push(Event::Html(COPY_BUTTON.into()));
                out.push(event.clone());
            }
            Event::End(TagEnd::CodeBlock) if self.features.copy_code => {
                out.push(event.clone());
                out.push(Event::Html("</div>\n".into()));
            }
            Event::Start(Tag::Image { dest_url, .. }) if self.features.image_viewer && self.link_depth == 0 => {
                self.image_wrapped = true;
                out.push(Event::InlineHtml(
                    format!("<a class=\"image-viewer\" href=\"{}\">", escape_html(dest_url)).into(),
                ));
                out.push(event.clone());
            }
            Event::End(TagEnd::Image) if self.image_wrapped => {
                self.image_wrapped = false;
                out.push(event.clone());
                out.push(Event::InlineHtml("</a>".into()));
            }
            _ => out.push(event.clone()),
        }
    }
}

/// Renders Markdown to HTML, applying the enabled post features.
pub fn render_markdown(md: &str, features: &PostSettings) -> RenderedMarkdown {
    let events: Vec<Event> = Parser::new_ext(md, Options::all()).collect();

    let mut out = Vec::with_capacity(events.len());
    let mut toc = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut rewriter = FeatureRewriter::new(features);
    let mut i = 0;

    while i < events.len() {
        if features.link_card {
            if let Some(card) = link_card_at(&events[i..]) {
                out.push(Event::Html(card.into()));
                i += 5;
                continue;
            }
        }

        match &events[i] {
            // Headings are re-emitted by hand so they carry anchor ids
            Event::Start(Tag::Heading { level, id, .. }) if features.toc => {
                let level = *level;
                let mut inner = Vec::new();
                let mut text = String::new();
                let mut j = i + 1;
                while j < events.len() && !matches!(events[j], Event::End(TagEnd::Heading(_))) {
                    if let Event::Text(t) | Event::Code(t) = &events[j] {
                        text.push_str(t);
                    }
                    rewriter.push(&events[j], &mut inner);
                    j += 1;
                }

                let anchor = match id {
                    Some(id) => {
                        seen_ids.insert(id.to_string());
                        id.to_string()
                    }
                    None => unique_slug(&text, &mut seen_ids),
                };
                let mut inner_html = String::new();
                html::push_html(&mut inner_html, inner.into_iter());
                out.push(Event::Html(
                    format!("<{level} id=\"{}\">{inner_html}</{level}>\n", escape_html(&anchor)).into(),
                ));

                let depth = level as u8;
                if (2..=4).contains(&depth) {
                    toc.push(TocEntry { level: depth, id: anchor, text: text.trim().to_string() });
                }
                i = j + 1;
                continue;
            }
            event => rewriter.push(event, &mut out),
        }
        i += 1;
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, out.into_iter());
    RenderedMarkdown { html: html_output, toc }
}

/// Matches a paragraph made of a single bare link and returns its card markup.
fn link_card_at(events: &[Event]) -> Option<String> {
    let [
        Event::Start(Tag::Paragraph),
        Event::Start(Tag::Link { link_type, dest_url, .. }),
        Event::Text(text),
        Event::End(TagEnd::Link),
        Event::End(TagEnd::Paragraph),
        ..
    ] = events
    else {
        return None;
    };

    let bare = matches!(link_type, LinkType::Autolink) || **text == **dest_url;
    if !bare || !(dest_url.starts_with("http://") || dest_url.starts_with("https://")) {
        return None;
    }

    let url = escape_html(dest_url);
    Some(format!(
        "<a class=\"link-card\" href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">\
         <span class=\"link-card-host\">{}</span>\
         <span class=\"link-card-url\">{url}</span></a>\n",
        escape_html(url_host(dest_url)),
    ))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn url_host(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let host = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    host.strip_prefix("www.").unwrap_or(host)
}

/// Lowercase, hyphen-separated anchor id for a heading.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Slug for `text` that is not in `seen` yet; records the result.
fn unique_slug(text: &str, seen: &mut HashSet<String>) -> String {
    let mut base = slugify(text);
    if base.is_empty() {
        base = "section".to_string();
    }
    let mut slug = base.clone();
    let mut n = 1;
    while seen.contains(&slug) {
        slug = format!("{}-{}", base, n);
        n += 1;
    }
    seen.insert(slug.clone());
    slug
}

/// Strips Markdown syntax to produce clean plain text.
pub fn strip_markdown(md: &str) -> String {
    let parser = Parser::new(md);
    let mut plain_text = String::new();

    for event in parser {
        match event {
            Event::Text(text) | Event::Code(text) => {
                plain_text.push_str(&text);
                plain_text.push(' ');
            }
            _ => {}
        }
    }
    plain_text.trim().to_string()
}

/// Estimated minutes to read a Markdown document, never less than one.
pub fn reading_time(md: &str) -> u32 {
    let words = strip_markdown(md).split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}
