//! Page rendering driven by the theme configuration.
//!
//! Templates are embedded in the binary and rendered with Tera. Every page
//! receives the whole [ThemeConfig] as `config`, so templates read settings
//! with the same camelCase keys used in `theme.toml`.

use crate::{
    assets,
    config::{DateSettings, ThemeConfig},
    date::{format_date, parse_date},
    models::Post,
    parser,
};
use anyhow::Context as _;
use chrono::{Datelike, Utc};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

/// A post as seen by templates, with its date already formatted.
#[derive(Debug, Serialize)]
struct PostView<'a> {
    title: &'a str,
    slug: &'a str,
    url: String,
    /// Formatted for display, empty when the post has no valid date.
    date: String,
    /// ISO date for `<time datetime>`.
    datetime: String,
    tags: &'a [String],
}

impl<'a> PostView<'a> {
    fn new(post: &'a Post, settings: &DateSettings) -> Self {
        let parsed = parse_date(&post.date);
        Self {
            title: &post.title,
            slug: &post.slug,
            url: format!("{}.html", post.slug),
            date: parsed.map(|d| format_date(d, settings)).unwrap_or_default(),
            datetime: parsed.map(|d| d.to_string()).unwrap_or_default(),
            tags: &post.tags,
        }
    }
}

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Builds a renderer from the embedded templates.
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        let templates = assets::templates()?;
        debug!(count = templates.len(), "registering templates");
        tera.add_raw_templates(templates).context("failed to load embedded templates")?;
        Ok(Self { tera })
    }

    /// Renders a single post page.
    pub fn render_post(&self, config: &ThemeConfig, post: &Post) -> anyhow::Result<String> {
        let body = parser::render_markdown(&post.raw_content, &config.post);
        let reading_time = config.post.reading_time.then(|| parser::reading_time(&post.raw_content));

        let mut ctx = self.base_context(config, Some(&post.title), &format!("{}.html", post.slug));
        if let Some(description) = &post.description {
            ctx.insert("description", description);
        }
        ctx.insert("post", &PostView::new(post, &config.date));
        ctx.insert("content", &body.html);
        ctx.insert("toc", &body.toc);
        ctx.insert("reading_time", &reading_time);

        self.render("post.html", &ctx)
    }

    /// Renders the post list page.
    pub fn render_index(&self, config: &ThemeConfig, posts: &[Post]) -> anyhow::Result<String> {
        let views: Vec<_> = posts.iter().map(|p| PostView::new(p, &config.date)).collect();

        let mut ctx = self.base_context(config, None, "");
        ctx.insert("posts", &views);

        self.render("list.html", &ctx)
    }

    fn base_context(&self, config: &ThemeConfig, page_title: Option<&str>, path: &str) -> Context {
        let mut ctx = Context::new();
        ctx.insert("config", config);
        ctx.insert("page_title", &page_title);
        ctx.insert("description", &config.site.description);
        ctx.insert("canonical_url", &canonical_url(&config.site.website, path));
        ctx.insert("year", &Utc::now().year());
        ctx
    }

    fn render(&self, template: &str, ctx: &Context) -> anyhow::Result<String> {
        self.tera
            .render(template, ctx)
            .with_context(|| format!("failed to render {}", template))
    }
}

fn canonical_url(website: &str, path: &str) -> String {
    format!("{}/{}", website.trim_end_matches('/'), path.trim_start_matches('/'))
}
