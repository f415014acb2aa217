use serde::Serialize;

/// A Markdown post with its front matter pulled out.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    /// Raw front matter date, empty when absent.
    pub date: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub raw_content: String,
}

/// One heading of a post's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    pub text: String,
}

/// A post body converted to HTML.
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    pub html: String,
    /// Empty unless the table of contents is enabled.
    pub toc: Vec<TocEntry>,
}
