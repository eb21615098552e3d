//! Article export formats: plain text (legacy layout), Markdown and HTML.

use std::str::FromStr;

use maud::{html, DOCTYPE};

use crate::article;
use crate::legacy;

/// A downloadable rendering of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Txt,
    Md,
    Html,
}

/// A format name that matches no [`ExportFormat`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported export format '{0}' (expected one of: txt, md, html)")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    /// Case-insensitive; also accepts `text`, `markdown` and `htm`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Txt),
            "md" | "markdown" => Ok(Self::Md),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Html => "html",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain; charset=utf-8",
            Self::Md => "text/markdown; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
        }
    }
}

/// The fields an export needs, borrowed from whatever record holds them.
#[derive(Debug, Clone, Copy)]
pub struct ExportSource<'a> {
    pub title: &'a str,
    pub url: Option<&'a str>,
    pub content: &'a str,
}

/// Render `source` in `format`.
pub fn render(source: ExportSource<'_>, format: ExportFormat) -> String {
    match format {
        ExportFormat::Txt => legacy::render(source.title, source.content),
        ExportFormat::Md => render_markdown(source),
        ExportFormat::Html => render_html(source),
    }
}

/// Download file name for an export.
pub fn file_name(title: &str, format: ExportFormat) -> String {
    format!("{}.{}", article::file_stem(title), format.extension())
}

fn render_markdown(source: ExportSource<'_>) -> String {
    let mut out = format!("# {}\n\n", source.title);
    if let Some(url) = source.url.filter(|u| !u.is_empty()) {
        out.push_str(&format!("Source: <{url}>\n\n"));
    }
    out.push_str(source.content);
    out.push('\n');
    out
}

fn render_html(source: ExportSource<'_>) -> String {
    let paragraphs = source
        .content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty());

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (source.title) }
            }
            body {
                h1 { (source.title) }
                @if let Some(url) = source.url.filter(|u| !u.is_empty()) {
                    p { "Source: " a href=(url) { (url) } }
                }
                @for paragraph in paragraphs {
                    p { (paragraph) }
                }
            }
        }
    }
    .into_string()
}
