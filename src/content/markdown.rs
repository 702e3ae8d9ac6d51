//! Markdown rendering with syntax highlighting

use anyhow::{anyhow, Result};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;

/// Theme used when the configured name is not bundled
const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
    wrap: bool,
}

impl MarkdownRenderer {
    /// Create a renderer for the configured highlight theme
    pub fn new(config: &HighlightConfig) -> Result<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        let name = bundled_theme_name(&config.theme);

        let theme = match theme_set.themes.remove(name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(
                    "Highlight theme {:?} is not available, using {}",
                    config.theme,
                    FALLBACK_THEME
                );
                theme_set
                    .themes
                    .remove(FALLBACK_THEME)
                    .ok_or_else(|| anyhow!("No highlight themes available"))?
            }
        };

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            wrap: config.wrap,
        })
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is stripped by the loader, so YAML metadata blocks stay off
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => lang
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme)
        {
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                format!("<pre><code>{}</code></pre>", html_escape(code))
            }
        };

        let highlighted = if self.wrap {
            add_wrap_style(&highlighted)
        } else {
            highlighted
        };

        format!(
            r#"<div class="highlight" data-language="{}">{}</div>"#,
            html_escape(lang),
            highlighted
        )
    }
}

/// Map editor theme names to the closest theme bundled with syntect
fn bundled_theme_name(name: &str) -> &str {
    match name {
        "github-dark" | "github-dark-dimmed" | "one-dark-pro" | "dracula" => "base16-ocean.dark",
        "github-light" | "github" => "InspiredGitHub",
        "solarized-dark" => "Solarized (dark)",
        "solarized-light" => "Solarized (light)",
        other => other,
    }
}

/// Soft-wrap long lines on the outer `<pre>`
fn add_wrap_style(html: &str) -> String {
    const WRAP: &str = "white-space: pre-wrap; word-wrap: break-word;";

    if let Some(rest) = html.strip_prefix(r#"<pre style=""#) {
        format!(r#"<pre style="{} {}"#, WRAP, rest)
    } else if let Some(rest) = html.strip_prefix("<pre>") {
        format!(r#"<pre style="{}">{}"#, WRAP, rest)
    } else {
        html.to_string()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(wrap: bool) -> MarkdownRenderer {
        MarkdownRenderer::new(&HighlightConfig {
            theme: "github-dark".to_string(),
            wrap,
        })
        .unwrap()
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = renderer(true).render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let html = renderer(false).render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"data-language="rust""#));
        assert!(html.contains("main"));
        assert!(!html.contains("pre-wrap"));
    }

    #[test]
    fn test_wrap_adds_style() {
        let html = renderer(true).render("```\nlet a = 1;\n```");
        assert!(html.contains("white-space: pre-wrap"));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let renderer = MarkdownRenderer::new(&HighlightConfig {
            theme: "no-such-theme".to_string(),
            wrap: false,
        });
        assert!(renderer.is_ok());
    }

    #[test]
    fn test_text_after_code_block_is_kept() {
        let html = renderer(false).render("```\ncode\n```\n\nAfter the block.");
        assert!(html.contains("<p>After the block.</p>"));
    }
}
