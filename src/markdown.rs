//! Description Markdown
//!
//! Renders card descriptions with pulldown-cmark, plus:
//! - Custom color syntax: %r%red%r%
//! - Syntax highlighting for fenced code (syntect)
//! - Raw HTML in the source is shown as text, never injected

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME: OnceLock<Option<Theme>> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> Option<&'static Theme> {
    THEME
        .get_or_init(|| ThemeSet::load_defaults().themes.remove("InspiredGitHub"))
        .as_ref()
}

/// Color codes and their hex values
const COLORS: &[(&str, &str)] = &[
    ("r", "#e74c3c"), // red
    ("g", "#27ae60"), // green
    ("b", "#3498db"), // blue
    ("y", "#f1c40f"), // yellow
    ("o", "#e67e22"), // orange
    ("p", "#9b59b6"), // purple
];

/// Render a description to HTML
pub fn render_description(text: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
    let events = transform_events(Parser::new_ext(text, options));
    let mut html = String::new();
    push_html(&mut html, events.into_iter());
    html
}

/// First non-empty line as plain text, for card tiles
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    let line = line.trim_start_matches(|c| c == '#' || c == '-' || c == '>' || c == ' ');
    if line.chars().count() > max_chars {
        let cut: String = line.chars().take(max_chars).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut code: Option<(Option<String>, String)> = None;

    for event in parser {
        if let Some((lang, content)) = code.as_mut() {
            match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    code = None;
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                    _ => None,
                };
                code = Some((lang, String::new()));
            }
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
            Event::Text(text) if has_color_marker(&text) => events.extend(color_events(&text)),
            other => events.push(other),
        }
    }
    events
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = syntax_set();
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    theme()
        .and_then(|theme| highlighted_html_for_string(code, ss, syntax, theme).ok())
        .unwrap_or_else(|| format!("<pre><code>{}</code></pre>", escape_html(code)))
}

fn has_color_marker(text: &str) -> bool {
    COLORS.iter().any(|(code, _)| text.contains(&format!("%{}%", code)))
}

/// Split text on %x%...%x% markers into colored spans
fn color_events(text: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut remaining = text;

    loop {
        let earliest = COLORS
            .iter()
            .filter_map(|(code, color)| {
                let pattern = format!("%{}%", code);
                remaining.find(&pattern).map(|pos| (pos, pattern, *color))
            })
            .min_by_key(|(pos, _, _)| *pos);

        let Some((pos, pattern, color)) = earliest else {
            if !remaining.is_empty() {
                events.push(Event::Text(CowStr::from(remaining.to_string())));
            }
            break;
        };

        if pos > 0 {
            events.push(Event::Text(CowStr::from(remaining[..pos].to_string())));
        }
        let after = &remaining[pos + pattern.len()..];
        match after.find(&pattern) {
            Some(end) => {
                events.push(Event::Html(CowStr::from(format!("<span style=\"color: {}\">", color))));
                events.push(Event::Text(CowStr::from(after[..end].to_string())));
                events.push(Event::Html(CowStr::from("</span>")));
                remaining = &after[end + pattern.len()..];
            }
            None => {
                // Unclosed marker - keep it literally
                events.push(Event::Text(CowStr::from(pattern)));
                remaining = after;
            }
        }
    }
    events
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_syntax() {
        let html = render_description("status: %r%blocked%r% now");
        assert!(html.contains("<span style=\"color: #e74c3c\">blocked</span>"));
        assert!(html.contains("status: "));
    }

    #[test]
    fn test_unclosed_color_marker_is_literal() {
        let html = render_description("50%g% done");
        assert!(html.contains("50%g% done"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_description("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_task_list_renders() {
        let html = render_description("- [x] done\n- [ ] todo");
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("\n## Goal\nmore", 20), "Goal");
        assert_eq!(excerpt("abcdefghij", 4), "abcd…");
        assert_eq!(excerpt("", 4), "");
    }
}
