//! Plain-text rendering of instruction HTML for terminals.
//!
//! Handles the small tag vocabulary the dataset uses: paragraphs, headings,
//! ordered and unordered lists, line breaks and inline formatting. Unknown
//! tags are dropped and their text kept.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->|<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").unwrap());

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static EXTRA_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Ordered(usize),
    Unordered,
}

/// Decode the HTML entities found in instruction text.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let hex = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"));
            let decoded = if let Some(hex) = hex {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    "rsquo" => Some('\u{2019}'),
                    "lsquo" => Some('\u{2018}'),
                    "hellip" => Some('\u{2026}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Convert an HTML fragment to readable plain text.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut lists: Vec<ListKind> = Vec::new();
    let mut skipping: Option<String> = None;
    let mut last = 0;

    for caps in TAG.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        if skipping.is_none() {
            push_text(&mut out, &html[last..whole.start()]);
        }
        last = whole.end();

        let Some(name) = caps.get(2) else { continue };
        let name = name.as_str().to_ascii_lowercase();
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());

        if let Some(skipped) = &skipping {
            if closing && *skipped == name {
                skipping = None;
            }
            continue;
        }

        match (name.as_str(), closing) {
            ("script" | "style" | "head", false) => skipping = Some(name.clone()),
            ("br", _) => newline(&mut out),
            ("p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6", _) => blank_line(&mut out),
            ("div" | "figure" | "figcaption" | "blockquote" | "section" | "tr", _) => {
                newline(&mut out)
            }
            ("ol", false) => {
                newline(&mut out);
                lists.push(ListKind::Ordered(0));
            }
            ("ul", false) => {
                newline(&mut out);
                lists.push(ListKind::Unordered);
            }
            ("ol" | "ul", true) => {
                lists.pop();
                newline(&mut out);
            }
            ("li", false) => {
                newline(&mut out);
                let depth = lists.len().max(1);
                out.push_str(&"  ".repeat(depth - 1));
                match lists.last_mut() {
                    Some(ListKind::Ordered(n)) => {
                        *n += 1;
                        out.push_str(&format!("{}. ", n));
                    }
                    _ => out.push_str("• "),
                }
            }
            ("li", true) => newline(&mut out),
            _ => {}
        }
    }
    if skipping.is_none() {
        push_text(&mut out, &html[last..]);
    }

    let trimmed: Vec<&str> = out.lines().map(str::trim_end).collect();
    EXTRA_BLANK_LINES
        .replace_all(&trimmed.join("\n"), "\n\n")
        .trim()
        .to_string()
}

fn push_text(out: &mut String, raw: &str) {
    let text = decode_entities(&WHITESPACE.replace_all(raw, " "));
    let text = if out.is_empty() || out.ends_with('\n') || out.ends_with(' ') {
        text.trim_start()
    } else {
        text.as_str()
    };
    out.push_str(text);
}

fn newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn blank_line(out: &mut String) {
    newline(out);
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Settings &gt; Apps &amp; more"), "Settings > Apps & more");
        assert_eq!(decode_entities("&#39;x&#x27;"), "'x'");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_paragraphs_and_inline() {
        let text = html_to_text("<p>Open <strong>Settings</strong>.</p><p>Then <em>Battery</em>.</p>");
        assert_eq!(text, "Open Settings.\n\nThen Battery.");
    }

    #[test]
    fn test_ordered_list() {
        let text = html_to_text("<h3>Android 11+</h3><ol><li>First</li><li>Second</li></ol>");
        assert_eq!(text, "Android 11+\n\n1. First\n2. Second");
    }

    #[test]
    fn test_nested_unordered_list() {
        let text = html_to_text("<ul><li>A<ul><li>B</li></ul></li><li>C</li></ul>");
        assert_eq!(text, "• A\n  • B\n• C");
    }

    #[test]
    fn test_skips_style_and_comments() {
        let text = html_to_text("<style>body { color: red; }</style><!-- note --><p>Shown</p>");
        assert_eq!(text, "Shown");
    }

    #[test]
    fn test_line_breaks_and_whitespace() {
        let text = html_to_text("Line one<br/>Line   two\n\n  continues");
        assert_eq!(text, "Line one\nLine two continues");
    }
}
