//! Plain-text extraction from feed markup

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a feed article summary, in characters
pub const SUMMARY_MAX_CHARS: usize = 320;

static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->")
        .expect("script/style pattern compiles")
});

static IMG_SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img[^>]+src\s*=\s*["']([^"']+)["']"#).expect("img pattern compiles")
});

/// Tags that separate words when rendered
const BLOCK_TAGS: &[&str] = &[
    "p", "br", "div", "li", "ul", "ol", "tr", "td", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote", "figure", "figcaption", "section", "article",
];

/// Convert an HTML fragment into collapsed plain text.
///
/// Script and style blocks are dropped with their contents, remaining tags are
/// stripped and entities decoded.
pub fn html_to_text(html: &str) -> String {
    let without_blocks = SCRIPT_STYLE_RE.replace_all(html, " ");

    let mut result = String::with_capacity(without_blocks.len());
    let mut tag = String::new();
    let mut in_tag = false;

    for c in without_blocks.chars() {
        match c {
            '<' if !in_tag => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                if is_block_tag(&tag) {
                    result.push(' ');
                }
            }
            _ if in_tag => tag.push(c),
            _ => result.push(c),
        }
    }

    let decoded = html_escape::decode_html_entities(&result);
    collapse_whitespace(&decoded.replace('\u{a0}', " "))
}

/// Decode entities in a title and collapse its whitespace
pub fn clean_title(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    collapse_whitespace(&decoded)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap text at `max_chars`, appending an ellipsis when cut
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

/// Extract the first non-tracking `<img src>` from an HTML fragment
pub fn extract_image_from_html(html: &str) -> Option<String> {
    IMG_SRC_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|url| !url.is_empty() && !is_tracking_image(url))
        .map(|url| html_escape::decode_html_entities(url).into_owned())
}

/// Tracking pixels and spacers, judged by file name only
fn is_tracking_image(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default().to_lowercase();
    let stem = file.split('.').next().unwrap_or_default();
    matches!(stem, "pixel" | "spacer" | "blank" | "1x1" | "transparent" | "tracker")
        || stem.ends_with("_1x1")
        || stem.ends_with("-1x1")
}

fn is_block_tag(tag: &str) -> bool {
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}
