//! Text helpers for turning story fields into something safe to print.

static BLOCK_TAG_RE: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::Regex::new(r"(?i)</?(p|br|pre|li|ul|ol|div|blockquote)\b[^>]*>")
        .expect("valid block tag regex")
});

static TAG_RE: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"<[^>]*>").expect("valid tag regex"));

static WHITESPACE_RE: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"\s+").expect("valid whitespace regex"));

const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];

pub(crate) fn escape_html(text: &str) -> String {
    // The attribute encoder covers `& < > "` but leaves single quotes alone.
    html_escape::encode_double_quoted_attribute(text).replace('\'', "&#039;")
}

/// Story text from the API is HTML. Block tags become a space, inline tags
/// are dropped, entities decoded and whitespace collapsed.
pub(crate) fn html_to_plain_text(html: &str) -> String {
    let text = BLOCK_TAG_RE.replace_all(html, " ");
    let text = TAG_RE.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);

    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Cuts `text` to at most `max_length` characters. Prefers ending on the last
/// sentence if it ends past 70% of the budget, otherwise appends `...`.
pub(crate) fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let cut: Vec<char> = text.chars().take(max_length).collect();

    let last_sentence_end = cut.iter().rposition(|c| SENTENCE_ENDINGS.contains(c));

    match last_sentence_end {
        Some(idx) if idx as f64 > max_length as f64 * 0.7 => cut[..=idx].iter().collect(),
        _ => {
            let mut truncated: String = cut.into_iter().collect();
            truncated.push_str("...");
            truncated
        }
    }
}

/// Plain text excerpt of a story's body, escaped for the page.
pub(crate) fn format_story_text(text: &str, max_length: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    escape_html(&truncate_text(&html_to_plain_text(text), max_length))
}

pub(crate) fn domain_from_url(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.replacen("www.", "", 1)))
        .unwrap_or_default()
}
