use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Angle-bracket spans with their contents, e.g. `<laugh>`, `<ts>`.
    static ref ANGLE_SPAN: Regex = Regex::new(r"<[^>]+>").unwrap();
    /// Redaction spans, e.g. `/RD-NAME-2/`.
    static ref REDACTION: Regex = Regex::new(r"/RD-[^/]+/").unwrap();
    /// Single-word parenthesized descriptors, e.g. `(breathy)`.
    static ref PAREN_DESCRIPTOR: Regex = Regex::new(r"\([a-zA-Z]+\)").unwrap();
}

/// Clean one utterance content field into plain text.
///
/// Returns `None` for lines that contribute nothing: empty content and pause
/// markers. Otherwise returns the cleaned text, which may still be empty if
/// the line was markup only.
///
/// This is the single shared cleaning pass; [`tokenize_utterance`] builds on
/// its output, so text extraction and word counting see the same markup
/// stripping.
pub fn clean_utterance(content: &str) -> Option<String> {
    if content.is_empty() || content.starts_with("(pause") {
        return None;
    }

    // Keep bracketed text, drop the brackets themselves.
    let cleaned = content.replace(['[', ']'], "");
    let cleaned = ANGLE_SPAN.replace_all(&cleaned, "");
    let cleaned = REDACTION.replace_all(&cleaned, "");
    let cleaned = PAREN_DESCRIPTOR.replace_all(&cleaned, "");

    Some(collapse_whitespace(&cleaned))
}

/// Tokenize one utterance content field into countable words.
///
/// Post-processes the cleaned form from [`clean_utterance`]: residual markup
/// characters become token boundaries, and anything that still looks like a
/// redaction marker is dropped.
pub fn tokenize_utterance(content: &str) -> Vec<String> {
    let Some(cleaned) = clean_utterance(content) else {
        return Vec::new();
    };

    cleaned
        .replace(['<', '[', ']', '/'], " ")
        .split_whitespace()
        .filter(|w| !w.starts_with("RD-"))
        .map(str::to_string)
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
