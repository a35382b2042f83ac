//! Tweet text normalisation.
//!
//! The substitutions run in a fixed order; each step assumes the earlier ones
//! already ran.

use regex::Regex;
use std::sync::LazyLock;

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
static RE_MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());
static RE_NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z\s]").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalise tweet text: drop URLs and mentions, keep hashtag words without
/// the `#`, keep only ASCII letters, lowercase, and collapse whitespace.
///
/// The result only contains `[a-z ]` with single interior spaces, and
/// `clean_text(&clean_text(s)) == clean_text(s)`.
pub fn clean_text(text: &str) -> String {
    let text = RE_URL.replace_all(text, "");
    let text = RE_MENTION.replace_all(&text, "");
    let text = text.replace('#', "");
    let text = RE_NON_ALPHA.replace_all(&text, "");
    let text = text.to_lowercase();
    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}
