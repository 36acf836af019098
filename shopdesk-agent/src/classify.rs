//! Maps backend failures to messages that are safe to show a customer.

use std::fmt::Display;
use std::sync::OnceLock;

use regex::Regex;

pub const RATE_LIMIT_MESSAGE: &str =
    "I'm currently experiencing high demand. Please wait a moment and try again.";
pub const AUTHENTICATION_MESSAGE: &str =
    "There seems to be an issue with the API authentication. Please contact support.";
pub const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again with a shorter message.";
pub const GENERIC_APOLOGY: &str =
    "I apologize, but I encountered an error while processing your request";

const MAX_SUMMARY_CHARS: usize = 160;
const REDACTED: &str = "[REDACTED]";

fn secret_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)bearer\s+\S+|\b(?:gsk|sk)[-_][A-Za-z0-9_\-]{6,}").ok())
        .as_ref()
}

/// Picks the customer-facing reply for a failed turn. First match wins.
pub fn classify(error: &(impl Display + ?Sized)) -> String {
    let detail = error.to_string();
    let lowered = detail.to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|needle| lowered.contains(needle));

    if mentions(&["rate limit", "rate_limit", "ratelimit", "quota"]) {
        RATE_LIMIT_MESSAGE.to_string()
    } else if mentions(&["authentication", "api key", "api_key", "credential"]) {
        AUTHENTICATION_MESSAGE.to_string()
    } else if mentions(&["timeout", "timed out"]) {
        TIMEOUT_MESSAGE.to_string()
    } else {
        match sanitize(&detail) {
            Some(summary) => format!("{GENERIC_APOLOGY}: {summary}"),
            None => format!("{GENERIC_APOLOGY}."),
        }
    }
}

/// First line of the error with credentials masked, cut to a short summary.
///
/// Returns `None` when nothing can be shown safely.
fn sanitize(detail: &str) -> Option<String> {
    let first_line = detail.lines().map(str::trim).find(|line| !line.is_empty())?;
    let pattern = secret_pattern()?;
    let redacted = pattern.replace_all(first_line, REDACTED);
    Some(truncate_chars(&redacted, MAX_SUMMARY_CHARS))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
