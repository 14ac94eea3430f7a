//! Shared input validation helpers

use regex::Regex;
use std::sync::OnceLock;

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

/// Check a URL/slug path segment (lowercase alphanumerics and single dashes)
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty() && value.len() <= 128 && slug_regex().is_match(value)
}

/// Check an email address shape
pub fn is_valid_email(value: &str) -> bool {
    value.len() <= 254 && email_regex().is_match(value)
}

/// Check a lowercase hex string of the given byte length
pub fn is_hex_of_len(value: &str, bytes: usize) -> bool {
    value.len() == bytes * 2 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Derive a slug from a free-form title
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_dash = true; // suppress leading dashes
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out.truncate(128);
    out
}
