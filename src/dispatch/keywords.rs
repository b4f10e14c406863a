//! Keyword recognition for Direqt moments
//!
//! The playground account ships with three moments, each triggered by the
//! subscriber typing its keyword:
//!
//! | keyword     | moment          |
//! |-------------|-----------------|
//! | `text`      | `fbm-text`      |
//! | `rich-card` | `fbm-rich-card` |
//! | `media`     | `fbm-media`     |

/// Keywords mapped to playground moments.
pub const MOMENT_KEYWORDS: [&str; 3] = ["text", "rich-card", "media"];

/// Prefix turning a keyword into a moment id.
pub const MOMENT_PREFIX: &str = "fbm-";

/// Lowercase `text` and replace every non-word character with `-`.
///
/// Runs are not collapsed, so `"Rich Card!"` becomes `"rich-card-"`. Each
/// UTF-16 code unit counts as one character, so an emoji yields `"--"`.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            normalized.push(c);
        } else {
            normalized.extend(std::iter::repeat('-').take(c.len_utf16()));
        }
    }
    normalized
}

/// Moment id for `text`, if it normalizes to exactly one of the keywords.
pub fn moment_for(text: &str) -> Option<String> {
    let keyword = normalize(text);
    MOMENT_KEYWORDS
        .contains(&keyword.as_str())
        .then(|| format!("{}{}", MOMENT_PREFIX, keyword))
}
