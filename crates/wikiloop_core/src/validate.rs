use std::sync::LazyLock;

use regex::Regex;

/// Inline guidance shown under a field whose text is not an article URL.
pub const WIKIPEDIA_URL_MSG: &str =
    "Please enter a valid Wikipedia URL, e.g. https://en.wikipedia.org/wiki/Water";

// Only a prefix is checked: anchors, queries and extra path segments after
// the article name are accepted.
static ARTICLE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[0-9A-Za-z_]{2}\.wikipedia\.org/wiki/[0-9A-Za-z_]")
        .expect("article url pattern compiles")
});

/// One URL input box after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlField {
    raw_text: String,
    normalized: String,
    is_valid: bool,
    error_message: String,
}

impl UrlField {
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Lower-cased text; this is what gets sent to the backend.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Empty unless the field holds non-empty, invalid text.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Valid and non-empty: the field may take part in a submission.
    pub fn is_submittable(&self) -> bool {
        self.is_valid && !self.normalized.is_empty()
    }
}

impl Default for UrlField {
    fn default() -> Self {
        Self {
            raw_text: String::new(),
            normalized: String::new(),
            is_valid: true,
            error_message: String::new(),
        }
    }
}

/// Validates raw input text against the Wikipedia article URL shape.
///
/// Empty input is valid on its own; the submission guard rejects it separately.
pub fn validate(raw: &str) -> UrlField {
    if raw.is_empty() {
        return UrlField::default();
    }

    let normalized = raw.to_lowercase();
    let is_valid = ARTICLE_URL.is_match(&normalized);
    UrlField {
        raw_text: raw.to_string(),
        normalized,
        is_valid,
        error_message: if is_valid {
            String::new()
        } else {
            WIKIPEDIA_URL_MSG.to_string()
        },
    }
}
