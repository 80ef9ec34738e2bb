use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Separator used by stored outputs that embed an image URL after the text.
pub const DEFAULT_OUTPUT_SEPARATOR: &str = "@@IMAGE@@";

/// Output half of a prompt: the generated text plus an optional hosted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct PromptOutput {
    pub text: String,
    pub image_url: Option<String>,
}

impl PromptOutput {
    pub fn new(text: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            text: text.into(),
            image_url: image_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        }
    }

    /// Reads the legacy single-string form `"<text> <separator> <url>"`.
    ///
    /// A string without the separator is plain text.
    pub fn decode_legacy(raw: &str, separator: &str) -> Self {
        if separator.is_empty() {
            return Self::new(raw, None);
        }
        match raw.split_once(separator) {
            Some((text, url)) => {
                let text = text.strip_suffix(' ').unwrap_or(text);
                Self::new(text, Some(url.to_string()))
            }
            None => Self::new(raw, None),
        }
    }

    /// Whether the legacy encoding reads back as `self`: neither part may
    /// contain the separator.
    pub fn fits_legacy(&self, separator: &str) -> bool {
        separator.is_empty()
            || (!self.text.contains(separator)
                && !self
                    .image_url
                    .as_deref()
                    .is_some_and(|u| u.contains(separator)))
    }

    /// Writes the legacy single-string form, for clients still reading it.
    pub fn encode_legacy(&self, separator: &str) -> String {
        match &self.image_url {
            Some(url) => format!("{} {} {}", self.text, separator, url),
            None => self.text.clone(),
        }
    }
}

/// Splits a comma separated tag string, trimming and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

pub fn normalize_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    tags.into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
