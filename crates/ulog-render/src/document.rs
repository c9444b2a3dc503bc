use std::fmt;

/// Rendered Markdown, trimmed of surrounding blank lines. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    text: String,
}

impl RenderedDocument {
    /// Wrap rendered text, trimming leading and trailing whitespace.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The document's lines, split on `\n`. Empty for an empty document.
    pub fn lines(&self) -> Vec<&str> {
        if self.text.is_empty() {
            Vec::new()
        } else {
            self.text.split('\n').collect()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
