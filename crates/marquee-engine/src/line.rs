//! Script lines and their display categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Display category of a line, derived from its text.
///
/// Only styling depends on this; sequencing treats every line alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Contains `ERROR`.
    Error,
    /// Shell prompt, starts with `>`.
    Prompt,
    /// Skill/progress bar, contains `█`.
    Metric,
    /// Upper-case `KEY:` label, e.g. `STATUS: Online`.
    Status,
    /// Contains a check mark.
    Success,
    /// Indented list entry, starts with `  [`.
    Entry,
    /// Empty or whitespace only.
    Blank,
    /// Anything else.
    Plain,
}

impl LineKind {
    /// Classify a line of text. The first matching rule wins.
    pub fn classify(text: &str) -> Self {
        if text.trim().is_empty() {
            Self::Blank
        } else if text.contains("ERROR") {
            Self::Error
        } else if text.starts_with('>') {
            Self::Prompt
        } else if text.contains('█') {
            Self::Metric
        } else if is_status_label(text) {
            Self::Status
        } else if text.contains('✓') {
            Self::Success
        } else if text.starts_with("  [") {
            Self::Entry
        } else {
            Self::Plain
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Prompt => write!(f, "prompt"),
            Self::Metric => write!(f, "metric"),
            Self::Status => write!(f, "status"),
            Self::Success => write!(f, "success"),
            Self::Entry => write!(f, "entry"),
            Self::Blank => write!(f, "blank"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// `USER:`, `STATUS:`, `LOCATION:` and similar.
fn is_status_label(text: &str) -> bool {
    let Some((label, _)) = text.split_once(':') else {
        return false;
    };
    !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '_' || c == ' ')
        && label.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    kind: LineKind,
}

impl Line {
    /// Create a line, classifying it from its text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = LineKind::classify(&text);
        Self { text, kind }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// An immutable, ordered list of lines. Clones share storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    lines: Arc<[Line]>,
}

impl Script {
    /// Build a script from anything that yields line text.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Line::new).collect(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl Deref for Script {
    type Target = [Line];

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl<S: Into<String>> FromIterator<S> for Script {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
