use thiserror::Error;
use tracing::debug;

/// Clipboard access failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("no history entry at index {0}")]
    NoSuchEntry(usize),
}

/// Text clipboard as seen by the history.
pub trait ClipboardSource {
    /// Current text contents, or `None` if the clipboard holds no text.
    fn get_text(&mut self) -> Option<String>;

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// A history entry. `position` is 1-based, in capture order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub position: usize,
    pub text: &'a str,
}

impl Entry<'_> {
    /// Single-line preview of at most `max_chars` characters.
    pub fn label(&self, max_chars: usize) -> String {
        let mut label: String = self
            .text
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .take(max_chars)
            .collect();
        if self.text.chars().count() > max_chars {
            label.push('…');
        }
        label
    }
}

/// Distinct clipboard texts in the order they were first seen.
#[derive(Debug, Default, Clone)]
pub struct ClipboardHistory {
    entries: Vec<String>,
}

impl ClipboardHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text`, returning the index of the new entry.
    ///
    /// Empty text and exact duplicates are ignored.
    pub fn observe(&mut self, text: &str) -> Option<usize> {
        if text.is_empty() || self.contains(text) {
            return None;
        }

        self.entries.push(text.to_owned());
        let index = self.entries.len() - 1;
        debug!(index, len = text.len(), "captured clipboard text");
        Some(index)
    }

    /// One poll tick: read the clipboard and record whatever is new.
    pub fn poll(&mut self, source: &mut dyn ClipboardSource) -> Option<usize> {
        let text = source.get_text()?;
        self.observe(&text)
    }

    /// Put entry `index` back on the clipboard.
    pub fn select(
        &self,
        index: usize,
        source: &mut dyn ClipboardSource,
    ) -> Result<(), ClipboardError> {
        let text = self
            .entries
            .get(index)
            .ok_or(ClipboardError::NoSuchEntry(index))?;
        source.set_text(text)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|entry| entry == text)
    }

    pub fn get(&self, index: usize) -> Option<Entry<'_>> {
        self.entries.get(index).map(|text| Entry {
            position: index + 1,
            text,
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        self.entries.iter().enumerate().map(|(index, text)| Entry {
            position: index + 1,
            text,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
