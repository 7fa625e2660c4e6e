//! Legend: label to mark style, first occurrence wins.

use super::palette::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// How a legend entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarkStyle {
    Line { color: Rgb, dash: LineStyle },
    Shade { color: Rgb, alpha: f32 },
}

impl MarkStyle {
    pub fn color(&self) -> Rgb {
        match self {
            MarkStyle::Line { color, .. } | MarkStyle::Shade { color, .. } => *color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub style: MarkStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry unless the label is already present. Returns whether it
    /// was added.
    pub fn push(&mut self, label: impl Into<String>, style: MarkStyle) -> bool {
        let label = label.into();
        if self.get(&label).is_some() {
            return false;
        }
        self.entries.push(LegendEntry { label, style });
        true
    }

    pub fn get(&self, label: &str) -> Option<&MarkStyle> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| &e.style)
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
