use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An entry that can live in either pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Item {
    /// Case-insensitive substring match against the label.
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
impl Item {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Drop duplicate keys, keeping the last occurrence at its own position.
/// Returns the cleaned list and the keys that were duplicated.
pub fn dedup_last_wins(items: Vec<Item>) -> (Vec<Item>, Vec<String>) {
    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        last_index.insert(item.key.as_str(), i);
    }

    if last_index.len() == items.len() {
        return (items, Vec::new());
    }

    let keep: HashSet<usize> = last_index.values().copied().collect();
    let mut duplicates = Vec::new();
    let mut seen = HashSet::new();
    for (i, item) in items.iter().enumerate() {
        if !keep.contains(&i) && seen.insert(item.key.clone()) {
            duplicates.push(item.key.clone());
        }
    }

    let cleaned = items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep.contains(i))
        .map(|(_, item)| item)
        .collect();

    (cleaned, duplicates)
}
