//! Dual-list transfer selector
//!
//! Splits one item list into an "available" and a "chosen" pane based on a
//! caller-owned list of chosen keys. The selector keeps only per-pane search
//! text and per-pane selection; moves are reported back as a
//! [`TransferChange`] and the caller decides whether to apply them with
//! [`Transfer::set_chosen_keys`].

mod item;

pub use item::{dedup_last_wins, Item};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Available,
    Chosen,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Available => Side::Chosen,
            Side::Chosen => Side::Available,
        }
    }

    /// Direction of a move that starts on this side
    pub fn outgoing(self) -> Direction {
        match self {
            Side::Available => Direction::ToChosen,
            Side::Chosen => Direction::ToAvailable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    ToChosen,
    ToAvailable,
}

/// Result of a committed move, handed to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferChange {
    pub chosen_keys: Vec<String>,
    pub direction: Direction,
    pub moved_keys: Vec<String>,
}

/// Current selection of both panes, in source order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionChange {
    pub available: Vec<String>,
    pub chosen: Vec<String>,
}

/// State of a pane's select-all box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Presentation props for the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOptions {
    pub titles: [String; 2],
    pub search_enabled: bool,
    pub search_placeholder: String,
    /// Rows in each pane's scrollable list
    pub height: u16,
    pub empty_text: String,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            titles: ["Available".to_string(), "Chosen".to_string()],
            search_enabled: true,
            search_placeholder: "Search".to_string(),
            height: 12,
            empty_text: "No data".to_string(),
        }
    }
}

impl TransferOptions {
    pub fn title(&self, side: Side) -> &str {
        match side {
            Side::Available => &self.titles[0],
            Side::Chosen => &self.titles[1],
        }
    }
}

#[derive(Debug, Default)]
struct Pane {
    search: String,
    selected: HashSet<String>,
}

pub struct Transfer {
    items: Vec<Item>,
    chosen_keys: Vec<String>,
    chosen_set: HashSet<String>,
    options: TransferOptions,
    available: Pane,
    chosen: Pane,
}

impl Transfer {
    /// Fresh selector; search and selection start empty
    pub fn new(items: Vec<Item>, chosen_keys: Vec<String>, options: TransferOptions) -> Self {
        let mut transfer = Self {
            items: Vec::new(),
            chosen_keys: Vec::new(),
            chosen_set: HashSet::new(),
            options,
            available: Pane::default(),
            chosen: Pane::default(),
        };
        transfer.set_items(items);
        transfer.set_chosen_keys(chosen_keys);
        transfer
    }

    /// Replace the source items. Selection and search survive.
    pub fn set_items(&mut self, items: Vec<Item>) {
        let (items, duplicates) = dedup_last_wins(items);
        if !duplicates.is_empty() {
            tracing::warn!("Duplicate item keys, keeping last occurrence: {:?}", duplicates);
        }
        self.items = items;
    }

    /// Replace the chosen keys. Selection and search survive.
    ///
    /// Keys without a matching item are kept verbatim and passed through in
    /// every emitted change.
    pub fn set_chosen_keys(&mut self, chosen_keys: Vec<String>) {
        self.chosen_set = chosen_keys.iter().cloned().collect();
        self.chosen_keys = chosen_keys;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn chosen_keys(&self) -> &[String] {
        &self.chosen_keys
    }

    pub fn options(&self) -> &TransferOptions {
        &self.options
    }

    /// Chosen keys that match no item
    pub fn unknown_chosen_keys(&self) -> Vec<&str> {
        let known: HashSet<&str> = self.items.iter().map(|i| i.key.as_str()).collect();
        self.chosen_keys
            .iter()
            .map(String::as_str)
            .filter(|k| !known.contains(k))
            .collect()
    }

    fn pane(&self, side: Side) -> &Pane {
        match side {
            Side::Available => &self.available,
            Side::Chosen => &self.chosen,
        }
    }

    fn pane_mut(&mut self, side: Side) -> &mut Pane {
        match side {
            Side::Available => &mut self.available,
            Side::Chosen => &mut self.chosen,
        }
    }

    fn on_side(&self, item: &Item, side: Side) -> bool {
        let chosen = self.chosen_set.contains(&item.key);
        match side {
            Side::Available => !chosen,
            Side::Chosen => chosen,
        }
    }

    /// Every item of a pane in source order, ignoring search
    pub fn partition(&self, side: Side) -> Vec<&Item> {
        self.items.iter().filter(|i| self.on_side(i, side)).collect()
    }

    /// Rows currently shown in a pane
    pub fn visible(&self, side: Side) -> Vec<&Item> {
        let query = self.effective_search(side);
        self.items
            .iter()
            .filter(|i| self.on_side(i, side) && i.matches(query))
            .collect()
    }

    fn effective_search(&self, side: Side) -> &str {
        if self.options.search_enabled {
            &self.pane(side).search
        } else {
            ""
        }
    }

    pub fn search(&self, side: Side) -> &str {
        &self.pane(side).search
    }

    pub fn set_search(&mut self, side: Side, text: impl Into<String>) {
        self.pane_mut(side).search = text.into();
    }

    pub fn is_selected(&self, side: Side, key: &str) -> bool {
        self.pane(side).selected.contains(key)
    }

    /// Selected keys that are members of the pane, in source order
    pub fn selected_keys(&self, side: Side) -> Vec<String> {
        let selected = &self.pane(side).selected;
        self.items
            .iter()
            .filter(|i| self.on_side(i, side) && selected.contains(&i.key))
            .map(|i| i.key.clone())
            .collect()
    }

    pub fn selection(&self) -> SelectionChange {
        SelectionChange {
            available: self.selected_keys(Side::Available),
            chosen: self.selected_keys(Side::Chosen),
        }
    }

    /// `(selected, visible)` for the pane header
    pub fn counts(&self, side: Side) -> (usize, usize) {
        (self.selected_keys(side).len(), self.visible(side).len())
    }

    fn visible_enabled_keys(&self, side: Side) -> Vec<String> {
        self.visible(side)
            .into_iter()
            .filter(|i| !i.disabled)
            .map(|i| i.key.clone())
            .collect()
    }

    /// Flip one row. Disabled rows and keys outside the pane are ignored.
    pub fn toggle(&mut self, side: Side, key: &str) -> Option<SelectionChange> {
        let item = self.items.iter().find(|i| i.key == key)?;
        if item.disabled || !self.on_side(item, side) {
            return None;
        }

        let selected = &mut self.pane_mut(side).selected;
        if !selected.remove(key) {
            selected.insert(key.to_string());
        }

        Some(self.selection())
    }

    /// Tri-state select-all over the visible enabled rows.
    ///
    /// Selects every visible enabled row unless they are all selected
    /// already, in which case the pane's whole selection is cleared.
    pub fn select_all(&mut self, side: Side) -> Option<SelectionChange> {
        let keys = self.visible_enabled_keys(side);
        let all_selected = !keys.is_empty() && keys.iter().all(|k| self.is_selected(side, k));

        let selected = &mut self.pane_mut(side).selected;
        if all_selected {
            selected.clear();
        } else if keys.is_empty() {
            return None;
        } else {
            selected.extend(keys);
        }

        Some(self.selection())
    }

    pub fn check_state(&self, side: Side) -> CheckState {
        let keys = self.visible_enabled_keys(side);
        if !keys.is_empty() && keys.iter().all(|k| self.is_selected(side, k)) {
            CheckState::Checked
        } else if self.selected_keys(side).is_empty() {
            CheckState::Unchecked
        } else {
            CheckState::Indeterminate
        }
    }

    fn movable_selected(&self, side: Side) -> Vec<String> {
        let selected = &self.pane(side).selected;
        self.items
            .iter()
            .filter(|i| !i.disabled && self.on_side(i, side) && selected.contains(&i.key))
            .map(|i| i.key.clone())
            .collect()
    }

    pub fn can_move_selected(&self, side: Side) -> bool {
        !self.movable_selected(side).is_empty()
    }

    pub fn can_move_all(&self, side: Side) -> bool {
        !self.visible_enabled_keys(side).is_empty()
    }

    /// Move the pane's selected rows to the other pane
    pub fn move_selected(&mut self, from: Side) -> Option<TransferChange> {
        let keys = self.movable_selected(from);
        self.commit(from, keys)
    }

    /// Move every visible enabled row of the pane to the other pane
    pub fn move_all(&mut self, from: Side) -> Option<TransferChange> {
        let keys = self.visible_enabled_keys(from);
        self.commit(from, keys)
    }

    fn commit(&mut self, from: Side, moved_keys: Vec<String>) -> Option<TransferChange> {
        if moved_keys.is_empty() {
            return None;
        }

        let chosen_keys = match from {
            Side::Available => {
                let mut next = self.chosen_keys.clone();
                next.extend(moved_keys.iter().cloned());
                next
            }
            Side::Chosen => {
                let moved: HashSet<&String> = moved_keys.iter().collect();
                self.chosen_keys
                    .iter()
                    .filter(|k| !moved.contains(k))
                    .cloned()
                    .collect()
            }
        };

        self.pane_mut(from).selected.clear();

        let change = TransferChange {
            chosen_keys,
            direction: from.outgoing(),
            moved_keys,
        };
        tracing::info!(
            direction = ?change.direction,
            moved = change.moved_keys.len(),
            "transfer committed"
        );
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn visible_keys(t: &Transfer, side: Side) -> Vec<String> {
        t.visible(side).iter().map(|i| i.key.clone()).collect()
    }

    fn courses() -> Vec<Item> {
        vec![
            Item::new("c1", "Rust Basics"),
            Item::new("c2", "Async Rust"),
            Item::new("c3", "Go Basics"),
            Item::new("c4", "Legacy Perl").disabled(),
            Item::new("c5", "Advanced Rust"),
        ]
    }

    /// Apply a change the way a controlled caller does
    fn apply(t: &mut Transfer, change: &TransferChange) {
        t.set_chosen_keys(change.chosen_keys.clone());
    }

    #[test]
    fn test_partitions_are_complete_and_disjoint() {
        let t = Transfer::new(courses(), keys(&["c2", "c4"]), TransferOptions::default());

        let available = visible_keys(&t, Side::Available);
        let chosen = visible_keys(&t, Side::Chosen);

        assert_eq!(available, keys(&["c1", "c3", "c5"]));
        assert_eq!(chosen, keys(&["c2", "c4"]));
        for item in t.items() {
            let in_available = available.contains(&item.key);
            let in_chosen = chosen.contains(&item.key);
            assert!(in_available ^ in_chosen, "{} must be in exactly one pane", item.key);
        }
    }

    #[test]
    fn test_chosen_pane_keeps_source_order() {
        let t = Transfer::new(courses(), keys(&["c5", "c1"]), TransferOptions::default());
        assert_eq!(visible_keys(&t, Side::Chosen), keys(&["c1", "c5"]));
    }

    #[test]
    fn test_filter_does_not_clear_selection() {
        let mut t = Transfer::new(courses(), vec![], TransferOptions::default());
        t.toggle(Side::Available, "c3");
        t.set_search(Side::Available, "rust");

        assert_eq!(visible_keys(&t, Side::Available), keys(&["c1", "c2", "c5"]));
        assert!(t.is_selected(Side::Available, "c3"));
    }

    #[test]
    fn test_search_disabled_shows_everything() {
        let options = TransferOptions {
            search_enabled: false,
            ..TransferOptions::default()
        };
        let mut t = Transfer::new(courses(), vec![], options);
        t.set_search(Side::Available, "rust");
        assert_eq!(t.visible(Side::Available).len(), 5);
    }

    #[test]
    fn test_toggle_ignores_disabled_and_foreign_keys() {
        let mut t = Transfer::new(courses(), keys(&["c1"]), TransferOptions::default());

        assert!(t.toggle(Side::Available, "c4").is_none());
        assert!(t.toggle(Side::Available, "c1").is_none());
        assert!(t.toggle(Side::Available, "missing").is_none());

        let change = t.toggle(Side::Available, "c2").unwrap();
        assert_eq!(change.available, keys(&["c2"]));
        assert!(change.chosen.is_empty());

        let change = t.toggle(Side::Available, "c2").unwrap();
        assert!(change.available.is_empty());
    }

    #[test]
    fn test_select_all_respects_filter_and_keeps_outside_selection() {
        let mut t = Transfer::new(courses(), vec![], TransferOptions::default());
        t.toggle(Side::Available, "c3");
        t.set_search(Side::Available, "rust");

        t.select_all(Side::Available);
        assert_eq!(t.selected_keys(Side::Available), keys(&["c1", "c2", "c3", "c5"]));

        // all visible selected: next press clears the whole pane
        t.select_all(Side::Available);
        assert!(t.selected_keys(Side::Available).is_empty());
    }

    #[test]
    fn test_select_all_rederives_from_new_filter() {
        let mut t = Transfer::new(courses(), vec![], TransferOptions::default());
        t.set_search(Side::Available, "basics");
        t.select_all(Side::Available);
        assert_eq!(t.selected_keys(Side::Available), keys(&["c1", "c3"]));

        t.set_search(Side::Available, "async");
        assert_eq!(t.check_state(Side::Available), CheckState::Indeterminate);
        t.select_all(Side::Available);

        // the new view's rows are added, the earlier ones survive
        assert_eq!(t.selected_keys(Side::Available), keys(&["c1", "c2", "c3"]));
        assert_eq!(t.check_state(Side::Available), CheckState::Checked);
    }

    #[test]
    fn test_disabled_items_never_selected_or_moved() {
        let mut t = Transfer::new(courses(), vec![], TransferOptions::default());
        t.select_all(Side::Available);
        assert!(!t.is_selected(Side::Available, "c4"));

        let change = t.move_all(Side::Available).unwrap();
        assert!(!change.moved_keys.contains(&"c4".to_string()));
        assert!(!change.chosen_keys.contains(&"c4".to_string()));

        let mut t = Transfer::new(courses(), keys(&["c4", "c1"]), TransferOptions::default());
        t.select_all(Side::Chosen);
        let change = t.move_all(Side::Chosen).unwrap();
        assert_eq!(change.moved_keys, keys(&["c1"]));
        assert_eq!(change.chosen_keys, keys(&["c4"]));
    }

    #[test]
    fn test_partial_selection_is_not_checked() {
        let mut t = Transfer::new(courses(), vec![], TransferOptions::default());
        assert_eq!(t.check_state(Side::Available), CheckState::Unchecked);

        t.toggle(Side::Available, "c1");
        assert_eq!(t.check_state(Side::Available), CheckState::Indeterminate);

        t.select_all(Side::Available);
        assert_eq!(t.check_state(Side::Available), CheckState::Checked);
        assert_eq!(t.counts(Side::Available), (4, 5));
    }

    #[test]
    fn test_filtered_select_all_then_move() {
        let items = vec![
            Item::new("A", "A"),
            Item::new("B", "B"),
            Item::new("C", "C").disabled(),
        ];
        let mut t = Transfer::new(items, vec![], TransferOptions::default());

        t.set_search(Side::Available, "A");
        assert_eq!(visible_keys(&t, Side::Available), keys(&["A"]));

        t.select_all(Side::Available);
        assert_eq!(t.selected_keys(Side::Available), keys(&["A"]));

        let change = t.move_selected(Side::Available).unwrap();
        assert_eq!(change.direction, Direction::ToChosen);
        assert_eq!(change.moved_keys, keys(&["A"]));
        assert_eq!(change.chosen_keys, keys(&["A"]));
        apply(&mut t, &change);

        assert_eq!(t.search(Side::Available), "A");
        assert!(t.visible(Side::Available).is_empty());
        assert_eq!(t.partition(Side::Available).len(), 2);

        t.set_search(Side::Available, "");
        assert_eq!(visible_keys(&t, Side::Available), keys(&["B", "C"]));
    }

    #[test]
    fn test_move_to_available_preserves_order() {
        let items = vec![Item::new("X", "X"), Item::new("Y", "Y"), Item::new("Z", "Z")];
        let mut t = Transfer::new(items, keys(&["X", "Y", "Z"]), TransferOptions::default());

        t.toggle(Side::Chosen, "Y");
        let change = t.move_selected(Side::Chosen).unwrap();

        assert_eq!(change.chosen_keys, keys(&["X", "Z"]));
        assert_eq!(change.moved_keys, keys(&["Y"]));
        assert_eq!(change.direction, Direction::ToAvailable);
        assert!(t.selected_keys(Side::Chosen).is_empty());
    }

    #[test]
    fn test_round_trip_restores_exact_order() {
        let original = keys(&["c5", "c2"]);
        let mut t = Transfer::new(courses(), original.clone(), TransferOptions::default());

        t.toggle(Side::Available, "c3");
        t.toggle(Side::Available, "c1");
        let change = t.move_selected(Side::Available).unwrap();
        assert_eq!(change.chosen_keys, keys(&["c5", "c2", "c1", "c3"]));
        apply(&mut t, &change);

        t.toggle(Side::Chosen, "c1");
        t.toggle(Side::Chosen, "c3");
        let change = t.move_selected(Side::Chosen).unwrap();
        assert_eq!(change.chosen_keys, original);
    }

    #[test]
    fn test_unknown_chosen_keys_pass_through() {
        let mut t = Transfer::new(courses(), keys(&["Q", "c1"]), TransferOptions::default());

        assert_eq!(t.unknown_chosen_keys(), vec!["Q"]);
        assert!(t.visible(Side::Available).iter().all(|i| i.key != "Q"));
        assert!(t.visible(Side::Chosen).iter().all(|i| i.key != "Q"));

        t.toggle(Side::Available, "c2");
        let change = t.move_selected(Side::Available).unwrap();
        assert_eq!(change.chosen_keys, keys(&["Q", "c1", "c2"]));
        apply(&mut t, &change);

        let change = t.move_all(Side::Chosen).unwrap();
        assert_eq!(change.chosen_keys, keys(&["Q"]));
    }

    #[test]
    fn test_move_all_respects_filter() {
        let mut t = Transfer::new(courses(), vec![], TransferOptions::default());
        t.set_search(Side::Available, "basics");

        let change = t.move_all(Side::Available).unwrap();
        assert_eq!(change.moved_keys, keys(&["c1", "c3"]));
        apply(&mut t, &change);

        t.set_search(Side::Chosen, "go");
        let change = t.move_all(Side::Chosen).unwrap();
        assert_eq!(change.moved_keys, keys(&["c3"]));
        assert_eq!(change.chosen_keys, keys(&["c1"]));
    }

    #[test]
    fn test_move_all_clears_source_selection_only() {
        let mut t = Transfer::new(courses(), keys(&["c1"]), TransferOptions::default());
        t.toggle(Side::Available, "c2");
        t.toggle(Side::Chosen, "c1");

        let change = t.move_all(Side::Available).unwrap();
        apply(&mut t, &change);

        assert!(t.selected_keys(Side::Available).is_empty());
        assert_eq!(t.selected_keys(Side::Chosen), keys(&["c1"]));
    }

    #[test]
    fn test_empty_moves_are_noops() {
        let mut t = Transfer::new(courses(), vec![], TransferOptions::default());
        assert!(!t.can_move_selected(Side::Available));
        assert!(t.move_selected(Side::Available).is_none());
        assert!(!t.can_move_all(Side::Chosen));
        assert!(t.move_all(Side::Chosen).is_none());
        assert!(t.chosen_keys().is_empty());
    }

    #[test]
    fn test_prop_updates_keep_selection() {
        let mut t = Transfer::new(courses(), vec![], TransferOptions::default());
        t.toggle(Side::Available, "c2");
        t.toggle(Side::Available, "c3");

        // caller reloads data and binds c3 elsewhere
        let mut refreshed = courses();
        refreshed.push(Item::new("c6", "Embedded Rust"));
        t.set_items(refreshed);
        t.set_chosen_keys(keys(&["c3"]));

        assert_eq!(t.selected_keys(Side::Available), keys(&["c2"]));
        let change = t.move_selected(Side::Available).unwrap();
        assert_eq!(change.moved_keys, keys(&["c2"]));
        assert_eq!(change.chosen_keys, keys(&["c3", "c2"]));
    }

    #[test]
    fn test_chosen_keys_not_mutated_by_moves() {
        let mut t = Transfer::new(courses(), keys(&["c1"]), TransferOptions::default());
        t.toggle(Side::Available, "c2");
        let change = t.move_selected(Side::Available).unwrap();

        assert_eq!(t.chosen_keys(), keys(&["c1"]).as_slice());
        assert_eq!(change.chosen_keys, keys(&["c1", "c2"]));
    }

    #[test]
    fn test_duplicate_items_resolved_last_wins() {
        let items = vec![
            Item::new("a", "Old label"),
            Item::new("b", "B"),
            Item::new("a", "New label").disabled(),
        ];
        let t = Transfer::new(items, vec![], TransferOptions::default());
        let visible = t.visible(Side::Available);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1].label, "New label");
        assert!(visible[1].disabled);
    }
}
