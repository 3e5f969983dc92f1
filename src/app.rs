use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::transfer::{Direction, SelectionChange, Side, Transfer, TransferChange};

/// How long status messages stay in the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search, // Typing into the focused pane's search line
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    ConfirmDiscard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Confirmed,
    Cancelled,
}

/// Owner of the chosen keys. Hosts the selector and applies its changes.
pub struct App {
    pub transfer: Transfer,
    pub focus: Side,
    pub mode: InputMode,
    pub popup: Popup,

    // Cursor row within each pane's visible rows
    pub available_cursor: usize,
    pub chosen_cursor: usize,

    // Session bookkeeping
    pub initial_chosen: Vec<String>,
    pub moves: Vec<TransferChange>,
    pub confirm_discard: bool,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    pub exit: Option<Exit>,
}

impl App {
    pub fn new(transfer: Transfer, confirm_discard: bool) -> Self {
        let initial_chosen = transfer.chosen_keys().to_vec();

        let unknown = transfer.unknown_chosen_keys();
        if !unknown.is_empty() {
            tracing::warn!("Chosen keys without a matching item are kept as-is: {:?}", unknown);
        }

        Self {
            transfer,
            focus: Side::Available,
            mode: InputMode::Normal,
            popup: Popup::None,
            available_cursor: 0,
            chosen_cursor: 0,
            initial_chosen,
            moves: Vec::new(),
            confirm_discard,
            status_message: None,
            status_message_time: None,
            exit: None,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn cursor(&self, side: Side) -> usize {
        match side {
            Side::Available => self.available_cursor,
            Side::Chosen => self.chosen_cursor,
        }
    }

    fn cursor_mut(&mut self, side: Side) -> &mut usize {
        match side {
            Side::Available => &mut self.available_cursor,
            Side::Chosen => &mut self.chosen_cursor,
        }
    }

    /// True when the chosen keys differ from what the session started with
    pub fn is_dirty(&self) -> bool {
        self.transfer.chosen_keys() != self.initial_chosen.as_slice()
    }

    /// Key of the row under the focused pane's cursor
    fn current_key(&self) -> Option<String> {
        self.transfer
            .visible(self.focus)
            .get(self.cursor(self.focus))
            .map(|item| item.key.clone())
    }

    fn clamp_cursors(&mut self) {
        for side in [Side::Available, Side::Chosen] {
            let len = self.transfer.visible(side).len();
            let cursor = self.cursor_mut(side);
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.exit = Some(Exit::Cancelled);
            return;
        }

        // Handle popups first
        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return;
        }

        match self.mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            // Switch panes
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.other(),

            // Vertical navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),

            // Selection
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Char('a') => {
                if let Some(change) = self.transfer.select_all(self.focus) {
                    log_selection(&change);
                }
            }

            // Moves
            KeyCode::Right | KeyCode::Char('l') => self.move_selected(Side::Available),
            KeyCode::Left | KeyCode::Char('h') => self.move_selected(Side::Chosen),
            KeyCode::Char('L') => self.move_all(Side::Available),
            KeyCode::Char('H') => self.move_all(Side::Chosen),

            // Search
            KeyCode::Char('/') => {
                if self.transfer.options().search_enabled {
                    self.mode = InputMode::Search;
                }
            }

            KeyCode::Enter => self.confirm(),
            KeyCode::Esc | KeyCode::Char('q') => self.cancel(),
            KeyCode::Char('?') => self.popup = Popup::Help,

            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let mut query = self.transfer.search(self.focus).to_string();
        match key.code {
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                return;
            }
            KeyCode::Esc => {
                query.clear();
                self.mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(c) => query.push(c),
            _ => return,
        }
        self.transfer.set_search(self.focus, query);
        self.clamp_cursors();
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup {
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
            }
            Popup::ConfirmDiscard => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.popup = Popup::None;
                    self.exit = Some(Exit::Cancelled);
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.popup = Popup::None;
                }
                _ => {}
            },
            Popup::None => {}
        }
    }

    fn move_down(&mut self) {
        let len = self.transfer.visible(self.focus).len();
        if len > 0 {
            let cursor = self.cursor_mut(self.focus);
            *cursor = (*cursor + 1) % len;
        }
    }

    fn move_up(&mut self) {
        let len = self.transfer.visible(self.focus).len();
        if len > 0 {
            let cursor = self.cursor_mut(self.focus);
            *cursor = cursor.checked_sub(1).unwrap_or(len - 1);
        }
    }

    fn toggle_current(&mut self) {
        let Some(key) = self.current_key() else {
            return;
        };
        match self.transfer.toggle(self.focus, &key) {
            Some(change) => log_selection(&change),
            None => self.set_status("Item is disabled"),
        }
    }

    fn move_selected(&mut self, from: Side) {
        match self.transfer.move_selected(from) {
            Some(change) => self.apply(change),
            None => self.set_status("Nothing selected"),
        }
    }

    fn move_all(&mut self, from: Side) {
        match self.transfer.move_all(from) {
            Some(change) => self.apply(change),
            None => self.set_status("Nothing to move"),
        }
    }

    /// Accept a change from the selector: the new chosen keys replace the
    /// old ones wholesale.
    fn apply(&mut self, change: TransferChange) {
        let to = change.direction;
        let title = match to {
            Direction::ToChosen => self.transfer.options().title(Side::Chosen),
            Direction::ToAvailable => self.transfer.options().title(Side::Available),
        }
        .to_string();

        tracing::info!(?to, keys = ?change.moved_keys, "applying move");
        self.transfer.set_chosen_keys(change.chosen_keys.clone());
        self.set_status(format!("Moved {} item(s) to {}", change.moved_keys.len(), title));
        self.moves.push(change);
        self.clamp_cursors();
    }

    fn confirm(&mut self) {
        tracing::info!("Confirmed with {} chosen keys", self.transfer.chosen_keys().len());
        self.exit = Some(Exit::Confirmed);
    }

    fn cancel(&mut self) {
        if self.confirm_discard && self.is_dirty() {
            self.popup = Popup::ConfirmDiscard;
        } else {
            self.exit = Some(Exit::Cancelled);
        }
    }

    /// Periodic housekeeping between input events
    pub fn tick(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

fn log_selection(change: &SelectionChange) {
    tracing::debug!(
        available = ?change.available,
        chosen = ?change.chosen,
        "selection changed"
    );
}
