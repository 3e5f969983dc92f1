//! The two panes and the move buttons between them

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::theme::Theme;
use crate::transfer::{CheckState, Side};

/// Width of the buttons column
const BUTTONS_WIDTH: u16 = 8;

/// Rows a pane needs for the configured list height
pub fn pane_height(app: &App) -> u16 {
    let options = app.transfer.options();
    let search = if options.search_enabled { 1 } else { 0 };
    options.height.saturating_add(search + 2)
}

pub fn draw_transfer(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(BUTTONS_WIDTH),
            Constraint::Min(10),
        ])
        .split(area);

    draw_pane(f, app, theme, Side::Available, chunks[0]);
    draw_buttons(f, app, theme, chunks[1]);
    draw_pane(f, app, theme, Side::Chosen, chunks[2]);
}

fn check_box(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Indeterminate => "[-]",
        CheckState::Checked => "[x]",
    }
}

fn draw_pane(f: &mut Frame, app: &App, theme: &Theme, side: Side, area: Rect) {
    let transfer = &app.transfer;
    let options = transfer.options();
    let is_active = app.focus == side;

    let border_color = if is_active { theme.accent } else { theme.inactive };
    let title_style = if is_active {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.inactive)
    };

    let check_state = transfer.check_state(side);
    let check_color = if check_state == CheckState::Unchecked {
        theme.text_dim
    } else {
        theme.checked
    };
    let (selected, visible) = transfer.counts(side);

    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(check_box(check_state), Style::default().fg(check_color)),
            Span::styled(format!(" {} ", options.title(side)), title_style),
        ]))
        .title_top(
            Line::from(Span::styled(
                format!(" {}/{} ", selected, visible),
                Style::default().fg(theme.text_dim),
            ))
            .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let (search_area, list_area) = if options.search_enabled {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, inner)
    };

    if let Some(search_area) = search_area {
        draw_search_line(f, app, theme, side, search_area);
    }

    let rows = transfer.visible(side);
    if rows.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            options.empty_text.as_str(),
            Style::default().fg(theme.text_dim),
        )))
        .alignment(Alignment::Center);
        f.render_widget(empty, list_area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|item| {
            let selected = transfer.is_selected(side, &item.key);
            let (mark, mark_color) = if selected {
                ("[x]", theme.checked)
            } else {
                ("[ ]", theme.text_dim)
            };
            let label_style = if item.disabled {
                Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC)
            } else {
                Style::default().fg(theme.text)
            };

            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(mark_color)),
                Span::raw(" "),
                Span::styled(item.label.as_str(), label_style),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(Style::default().bg(theme.bg_selected));

    // Only the focused pane shows its cursor
    let mut state = ListState::default();
    if is_active {
        state.select(Some(app.cursor(side)));
    }
    f.render_stateful_widget(list, list_area, &mut state);
}

fn draw_search_line(f: &mut Frame, app: &App, theme: &Theme, side: Side, area: Rect) {
    let query = app.transfer.search(side);
    let editing = app.mode == InputMode::Search && app.focus == side;

    let mut spans = vec![Span::styled("/ ", Style::default().fg(theme.accent))];
    if query.is_empty() && !editing {
        spans.push(Span::styled(
            app.transfer.options().search_placeholder.as_str(),
            Style::default().fg(theme.text_dim),
        ));
    } else {
        spans.push(Span::styled(query, Style::default().fg(theme.text)));
    }
    if editing {
        spans.push(Span::styled("_", Style::default().fg(theme.accent)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_buttons(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let transfer = &app.transfer;
    let buttons = [
        (" > ", "l", transfer.can_move_selected(Side::Available)),
        (" >>", "L", transfer.can_move_all(Side::Available)),
        ("<< ", "H", transfer.can_move_all(Side::Chosen)),
        (" < ", "h", transfer.can_move_selected(Side::Chosen)),
    ];

    let mut lines = Vec::new();
    let top_pad = area.height.saturating_sub(buttons.len() as u16 * 2) / 2;
    for _ in 0..top_pad {
        lines.push(Line::from(""));
    }

    for (label, key, enabled) in buttons {
        let style = if enabled {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.inactive)
        };
        lines.push(Line::from(Span::styled(label, style)));
        lines.push(Line::from(Span::styled(key, Style::default().fg(theme.text_dim))));
    }

    let column = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(column, area);
}
