mod transfer;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode, Popup};
use crate::theme::Theme;
use crate::transfer::Side;

use self::transfer::{draw_transfer, pane_height};

/// Draw the whole screen. The theme is handed in by the caller.
pub fn draw(f: &mut Frame, app: &App, theme: &Theme) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1),               // Info line
            Constraint::Length(pane_height(app)), // Panes (clamped by the layout)
            Constraint::Min(0),                  // Spacer
            Constraint::Length(1),               // Footer
        ])
        .split(area);

    draw_info_line(f, app, theme, chunks[0]);
    draw_transfer(f, app, theme, chunks[1]);
    draw_footer(f, app, theme, chunks[3]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, theme),
        Popup::ConfirmDiscard => draw_confirm_popup(f, app, theme),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    // Priority: status message > search hint > ready
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(theme.warning)))
    } else if app.mode == InputMode::Search {
        Line::from(vec![
            Span::styled("Searching ", Style::default().fg(theme.text_dim)),
            Span::styled(
                app.transfer.options().title(app.focus),
                Style::default().fg(theme.accent),
            ),
            Span::styled(" │ Enter keeps, Esc clears", Style::default().fg(theme.text_dim)),
        ])
    } else if app.is_dirty() {
        Line::from(Span::styled(
            format!("{} unconfirmed move(s)", app.moves.len()),
            Style::default().fg(theme.text_dim),
        ))
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(theme.text_dim)))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_footer(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.mode {
        InputMode::Search => vec![("Enter", "Keep"), ("Esc", "Clear")],
        InputMode::Normal => {
            let mut hints = vec![
                ("↑↓", "Nav"),
                ("Space", "Select"),
                ("a", "All"),
                ("l/h", "Move"),
                ("Tab", "Pane"),
            ];
            if app.transfer.options().search_enabled {
                hints.push(("/", "Search"));
            }
            hints.extend([("Enter", "Confirm"), ("q", "Cancel"), ("?", "Help")]);
            hints
        }
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 100 { 6 } else { hints.len() };

    // Summary first so it survives truncation
    let total = app.transfer.items().len();
    let chosen = app.transfer.partition(Side::Chosen).len();
    let mut spans = vec![
        Span::styled(
            format!("{} items, {} chosen", total, chosen),
            Style::default().fg(theme.text),
        ),
        Span::styled(" │ ", Style::default().fg(theme.text_dim)),
    ];

    spans.extend(hints.iter().take(max_hints).flat_map(|(key, action)| {
        vec![
            Span::styled(*key, Style::default().fg(theme.accent)),
            Span::styled(format!(" {} │ ", action), Style::default().fg(theme.text_dim)),
        ]
    }));

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(theme.accent)),
            Span::raw(text),
        ])
    };

    let help_text = vec![
        section("═══ Navigation ═══"),
        entry("Tab", "Switch between panes"),
        entry("↑/↓ j/k", "Move the cursor"),
        Line::from(""),
        section("═══ Selection ═══"),
        entry("Space", "Select/unselect the row under the cursor"),
        entry("a", "Select all shown rows, or clear the pane"),
        entry("/", "Search the focused pane"),
        Line::from(""),
        section("═══ Moving ═══"),
        entry("→ l", "Move selected rows to the chosen pane"),
        entry("← h", "Move selected rows back"),
        entry("L", "Move every shown row to the chosen pane"),
        entry("H", "Move every shown row back"),
        Line::from(""),
        section("═══ Finishing ═══"),
        entry("Enter", "Confirm and print the chosen keys"),
        entry("q/Esc", "Cancel without output"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("?", Style::default().fg(theme.accent)),
            Span::styled("/", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" to close", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" ferry Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn draw_confirm_popup(f: &mut Frame, app: &App, theme: &Theme) {
    let popup_area = centered_rect(40, 20, f.area());

    f.render_widget(Clear, popup_area);

    let message = format!("Discard {} unconfirmed move(s)?", app.moves.len());

    let confirm = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(theme.warning))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes   "),
            Span::styled("n", Style::default().fg(theme.danger).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Confirm ", Style::default().fg(theme.warning)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.warning)),
    )
    .alignment(Alignment::Center);

    f.render_widget(confirm, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
