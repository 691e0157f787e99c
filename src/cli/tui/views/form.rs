//! Form view: input row, entries table, status bar

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::cli::tui::app::{App, Field, Status, HELP};
use crate::domain::RowParity;
use crate::storage::EXPORT_COLUMNS;

/// Draw the whole form
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Inputs
            Constraint::Min(5),    // Entries
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    draw_inputs(frame, app, chunks[0]);
    draw_entries(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);
}

fn draw_inputs(frame: &mut Frame, app: &App, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34), // ISBN
            Constraint::Percentage(22), // Condition
            Constraint::Percentage(22), // Location
            Constraint::Percentage(22), // Quantity
        ])
        .split(area);

    for (field, cell) in Field::ALL.into_iter().zip(cells.iter()) {
        draw_input(frame, app, field, *cell);
    }
}

fn draw_input(frame: &mut Frame, app: &App, field: Field, area: Rect) {
    let focused = app.focus() == field;
    let locked = app.is_locked(field);
    let value = app.field_value(field);

    let title = if locked {
        format!("{} [locked]", field.label())
    } else {
        field.label().to_string()
    };

    let border_style = match (focused, locked) {
        (true, _) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Yellow),
        (false, false) => Style::default(),
    };

    let text = if field == Field::Condition && focused && !locked {
        format!("< {} >", if value.is_empty() { "New/Used" } else { value.as_str() })
    } else {
        value.clone()
    };

    // Keep the end of long input in view, leaving a column for the cursor
    let inner_width = usize::from(area.width.saturating_sub(2));
    let len = text.chars().count();
    let scroll = len.saturating_sub(inner_width.saturating_sub(1));

    let input = Paragraph::new(text)
        .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(input, area);

    if focused && !locked && field != Field::Condition {
        let col = u16::try_from(len - scroll).unwrap_or(0);
        let max_x = area.x.saturating_add(area.width.saturating_sub(2));
        let x = area.x.saturating_add(1).saturating_add(col);
        frame.set_cursor_position((x.min(max_x), area.y + 1));
    }
}

fn draw_entries(frame: &mut Frame, app: &App, area: Rect) {
    let ledger = app.ledger();
    let entries = ledger.entries();

    // Border (2) + header (1)
    let visible = area.height.saturating_sub(3) as usize;
    let skip = entries.len().saturating_sub(visible);

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, e)| {
            let style = match RowParity::of(i + 1) {
                RowParity::Odd => Style::default(),
                RowParity::Even => Style::default().bg(Color::DarkGray),
            };
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(e.isbn().to_string()),
                Cell::from(e.sku().to_string()),
                Cell::from(e.condition().to_string()),
                Cell::from(e.location().to_string()),
                Cell::from(e.quantity().to_string()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(
        std::iter::once("#")
            .chain(EXPORT_COLUMNS)
            .map(Cell::from)
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(5),
        Constraint::Percentage(24),
        Constraint::Percentage(24),
        Constraint::Percentage(14),
        Constraint::Percentage(14),
        Constraint::Percentage(14),
    ];

    let title = format!(
        "Entries ({}, {} books) -> {}",
        ledger.len(),
        ledger.total_quantity(),
        app.export_dir().display()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(table, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (message, style) = match app.status() {
        Some(Status::Info(msg)) => (msg.as_str(), Style::default().fg(Color::Green)),
        Some(Status::Error(msg)) => (msg.as_str(), Style::default().fg(Color::Red)),
        None => (HELP, Style::default()),
    };

    let width = area.width.saturating_sub(2) as usize;
    let paragraph = Paragraph::new(truncate(message, width))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Cut `s` to `max_len` characters, ending in "..." when shortened
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InventoryLedger, LedgerConfig};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::{Backend, TestBackend};
    use std::path::PathBuf;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Added", 10), "Added");
        assert_eq!(truncate("Quantity cannot be zero", 11), "Quantity...");
    }

    #[test]
    fn renders_entries_and_status() {
        let mut ledger = InventoryLedger::new(LedgerConfig::default());
        ledger.add_entry("1111111111", "New", "A050", "3").unwrap();
        ledger.add_entry("2222222222", "Used", "B007", "1").unwrap();
        let app = App::new(ledger, PathBuf::from("/tmp/out"));

        let mut terminal = ratatui::Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();

        assert!(screen.contains("1111111111-11"));
        assert!(screen.contains("2222222222-2"));
        assert!(screen.contains("Entries (2, 4 books)"));
        assert!(screen.contains("Quantity"));
    }

    #[test]
    fn long_input_scrolls_and_keeps_cursor_in_box() {
        let ledger = InventoryLedger::new(LedgerConfig::default());
        let mut app = App::new(ledger, PathBuf::from("/tmp/out"));

        let typed = "1".repeat(usize::from(u16::MAX)) + "987";
        for c in typed.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        let mut terminal = ratatui::Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("11987"));

        // ISBN box is the leftmost ~34% of the row
        let cursor = terminal.backend_mut().get_cursor_position().unwrap();
        assert!(cursor.x <= 40, "cursor at {:?}", cursor);
        assert_eq!(cursor.y, 1);
    }
}
