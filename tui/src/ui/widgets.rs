use crate::app::{App, Countdown};
use duenotes_core::{EditSession, Field};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render the header with title and key hints
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let keymap = &app.config.keymap;
    let key_hints = if app.message.is_some() {
        " [Any key:Dismiss] ".to_string()
    } else if app.confirming_delete {
        " [y:Delete] [n:Keep] ".to_string()
    } else if app.editor.is_some() {
        " [Ctrl+S:Save] [Esc:Cancel] [Tab:Next field] ".to_string()
    } else {
        format!(
            " [{}:Quit] [{}/{}:Select] [{}:Add] [{}:Edit] [{}:Delete] ",
            keymap.quit, keymap.select_up, keymap.select_down, keymap.add_note, keymap.edit_note, keymap.delete_note
        )
    };

    let header_spans = vec![
        Span::styled(
            " Notes ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(key_hints, Style::default().fg(Color::DarkGray)),
    ];

    let header = Paragraph::new(Line::from(header_spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

/// Render the note list with a live countdown per note
pub fn render_note_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Notes ");

    if app.notes().is_empty() {
        let hint = format!("No notes yet. Press '{}' to add one.", app.config.keymap.add_note);
        let empty_message = Paragraph::new(hint)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty_message, area);
        return;
    }

    let items: Vec<ListItem> = app
        .notes()
        .iter()
        .map(|note| {
            let countdown = app.countdown(note);
            let (label, style) = match &countdown {
                Countdown::Left(left) if left.is_overdue() => (
                    format!("{} (remaining: {})", note.title, left),
                    Style::default().fg(Color::Red),
                ),
                Countdown::Left(left) => (
                    format!("{} (remaining: {})", note.title, left),
                    Style::default().fg(Color::Green),
                ),
                Countdown::InvalidDeadline => (
                    format!("{} (invalid deadline)", note.title),
                    Style::default().fg(Color::Yellow),
                ),
            };
            ListItem::new(Line::styled(label, style))
        })
        .collect();

    let mut state = ListState::default();
    state.select(app.selected);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::LightBlue).fg(Color::Black))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the selected note's content and deadline
pub fn render_note_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(note) = app.selected_note() else {
        let placeholder = Paragraph::new("Select a note to see its content.")
            .block(Block::default().borders(Borders::ALL).title(" Note "))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, area);
        return;
    };

    let mut lines: Vec<Line> = note.content.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    let deadline_line = match app.countdown(note) {
        Countdown::Left(left) => Line::styled(
            format!("Deadline: {} (remaining {})", note.deadline, left),
            if left.is_overdue() { Style::default().fg(Color::Red) } else { Style::default() },
        ),
        Countdown::InvalidDeadline => Line::styled(
            format!("Deadline: {} (cannot be read)", note.deadline),
            Style::default().fg(Color::Yellow),
        ),
    };
    lines.push(deadline_line);

    let detail = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", note.title)))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}

/// Render the status bar
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let overdue = app
        .notes()
        .iter()
        .filter(|n| app.countdown(n).is_overdue())
        .count();
    let status_text = format!(
        " {} notes | {} overdue | {} ",
        app.notes().len(),
        overdue,
        app.store.path().display()
    );

    let status_bar = Paragraph::new(status_text)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .alignment(Alignment::Center);

    frame.render_widget(status_bar, area);
}

/// Render the add/edit dialog
pub fn render_editor(frame: &mut Frame, app: &App, area: Rect) {
    let Some(session) = &app.editor else {
        return;
    };

    let popup_area = popup_rect(area, 70, 20);
    let title = if session.is_new() { " New note " } else { " Edit note " };
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(outer, popup_area);

    let inner = Rect {
        x: popup_area.x + 1,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(2),
        height: popup_area.height.saturating_sub(2),
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Content
            Constraint::Length(3), // Deadline
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    render_editor_field(frame, session, Field::Title, rows[0]);
    render_editor_field(frame, session, Field::Content, rows[1]);
    render_editor_field(frame, session, Field::Deadline, rows[2]);

    let hint = Paragraph::new("Deadline format: YYYY-MM-DD HH:MM:SS   Enter in Content adds a line")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, rows[3]);
}

fn render_editor_field(frame: &mut Frame, session: &EditSession, field: Field, area: Rect) {
    let focused = session.focus == field;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let text = session.fields.get(field);
    let line_count = text.split('\n').count() as u16;
    let visible = area.height.saturating_sub(2).max(1);
    let scroll = line_count.saturating_sub(visible);

    let paragraph = Paragraph::new(text.to_string())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", field.label()))
                .border_style(border_style),
        )
        .style(Style::default().fg(Color::White))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);

    if focused {
        // Cursor sits after the last character typed
        let last_line = text.rsplit('\n').next().unwrap_or("");
        let max_x = area.width.saturating_sub(3);
        let x = area.x + 1 + (last_line.width() as u16).min(max_x);
        let y = area.y + 1 + (line_count - 1 - scroll).min(visible - 1);
        frame.set_cursor(x, y);
    }
}

/// Render the delete confirmation popup
pub fn render_delete_confirmation(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = popup_rect(area, 60, 5);

    let title = app.pending_delete_title().unwrap_or("");
    let text = format!("Delete note '{}'? (y/n)", title);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title("Confirm Deletion")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup_area); // This clears the area behind the popup
    frame.render_widget(paragraph, popup_area);
}

/// Render a blocking notification
pub fn render_message(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = &app.message else {
        return;
    };
    let popup_area = popup_rect(area, 60, 7);

    let paragraph = Paragraph::new(message.as_str())
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

/// A centered rectangle no larger than `area`
fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
