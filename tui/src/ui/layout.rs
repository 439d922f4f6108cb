use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::{
    render_delete_confirmation, render_editor, render_header, render_message, render_note_detail,
    render_note_list, render_status_bar,
};

/// Render the complete UI
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.size();

    // Create main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Overlays (drawn last)
    if app.editor.is_some() {
        render_editor(frame, app, size);
    }
    if app.confirming_delete {
        render_delete_confirmation(frame, app, size);
    }
    // Notifications sit on top of everything
    if app.message.is_some() {
        render_message(frame, app, size);
    }
}

/// List on the left, selected note on the right
fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Note list
            Constraint::Percentage(55), // Detail
        ])
        .split(area);

    render_note_list(frame, app, main_chunks[0]);
    render_note_detail(frame, app, main_chunks[1]);
}
