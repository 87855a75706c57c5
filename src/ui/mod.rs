pub mod markdown;
pub mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Form and preview
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Keymap bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    widgets::render_header(frame, rows[0]);
    widgets::render_form(frame, app, columns[0]);
    widgets::render_preview(frame, app, columns[1]);
    widgets::render_status_bar(frame, app, rows[2]);
    widgets::render_bottom_bar(frame, app, rows[3]);

    if app.show_help {
        widgets::render_help_window(frame, frame.area());
    }
}
