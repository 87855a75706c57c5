use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FormField};
use crate::models::{GenerationStatus, NoticeKind};

pub const PROGRESS_STEPS: [(u8, &str); 4] = [
    (1, "Creating outline…"),
    (2, "Researching…"),
    (3, "Writing chapters…"),
    (4, "Finalizing…"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMarker {
    Complete,
    Active,
    Pending,
}

pub const fn step_marker(current_step: u8, step_id: u8) -> StepMarker {
    if current_step > step_id {
        StepMarker::Complete
    } else if current_step == step_id {
        StepMarker::Active
    } else {
        StepMarker::Pending
    }
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "BookSmith - Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Form:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Tab/Shift+Tab - Next/previous field"),
        Line::from("  Left/Right    - Change genre or tone"),
        Line::from("  Enter         - Generate book"),
        Line::from(""),
        Line::from(Span::styled("Preview:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Up/Down       - Scroll"),
        Line::from("  PgUp/PgDn     - Scroll by page"),
        Line::from("  Home/End      - Jump to start/end"),
        Line::from("  Ctrl+D        - Download PDF"),
        Line::from("  Ctrl+Y        - Copy markdown"),
        Line::from("  Ctrl+N        - New generation"),
        Line::from(""),
        Line::from(Span::styled("General:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Ctrl+H        - Show/hide this help"),
        Line::from("  Ctrl+Q        - Quit"),
        Line::from("  Ctrl+C        - Quit (press twice)"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    let popup_area = centered(area, 50, 23);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;

    Rect {
        x: area.x + x,
        y: area.y + y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_header(frame: &mut Frame, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " BookSmith AI ",
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Generate a complete book from a topic", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    let locked = app.is_generating();

    for field in FormField::ALL {
        let focused = field == app.focus && !locked;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let (value, value_style) = app.form.value(field).map_or_else(
            || (field.placeholder().to_string(), Style::default().fg(Color::DarkGray)),
            |v| (v.to_string(), Style::default().fg(Color::White)),
        );
        let (open, close) = if field.is_choice() { ("◀ ", " ▶") } else { ("", "") };
        let cursor = if focused && !field.is_choice() { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(if focused { "› " } else { "  " }, Style::default().fg(Color::Cyan)),
            Span::styled(open, Style::default().fg(Color::DarkGray)),
            Span::styled(value, value_style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(close, Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(""));
    }

    let (button, button_style) = if locked {
        ("  Generating…  ", Style::default().fg(Color::DarkGray))
    } else if app.can_submit() {
        (
            "  Enter: Generate Book  ",
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        ("  Genre and topic required  ", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(Span::styled(button, button_style)));

    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Create Your Book ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(form, area);
}

pub fn render_preview(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = if app.controller.is_demo_mode() {
        " Book Preview (demo mode) "
    } else {
        " Book Preview "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.controller.status() {
        GenerationStatus::Idle => render_centered_message(
            frame,
            inner,
            "Your book preview will appear here",
            "Fill in the form and press Enter to generate",
            Color::DarkGray,
        ),
        GenerationStatus::Running => render_progress(frame, app, inner),
        GenerationStatus::Completed => render_book(frame, app, inner),
        GenerationStatus::Error => render_centered_message(
            frame,
            inner,
            "Generation failed",
            "Please try again or check your connection (Ctrl+N)",
            Color::Red,
        ),
    }
}

fn render_centered_message(frame: &mut Frame, area: Rect, title: &str, hint: &str, color: Color) {
    let text = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    let y = area.y + area.height.saturating_sub(2) / 2;
    let message_area = Rect {
        x: area.x,
        y,
        width: area.width,
        height: 2.min(area.height),
    };
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        message_area,
    );
}

fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.controller.step();
    let steps: Vec<Line> = PROGRESS_STEPS
        .iter()
        .map(|&(id, label)| {
            let (icon, style) = match step_marker(current, id) {
                StepMarker::Complete => ("✔", Style::default().fg(Color::Green)),
                StepMarker::Active => (
                    "◌",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                StepMarker::Pending => ("·", Style::default().fg(Color::DarkGray)),
            };
            Line::from(vec![
                Span::styled(format!("  {icon} "), style),
                Span::styled(label, style),
            ])
        })
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(steps), chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(u16::from(app.controller.progress()))
        .label(format!("Progress {}%", app.controller.progress()));
    frame.render_widget(gauge, chunks[3]);
}

fn render_book(frame: &mut Frame, app: &mut App, area: Rect) {
    let lines = super::markdown::render_book(app.controller.content());

    let available_width = usize::from(area.width.max(1));
    let total_visual_lines: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(available_width).max(1))
        .sum();

    let max_scroll = total_visual_lines.saturating_sub(usize::from(area.height));
    app.scroll_offset = app.scroll_offset.min(max_scroll);

    let book = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(app.scroll_offset).unwrap_or(u16::MAX), 0));

    frame.render_widget(book, area);
}

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(notice) = app.visible_notice(chrono::Local::now()) {
        let color = match notice.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Info => Color::Blue,
            NoticeKind::Error => Color::Red,
        };
        let text = format!("[{}] {}", notice.at.format("%H:%M:%S"), notice.message);
        let bar = Paragraph::new(text)
            .alignment(Alignment::Right)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        frame.render_widget(bar, area);
        return;
    }

    let controller = &app.controller;
    let job = controller
        .job_handle()
        .map_or_else(|| String::from("no job"), |handle| format!("job {}", handle.as_str()));
    let status_text = format!(
        "{} | step {} | {}%  ({job})",
        controller.status().label(),
        controller.step(),
        controller.progress(),
    );

    let bar = Paragraph::new(status_text)
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(bar, area);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if app.controller.status() == GenerationStatus::Completed {
        (
            "Ctrl+D: Download PDF | Ctrl+Y: Copy Markdown | Ctrl+N: New | Up/Down: Scroll | Ctrl+H: Help",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            "Tab: Next Field | Enter: Generate | Ctrl+N: New | Ctrl+H: Help | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style);

    frame.render_widget(bar, area);
}
