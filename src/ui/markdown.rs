// Markdown styling for the book preview

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Render a whole book, tracking fenced code blocks across lines.
pub fn render_book(markdown: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut in_code_block = false;

    for line in markdown.lines() {
        if is_code_fence(line) {
            if in_code_block {
                lines.push(Line::from(Span::styled(
                    "└────────────────────────────────────",
                    Style::default().fg(Color::DarkGray),
                )));
            } else {
                let lang = extract_code_language(line);
                lines.push(Line::from(Span::styled(
                    format!("┌─ {} ─────────────────────────", lang.as_deref().unwrap_or("code")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            in_code_block = !in_code_block;
        } else if in_code_block {
            lines.push(Line::from(Span::styled(
                format!("  {line}"),
                Style::default().fg(Color::Green),
            )));
        } else {
            lines.push(render_line(line));
        }
    }

    lines
}

pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 1 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// `|---|:---:|` style rows carry no content.
pub fn is_table_separator(line: &str) -> bool {
    is_table_row(line)
        && line.contains('-')
        && line.trim().chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

pub fn is_code_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

pub fn extract_code_language(line: &str) -> Option<String> {
    line.trim()
        .strip_prefix("```")
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(ToString::to_string)
}

fn heading_style(level: usize) -> Style {
    let color = match level {
        1 => Color::Yellow,
        2 => Color::Cyan,
        _ => Color::Blue,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Split `1. rest` into its number and rest.
fn ordered_item(line: &str) -> Option<(&str, &str)> {
    let (number, rest) = line.split_once(". ")?;
    (!number.is_empty() && number.chars().all(|c| c.is_ascii_digit())).then_some((number, rest))
}

fn render_line(line: &str) -> Line<'static> {
    let trimmed = line.trim_start();

    if is_table_separator(line) {
        return Line::from("");
    }
    if is_table_row(line) {
        let cells: Vec<&str> = trimmed
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();
        return Line::from(Span::styled(
            format!("  {}", cells.join(" │ ")),
            Style::default().fg(Color::Cyan),
        ));
    }

    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes > 0 && trimmed[hashes..].starts_with(' ') {
        return Line::from(Span::styled(
            trimmed[hashes..].trim().to_string(),
            heading_style(hashes),
        ));
    }

    if let Some(rest) = trimmed.strip_prefix("> ") {
        let mut spans = vec![Span::styled("│ ", Style::default().fg(Color::DarkGray))];
        spans.extend(
            render_inline(rest)
                .into_iter()
                .map(|s| s.patch_style(Style::default().add_modifier(Modifier::ITALIC))),
        );
        return Line::from(spans);
    }

    let indent = " ".repeat(line.len() - trimmed.len());
    if let Some(rest) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
        let mut spans = vec![Span::styled(format!("{indent}• "), Style::default().fg(Color::Cyan))];
        spans.extend(render_inline(rest));
        return Line::from(spans);
    }
    if let Some((number, rest)) = ordered_item(trimmed) {
        let mut spans = vec![Span::styled(
            format!("{indent}{number}. "),
            Style::default().fg(Color::Cyan),
        )];
        spans.extend(render_inline(rest));
        return Line::from(spans);
    }

    Line::from(render_inline(line))
}

/// Bold (`**x**`) and inline code (`` `x` ``). Unclosed markers stay literal.
fn render_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let bold = rest.find("**");
        let code = rest.find('`');
        let (start, marker, style) = match (bold, code) {
            (Some(b), Some(c)) if c < b => (
                c,
                "`",
                Style::default().fg(Color::Magenta),
            ),
            (Some(b), _) => (
                b,
                "**",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            (None, Some(c)) => (c, "`", Style::default().fg(Color::Magenta)),
            (None, None) => break,
        };

        let after = &rest[start + marker.len()..];
        let Some(end) = after.find(marker) else {
            break;
        };

        if start > 0 {
            spans.push(Span::raw(rest[..start].to_string()));
        }
        spans.push(Span::styled(after[..end].to_string(), style));
        rest = &after[end + marker.len()..];
    }

    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }
    spans
}
