//! Shared UI helpers: the two-line status bar and centered overlays.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a two-line status bar: a centered status message over a centered
/// row of `(key, action)` control hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Render a centered modal overlay: a bordered box with a bold title line
/// followed by the given body lines, all center-aligned. The box is sized
/// to its content and clears whatever is underneath.
pub fn render_center_overlay(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    title_color: Color,
    body: Vec<Line>,
) {
    // Title + blank + body, with a one-cell border all around.
    let content_height = body.len() as u16 + 2;
    let modal_height = (content_height + 2).min(area.height);
    let modal_width = 46u16.min(area.width);

    let x = area.x + (area.width.saturating_sub(modal_width)) / 2;
    let y = area.y + (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(x, y, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(title_color));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}

/// A row of hearts: filled for remaining lives, hollow for lost ones.
pub fn hearts_line(hearts: u8, max_hearts: u8) -> Line<'static> {
    let mut spans = Vec::with_capacity(max_hearts as usize);
    for i in 0..max_hearts {
        if i < hearts {
            spans.push(Span::styled("♥ ", Style::default().fg(Color::Red)));
        } else {
            spans.push(Span::styled("♡ ", Style::default().fg(Color::DarkGray)));
        }
    }
    Line::from(spans)
}
