//! The play-field scene: world-to-cell projection, sprites, and overlays.

use crate::constants::*;
use crate::game::{GamePhase, GameWorld};
use crate::scores::format_half_points;
use crate::ui::game_common::{hearts_line, render_center_overlay, render_status_bar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Horizontal half-extent of the rendered world, in world units.
const VIEW_HALF_WIDTH: f64 = 12.0;
/// Vertical half-extent of the rendered world, in world units.
const VIEW_HALF_HEIGHT: f64 = 10.0;

/// Top of the visible sand, one unit below the cat's lowest stand.
const SAND_TOP_Y: f64 = -6.0;

const CAT_SPRITE: [&str; 2] = ["/\\_/\\", "(o.o)"];
const CAT_SPRITE_HIT: [&str; 2] = ["/\\_/\\", "(>.<)"];

/// Render the whole game screen into `area`.
pub fn render(frame: &mut Frame, area: Rect, world: &GameWorld) {
    let border_color = if world.damage_flash_active() {
        Color::Red
    } else {
        Color::Cyan
    };

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Scamper ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if inner.width < 10 || inner.height < 6 {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(22)])
        .split(inner);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(columns[0]);

    render_play_area(frame, rows[0], world);
    render_info_panel(frame, columns[1], world);

    let (status_text, status_color) = match world.phase {
        GamePhase::Ready => ("Move the pointer to steer", Color::Cyan),
        GamePhase::Active if world.paused => ("Paused", Color::Yellow),
        GamePhase::Active => ("Dodge the scratchers!", Color::Green),
        GamePhase::GameOver => ("Out of hearts", Color::Red),
    };
    let controls: &[(&str, &str)] = match world.phase {
        GamePhase::Ready => &[("Space", "start"), ("q", "quit")],
        GamePhase::Active => &[("Esc", "pause"), ("q", "quit")],
        GamePhase::GameOver => &[("r", "play again"), ("q", "quit")],
    };
    render_status_bar(frame, rows[1], status_text, status_color, controls);

    match world.phase {
        GamePhase::Ready => render_start_overlay(frame, rows[0], world),
        GamePhase::Active if world.paused => render_pause_overlay(frame, rows[0]),
        GamePhase::GameOver => render_game_over_overlay(frame, rows[0], world),
        GamePhase::Active => {}
    }
}

/// Map a world position to a cell within `area`, or None when off-screen.
fn project(area: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
    let col = (x + VIEW_HALF_WIDTH) / (2.0 * VIEW_HALF_WIDTH) * area.width as f64;
    let row = (VIEW_HALF_HEIGHT - y) / (2.0 * VIEW_HALF_HEIGHT) * area.height as f64;
    if col < 0.0 || row < 0.0 {
        return None;
    }
    let (col, row) = (col as u16, row as u16);
    if col >= area.width || row >= area.height {
        return None;
    }
    Some((col, row))
}

/// The world coordinates at the center of a cell.
fn cell_center(area: Rect, col: u16, row: u16) -> (f64, f64) {
    let x = (col as f64 + 0.5) / area.width as f64 * 2.0 * VIEW_HALF_WIDTH - VIEW_HALF_WIDTH;
    let y = VIEW_HALF_HEIGHT - (row as f64 + 0.5) / area.height as f64 * 2.0 * VIEW_HALF_HEIGHT;
    (x, y)
}

fn render_play_area(frame: &mut Frame, area: Rect, world: &GameWorld) {
    let mut lines = Vec::with_capacity(area.height as usize);

    for row in 0..area.height {
        let mut spans = Vec::new();
        for col in 0..area.width {
            let (x, y) = cell_center(area, col, row);
            spans.push(background_span(world, x, y));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);

    render_cat(frame, area, world);
}

/// The sky, sand, sun, or scratcher glyph at a world position.
fn background_span(world: &GameWorld, x: f64, y: f64) -> Span<'static> {
    for entity in world.entities.iter().filter(|e| e.is_scratcher()) {
        if (x - entity.x).abs() < entity.width / 2.0 && (y - entity.y).abs() < entity.height / 2.0 {
            // The cap faces the gap.
            let inner_edge = if entity.y > 0.0 {
                entity.y - entity.height / 2.0
            } else {
                entity.y + entity.height / 2.0
            };
            let glyph = if (y - inner_edge).abs() < 1.0 { "▓" } else { "█" };
            return Span::styled(glyph, Style::default().fg(Color::Yellow));
        }
    }

    if y < SAND_TOP_Y {
        return Span::styled("░", Style::default().fg(Color::Yellow));
    }

    // A small sun in the top-right sky.
    if (x - 8.0).abs() < 1.0 && (y - 7.0).abs() < 1.0 {
        return Span::styled("☀", Style::default().fg(Color::LightYellow));
    }

    Span::raw(" ")
}

/// Overlay the two-row cat sprite at its world position.
fn render_cat(frame: &mut Frame, area: Rect, world: &GameWorld) {
    let Some((col, row)) = project(area, world.cat.x, world.cat.y) else {
        return;
    };

    let sprite = if world.damage_flash_active() {
        CAT_SPRITE_HIT
    } else {
        CAT_SPRITE
    };

    let mut style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    if world.cat.is_invincible(world.elapsed_ms) {
        style = style.add_modifier(Modifier::DIM);
    }

    let width = sprite[0].chars().count() as u16;
    let col = col.saturating_sub(width / 2).min(area.width.saturating_sub(width));

    for (i, sprite_row) in sprite.iter().enumerate() {
        let y = row.saturating_sub(1) + i as u16;
        if y >= area.height {
            break;
        }
        let cell = Rect::new(area.x + col, area.y + y, width.min(area.width), 1);
        frame.render_widget(Paragraph::new(Line::from(Span::styled(*sprite_row, style))), cell);
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, world: &GameWorld) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let best = world.best_half_points.max(world.score_half_points);
    let lines = vec![
        Line::from(Span::styled(
            " Score",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!(" {}", format_half_points(world.score_half_points)),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Best", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            format!(" {}", format_half_points(best)),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Hearts",
            Style::default().fg(Color::DarkGray),
        )),
        {
            let mut hearts = hearts_line(world.hearts, MAX_HEARTS);
            hearts.spans.insert(0, Span::raw(" "));
            hearts
        },
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_start_overlay(frame: &mut Frame, area: Rect, world: &GameWorld) {
    let mut body = vec![
        Line::from("Steer the cat with your pointer."),
        Line::from("Slip through the gaps between the"),
        Line::from("scratching posts. Five hearts, no mercy."),
        Line::from(""),
        Line::from(Span::styled(
            "[Space / Click] Start",
            Style::default().fg(Color::Green),
        )),
    ];
    if world.best_half_points > 0 {
        body.push(Line::from(""));
        body.push(Line::from(Span::styled(
            format!("Best so far: {}", format_half_points(world.best_half_points)),
            Style::default().fg(Color::Cyan),
        )));
    }
    render_center_overlay(frame, area, "SCAMPER", Color::Cyan, body);
}

fn render_pause_overlay(frame: &mut Frame, area: Rect) {
    let body = vec![Line::from(Span::styled(
        "[Esc] Resume",
        Style::default().fg(Color::Green),
    ))];
    render_center_overlay(frame, area, "PAUSED", Color::Yellow, body);
}

fn render_game_over_overlay(frame: &mut Frame, area: Rect, world: &GameWorld) {
    let body = vec![
        Line::from(format!(
            "Final score: {}",
            format_half_points(world.score_half_points)
        )),
        Line::from(Span::styled(
            format!("Best: {}", format_half_points(world.best_half_points)),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[R / Click] Play again",
            Style::default().fg(Color::Green),
        )),
    ];
    render_center_overlay(frame, area, "GAME OVER", Color::Red, body);
}
