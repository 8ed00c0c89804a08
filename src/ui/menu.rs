use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::DeathReason;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from("SNAKE").style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[Q] Quit"),
        Line::from(""),
        Line::from("Arrows/WASD/HJKL to move").style(Style::default().fg(theme.ui_muted)),
    ];

    render_popup(frame, area, " start ", lines, theme);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from("PAUSED").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("[P]/[Esc] Resume"),
        Line::from("[R] Restart"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " pause ", lines, theme);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(theme.food)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(death_reason_text(death_reason)),
        Line::from(""),
        Line::from("[Enter]/[Space] New game"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " game over ", lines, theme);
}

/// Short description of how the game ended.
#[must_use]
pub fn death_reason_text(reason: Option<DeathReason>) -> &'static str {
    match reason {
        Some(DeathReason::WallCollision) => "Cause: hit wall",
        Some(DeathReason::SelfCollision) => "Cause: hit yourself",
        None => "",
    }
}

fn render_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &'static str,
    lines: Vec<Line<'static>>,
    theme: &Theme,
) {
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = content_width.max(title.width()) + 4;
    let height = lines.len() + 2;

    let popup = centered_popup(
        area,
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(height).unwrap_or(u16::MAX),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_text))
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(theme.border)),
            ),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [mid] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(mid);

    center
}
