use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::{Theme, GLYPH_SEPARATOR, HUD_HEIGHT};
use crate::game::{Game, GameStatus};

/// Values shown in the HUD, captured from one engine snapshot.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HudValues {
    pub length: usize,
    pub level: u32,
    pub score: u32,
    pub interval_ms: u128,
    pub ticks: u64,
    pub status: GameStatus,
}

impl HudValues {
    #[must_use]
    pub fn from_game(game: &Game) -> Self {
        Self {
            length: game.snake().len(),
            level: game.speed_level(),
            score: game.score(),
            interval_ms: game.tick_interval().as_millis(),
            ticks: game.tick_count(),
            status: game.status(),
        }
    }
}

/// Renders the HUD rows and returns the remaining play area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, game: &Game, theme: &Theme) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(HUD_HEIGHT / 2),
        Constraint::Length(HUD_HEIGHT - HUD_HEIGHT / 2),
    ])
    .areas(area);

    let values = HudValues::from_game(game);
    frame.render_widget(
        Paragraph::new(score_line(&values, usize::from(score_area.width), theme))
            .alignment(Alignment::Center),
        score_area,
    );
    frame.render_widget(
        Paragraph::new(status_line(&values, theme)).alignment(Alignment::Center),
        status_area,
    );

    play_area
}

/// Length, level and score, with one-letter labels when the full line
/// does not fit in `available_width` columns.
#[must_use]
pub fn score_line(values: &HudValues, available_width: usize, theme: &Theme) -> Line<'static> {
    let compact = score_line_text(values).width() > available_width;
    let labels = if compact {
        ["L", "V", "S"]
    } else {
        ["Length", "Level", "Score"]
    };
    let numbers = [
        values.length.to_string(),
        values.level.to_string(),
        values.score.to_string(),
    ];
    let sep = format!(" {GLYPH_SEPARATOR} ");
    let value_style = Style::default().fg(theme.ui_text);
    let score_style = Style::default()
        .fg(theme.ui_accent)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(8);
    for (index, (label, number)) in labels.iter().zip(numbers).enumerate() {
        if index > 0 {
            spans.push(Span::styled(sep.clone(), Style::default().fg(theme.ui_muted)));
        }
        spans.push(Span::styled(
            format!("{label}: "),
            Style::default().fg(theme.ui_muted),
        ));
        let style = if index == 2 { score_style } else { value_style };
        spans.push(Span::styled(number, style));
    }

    Line::from(spans)
}

fn score_line_text(values: &HudValues) -> String {
    format!(
        "Length: {} {GLYPH_SEPARATOR} Level: {} {GLYPH_SEPARATOR} Score: {}",
        values.length, values.level, values.score
    )
}

/// Tick interval, tick count and a status word.
#[must_use]
pub fn status_line(values: &HudValues, theme: &Theme) -> Line<'static> {
    let status = match values.status {
        GameStatus::Idle => "ready",
        GameStatus::Running => "running",
        GameStatus::Paused => "paused",
        GameStatus::Terminal => "game over",
    };

    Line::from(vec![
        Span::raw(format!("{}ms", values.interval_ms)),
        Span::raw(format!(" {GLYPH_SEPARATOR} ")),
        Span::raw(format!("tick {}", values.ticks)),
        Span::raw(format!(" {GLYPH_SEPARATOR} ")),
        Span::styled(status, Style::default().fg(theme.ui_accent)),
    ])
    .style(Style::default().fg(theme.ui_muted))
}
