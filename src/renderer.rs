use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::{
    GridSize, Theme, BORDER_SET, CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY,
    GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP,
    GLYPH_SNAKE_TAIL, THEME,
};
use crate::game::{Game, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, game: &Game) {
    let theme = &THEME;
    let area = frame.area();
    let play_area = render_hud(frame, area, game, theme);

    let Some(field) = field_rect(play_area, game.grid()) else {
        render_too_small(frame, play_area, game.grid(), theme);
        return;
    };

    let block = Block::bordered()
        .border_set(BORDER_SET)
        .border_style(Style::new().fg(theme.border));
    let inner = block.inner(field);
    frame.render_widget(block, field);

    render_food(frame, inner, game, theme);
    render_snake(frame, inner, game, theme);

    match game.status() {
        GameStatus::Idle => render_start_menu(frame, inner, theme),
        GameStatus::Paused => render_pause_menu(frame, inner, theme),
        GameStatus::Terminal => {
            render_game_over_menu(frame, inner, game.score(), game.death_reason(), theme)
        }
        GameStatus::Running => {}
    }
}

/// Bordered rect for the play field centred in `area`, or `None` if it
/// does not fit.
#[must_use]
pub fn field_rect(area: Rect, grid: GridSize) -> Option<Rect> {
    let width = grid.width.checked_mul(CELL_WIDTH)?.checked_add(2)?;
    let height = grid.height.checked_add(2)?;
    if width > area.width || height > area.height {
        return None;
    }

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [field] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    Some(field)
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, grid: GridSize, theme: &Theme) {
    let needed_width = u32::from(grid.width) * u32::from(CELL_WIDTH) + 2;
    let needed_height = u32::from(grid.height) + 2;
    let message = format!(
        "Terminal too small: need {needed_width}x{needed_height}, have {}x{}",
        area.width, area.height
    );

    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::new().fg(theme.ui_accent)),
        area,
    );
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, game: &Game, theme: &Theme) {
    let Some(food) = game.food() else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, game.grid(), food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, game: &Game, theme: &Theme) {
    let snake = game.snake();
    let grid = game.grid();
    let buffer = frame.buffer_mut();

    let body_style = Style::new().fg(theme.snake_body);
    for segment in snake.segments().skip(1) {
        if let Some((x, y)) = logical_to_terminal(inner, grid, *segment) {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, body_style);
        }
    }

    if snake.len() > 1 {
        if let Some((x, y)) = logical_to_terminal(inner, grid, snake.tail()) {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail));
        }
    }

    // Head last so it stays visible over any other glyph.
    if let Some((x, y)) = logical_to_terminal(inner, grid, snake.head()) {
        let head_style = Style::new()
            .fg(theme.snake_head)
            .add_modifier(Modifier::BOLD);
        buffer.set_string(x, y, head_glyph(game.direction()), head_style);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
