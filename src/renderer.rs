use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{BORDER_HALF_BLOCK, CELL_COLUMNS, GLYPH_CELL, GLYPH_FOOD, GridSize, Theme};
use crate::game::GameState;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, &hud_info);
    let theme = hud_info.theme;

    let board_area = board_rect(play_area, state.grid_size());
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.board_bg));

    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_grid(frame, inner, state.grid_size(), theme);
    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    if state.is_terminal() {
        render_game_over_menu(
            frame,
            play_area,
            state.score(),
            state.snake().len(),
            state.collision(),
            theme,
        );
    }
}

/// Centers a bordered board of `grid` cells inside `area`.
fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid.side().saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = grid.side().saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, grid: GridSize, theme: &Theme) {
    let side = i32::from(grid.side());
    let buffer = frame.buffer_mut();

    for y in 0..side {
        for x in 0..side {
            let Some((col, row)) = logical_to_terminal(inner, grid, Position::new(x, y)) else {
                continue;
            };
            let bg = if (x + y) % 2 == 0 {
                theme.board_bg
            } else {
                theme.grid_bg
            };
            buffer.set_string(col, row, "  ", Style::new().bg(bg));
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some(food) = state.food() else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, state.grid_size(), food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for (index, segment) in state.snake().segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, state.grid_size(), *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body)
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

/// Maps a logical cell to the terminal column/row of its left half.
fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
