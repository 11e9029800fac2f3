//! Program grid rendering with cursor and execution trail
//!
//! The grid pane shows the program text with a row-number gutter. The cell
//! under the cursor is drawn as a solid block and the cells executed by the
//! last few steps are shaded, brightest first, so the path of control flow
//! is visible while stepping.
//!
//! The viewport follows the cursor in both axes. When the cursor is off the
//! stored text the viewport stays put and the title reports where it is.

use crate::grid::{Grid, Position};
use crate::machine::cursor::Cursor;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashMap;

/// Width of the row-number gutter, including its trailing space
const GUTTER_WIDTH: usize = 5;

/// Scroll state for the grid pane
#[derive(Debug, Default)]
pub struct GridScrollState {
    pub row_offset: usize,
    pub col_offset: usize,
}

/// Data needed to render the grid pane
pub struct GridRenderData<'a> {
    pub grid: &'a Grid,
    pub cursor: Cursor,
    /// Recently executed positions, oldest first
    pub trail: &'a [Position],
    pub string_mode: bool,
}

/// Style for a character by the role it plays in normal mode
fn instruction_style(c: char) -> Style {
    match c {
        '0'..='9' => Style::default().fg(DEFAULT_THEME.digit),
        '>' | '<' | '^' | 'v' | '_' | '|' => Style::default()
            .fg(DEFAULT_THEME.arrow)
            .add_modifier(Modifier::BOLD),
        '+' | '-' | '*' | 'P' | 'X' | 'D' => Style::default().fg(DEFAULT_THEME.operator),
        'I' | 'C' | 'S' | 'E' => Style::default()
            .fg(DEFAULT_THEME.io)
            .add_modifier(Modifier::BOLD),
        '"' => Style::default().fg(DEFAULT_THEME.string),
        _ => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// Map each trail position to its age (0 = most recent)
fn trail_ages(trail: &[Position]) -> FxHashMap<Position, usize> {
    let mut ages = FxHashMap::default();
    for (age, position) in trail.iter().rev().enumerate() {
        ages.entry(*position).or_insert(age);
    }
    ages
}

/// Fade the trail color towards the background with age
fn trail_color(age: usize, trail_len: usize) -> Color {
    let Color::Rgb(r, g, b) = DEFAULT_THEME.trail_bg else {
        return DEFAULT_THEME.trail_bg;
    };
    let len = trail_len.max(1) as u32;
    let keep = len.saturating_sub(age as u32);
    let scale = |c: u8| -> u8 { (30 + (u32::from(c).saturating_sub(30) * keep / len)) as u8 };
    Color::Rgb(scale(r), scale(g), scale(b))
}

/// Keep `target` inside `[offset, offset + visible)` by moving `offset`
fn follow(offset: &mut usize, target: usize, visible: usize) {
    if target < *offset {
        *offset = target;
    } else if target >= *offset + visible {
        *offset = target + 1 - visible;
    }
}

/// Render the program grid pane
pub fn render_grid_pane(
    frame: &mut Frame,
    area: Rect,
    data: GridRenderData,
    is_focused: bool,
    scroll_state: &mut GridScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let position = data.cursor.position;
    let on_grid = data.grid.contains(position);
    let title = if on_grid {
        format!(
            " Program ({}, {}) {} ",
            position.row,
            position.col,
            data.cursor.direction.arrow()
        )
    } else {
        format!(
            " Program ({}, {}) {} off grid ",
            position.row,
            position.col,
            data.cursor.direction.arrow()
        )
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.grid.is_empty() {
        let paragraph = Paragraph::new("(empty program)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let visible_width = (area.width.saturating_sub(2) as usize)
        .saturating_sub(GUTTER_WIDTH)
        .max(1);

    if position.row >= 0 && position.col >= 0 {
        follow(&mut scroll_state.row_offset, position.row as usize, visible_height);
        follow(&mut scroll_state.col_offset, position.col as usize, visible_width);
    }

    // The cursor may be below the last stored row
    let content_rows = data.grid.height().max(position.row.max(0) as usize + 1);
    scroll_state.row_offset = scroll_state
        .row_offset
        .min(content_rows.saturating_sub(visible_height));

    let ages = trail_ages(data.trail);

    let lines: Vec<Line> = (scroll_state.row_offset..scroll_state.row_offset + visible_height)
        .map(|row_idx| {
            let is_current_row = row_idx as i64 == position.row;
            let row = data.grid.rows().get(row_idx);

            let gutter = match row {
                Some(_) => format!("{:4} ", row_idx),
                None => "   ~ ".to_string(),
            };
            let gutter_style = if is_current_row {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(gutter, gutter_style)];

            // Draw past the end of a ragged row only as far as a marked cell
            let marked_end = ages
                .keys()
                .chain(std::iter::once(&position))
                .filter(|p| p.row == row_idx as i64 && p.col >= 0)
                .map(|p| p.col as usize + 1)
                .max()
                .unwrap_or(0);
            let draw_end = row
                .map_or(0, Vec::len)
                .max(marked_end)
                .min(scroll_state.col_offset + visible_width);

            for col_idx in scroll_state.col_offset..draw_end {
                let here = Position::new(row_idx as i64, col_idx as i64);
                let glyph = row.and_then(|r| r.get(col_idx)).copied().unwrap_or(' ');

                let mut style = instruction_style(glyph);
                if is_current_row {
                    style = style.bg(DEFAULT_THEME.current_line_bg);
                }
                if let Some(&age) = ages.get(&here) {
                    style = style.bg(trail_color(age, data.trail.len()));
                }
                if here == position {
                    style = style
                        .bg(if data.string_mode {
                            DEFAULT_THEME.string
                        } else {
                            DEFAULT_THEME.cursor_bg
                        })
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD);
                }

                spans.push(Span::styled(glyph.to_string(), style));
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_ages_keep_most_recent_visit() {
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        let ages = trail_ages(&[a, b, a]);
        assert_eq!(ages[&a], 0);
        assert_eq!(ages[&b], 1);
    }

    #[test]
    fn test_follow_keeps_target_visible() {
        let mut offset = 0;
        follow(&mut offset, 12, 10);
        assert_eq!(offset, 3);
        follow(&mut offset, 1, 10);
        assert_eq!(offset, 1);
        follow(&mut offset, 5, 10);
        assert_eq!(offset, 1);
    }
}
