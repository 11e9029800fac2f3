//! Operand stack rendering, top of stack first

use crate::machine::stack::Stack;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Scroll state for the stack pane
#[derive(Debug, Default)]
pub struct StackScrollState {
    pub offset: usize,
}

/// Printable form of a value when read as a character code
fn char_hint(value: i64) -> Option<String> {
    let c = u32::try_from(value).ok().and_then(char::from_u32)?;
    match c {
        ' ' => Some("' '".to_string()),
        '\n' => Some("'\\n'".to_string()),
        c if c.is_control() => None,
        c => Some(format!("'{}'", c)),
    }
}

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    stack: &Stack,
    is_focused: bool,
    scroll_state: &mut StackScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Stack ({}) ", stack.depth()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if stack.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let all_items: Vec<ListItem> = stack
        .values()
        .iter()
        .rev()
        .enumerate()
        .map(|(depth, &value)| {
            let marker = if depth == 0 { "top " } else { "    " };
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(
                    format!("{:>12}", value),
                    Style::default()
                        .fg(DEFAULT_THEME.digit)
                        .add_modifier(if depth == 0 {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                ),
            ];
            if let Some(hint) = char_hint(value) {
                spans.push(Span::styled(
                    format!("  {}", hint),
                    Style::default().fg(DEFAULT_THEME.string),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        scroll_state.offset = scroll_state.offset.min(max_scroll);
    } else {
        scroll_state.offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_hint() {
        assert_eq!(char_hint(65).as_deref(), Some("'A'"));
        assert_eq!(char_hint(32).as_deref(), Some("' '"));
        assert_eq!(char_hint(7), None);
        assert_eq!(char_hint(-4), None);
    }
}
