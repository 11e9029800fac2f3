//! Status bar rendering with keybindings and state indicators

use crate::interpreter::errors::RuntimeError;
use crate::machine::{cursor::Direction, Flags};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub current_step: usize,
    pub total_steps: usize,
    pub flags: Flags,
    pub direction: Direction,
    pub last_instruction: Option<char>,
    /// How the run ended, if not by `E`
    pub error: Option<&'a RuntimeError>,
    pub is_playing: bool,
}

fn badge(text: &str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", text),
        Style::default()
            .bg(bg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let sep_style = bar_style.fg(DEFAULT_THEME.comment);
    let desc_style = bar_style.fg(DEFAULT_THEME.fg);

    // Left side: step info, machine state, and status
    let step_bg = if data.error.is_some() {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.primary
    };
    let mut left_spans = vec![
        badge(
            &format!("Step {}/{}", data.current_step + 1, data.total_steps.max(1)),
            step_bg,
        ),
        Span::styled(
            format!(" {} ", data.direction.arrow()),
            bar_style.fg(DEFAULT_THEME.arrow).add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(c) = data.last_instruction {
        left_spans.push(Span::styled(format!("ran '{}' ", c), desc_style));
    }
    if data.flags.string_mode {
        left_spans.push(badge("STR", DEFAULT_THEME.string));
    }
    if data.flags.skip_next {
        left_spans.push(badge("SKIP", DEFAULT_THEME.secondary));
    }

    left_spans.push(Span::styled(" | ", sep_style));
    let message = match data.error {
        Some(e) if data.current_step + 1 >= data.total_steps => e.to_string(),
        _ => data.message.to_string(),
    };
    left_spans.push(Span::styled(
        format!(" {} ", message),
        bar_style.fg(if data.error.is_some() {
            DEFAULT_THEME.error
        } else {
            DEFAULT_THEME.fg
        }),
    ));

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar_style)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);

    let mut right_spans = vec![
        Span::styled(" ←/→ ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↵ / ⌫ ", key_style),
        Span::styled(" end/start ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let is_at_start = data.current_step == 0;
    let is_at_end = data.current_step + 1 >= data.total_steps;

    let indicator = if data.is_playing {
        Some(badge("▶ PLAYING", DEFAULT_THEME.secondary))
    } else if is_at_end && data.error.is_some() {
        Some(badge("FAILED", DEFAULT_THEME.error))
    } else if is_at_end && data.flags.halted {
        Some(badge("HALTED", DEFAULT_THEME.error))
    } else if is_at_end {
        Some(badge("END", DEFAULT_THEME.error))
    } else if is_at_start {
        Some(badge("START", DEFAULT_THEME.success))
    } else {
        None
    };
    if let Some(indicator) = indicator {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(indicator);
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar_style)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
