use super::Theme;
use crate::vim::InputBuffer;
use ratatui::{prelude::*, widgets::Paragraph};

/// How a text field is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDisplay {
    /// Not focused: plain text, or the placeholder when empty
    Idle,
    /// Focused in normal mode: block cursor
    Focused,
    /// Focused in insert mode: bar cursor
    Editing,
}

/// Draw a one-line input with vim-style cursor
pub fn draw_input(
    frame: &mut Frame,
    area: Rect,
    buffer: &InputBuffer,
    placeholder: &str,
    display: FieldDisplay,
    theme: &Theme,
) {
    if area.is_empty() {
        return;
    }
    let content = buffer.content();
    let cursor_pos = buffer.cursor();

    let line = match display {
        FieldDisplay::Editing => {
            let before: String = content.chars().take(cursor_pos).collect();
            let after: String = content.chars().skip(cursor_pos).collect();
            Line::from(vec![
                Span::styled(before, theme.style()),
                Span::styled("|", theme.primary_style().add_modifier(Modifier::BOLD)),
                Span::styled(after, theme.style()),
            ])
        }
        FieldDisplay::Focused => {
            let chars: Vec<char> = content.chars().collect();
            let mut spans: Vec<Span> = chars
                .iter()
                .enumerate()
                .map(|(i, ch)| {
                    let style = if i == cursor_pos {
                        theme.style().add_modifier(Modifier::REVERSED)
                    } else {
                        theme.style()
                    };
                    Span::styled(ch.to_string(), style)
                })
                .collect();
            if cursor_pos >= chars.len() {
                spans.push(Span::styled(" ", theme.style().add_modifier(Modifier::REVERSED)));
            }
            Line::from(spans)
        }
        FieldDisplay::Idle if content.is_empty() => {
            Line::from(Span::styled(placeholder.to_string(), theme.muted_style()))
        }
        FieldDisplay::Idle => Line::from(Span::styled(content.to_string(), theme.style())),
    };

    frame.render_widget(Paragraph::new(line), area);
}
