use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::constants::PENDING_LABEL;
use crate::ui::chat_loop::ChatApp;
use crate::utils::scroll;

/// Transcript pane content: every message in order, then the pending
/// indicator line when a reply is outstanding. Rebuilt each frame so theme
/// switches restyle the whole history.
pub fn build_display_lines(app: &ChatApp) -> Vec<Line<'_>> {
    let theme = app.themes.theme();
    let mut lines = Vec::new();

    for msg in app.session.messages() {
        if msg.is_user() {
            let mut content_lines = msg.text.lines();
            if let Some(first) = content_lines.next() {
                lines.push(Line::from(vec![
                    Span::styled("You: ", theme.user_prefix_style),
                    Span::styled(first, theme.user_text_style),
                ]));
            }
            for rest in content_lines {
                lines.push(Line::from(Span::styled(rest, theme.user_text_style)));
            }
        } else {
            for content_line in msg.text.lines() {
                if content_line.trim().is_empty() {
                    lines.push(Line::from(""));
                } else {
                    lines.push(Line::from(Span::styled(
                        content_line,
                        theme.assistant_text_style,
                    )));
                }
            }
        }
        lines.push(Line::from("")); // Empty line for spacing
    }

    if app.view.pending_visible {
        lines.push(Line::from(Span::styled(PENDING_LABEL, theme.pending_style)));
        lines.push(Line::from(""));
    }

    lines
}

fn input_title(app: &ChatApp) -> String {
    if app.session.is_confirming_clear() {
        "Are you sure you want to clear the chat history? (y/N)".to_string()
    } else if app.session.is_awaiting_response() {
        "Waiting for HealthAssist AI... (Ctrl+C to quit)".to_string()
    } else {
        format!(
            "Type your message (Enter to send, F1-F4 presets, Ctrl+T {}, Ctrl+L clear, Ctrl+S export, Ctrl+C quit)",
            app.themes.toggle_label()
        )
    }
}

pub fn ui(f: &mut Frame, app: &ChatApp) {
    let theme = app.themes.theme();

    // Paint the full frame in the theme background before laying anything out
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        f.area(),
    );

    let input_area_height = app.input_area_height(f.area().width);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(input_area_height + 2), // +2 for borders
        ])
        .split(f.area());

    let lines = build_display_lines(app);

    let available_height = chunks[0].height.saturating_sub(1); // Account for title
    let total_lines = scroll::wrapped_line_count(&lines, chunks[0].width);
    let max_offset = scroll::max_scroll_offset(total_lines, available_height);
    let scroll_offset = if app.view.auto_scroll {
        max_offset
    } else {
        app.view.scroll_offset.min(max_offset)
    };

    let title = match &app.status {
        Some(status) => format!(
            "HealthAssist v{} - {} • {}",
            env!("CARGO_PKG_VERSION"),
            app.endpoint,
            status
        ),
        None => format!("HealthAssist v{} - {}", env!("CARGO_PKG_VERSION"), app.endpoint),
    };

    let messages_paragraph = Paragraph::new(lines)
        .block(Block::default().title(Span::styled(title, theme.title_style)))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));

    f.render_widget(messages_paragraph, chunks[0]);

    // The input renders disabled for the whole time a reply is outstanding
    let input_style = if app.session.is_awaiting_response() {
        theme.input_text_style.add_modifier(Modifier::DIM)
    } else {
        theme.input_text_style
    };

    let input = Paragraph::new(app.input.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.input_border_style)
                .title(Span::styled(input_title(app), theme.input_title_style)),
        )
        .wrap(Wrap { trim: false }); // Don't trim whitespace to preserve newlines

    f.render_widget(input, chunks[1]);

    if !app.session.is_awaiting_response() && !app.session.is_confirming_clear() {
        let (line, column) = app.input_cursor_line_col();
        let current_line = app
            .input
            .split('\n')
            .nth(line)
            .unwrap_or("");
        let prefix: String = current_line.chars().take(column).collect();
        let cursor_x = (prefix.width() as u16 + 1).min(chunks[1].width.saturating_sub(2));
        let cursor_y = chunks[1].y + 1 + (line as u16).min(input_area_height.saturating_sub(1));
        f.set_cursor_position((chunks[1].x + cursor_x, cursor_y));
    }
}
