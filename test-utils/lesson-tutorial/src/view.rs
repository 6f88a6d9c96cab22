use lesson_engine::{LessonStep, TerminalConfig, TerminalSession};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Narrative pane for a step
pub fn step_content(step: &LessonStep) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            step.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for text in step.content.lines() {
        lines.push(step_line(text));
    }

    lines
}

// Backticked spans are commands to type.
fn step_line(text: &str) -> Line<'static> {
    let spans: Vec<Span<'static>> = text
        .split('`')
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            if i % 2 == 1 {
                Span::styled(part.to_string(), Style::default().fg(Color::Green))
            } else {
                Span::raw(part.to_string())
            }
        })
        .collect();
    Line::from(spans)
}

/// Banner followed by the scrollback, in render order
pub fn terminal_lines(config: &TerminalConfig, session: &TerminalSession) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = config
        .initial_messages
        .iter()
        .map(|m| Line::from(Span::styled(m.clone(), Style::default().fg(Color::DarkGray))))
        .collect();

    for entry in session.history() {
        lines.push(Line::from(vec![
            Span::styled(config.prompt.clone(), Style::default().fg(Color::Green)),
            Span::styled(entry.command.clone(), Style::default().fg(Color::Yellow)),
        ]));

        let style = if entry.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        // Verbatim: a trailing newline or an empty output still takes a row.
        for output_line in entry.output.split('\n') {
            lines.push(Line::from(Span::styled(output_line.to_string(), style)));
        }
    }

    lines
}

/// Scroll offset that keeps the newest lines in view
pub fn bottom_scroll(total_lines: usize, visible_rows: u16) -> u16 {
    let hidden = total_lines.saturating_sub(visible_rows as usize);
    u16::try_from(hidden).unwrap_or(u16::MAX)
}
