use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner;

pub struct SpinnerProps<'a> {
    pub message: &'a str,
    pub tick_count: u32,
    /// Show the accept/deny hint under the message
    pub awaiting_permission: bool,
}

pub fn spinner_frame(tick_count: u32) -> &'static str {
    FRAMES[tick_count as usize % FRAMES.len()]
}

impl Component<Action> for Spinner {
    type Props<'a> = SpinnerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // spinner
            Constraint::Length(1), // blank
            Constraint::Length(1), // message
            Constraint::Length(1), // blank
            Constraint::Length(1), // hint
        ])
        .flex(Flex::Center)
        .split(area);

        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    spinner_frame(props.tick_count),
                    Style::default().fg(Color::Cyan),
                ))
                .centered(),
            ),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(props.message, Style::default().fg(Color::Gray)))
                    .centered(),
            ),
            chunks[2],
        );

        if props.awaiting_permission {
            let hint = Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("y", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to allow or ", Style::default().fg(Color::DarkGray)),
                Span::styled("n", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to deny", Style::default().fg(Color::DarkGray)),
            ])
            .centered();
            frame.render_widget(Paragraph::new(hint), chunks[4]);
        }
    }
}
