use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Flex, Layout, Margin};
use ratatui::prelude::{Frame, Rect};
use ratatui::{
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, SeasonDisplay, SeasonDisplayProps, Spinner, SpinnerProps};
use crate::action::Action;
use crate::clock::{Clock, SystemClock};
use crate::state::{AppState, AppView, PENDING_PROMPT};

/// Props for SeasonApp - read-only view of state
pub struct SeasonAppProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Root component: picks the error, season or pending view
pub struct SeasonApp<C: Clock = SystemClock> {
    display: SeasonDisplay<C>,
}

impl<C: Clock> SeasonApp<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            display: SeasonDisplay::with_clock(clock),
        }
    }
}

impl<C: Clock> Component<Action> for SeasonApp<C> {
    type Props<'a> = SeasonAppProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let awaiting = props.state.awaiting_permission();
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter if awaiting => Some(Action::PermissionAccept),
                KeyCode::Char('n') if awaiting => Some(Action::PermissionDeny),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: SeasonAppProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Framed content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(" seasons ");
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        match props.state.view() {
            AppView::Error(message) => render_error(frame, inner, message),
            AppView::Ready(latitude) => {
                self.display
                    .render(frame, inner, SeasonDisplayProps { latitude });
            }
            AppView::Pending => {
                let mut spinner = Spinner;
                spinner.render(
                    frame,
                    inner,
                    SpinnerProps {
                        message: PENDING_PROMPT,
                        tick_count: props.state.tick_count,
                        awaiting_permission: props.state.awaiting_permission(),
                    },
                );
            }
        }

        let mut hints = Vec::with_capacity(3);
        if props.state.awaiting_permission() {
            hints.push(StatusBarHint::new("y", "allow"));
            hints.push(StatusBarHint::new("n", "deny"));
        }
        hints.push(StatusBarHint::new("q", "quit"));

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let area = area.inner(Margin::new(1, 1));
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let line = Line::from(vec![
        Span::styled("Error: ", Style::default().fg(Color::Red).bold()),
        Span::styled(message.to_string(), Style::default().fg(Color::Rgb(200, 100, 100))),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::state::LocationRequest;
    use tui_dispatch::testing::*;

    fn awaiting() -> AppState {
        AppState {
            request: LocationRequest::AwaitingPermission,
            ..Default::default()
        }
    }

    #[test]
    fn test_handle_event_accept() {
        let mut component = SeasonApp::with_clock(FixedClock(0));
        let state = awaiting();
        let props = SeasonAppProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("y")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::PermissionAccept);
    }

    #[test]
    fn test_handle_event_deny() {
        let mut component = SeasonApp::with_clock(FixedClock(0));
        let state = awaiting();
        let props = SeasonAppProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("n")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::PermissionDeny);
    }

    #[test]
    fn test_permission_keys_ignored_once_locating() {
        let mut component = SeasonApp::with_clock(FixedClock(0));
        let state = AppState {
            request: LocationRequest::Locating,
            ..Default::default()
        };
        let props = SeasonAppProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("y")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_handle_event_quit() {
        let mut component = SeasonApp::with_clock(FixedClock(0));
        let state = AppState::default();
        let props = SeasonAppProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("q")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = SeasonApp::with_clock(FixedClock(0));
        let state = awaiting();
        let props = SeasonAppProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("y")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_error() {
        let mut render = RenderHarness::new(60, 20);
        let mut component = SeasonApp::with_clock(FixedClock(6));

        let state = AppState {
            error_message: Some("Timeout expired".into()),
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            let props = SeasonAppProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Error: Timeout expired"), "output:\n{}", output);
    }
}
