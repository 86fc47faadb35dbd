use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::clock::{Clock, SystemClock};
use crate::icons::{self, IconSize};
use crate::season::{Season, resolve_season};

/// What the display shows for a latitude at the current month
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeasonGreeting {
    pub season: Season,
    pub text: &'static str,
    pub icon_name: &'static str,
}

pub struct SeasonDisplayProps {
    pub latitude: f64,
}

/// Season greeting: icon, text, icon.
///
/// The month is read from the clock on every render, so the caller only
/// supplies a latitude.
#[derive(Clone, Debug)]
pub struct SeasonDisplay<C: Clock = SystemClock> {
    clock: C,
}

impl<C: Clock> SeasonDisplay<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn greeting(&self, latitude: f64) -> SeasonGreeting {
        let season = resolve_season(latitude, self.clock.month0());
        let record = season.display_record();
        SeasonGreeting {
            season,
            text: record.text,
            icon_name: record.icon_name,
        }
    }
}

/// Spacer between title and icon row.
const LAYOUT_FIXED: u16 = 1;

/// Title height caps: terminus(6), miniwi(4), plain(1).
const TITLE_TIERS: [u16; 3] = [6, 4, 1];

struct LayoutSizing {
    /// Icon art for both sides, or `None` for the one-line glyph row
    art: Option<Text<'static>>,
    row_h: u16,
    title_cap: u16,
}

/// Gap kept on each side of the greeting between the two icons.
const TEXT_PADDING: u16 = 2;

fn candidate_sizes(budget: u16) -> &'static [IconSize] {
    match IconSize::for_height(budget) {
        Some(IconSize::Large) => &[IconSize::Large, IconSize::Small],
        Some(IconSize::Small) => &[IconSize::Small],
        None => &[],
    }
}

/// Largest icon that fits both dimensions with the greeting between two
/// copies, shrinking the title before dropping to the glyph row.
fn compute_layout(area: Rect, icon_name: &str, text_width: u16) -> LayoutSizing {
    for &title_cap in &TITLE_TIERS {
        let budget = area.height.saturating_sub(title_cap + LAYOUT_FIXED);
        for &size in candidate_sizes(budget) {
            let Some(art) = icons::icon_art(icon_name, size) else {
                continue;
            };
            let needed = 2 * art.width() as u16 + text_width + TEXT_PADDING;
            if needed <= area.width {
                return LayoutSizing {
                    art: Some(art),
                    row_h: size.height(),
                    title_cap,
                };
            }
        }
    }
    LayoutSizing {
        art: None,
        row_h: 1,
        title_cap: area.height.saturating_sub(LAYOUT_FIXED + 1).min(TITLE_TIERS[0]),
    }
}

fn theme(season: Season) -> (ArtColor, ArtColor, Color) {
    match season {
        Season::Summer => (
            ArtColor::rgb(255, 220, 100),
            ArtColor::rgb(255, 120, 80),
            Color::Rgb(255, 190, 90),
        ),
        Season::Winter => (
            ArtColor::rgb(150, 200, 255),
            ArtColor::rgb(220, 240, 255),
            Color::Rgb(170, 210, 255),
        ),
    }
}

fn icon_glyph(icon_name: &str) -> String {
    match icons::icon_emoji(icon_name) {
        Some(emoji) => emoji.to_string(),
        None => format!("[{}]", icon_name),
    }
}

impl<C: Clock> Component<Action> for SeasonDisplay<C> {
    type Props<'a> = SeasonDisplayProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let greeting = self.greeting(props.latitude);
        let (grad_start, grad_end, text_color) = theme(greeting.season);
        let text_line = Line::from(Span::styled(
            greeting.text,
            Style::default().fg(text_color).bold(),
        ));
        let sizing = compute_layout(area, greeting.icon_name, text_line.width() as u16);

        let chunks = Layout::vertical([
            Constraint::Max(sizing.title_cap),
            Constraint::Length(LAYOUT_FIXED),
            Constraint::Length(sizing.row_h),
        ])
        .flex(Flex::Center)
        .split(area);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(Fill::Linear(LinearGradient::horizontal(grad_start, grad_end)));
        frame.render_widget(ArtBox::new(&renderer, greeting.season.label()), chunks[0]);

        let Some(art) = sizing.art else {
            let glyph = icon_glyph(greeting.icon_name);
            let line = Line::from(vec![
                Span::raw(glyph.clone()),
                Span::raw("  "),
                Span::styled(greeting.text, Style::default().fg(text_color).bold()),
                Span::raw("  "),
                Span::raw(glyph),
            ])
            .centered();
            frame.render_widget(Paragraph::new(line), chunks[2]);
            return;
        };

        let icon_w = art.width() as u16;
        let row = Layout::horizontal([
            Constraint::Length(icon_w),
            Constraint::Min(text_line.width() as u16 + TEXT_PADDING),
            Constraint::Length(icon_w),
        ])
        .flex(Flex::Center)
        .split(chunks[2]);

        frame.render_widget(Paragraph::new(art.clone()).alignment(Alignment::Left), row[0]);
        frame.render_widget(Paragraph::new(art).alignment(Alignment::Left), row[2]);

        let middle = Rect {
            y: row[1].y + row[1].height / 2,
            height: 1.min(row[1].height),
            ..row[1]
        };
        frame.render_widget(Paragraph::new(text_line.centered()), middle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use tui_dispatch::testing::*;

    fn render_at(latitude: f64, month: u32, width: u16, height: u16) -> String {
        let mut render = RenderHarness::new(width, height);
        let mut component = SeasonDisplay::with_clock(FixedClock(month));
        render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), SeasonDisplayProps { latitude });
        })
    }

    #[test]
    fn test_greeting_north_july() {
        let display = SeasonDisplay::with_clock(FixedClock(6));
        let greeting = display.greeting(40.7);
        assert_eq!(greeting.season, Season::Summer);
        assert_eq!(greeting.text, "Lets hit the beach");
        assert_eq!(greeting.icon_name, "sun");
    }

    #[test]
    fn test_greeting_south_july() {
        let display = SeasonDisplay::with_clock(FixedClock(6));
        let greeting = display.greeting(-33.9);
        assert_eq!(greeting.season, Season::Winter);
        assert_eq!(greeting.text, "Burr, its cold");
        assert_eq!(greeting.icon_name, "snowflake");
    }

    #[test]
    fn test_greeting_north_december() {
        let display = SeasonDisplay::with_clock(FixedClock(11));
        assert_eq!(display.greeting(51.5).season, Season::Winter);
    }

    #[test]
    fn test_greeting_is_stable() {
        let display = SeasonDisplay::with_clock(FixedClock(4));
        assert_eq!(display.greeting(10.0), display.greeting(10.0));
    }

    #[test]
    fn test_render_summer() {
        let output = render_at(40.7, 6, 70, 20);
        assert!(output.contains("Lets hit the beach"), "output:\n{}", output);
    }

    #[test]
    fn test_render_winter() {
        let output = render_at(-33.9, 6, 70, 20);
        assert!(output.contains("Burr, its cold"), "output:\n{}", output);
    }

    #[test]
    fn test_render_is_stable() {
        assert_eq!(render_at(40.7, 6, 70, 20), render_at(40.7, 6, 70, 20));
    }

    #[test]
    fn test_render_wide_area_draws_two_suns() {
        let output = render_at(40.7, 6, 70, 20);
        assert_eq!(output.matches(".---.").count(), 2, "output:\n{}", output);
    }

    #[test]
    fn test_render_narrow_area_keeps_both_icons() {
        let output = render_at(40.7, 6, 28, 9);
        assert!(output.contains("Lets hit the beach"), "output:\n{}", output);
        assert_eq!(output.matches('\u{2600}').count(), 2, "output:\n{}", output);
    }

    #[test]
    fn test_layout_drops_art_when_too_narrow() {
        let narrow = compute_layout(Rect::new(0, 0, 28, 20), "sun", 18);
        assert!(narrow.art.is_none());
        assert_eq!(narrow.row_h, 1);

        // Large needs 2 * 15 + 18 + 2 columns; Small needs 2 * 9 + 18 + 2
        let medium = compute_layout(Rect::new(0, 0, 40, 20), "sun", 18);
        assert_eq!(medium.row_h, IconSize::Small.height());

        let wide = compute_layout(Rect::new(0, 0, 50, 20), "sun", 18);
        assert_eq!(wide.row_h, IconSize::Large.height());
    }

    #[test]
    fn test_render_tiny_area_uses_glyphs() {
        let output = render_at(40.7, 6, 60, 3);
        assert!(output.contains("Lets hit the beach"), "output:\n{}", output);
    }
}
