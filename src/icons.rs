//! Season icon art, looked up by icon name
//!
//! Multi-layer art is composited with one colour per layer; spaces are
//! transparent so a later layer only paints where it has glyphs.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span, Text},
};

mod art {
    pub mod sun {
        pub const SMALL_RAYS: &str = concat!(
            " \\     /\n",
            "        \n",
            "-       -\n",
            "        \n",
            " /     \\\n",
        );
        pub const SMALL_CORE: &str = concat!(
            "        \n",
            "   .-.  \n",
            "  (   ) \n",
            "   `-'  \n",
            "        \n",
        );
        pub const LARGE_RAYS: &str = concat!(
            "       |\n",
            "   \\       /\n",
            "\n",
            "\n",
            "---         ---\n",
            "\n",
            "\n",
            "   /       \\\n",
            "       |\n",
        );
        pub const LARGE_CORE: &str = concat!(
            "\n",
            "\n",
            "     .---.\n",
            "    /     \\\n",
            "   |       |\n",
            "    \\     /\n",
            "     '---'\n",
            "\n",
            "\n",
        );
    }

    pub mod snowflake {
        pub const SMALL_ARMS: &str = concat!(
            " \\  |  /\n",
            "  \\ | /\n",
            "---   ---\n",
            "  / | \\\n",
            " /  |  \\\n",
        );
        pub const SMALL_CORE: &str = concat!(
            "\n",
            "\n",
            "    *\n",
            "\n",
            "\n",
        );
        pub const LARGE_ARMS: &str = concat!(
            "       |\n",
            "  \\  \\ | /  /\n",
            "   \\  \\|/  /\n",
            "    \\  |  /\n",
            " -----   -----\n",
            "    /  |  \\\n",
            "   /  /|\\  \\\n",
            "  /  / | \\  \\\n",
            "       |\n",
        );
        pub const LARGE_CORE: &str = concat!(
            "\n",
            "\n",
            "\n",
            "\n",
            "      ***\n",
            "\n",
            "\n",
            "\n",
            "\n",
        );
    }
}

struct IconLayer {
    content: &'static str,
    color: Color,
}

type Cell = (char, Color);

const BLANK: Cell = (' ', Color::Reset);

/// Stack layers onto one cell grid, then emit one span per colour run.
fn composite_layers(layers: &[IconLayer]) -> Text<'static> {
    let mut grid: Vec<Vec<Cell>> = Vec::new();
    for layer in layers {
        for (row, line) in layer.content.lines().enumerate() {
            if grid.len() <= row {
                grid.resize_with(row + 1, Vec::new);
            }
            let cells = &mut grid[row];
            for (col, ch) in line.chars().enumerate().filter(|(_, ch)| *ch != ' ') {
                if cells.len() <= col {
                    cells.resize(col + 1, BLANK);
                }
                cells[col] = (ch, layer.color);
            }
        }
    }

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let lines: Vec<Line<'static>> = grid
        .into_iter()
        .map(|mut cells| {
            cells.resize(width, BLANK);
            Line::from(color_runs(&cells))
        })
        .collect();
    Text::from(lines)
}

fn color_runs(cells: &[Cell]) -> Vec<Span<'static>> {
    cells
        .chunk_by(|a, b| a.1 == b.1)
        .map(|run| {
            let content: String = run.iter().map(|(ch, _)| *ch).collect();
            Span::styled(content, Style::default().fg(run[0].1))
        })
        .collect()
}

/// Icon size categories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconSize {
    /// 5 lines
    Small,
    /// 9 lines
    Large,
}

impl IconSize {
    /// Pick the largest icon that fits the available height.
    /// Returns `None` if even Small won't fit.
    pub fn for_height(available: u16) -> Option<Self> {
        match available {
            0..=4 => None,
            5..=8 => Some(IconSize::Small),
            _ => Some(IconSize::Large),
        }
    }

    pub fn height(self) -> u16 {
        match self {
            IconSize::Small => 5,
            IconSize::Large => 9,
        }
    }
}

/// Art for the named icon, or `None` when there is none.
pub fn icon_art(icon_name: &str, size: IconSize) -> Option<Text<'static>> {
    let layers = match icon_name {
        "sun" => vec![
            IconLayer {
                content: match size {
                    IconSize::Small => art::sun::SMALL_RAYS,
                    IconSize::Large => art::sun::LARGE_RAYS,
                },
                color: Color::Yellow,
            },
            IconLayer {
                content: match size {
                    IconSize::Small => art::sun::SMALL_CORE,
                    IconSize::Large => art::sun::LARGE_CORE,
                },
                color: Color::Rgb(255, 180, 60),
            },
        ],
        "snowflake" => vec![
            IconLayer {
                content: match size {
                    IconSize::Small => art::snowflake::SMALL_ARMS,
                    IconSize::Large => art::snowflake::LARGE_ARMS,
                },
                color: Color::Rgb(150, 200, 255),
            },
            IconLayer {
                content: match size {
                    IconSize::Small => art::snowflake::SMALL_CORE,
                    IconSize::Large => art::snowflake::LARGE_CORE,
                },
                color: Color::White,
            },
        ],
        _ => return None,
    };
    Some(composite_layers(&layers))
}

/// Single-glyph fallback for when art doesn't fit
pub fn icon_emoji(icon_name: &str) -> Option<&'static str> {
    match icon_name {
        "sun" => Some("\u{2600}\u{fe0f}"),
        "snowflake" => Some("\u{2744}\u{fe0f}"),
        _ => None,
    }
}
