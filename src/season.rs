//! Season resolution and the per-season display table

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hemisphere-relative season
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Summer,
    Winter,
}

/// Text and icon shown for a season
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayRecord {
    pub text: &'static str,
    pub icon_name: &'static str,
}

/// Static season -> display record table
pub struct SeasonConfig;

impl SeasonConfig {
    pub const SUMMER: DisplayRecord = DisplayRecord {
        text: "Lets hit the beach",
        icon_name: "sun",
    };

    pub const WINTER: DisplayRecord = DisplayRecord {
        text: "Burr, its cold",
        icon_name: "snowflake",
    };

    pub fn record(season: Season) -> &'static DisplayRecord {
        match season {
            Season::Summer => &Self::SUMMER,
            Season::Winter => &Self::WINTER,
        }
    }
}

impl Season {
    pub fn label(self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Winter => "winter",
        }
    }

    pub fn display_record(self) -> &'static DisplayRecord {
        SeasonConfig::record(self)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolve the season for a latitude and a zero-based month (0 = January).
///
/// Months 3..=8 are the northern summer window. North of the equator that
/// window is summer; on or south of it the result flips. Latitude `0.0` and
/// `NaN` count as southern since neither compares greater than zero.
pub fn resolve_season(latitude: f64, month: u32) -> Season {
    let northern = latitude > 0.0;
    if month > 2 && month < 9 {
        if northern { Season::Summer } else { Season::Winter }
    } else if northern {
        Season::Winter
    } else {
        Season::Summer
    }
}
