// Sport domain discriminator.
//
// The backend exposes three structurally identical API families under
// different base paths. Everything that varies between them (base path,
// which per-athlete detail requests exist, whether the compare request
// carries a stats-type field) is answered here so the rest of the client
// stays domain-agnostic.

use serde::Deserialize;

/// One of the three sport domains served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    General,
    Mma,
    Nba,
}

impl Sport {
    /// API path prefix appended to the configured server origin.
    pub fn base_path(self) -> &'static str {
        match self {
            Sport::General => "/api",
            Sport::Mma => "/api/mma",
            Sport::Nba => "/api/nba",
        }
    }

    /// Whether the compare request body carries a `type` field.
    /// The MMA endpoint rejects unknown fields, so it is omitted entirely.
    pub fn sends_stats_type(self) -> bool {
        !matches!(self, Sport::Mma)
    }

    /// Whether this domain has per-athlete detail endpoints at all.
    /// The general domain is search/select/compare only.
    pub fn has_details(self) -> bool {
        !matches!(self, Sport::General)
    }

    /// Noun used in "no results" messages ("No fighters found", ...).
    pub fn entity_noun(self) -> &'static str {
        match self {
            Sport::Mma => "fighters",
            Sport::General | Sport::Nba => "players",
        }
    }

    /// Human-readable label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Sport::General => "General",
            Sport::Mma => "MMA",
            Sport::Nba => "NBA",
        }
    }

    /// Parse a CLI argument into a sport, case-insensitively.
    pub fn from_arg(arg: &str) -> Option<Sport> {
        match arg.to_ascii_lowercase().as_str() {
            "general" => Some(Sport::General),
            "mma" => Some(Sport::Mma),
            "nba" => Some(Sport::Nba),
            _ => None,
        }
    }
}

/// Which slice of season statistics the backend should consider.
///
/// The numeric codes are the backend's: 0 = everything, 2 = regular season,
/// 3 = playoffs. Sent as the `type` query/body parameter where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsType {
    All,
    Regular,
    Playoffs,
}

impl StatsType {
    pub fn code(self) -> i32 {
        match self {
            StatsType::All => 0,
            StatsType::Regular => 2,
            StatsType::Playoffs => 3,
        }
    }

    /// Next value in the user-facing cycle: regular -> playoffs -> all.
    pub fn cycle(self) -> StatsType {
        match self {
            StatsType::Regular => StatsType::Playoffs,
            StatsType::Playoffs => StatsType::All,
            StatsType::All => StatsType::Regular,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatsType::All => "all",
            StatsType::Regular => "regular season",
            StatsType::Playoffs => "playoffs",
        }
    }
}

impl Default for StatsType {
    // The original UI preselects regular season.
    fn default() -> Self {
        StatsType::Regular
    }
}
