// Wire types for the comparison backend, and their normalization into the
// client's domain types.
//
// The backend is inconsistent about identifier spelling: search rows carry
// `ID`, `id` or `athleteId` depending on which upstream feed produced them,
// and the value may arrive as a JSON number or a numeric string. All of that
// is resolved here, at the boundary, so the rest of the client only ever
// sees a canonical positive integer id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sport::StatsType;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A search row exactly as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchResult {
    #[serde(rename = "ID", default)]
    id_upper: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(rename = "athleteId", default)]
    athlete_id: Option<Value>,

    pub name: String,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(rename = "weightClass", default)]
    pub weight_class: Option<String>,
    #[serde(rename = "headshotUrl", default)]
    pub headshot_url: Option<String>,
    #[serde(rename = "displayHeight", default)]
    pub display_height: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(rename = "displayWeight", default)]
    pub display_weight: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
}

/// A normalized search row with a canonical identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: u64,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub nickname: Option<String>,
    pub weight_class: Option<String>,
    pub headshot_url: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
}

impl RawSearchResult {
    /// Resolve the canonical identifier.
    ///
    /// Precedence is `ID`, then `id`, then `athleteId`; first field carrying
    /// a usable positive integer wins. Returns `None` when no field does,
    /// in which case the row is dropped by the caller.
    pub fn canonical_id(&self) -> Option<u64> {
        [&self.id_upper, &self.id, &self.athlete_id]
            .into_iter()
            .find_map(|v| parse_id(v.as_ref()))
    }

    /// Normalize into a `SearchResult`, or `None` when the row has no
    /// usable identifier.
    pub fn normalize(self) -> Option<SearchResult> {
        let id = self.canonical_id()?;
        Some(SearchResult {
            id,
            name: self.name,
            team: non_empty(self.team),
            position: non_empty(self.position),
            nickname: non_empty(self.nickname),
            weight_class: non_empty(self.weight_class),
            headshot_url: non_empty(self.headshot_url),
            height: non_empty(self.display_height).or(non_empty(self.height)),
            weight: non_empty(self.display_weight).or(non_empty(self.weight)),
        })
    }
}

fn parse_id(value: Option<&Value>) -> Option<u64> {
    match value {
        Some(Value::Number(n)) => n.as_u64().filter(|&n| n > 0),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok().filter(|&n| n > 0),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ---------------------------------------------------------------------------
// NBA detail payloads
// ---------------------------------------------------------------------------

/// One season line as returned by `/athletes/{id}/season-stats`.
///
/// `season_type` distinguishes regular season (2) from playoffs (3).
/// Counting stats are per-game values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonStat {
    pub season: i32,
    #[serde(rename = "type")]
    pub season_type: i32,
    pub gp: u32,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub pts: f64,
    #[serde(default)]
    pub ast: f64,
    #[serde(default)]
    pub reb: f64,
    #[serde(default)]
    pub stl: f64,
    #[serde(default)]
    pub blk: f64,
    #[serde(default)]
    pub tov: f64,
    #[serde(default)]
    pub fgm: f64,
    #[serde(default)]
    pub fga: f64,
    #[serde(default)]
    pub tpm: f64,
    #[serde(default)]
    pub tpa: f64,
    #[serde(default)]
    pub ftm: f64,
    #[serde(default)]
    pub fta: f64,
}

pub const SEASON_TYPE_REGULAR: i32 = 2;
pub const SEASON_TYPE_PLAYOFF: i32 = 3;

/// Accolades payload from `/athletes/{id}/accolades`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Accolades {
    #[serde(rename = "playerName", default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub awards: Vec<Award>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Award {
    pub title: String,
    // Year arrives as a number from some feeds and a string from others.
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Award {
    /// Display form of the year, whatever JSON type it arrived as.
    pub fn year_text(&self) -> Option<String> {
        match &self.year {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MMA detail payloads
// ---------------------------------------------------------------------------

/// Fighter bio from `/fighters/{id}/info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FighterInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "weightClass", default)]
    pub weight_class: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub reach: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Per-15-minute fight statistics from `/fighters/{id}/stats`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FighterStats {
    #[serde(rename = "strikeLPM", default)]
    pub strike_lpm: Option<f64>,
    #[serde(rename = "strikeAccuracy", default)]
    pub strike_accuracy: Option<f64>,
    #[serde(rename = "takedownAvg", default)]
    pub takedown_avg: Option<f64>,
    #[serde(rename = "takedownAccuracy", default)]
    pub takedown_accuracy: Option<f64>,
    #[serde(rename = "submissionAvg", default)]
    pub submission_avg: Option<f64>,
    #[serde(rename = "koPercentage", default)]
    pub ko_percentage: Option<f64>,
    #[serde(rename = "tkoPercentage", default)]
    pub tko_percentage: Option<f64>,
    #[serde(rename = "decisionPercentage", default)]
    pub decision_percentage: Option<f64>,
}

/// Win/loss record from `/fighters/{id}/record`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FighterRecord {
    #[serde(default)]
    pub wins: i64,
    #[serde(default)]
    pub losses: i64,
    #[serde(default)]
    pub draws: i64,
    #[serde(rename = "winRate", default)]
    pub win_rate: Option<f64>,
}

// ---------------------------------------------------------------------------
// Detail batches
// ---------------------------------------------------------------------------

/// Everything the client fetches about one athlete, per sport domain.
#[derive(Debug, Clone)]
pub enum AthleteDetails {
    Nba {
        seasons: Vec<SeasonStat>,
        accolades: Accolades,
    },
    Mma {
        info: FighterInfo,
        stats: FighterStats,
        record: FighterRecord,
    },
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

/// Body of `POST {base}/compare`.
///
/// `stats_type` is present for the general and NBA domains and omitted
/// entirely (not sent as null) for MMA.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareRequest {
    #[serde(rename = "aID")]
    pub a_id: u64,
    #[serde(rename = "bID")]
    pub b_id: u64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub stats_type: Option<i32>,
}

impl CompareRequest {
    pub fn new(a_id: u64, b_id: u64, stats_type: Option<StatsType>) -> Self {
        CompareRequest {
            a_id,
            b_id,
            stats_type: stats_type.map(StatsType::code),
        }
    }
}

/// The structured comparison produced by the backend's analysis layer.
/// Every field is optional; the renderer substitutes literal fallbacks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareResult {
    #[serde(rename = "athlete1Name", default)]
    pub athlete1_name: Option<String>,
    #[serde(rename = "athlete2Name", default)]
    pub athlete2_name: Option<String>,
    #[serde(rename = "overallWinner", default)]
    pub overall_winner: Option<String>,
    #[serde(rename = "oneVsOnePrediction", default)]
    pub one_vs_one_prediction: Option<String>,
    #[serde(
        rename = "athlete1Strengths",
        alias = "player1Strengths",
        default
    )]
    pub athlete1_strengths: Option<String>,
    #[serde(
        rename = "athlete2Strengths",
        alias = "player2Strengths",
        default
    )]
    pub athlete2_strengths: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
