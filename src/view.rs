// View models: fetched data shaped into display-ready text.
//
// Everything here is a pure function from domain data to strings, so the
// fallback rules (what renders when the backend omits a field) are unit
// tested without touching the terminal. Widgets only lay these out.

use crate::api::types::{
    Accolades, AthleteDetails, CompareResult, FighterInfo, FighterRecord, FighterStats,
};
use crate::selection::Selection;
use crate::stats::{CareerSummary, PeakSeason};

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

pub const FALLBACK_WINNER: &str = "Tie";
pub const FALLBACK_FIELD: &str = "N/A";
pub const FALLBACK_ANALYSIS: &str = "No detailed analysis available";

/// A comparison result with every fallback already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub winner: String,
    pub prediction: String,
    pub a_heading: String,
    pub a_strengths: String,
    pub b_heading: String,
    pub b_strengths: String,
    pub conclusion: String,
    pub analysis: String,
}

/// Apply the literal fallback rules to a backend comparison result.
pub fn comparison_view(result: &CompareResult, a_name: &str, b_name: &str) -> ComparisonView {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(FALLBACK_FIELD)
            .to_string()
    };

    ComparisonView {
        winner: result
            .overall_winner
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(FALLBACK_WINNER)
            .to_string(),
        prediction: field(&result.one_vs_one_prediction),
        a_heading: format!("{a_name} Strengths"),
        a_strengths: field(&result.athlete1_strengths),
        b_heading: format!("{b_name} Strengths"),
        b_strengths: field(&result.athlete2_strengths),
        conclusion: field(&result.conclusion),
        analysis: result
            .analysis
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(FALLBACK_ANALYSIS)
            .to_string(),
    }
}

// ---------------------------------------------------------------------------
// Detail panels
// ---------------------------------------------------------------------------

/// Detail cards for both athletes, ready to render side by side.
#[derive(Debug, Clone)]
pub struct DetailsView {
    pub a: AthleteCard,
    pub b: AthleteCard,
}

#[derive(Debug, Clone)]
pub enum AthleteCard {
    Nba(NbaCard),
    Mma(MmaCard),
}

/// NBA athlete: aggregated career numbers plus accolades.
#[derive(Debug, Clone)]
pub struct NbaCard {
    pub name: String,
    /// "position • team • height • weight", omitting absent parts.
    pub bio_line: Option<String>,
    /// `None` renders the no-statistics state.
    pub summary: Option<SeasonSummaryView>,
    pub accolades: AccoladesView,
}

#[derive(Debug, Clone)]
pub struct SeasonSummaryView {
    pub seasons: usize,
    pub games: u32,
    pub avg_pts: String,
    pub avg_ast: String,
    pub avg_reb: String,
    pub avg_min: String,
    pub fg_pct: String,
    pub tp_pct: String,
    pub peak_regular: Option<PeakView>,
    pub peak_playoff: Option<PeakView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeakView {
    pub season: i32,
    /// "27.1 PPG, 6.5 APG, 7.8 RPG"
    pub line: String,
    /// Combined production, one decimal.
    pub total: String,
    pub games: String,
}

#[derive(Debug, Clone)]
pub struct AccoladesView {
    /// Empty list renders the no-accolades state.
    pub awards: Vec<AwardView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwardView {
    /// "MVP (2016)" or just the title when the year is absent.
    pub heading: String,
    pub description: Option<String>,
}

/// MMA athlete: bio rows, record and per-15-minute stats.
#[derive(Debug, Clone)]
pub struct MmaCard {
    pub name: String,
    pub nickname: Option<String>,
    /// Weight class from the selection, "Fighter" when unknown.
    pub class_line: String,
    /// Label/value rows for the info panel, fallbacks applied.
    pub info_rows: Vec<(&'static str, String)>,
    /// "12-3-0" or "N/A" when the record request returned nothing useful.
    pub record_line: String,
    /// "55.6%" or "0%".
    pub win_rate: String,
    pub fight_stats: Vec<(&'static str, String)>,
    pub finish_rates: Vec<(&'static str, String)>,
}

/// Assemble both athletes' cards from their selections and fetched details.
pub fn details_view(
    a: (&Selection, &AthleteDetails),
    b: (&Selection, &AthleteDetails),
) -> DetailsView {
    DetailsView {
        a: athlete_card(a.0, a.1),
        b: athlete_card(b.0, b.1),
    }
}

fn athlete_card(selection: &Selection, details: &AthleteDetails) -> AthleteCard {
    match details {
        AthleteDetails::Nba { seasons, accolades } => {
            AthleteCard::Nba(nba_card(selection, CareerSummary::from_seasons(seasons), accolades))
        }
        AthleteDetails::Mma {
            info,
            stats,
            record,
        } => AthleteCard::Mma(mma_card(selection, info, stats, record)),
    }
}

pub fn nba_card(
    selection: &Selection,
    summary: Option<CareerSummary>,
    accolades: &Accolades,
) -> NbaCard {
    let bio_parts: Vec<&str> = [
        selection.position.as_deref(),
        selection.team.as_deref(),
        selection.height.as_deref(),
        selection.weight.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    NbaCard {
        name: selection.name.clone(),
        bio_line: (!bio_parts.is_empty()).then(|| bio_parts.join(" • ")),
        summary: summary.map(season_summary_view),
        accolades: accolades_view(accolades),
    }
}

fn season_summary_view(summary: CareerSummary) -> SeasonSummaryView {
    SeasonSummaryView {
        seasons: summary.seasons,
        games: summary.games,
        avg_pts: fmt1(summary.avg_pts),
        avg_ast: fmt1(summary.avg_ast),
        avg_reb: fmt1(summary.avg_reb),
        avg_min: fmt1(summary.avg_min),
        fg_pct: fmt1(summary.fg_pct),
        tp_pct: fmt1(summary.tp_pct),
        peak_regular: summary.peak_regular.map(|p| peak_view(&p, "games played")),
        peak_playoff: summary.peak_playoff.map(|p| peak_view(&p, "playoff games")),
    }
}

fn peak_view(peak: &PeakSeason, games_noun: &str) -> PeakView {
    PeakView {
        season: peak.season,
        line: format!(
            "{} PPG, {} APG, {} RPG",
            fmt1(peak.pts),
            fmt1(peak.ast),
            fmt1(peak.reb)
        ),
        total: fmt1(peak.total()),
        games: format!("{} {games_noun}", peak.gp),
    }
}

fn accolades_view(accolades: &Accolades) -> AccoladesView {
    AccoladesView {
        awards: accolades
            .awards
            .iter()
            .map(|award| AwardView {
                heading: match award.year_text() {
                    Some(year) => format!("{} ({year})", award.title),
                    None => award.title.clone(),
                },
                description: award
                    .description
                    .clone()
                    .filter(|d| !d.trim().is_empty()),
            })
            .collect(),
    }
}

pub fn mma_card(
    selection: &Selection,
    info: &FighterInfo,
    stats: &FighterStats,
    record: &FighterRecord,
) -> MmaCard {
    let text = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(FALLBACK_FIELD)
            .to_string()
    };

    let info_rows = vec![
        ("Gender", text(&info.gender)),
        ("Weight Class", text(&info.weight_class)),
        ("Height", text(&info.height)),
        ("Weight", text(&info.weight)),
        ("Reach", text(&info.reach)),
        (
            "Age",
            match info.age {
                Some(age) if age > 0 => age.to_string(),
                _ => FALLBACK_FIELD.to_string(),
            },
        ),
        ("Country", text(&info.country)),
    ];

    // Win rate renders "0" for both missing and zero, like the record panel
    // has always done.
    let win_rate = match record.win_rate {
        Some(rate) if rate != 0.0 => format!("{}%", fmt1(rate)),
        _ => "0%".to_string(),
    };

    MmaCard {
        name: selection.name.clone(),
        nickname: selection.nickname.clone(),
        class_line: selection
            .weight_class
            .clone()
            .unwrap_or_else(|| "Fighter".to_string()),
        info_rows,
        record_line: format!("{}-{}-{}", record.wins, record.losses, record.draws),
        win_rate,
        fight_stats: vec![
            ("Strikes Landed", stat2(stats.strike_lpm)),
            ("Strike Accuracy", stat_pct(stats.strike_accuracy)),
            ("Takedowns", stat2(stats.takedown_avg)),
            ("Takedown Accuracy", stat_pct(stats.takedown_accuracy)),
            ("Submissions", stat2(stats.submission_avg)),
        ],
        finish_rates: vec![
            (
                "KO/TKO",
                format!(
                    "{} / {}",
                    stat_pct(stats.ko_percentage),
                    stat_pct(stats.tko_percentage)
                ),
            ),
            ("Decision", stat_pct(stats.decision_percentage)),
        ],
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn fmt1(value: f64) -> String {
    format!("{value:.1}")
}

/// Two-decimal stat; absent or zero renders the N/A fallback, matching the
/// original presentation which treated zero as "not tracked".
fn stat2(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{v:.2}"),
        _ => FALLBACK_FIELD.to_string(),
    }
}

/// One-decimal percentage with the same absent/zero rule as `stat2`.
fn stat_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{}%", fmt1(v)),
        _ => FALLBACK_FIELD.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
