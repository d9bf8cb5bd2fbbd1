// Career aggregation over NBA season lines.
//
// Pure folds over `[SeasonStat]`, kept free of any rendering so they can be
// tested without a terminal. The display set is the regular-season subset
// when one exists, otherwise the full list as delivered.

use crate::api::types::{SeasonStat, SEASON_TYPE_PLAYOFF, SEASON_TYPE_REGULAR};

/// Minimum games played for a season to qualify as a peak regular season.
/// Playoff runs have no such qualifier (a deep run can be under 20 games).
pub const PEAK_MIN_GAMES: u32 = 20;

/// Aggregated career view of one athlete's season lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerSummary {
    /// Seasons counted into the averages (the display set size).
    pub seasons: usize,
    /// Games played summed over the display set.
    pub games: u32,
    pub avg_pts: f64,
    pub avg_ast: f64,
    pub avg_reb: f64,
    pub avg_min: f64,
    /// Field-goal percentage over summed makes/attempts, 0.0 when no attempts.
    pub fg_pct: f64,
    /// Three-point percentage over summed makes/attempts, 0.0 when no attempts.
    pub tp_pct: f64,
    pub peak_regular: Option<PeakSeason>,
    pub peak_playoff: Option<PeakSeason>,
}

/// The single season (or playoff run) with maximum combined production.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakSeason {
    pub season: i32,
    pub gp: u32,
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
}

impl PeakSeason {
    /// Combined production: points + rebounds + assists.
    pub fn total(&self) -> f64 {
        self.pts + self.reb + self.ast
    }

    fn from_stat(stat: &SeasonStat) -> Self {
        PeakSeason {
            season: stat.season,
            gp: stat.gp,
            pts: stat.pts,
            ast: stat.ast,
            reb: stat.reb,
        }
    }
}

impl CareerSummary {
    /// Aggregate a list of season lines.
    ///
    /// Returns `None` for an empty list: there is nothing to average and the
    /// caller renders the no-statistics state instead.
    pub fn from_seasons(seasons: &[SeasonStat]) -> Option<CareerSummary> {
        if seasons.is_empty() {
            return None;
        }

        let regular: Vec<&SeasonStat> = seasons
            .iter()
            .filter(|s| s.season_type == SEASON_TYPE_REGULAR)
            .collect();
        let playoff: Vec<&SeasonStat> = seasons
            .iter()
            .filter(|s| s.season_type == SEASON_TYPE_PLAYOFF)
            .collect();

        // Regular-season lines when present, otherwise whatever arrived.
        let display: Vec<&SeasonStat> = if regular.is_empty() {
            seasons.iter().collect()
        } else {
            regular.clone()
        };

        let count = display.len() as f64;
        let games = display.iter().map(|s| s.gp).sum();
        let avg = |f: fn(&SeasonStat) -> f64| display.iter().map(|s| f(s)).sum::<f64>() / count;

        let fg_pct = shooting_pct(
            display.iter().map(|s| s.fgm).sum(),
            display.iter().map(|s| s.fga).sum(),
        );
        let tp_pct = shooting_pct(
            display.iter().map(|s| s.tpm).sum(),
            display.iter().map(|s| s.tpa).sum(),
        );

        let peak_regular = peak_of(regular.iter().copied().filter(|s| s.gp >= PEAK_MIN_GAMES));
        let peak_playoff = peak_of(playoff.iter().copied());

        Some(CareerSummary {
            seasons: display.len(),
            games,
            avg_pts: avg(|s| s.pts),
            avg_ast: avg(|s| s.ast),
            avg_reb: avg(|s| s.reb),
            avg_min: avg(|s| s.min),
            fg_pct,
            tp_pct,
            peak_regular,
            peak_playoff,
        })
    }
}

/// Percentage of made over attempted, or 0.0 when nothing was attempted.
pub fn shooting_pct(made: f64, attempted: f64) -> f64 {
    if attempted > 0.0 {
        made / attempted * 100.0
    } else {
        0.0
    }
}

/// The season with maximum pts+reb+ast. Strictly-greater comparison keeps
/// the first-encountered season on ties.
fn peak_of<'a, I>(seasons: I) -> Option<PeakSeason>
where
    I: Iterator<Item = &'a SeasonStat>,
{
    seasons
        .fold(None::<&SeasonStat>, |best, s| match best {
            Some(b) if s.pts + s.reb + s.ast > b.pts + b.reb + b.ast => Some(s),
            Some(b) => Some(b),
            None => Some(s),
        })
        .map(PeakSeason::from_stat)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
