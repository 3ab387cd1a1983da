use serde::{Deserialize, Serialize};

/// Placeholder for any field whose source fragment is missing
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a score that is not on the page (pre-match fixtures)
pub const NO_SCORE: &str = "-";

/// League used when an event has no enclosing section heading
pub const UNKNOWN_LEAGUE: &str = "Unknown";

/// One live event as scraped from the page
///
/// Every value is free text exactly as the site renders it. Scores in
/// particular are not guaranteed to be numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Competition heading the event is listed under
    pub league: String,

    /// Home side label
    pub home_team: String,

    /// Away side label
    pub away_team: String,

    /// Home goals, or `-` when no live score is shown
    pub home_score: String,

    /// Away goals, or `-` when no live score is shown
    pub away_score: String,

    /// Clock or status text (e.g. `45'`, `HT`, kick-off time)
    pub match_time: String,

    /// Price on the home side
    pub odds_home: String,

    /// Price on the draw
    pub odds_draw: String,

    /// Price on the away side
    pub odds_away: String,

    /// "More bets" counter text (e.g. `+112`)
    pub more_bets: String,
}

impl Default for MatchRecord {
    fn default() -> Self {
        Self {
            league: UNKNOWN_LEAGUE.to_string(),
            home_team: NOT_AVAILABLE.to_string(),
            away_team: NOT_AVAILABLE.to_string(),
            home_score: NO_SCORE.to_string(),
            away_score: NO_SCORE.to_string(),
            match_time: NOT_AVAILABLE.to_string(),
            odds_home: NOT_AVAILABLE.to_string(),
            odds_draw: NOT_AVAILABLE.to_string(),
            odds_away: NOT_AVAILABLE.to_string(),
            more_bets: NOT_AVAILABLE.to_string(),
        }
    }
}

impl MatchRecord {
    /// Key used to follow this fixture across polling cycles
    pub fn identity(&self) -> MatchIdentity {
        MatchIdentity {
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
        }
    }
}

/// Stable key of a fixture: the (home, away) label pair.
///
/// A renamed side produces a different identity; prior state is not carried over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchIdentity {
    pub home_team: String,
    pub away_team: String,
}

impl MatchIdentity {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
        }
    }
}

impl std::fmt::Display for MatchIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {}", self.home_team, self.away_team)
    }
}
