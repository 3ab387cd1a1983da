use std::collections::HashMap;

use super::match_record::{MatchIdentity, MatchRecord};

/// A displayed field of a match row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    HomeTeam,
    AwayTeam,
    MatchTime,
    HomeScore,
    AwayScore,
    OddsHome,
    OddsDraw,
    OddsAway,
    MoreBets,
}

impl Field {
    pub const COUNT: usize = 9;

    /// All displayed fields, in column order
    pub const ALL: [Field; Field::COUNT] = [
        Field::HomeTeam,
        Field::AwayTeam,
        Field::MatchTime,
        Field::HomeScore,
        Field::AwayScore,
        Field::OddsHome,
        Field::OddsDraw,
        Field::OddsAway,
        Field::MoreBets,
    ];

    /// Fields compared between cycles. Team labels are the identity and are
    /// only ever "changed" on first appearance.
    pub const TRACKED: [Field; 7] = [
        Field::MatchTime,
        Field::HomeScore,
        Field::AwayScore,
        Field::OddsHome,
        Field::OddsDraw,
        Field::OddsAway,
        Field::MoreBets,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Read this field from a record
    pub fn value(self, record: &MatchRecord) -> &str {
        match self {
            Field::HomeTeam => &record.home_team,
            Field::AwayTeam => &record.away_team,
            Field::MatchTime => &record.match_time,
            Field::HomeScore => &record.home_score,
            Field::AwayScore => &record.away_score,
            Field::OddsHome => &record.odds_home,
            Field::OddsDraw => &record.odds_draw,
            Field::OddsAway => &record.odds_away,
            Field::MoreBets => &record.more_bets,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::HomeTeam => "home_team",
            Field::AwayTeam => "away_team",
            Field::MatchTime => "match_time",
            Field::HomeScore => "home_score",
            Field::AwayScore => "away_score",
            Field::OddsHome => "odds_home",
            Field::OddsDraw => "odds_draw",
            Field::OddsAway => "odds_away",
            Field::MoreBets => "more_bets",
        }
    }
}

/// Per-field changed flags for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldChanges {
    flags: [bool; Field::COUNT],
}

impl FieldChanges {
    /// Every field flagged (first appearance of a fixture)
    pub fn all() -> Self {
        Self {
            flags: [true; Field::COUNT],
        }
    }

    /// No field flagged
    pub fn none() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, changed: bool) {
        self.flags[field.index()] = changed;
    }

    pub fn is_changed(&self, field: Field) -> bool {
        self.flags[field.index()]
    }

    pub fn any(&self) -> bool {
        self.flags.iter().any(|&f| f)
    }

    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Flagged fields in column order
    pub fn changed_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.is_changed(*f))
            .collect()
    }
}

/// Last rendered record per fixture, the baseline for the next diff.
///
/// Entries are upserted on every render and never pruned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    records: HashMap<MatchIdentity, MatchRecord>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: &MatchIdentity) -> Option<&MatchRecord> {
        self.records.get(identity)
    }

    /// Store `record` as the latest rendered snapshot of its fixture
    pub fn upsert(&mut self, record: MatchRecord) {
        self.records.insert(record.identity(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
