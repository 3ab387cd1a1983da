use tracing::trace;

use crate::models::{DisplayState, Field, FieldChanges, MatchRecord};

/// Result of diffing one cycle against the display state
#[derive(Debug, Clone)]
pub struct DiffResult {
    /// Flags for each input record, in input order
    pub changes: Vec<FieldChanges>,

    /// Display state with every input record stored as its fixture's latest
    pub state: DisplayState,
}

/// Compare each record against the last rendered snapshot of its fixture.
///
/// A fixture seen for the first time has every field flagged. Otherwise a
/// tracked field is flagged when its text differs from the stored one;
/// placeholders compare like any other text. Records are stored as they are
/// compared, so a fixture listed twice in one page is compared against its
/// earlier listing.
pub fn diff(mut state: DisplayState, records: &[MatchRecord]) -> DiffResult {
    let mut changes = Vec::with_capacity(records.len());

    for record in records {
        let identity = record.identity();

        let flags = match state.get(&identity) {
            Some(previous) => compare(previous, record),
            None => {
                trace!("{} first seen, marking every field changed", identity);
                FieldChanges::all()
            }
        };

        if flags.any() {
            trace!("{} changed: {:?}", identity, flags.changed_fields());
        }

        changes.push(flags);
        state.upsert(record.clone());
    }

    DiffResult { changes, state }
}

fn compare(previous: &MatchRecord, current: &MatchRecord) -> FieldChanges {
    let mut flags = FieldChanges::none();
    for field in Field::TRACKED {
        flags.set(field, field.value(previous) != field.value(current));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_time_record() -> MatchRecord {
        MatchRecord {
            league: "Premier League".into(),
            home_team: "Team A".into(),
            away_team: "Team B".into(),
            home_score: "1".into(),
            away_score: "0".into(),
            match_time: "45'".into(),
            odds_home: "1.50".into(),
            odds_draw: "3.00".into(),
            odds_away: "5.00".into(),
            more_bets: "+87".into(),
        }
    }

    #[test]
    fn test_new_fixture_flags_every_field() {
        let result = diff(DisplayState::new(), &[half_time_record()]);

        assert_eq!(result.changes, vec![FieldChanges::all()]);
        assert_eq!(result.state.len(), 1);
    }

    #[test]
    fn test_identical_cycle_flags_nothing() {
        let records = vec![
            half_time_record(),
            MatchRecord {
                home_team: "C".into(),
                away_team: "D".into(),
                ..half_time_record()
            },
        ];

        let first = diff(DisplayState::new(), &records);
        let second = diff(first.state, &records);

        assert!(second.changes.iter().all(|c| !c.any()));
        assert_eq!(second.state.len(), 2);
    }

    #[test]
    fn test_away_goal_flags_only_away_score() {
        let previous = diff(DisplayState::new(), &[half_time_record()]).state;
        let scored = MatchRecord {
            away_score: "1".into(),
            ..half_time_record()
        };

        let result = diff(previous, &[scored.clone()]);

        assert_eq!(result.changes[0].changed_fields(), vec![Field::AwayScore]);
        assert_eq!(result.state.get(&scored.identity()), Some(&scored));
    }

    #[test]
    fn test_league_change_is_not_flagged() {
        let previous = diff(DisplayState::new(), &[half_time_record()]).state;
        let moved = MatchRecord {
            league: "Friendlies".into(),
            ..half_time_record()
        };

        let result = diff(previous, &[moved]);

        assert!(!result.changes[0].any());
    }

    #[test]
    fn test_renamed_team_is_a_new_fixture() {
        let previous = diff(DisplayState::new(), &[half_time_record()]).state;
        let renamed = MatchRecord {
            away_team: "Team B Women".into(),
            ..half_time_record()
        };

        let result = diff(previous, &[renamed]);

        assert_eq!(result.changes[0], FieldChanges::all());
        assert_eq!(result.state.len(), 2);
    }

    #[test]
    fn test_placeholders_compare_as_text() {
        let suspended = MatchRecord {
            odds_home: "N/A".into(),
            ..half_time_record()
        };
        let previous = diff(DisplayState::new(), &[suspended.clone()]).state;

        let still_suspended = diff(previous.clone(), &[suspended]);
        assert!(!still_suspended.changes[0].is_changed(Field::OddsHome));

        let reopened = diff(previous, &[half_time_record()]);
        assert_eq!(reopened.changes[0].changed_fields(), vec![Field::OddsHome]);
    }

    #[test]
    fn test_duplicate_listing_compares_against_earlier_one() {
        let later = MatchRecord {
            match_time: "46'".into(),
            ..half_time_record()
        };

        let result = diff(DisplayState::new(), &[half_time_record(), later.clone()]);

        assert_eq!(result.changes[0], FieldChanges::all());
        assert_eq!(result.changes[1].changed_fields(), vec![Field::MatchTime]);
        assert_eq!(result.state.get(&later.identity()), Some(&later));
    }
}
