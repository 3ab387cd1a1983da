use chrono::{DateTime, Utc};

use crate::models::{Field, FieldChanges, MatchRecord};

/// One displayed value and whether it should be highlighted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub emphasize: bool,
}

/// A fixture row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    cells: Vec<Cell>,
}

impl MatchRow {
    fn new(record: &MatchRecord, changes: &FieldChanges) -> Self {
        let cells = Field::ALL
            .into_iter()
            .map(|field| Cell {
                text: field.value(record).to_string(),
                emphasize: changes.is_changed(field),
            })
            .collect();

        Self { cells }
    }

    pub fn cell(&self, field: Field) -> &Cell {
        &self.cells[field as usize]
    }

    pub fn emphasized_count(&self) -> usize {
        self.cells.iter().filter(|c| c.emphasize).count()
    }
}

/// Fixtures of one competition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueSection {
    pub league: String,
    pub rows: Vec<MatchRow>,
}

/// Everything the renderer draws for one update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub sections: Vec<LeagueSection>,
    pub updated_at: DateTime<Utc>,
}

impl Dashboard {
    /// Group records by league, leagues in order of first appearance.
    ///
    /// `changes` must be parallel to `records`.
    pub fn build(records: &[MatchRecord], changes: &[FieldChanges]) -> Self {
        let mut sections: Vec<LeagueSection> = Vec::new();

        for (record, flags) in records.iter().zip(changes) {
            let row = MatchRow::new(record, flags);
            match sections.iter_mut().find(|s| s.league == record.league) {
                Some(section) => section.rows.push(row),
                None => sections.push(LeagueSection {
                    league: record.league.clone(),
                    rows: vec![row],
                }),
            }
        }

        Self {
            sections,
            updated_at: Utc::now(),
        }
    }

    pub fn fixture_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    pub fn emphasized_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.rows)
            .map(MatchRow::emphasized_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(league: &str, home: &str) -> MatchRecord {
        MatchRecord {
            league: league.into(),
            home_team: home.into(),
            away_team: "Away".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_by_first_appearance() {
        let records = vec![
            record("Serie A", "Roma"),
            record("La Liga", "Betis"),
            record("Serie A", "Milan"),
        ];
        let changes = vec![FieldChanges::none(); 3];

        let dashboard = Dashboard::build(&records, &changes);

        let leagues: Vec<&str> = dashboard.sections.iter().map(|s| s.league.as_str()).collect();
        assert_eq!(leagues, vec!["Serie A", "La Liga"]);
        assert_eq!(dashboard.sections[0].rows.len(), 2);
        assert_eq!(
            dashboard.sections[0].rows[1].cell(Field::HomeTeam).text,
            "Milan"
        );
        assert_eq!(dashboard.fixture_count(), 3);
    }

    #[test]
    fn test_cells_carry_change_flags() {
        let mut flags = FieldChanges::none();
        flags.set(Field::AwayScore, true);

        let dashboard = Dashboard::build(&[record("Serie A", "Roma")], &[flags]);
        let row = &dashboard.sections[0].rows[0];

        assert!(row.cell(Field::AwayScore).emphasize);
        assert!(!row.cell(Field::HomeScore).emphasize);
        assert_eq!(row.cell(Field::AwayScore).text, "-");
        assert_eq!(dashboard.emphasized_count(), 1);
    }
}
