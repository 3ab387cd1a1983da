use tracing::info;

use super::{Dashboard, MatchRow, Renderer};
use crate::error::RenderError;
use crate::models::Field;

/// Writes every row to the log, marking changed values with `*`
#[derive(Debug, Default)]
pub struct LogRenderer;

impl LogRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, dashboard: &Dashboard) -> Result<(), RenderError> {
        for section in &dashboard.sections {
            info!("=== {} ===", section.league);
            for row in &section.rows {
                info!("{}", format_row(row));
            }
        }
        Ok(())
    }
}

fn mark(row: &MatchRow, field: Field) -> String {
    let cell = row.cell(field);
    if cell.emphasize {
        format!("*{}*", cell.text)
    } else {
        cell.text.clone()
    }
}

/// `[45'] Team A v Team B  1 - *1*  | 1.50 3.00 5.00 | +87`
pub(crate) fn format_row(row: &MatchRow) -> String {
    format!(
        "[{}] {} v {}  {} - {}  | {} {} {} | {}",
        mark(row, Field::MatchTime),
        row.cell(Field::HomeTeam).text,
        row.cell(Field::AwayTeam).text,
        mark(row, Field::HomeScore),
        mark(row, Field::AwayScore),
        mark(row, Field::OddsHome),
        mark(row, Field::OddsDraw),
        mark(row, Field::OddsAway),
        mark(row, Field::MoreBets),
    )
}
