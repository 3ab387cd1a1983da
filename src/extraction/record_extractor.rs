use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::markup::MarkupProfile;
use crate::error::ExtractError;
use crate::models::{MatchRecord, NOT_AVAILABLE, NO_SCORE, UNKNOWN_LEAGUE};

/// Label given to a price button without a participant name
const UNLABELLED_SELECTION: &str = "Unknown";

/// Turns a rendered page into match records
pub struct RecordExtractor {
    event: Selector,
    section: Selector,
    section_heading: Selector,
    team_label: Selector,
    team_name: Selector,
    score_item: Selector,
    match_time: Vec<Selector>,
    more_bets: Vec<Selector>,
    selection: Selector,
    selection_odds: Selector,
    selection_label_attr: &'static str,
    draw_label: &'static str,
}

impl RecordExtractor {
    /// Compile the selectors of a markup profile
    pub fn new(profile: &MarkupProfile) -> Result<Self, ExtractError> {
        Ok(Self {
            event: compile(profile.event)?,
            section: compile(profile.section)?,
            section_heading: compile(profile.section_heading)?,
            team_label: compile(profile.team_label)?,
            team_name: compile(profile.team_name)?,
            score_item: compile(profile.score_item)?,
            match_time: compile_all(profile.match_time)?,
            more_bets: compile_all(profile.more_bets)?,
            selection: compile(profile.selection)?,
            selection_odds: compile(profile.selection_odds)?,
            selection_label_attr: profile.selection_label_attr,
            draw_label: profile.draw_label,
        })
    }

    /// Parse raw page markup and extract its records
    pub fn extract_from_source(&self, page_source: &str) -> Vec<MatchRecord> {
        let document = Html::parse_document(page_source);
        self.extract(&document)
    }

    /// Extract one record per event, in document order
    pub fn extract(&self, document: &Html) -> Vec<MatchRecord> {
        let records: Vec<MatchRecord> = document
            .select(&self.event)
            .map(|event| self.extract_event(event))
            .collect();

        debug!("Extracted {} match records", records.len());
        records
    }

    fn extract_event(&self, event: ElementRef<'_>) -> MatchRecord {
        let league = self.league(event);

        let teams: Vec<String> = event
            .select(&self.team_label)
            .next()
            .map(|label| label.select(&self.team_name).map(stripped_text).collect())
            .unwrap_or_default();
        let home_team = nth_or(&teams, 0, NOT_AVAILABLE);
        let away_team = nth_or(&teams, 1, NOT_AVAILABLE);

        let scores: Vec<String> = event.select(&self.score_item).map(trimmed_text).collect();
        let home_score = nth_or(&scores, 0, NO_SCORE);
        let away_score = nth_or(&scores, 1, NO_SCORE);

        let match_time = first_match(event, &self.match_time)
            .map(stripped_text)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let more_bets = first_match(event, &self.more_bets)
            .map(trimmed_text)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let odds = self.odds(event);
        let lookup = |label: &str| {
            odds.get(label)
                .cloned()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        MatchRecord {
            odds_home: lookup(&home_team),
            odds_draw: lookup(self.draw_label),
            odds_away: lookup(&away_team),
            league,
            home_team,
            away_team,
            home_score,
            away_score,
            match_time,
            more_bets,
        }
    }

    /// Heading of the nearest enclosing section
    fn league(&self, event: ElementRef<'_>) -> String {
        event
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| self.section.matches(ancestor))
            .and_then(|section| section.select(&self.section_heading).next())
            .map(stripped_text)
            .unwrap_or_else(|| UNKNOWN_LEAGUE.to_string())
    }

    /// Participant label -> price. A repeated label keeps the last price.
    fn odds(&self, event: ElementRef<'_>) -> HashMap<String, String> {
        event
            .select(&self.selection)
            .map(|button| {
                let label = button
                    .value()
                    .attr(self.selection_label_attr)
                    .unwrap_or(UNLABELLED_SELECTION)
                    .to_string();
                let price = button
                    .select(&self.selection_odds)
                    .next()
                    .map(trimmed_text)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                (label, price)
            })
            .collect()
    }
}

fn compile(selector: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector,
        reason: e.to_string(),
    })
}

fn compile_all(selectors: &'static [&'static str]) -> Result<Vec<Selector>, ExtractError> {
    selectors.iter().copied().map(compile).collect()
}

/// First element matched by the earliest selector in priority order
fn first_match<'a>(scope: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|selector| scope.select(selector).next())
}

fn nth_or(values: &[String], index: usize, fallback: &str) -> String {
    values
        .get(index)
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

/// Each text node trimmed, then concatenated
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Text nodes concatenated, then trimmed
fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> RecordExtractor {
        RecordExtractor::new(&MarkupProfile::default()).expect("default profile compiles")
    }

    const LIVE_EVENT: &str = r#"
        <html><body>
        <div class="sport-events-container">
          <article>
            <header><h2> Premier League </h2></header>
            <div class="event">
              <label class="btmarket__live area-livescore event__status"> 45' </label>
              <a class="btmarket__link-name--2-rows"><span> Team A </span><span>Team B</span></a>
              <ul>
                <li class="btmarket__livescore-item"> 1 </li>
                <li class="btmarket__livescore-item">0</li>
              </ul>
              <div class="btmarket__selection"><button data-name="Team A"><span class="betbutton__odds"> 1.50 </span></button></div>
              <div class="btmarket__selection"><button data-name="Draw"><span class="betbutton__odds">3.00</span></button></div>
              <div class="btmarket__selection"><button data-name="Team B"><span class="betbutton__odds">5.00</span></button></div>
              <a class="btmarket__more-bets-counter"> +87 </a>
            </div>
          </article>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_extract_live_event() {
        let records = extractor().extract_from_source(LIVE_EVENT);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.league, "Premier League");
        assert_eq!(record.home_team, "Team A");
        assert_eq!(record.away_team, "Team B");
        assert_eq!(record.home_score, "1");
        assert_eq!(record.away_score, "0");
        assert_eq!(record.match_time, "45'");
        assert_eq!(record.odds_home, "1.50");
        assert_eq!(record.odds_draw, "3.00");
        assert_eq!(record.odds_away, "5.00");
        assert_eq!(record.more_bets, "+87");
    }

    #[test]
    fn test_missing_scores_default_to_dash() {
        let page = LIVE_EVENT
            .replace("btmarket__livescore-item", "something-else");
        let records = extractor().extract_from_source(&page);

        let record = &records[0];
        assert_eq!(record.home_score, "-");
        assert_eq!(record.away_score, "-");
        // Other fields are unaffected
        assert_eq!(record.match_time, "45'");
        assert_eq!(record.home_team, "Team A");
        assert_eq!(record.odds_away, "5.00");
    }

    #[test]
    fn test_unknown_team_label_odds_resolve_to_na() {
        let page = r#"
            <article><h2>Serie A</h2>
            <div class="event">
              <div class="btmarket__link-name--2-rows"><span>Roma</span><span>Lazio</span></div>
              <div class="btmarket__selection"><button data-name="AS Roma"><span class="betbutton__odds">2.10</span></button></div>
              <div class="btmarket__selection"><button data-name="Draw"><span class="betbutton__odds">3.20</span></button></div>
            </div>
            </article>
        "#;
        let record = &extractor().extract_from_source(page)[0];

        assert_eq!(record.odds_home, "N/A");
        assert_eq!(record.odds_draw, "3.20");
        assert_eq!(record.odds_away, "N/A");
    }

    #[test]
    fn test_bare_event_degrades_every_field() {
        let page = r#"<div class="event"></div>"#;
        let records = extractor().extract_from_source(page);

        assert_eq!(records, vec![MatchRecord::default()]);
    }

    #[test]
    fn test_single_team_label_leaves_away_unavailable() {
        let page = r#"
            <div class="event">
              <div class="btmarket__link-name--2-rows"><span>Solo FC</span></div>
            </div>
        "#;
        let record = &extractor().extract_from_source(page)[0];

        assert_eq!(record.home_team, "Solo FC");
        assert_eq!(record.away_team, "N/A");
        assert_eq!(record.league, "Unknown");
    }

    #[test]
    fn test_match_time_follows_priority_order() {
        // The scoreboard clock appears first in the document, but the live
        // status label has higher priority.
        let page = r#"
            <div class="event">
              <span class="scoreboard__time">12:00</span>
              <label class="btmarket__live area-livescore event__status">HT</label>
            </div>
        "#;
        let record = &extractor().extract_from_source(page)[0];
        assert_eq!(record.match_time, "HT");

        let pre_match = r#"
            <div class="event">
              <div class="btmarket__header"><time> 19:45 </time></div>
            </div>
        "#;
        let record = &extractor().extract_from_source(pre_match)[0];
        assert_eq!(record.match_time, "19:45");
    }

    #[test]
    fn test_selection_without_label_or_price() {
        let page = r#"
            <div class="event">
              <div class="btmarket__link-name--2-rows"><span>Unknown</span><span>B</span></div>
              <div class="btmarket__selection"><button><span class="betbutton__odds">9.00</span></button></div>
              <div class="btmarket__selection"><button data-name="B"></button></div>
            </div>
        "#;
        let record = &extractor().extract_from_source(page)[0];

        // An unlabelled button is filed under "Unknown"
        assert_eq!(record.odds_home, "9.00");
        assert_eq!(record.odds_away, "N/A");
    }

    #[test]
    fn test_events_keep_document_order_across_sections() {
        let page = r#"
            <article><h2>La Liga</h2>
              <div class="event"><div class="btmarket__link-name--2-rows"><span>A</span><span>B</span></div></div>
              <div class="event"><div class="btmarket__link-name--2-rows"><span>C</span><span>D</span></div></div>
            </article>
            <article><h2>Bundesliga</h2>
              <div class="event"><div class="btmarket__link-name--2-rows"><span>E</span><span>F</span></div></div>
            </article>
        "#;
        let records = extractor().extract_from_source(page);

        let summary: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.league.as_str(), r.home_team.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("La Liga", "A"), ("La Liga", "C"), ("Bundesliga", "E")]
        );
    }

    #[test]
    fn test_more_bets_prefers_name_counter() {
        let page = r#"
            <div class="event">
              <a class="btmarket__more-bets-counter">+10</a>
              <span class="btmarket__name btmarket__more-bets-counter">+12</span>
            </div>
        "#;
        let record = &extractor().extract_from_source(page)[0];
        assert_eq!(record.more_bets, "+12");
    }
}
