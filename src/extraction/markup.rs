/// CSS selectors describing where each field lives in the page markup
#[derive(Debug, Clone)]
pub struct MarkupProfile {
    /// One element per listed event
    pub event: &'static str,

    /// Section enclosing a group of events of the same competition
    pub section: &'static str,

    /// Competition heading inside a section
    pub section_heading: &'static str,

    /// Combined "home v away" label
    pub team_label: &'static str,

    /// Individual team names inside the combined label
    pub team_name: &'static str,

    /// Live score items, home first
    pub score_item: &'static str,

    /// Clock/status locations, most specific first
    pub match_time: &'static [&'static str],

    /// "More bets" counter locations, most specific first
    pub more_bets: &'static [&'static str],

    /// Clickable price buttons
    pub selection: &'static str,

    /// Attribute holding the participant name on a price button
    pub selection_label_attr: &'static str,

    /// Price text inside a price button
    pub selection_odds: &'static str,

    /// Participant name used for the draw selection
    pub draw_label: &'static str,
}

impl MarkupProfile {
    /// William Hill in-play listing
    pub const WILLIAM_HILL: MarkupProfile = MarkupProfile {
        event: "div.event",
        section: "article",
        section_heading: "h2",
        team_label: ".btmarket__link-name--2-rows",
        team_name: "span",
        score_item: ".btmarket__livescore-item",
        match_time: &[
            "label.btmarket__live.area-livescore.event__status",
            ".scoreboard__time",
            ".event-header__time",
            ".btmarket__header time",
        ],
        more_bets: &[
            ".btmarket__name.btmarket__more-bets-counter",
            "a.btmarket__more-bets-counter",
        ],
        selection: ".btmarket__selection button",
        selection_label_attr: "data-name",
        selection_odds: ".betbutton__odds",
        draw_label: "Draw",
    };
}

impl Default for MarkupProfile {
    fn default() -> Self {
        Self::WILLIAM_HILL
    }
}
