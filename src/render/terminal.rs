use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell as TableCell, Paragraph, Row, Table},
    Frame, Terminal,
};

use super::{Dashboard, MatchRow, Renderer};
use crate::error::RenderError;
use crate::models::Field;

const CLOCK_BG: Color = Color::Rgb(0x02, 0x1f, 0xf7);
const MORE_BETS_FG: Color = Color::Rgb(0x33, 0x66, 0xcc);

/// How long changed cells stay highlighted after a redraw
pub const DEFAULT_EMPHASIS_WINDOW: Duration = Duration::from_secs(2);

/// Full-screen table view, one bordered table per league
///
/// Changed cells are highlighted for the emphasis window after the dashboard
/// that flagged them is drawn; the next redraw after the window shows them
/// in their normal style.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    last_dashboard: Option<Dashboard>,
    last_warning: Option<String>,
    emphasis_window: Duration,
    emphasis_until: Option<Instant>,
    owns_screen: bool,
}

impl TerminalRenderer<CrosstermBackend<Stdout>> {
    /// Take over stdout with an alternate screen
    pub fn stdout() -> Result<Self, RenderError> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            last_dashboard: None,
            last_warning: None,
            emphasis_window: DEFAULT_EMPHASIS_WINDOW,
            emphasis_until: None,
            owns_screen: true,
        })
    }
}

impl<B: Backend> TerminalRenderer<B> {
    /// Draw onto an existing backend; the screen is not restored on close
    pub fn with_backend(backend: B) -> Result<Self, RenderError> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            last_dashboard: None,
            last_warning: None,
            emphasis_window: DEFAULT_EMPHASIS_WINDOW,
            emphasis_until: None,
            owns_screen: false,
        })
    }

    pub fn with_emphasis_window(mut self, window: Duration) -> Self {
        self.emphasis_window = window;
        self
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    fn highlighting(&self) -> bool {
        self.emphasis_until.is_some_and(|until| Instant::now() < until)
    }

    fn redraw(&mut self) -> Result<(), RenderError> {
        let highlight = self.highlighting();
        if !highlight {
            self.emphasis_until = None;
        }

        let dashboard = self.last_dashboard.as_ref();
        let warning = self.last_warning.as_deref();
        self.terminal.draw(|f| draw(f, dashboard, warning, highlight))?;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        if self.owns_screen {
            self.owns_screen = false;
            execute!(io::stdout(), LeaveAlternateScreen, Show)?;
        }
        Ok(())
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, dashboard: &Dashboard) -> Result<(), RenderError> {
        self.last_dashboard = Some(dashboard.clone());
        self.last_warning = None;
        self.emphasis_until = Some(Instant::now() + self.emphasis_window);
        self.redraw()
    }

    fn report_warning(&mut self, message: &str) -> Result<(), RenderError> {
        self.last_warning = Some(message.to_string());
        self.redraw()
    }

    fn tick(&mut self) -> Result<(), RenderError> {
        // Only the redraw that drops the highlight is needed
        if self.emphasis_until.is_some() && !self.highlighting() {
            self.redraw()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), RenderError> {
        self.restore()
    }
}

impl<B: Backend> Drop for TerminalRenderer<B> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn draw(f: &mut Frame, dashboard: Option<&Dashboard>, warning: Option<&str>, highlight: bool) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());

    match dashboard {
        Some(dashboard) => draw_sections(f, dashboard, body, highlight),
        None => f.render_widget(
            Paragraph::new("Waiting for live events...")
                .block(Block::default().title(" ⚽ Football Live ").borders(Borders::ALL)),
            body,
        ),
    }

    f.render_widget(Paragraph::new(status_line(dashboard, warning)), footer);
}

fn draw_sections(f: &mut Frame, dashboard: &Dashboard, area: Rect, highlight: bool) {
    // Borders (2) + header row (1) per section
    let mut constraints: Vec<Constraint> = dashboard
        .sections
        .iter()
        .map(|s| Constraint::Length(s.rows.len() as u16 + 3))
        .collect();
    constraints.push(Constraint::Min(0));

    let areas = Layout::vertical(constraints).split(area);

    for (section, chunk) in dashboard.sections.iter().zip(areas.iter()) {
        let rows: Vec<Row> = section
            .rows
            .iter()
            .map(|row| table_row(row, highlight))
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Min(24),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(["Time", "Match", "Score", "1", "X", "2", "More"])
                .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
        )
        .block(
            Block::default()
                .title(format!(" 🏆 {} ", section.league))
                .borders(Borders::ALL),
        );

        f.render_widget(table, *chunk);
    }
}

fn emphasis(style: Style, emphasize: bool) -> Style {
    if emphasize {
        style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        style
    }
}

fn table_row(row: &MatchRow, highlight: bool) -> Row<'static> {
    let flagged = |field: Field| highlight && row.cell(field).emphasize;
    let cell = |field: Field, style: Style| {
        TableCell::from(row.cell(field).text.clone()).style(emphasis(style, flagged(field)))
    };

    let home = row.cell(Field::HomeTeam);
    let away = row.cell(Field::AwayTeam);
    let fixture = TableCell::from(format!("{} v {}", home.text, away.text)).style(emphasis(
        Style::default().add_modifier(Modifier::BOLD),
        flagged(Field::HomeTeam) || flagged(Field::AwayTeam),
    ));

    let home_score = row.cell(Field::HomeScore);
    let away_score = row.cell(Field::AwayScore);
    let score = TableCell::from(format!("{} - {}", home_score.text, away_score.text)).style(
        emphasis(
            Style::default().bg(CLOCK_BG).add_modifier(Modifier::BOLD),
            flagged(Field::HomeScore) || flagged(Field::AwayScore),
        ),
    );

    Row::new(vec![
        cell(
            Field::MatchTime,
            Style::default().bg(CLOCK_BG).add_modifier(Modifier::BOLD),
        ),
        fixture,
        score,
        cell(Field::OddsHome, Style::default().bold()),
        cell(Field::OddsDraw, Style::default().bold()),
        cell(Field::OddsAway, Style::default().bold()),
        cell(Field::MoreBets, Style::default().fg(MORE_BETS_FG).bold()),
    ])
}

fn status_line(dashboard: Option<&Dashboard>, warning: Option<&str>) -> Line<'static> {
    let mut spans = Vec::new();

    if let Some(dashboard) = dashboard {
        spans.push(Span::raw(format!(
            " Updated {} | {} fixtures ",
            dashboard.updated_at.format("%H:%M:%S UTC"),
            dashboard.fixture_count()
        )));
    }

    if let Some(warning) = warning {
        spans.push(Span::styled(
            format!(" ⚠️ Scrape error: {} ", warning),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}
