pub mod dashboard;
pub mod log;
pub mod terminal;

pub use dashboard::{Cell, Dashboard, LeagueSection, MatchRow};
pub use log::LogRenderer;
pub use terminal::TerminalRenderer;

use crate::error::RenderError;

/// Draws dashboards produced by the poll loop
pub trait Renderer {
    /// Replace the displayed dashboard
    fn render(&mut self, dashboard: &Dashboard) -> Result<(), RenderError>;

    /// Surface a failed cycle to the operator
    fn report_warning(&mut self, _message: &str) -> Result<(), RenderError> {
        Ok(())
    }

    /// Called on cycles that draw nothing new, so time-based styling can expire
    fn tick(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Restore whatever the renderer took over
    fn close(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
