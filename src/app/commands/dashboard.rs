//! # Dashboard Commands

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{Command, CommandContext, CommandEvent};
use crate::app::events::{InputMode, Route};

/// Edit the winners-by-year search box (/)
pub struct EditSearchYearCommand;

impl Command for EditSearchYearCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.is_normal_on(Route::Dashboard) && event.code == KeyCode::Char('/')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::InputModeRequested {
            mode: InputMode::EditingSearchYear,
        }])
    }

    fn name(&self) -> &'static str {
        "EditSearchYear"
    }
}

/// Re-run the search with the current year (Enter)
pub struct SearchCommand;

impl Command for SearchCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.is_normal_on(Route::Dashboard) && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchRequested])
    }

    fn name(&self) -> &'static str {
        "Search"
    }
}
