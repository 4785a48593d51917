//! # Application Control Commands
//!
//! Quitting, the sidebar and switching screens.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::app::events::{InputMode, Route};

fn is_normal(context: &CommandContext) -> bool {
    context.input_mode == InputMode::Normal
}

/// Terminate application (Ctrl+C)
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('c')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

/// Quit (q)
pub struct QuitCommand;

impl Command for QuitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_normal(context) && event.code == KeyCode::Char('q') && event.modifiers.is_empty()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "Quit"
    }
}

/// Open or close the sidebar (Tab)
pub struct ToggleSidebarCommand;

impl Command for ToggleSidebarCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_normal(context) && event.code == KeyCode::Tab
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SidebarToggleRequested])
    }

    fn name(&self) -> &'static str {
        "ToggleSidebar"
    }
}

/// Close an open sidebar (Esc)
pub struct CloseSidebarCommand;

impl Command for CloseSidebarCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_normal(context) && context.sidebar_open && event.code == KeyCode::Esc
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SidebarCloseRequested])
    }

    fn name(&self) -> &'static str {
        "CloseSidebar"
    }
}

/// Switch screens (d = dashboard, m = movie list)
pub struct NavigateCommand;

impl NavigateCommand {
    fn target(event: &KeyEvent) -> Option<Route> {
        match event.code {
            KeyCode::Char('d') => Some(Route::Dashboard),
            KeyCode::Char('m') => Some(Route::Movies),
            _ => None,
        }
    }
}

impl Command for NavigateCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_normal(context) && event.modifiers.is_empty() && Self::target(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(Self::target(&event)
            .map(|route| CommandEvent::NavigateRequested { route })
            .into_iter()
            .collect())
    }

    fn name(&self) -> &'static str {
        "Navigate"
    }
}
