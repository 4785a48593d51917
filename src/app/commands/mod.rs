//! # Command Pattern Infrastructure
//!
//! Commands translate key presses into [`CommandEvent`]s. They never touch
//! view model state: the controller applies the events they produce.
//!
//! The registry asks each command in turn whether it is relevant for the
//! key and the current [`CommandContext`], and executes the first match.

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::app::events::{InputMode, Route};

pub mod app;
pub mod dashboard;
pub mod input;
pub mod movies;

pub use app::{
    AppTerminateCommand, CloseSidebarCommand, NavigateCommand, QuitCommand, ToggleSidebarCommand,
};
pub use dashboard::{EditSearchYearCommand, SearchCommand};
pub use input::InputEditCommand;
pub use movies::{
    CycleWinnerFilterCommand, EditFilterYearCommand, PageNavigationCommand, VisibleSlotCommand,
};

/// Page movements on the movie list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    Previous,
    Next,
    First,
    Last,
}

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    /// Request to quit application
    QuitRequested,
    SidebarToggleRequested,
    SidebarCloseRequested,
    NavigateRequested { route: Route },
    PageMoveRequested { movement: PageMove },
    /// Jump to the page shown at `slot` (zero-based) of the visible window
    VisibleSlotRequested { slot: usize },
    WinnerFilterCycleRequested,
    SearchRequested,
    /// Start editing a year box
    InputModeRequested { mode: InputMode },
    InputCharRequested { ch: char },
    InputBackspaceRequested,
    InputSubmitRequested,
    InputCancelRequested,
}

/// Read-only snapshot of application state for relevance checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandContext {
    pub route: Route,
    pub input_mode: InputMode,
    pub sidebar_open: bool,
}

impl CommandContext {
    pub fn new(route: Route, input_mode: InputMode, sidebar_open: bool) -> Self {
        Self {
            route,
            input_mode,
            sidebar_open,
        }
    }

    /// Normal mode on the given screen
    pub fn is_normal_on(&self, route: Route) -> bool {
        self.input_mode == InputMode::Normal && self.route == route
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new(Route::Dashboard, InputMode::Normal, false)
    }
}

/// A key binding
pub trait Command: Send + Sync {
    /// Whether this command handles `event` in `context`
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events for a relevant key press
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get a human-readable name for this command (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Type alias for command collection to reduce complexity
type CommandCollection = Vec<Box<dyn Command>>;

/// Ordered collection of commands
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create new command registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Ctrl+C always wins, then an active input box swallows keys
        self.add_command(Box::new(AppTerminateCommand));
        self.add_command(Box::new(InputEditCommand));

        // Shell
        self.add_command(Box::new(QuitCommand));
        self.add_command(Box::new(ToggleSidebarCommand));
        self.add_command(Box::new(CloseSidebarCommand));
        self.add_command(Box::new(NavigateCommand));

        // Movie list
        self.add_command(Box::new(PageNavigationCommand));
        self.add_command(Box::new(VisibleSlotCommand));
        self.add_command(Box::new(EditFilterYearCommand));
        self.add_command(Box::new(CycleWinnerFilterCommand));

        // Dashboard
        self.add_command(Box::new(EditSearchYearCommand));
        self.add_command(Box::new(SearchCommand));
    }

    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Run the first relevant command; no match yields no events
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        match self
            .commands
            .iter()
            .find(|command| command.is_relevant(context, &event))
        {
            Some(command) => {
                tracing::debug!("Key {:?} handled by {}", event.code, command.name());
                command.execute(event, context)
            }
            None => {
                tracing::debug!("No command for key {:?} in {:?}", event.code, context);
                Ok(Vec::new())
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn movies_context() -> CommandContext {
        CommandContext::new(Route::Movies, InputMode::Normal, false)
    }

    #[test]
    fn registry_should_create_with_default_commands() {
        assert_eq!(CommandRegistry::new().command_count(), 12);
    }

    #[test]
    fn registry_should_return_no_events_for_unbound_key() {
        let registry = CommandRegistry::new();
        let events = registry
            .process_event(key(KeyCode::Char('z')), &movies_context())
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn registry_should_route_keys_by_screen() {
        let registry = CommandRegistry::new();
        let dashboard = CommandContext::default();

        let on_movies = registry
            .process_event(key(KeyCode::Right), &movies_context())
            .unwrap();
        let on_dashboard = registry.process_event(key(KeyCode::Right), &dashboard).unwrap();

        assert_eq!(
            on_movies,
            vec![CommandEvent::PageMoveRequested {
                movement: PageMove::Next
            }]
        );
        assert!(on_dashboard.is_empty());
    }

    #[test]
    fn editing_should_capture_letters_bound_in_normal_mode() {
        let registry = CommandRegistry::new();
        let editing = CommandContext::new(Route::Movies, InputMode::EditingFilterYear, false);

        let events = registry.process_event(key(KeyCode::Char('q')), &editing).unwrap();
        assert!(events.is_empty());

        let events = registry.process_event(key(KeyCode::Char('7')), &editing).unwrap();
        assert_eq!(events, vec![CommandEvent::InputCharRequested { ch: '7' }]);
    }

    #[test]
    fn ctrl_c_should_quit_even_while_editing() {
        let registry = CommandRegistry::new();
        let editing = CommandContext::new(Route::Dashboard, InputMode::EditingSearchYear, false);
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(
            registry.process_event(event, &editing).unwrap(),
            vec![CommandEvent::QuitRequested]
        );
    }
}
