//! # Input Editing Commands
//!
//! While a year box is being edited every key goes here: digits are typed,
//! Backspace deletes, Enter submits, Esc leaves the box. Anything else is
//! swallowed so normal-mode bindings do not fire mid-edit.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};

pub struct InputEditCommand;

impl Command for InputEditCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        context.input_mode.is_editing()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let events = match event.code {
            KeyCode::Char(ch)
                if ch.is_ascii_digit() && !event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                vec![CommandEvent::InputCharRequested { ch }]
            }
            KeyCode::Backspace => vec![CommandEvent::InputBackspaceRequested],
            KeyCode::Enter => vec![CommandEvent::InputSubmitRequested],
            KeyCode::Esc => vec![CommandEvent::InputCancelRequested],
            _ => Vec::new(),
        };
        Ok(events)
    }

    fn name(&self) -> &'static str {
        "InputEdit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::{InputMode, Route};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn editing_context() -> CommandContext {
        CommandContext::new(Route::Movies, InputMode::EditingFilterYear, false)
    }

    #[test]
    fn input_edit_should_only_be_relevant_while_editing() {
        assert!(InputEditCommand.is_relevant(&editing_context(), &key(KeyCode::Char('1'))));
        assert!(!InputEditCommand.is_relevant(&CommandContext::default(), &key(KeyCode::Char('1'))));
    }

    #[test]
    fn input_edit_should_map_editing_keys() {
        let context = editing_context();
        let cases = [
            (KeyCode::Char('4'), vec![CommandEvent::InputCharRequested { ch: '4' }]),
            (KeyCode::Backspace, vec![CommandEvent::InputBackspaceRequested]),
            (KeyCode::Enter, vec![CommandEvent::InputSubmitRequested]),
            (KeyCode::Esc, vec![CommandEvent::InputCancelRequested]),
            (KeyCode::Char('x'), Vec::new()),
            (KeyCode::Tab, Vec::new()),
        ];

        for (code, expected) in cases {
            assert_eq!(InputEditCommand.execute(key(code), &context).unwrap(), expected);
        }
    }
}
