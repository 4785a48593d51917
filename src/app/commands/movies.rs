//! # Movie List Commands
//!
//! Pagination and filter bindings, active in normal mode on the movie list.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{Command, CommandContext, CommandEvent, PageMove};
use crate::app::events::{InputMode, Route};
use crate::app::models::VISIBLE_WINDOW;

fn on_movies(context: &CommandContext) -> bool {
    context.is_normal_on(Route::Movies)
}

/// ←/h previous, →/l next, Home/g first, End/G last
pub struct PageNavigationCommand;

impl PageNavigationCommand {
    fn movement(event: &KeyEvent) -> Option<PageMove> {
        match event.code {
            KeyCode::Left | KeyCode::Char('h') => Some(PageMove::Previous),
            KeyCode::Right | KeyCode::Char('l') => Some(PageMove::Next),
            KeyCode::Home | KeyCode::Char('g') => Some(PageMove::First),
            KeyCode::End | KeyCode::Char('G') => Some(PageMove::Last),
            _ => None,
        }
    }
}

impl Command for PageNavigationCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        on_movies(context) && Self::movement(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(Self::movement(&event)
            .map(|movement| CommandEvent::PageMoveRequested { movement })
            .into_iter()
            .collect())
    }

    fn name(&self) -> &'static str {
        "PageNavigation"
    }
}

/// 1-5 pick a page from the visible window
pub struct VisibleSlotCommand;

impl VisibleSlotCommand {
    fn slot(event: &KeyEvent) -> Option<usize> {
        match event.code {
            KeyCode::Char(ch) => ch
                .to_digit(10)
                .map(|digit| digit as usize)
                .filter(|digit| (1..=VISIBLE_WINDOW as usize).contains(digit))
                .map(|digit| digit - 1),
            _ => None,
        }
    }
}

impl Command for VisibleSlotCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        on_movies(context) && Self::slot(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(Self::slot(&event)
            .map(|slot| CommandEvent::VisibleSlotRequested { slot })
            .into_iter()
            .collect())
    }

    fn name(&self) -> &'static str {
        "VisibleSlot"
    }
}

/// Edit the year filter (y)
pub struct EditFilterYearCommand;

impl Command for EditFilterYearCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        on_movies(context) && event.code == KeyCode::Char('y')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::InputModeRequested {
            mode: InputMode::EditingFilterYear,
        }])
    }

    fn name(&self) -> &'static str {
        "EditFilterYear"
    }
}

/// Cycle the winner filter (w)
pub struct CycleWinnerFilterCommand;

impl Command for CycleWinnerFilterCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        on_movies(context) && event.code == KeyCode::Char('w')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::WinnerFilterCycleRequested])
    }

    fn name(&self) -> &'static str {
        "CycleWinnerFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn movies_context() -> CommandContext {
        CommandContext::new(Route::Movies, InputMode::Normal, false)
    }

    #[test]
    fn page_navigation_should_map_arrows_and_vim_keys() {
        let cmd = PageNavigationCommand;
        let cases = [
            (KeyCode::Left, PageMove::Previous),
            (KeyCode::Char('h'), PageMove::Previous),
            (KeyCode::Right, PageMove::Next),
            (KeyCode::Char('l'), PageMove::Next),
            (KeyCode::Home, PageMove::First),
            (KeyCode::Char('g'), PageMove::First),
            (KeyCode::End, PageMove::Last),
            (KeyCode::Char('G'), PageMove::Last),
        ];

        for (code, movement) in cases {
            assert!(cmd.is_relevant(&movies_context(), &key(code)));
            assert_eq!(
                cmd.execute(key(code), &movies_context()).unwrap(),
                vec![CommandEvent::PageMoveRequested { movement }]
            );
        }
    }

    #[test]
    fn page_navigation_should_not_be_relevant_on_dashboard() {
        assert!(!PageNavigationCommand.is_relevant(&CommandContext::default(), &key(KeyCode::Left)));
    }

    #[test]
    fn visible_slot_should_accept_one_to_five() {
        let cmd = VisibleSlotCommand;

        assert_eq!(
            cmd.execute(key(KeyCode::Char('1')), &movies_context()).unwrap(),
            vec![CommandEvent::VisibleSlotRequested { slot: 0 }]
        );
        assert_eq!(
            cmd.execute(key(KeyCode::Char('5')), &movies_context()).unwrap(),
            vec![CommandEvent::VisibleSlotRequested { slot: 4 }]
        );
        assert!(!cmd.is_relevant(&movies_context(), &key(KeyCode::Char('0'))));
        assert!(!cmd.is_relevant(&movies_context(), &key(KeyCode::Char('6'))));
    }

    #[test]
    fn filter_keys_should_produce_filter_events() {
        assert_eq!(
            EditFilterYearCommand
                .execute(key(KeyCode::Char('y')), &movies_context())
                .unwrap(),
            vec![CommandEvent::InputModeRequested {
                mode: InputMode::EditingFilterYear
            }]
        );
        assert_eq!(
            CycleWinnerFilterCommand
                .execute(key(KeyCode::Char('w')), &movies_context())
                .unwrap(),
            vec![CommandEvent::WinnerFilterCycleRequested]
        );
    }
}
