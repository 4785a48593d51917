//! # Mock I/O for Testing
//!
//! Scripted input and captured output. The render stream shares its log
//! through a [`RenderLog`] handle, so tests can still inspect the output
//! after the stream has been moved into a renderer.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Pre-programmed event source
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// One plain key press per character
    pub fn from_keys(keys: &str) -> Self {
        Self::new(keys.chars().map(|ch| Self::key(KeyCode::Char(ch))).collect())
    }

    pub fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn push_key(&mut self, code: KeyCode) {
        self.push_event(Self::key(code));
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    ClearScreen,
    ClearLine,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(String),
    Flush,
}

#[derive(Debug, Default)]
struct RenderState {
    commands: Vec<RenderCommand>,
    screen_text: String,
    raw_mode: bool,
    alternate_screen: bool,
    cursor_visible: bool,
}

/// Shared view of everything a [`MockRenderStream`] received
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    state: Arc<Mutex<RenderState>>,
}

impl RenderLog {
    fn lock(&self) -> MutexGuard<'_, RenderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn commands(&self) -> Vec<RenderCommand> {
        self.lock().commands.clone()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.lock().commands.contains(command)
    }

    /// Text written since the last clear-screen
    pub fn screen_text(&self) -> String {
        self.lock().screen_text.clone()
    }

    pub fn clear_screen_count(&self) -> usize {
        self.lock()
            .commands
            .iter()
            .filter(|c| **c == RenderCommand::ClearScreen)
            .count()
    }

    pub fn is_raw_mode(&self) -> bool {
        self.lock().raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.lock().alternate_screen
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.lock().cursor_visible
    }

    pub fn clear(&self) {
        self.lock().commands.clear();
    }

    fn record(&self, command: RenderCommand) {
        let mut state = self.lock();
        match &command {
            RenderCommand::ClearScreen => state.screen_text.clear(),
            RenderCommand::Write(text) => state.screen_text.push_str(text),
            RenderCommand::EnableRawMode => state.raw_mode = true,
            RenderCommand::DisableRawMode => state.raw_mode = false,
            RenderCommand::EnterAlternateScreen => state.alternate_screen = true,
            RenderCommand::LeaveAlternateScreen => state.alternate_screen = false,
            RenderCommand::HideCursor => state.cursor_visible = false,
            RenderCommand::ShowCursor => state.cursor_visible = true,
            _ => {}
        }
        state.commands.push(command);
    }
}

/// Render stream that records instead of drawing
pub struct MockRenderStream {
    log: RenderLog,
    terminal_size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(terminal_size: TerminalSize) -> Self {
        let log = RenderLog::default();
        log.lock().cursor_visible = true;
        Self { log, terminal_size }
    }

    /// Handle that stays valid after the stream is moved
    pub fn log(&self) -> RenderLog {
        self.log.clone()
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.log.record(RenderCommand::Write(
            String::from_utf8_lossy(buf).into_owned(),
        ));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.log.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.log.record(RenderCommand::ClearScreen);
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        self.log.record(RenderCommand::ClearLine);
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.log.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.log.record(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.log.record(RenderCommand::ShowCursor);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.log.record(RenderCommand::EnterAlternateScreen);
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.log.record(RenderCommand::LeaveAlternateScreen);
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.log.record(RenderCommand::EnableRawMode);
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.log.record(RenderCommand::DisableRawMode);
        Ok(())
    }
}
