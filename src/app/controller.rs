//! # Application Controller
//!
//! Owns the event loop: reads terminal events, maps key presses to
//! commands, applies the resulting command events to the view model and
//! redraws whatever the view model reports as changed.

use crate::app::commands::{CommandContext, CommandEvent, CommandRegistry, PageMove};
use crate::app::io::{EventStream, RenderStream};
use crate::app::services::MovieSource;
use crate::app::view_models::AppViewModel;
use crate::app::views::{TerminalRenderer, ViewRenderer};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::time::Duration;

/// How long one tick waits for terminal input
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct AppController<ES: EventStream, RS: RenderStream, S: MovieSource> {
    view_model: AppViewModel<S>,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream, S: MovieSource> AppController<ES, RS, S> {
    /// Create a controller around injected I/O streams
    pub fn with_io_streams(
        mut view_model: AppViewModel<S>,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;

        let (width, height) = view_renderer.terminal_size();
        view_model.update_terminal_size(width, height);

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
        })
    }

    pub fn view_model(&self) -> &AppViewModel<S> {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut AppViewModel<S> {
        &mut self.view_model
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop until quit is requested
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        self.view_model.start();
        self.view_model.collect_pending_view_events();
        self.view_renderer.render_full(&self.view_model)?;

        let result = self.event_loop().await;

        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            self.tick().await?;
        }
        Ok(())
    }

    /// Handle at most one terminal event, then apply finished background work
    pub async fn tick(&mut self) -> Result<()> {
        if self.event_stream.poll(POLL_INTERVAL)? {
            let event = self.event_stream.read()?;
            self.handle_terminal_event(event)?;
        }

        // Give spawned fetches and debounce timers a chance to run
        tokio::task::yield_now().await;

        if self.should_quit {
            return Ok(());
        }

        self.view_model.process_pending();
        self.render_pending()
    }

    fn handle_terminal_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                self.handle_key_event(key_event)
            }
            Event::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
                self.view_renderer.update_size(width, height);
                self.view_model.update_terminal_size(width, height);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key_event);

        let context = self.command_context();
        let events = self.command_registry.process_event(key_event, &context)?;
        for event in events {
            self.apply_command_event(event);
        }
        Ok(())
    }

    fn command_context(&self) -> CommandContext {
        let shell = self.view_model.shell();
        CommandContext::new(
            shell.route(),
            self.view_model.input_mode(),
            shell.is_sidebar_open(),
        )
    }

    /// Apply a command event to the view model
    fn apply_command_event(&mut self, event: CommandEvent) {
        let view_model = &mut self.view_model;
        match event {
            CommandEvent::QuitRequested => self.should_quit = true,
            CommandEvent::SidebarToggleRequested => view_model.toggle_sidebar(),
            CommandEvent::SidebarCloseRequested => view_model.close_sidebar(),
            CommandEvent::NavigateRequested { route } => view_model.navigate(route),
            CommandEvent::PageMoveRequested { movement } => {
                let movies = view_model.movies_mut();
                match movement {
                    PageMove::Previous => {
                        movies.previous_page();
                    }
                    PageMove::Next => {
                        movies.next_page();
                    }
                    PageMove::First => movies.go_to_first_page(),
                    PageMove::Last => movies.go_to_last_page(),
                }
            }
            CommandEvent::VisibleSlotRequested { slot } => {
                view_model.go_to_visible_slot(slot);
            }
            CommandEvent::WinnerFilterCycleRequested => view_model.cycle_winner_filter(),
            CommandEvent::SearchRequested => view_model.dashboard_mut().search_movies_by_year(),
            CommandEvent::InputModeRequested { mode } => view_model.begin_input(mode),
            CommandEvent::InputCharRequested { ch } => view_model.input_char(ch),
            CommandEvent::InputBackspaceRequested => view_model.input_backspace(),
            CommandEvent::InputSubmitRequested => view_model.submit_input(),
            CommandEvent::InputCancelRequested => view_model.end_input(),
        }
    }

    fn render_pending(&mut self) -> Result<()> {
        let view_events = self.view_model.collect_pending_view_events();
        for event in view_events {
            self.view_renderer
                .handle_view_event(&event, &self.view_model)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::{InputMode, Route};
    use crate::app::io::{MockEventStream, MockRenderStream, RenderCommand, RenderLog};
    use crate::app::services::MovieQuery;
    use crate::app::testing::FakeMovieSource;
    use crate::app::view_models::MoviesSettings;
    use crossterm::event::KeyCode;
    use std::sync::Arc;

    type TestController = AppController<MockEventStream, MockRenderStream, FakeMovieSource>;

    fn controller(events: MockEventStream) -> (Arc<FakeMovieSource>, RenderLog, TestController) {
        let source = Arc::new(FakeMovieSource::new());
        let view_model = AppViewModel::new(source.clone(), MoviesSettings::default());
        let render_stream = MockRenderStream::with_size((100, 30));
        let log = render_stream.log();
        let controller = AppController::with_io_streams(view_model, events, render_stream).unwrap();
        (source, log, controller)
    }

    async fn drain(controller: &mut TestController) {
        while !controller.should_quit() && controller.event_stream.remaining() > 0 {
            controller.tick().await.unwrap();
        }
    }

    #[tokio::test]
    async fn run_should_set_up_and_restore_terminal() {
        let (_source, log, mut controller) = controller(MockEventStream::from_keys("q"));

        controller.run().await.unwrap();

        assert!(controller.should_quit());
        assert!(log.has_command(&RenderCommand::EnterAlternateScreen));
        assert!(!log.is_alternate_screen());
        assert!(!log.is_raw_mode());
        assert!(controller.view_model().dashboard().is_loaded());
    }

    #[tokio::test]
    async fn movie_list_keys_should_drive_pagination() {
        let (source, log, mut controller) = controller(MockEventStream::from_keys("m"));
        drain(&mut controller).await;
        controller.view_model_mut().movies_mut().wait_for_fetch().await;

        controller.event_stream.push_key(KeyCode::Right);
        drain(&mut controller).await;
        controller.view_model_mut().movies_mut().wait_for_fetch().await;

        assert_eq!(controller.view_model().shell().route(), Route::Movies);
        assert_eq!(
            source.queries(),
            vec![MovieQuery::new(0, 15), MovieQuery::new(1, 15)]
        );

        controller.tick().await.unwrap();
        assert!(log.screen_text().contains("raspberry-awards | List"));
    }

    #[tokio::test]
    async fn tab_should_toggle_sidebar_and_esc_close_it() {
        let (_source, _log, mut controller) =
            controller(MockEventStream::new(vec![MockEventStream::key(KeyCode::Tab)]));
        drain(&mut controller).await;
        assert!(controller.view_model().shell().is_sidebar_open());

        controller.event_stream.push_key(KeyCode::Esc);
        drain(&mut controller).await;
        assert!(!controller.view_model().shell().is_sidebar_open());
    }

    #[tokio::test]
    async fn search_keys_should_edit_and_submit_year() {
        let (source, _log, mut controller) = controller(MockEventStream::from_keys("/2000"));
        drain(&mut controller).await;
        assert_eq!(
            controller.view_model().input_mode(),
            InputMode::EditingSearchYear
        );
        assert_eq!(controller.view_model().input_buffer(), "2000");

        controller.event_stream.push_key(KeyCode::Enter);
        drain(&mut controller).await;
        controller.view_model_mut().dashboard_mut().wait_until_idle().await;

        assert_eq!(controller.view_model().input_mode(), InputMode::Normal);
        assert_eq!(source.winner_years(), vec![2000]);
        assert_eq!(controller.view_model().dashboard().search_results().len(), 2);
    }

    #[tokio::test]
    async fn resize_should_update_terminal_size() {
        let (_source, log, mut controller) =
            controller(MockEventStream::new(vec![Event::Resize(120, 40)]));
        drain(&mut controller).await;

        assert_eq!(controller.view_model().terminal_size(), (120, 40));
        assert!(log.has_command(&RenderCommand::MoveCursor(0, 39)));
    }
}
