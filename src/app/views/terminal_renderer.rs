//! # Terminal Renderer
//!
//! Draws the header, the optional sidebar, the active screen and the status
//! bar onto a [`RenderStream`]. Line contents come from [`super::layout`].

use super::ansi_escape_codes::{BOLD, DIM, FG_YELLOW, RESET, REVERSE};
use super::layout::{self, Line, LineStyle, SIDEBAR_WIDTH};
use crate::app::events::ViewEvent;
use crate::app::io::RenderStream;
use crate::app::services::MovieSource;
use crate::app::view_models::AppViewModel;
use anyhow::Result;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal: raw mode, alternate screen, hidden cursor
    fn initialize(&mut self) -> Result<()>;

    fn render_full<S: MovieSource>(&mut self, view_model: &AppViewModel<S>) -> Result<()>;

    /// Redraw everything below the header and above the status bar
    fn render_content<S: MovieSource>(&mut self, view_model: &AppViewModel<S>) -> Result<()>;

    fn render_status_bar<S: MovieSource>(&mut self, view_model: &AppViewModel<S>) -> Result<()>;

    fn handle_view_event<S: MovieSource>(
        &mut self,
        event: &ViewEvent,
        view_model: &AppViewModel<S>,
    ) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;
}

fn styled(line: &Line, width: usize) -> String {
    let text = layout::fit(&line.text, width);
    match line.style {
        LineStyle::Plain => text,
        LineStyle::Title => format!("{BOLD}{text}{RESET}"),
        LineStyle::Muted => format!("{DIM}{text}{RESET}"),
    }
}

pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    fn width(&self) -> usize {
        self.terminal_size.0 as usize
    }

    /// Rows between the header and the status bar
    fn body_height(&self) -> usize {
        (self.terminal_size.1 as usize).saturating_sub(2)
    }

    fn write_row(&mut self, row: usize, text: &str) -> Result<()> {
        self.render_stream.move_cursor(0, row as u16)?;
        self.render_stream.clear_line()?;
        self.render_stream.write_all(text.as_bytes())?;
        Ok(())
    }

    fn render_header<S: MovieSource>(&mut self, view_model: &AppViewModel<S>) -> Result<()> {
        let header = layout::header_line(view_model.shell(), self.width());
        self.write_row(0, &format!("{REVERSE}{header}{RESET}"))
    }

    fn draw_body<S: MovieSource>(&mut self, view_model: &AppViewModel<S>) -> Result<()> {
        let width = self.width();
        let sidebar = view_model
            .shell()
            .is_sidebar_open()
            .then(|| layout::sidebar_lines(view_model.shell()));
        let content_width = match sidebar {
            Some(_) => width.saturating_sub(SIDEBAR_WIDTH),
            None => width,
        };
        let body = layout::body_lines(view_model);

        for row in 0..self.body_height() {
            let content = body
                .get(row)
                .map_or_else(String::new, |line| styled(line, content_width));
            let text = match &sidebar {
                Some(lines) => {
                    let cell = lines.get(row).map_or("", |line| line.text.as_str());
                    format!(
                        "{FG_YELLOW}{}{RESET}│{content}",
                        layout::fit(cell, SIDEBAR_WIDTH.saturating_sub(1))
                    )
                }
                None => content,
            };
            self.write_row(row + 1, &text)?;
        }
        Ok(())
    }

    fn draw_status_bar<S: MovieSource>(&mut self, view_model: &AppViewModel<S>) -> Result<()> {
        let status = layout::status_line(view_model, self.width());
        let row = (self.terminal_size.1 as usize).saturating_sub(1);
        self.write_row(row, &format!("{REVERSE}{status}{RESET}"))
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_full<S: MovieSource>(&mut self, view_model: &AppViewModel<S>) -> Result<()> {
        self.render_stream.clear_screen()?;
        self.render_header(view_model)?;
        self.draw_body(view_model)?;
        self.draw_status_bar(view_model)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_content<S: MovieSource>(&mut self, view_model: &AppViewModel<S>) -> Result<()> {
        self.draw_body(view_model)?;
        self.draw_status_bar(view_model)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_status_bar<S: MovieSource>(&mut self, view_model: &AppViewModel<S>) -> Result<()> {
        self.draw_status_bar(view_model)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn handle_view_event<S: MovieSource>(
        &mut self,
        event: &ViewEvent,
        view_model: &AppViewModel<S>,
    ) -> Result<()> {
        match event {
            ViewEvent::FullRedrawRequired => self.render_full(view_model),
            ViewEvent::ContentRedrawRequired => self.render_content(view_model),
            ViewEvent::StatusBarUpdateRequired => self.render_status_bar(view_model),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        Ok(())
    }
}
