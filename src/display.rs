//! Terminal output for the quote board

use crate::{
    error::BoardError,
    render::{BoardFrame, BoardWidget},
};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};

/// Something a refresh cycle can present a finished frame to
pub trait Display {
    /// Clears the screen and presents the whole frame at once
    fn present(&mut self, frame: &BoardFrame) -> Result<(), BoardError>;

    /// Presents the last frame again, e.g. after a resize
    fn redraw(&mut self) -> Result<(), BoardError> {
        Ok(())
    }
}

/// Puts the real terminal into raw / alternate-screen mode and restores it on drop
struct TerminalGuard;

impl TerminalGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
            tracing::warn!(error = %e, "Failed to leave alternate screen");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "Failed to disable raw mode");
        }
    }
}

/// ratatui-backed display
///
/// Each `present` renders into a fresh buffer and the terminal flushes only
/// the finished buffer, so a half-drawn frame is never shown.
pub struct TerminalDisplay<B: Backend> {
    terminal: Terminal<B>,
    last_frame: Option<BoardFrame>,
    // dropped after `terminal`, so the screen is restored last
    _guard: Option<TerminalGuard>,
}

impl TerminalDisplay<CrosstermBackend<Stdout>> {
    /// Takes over stdout
    ///
    /// # Errors
    /// [`BoardError::DisplayInit`] if the terminal can't be switched into
    /// raw / alternate-screen mode. Anything already switched is undone.
    pub fn init() -> Result<Self, BoardError> {
        let guard = TerminalGuard::acquire().map_err(BoardError::DisplayInit)?;
        let mut terminal =
            Terminal::new(CrosstermBackend::new(io::stdout())).map_err(BoardError::DisplayInit)?;
        terminal.clear().map_err(BoardError::DisplayInit)?;

        tracing::info!("Terminal initialized");
        Ok(Self {
            terminal,
            last_frame: None,
            _guard: Some(guard),
        })
    }
}

impl<B: Backend> TerminalDisplay<B> {
    /// Wraps an already prepared backend
    pub fn with_backend(backend: B) -> Result<Self, BoardError> {
        Ok(Self {
            terminal: Terminal::new(backend).map_err(BoardError::DisplayInit)?,
            last_frame: None,
            _guard: None,
        })
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn last_frame(&self) -> Option<&BoardFrame> {
        self.last_frame.as_ref()
    }

    fn draw(&mut self, frame: &BoardFrame) -> io::Result<()> {
        self.terminal
            .draw(|f| f.render_widget(BoardWidget::new(frame), f.area()))?;
        Ok(())
    }
}

impl<B: Backend> Display for TerminalDisplay<B> {
    fn present(&mut self, frame: &BoardFrame) -> Result<(), BoardError> {
        self.draw(frame)?;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), BoardError> {
        if let Some(frame) = self.last_frame.take() {
            let result = self.draw(&frame);
            self.last_frame = Some(frame);
            result?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FrameRow, Tone};
    use ratatui::{backend::TestBackend, buffer::Buffer};

    fn frame(summary: &str) -> BoardFrame {
        BoardFrame::build(FrameRow::single(summary, Tone::Info), &[])
    }

    fn line(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_present_replaces_previous_frame() {
        let mut display = TerminalDisplay::with_backend(TestBackend::new(40, 3)).unwrap();

        display.present(&frame("a much longer first summary")).unwrap();
        display.present(&frame("short")).unwrap();

        let buffer = display.backend().buffer();
        assert_eq!(line(buffer, 0), "short");
        assert!(line(buffer, 1).starts_with("Name"));
        assert_eq!(line(buffer, 2), "");
        assert_eq!(display.last_frame(), Some(&frame("short")));
    }

    #[test]
    fn test_redraw_without_frame_is_noop() {
        let mut display = TerminalDisplay::with_backend(TestBackend::new(10, 2)).unwrap();
        display.redraw().unwrap();
        assert!(display.last_frame().is_none());

        display.present(&frame("x")).unwrap();
        display.redraw().unwrap();
        assert_eq!(line(display.backend().buffer(), 0), "x");
    }
}
