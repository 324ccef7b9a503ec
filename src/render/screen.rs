//! Terminal output.
//!
//! [`Screen`] is the narrow surface the prompt draws through. [`TerminalScreen`] is the
//! ratatui implementation: an inline viewport below the shell prompt, drawn in raw mode.

use crate::error::{PromptError, Result};
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};
use ratatui::{Terminal, TerminalOptions, Viewport};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Where the prompt draws its frames.
pub trait Screen: Send {
    /// Take over the terminal (raw mode, hidden cursor).
    fn enter(&mut self) -> Result<()>;

    /// Replace the visible frame with `lines`.
    fn draw(&mut self, lines: &[Line<'static>]) -> Result<()>;

    /// Blank the prompt area.
    fn clear(&mut self) -> Result<()>;

    /// Clear the prompt area, restore the terminal and leave `farewell` behind.
    fn leave(&mut self, farewell: &[Line<'static>]) -> Result<()>;
}

/// [`Screen`] drawing into an inline ratatui viewport of fixed height.
///
/// Raw mode is tracked apart from the terminal handle so that it is switched off again
/// even when the viewport could not be created or torn down cleanly.
pub struct TerminalScreen {
    terminal: Option<CrosstermTerminal>,
    raw_mode: bool,
    height: u16,
}

impl TerminalScreen {
    pub fn new(height: u16) -> Self {
        Self {
            terminal: None,
            raw_mode: false,
            height: height.max(1),
        }
    }

    fn terminal(&mut self) -> Result<&mut CrosstermTerminal> {
        self.terminal.as_mut().ok_or_else(|| {
            PromptError::terminal(
                "screen used before enter",
                io::Error::new(io::ErrorKind::NotConnected, "terminal not initialised"),
            )
        })
    }

    fn open(height: u16) -> Result<CrosstermTerminal> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        )
        .map_err(|err| PromptError::terminal("create inline viewport", err))?;
        terminal.hide_cursor()?;
        Ok(terminal)
    }

    /// Show the cursor and leave raw mode, whatever state the screen is in.
    fn restore(&mut self) -> Result<()> {
        let cursor = match self.terminal.take() {
            Some(mut terminal) => terminal.show_cursor(),
            None => Ok(()),
        };
        if self.raw_mode {
            disable_raw_mode().map_err(|err| PromptError::terminal("disable raw mode", err))?;
            self.raw_mode = false;
        }
        cursor?;
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn enter(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            return Ok(());
        }

        enable_raw_mode().map_err(|err| PromptError::terminal("enable raw mode", err))?;
        self.raw_mode = true;

        match Self::open(self.height) {
            Ok(terminal) => {
                self.terminal = Some(terminal);
                Ok(())
            }
            Err(err) => {
                if let Err(restore) = self.restore() {
                    log::warn!("terminal restore after failed setup: {restore}");
                }
                Err(err)
            }
        }
    }

    fn draw(&mut self, lines: &[Line<'static>]) -> Result<()> {
        let paragraph = Paragraph::new(lines.to_vec());
        self.terminal()?
            .draw(|frame| frame.render_widget(paragraph, frame.size()))
            .map_err(|err| PromptError::terminal("draw frame", err))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.terminal()?.clear()?;
        Ok(())
    }

    fn leave(&mut self, farewell: &[Line<'static>]) -> Result<()> {
        let teardown = match self.terminal.as_mut() {
            Some(terminal) => write_farewell(terminal, farewell),
            None => Ok(()),
        };
        let restored = self.restore();
        teardown?;
        restored
    }
}

fn write_farewell(terminal: &mut CrosstermTerminal, farewell: &[Line<'static>]) -> Result<()> {
    terminal.clear()?;
    if !farewell.is_empty() {
        let paragraph = Paragraph::new(farewell.to_vec());
        let height = u16::try_from(farewell.len()).unwrap_or(u16::MAX);
        terminal.insert_before(height, |buf| paragraph.render(buf.area, buf))?;
    }
    Ok(())
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_before_enter_is_an_error() {
        let mut screen = TerminalScreen::new(4);
        let err = screen.draw(&[Line::from("x")]).unwrap_err();
        assert!(matches!(err, PromptError::Terminal { .. }));
    }

    #[test]
    fn leaving_an_unused_screen_is_a_no_op() {
        let mut screen = TerminalScreen::new(0);
        assert_eq!(screen.height, 1);
        assert!(screen.leave(&[Line::from("bye")]).is_ok());
        assert!(!screen.raw_mode);
    }

    #[test]
    fn leave_switches_off_raw_mode_without_a_viewport() {
        // raw mode was entered but the inline viewport never came up
        let mut screen = TerminalScreen::new(4);
        screen.raw_mode = true;

        assert!(screen.leave(&[Line::from("bye")]).is_ok());
        assert!(!screen.raw_mode);
        assert!(screen.terminal.is_none());
    }

    #[test]
    fn restore_is_idempotent() {
        let mut screen = TerminalScreen::new(4);
        screen.raw_mode = true;

        assert!(screen.restore().is_ok());
        assert!(screen.restore().is_ok());
        assert!(!screen.raw_mode);
    }
}
