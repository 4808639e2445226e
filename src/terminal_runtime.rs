use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::error;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::config::Theme;
use crate::renderer;
use crate::session::Session;
use crate::ui::hud::HudInfo;

/// Screen a [`Session`] is drawn on.
///
/// Built with [`GameScreen::enter`] it owns raw mode and the alternate screen
/// and hands both back on drop; built with [`GameScreen::with_backend`] it
/// leaves the real terminal alone.
pub struct GameScreen<B: Backend> {
    terminal: Terminal<B>,
    owns_tty: bool,
}

impl GameScreen<CrosstermBackend<io::Stdout>> {
    /// Switches stdout into raw mode on the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let screen = execute!(io::stdout(), EnterAlternateScreen, Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));

        match screen {
            Ok(terminal) => Ok(Self {
                terminal,
                owns_tty: true,
            }),
            Err(err) => {
                restore_tty();
                Err(err)
            }
        }
    }
}

impl<B: Backend> GameScreen<B> {
    /// Wraps an already configured backend.
    pub fn with_backend(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            owns_tty: false,
        })
    }

    /// Renders one frame of `session`.
    pub fn draw_session(&mut self, session: &Session, theme: &Theme) -> io::Result<()> {
        self.terminal.draw(|frame| {
            renderer::render(
                frame,
                session.state(),
                HudInfo {
                    autoplay: session.autoplay(),
                    theme,
                },
            );
        })?;
        Ok(())
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Drop for GameScreen<B> {
    fn drop(&mut self) {
        if self.owns_tty {
            restore_tty();
        }
    }
}

/// Puts the terminal back before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_tty();
        default_hook(panic_info);
    }));
}

fn restore_tty() {
    if let Err(err) = disable_raw_mode() {
        error!("failed to disable raw mode: {err}");
    }
    if let Err(err) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
        error!("failed to leave alternate screen: {err}");
    }
}
