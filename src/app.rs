//! The embedding entry point: owns a `Menu`, acquires the terminal session around the
//! loop, and maps the outcome to a process exit code.

use crate::config::Config;
use crate::error::Result;
use crate::menu::{Menu, Termination};
use crate::terminal::{
    install_termination_signals, LineIo, ModeOps, PlatformModeOps, SignalListener, Terminal,
    TerminalSession, QUIT_MESSAGE,
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use tracing::{error, info, warn};

/// A menu application.
///
/// ```no_run
/// use termenu::{App, Menu};
///
/// fn main() -> std::process::ExitCode {
///     let menu = Menu::new()
///         .entry("1. Say hi", || println!("Hi!"))
///         .entry("2. Say bye", || println!("Bye!"));
///     let result = App::new(menu).run();
///     termenu::exit_code(&result)
/// }
/// ```
pub struct App {
    menu: Menu,
    config: Config,
}

impl App {
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Runs the menu on stdin/stdout.
    ///
    /// Captures the terminal mode of stdin, installs the SIGINT/SIGTERM listener, clears
    /// the screen and enters the loop. The mode is restored and [`QUIT_MESSAGE`] printed
    /// on every way out of the loop.
    ///
    /// # Errors
    ///
    /// Returns `AppError::TerminalMode` if stdin's mode cannot be captured (nothing is
    /// rendered in that case), or `AppError::Signal` if the signal listener cannot be set up.
    pub fn run(&mut self) -> Result<Termination> {
        let color = self.config.color.apply();
        let session = TerminalSession::acquire(PlatformModeOps::default())?;
        let listener = install_termination_signals(session.restorer())?;
        let mut terminal = Terminal::stdio(color);
        Ok(self.run_session(session, &mut terminal, Some(listener)))
    }

    /// Runs the menu against the given mode backend and I/O, without signal handling.
    ///
    /// # Errors
    ///
    /// Returns `AppError::TerminalMode` if `ops` fails to capture the mode.
    pub fn run_with<O: ModeOps, I: LineIo + ?Sized>(
        &mut self,
        ops: O,
        io: &mut I,
    ) -> Result<Termination> {
        let session = TerminalSession::acquire(ops)?;
        Ok(self.run_session(session, io, None))
    }

    fn run_session<O: ModeOps, I: LineIo + ?Sized>(
        &mut self,
        session: TerminalSession<O>,
        io: &mut I,
        listener: Option<SignalListener>,
    ) -> Termination {
        if self.config.clear_screen {
            if let Err(e) = io.clear_screen() {
                warn!("Failed to clear screen: {}", e);
            }
        }

        let menu = &mut self.menu;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| menu.run(io)));
        let termination = outcome.unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            error!("Menu action panicked: {}", message);
            Termination::ActionPanicked(message)
        });

        // The session is about to end; a late signal must not end it a second time.
        drop(listener);
        let _ = io.write_line(QUIT_MESSAGE);
        if let Err(e) = session.release() {
            warn!("Failed to restore terminal mode: {}", e);
        }
        info!(?termination, "Session ended");
        termination
    }
}

/// Exit status for the result of [`App::run`].
///
/// Every way out of the loop is a success; only a failure before the loop
/// starts (terminal mode capture, signal setup) is reported as a failure.
pub fn exit_status(result: &Result<Termination>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// [`exit_status`] as a value `main` can return.
pub fn exit_code(result: &Result<Termination>) -> ExitCode {
    ExitCode::from(exit_status(result))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
