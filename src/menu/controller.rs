use super::{Choice, Menu};
use crate::terminal::{LineIo, Notice};
use std::io;
use tracing::{debug, info, warn};

pub const HEADER: &str = "Select an option:";
pub const PROMPT: &str = "Enter your choice: ";
pub const INVALID_INPUT: &str = "Invalid input. Please enter a number.";
pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";
pub const EXITING: &str = "Exiting...";

/// Why the menu loop stopped.
#[derive(Debug)]
pub enum Termination {
    /// The user picked the exit option.
    ExitSelected,
    /// Writing to the terminal failed mid-session.
    WriteFailed(io::Error),
    /// Reading a selection failed, including end of input.
    ReadFailed(io::Error),
    /// An action panicked; the payload message is kept for logging.
    ActionPanicked(String),
}

impl Termination {
    /// Whether the loop ended because the user asked it to.
    pub fn is_exit_selected(&self) -> bool {
        matches!(self, Termination::ExitSelected)
    }
}

enum State {
    Running,
    Terminated(Termination),
}

impl Menu {
    /// Runs the menu loop until the exit option is chosen or terminal I/O fails.
    ///
    /// Each iteration renders the menu, prompts, reads one line and either invokes the
    /// selected action, reports bad input, or stops. Actions run synchronously and block
    /// the loop until they return.
    pub fn run<I: LineIo + ?Sized>(&mut self, io: &mut I) -> Termination {
        info!(entries = self.len(), "Menu loop started");
        loop {
            if let State::Terminated(termination) = self.step(io) {
                info!(?termination, "Menu loop terminated");
                return termination;
            }
        }
    }

    /// Writes the header, every label in order, and the synthesized exit line.
    pub fn render<I: LineIo + ?Sized>(&self, io: &mut I) -> io::Result<()> {
        io.write_notice(Notice::Header, HEADER)?;
        for label in self.labels() {
            io.write_line(label)?;
        }
        io.write_line(&self.exit_label())
    }

    fn step<I: LineIo + ?Sized>(&mut self, io: &mut I) -> State {
        if let Err(e) = self.render(io).and_then(|()| io.write_line(PROMPT)) {
            return write_failed(io, e);
        }

        let line = match io.read_line() {
            Ok(line) => line,
            Err(e) => {
                let _ = io.write_notice(Notice::Error, &format!("Error reading input: {}", e));
                return State::Terminated(Termination::ReadFailed(e));
            },
        };

        let feedback = match Choice::parse(&line, self.len()) {
            Choice::Action(index) => {
                debug!(
                    choice = index + 1,
                    label = self.entries[index].label(),
                    "Dispatching action"
                );
                self.entries[index].invoke();
                Ok(())
            },
            Choice::Exit => {
                if let Err(e) = io.write_notice(Notice::Farewell, EXITING) {
                    warn!("Failed to write exit message: {}", e);
                }
                return State::Terminated(Termination::ExitSelected);
            },
            Choice::OutOfRange(value) => {
                debug!(value, "Choice out of range");
                io.write_notice(Notice::Error, INVALID_CHOICE)
            },
            Choice::Invalid => {
                debug!(input = %line, "Non-numeric input");
                // Straight to the next render, no separator line.
                return match io.write_notice(Notice::Error, INVALID_INPUT) {
                    Ok(()) => State::Running,
                    Err(e) => write_failed(io, e),
                };
            },
        };

        match feedback.and_then(|()| io.write_line("")) {
            Ok(()) => State::Running,
            Err(e) => write_failed(io, e),
        }
    }
}

fn write_failed<I: LineIo + ?Sized>(io: &mut I, err: io::Error) -> State {
    warn!("Terminal write failed: {}", err);
    let _ = io.write_notice(Notice::Error, &format!("Error writing to terminal: {}", err));
    State::Terminated(Termination::WriteFailed(err))
}
