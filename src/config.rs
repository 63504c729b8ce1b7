//! Runtime options for a menu session.

use clap::ValueEnum;

/// When to style menu output with ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Let `colored` decide from the environment (`NO_COLOR`, `CLICOLOR`, tty detection).
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Installs the matching process-wide `colored` override and returns whether
    /// notices should be styled at all.
    pub fn apply(self) -> bool {
        match self {
            ColorChoice::Auto => {
                colored::control::unset_override();
                true
            },
            ColorChoice::Always => {
                colored::control::set_override(true);
                true
            },
            ColorChoice::Never => {
                colored::control::set_override(false);
                false
            },
        }
    }
}

/// Options for [`crate::App`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Emit the clear-screen sequence once before the first render.
    pub clear_screen: bool,
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clear_screen: true,
            color: ColorChoice::Auto,
        }
    }
}
