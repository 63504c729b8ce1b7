//! A minimal numbered terminal menu.
//!
//! Renders an ordered list of labels, reads a numeric selection from stdin, runs the
//! matching callback, and loops until the synthesized `Exit` entry is chosen. The
//! terminal mode of stdin is captured before the loop and restored on every way out.
//!
//! Includes:
//! - `menu`: `Menu`, `MenuEntry`, and the dispatch loop.
//! - `terminal`: the `LineIo` adapter and terminal session ownership.
//! - `app`: `App`, tying session, adapter and loop together.
//! - `config`: session options.
//! - `error`: `AppError` and the crate `Result` alias.

pub mod app;
pub mod config;
pub mod error;
pub mod menu;
pub mod terminal;

pub use app::{exit_code, exit_status, App};
pub use config::{ColorChoice, Config};
pub use error::{AppError, Result};
pub use menu::{Choice, Menu, MenuEntry, Termination};
pub use terminal::{LineIo, Notice, Terminal, TerminalSession};
