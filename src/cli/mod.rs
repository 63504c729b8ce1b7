//! Command line surface of the demo binary.
//!
//! Includes argument parsing (`args`) and the demo menu wired to it (`demo`).

mod args;
mod demo;

pub use args::*;
pub use demo::*;
