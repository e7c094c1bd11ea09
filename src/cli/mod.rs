//! Command-line interface.

pub mod args;
pub mod signal;

pub use args::Args;
pub use signal::watch_interrupts;
