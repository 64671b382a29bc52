//! Core process state shared across the crate.

mod state;

pub use state::{is_shutdown, register_server, setup_shutdown_handler};
