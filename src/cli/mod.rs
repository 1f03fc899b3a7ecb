//! CLI module for parkcore
//!
//! Provides command-line interface for:
//! - validate: Check a facility configuration
//! - run: Build the facility and serve JSON-lines requests on stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    handle_request, open_facility, run, run_command, serve, start, validate, Request,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_error, write_response};
