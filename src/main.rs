//! This crate contains the source code for the binary for the maze walker labyrinwalk.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use std::{
    io::{self, IsTerminal as _},
    process::ExitCode,
};

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use labyrinwalk::{usage_exit_status, App, Args};

fn main() -> Result<ExitCode> {
    install()?;

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            return Ok(ExitCode::from(usage_exit_status(&err)));
        }
    };

    let app = App::new(args.into_settings(io::stdout().is_terminal()));
    app.init_logging()?;
    app.run()
}
