//! Command-line parsing shared by both server binaries.
//!
//! Usage is `<binary> <port>`. Anything else exits with status 255.

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;

/// Exit status for a missing or unparseable port.
pub const EXIT_BAD_ARGUMENT: i32 = 255;

#[derive(Debug, Parser)]
#[command(version, about = "Canned-response HTTP backend for throughput benchmarks")]
pub struct Cli {
    /// TCP port to listen on (0 picks an ephemeral port)
    pub port: u16,
}

/// Parse `args` (including the program name), exiting the process on failure.
///
/// `--help` and `--version` exit 0; every other parse error exits 255.
pub fn parse_or_exit<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                std::process::exit(EXIT_BAD_ARGUMENT);
            }
        },
    }
}
