pub mod backend;

use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::{
        ValueParser,
        styling::{AnsiColor, Effects, Styles},
    },
};

pub const ARG_PORT: &str = "port";
pub const ARG_VERBOSITY: &str = "verbosity";

/// Accepted by `PORTICO_LOG_LEVEL`, indexed by `-v` count.
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// `PORTICO_LOG_LEVEL` takes a level name or the equivalent `-v` count.
fn log_level_parser() -> ValueParser {
    ValueParser::from(|level: &str| -> Result<u8, String> {
        let level = level.trim().to_ascii_lowercase();
        LOG_LEVELS
            .iter()
            .position(|name| *name == level)
            .or_else(|| level.parse::<usize>().ok().filter(|n| *n < LOG_LEVELS.len()))
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("expected one of {}", LOG_LEVELS.join(", ")))
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("portico")
        .about("Front-end gateway for the form backend")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PORTICO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Repeat to raise the log level from error up to trace")
                .env("PORTICO_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(log_level_parser()),
        );

    backend::with_args(command)
}
