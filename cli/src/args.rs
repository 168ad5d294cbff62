//! Command-line parsing.

use anyhow::{bail, Result};

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search the storefront
    Search {
        query: String,
        json: bool,
        headful: bool,
    },
    /// Load and report the service-account file
    CheckCredentials,
    /// Print the configuration file location
    ConfigPath,
    Help,
}

/// Parse the arguments that follow the program name.
pub fn parse<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "search" => parse_search(args),
        "check-credentials" => no_more_args(args, Command::CheckCredentials),
        "config-path" => no_more_args(args, Command::ConfigPath),
        "-h" | "--help" | "help" => Ok(Command::Help),
        other => bail!("Unknown command: {other} (try --help)"),
    }
}

fn parse_search(args: impl Iterator<Item = String>) -> Result<Command> {
    let mut words = Vec::new();
    let mut json = false;
    let mut headful = false;

    for a in args {
        match a.as_str() {
            "--json" => json = true,
            "--headful" => headful = true,
            "-h" | "--help" => return Ok(Command::Help),
            flag if flag.starts_with("--") => bail!("Unknown option for search: {flag}"),
            _ => words.push(a),
        }
    }

    if words.is_empty() {
        bail!("Missing search query");
    }

    Ok(Command::Search {
        query: words.join(" "),
        json,
        headful,
    })
}

fn no_more_args(mut args: impl Iterator<Item = String>, command: Command) -> Result<Command> {
    match args.next() {
        Some(extra) => bail!("Unexpected argument: {extra}"),
        None => Ok(command),
    }
}
