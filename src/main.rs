//! # tabstat
//!
//! Open a numeric data file and print it as a table with column means.
//!
//! ```bash
//! tabstat data.txt
//! tabstat measurements.csv --output json
//! tabstat log.dat --skip-rows 1 --comment ';' --max-rows 50
//! RUST_LOG=debug tabstat data.txt
//! ```

mod app;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use app::{OutputFormat, ViewerApp};
use tabstat::{Delimiter, LoadOptions};

fn cli() -> Command {
    Command::new("tabstat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Show a numeric data file as a table with column means")
        .arg(
            Arg::new("file")
                .help("Matrix file to open")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .short('d')
                .help("Column separator (single ASCII character, 'tab', or 'ws'); default depends on extension"),
        )
        .arg(
            Arg::new("comment")
                .long("comment")
                .help("Comment character")
                .default_value("#")
                .conflicts_with("no_comment"),
        )
        .arg(
            Arg::new("no_comment")
                .long("no-comment")
                .help("Treat no character as a comment marker")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip_rows")
                .long("skip-rows")
                .help("Number of leading lines to ignore")
                .value_parser(value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output format")
                .value_parser(["table", "json"])
                .default_value("table"),
        )
        .arg(
            Arg::new("max_rows")
                .long("max-rows")
                .help("Rows to show in table output")
                .value_parser(value_parser!(usize))
                .default_value("20"),
        )
}

fn parse_delimiter(raw: &str) -> Result<Delimiter> {
    match raw {
        "ws" | "whitespace" => Ok(Delimiter::Whitespace),
        "tab" | "\\t" => Ok(Delimiter::Char(b'\t')),
        s if s.len() == 1 && s.is_ascii() => Ok(Delimiter::Char(s.as_bytes()[0])),
        other => bail!("invalid delimiter '{other}': expected one ASCII character, 'tab' or 'ws'"),
    }
}

fn load_options(matches: &ArgMatches) -> Result<LoadOptions> {
    let mut options = LoadOptions::default();

    if let Some(raw) = matches.get_one::<String>("delimiter") {
        options = options.with_delimiter(parse_delimiter(raw)?);
    }

    let comment = if matches.get_flag("no_comment") {
        None
    } else {
        let raw = matches
            .get_one::<String>("comment")
            .map(String::as_str)
            .unwrap_or("#");
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => bail!("invalid comment character '{raw}'"),
        }
    };
    options = options.with_comment(comment);

    let skip_rows = matches.get_one::<usize>("skip_rows").copied().unwrap_or(0);
    Ok(options.with_skip_rows(skip_rows))
}

fn run(matches: &ArgMatches) -> Result<()> {
    let options = load_options(matches)?;
    let max_rows = matches.get_one::<usize>("max_rows").copied().unwrap_or(20);
    let format = match matches.get_one::<String>("output").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let Some(path) = matches.get_one::<PathBuf>("file") else {
        bail!("no file given");
    };

    let mut viewer = ViewerApp::new(options, max_rows);
    viewer.open(path)?;

    if let Some(text) = viewer.render(format)? {
        println!("{text}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let matches = cli().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
