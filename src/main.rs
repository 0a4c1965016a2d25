use std::path::PathBuf;

use anyhow::{bail, Context};
use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser as ClapParser;
use clap::ValueEnum;
use confique::Config as _;
use serde::Serialize;
use tracing::*;

use strictjson::{parse_with_options, ParseError, ParseOptions};

mod config;
mod logging;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to a JSON document to check.
    input: PathBuf,

    /// How to print the outcome.
    #[arg(long, value_enum, default_value_t = Format::Human)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// A compiler-style report with the offending span underlined.
    Human,
    /// One JSON object per check, for consumption by other tooling.
    Json,
}

#[derive(Debug, Serialize)]
struct Diagnostic<'a> {
    path: &'a str,
    kind: &'static str,
    message: &'static str,
    lo: usize,
    hi: usize,
}

type DiagnosticReport<'a> = Report<'a, (&'a String, std::ops::Range<usize>)>;

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(input = ?cli.input);

    let config = config::Config::builder()
        .env()
        .file("strictjson.toml")
        .load()
        .context("trying to load configuration")?;

    let json_string = match std::fs::read_to_string(&cli.input) {
        Ok(file) => file,
        Err(e) => {
            error!(path = ?cli.input, "failed to read input");
            return Err(e)
                .with_context(|| format!("failed to read file `{}`", cli.input.display()));
        }
    };

    let path = cli.input.display().to_string();

    let options = ParseOptions {
        max_nesting_depth: config.max_nesting_depth,
    };

    match parse_with_options(&json_string, options) {
        Ok(value) => {
            debug!(kind = value.kind_desc(), "document is valid");
            match cli.format {
                Format::Human => println!("{path}: ok ({})", value.kind_desc()),
                Format::Json => println!(
                    "{}",
                    serde_json::json!({ "path": path, "ok": true, "kind": value.kind_desc() })
                ),
            }
            Ok(())
        }
        Err(e) => {
            debug!(kind = e.kind().name(), span = ?e.span(), "document is invalid");
            match cli.format {
                Format::Human => {
                    let report: DiagnosticReport<'_> =
                        Report::build(ReportKind::Error, &path, e.span().lo)
                            .with_message(e.to_string())
                            .with_label(
                                Label::new((&path, e.span().range()))
                                    .with_message(e.kind().desc())
                                    .with_color(Color::Red),
                            )
                            .finish();
                    report.print((&path, Source::from(&json_string)))?;
                }
                Format::Json => {
                    let diagnostic = diagnostic(&path, e);
                    println!("{}", serde_json::to_string(&diagnostic)?);
                }
            }
            bail!("failed to parse `{path}`");
        }
    }
}

fn diagnostic(path: &str, e: ParseError) -> Diagnostic<'_> {
    Diagnostic {
        path,
        kind: e.kind().name(),
        message: e.kind().desc(),
        lo: e.span().lo,
        hi: e.span().hi,
    }
}
