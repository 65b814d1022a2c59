//! Subcommand implementations.

use std::fs;

use anyhow::{Context, Result, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use tracing::debug;

use sici_core::{Mode, Sici};
use sici_model::ProblemReport;

use crate::cli::{CheckArgs, ParseArgs};

/// Outcome of parsing one identifier.
#[derive(Debug, Serialize)]
pub struct ParseRow {
    pub input: String,
    pub valid: bool,
    pub round_trip: bool,
    /// Canonical serialization; absent when strict mode refused the
    /// input before tokenization.
    pub canonical: Option<String>,
    /// Strict-mode failure message, if any.
    pub error: Option<String>,
    pub problems: ProblemReport,
}

/// All rows of one `sici parse` invocation.
#[derive(Debug, Serialize)]
pub struct ParseReport {
    pub rows: Vec<ParseRow>,
}

impl ParseReport {
    /// True when any identifier was invalid or rejected.
    pub fn has_failures(&self) -> bool {
        self.rows.iter().any(|row| !row.valid)
    }
}

pub fn run_parse(args: &ParseArgs) -> Result<ParseReport> {
    let inputs = collect_inputs(args)?;
    let mode = Mode::from(args.mode);
    let rows = inputs
        .into_iter()
        .map(|input| parse_one(&input, mode))
        .collect();
    Ok(ParseReport { rows })
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    for prefix in &args.prefixes {
        let check = sici_checksum::check_char(prefix);
        println!("{prefix}-{check}");
    }
    Ok(())
}

fn collect_inputs(args: &ParseArgs) -> Result<Vec<String>> {
    let mut inputs = args.identifiers.clone();
    if let Some(path) = &args.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read identifiers from {}", path.display()))?;
        inputs.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    if inputs.is_empty() {
        bail!("no identifiers given (pass them as arguments or via --file)");
    }
    Ok(inputs)
}

fn parse_one(input: &str, mode: Mode) -> ParseRow {
    let mut sici = Sici::new(mode);
    match sici.parse(input) {
        Ok(outcome) => {
            debug!(input, valid = outcome.valid, "parsed");
            ParseRow {
                input: input.to_string(),
                valid: outcome.valid,
                round_trip: outcome.round_trip,
                canonical: Some(sici.to_string()),
                error: None,
                problems: sici.problems(),
            }
        }
        Err(error) => {
            debug!(input, %error, "rejected");
            ParseRow {
                input: input.to_string(),
                valid: false,
                round_trip: false,
                canonical: None,
                error: Some(error.to_string()),
                problems: sici.problems(),
            }
        }
    }
}

pub fn print_parse_report(report: &ParseReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(rendered) => println!("{rendered}"),
            Err(error) => eprintln!("error: failed to serialize report: {error}"),
        }
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Identifier", "Valid", "Round-trip", "Canonical form"]);
    apply_table_style(&mut table);
    for row in &report.rows {
        table.add_row(vec![
            Cell::new(&row.input),
            yes_no_cell(row.valid),
            yes_no_cell(row.round_trip),
            Cell::new(row.canonical.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");

    let mut details = Table::new();
    details.set_header(vec!["Identifier", "Segment", "Attribute", "Problem"]);
    apply_table_style(&mut details);
    let mut has_details = false;
    for row in &report.rows {
        if let Some(error) = &row.error {
            details.add_row(vec![row.input.as_str(), "-", "-", error.as_str()]);
            has_details = true;
        }
        for (segment, attribute, messages) in row.problems.entries() {
            for message in messages {
                details.add_row(vec![row.input.as_str(), segment, attribute, message.as_str()]);
                has_details = true;
            }
        }
    }
    if has_details {
        println!("{details}");
    }
}

fn yes_no_cell(value: bool) -> Cell {
    Cell::new(if value { "yes" } else { "no" }).set_alignment(CellAlignment::Center)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
