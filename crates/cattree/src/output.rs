//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.

use crate::domain::CatId;
use crate::inbreeding::{InbreedingReport, Outcome, UndefinedReason};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print an inbreeding report in the specified format
pub fn print_report(report: &InbreedingReport, explain: bool, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_report_text(&mut handle, report, explain),
        OutputMode::Json => print_json_to(&mut handle, report),
    }
}

/// Print a relationship coefficient in the specified format
pub fn print_relationship(a: &CatId, b: &CatId, value: f64, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => writeln!(
            handle,
            "{} ~ {}: {}",
            a.to_string().cyan(),
            b.to_string().cyan(),
            format_coefficient(value).bold()
        ),
        OutputMode::Json => print_json_to(
            &mut handle,
            &serde_json::json!({ "a": a, "b": b, "relationship": value }),
        ),
    }
}

/// Ancestor listing entry for JSON output
#[derive(Debug, Serialize)]
struct AncestorEntry<'a> {
    cat: &'a CatId,
    generation: usize,
}

/// Print ancestors grouped by generation in the specified format
pub fn print_ancestors(subject: &CatId, ancestors: &[(CatId, usize)], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_ancestors_text(&mut handle, subject, ancestors),
        OutputMode::Json => {
            let entries: Vec<AncestorEntry<'_>> = ancestors
                .iter()
                .map(|(cat, generation)| AncestorEntry {
                    cat,
                    generation: *generation,
                })
                .collect();
            print_json_to(&mut handle, &entries)
        }
    }
}

fn print_json_to<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{}", json)
}

// ============================================================================
// Text Formatting
// ============================================================================

fn format_coefficient(value: f64) -> String {
    format!("{value:.6}")
}

fn format_path(path: &[CatId]) -> String {
    path.iter()
        .map(CatId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn describe_reason(reason: &UndefinedReason) -> String {
    match reason {
        UndefinedReason::UnknownSubject => "cat is not in the pedigree".to_string(),
        UndefinedReason::MissingMother => "no recorded mother".to_string(),
        UndefinedReason::MissingFather => "no recorded father".to_string(),
        UndefinedReason::UnresolvedParent(parent) => {
            format!("parent {parent} is not in the pedigree")
        }
    }
}

fn print_report_text<W: Write>(w: &mut W, report: &InbreedingReport, explain: bool) -> io::Result<()> {
    match &report.outcome {
        Outcome::Computed => writeln!(
            w,
            "{}: {}",
            report.subject.to_string().cyan(),
            format_coefficient(report.coefficient).bold()
        )?,
        Outcome::Undefined(reason) => writeln!(
            w,
            "{}: {} ({})",
            report.subject.to_string().cyan(),
            "undefined".yellow(),
            describe_reason(reason)
        )?,
    }

    if !explain {
        return Ok(());
    }

    if let (Some(mother), Some(father)) = (&report.mother, &report.father) {
        writeln!(w, "  {} {}  {} {}", "mother:".dimmed(), mother, "father:".dimmed(), father)?;
    }

    if !report.common_ancestors.is_empty() {
        writeln!(
            w,
            "  {} {}",
            "common ancestors:".dimmed(),
            report
                .common_ancestors
                .iter()
                .map(CatId::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )?;
    }

    for contribution in &report.contributions {
        let (n1, n2) = contribution.generations;
        writeln!(
            w,
            "  {} {}: [{}] + [{}] = 0.5^{} = {}",
            "via".dimmed(),
            contribution.ancestor.to_string().cyan(),
            format_path(&contribution.mother_path),
            format_path(&contribution.father_path),
            n1 + n2 + 1,
            format_coefficient(contribution.value)
        )?;
    }

    for skipped in &report.skipped {
        writeln!(
            w,
            "  {} {}: {}",
            "skipped".yellow(),
            skipped.ancestor,
            skipped.reason
        )?;
    }

    for dangling in &report.dangling {
        writeln!(w, "  {} {}", "unresolved:".red(), dangling)?;
    }

    Ok(())
}

fn print_ancestors_text<W: Write>(w: &mut W, subject: &CatId, ancestors: &[(CatId, usize)]) -> io::Result<()> {
    writeln!(w, "{}", subject.to_string().cyan().bold())?;

    if ancestors.is_empty() {
        writeln!(w, "  {}", "no recorded ancestors".dimmed())?;
        return Ok(());
    }

    let mut current = 0;
    for (cat, generation) in ancestors {
        if *generation != current {
            current = *generation;
            writeln!(w, "  {}", format!("generation {current}").bold())?;
        }
        writeln!(w, "    {}", cat)?;
    }

    Ok(())
}
