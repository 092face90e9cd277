//! Rendering scan results for the terminal.
//!
//! - `human`: miette graphical reports with the offending source line.
//! - `plain`: one `path:line:col: severity: message` line per diagnostic (1-based line and column).
//! - `json`: an array of `{ "path", "diagnostics" }` objects.

use std::fmt::Write as _;

use clarion_syntax::{Diagnostic, Severity, SourceDocument};
use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, MietteDiagnostic, NamedSource, Report};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Plain,
    Json,
}

/// Diagnostics of one scanned file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip)]
    pub document: SourceDocument,
}

impl FileReport {
    pub fn errors(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warnings(&self) -> usize {
        self.diagnostics.len() - self.errors()
    }
}

pub fn render_plain(report: &FileReport) -> String {
    let mut out = String::new();
    for d in &report.diagnostics {
        let _ = writeln!(
            out,
            "{}:{}:{}: {}: {}",
            report.path,
            d.range.start.line + 1,
            d.range.start.character + 1,
            d.severity,
            d.message
        );
    }
    out
}

pub fn render_json(reports: &[FileReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

/// Graphical rendering; `color` selects the themed or the plain-text style.
pub fn render_human(report: &FileReport, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);

    let mut out = String::new();
    for d in &report.diagnostics {
        let rendered = to_report(&report.path, &report.document, d);
        if handler.render_report(&mut out, &*rendered).is_err() {
            // Fall back to the one-line form rather than dropping the diagnostic.
            let _ = writeln!(out, "{}: {}: {}", report.path, d.severity, d.message);
        }
    }
    out
}

fn to_report(path: &str, doc: &SourceDocument, d: &Diagnostic) -> Report {
    let start = doc.offset_of(d.range.start).unwrap_or(0);
    let end = doc.offset_of(d.range.end).unwrap_or(start).max(start);
    let severity = match d.severity {
        Severity::Error => miette::Severity::Error,
        Severity::Warning => miette::Severity::Warning,
    };
    let label = match d.severity {
        Severity::Error => "here",
        Severity::Warning => "suspicious",
    };
    let diagnostic = MietteDiagnostic::new(d.message.clone())
        .with_severity(severity)
        .with_code(d.source)
        .with_label(LabeledSpan::at(start..end, label));
    Report::new(diagnostic).with_source_code(NamedSource::new(path, doc.text().to_string()))
}

/// `N error(s), M warning(s) in K file(s)`
pub fn summary(reports: &[FileReport]) -> String {
    let errors: usize = reports.iter().map(FileReport::errors).sum();
    let warnings: usize = reports.iter().map(FileReport::warnings).sum();
    format!("{errors} error(s), {warnings} warning(s) in {} file(s)", reports.len())
}
