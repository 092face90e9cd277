//! Unmatched parentheses across the whole document.

use super::{Check, ScanContext};
use crate::diagnostics::{Diagnostic, Range};
use crate::source::char_column;

/// Counts `(` and `)` outside strings and comments and reports a single diagnostic when the totals differ.
///
/// ## Notes
/// - The diagnostic spans the whole last line; the check does not localize the offending parenthesis.
pub struct ParenCheck;

impl Check for ParenCheck {
    fn name(&self) -> &'static str {
        "parens"
    }

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>) {
        let (open, close) = cx
            .lines
            .iter()
            .fold((0, 0), |(o, c), scan| (o + scan.open_parens, c + scan.close_parens));
        if open == close {
            return;
        }

        let last = cx.doc.line_count().saturating_sub(1);
        let text = cx.doc.line(last);
        out.push(Diagnostic::error(
            Range::on_line(last as u32, 0, char_column(text, text.len())),
            format!("Unmatched parentheses: {open} opening, {close} closing"),
        ));
    }
}
