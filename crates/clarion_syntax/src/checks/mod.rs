//! Independent checks run by the scanner.
//!
//! Every check reads the same [`ScanContext`] (the document plus one [`LineScan`] per line) and appends to the
//! output list. Checks share no mutable state; [`crate::Scanner`] decides which ones run and in which order.
//!
//! ## Module Structure
//!
//! - `parens` - unmatched parentheses across the document
//! - `keywords` - misspelled `define-*` keywords
//! - `structure` - definitions missing `define-*` or `let`
//! - `calls` - call-vs-definition classifier used by `structure`
//! - `numbers` - `u`/`i` integer literals
//! - `strings` - unterminated string literals
//! - `defines` - `define-*` forms without a name or body
//! - `operators` - operator runs outside the allow-list
//! - `function_calls`, `type_annotations` - opt-in warnings

pub mod calls;
pub mod defines;
pub mod function_calls;
pub mod keywords;
pub mod numbers;
pub mod operators;
pub mod parens;
pub mod strings;
pub mod structure;
pub mod type_annotations;

use crate::diagnostics::{Diagnostic, Range};
use crate::lexical::{self, LineScan};
use crate::source::{SourceDocument, char_column};

/// One scanning routine producing zero or more diagnostics for a document.
pub trait Check: Send + Sync {
    /// Stable short name, used in logs.
    fn name(&self) -> &'static str;

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>);
}

/// A document snapshot with its per-line lexical segments.
pub struct ScanContext<'a> {
    pub doc: &'a SourceDocument,
    pub lines: Vec<LineScan>,
}

impl<'a> ScanContext<'a> {
    pub fn new(doc: &'a SourceDocument) -> Self {
        let lines = doc.lines().map(lexical::scan_line).collect();
        Self { doc, lines }
    }

    /// Iterate `(index, text, scan)` for every line.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a str, &LineScan)> + '_ {
        self.doc
            .lines()
            .zip(self.lines.iter())
            .enumerate()
            .map(|(i, (text, scan))| (i, text, scan))
    }

    /// Range on line `line` between two byte offsets of that line.
    pub fn range(&self, line: usize, start: usize, end: usize) -> Range {
        let text = self.doc.line(line);
        Range::on_line(line as u32, char_column(text, start), char_column(text, end))
    }
}

/// Characters that end an atom: whitespace, parentheses, braces, tuple punctuation and quotes.
pub(crate) fn is_atom_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '{' | '}' | ',' | '"' | ';')
}

/// Byte spans of the atoms on a line that start inside code.
pub(crate) fn code_atoms<'l>(line: &'l str, scan: &LineScan) -> Vec<(usize, &'l str)> {
    let mut atoms = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in line.char_indices() {
        if is_atom_delimiter(c) {
            if let Some(s) = start.take() {
                atoms.push((s, &line[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        atoms.push((s, &line[s..]));
    }
    atoms.retain(|&(s, _)| scan.is_code(s));
    atoms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_atoms_skip_strings_and_comments() {
        let line = "(map-set m {a: u1, b: \"u-2\"}) ;; u-3";
        let scan = lexical::scan_line(line);
        let atoms: Vec<_> = code_atoms(line, &scan).into_iter().map(|(_, a)| a).collect();
        assert_eq!(atoms, vec!["map-set", "m", "a:", "u1", "b:"]);
    }
}
