//! Misspelled `define-*` keywords.

use std::sync::LazyLock;

use clarion_core::lang::keywords;
use regex::Regex;

use super::{Check, ScanContext};
use crate::diagnostics::Diagnostic;

pub(crate) static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z][a-zA-Z0-9_-]*\b").expect("INVARIANT: word pattern is valid"));

/// Flags every word starting with `define-` that is not on the keyword allow-list.
///
/// Only this prefix is checked, so ordinary identifiers never trigger it.
pub struct KeywordCheck;

impl Check for KeywordCheck {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>) {
        for (index, line, scan) in cx.iter() {
            for m in WORD.find_iter(line) {
                let word = m.as_str();
                if !word.starts_with("define-") || keywords::is_valid(word) || !scan.is_code(m.start()) {
                    continue;
                }
                out.push(Diagnostic::error(
                    cx.range(index, m.start(), m.end()),
                    format!("Invalid keyword: '{word}'. Did you mean one of: {}?", suggestions()),
                ));
            }
        }
    }
}

fn suggestions() -> String {
    keywords::define_keywords().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Range;
    use crate::source::SourceDocument;

    fn run(text: &str) -> Vec<Diagnostic> {
        let doc = SourceDocument::new("t.clar", text);
        let mut out = Vec::new();
        KeywordCheck.check(&ScanContext::new(&doc), &mut out);
        out
    }

    #[test]
    fn test_misspelled_define() {
        let diags = run("(define-pubic (foo (a uint)) (ok true))");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.starts_with("Invalid keyword: 'define-pubic'. Did you mean one of: define-public, "));
        assert!(diags[0].message.ends_with("define-data-var, define-map?"));
        assert_eq!(diags[0].range, Range::on_line(0, 1, 13));
    }

    #[test]
    fn test_valid_defines_and_plain_words() {
        assert!(run("(define-read-only (get-count) (ok (var-get counter)))").is_empty());
    }

    #[test]
    fn test_ignores_strings_and_comments() {
        assert!(run("(print \"define-oops\") ;; define-later").is_empty());
    }

    #[test]
    fn test_each_occurrence_gets_its_own_range() {
        let diags = run("(define-x) (define-x)");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[1].range, Range::on_line(0, 12, 20));
    }
}
