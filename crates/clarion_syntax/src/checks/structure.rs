//! Structural heuristics: definitions missing their `define-*` wrapper and bindings missing `let`.

use std::sync::LazyLock;

use regex::Regex;

use super::calls::{CallClassifier, HeuristicCallClassifier};
use super::{Check, ScanContext};
use crate::diagnostics::Diagnostic;

pub const MISSING_DEFINE: &str = "Missing function definition keyword. Add 'define-public', 'define-private', or \
                                  'define-read-only' before function name.";
pub const MISSING_LET: &str = "Missing 'let' keyword. Use 'let' to bind variables.";

static FUNCTION_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(([a-zA-Z][a-zA-Z0-9_-]*)\s*\(").expect("INVARIANT: function head pattern is valid")
});

static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("INVARIANT: paren group pattern is valid"));

static BINDING_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\([a-zA-Z][a-zA-Z0-9_-]*\s+").expect("INVARIANT: binding pattern is valid"));

/// Flags `(name (param type) ...)` lines that look like definitions without `define-*`, and `((name value) ...)`
/// lines that look like `let` bindings without `let`.
///
/// Trailing comments are ignored, and diagnostics start at the first non-blank column.
pub struct MissingKeywordCheck<C = HeuristicCallClassifier> {
    classifier: C,
}

impl Default for MissingKeywordCheck {
    fn default() -> Self {
        Self::new(HeuristicCallClassifier)
    }
}

impl<C: CallClassifier> MissingKeywordCheck<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }
}

impl<C: CallClassifier> Check for MissingKeywordCheck<C> {
    fn name(&self) -> &'static str {
        "missing-keywords"
    }

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>) {
        for (index, line, scan) in cx.iter() {
            let code = &line[..scan.comment_start().unwrap_or(line.len())];
            let indent = code.len() - code.trim_start().len();
            let trimmed = code.trim();
            if !trimmed.starts_with('(') || trimmed.starts_with("(define-") || trimmed.starts_with("(;") {
                continue;
            }

            if let Some(caps) = FUNCTION_HEAD.captures(trimmed) {
                let name = &caps[1];
                let looks_like_definition = PAREN_GROUP.is_match(trimmed)
                    && !trimmed.contains("define-")
                    && !self.classifier.is_call(trimmed);
                if looks_like_definition {
                    out.push(Diagnostic::error(
                        cx.range(index, indent, indent + 1 + name.len()),
                        MISSING_DEFINE,
                    ));
                }
            }

            if !trimmed.starts_with("(let") && BINDING_HEAD.is_match(trimmed) {
                out.push(Diagnostic::error(cx.range(index, indent, indent + 1), MISSING_LET));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Range;
    use crate::source::SourceDocument;

    fn run(text: &str) -> Vec<Diagnostic> {
        let doc = SourceDocument::new("t.clar", text);
        let mut out = Vec::new();
        MissingKeywordCheck::new(HeuristicCallClassifier).check(&ScanContext::new(&doc), &mut out);
        out
    }

    #[test]
    fn test_definition_without_define() {
        let diags = run("(foo (a uint) (b uint))");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, MISSING_DEFINE);
        assert_eq!(diags[0].range, Range::on_line(0, 0, 4));
    }

    #[test]
    fn test_call_is_not_flagged() {
        assert!(run("(foo u1 u2)").is_empty());
        assert!(run("(begin (print u1))").is_empty());
    }

    #[test]
    fn test_anchor_follows_indent() {
        let diags = run("    (transfer (to principal) (amount uint)) ;; oops");
        assert_eq!(diags[0].range, Range::on_line(0, 4, 13));
    }

    #[test]
    fn test_missing_let() {
        let diags = run("  ((total u0) (count u1))");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, MISSING_LET);
        assert_eq!(diags[0].range, Range::on_line(0, 2, 3));
        assert!(run("(let ((total u0)) total)").is_empty());
    }

    #[test]
    fn test_comments_and_defines_skipped() {
        assert!(run(";; (foo (a uint) (b uint))").is_empty());
        assert!(run("(define-public (foo (a uint) (b uint)) (ok a))").is_empty());
    }

    struct NeverCall;

    impl CallClassifier for NeverCall {
        fn is_call(&self, _line: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_classifier_is_pluggable() {
        let doc = SourceDocument::new("t.clar", "(begin (print u1))");
        let mut out = Vec::new();
        MissingKeywordCheck::new(NeverCall).check(&ScanContext::new(&doc), &mut out);
        assert_eq!(out.len(), 1);
    }
}
