//! Unterminated string literals.

use super::{Check, ScanContext};
use crate::diagnostics::Diagnostic;
use crate::lexical::SegmentKind;

pub const UNTERMINATED_STRING: &str = "Unterminated string literal. Missing closing quote.";
pub const UNTERMINATED_UNICODE_STRING: &str = "Unterminated unicode string literal. Missing closing quote.";

/// Reports a string still open at the end of its line, from the opening quote (or `u` marker) to the line end.
pub struct StringCheck;

impl Check for StringCheck {
    fn name(&self) -> &'static str {
        "strings"
    }

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>) {
        for (index, _, scan) in cx.iter() {
            let Some(open) = scan.unterminated_string() else {
                continue;
            };
            let message = match open.kind {
                SegmentKind::Str { unicode: true, .. } => UNTERMINATED_UNICODE_STRING,
                _ => UNTERMINATED_STRING,
            };
            out.push(Diagnostic::error(cx.range(index, open.start, open.end), message));
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
        StringCheck.check(&ScanContext::new(&doc), &mut out);
        out
    }

    #[test]
    fn test_unterminated() {
        let diags = run("(print \"unterminated");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, UNTERMINATED_STRING);
        assert_eq!(diags[0].range, Range::on_line(0, 7, 20));
    }

    #[test]
    fn test_complete() {
        assert!(run("(print \"complete\")").is_empty());
    }

    #[test]
    fn test_unicode() {
        let diags = run("(print u\"héllo)");
        assert_eq!(diags[0].message, UNTERMINATED_UNICODE_STRING);
        assert_eq!(diags[0].range, Range::on_line(0, 7, 15));
    }

    #[test]
    fn test_strings_do_not_span_lines() {
        // The open string on line 0 is reported there and does not swallow line 1.
        let diags = run("(print \"open\n(print \"closed\")");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range.start.line, 0);
    }

    #[test]
    fn test_quote_in_comment() {
        assert!(run("(ok u1) ;; don't \"quote").is_empty());
    }
}
