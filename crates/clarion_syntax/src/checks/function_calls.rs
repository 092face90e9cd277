//! Opt-in: bare identifiers that look like calls missing their parentheses.

use std::sync::LazyLock;

use clarion_core::lang::{keywords, types};
use regex::Regex;

use super::{Check, ScanContext};
use crate::diagnostics::Diagnostic;

static WORD_THEN_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([a-zA-Z][a-zA-Z0-9_-]*)\s+").expect("INVARIANT: word-then-space pattern is valid")
});

/// Warns about a word followed by whitespace and a non-`(` argument inside a parenthesised, non-`define` line,
/// unless the word is a keyword or a type name.
///
/// Disabled by default: ordinary argument lists trip it constantly.
pub struct FunctionCallCheck;

impl Check for FunctionCallCheck {
    fn name(&self) -> &'static str {
        "function-calls"
    }

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>) {
        for (index, line, scan) in cx.iter() {
            let trimmed = line.trim();
            if !trimmed.starts_with('(') || trimmed.starts_with("(define-") {
                continue;
            }
            for caps in WORD_THEN_SPACE.captures_iter(line) {
                let (Some(whole), Some(word)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if line[whole.end()..].starts_with('(') || !scan.is_code(word.start()) {
                    continue;
                }
                let word_text = word.as_str();
                if keywords::is_valid(word_text) || types::is_type_name(word_text) {
                    continue;
                }
                out.push(Diagnostic::warning(
                    cx.range(index, word.start(), word.end()),
                    format!("Invalid function call: '{word_text}'. Function calls must be enclosed in parentheses."),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::source::SourceDocument;

    fn run(text: &str) -> Vec<Diagnostic> {
        let doc = SourceDocument::new("t.clar", text);
        let mut out = Vec::new();
        FunctionCallCheck.check(&ScanContext::new(&doc), &mut out);
        out
    }

    #[test]
    fn test_flags_bare_words() {
        let diags = run("(transfer amount sender)");
        let words: Vec<_> = diags.iter().map(|d| d.message.clone()).collect();
        assert_eq!(diags.len(), 2, "{words:?}");
        assert!(diags.iter().all(|d| d.severity == Severity::Warning));
        assert!(words[0].contains("'transfer'"));
        assert!(words[1].contains("'amount'"));
    }

    #[test]
    fn test_keywords_types_and_nested_calls_pass() {
        assert!(run("(if (ok u1) (err u2))").is_empty());
        assert!(run("(define-public (f (x uint)) (ok x))").is_empty());
    }
}
