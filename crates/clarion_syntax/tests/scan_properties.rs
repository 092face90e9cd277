//! Property-based tests for the scanner.
//!
//! Documents are assembled from fragments whose parenthesis contribution is known up front, so the expected
//! counts never depend on the code under test.

use clarion_syntax::checks::numbers::validate_integer_literal;
use clarion_syntax::{DiagnosticSet, ScanConfig, Scanner, SourceDocument};
use proptest::prelude::*;

/// A line fragment and the `(`/`)` it contributes when it appears in code.
fn fragment_strategy() -> impl Strategy<Value = (&'static str, usize, usize)> {
    prop_oneof![
        Just(("(", 1, 0)),
        Just((")", 0, 1)),
        Just(("(ok u1)", 1, 1)),
        Just((" ", 0, 0)),
        Just(("tx-sender", 0, 0)),
        Just(("\"(()\"", 0, 0)),
        Just(("u\")\"", 0, 0)),
    ]
}

/// A line: code fragments, optionally followed by a comment full of parentheses.
fn line_strategy() -> impl Strategy<Value = (String, usize, usize)> {
    (prop::collection::vec(fragment_strategy(), 0..8), any::<bool>()).prop_map(|(parts, comment)| {
        let mut text = String::new();
        let (mut open, mut close) = (0, 0);
        for (frag, o, c) in parts {
            text.push_str(frag);
            open += o;
            close += c;
        }
        if comment {
            text.push_str(" ;; ((( )");
        }
        (text, open, close)
    })
}

fn document_strategy() -> impl Strategy<Value = (String, usize, usize)> {
    prop::collection::vec(line_strategy(), 1..6).prop_map(|lines| {
        let open = lines.iter().map(|l| l.1).sum();
        let close = lines.iter().map(|l| l.2).sum();
        let text = lines.into_iter().map(|l| l.0).collect::<Vec<_>>().join("\n");
        (text, open, close)
    })
}

fn paren_diagnostics(text: &str) -> Vec<String> {
    let doc = SourceDocument::new("prop.clar", text);
    Scanner::default()
        .scan(&doc)
        .into_iter()
        .map(|d| d.message)
        .filter(|m| m.starts_with("Unmatched parentheses"))
        .collect()
}

proptest! {
    /// Property: balanced documents are never flagged; unbalanced ones get exactly one diagnostic with both counts.
    #[test]
    fn paren_counts_are_reported_exactly((text, open, close) in document_strategy()) {
        let found = paren_diagnostics(&text);
        if open == close {
            prop_assert!(found.is_empty(), "unexpected: {found:?}");
        } else {
            prop_assert_eq!(found, vec![format!("Unmatched parentheses: {open} opening, {close} closing")]);
        }
    }

    /// Property: scanning is deterministic and never panics on arbitrary text.
    #[test]
    fn scan_is_deterministic(text in "\\PC*") {
        let doc = SourceDocument::new("any.clar", text.as_str());
        let scanner = Scanner::new(&ScanConfig::default().all_checks());
        prop_assert_eq!(scanner.scan(&doc), scanner.scan(&doc));
    }

    /// Property: every diagnostic range lies within the lines of the scanned text.
    #[test]
    fn ranges_stay_inside_the_document(text in "[ -~\\n]{0,200}") {
        let doc = SourceDocument::new("any.clar", text.as_str());
        for d in Scanner::new(&ScanConfig::default().all_checks()).scan(&doc) {
            let line = doc.line(d.range.end.line as usize);
            prop_assert!((d.range.end.line as usize) < doc.line_count());
            prop_assert!(d.range.start <= d.range.end);
            prop_assert!(d.range.end.character as usize <= line.chars().count());
        }
    }

    /// Property: a `u` followed by any decimal digits that fit in u128 is valid.
    #[test]
    fn uint_literals_validate(n in any::<u128>()) {
        let valid = validate_integer_literal(&format!("u{n}")).is_ok();
        prop_assert!(valid);
        let negative = validate_integer_literal(&format!("u-{}", n.max(1))).is_err();
        prop_assert!(negative);
    }
}

#[test]
fn clear_then_rescan_reproduces_the_same_set() {
    let doc = SourceDocument::new("a.clar", "(define-pubic (f) (ok u-1)\n(print \"open");
    let scanner = Scanner::default();
    let mut set = DiagnosticSet::new();

    set.replace(doc.id().to_string(), scanner.scan(&doc));
    let first = set.get(&doc.id().to_string()).map(<[_]>::to_vec);
    set.clear();
    set.replace(doc.id().to_string(), scanner.scan(&doc));

    assert_eq!(set.get(&doc.id().to_string()).map(<[_]>::to_vec), first);
}
