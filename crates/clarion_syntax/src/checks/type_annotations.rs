//! Opt-in: `: <type>` annotations naming an unknown hyphenated type.

use std::sync::LazyLock;

use clarion_core::lang::{keywords, types};
use regex::Regex;

use super::{Check, ScanContext};
use crate::diagnostics::Diagnostic;

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":\s*([a-zA-Z][a-zA-Z0-9_-]*)").expect("INVARIANT: annotation pattern is valid")
});

/// Warns when the word after a `:` contains a hyphen and is neither a type name nor a keyword.
pub struct TypeAnnotationCheck;

impl Check for TypeAnnotationCheck {
    fn name(&self) -> &'static str {
        "type-annotations"
    }

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>) {
        for (index, line, scan) in cx.iter() {
            for caps in ANNOTATION.captures_iter(line) {
                let Some(word) = caps.get(1) else { continue };
                let text = word.as_str();
                if !text.contains('-')
                    || types::is_type_name(text)
                    || keywords::is_valid(text)
                    || !scan.is_code(word.start())
                {
                    continue;
                }
                let valid = types::TYPES.iter().map(|t| t.canonical).collect::<Vec<_>>().join(", ");
                out.push(Diagnostic::warning(
                    cx.range(index, word.start(), word.end()),
                    format!("Invalid type: '{text}'. Valid types are: {valid}"),
                ));
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
        TypeAnnotationCheck.check(&ScanContext::new(&doc), &mut out);
        out
    }

    #[test]
    fn test_unknown_hyphenated_type() {
        let diags = run("{owner:   string-ascci, id: uint}");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range, Range::on_line(0, 10, 22));
        assert!(diags[0].message.starts_with("Invalid type: 'string-ascci'. Valid types are: uint, int, bool"));
    }

    #[test]
    fn test_known_types_and_plain_words() {
        assert!(run("{a: string-utf8, b: tx-sender, c: foo}").is_empty());
    }
}
