//! Call-vs-definition classification for parenthesised lines.
//!
//! ## Notes
//! - [`HeuristicCallClassifier`] is regex-driven and approximate. Its last rule treats any line without a
//!   type-looking argument as a call, which trades recall for fewer false positives.
//! - The trait is the seam for a real tokenizer-based classifier; [`super::structure::MissingKeywordCheck`] is
//!   generic over it.

use std::sync::LazyLock;

use regex::Regex;

/// Decides whether a trimmed, parenthesised line is a function call rather than a definition.
pub trait CallClassifier: Send + Sync {
    fn is_call(&self, line: &str) -> bool;
}

static CALL_SHAPES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // one bare argument
        r"^\([a-zA-Z][a-zA-Z0-9_-]*\s+[^()]*\)$",
        // two bare arguments
        r"^\([a-zA-Z][a-zA-Z0-9_-]*\s+[^()]*\s+[^()]*\)$",
        // no argument
        r"^\([a-zA-Z][a-zA-Z0-9_-]*\s*\)$",
    ]
    .map(|p| Regex::new(p).expect("INVARIANT: call shape pattern is valid"))
});

static LITERAL_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\([a-zA-Z][a-zA-Z0-9_-]*\s+(ok|err|true|false|u\d+|i\d+|"[^"]*"|\([^)]*\))\)$"#)
        .expect("INVARIANT: literal argument pattern is valid")
});

static TYPED_PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    let types = clarion_core::lang::types::TYPES
        .iter()
        .map(|t| regex::escape(t.canonical))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\([a-zA-Z][a-zA-Z0-9_-]*\s+({types})"))
        .expect("INVARIANT: typed parameter pattern is valid")
});

/// Default classifier: call shapes, a single literal argument, or no `(name <type>` group.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicCallClassifier;

impl CallClassifier for HeuristicCallClassifier {
    fn is_call(&self, line: &str) -> bool {
        let line = line.trim();
        CALL_SHAPES.iter().any(|re| re.is_match(line))
            || LITERAL_ARGUMENT.is_match(line)
            || !TYPED_PARAMETER.is_match(line)
    }
}
