//! The scan pipeline: run every enabled check, union the results, dedup and cap.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::checks::calls::{CallClassifier, HeuristicCallClassifier};
use crate::checks::defines::DefineCheck;
use crate::checks::function_calls::FunctionCallCheck;
use crate::checks::keywords::KeywordCheck;
use crate::checks::numbers::NumberCheck;
use crate::checks::operators::OperatorCheck;
use crate::checks::parens::ParenCheck;
use crate::checks::strings::StringCheck;
use crate::checks::structure::MissingKeywordCheck;
use crate::checks::type_annotations::TypeAnnotationCheck;
use crate::checks::{Check, ScanContext};
use crate::diagnostics::Diagnostic;
use crate::source::SourceDocument;

pub const DEFAULT_MAX_DIAGNOSTICS: usize = 200;

// ============================================================================
// Configuration
// ============================================================================

/// Which checks run and how many diagnostics a scan may return.
///
/// ## Notes
/// - Every field has a default, so a partial JSON object (or `{}`) deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanConfig {
    /// Warn about bare identifiers that look like calls missing parentheses.
    pub function_calls: bool,
    /// Warn about unknown hyphenated types after `:`.
    pub type_annotations: bool,
    /// Flag standalone operator atoms that are not on the allow-list.
    pub strict_operators: bool,
    pub max_diagnostics: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            function_calls: false,
            type_annotations: false,
            strict_operators: false,
            max_diagnostics: DEFAULT_MAX_DIAGNOSTICS,
        }
    }
}

impl ScanConfig {
    pub fn with_function_calls(mut self, enabled: bool) -> Self {
        self.function_calls = enabled;
        self
    }

    pub fn with_type_annotations(mut self, enabled: bool) -> Self {
        self.type_annotations = enabled;
        self
    }

    pub fn with_strict_operators(mut self, enabled: bool) -> Self {
        self.strict_operators = enabled;
        self
    }

    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = max;
        self
    }

    /// Enable every optional check.
    pub fn all_checks(self) -> Self {
        self.with_function_calls(true)
            .with_type_annotations(true)
            .with_strict_operators(true)
    }
}

// ============================================================================
// Scanner
// ============================================================================

/// A configured check pipeline.
///
/// Checks run in a fixed order: parentheses, keywords, missing keywords, numbers, strings, function calls
/// (opt-in), defines, operators, type annotations (opt-in).
pub struct Scanner {
    checks: Vec<Box<dyn Check>>,
    max_diagnostics: usize,
}

impl Scanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self::with_classifier(config, HeuristicCallClassifier)
    }

    /// Build a pipeline whose missing-keyword check uses `classifier` to recognise calls.
    pub fn with_classifier(config: &ScanConfig, classifier: impl CallClassifier + 'static) -> Self {
        let mut checks: Vec<Box<dyn Check>> = vec![
            Box::new(ParenCheck),
            Box::new(KeywordCheck),
            Box::new(MissingKeywordCheck::new(classifier)),
            Box::new(NumberCheck),
            Box::new(StringCheck),
        ];
        if config.function_calls {
            checks.push(Box::new(FunctionCallCheck));
        }
        checks.push(Box::new(DefineCheck));
        checks.push(Box::new(OperatorCheck {
            strict: config.strict_operators,
        }));
        if config.type_annotations {
            checks.push(Box::new(TypeAnnotationCheck));
        }
        Self {
            checks,
            max_diagnostics: config.max_diagnostics,
        }
    }

    /// Names of the checks in run order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Scan one document version.
    ///
    /// The result is deterministic for a given text and configuration. Exact duplicates (same range, severity and
    /// message) are dropped, keeping the first, and the list is capped at `max_diagnostics`.
    #[tracing::instrument(skip_all, fields(doc = doc.id(), lines = doc.line_count()))]
    pub fn scan(&self, doc: &SourceDocument) -> Vec<Diagnostic> {
        let cx = ScanContext::new(doc);
        let mut all = Vec::new();
        for check in &self.checks {
            let before = all.len();
            check.check(&cx, &mut all);
            tracing::trace!(check = check.name(), found = all.len() - before);
        }

        let mut seen = HashSet::new();
        all.retain(|d: &Diagnostic| seen.insert((d.range, d.severity, d.message.clone())));
        if all.len() > self.max_diagnostics {
            tracing::debug!(total = all.len(), max = self.max_diagnostics, "truncating diagnostics");
            all.truncate(self.max_diagnostics);
        }
        tracing::debug!(found = all.len(), "scan complete");
        all
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}

/// Scan `doc` with a pipeline built from `config`.
pub fn scan(doc: &SourceDocument, config: &ScanConfig) -> Vec<Diagnostic> {
    Scanner::new(config).scan(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    const CONTRACT: &str = r#";; counter
(define-data-var counter uint u0)

(define-public (increment (step uint))
  (begin
    (var-set counter (+ (var-get counter) step))
    (ok (var-get counter))))

(define-read-only (get-counter)
  (ok (var-get counter)))
"#;

    #[test]
    fn test_clean_contract_has_no_diagnostics() {
        let doc = SourceDocument::new("counter.clar", CONTRACT);
        assert_eq!(Scanner::default().scan(&doc), Vec::new());
    }

    #[test]
    fn test_default_pipeline_order() {
        assert_eq!(
            Scanner::default().check_names(),
            vec!["parens", "keywords", "missing-keywords", "numbers", "strings", "defines", "operators"]
        );
        assert_eq!(
            Scanner::new(&ScanConfig::default().all_checks()).check_names(),
            vec![
                "parens",
                "keywords",
                "missing-keywords",
                "numbers",
                "strings",
                "function-calls",
                "defines",
                "operators",
                "type-annotations"
            ]
        );
    }

    #[test]
    fn test_checks_do_not_short_circuit() {
        let doc = SourceDocument::new("bad.clar", "(define-pubic (f) (ok u-1)\n(print \"open");
        let diags = Scanner::default().scan(&doc);
        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(diags.len(), 4, "{messages:#?}");
        assert!(messages[0].starts_with("Unmatched parentheses: 4 opening, 2 closing"));
        assert!(messages[1].starts_with("Invalid keyword: 'define-pubic'"));
        assert!(messages[2].starts_with("Invalid uint: 'u-1'"));
        assert!(messages[3].starts_with("Unterminated string literal"));
        assert!(diags.iter().all(|d| d.severity == Severity::Error));
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let doc = SourceDocument::new("dup.clar", "(define-x)");
        let mut scanner = Scanner::default();
        // Run the keyword check twice; the second copy adds only duplicates.
        scanner.checks.push(Box::new(KeywordCheck));
        assert_eq!(scanner.scan(&doc).len(), 1);
    }

    #[test]
    fn test_truncation() {
        let text = "(define-x)\n".repeat(10);
        let doc = SourceDocument::new("many.clar", text);
        let config = ScanConfig::default().with_max_diagnostics(3);
        assert_eq!(scan(&doc, &config).len(), 3);
    }

    #[test]
    fn test_config_deserializes_partial_object() {
        let config: ScanConfig = serde_json::from_str(r#"{"strictOperators": true}"#).unwrap();
        assert!(config.strict_operators);
        assert_eq!(config.max_diagnostics, DEFAULT_MAX_DIAGNOSTICS);
    }
}
