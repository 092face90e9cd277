//! Operator runs outside the allow-list.

use std::sync::LazyLock;

use clarion_core::lang::operators;
use regex::Regex;

use super::{Check, ScanContext, code_atoms};
use crate::diagnostics::Diagnostic;

static OPERATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+\-*/%=<>!]+").expect("INVARIANT: operator run pattern is valid"));

/// Checks maximal runs of operator characters.
///
/// ## Notes
/// - In the default mode a run is only flagged when it is not on the allow-list *and* is not made of operator
///   characters. Every match of the run pattern is made of operator characters, so this mode never reports
///   anything. It is kept as the baseline behaviour.
/// - With `strict` set, standalone operator atoms such as `=>` or `+-` are flagged instead; runs glued to other
///   characters (`-5`, `map-set!`) are left alone.
pub struct OperatorCheck {
    pub strict: bool,
}

impl OperatorCheck {
    fn report(cx: &ScanContext<'_>, index: usize, start: usize, op: &str, out: &mut Vec<Diagnostic>) {
        out.push(Diagnostic::error(
            cx.range(index, start, start + op.len()),
            format!(
                "Invalid operator: '{op}'. Valid operators are: {}",
                operators::OPERATORS.join(", ")
            ),
        ));
    }
}

impl Check for OperatorCheck {
    fn name(&self) -> &'static str {
        "operators"
    }

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>) {
        for (index, line, scan) in cx.iter() {
            if self.strict {
                for (start, atom) in code_atoms(line, scan) {
                    if operators::is_operator_run(atom) && !operators::is_valid(atom) {
                        Self::report(cx, index, start, atom, out);
                    }
                }
                continue;
            }

            for m in OPERATOR_RUN.find_iter(line) {
                let op = m.as_str();
                if scan.is_code(m.start()) && !operators::is_valid(op) && !operators::is_operator_run(op) {
                    Self::report(cx, index, m.start(), op, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Range;
    use crate::source::SourceDocument;

    fn run(text: &str, strict: bool) -> Vec<Diagnostic> {
        let doc = SourceDocument::new("t.clar", text);
        let mut out = Vec::new();
        OperatorCheck { strict }.check(&ScanContext::new(&doc), &mut out);
        out
    }

    #[test]
    fn test_default_mode_is_inert() {
        assert!(run("(=> a b) (+- u1 u2) (<<>> x)", false).is_empty());
    }

    #[test]
    fn test_strict_mode_flags_standalone_atoms() {
        let diags = run("(=> a b) (>= u1 u2) (- u1 u2)", true);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range, Range::on_line(0, 1, 3));
        assert!(diags[0].message.starts_with("Invalid operator: '=>'. Valid operators are: +, -, *, /, %, mod"));
    }

    #[test]
    fn test_strict_mode_ignores_glued_runs() {
        assert!(run("(map-set! m i-5 -5) (print \"=>\")", true).is_empty());
    }
}
