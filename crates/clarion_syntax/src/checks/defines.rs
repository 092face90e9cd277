//! `define-*` forms without a name or body.

use std::sync::LazyLock;

use clarion_core::lang::defines;
use regex::Regex;

use super::{Check, ScanContext};
use crate::diagnostics::Diagnostic;

static DEFINE_FORM: LazyLock<Regex> = LazyLock::new(|| {
    let kinds = defines::suffixes().map(regex::escape).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"\(define-({kinds})\b([^)]*)\)")).expect("INVARIANT: define form pattern is valid")
});

/// Flags `(define-<kind>)` and `(define-<kind>   )` on a single line.
pub struct DefineCheck;

impl Check for DefineCheck {
    fn name(&self) -> &'static str {
        "defines"
    }

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>) {
        for (index, line, scan) in cx.iter() {
            for caps in DEFINE_FORM.captures_iter(line) {
                let Some(whole) = caps.get(0) else { continue };
                if !scan.is_code(whole.start()) || !caps[2].trim().is_empty() {
                    continue;
                }
                out.push(Diagnostic::error(
                    cx.range(index, whole.start(), whole.end()),
                    format!("Invalid {} definition. Missing name and body.", &caps[1]),
                ));
            }
        }
    }
}
