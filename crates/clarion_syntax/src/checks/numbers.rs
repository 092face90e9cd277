//! `u`/`i`-prefixed integer literals.

use super::{Check, ScanContext, code_atoms};
use crate::diagnostics::Diagnostic;

/// Validate one literal token such as `u100` or `i-5`.
///
/// Tokens without a `u`/`i` prefix, and the bare prefixes themselves, are accepted. The digits after `u` must fit
/// a `u128` and the digits after `i` an `i128`, as Clarity's integer types do.
///
/// ## Examples
/// ```rust
/// use clarion_syntax::checks::numbers::validate_integer_literal;
///
/// assert!(validate_integer_literal("u5").is_ok());
/// assert!(validate_integer_literal("i-5").is_ok());
/// assert!(validate_integer_literal("u-5").is_err());
/// assert!(validate_integer_literal("ixyz").is_err());
/// ```
pub fn validate_integer_literal(token: &str) -> Result<(), String> {
    if let Some(digits) = token.strip_prefix('u').filter(|d| !d.is_empty()) {
        if digits.parse::<u128>().is_err() {
            return Err(format!("Invalid uint: '{token}'. Uints must be non-negative integers."));
        }
    } else if let Some(digits) = token.strip_prefix('i').filter(|d| !d.is_empty()) {
        if digits.parse::<i128>().is_err() {
            return Err(format!("Invalid int: '{token}'. Ints must be valid integers."));
        }
    }
    Ok(())
}

/// Whether an atom is meant as a numeric literal: the prefix is followed by a digit, or by a sign and a digit.
///
/// Identifiers such as `if`, `uint` or `item` are never candidates. Neither is `ixyz`: inside a document a prefix
/// with no digit reads as an identifier, even though [`validate_integer_literal`] rejects it as a lone token.
fn is_candidate(atom: &str) -> bool {
    let mut chars = atom.chars();
    if !matches!(chars.next(), Some('u' | 'i')) {
        return false;
    }
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-' | '+') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

pub struct NumberCheck;

impl Check for NumberCheck {
    fn name(&self) -> &'static str {
        "numbers"
    }

    fn check(&self, cx: &ScanContext<'_>, out: &mut Vec<Diagnostic>) {
        for (index, line, scan) in cx.iter() {
            for (start, atom) in code_atoms(line, scan) {
                if !is_candidate(atom) {
                    continue;
                }
                if let Err(message) = validate_integer_literal(atom) {
                    out.push(Diagnostic::error(cx.range(index, start, start + atom.len()), message));
                }
            }
        }
    }
}
