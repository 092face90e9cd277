//! Define the allow-listed keyword vocabulary for Clarity.
//!
//! This is the list the invalid-keyword check consults. It is deliberately a flat spelling table rather than a full
//! builtin catalogue: the check only looks at words starting with `define-`, so the remaining entries exist for
//! the opt-in function-call check and for documentation.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Spellings keep their Clarity punctuation (`unwrap!`, `map-get?`).
//!
//! ## Examples
//! ```rust
//! use clarion_core::lang::keywords::{self, KeywordCategory};
//!
//! assert_eq!(keywords::from_str("unwrap!").map(|k| k.category), Some(KeywordCategory::Unwrap));
//! assert!(!keywords::is_valid("define-pubic"));
//! ```

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Definition,
    ControlFlow,
    Literal,
    Boolean,
    Predicate,
    Unwrap,
    Conversion,
    /// Global context values such as `tx-sender`.
    Context,
    /// Data var, map and STX builtins.
    Storage,
    Output,
}

/// Metadata for an allow-listed keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

const fn kw(canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { canonical, category }
}

use KeywordCategory as C;

/// Registry of all allow-listed keywords.
///
/// ## Notes
/// - The ordering is meaningful for [`define_keywords`]: suggestions are listed in table order.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Definitions
    kw("define-public", C::Definition),
    kw("define-private", C::Definition),
    kw("define-read-only", C::Definition),
    kw("define-trait", C::Definition),
    kw("define-fungible-token", C::Definition),
    kw("define-non-fungible-token", C::Definition),
    kw("define-constant", C::Definition),
    kw("define-data-var", C::Definition),
    kw("define-map", C::Definition),
    // Control flow
    kw("if", C::ControlFlow),
    kw("when", C::ControlFlow),
    kw("match", C::ControlFlow),
    kw("let", C::ControlFlow),
    kw("begin", C::ControlFlow),
    // Literals / constructors
    kw("ok", C::Literal),
    kw("err", C::Literal),
    kw("some", C::Literal),
    kw("none", C::Literal),
    kw("true", C::Literal),
    kw("false", C::Literal),
    // Boolean operators
    kw("and", C::Boolean),
    kw("or", C::Boolean),
    kw("not", C::Boolean),
    // Predicates
    kw("is-eq", C::Predicate),
    kw("is-ok", C::Predicate),
    kw("is-err", C::Predicate),
    kw("is-some", C::Predicate),
    kw("is-none", C::Predicate),
    // Unwrapping
    kw("unwrap!", C::Unwrap),
    kw("unwrap-panic", C::Unwrap),
    kw("unwrap-err!", C::Unwrap),
    kw("unwrap-err-panic", C::Unwrap),
    kw("try!", C::Unwrap),
    kw("asserts!", C::Unwrap),
    kw("expects!", C::Unwrap),
    kw("expects-err!", C::Unwrap),
    kw("default-to", C::Unwrap),
    // Conversions / contract context
    kw("as-contract", C::Conversion),
    kw("as-max-len?", C::Conversion),
    kw("to-int", C::Conversion),
    kw("to-uint", C::Conversion),
    kw("contract-caller", C::Context),
    kw("tx-sender", C::Context),
    kw("contract-owner", C::Context),
    kw("block-height", C::Context),
    // Storage and tokens
    kw("stx-transfer?", C::Storage),
    kw("stx-get-balance", C::Storage),
    kw("var-get", C::Storage),
    kw("var-set", C::Storage),
    kw("map-get?", C::Storage),
    kw("map-set", C::Storage),
    kw("map-insert", C::Storage),
    kw("map-delete", C::Storage),
    kw("map-insert!", C::Storage),
    kw("map-set!", C::Storage),
    // Output
    kw("print", C::Output),
];

/// Look up a keyword by its exact spelling.
pub fn from_str(word: &str) -> Option<&'static KeywordInfo> {
    KEYWORDS.iter().find(|k| k.canonical == word)
}

/// Check whether a word is on the allow-list.
pub fn is_valid(word: &str) -> bool {
    from_str(word).is_some()
}

/// Allow-listed spellings that start with `define-`, in table order.
pub fn define_keywords() -> impl Iterator<Item = &'static str> {
    KEYWORDS
        .iter()
        .map(|k| k.canonical)
        .filter(|k| k.starts_with("define-"))
}
