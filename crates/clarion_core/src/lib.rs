//! Provide the canonical Clarity vocabulary shared by the scanner, the editor tooling, and the language server.
//!
//! This crate is intentionally small and dependency-free. It holds the word lists that would otherwise be repeated as
//! string literals across checkers, completion providers, and parameter validation.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global mutable state, no scanner or editor types.
//! - Tables are `const` so they can be iterated in declaration order (diagnostic messages list them that way).

pub mod lang;
