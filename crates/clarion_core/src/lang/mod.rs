//! Clarity language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: allow-listed keywords, `define-*` forms, builtin
//! type names, operator tokens, and the completion snippet table.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no IO, no side effects.
//! - The scanner decides what is well-formed; registries only provide spellings and metadata (diagnostic messages,
//!   completion, parameter prompts).
//!
//! ## Examples
//! ```rust
//! use clarion_core::lang::{defines::DefineKind, keywords};
//!
//! assert!(keywords::is_valid("define-public"));
//! assert_eq!(DefineKind::ReadOnly.keyword(), "define-read-only");
//! ```

pub mod completions;
pub mod defines;
pub mod keywords;
pub mod operators;
pub mod types;
