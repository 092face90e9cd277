#![forbid(unsafe_code)]
//! Clarion: editor tooling for Clarity smart contracts.
//!
//! The syntax scanner lives in `clarion_syntax` and the language vocabulary in `clarion_core`. This crate adds the
//! editor-side features around them: the block editor, contract discovery, the `clarinet` toolchain bridge, test
//! drafting, configuration, the language server and the CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: Static regexes are compiled with `.expect("INVARIANT: reason")`; a failure there is a
//!   bug in the pattern, not a runtime condition.

pub mod blocks;
pub mod cli;
pub mod config;
pub mod contracts;
pub mod lsp;
pub mod testgen;
pub mod toolchain;
pub mod version;

pub use clarion_core::lang;
pub use clarion_syntax::{Diagnostic, DiagnosticSet, ScanConfig, Scanner, Severity, SourceDocument};

pub use blocks::{Block, BlockEditor, BlockKind};
pub use config::ServerConfig;
