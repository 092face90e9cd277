//! Clarity Language Server Protocol (LSP) implementation
//!
//! Provides IDE features:
//! - Syntax diagnostics on open and save, debounced while typing
//! - Snippet completions from the vocabulary table
//! - `workspace/executeCommand` for the block editor, the `clarinet` toolchain and test drafting
//!
//! ## Module Structure
//!
//! - `backend` - the `tower_lsp::LanguageServer` implementation
//! - `session` - open documents, their diagnostics and the block editor
//! - `commands` - command names and argument decoding
//! - `debounce` - per-document delayed scans
//! - `diagnostics`, `completion` - conversions to `lsp_types`

pub mod backend;
pub mod commands;
pub mod completion;
pub mod debounce;
pub mod diagnostics;
pub mod session;

pub use backend::ClarityLanguageServer;
