//! Syntax diagnostics for Clarity source: a shallow, line-oriented lexical scanner.
//!
//! A scan splits the document into lines, runs a fixed pipeline of independent checks and returns the union of
//! their diagnostics. Nothing here parses Clarity: each check is a regex or small state machine over one line at a
//! time.
//!
//! ## Notes
//! - A scan never fails. Ambiguous input produces no diagnostic rather than an error.
//! - Vocabulary (keywords, define kinds, types, operators) comes from `clarion_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use clarion_syntax::{ScanConfig, Scanner, Severity, SourceDocument};
//!
//! let doc = SourceDocument::new("counter.clar", "(define-pubic (inc) (ok true))\n");
//! let diagnostics = Scanner::new(&ScanConfig::default()).scan(&doc);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].severity, Severity::Error);
//! ```

pub mod checks;
pub mod diagnostics;
pub mod lexical;
pub mod scanner;
pub mod set;
pub mod source;

pub use checks::calls::{CallClassifier, HeuristicCallClassifier};
pub use diagnostics::{Diagnostic, Position, Range, SOURCE, Severity};
pub use scanner::{ScanConfig, Scanner, scan};
pub use set::DiagnosticSet;
pub use source::SourceDocument;
