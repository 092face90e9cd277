//! Define the top-level `define-*` forms of Clarity.
//!
//! ## Notes
//! - [`DefineKind::suffix`] is the part after `define-`; it is what the define-shape check names in its message.
//! - Only the three function kinds are callable; see [`DefineKind::is_function`].
//!
//! ## Examples
//! ```rust
//! use clarion_core::lang::defines::{self, DefineKind};
//!
//! assert_eq!(defines::from_keyword("define-data-var"), Some(DefineKind::DataVar));
//! assert_eq!(DefineKind::DataVar.suffix(), "data-var");
//! ```

/// Stable identifier for every `define-*` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefineKind {
    Public,
    Private,
    ReadOnly,
    Trait,
    FungibleToken,
    NonFungibleToken,
    Constant,
    DataVar,
    Map,
}

/// Metadata for a `define-*` form.
#[derive(Debug, Clone, Copy)]
pub struct DefineInfo {
    pub kind: DefineKind,
    /// Full spelling, e.g. `define-read-only`.
    pub keyword: &'static str,
    /// Spelling without the `define-` prefix, e.g. `read-only`.
    pub suffix: &'static str,
}

/// Registry of all `define-*` forms, in the order diagnostics list them.
pub const DEFINES: &[DefineInfo] = &[
    info(DefineKind::Public, "define-public", "public"),
    info(DefineKind::Private, "define-private", "private"),
    info(DefineKind::ReadOnly, "define-read-only", "read-only"),
    info(DefineKind::Trait, "define-trait", "trait"),
    info(DefineKind::FungibleToken, "define-fungible-token", "fungible-token"),
    info(DefineKind::NonFungibleToken, "define-non-fungible-token", "non-fungible-token"),
    info(DefineKind::Constant, "define-constant", "constant"),
    info(DefineKind::DataVar, "define-data-var", "data-var"),
    info(DefineKind::Map, "define-map", "map"),
];

const fn info(kind: DefineKind, keyword: &'static str, suffix: &'static str) -> DefineInfo {
    DefineInfo { kind, keyword, suffix }
}

impl DefineKind {
    /// Return the registry entry for this kind.
    pub fn info(self) -> &'static DefineInfo {
        // DEFINES is declared in enum order.
        &DEFINES[self as usize]
    }

    pub fn keyword(self) -> &'static str {
        self.info().keyword
    }

    pub fn suffix(self) -> &'static str {
        self.info().suffix
    }

    /// Whether this form defines a callable function (`public`, `private`, `read-only`).
    pub fn is_function(self) -> bool {
        matches!(self, DefineKind::Public | DefineKind::Private | DefineKind::ReadOnly)
    }
}

/// Resolve a full `define-*` spelling.
pub fn from_keyword(keyword: &str) -> Option<DefineKind> {
    DEFINES.iter().find(|d| d.keyword == keyword).map(|d| d.kind)
}

/// Resolve a suffix such as `read-only`.
pub fn from_suffix(suffix: &str) -> Option<DefineKind> {
    DEFINES.iter().find(|d| d.suffix == suffix).map(|d| d.kind)
}

/// Iterate the suffixes in registry order.
pub fn suffixes() -> impl Iterator<Item = &'static str> {
    DEFINES.iter().map(|d| d.suffix)
}
