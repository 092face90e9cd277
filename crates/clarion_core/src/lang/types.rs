//! Clarity builtin type names.
//!
//! Used by the call-vs-definition heuristic (a `(name <type>)` group looks like a parameter declaration), by the
//! opt-in type-annotation check, and by parameter prompts (example values, input validation).
//!
//! ## Examples
//! ```rust
//! use clarion_core::lang::types::{self, TypeId};
//!
//! assert_eq!(types::from_str("string-utf8"), Some(TypeId::StringUtf8));
//! assert_eq!(types::example_value("string-utf8"), "u\"hello\"");
//! assert_eq!(types::example_value("my-trait"), "value");
//! ```

/// Stable identifier for every builtin type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeId {
    Uint,
    Int,
    Bool,
    StringAscii,
    StringUtf8,
    Principal,
    List,
    Tuple,
    Optional,
    Response,
    Buff,
    BuffAscii,
    BuffUtf8,
    Trait,
    FungibleToken,
    NonFungibleToken,
}

/// Metadata for a builtin type.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub id: TypeId,
    pub canonical: &'static str,
    /// Literal shown as a placeholder when prompting for a value of this type.
    pub example: Option<&'static str>,
}

const fn ty(id: TypeId, canonical: &'static str, example: Option<&'static str>) -> TypeInfo {
    TypeInfo { id, canonical, example }
}

/// Registry of builtin types, in enum order.
pub const TYPES: &[TypeInfo] = &[
    ty(TypeId::Uint, "uint", Some("u100")),
    ty(TypeId::Int, "int", Some("i100")),
    ty(TypeId::Bool, "bool", Some("true")),
    ty(TypeId::StringAscii, "string-ascii", Some("\"hello\"")),
    ty(TypeId::StringUtf8, "string-utf8", Some("u\"hello\"")),
    ty(TypeId::Principal, "principal", Some("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM")),
    ty(TypeId::List, "list", Some("(list u1 u2 u3)")),
    ty(TypeId::Tuple, "tuple", Some("(tuple (key \"value\"))")),
    ty(TypeId::Optional, "optional", Some("(some u100)")),
    ty(TypeId::Response, "response", Some("(ok u100)")),
    ty(TypeId::Buff, "buff", None),
    ty(TypeId::BuffAscii, "buff-ascii", None),
    ty(TypeId::BuffUtf8, "buff-utf8", None),
    ty(TypeId::Trait, "trait", None),
    ty(TypeId::FungibleToken, "fungible-token", None),
    ty(TypeId::NonFungibleToken, "non-fungible-token", None),
];

/// Fallback placeholder for types without an example.
pub const GENERIC_EXAMPLE: &str = "value";

pub fn from_str(name: &str) -> Option<TypeId> {
    TYPES.iter().find(|t| t.canonical == name).map(|t| t.id)
}

pub fn as_str(id: TypeId) -> &'static str {
    TYPES[id as usize].canonical
}

pub fn is_type_name(name: &str) -> bool {
    from_str(name).is_some()
}

/// Example literal for a type spelling: the exact spelling must be a builtin with an example.
pub fn example_value(name: &str) -> &'static str {
    TYPES
        .iter()
        .find(|t| t.canonical == name)
        .and_then(|t| t.example)
        .unwrap_or(GENERIC_EXAMPLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_in_enum_order() {
        for (i, t) in TYPES.iter().enumerate() {
            assert_eq!(t.id as usize, i, "TYPES out of order at {}", t.canonical);
            assert_eq!(as_str(t.id), t.canonical);
        }
    }

    #[test]
    fn test_examples() {
        assert_eq!(example_value("uint"), "u100");
        assert_eq!(example_value("int"), "i100");
        assert_eq!(example_value("buff"), GENERIC_EXAMPLE);
    }
}
