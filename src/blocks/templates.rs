//! Starting code for each block kind.
//!
//! Placeholders are written `{name}`; each placeholder has a matching parameter whose default value is the text
//! a fresh block renders with.

use super::BlockKind;

pub struct Template {
    pub label: &'static str,
    pub code: &'static str,
    /// `(name, type, default value)`
    pub parameters: &'static [(&'static str, &'static str, Option<&'static str>)],
}

pub const FUNCTION: Template = Template {
    label: "New Function",
    code: "(define-public ({function-name} ({param1} {param-type}))\n  (ok true)\n)",
    parameters: &[
        ("function-name", "string", None),
        ("param1", "string", None),
        ("param-type", "type", Some("uint")),
    ],
};

pub const CONSTANT: Template = Template {
    label: "New Constant",
    code: "(define-constant {CONSTANT-NAME} {value})",
    parameters: &[("CONSTANT-NAME", "string", None), ("value", "expression", None)],
};

pub const VARIABLE: Template = Template {
    label: "New Variable",
    code: "(define-data-var {variable-name} {type} {initial-value})",
    parameters: &[
        ("variable-name", "string", None),
        ("type", "type", Some("uint")),
        ("initial-value", "expression", Some("u0")),
    ],
};

pub const MAP: Template = Template {
    label: "New Map",
    code: "(define-map {map-name} {key-type} {value-type})",
    parameters: &[
        ("map-name", "string", None),
        ("key-type", "type", Some("uint")),
        ("value-type", "type", Some("uint")),
    ],
};

pub const CONDITION: Template = Template {
    label: "New Condition",
    code: "(if {condition}\n  {then-expression}\n  {else-expression}\n)",
    parameters: &[
        ("condition", "expression", None),
        ("then-expression", "expression", None),
        ("else-expression", "expression", None),
    ],
};

pub const OPERATION: Template = Template {
    label: "New Operation",
    code: "({operator} {value1} {value2})",
    parameters: &[
        ("operator", "operator", Some("+")),
        ("value1", "expression", None),
        ("value2", "expression", None),
    ],
};

pub const LOOP: Template = Template {
    label: "New Loop",
    code: "(fold {function} {sequence} {initial-value})",
    parameters: &[
        ("function", "string", None),
        ("sequence", "expression", None),
        ("initial-value", "expression", None),
    ],
};

/// Used when a block kind name is not recognised.
pub const FALLBACK: Template = Template {
    label: "New Block",
    code: ";; New block",
    parameters: &[],
};

pub fn template(kind: BlockKind) -> &'static Template {
    match kind {
        BlockKind::Function => &FUNCTION,
        BlockKind::Constant => &CONSTANT,
        BlockKind::Variable => &VARIABLE,
        BlockKind::Map => &MAP,
        BlockKind::Condition => &CONDITION,
        BlockKind::Operation => &OPERATION,
        BlockKind::Loop => &LOOP,
    }
}

/// Placeholder names in `code`, in order of first appearance.
pub fn placeholders(code: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = code;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else { break };
        let name = &after[..close];
        if !name.is_empty() && !name.contains(char::is_whitespace) && !names.contains(&name) {
            names.push(name);
        }
        rest = &after[close + 1..];
    }
    names
}
