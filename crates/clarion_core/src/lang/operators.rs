//! Operator tokens accepted by the operator check.
//!
//! Clarity operators are ordinary function names applied in prefix position, so the list mixes symbols (`<=`) with
//! words (`mod`, `concat`). Only the symbolic ones can ever be produced by a run of [`OPERATOR_CHARS`].

/// Characters that make up symbolic operator runs.
pub const OPERATOR_CHARS: &str = "+-*/%=<>!";

/// Valid operator spellings, in the order diagnostics list them.
pub const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "mod", "pow", "=", "!=", "<", "<=", ">", ">=", "concat", "str-len", "str-to-int",
    "int-to-str", "len", "append", "merge", "get",
];

pub fn is_valid(op: &str) -> bool {
    OPERATORS.contains(&op)
}

pub fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(c)
}

/// Whether every character of `run` is an operator character (and `run` is non-empty).
pub fn is_operator_run(run: &str) -> bool {
    !run.is_empty() && run.chars().all(is_operator_char)
}
