//! Completion snippet table for Clarity editors.
//!
//! Each entry carries the text inserted on acceptance. Snippet entries use LSP tab-stop syntax (`${1:name}`);
//! plain entries insert their text verbatim.
//!
//! ## Notes
//! - Labels are unique; the guardrail tests enforce it.
//! - Documentation strings are Markdown.

/// Presentation kind of a completion entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Keyword,
    Function,
    Operator,
    Value,
    Snippet,
}

/// A single completion entry.
#[derive(Debug, Clone, Copy)]
pub struct CompletionInfo {
    pub label: &'static str,
    pub kind: CompletionKind,
    pub insert_text: &'static str,
    /// Whether `insert_text` contains tab stops.
    pub is_snippet: bool,
    pub documentation: &'static str,
}

const fn snippet(
    label: &'static str,
    kind: CompletionKind,
    insert_text: &'static str,
    doc: &'static str,
) -> CompletionInfo {
    CompletionInfo {
        label,
        kind,
        insert_text,
        is_snippet: true,
        documentation: doc,
    }
}

const fn plain(label: &'static str, kind: CompletionKind, doc: &'static str) -> CompletionInfo {
    CompletionInfo {
        label,
        kind,
        insert_text: label,
        is_snippet: false,
        documentation: doc,
    }
}

use CompletionKind as K;

/// Registry of completion entries, grouped for readability.
pub const COMPLETIONS: &[CompletionInfo] = &[
    // Define statements
    snippet(
        "define-public",
        K::Keyword,
        "(define-public (${1:function-name} (${2:param1} ${3:param-type}))\n  ${4:; body}\n)",
        "Define a public function",
    ),
    snippet(
        "define-private",
        K::Keyword,
        "(define-private (${1:function-name} (${2:param1} ${3:param-type}))\n  ${4:; body}\n)",
        "Define a private function",
    ),
    snippet(
        "define-read-only",
        K::Keyword,
        "(define-read-only (${1:function-name} (${2:param1} ${3:param-type}))\n  ${4:; body}\n)",
        "Define a read-only function",
    ),
    snippet(
        "define-trait",
        K::Keyword,
        "(define-trait ${1:trait-name}\n  (${2:function-name} (${3:param1} ${4:param-type}) ${5:return-type})\n)",
        "Define a trait",
    ),
    snippet(
        "define-fungible-token",
        K::Keyword,
        "(define-fungible-token ${1:token-name})",
        "Define a fungible token",
    ),
    snippet(
        "define-non-fungible-token",
        K::Keyword,
        "(define-non-fungible-token ${1:token-name} ${2:identifier-type})",
        "Define a non-fungible token",
    ),
    // Constants and variables
    snippet(
        "define-constant",
        K::Keyword,
        "(define-constant ${1:CONSTANT-NAME} ${2:value})",
        "Define a constant value",
    ),
    snippet(
        "define-data-var",
        K::Keyword,
        "(define-data-var ${1:variable-name} ${2:type} ${3:initial-value})",
        "Define a data variable",
    ),
    snippet(
        "define-map",
        K::Keyword,
        "(define-map ${1:map-name} ${2:key-type} ${3:value-type})",
        "Define a map",
    ),
    // Control flow
    snippet(
        "if",
        K::Keyword,
        "(if ${1:condition}\n  ${2:then-expression}\n  ${3:else-expression}\n)",
        "Conditional expression",
    ),
    snippet(
        "when",
        K::Keyword,
        "(when ${1:condition}\n  ${2:then-expression}\n)",
        "Conditional expression without else",
    ),
    snippet(
        "match",
        K::Keyword,
        "(match ${1:value}\n  ${2:pattern1} ${3:expression1}\n  ${4:pattern2} ${5:expression2}\n)",
        "Pattern matching",
    ),
    // Sequences
    snippet("map", K::Function, "(map ${1:function} ${2:list})", "Apply function to each element in list"),
    snippet("filter", K::Function, "(filter ${1:function} ${2:list})", "Filter list based on predicate"),
    snippet(
        "fold",
        K::Function,
        "(fold ${1:function} ${2:list} ${3:initial})",
        "Reduce list to single value",
    ),
    snippet("list", K::Function, "(list ${1:item1} ${2:item2})", "Create a list"),
    snippet("len", K::Function, "(len ${1:list})", "Get list length"),
    snippet("append", K::Function, "(append ${1:list} ${2:item})", "Append item to list"),
    // Arithmetic
    snippet("+", K::Operator, "(+ ${1:num1} ${2:num2})", "Addition"),
    snippet("-", K::Operator, "(- ${1:num1} ${2:num2})", "Subtraction"),
    snippet("*", K::Operator, "(* ${1:num1} ${2:num2})", "Multiplication"),
    snippet("/", K::Operator, "(/ ${1:num1} ${2:num2})", "Division"),
    snippet("mod", K::Operator, "(mod ${1:num1} ${2:num2})", "Modulo"),
    snippet("pow", K::Operator, "(pow ${1:base} ${2:exponent})", "Power"),
    // Comparison
    snippet("=", K::Operator, "(= ${1:val1} ${2:val2})", "Equality"),
    snippet("!=", K::Operator, "(!= ${1:val1} ${2:val2})", "Inequality"),
    snippet("<", K::Operator, "(< ${1:val1} ${2:val2})", "Less than"),
    snippet("<=", K::Operator, "(<= ${1:val1} ${2:val2})", "Less than or equal"),
    snippet(">", K::Operator, "(> ${1:val1} ${2:val2})", "Greater than"),
    snippet(">=", K::Operator, "(>= ${1:val1} ${2:val2})", "Greater than or equal"),
    // Boolean
    snippet("and", K::Operator, "(and ${1:expr1} ${2:expr2})", "Logical AND"),
    snippet("or", K::Operator, "(or ${1:expr1} ${2:expr2})", "Logical OR"),
    snippet("not", K::Operator, "(not ${1:expression})", "Logical NOT"),
    // Strings
    snippet(
        "concat",
        K::Function,
        "(concat ${1:sequence1} ${2:sequence2})",
        "Concatenate strings or lists",
    ),
    snippet("str-len", K::Function, "(str-len ${1:string})", "Get string length"),
    snippet("str-to-int", K::Function, "(str-to-int ${1:string})", "Convert string to integer"),
    snippet("int-to-str", K::Function, "(int-to-str ${1:integer})", "Convert integer to string"),
    plain("string-ascii", K::Keyword, "ASCII string type"),
    plain("string-utf8", K::Keyword, "UTF-8 string type"),
    // Responses and optionals
    plain("ok", K::Value, "Ok response type"),
    snippet("err", K::Value, "(err ${1:error-code})", "Error response type"),
    snippet("some", K::Value, "(some ${1:value})", "Some optional value"),
    plain("none", K::Value, "None optional value"),
    snippet("print", K::Function, "(print ${1:value})", "Print value to console/emit event"),
    // Unwrapping
    snippet(
        "try!",
        K::Function,
        "(try! ${1:optional-or-response})",
        "Unwrap optional or response, exit on none/err",
    ),
    snippet(
        "unwrap!",
        K::Function,
        "(unwrap! ${1:optional-value} ${2:error-value})",
        "Unwrap optional value or return error",
    ),
    snippet(
        "unwrap-panic",
        K::Function,
        "(unwrap-panic ${1:optional-value})",
        "Unwrap optional value or panic",
    ),
    snippet(
        "unwrap-err!",
        K::Function,
        "(unwrap-err! ${1:response-value} ${2:error-value})",
        "Unwrap response value or return error",
    ),
    snippet(
        "unwrap-err-panic",
        K::Function,
        "(unwrap-err-panic ${1:response-value})",
        "Unwrap response value or panic",
    ),
    snippet("is-ok", K::Function, "(is-ok ${1:response-value})", "Check if response is ok"),
    snippet("is-err", K::Function, "(is-err ${1:response-value})", "Check if response is error"),
    snippet("is-some", K::Function, "(is-some ${1:optional-value})", "Check if optional has value"),
    snippet("is-none", K::Function, "(is-none ${1:optional-value})", "Check if optional is none"),
    // Tuples
    snippet(
        "merge",
        K::Function,
        "(merge ${1:tuple1} ${2:tuple2})",
        "Merge two tuples, second overwrites first",
    ),
    snippet("get", K::Function, "(get ${1:field-name} ${2:tuple})", "Get field value from tuple"),
    snippet("is-eq", K::Function, "(is-eq ${1:value1} ${2:value2})", "Check if two values are equal"),
    snippet(
        "asserts!",
        K::Function,
        "(asserts! ${1:condition} ${2:error-code})",
        "Assert condition or return error",
    ),
    // STX and contract context
    snippet(
        "stx-transfer?",
        K::Function,
        "(stx-transfer? ${1:amount} ${2:sender} ${3:recipient})",
        "Transfer STX tokens (returns response)",
    ),
    snippet(
        "stx-get-balance",
        K::Function,
        "(stx-get-balance ${1:account})",
        "Get STX balance of account",
    ),
    snippet(
        "as-contract",
        K::Function,
        "(as-contract ${1:expression})",
        "Execute expression as contract",
    ),
    plain("contract-caller", K::Function, "Get contract caller principal"),
    plain("tx-sender", K::Function, "Get transaction sender principal"),
    snippet(
        "default-to",
        K::Function,
        "(default-to ${1:default-value} ${2:optional-value})",
        "Get value from optional or return default",
    ),
    snippet(
        "expects!",
        K::Function,
        "(expects! ${1:optional-value} ${2:error-code})",
        "Expect optional to have value or return error",
    ),
    snippet(
        "expects-err!",
        K::Function,
        "(expects-err! ${1:response-value} ${2:error-code})",
        "Expect response to be error or return error",
    ),
    // Maps
    snippet(
        "map-get",
        K::Function,
        "(map-get? ${1:map-name} ${2:key})",
        "Get value from map (returns optional)",
    ),
    snippet(
        "map-set",
        K::Function,
        "(map-set ${1:map-name} ${2:key} ${3:value})",
        "Set value in map (overwrites existing)",
    ),
    snippet(
        "map-insert",
        K::Function,
        "(map-insert ${1:map-name} ${2:key} ${3:value})",
        "Insert value in map (fails if key exists)",
    ),
    snippet("map-delete", K::Function, "(map-delete ${1:map-name} ${2:key})", "Delete key from map"),
    snippet(
        "map-insert!",
        K::Function,
        "(map-insert! ${1:map-name} ${2:key} ${3:value})",
        "Insert value in map (panics if key exists)",
    ),
    snippet(
        "map-set!",
        K::Function,
        "(map-set! ${1:map-name} ${2:key} ${3:value})",
        "Set value in map (panics if key does not exist)",
    ),
    // Comments
    snippet("comment", K::Snippet, ";; ${1:comment}", "Add a comment"),
];

pub fn from_label(label: &str) -> Option<&'static CompletionInfo> {
    COMPLETIONS.iter().find(|c| c.label == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_read_only_opens_a_form() {
        let info = from_label("define-read-only").unwrap();
        assert!(info.insert_text.starts_with("(define-read-only"));
    }

    #[test]
    fn test_plain_entries_insert_their_label() {
        for c in COMPLETIONS.iter().filter(|c| !c.is_snippet) {
            assert_eq!(c.insert_text, c.label);
        }
    }
}
