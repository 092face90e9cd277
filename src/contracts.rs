//! Contract discovery and function-signature extraction.
//!
//! Used by the "test one function" flow, the `functions` CLI command and test drafting. Extraction is regex based,
//! like the scanner: it reads `define-public`, `define-private` and `define-read-only` headers and never parses
//! bodies.
//!
//! ## Notes
//! - Headers that start inside a string or a `;;` comment are ignored.
//! - Parameter types may hold one nested level of parentheses, e.g. `(memo (string-ascii 34))`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use clarion_core::lang::types::{self, TypeId};
use clarion_syntax::lexical;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Directories never searched for contracts.
const SKIPPED_DIRS: &[&str] = &["target", "node_modules"];

static FUNCTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(define-(public|private|read-only)\s+\(([^\s()]+)((?:\s*\((?:[^()]|\([^()]*\))*\))*)\s*\)")
        .expect("INVARIANT: function header pattern is valid")
});

static PARAM_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((?:[^()]|\([^()]*\))*\)").expect("INVARIANT: parameter group pattern is valid")
});

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    /// File stem, used as the contract identifier in `contract-call?`.
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Public,
    Private,
    ReadOnly,
}

impl Visibility {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "read-only" => Some(Self::ReadOnly),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::ReadOnly => "read-only",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    pub visibility: Visibility,
    pub contract_name: String,
    pub parameters: Vec<Parameter>,
    /// `(<name> <params>)` as written in the header, or `(<name>)`.
    pub signature: String,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Discovery
// ============================================================================

/// Every `.clar` file under `root`, sorted by path.
///
/// Hidden directories, `target` and `node_modules` are skipped. Files that cannot be read are logged and skipped;
/// only an unreadable `root` is an error.
pub fn discover_contracts(root: &Path) -> Result<Vec<Contract>, ContractError> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(root).map_err(|source| ContractError::ReadDir {
        path: root.to_path_buf(),
        source,
    })?;
    collect_clar_files(entries, &mut paths);
    paths.sort();

    let mut contracts = Vec::with_capacity(paths.len());
    for path in paths {
        match fs::read_to_string(&path) {
            Ok(content) => contracts.push(Contract {
                name: contract_name(&path),
                path,
                content,
            }),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "skipping unreadable contract"),
        }
    }
    tracing::debug!(root = %root.display(), found = contracts.len(), "contract discovery");
    Ok(contracts)
}

fn collect_clar_files(entries: fs::ReadDir, out: &mut Vec<PathBuf>) {
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let Ok(file_type) = entry.file_type() else { continue };

        if file_type.is_dir() {
            if name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()) {
                continue;
            }
            match fs::read_dir(&path) {
                Ok(sub) => collect_clar_files(sub, out),
                Err(err) => tracing::warn!(path = %path.display(), error = %err, "skipping unreadable directory"),
            }
        } else if path.extension().is_some_and(|e| e == "clar") {
            out.push(path);
        }
    }
}

fn contract_name(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

// ============================================================================
// Extraction
// ============================================================================

/// Function headers of one contract, in source order.
pub fn parse_functions(content: &str, path: &Path) -> Vec<FunctionInfo> {
    let contract_name = contract_name(path);
    FUNCTION_HEADER
        .captures_iter(content)
        .filter(|caps| caps.get(0).is_some_and(|m| starts_in_code(content, m.start())))
        .filter_map(|caps| {
            let visibility = Visibility::from_suffix(&caps[1])?;
            let name = caps[2].to_string();
            let params = caps[3].trim();
            let signature = if params.is_empty() {
                format!("({name})")
            } else {
                format!("({name} {params})")
            };
            Some(FunctionInfo {
                parameters: parse_parameters(params),
                name,
                visibility,
                contract_name: contract_name.clone(),
                signature,
                path: path.to_path_buf(),
            })
        })
        .collect()
}

fn parse_parameters(params: &str) -> Vec<Parameter> {
    PARAM_GROUP
        .find_iter(params)
        .filter_map(|m| {
            let inner = m.as_str()[1..m.len() - 1].trim();
            let (name, ty) = inner.split_once(char::is_whitespace)?;
            Some(Parameter {
                name: name.to_string(),
                ty: ty.trim().to_string(),
            })
        })
        .collect()
}

/// The complete text of the definition of function `name`, from its opening parenthesis to the matching close.
///
/// Returns `None` when there is no such function or its parentheses never balance.
pub fn extract_definition(content: &str, name: &str) -> Option<String> {
    let start = FUNCTION_HEADER
        .captures_iter(content)
        .filter(|caps| &caps[2] == name)
        .filter_map(|caps| caps.get(0))
        .map(|m| m.start())
        .find(|&offset| starts_in_code(content, offset))?;

    let mut depth = 0usize;
    let mut line_start = line_start_of(content, start);
    for line in content[line_start..].split_inclusive('\n') {
        let scan = lexical::scan_line(line);
        for (i, c) in line.char_indices() {
            let offset = line_start + i;
            if offset < start || !scan.is_code(i) {
                continue;
            }
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(content[start..=offset].to_string());
                    }
                }
                _ => {}
            }
        }
        line_start += line.len();
    }
    None
}

fn line_start_of(content: &str, offset: usize) -> usize {
    content[..offset].rfind('\n').map_or(0, |nl| nl + 1)
}

fn starts_in_code(content: &str, offset: usize) -> bool {
    let line_start = line_start_of(content, offset);
    let line_end = content[offset..].find('\n').map_or(content.len(), |nl| offset + nl);
    lexical::scan_line(&content[line_start..line_end]).is_code(offset - line_start)
}

// ============================================================================
// Values and calls
// ============================================================================

/// Check a user-entered argument against a parameter type.
///
/// Only the simple literal types are checked; anything else is accepted. Parenthesised types validate by their
/// head word, so `(string-ascii 50)` is checked as `string-ascii`.
pub fn validate_parameter_value(value: &str, ty: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Parameter value cannot be empty".to_string());
    }
    let Some(id) = types::from_str(type_head(ty)) else {
        return Ok(());
    };
    let (valid, hint) = match id {
        TypeId::Uint => (is_prefixed_digits(value, "u"), "Invalid uint format. Use: u123"),
        TypeId::Int => (
            is_prefixed_digits(value, "i") || is_prefixed_digits(value, "i-"),
            "Invalid int format. Use: i123 or i-123",
        ),
        TypeId::Bool => (matches!(value, "true" | "false"), "Invalid bool format. Use: true or false"),
        TypeId::StringAscii => (
            value.len() >= 2 && value.starts_with('"') && value.ends_with('"'),
            "Invalid string-ascii format. Use: \"hello\"",
        ),
        TypeId::StringUtf8 => (
            value.len() >= 3 && value.starts_with("u\"") && value.ends_with('"'),
            "Invalid string-utf8 format. Use: u\"hello\"",
        ),
        _ => return Ok(()),
    };
    if valid { Ok(()) } else { Err(hint.to_string()) }
}

/// A literal of type `ty`, used as a prompt placeholder.
pub fn example_value(ty: &str) -> &'static str {
    types::example_value(type_head(ty))
}

fn type_head(ty: &str) -> &str {
    let ty = ty.trim();
    match ty.strip_prefix('(') {
        Some(inner) => inner.split(|c: char| c.is_whitespace() || c == ')').next().unwrap_or(inner),
        None => ty,
    }
}

fn is_prefixed_digits(value: &str, prefix: &str) -> bool {
    value
        .strip_prefix(prefix)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// `(contract-call? .<contract> <function> <values...>)`
pub fn contract_call(contract: &str, function: &str, values: &[String]) -> String {
    let call = direct_call(function, values);
    format!("(contract-call? .{contract} {}", &call[1..])
}

/// `(<function> <values...>)`
pub fn direct_call(function: &str, values: &[String]) -> String {
    if values.is_empty() {
        format!("({function})")
    } else {
        format!("({function} {})", values.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = r#";; (define-public (commented (x uint)))
(define-fungible-token token)

(define-public (transfer (amount uint) (to principal) (memo (buff 34)))
  (begin
    (print "(define-public (fake (a int)))")
    (ft-transfer? token amount tx-sender to)))

(define-read-only (get-balance (who principal))
  (ok (ft-get-balance token who)))

(define-private (mint-all)
  (ft-mint? token u100 tx-sender))
"#;

    fn funcs() -> Vec<FunctionInfo> {
        parse_functions(TOKEN, Path::new("contracts/token.clar"))
    }

    #[test]
    fn test_parse_functions_in_source_order() {
        let names: Vec<_> = funcs().iter().map(|f| (f.name.clone(), f.visibility)).collect();
        assert_eq!(
            names,
            vec![
                ("transfer".to_string(), Visibility::Public),
                ("get-balance".to_string(), Visibility::ReadOnly),
                ("mint-all".to_string(), Visibility::Private),
            ]
        );
    }

    #[test]
    fn test_parameters_and_signature() {
        let transfer = &funcs()[0];
        assert_eq!(transfer.contract_name, "token");
        assert_eq!(
            transfer.parameters,
            vec![
                Parameter {
                    name: "amount".into(),
                    ty: "uint".into()
                },
                Parameter {
                    name: "to".into(),
                    ty: "principal".into()
                },
                Parameter {
                    name: "memo".into(),
                    ty: "(buff 34)".into()
                },
            ]
        );
        assert_eq!(
            transfer.signature,
            "(transfer (amount uint) (to principal) (memo (buff 34)))"
        );
        assert_eq!(funcs()[2].signature, "(mint-all)");
        assert!(funcs()[2].parameters.is_empty());
    }

    #[test]
    fn test_extract_definition_balances_parentheses() {
        let def = extract_definition(TOKEN, "transfer").unwrap();
        assert!(def.starts_with("(define-public (transfer"));
        assert!(def.ends_with("(ft-transfer? token amount tx-sender to)))"));

        assert_eq!(
            extract_definition(TOKEN, "mint-all").unwrap(),
            "(define-private (mint-all)\n  (ft-mint? token u100 tx-sender))"
        );
        assert_eq!(extract_definition(TOKEN, "commented"), None);
        assert_eq!(extract_definition(TOKEN, "fake"), None);
        assert_eq!(extract_definition("(define-public (open)\n  (ok u1)", "open"), None);
    }

    #[test]
    fn test_validate_parameter_value() {
        assert_eq!(
            validate_parameter_value("  ", "uint"),
            Err("Parameter value cannot be empty".into())
        );
        assert!(validate_parameter_value("u12", "uint").is_ok());
        assert_eq!(
            validate_parameter_value("12", "uint"),
            Err("Invalid uint format. Use: u123".into())
        );
        assert!(validate_parameter_value("i-3", "int").is_ok());
        assert!(validate_parameter_value("i", "int").is_err());
        assert!(validate_parameter_value("false", "bool").is_ok());
        assert!(validate_parameter_value("\"hi\"", "(string-ascii 50)").is_ok());
        assert_eq!(
            validate_parameter_value("hi", "(string-ascii 50)"),
            Err("Invalid string-ascii format. Use: \"hello\"".into())
        );
        assert!(validate_parameter_value("u\"hi\"", "string-utf8").is_ok());
        assert!(validate_parameter_value("\"hi\"", "string-utf8").is_err());
        assert!(validate_parameter_value("'ST1", "principal").is_ok());
    }

    #[test]
    fn test_example_values() {
        assert_eq!(example_value("uint"), "u100");
        assert_eq!(example_value("(string-utf8 20)"), "u\"hello\"");
        assert_eq!(example_value("(buff 34)"), "value");
    }

    #[test]
    fn test_call_rendering() {
        let values = vec!["u5".to_string(), "'ST1".to_string()];
        assert_eq!(contract_call("token", "transfer", &values), "(contract-call? .token transfer u5 'ST1)");
        assert_eq!(contract_call("token", "mint-all", &[]), "(contract-call? .token mint-all)");
        assert_eq!(direct_call("mint-all", &[]), "(mint-all)");
    }

    #[test]
    fn test_discovery_skips_hidden_and_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for sub in ["contracts/nested", ".cache", "node_modules/pkg", "target"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        fs::write(root.join("contracts/b.clar"), "(define-public (b) (ok true))").unwrap();
        fs::write(root.join("contracts/nested/a.clar"), "").unwrap();
        fs::write(root.join("contracts/readme.md"), "").unwrap();
        fs::write(root.join(".cache/x.clar"), "").unwrap();
        fs::write(root.join("node_modules/pkg/y.clar"), "").unwrap();
        fs::write(root.join("target/z.clar"), "").unwrap();

        let names: Vec<_> = discover_contracts(root).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_discovery_of_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_contracts(&dir.path().join("missing")).is_err());
    }
}
