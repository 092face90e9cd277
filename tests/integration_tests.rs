//! Integration tests for the workspace-facing features: contract discovery, function extraction, block rendering
//! and configuration.

use std::fs;
use std::path::Path;

use clarion::blocks::BlockEditor;
use clarion::config::ServerConfig;
use clarion::contracts::{self, Visibility};
use clarion::{ScanConfig, Scanner, SourceDocument};
use serde_json::json;

const COUNTER: &str = r#";; counter contract
(define-data-var count uint u0)

(define-public (increment (step uint))
  (begin
    (var-set count (+ (var-get count) step))
    (ok (var-get count))))

(define-read-only (get-count)
  (ok (var-get count)))

(define-private (reset-to (value uint) (who principal))
  (begin (var-set count value) (ok who)))
"#;

/// Helper to lay out a small Clarinet-style workspace
fn workspace(root: &Path) {
    fs::create_dir_all(root.join("contracts")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::create_dir_all(root.join(".cache")).unwrap();
    fs::write(root.join("contracts/counter.clar"), COUNTER).unwrap();
    fs::write(root.join("contracts/empty.clar"), "").unwrap();
    fs::write(root.join("node_modules/pkg/vendored.clar"), "(define-public (x) (ok u1))").unwrap();
    fs::write(root.join(".cache/cached.clar"), "(define-public (x) (ok u1))").unwrap();
    fs::write(root.join("Clarinet.toml"), "[project]\nname = \"counter\"\n").unwrap();
}

#[test]
fn test_discovery_skips_vendored_and_hidden_dirs() {
    let dir = tempfile::tempdir().unwrap();
    workspace(dir.path());

    let found = contracts::discover_contracts(dir.path()).unwrap();
    let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["counter", "empty"]);
}

#[test]
fn test_functions_and_definitions_from_workspace() {
    let dir = tempfile::tempdir().unwrap();
    workspace(dir.path());
    let found = contracts::discover_contracts(dir.path()).unwrap();
    let counter = &found[0];

    let functions = contracts::parse_functions(&counter.content, &counter.path);
    let summary: Vec<_> = functions
        .iter()
        .map(|f| (f.name.as_str(), f.visibility, f.parameters.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("increment", Visibility::Public, 1),
            ("get-count", Visibility::ReadOnly, 0),
            ("reset-to", Visibility::Private, 2),
        ]
    );
    assert_eq!(functions[2].parameters[1].ty, "principal");

    let definition = contracts::extract_definition(&counter.content, "get-count").unwrap();
    assert_eq!(definition, "(define-read-only (get-count)\n  (ok (var-get count)))");

    let values = vec!["u5".to_string()];
    for (value, param) in values.iter().zip(&functions[0].parameters) {
        assert!(contracts::validate_parameter_value(value, &param.ty).is_ok());
    }
    assert_eq!(
        contracts::contract_call("counter", "increment", &values),
        "(contract-call? .counter increment u5)"
    );
}

#[test]
fn test_workspace_contracts_scan_clean() {
    let dir = tempfile::tempdir().unwrap();
    workspace(dir.path());
    let scanner = Scanner::new(&ScanConfig::default());

    for contract in contracts::discover_contracts(dir.path()).unwrap() {
        let doc = SourceDocument::new(contract.path.display().to_string(), contract.content);
        assert_eq!(scanner.scan(&doc), vec![], "{}", contract.name);
    }
}

#[test]
fn test_generated_block_code() {
    let mut editor = BlockEditor::new();
    let map = editor.add_block("map");
    editor.set_parameter(&map, "map-name", "balances").unwrap();
    editor.set_parameter(&map, "key-type", "principal").unwrap();

    let func = editor.add_block("function");
    editor.set_parameter(&func, "function-name", "add").unwrap();
    editor.set_parameter(&func, "param1", "a").unwrap();
    let op = editor.add_child(&func, "operation").unwrap();
    editor.set_parameter(&op, "value1", "a").unwrap();
    editor.set_parameter(&op, "value2", "u1").unwrap();

    insta::assert_snapshot!(editor.generate_code(), @r"
    (define-map balances principal uint)

    (define-public (add (a uint))
      (ok true)
    )

    (+ a u1)
    ");
}

#[test]
fn test_default_blocks_join_with_one_blank_line() {
    let mut editor = BlockEditor::new();
    editor.add_block("constant");
    editor.add_block("function");

    insta::assert_snapshot!(editor.generate_code(), @r"
    (define-constant CONSTANT-NAME value)

    (define-public (function-name (param1 uint))
      (ok true)
    )
    ");
}

#[test]
fn test_saved_blocks_render_and_continue_ids() {
    let saved = json!([{
        "id": "block_7",
        "type": "constant",
        "label": "Owner",
        "code": "(define-constant {CONSTANT-NAME} {value})",
        "parameters": [
            { "name": "CONSTANT-NAME", "type": "string", "value": "CONTRACT-OWNER" },
            { "name": "value", "type": "expression", "value": "tx-sender" }
        ]
    }]);
    let mut editor = BlockEditor::from_blocks(serde_json::from_value(saved).unwrap());
    insta::assert_snapshot!(editor.generate_code(), @"(define-constant CONTRACT-OWNER tx-sender)");
    assert_eq!(editor.add_block("variable"), "block_8");
}

#[test]
fn test_generated_code_passes_the_scanner() {
    let mut editor = BlockEditor::new();
    for kind in ["function", "constant", "variable", "map", "condition", "operation", "loop"] {
        editor.add_block(kind);
    }
    let doc = SourceDocument::new("blocks.clar", editor.generate_code());
    let errors: Vec<_> = Scanner::default()
        .scan(&doc)
        .into_iter()
        .filter(|d| d.is_error())
        .collect();
    assert_eq!(errors, vec![]);
}

#[test]
fn test_editor_settings_section() {
    let settings = json!({
        "clarity": {
            "clarinetPath": "/usr/local/bin/clarinet",
            "scan": { "typeAnnotations": true },
            "testGen": { "model": "gpt-4o-mini" }
        }
    });
    let config = ServerConfig::from_settings(&settings).unwrap();
    assert_eq!(config.clarinet_path, "/usr/local/bin/clarinet");
    assert!(config.scan.type_annotations);
    assert!(!config.scan.function_calls);
    assert_eq!(config.test_gen.model, "gpt-4o-mini");
    assert_eq!(config.debounce_ms, ServerConfig::default().debounce_ms);
}
