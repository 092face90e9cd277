//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::future::Future;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clarion_syntax::{ScanConfig, Scanner, SourceDocument};

use super::report::{self, FileReport, OutputFormat};
use super::{CliError, CliResult, ExitCode};
use crate::blocks::{Block, BlockEditor};
use crate::config::TestGenConfig;
use crate::contracts::{self, FunctionInfo};
use crate::testgen::{OpenAiBackend, TESTS_DIR, TestGenerator};
use crate::toolchain::{Network, Toolchain, ToolchainCommand};

// ============================================================================
// Helpers
// ============================================================================

fn read_file(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Run `fut` on a fresh current-thread runtime.
fn block_on<F: Future>(fut: F) -> CliResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::failure(format!("Error starting async runtime: {e}")))?;
    Ok(runtime.block_on(fut))
}

/// Expand directories into the `.clar` files below them. Plain files are kept as given.
fn collect_sources(paths: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = contracts::discover_contracts(path).map_err(|e| CliError::failure(e.to_string()))?;
            files.extend(found.into_iter().map(|c| c.path));
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

// ============================================================================
// check
// ============================================================================

pub fn scan_config(strict_operators: bool, all_checks: bool) -> ScanConfig {
    let config = ScanConfig::default().with_strict_operators(strict_operators);
    if all_checks { config.all_checks() } else { config }
}

/// Scan every file; the exit code is a failure when any diagnostic is an error.
pub fn check_paths(
    paths: &[PathBuf],
    format: OutputFormat,
    strict_operators: bool,
    all_checks: bool,
) -> CliResult<ExitCode> {
    let files = collect_sources(paths)?;
    if files.is_empty() {
        return Err(CliError::failure("No .clar files found."));
    }

    let scanner = Scanner::new(&scan_config(strict_operators, all_checks));
    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        let text = read_file(file)?;
        let path = file.display().to_string();
        let document = SourceDocument::new(path.clone(), text);
        let diagnostics = scanner.scan(&document);
        reports.push(FileReport {
            path,
            diagnostics,
            document,
        });
    }

    match format {
        OutputFormat::Human => {
            let color = std::io::stdout().is_terminal();
            for r in &reports {
                print!("{}", report::render_human(r, color));
            }
            println!("{}", report::summary(&reports));
        }
        OutputFormat::Plain => {
            for r in &reports {
                print!("{}", report::render_plain(r));
            }
        }
        OutputFormat::Json => {
            let json = report::render_json(&reports)
                .map_err(|e| CliError::failure(format!("Error serializing diagnostics: {e}")))?;
            println!("{json}");
        }
    }

    let failed = reports.iter().any(|r| r.errors() > 0);
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

// ============================================================================
// blocks / functions
// ============================================================================

pub fn render_blocks(file: &Path) -> CliResult<ExitCode> {
    let text = read_file(file)?;
    let blocks: Vec<Block> = serde_json::from_str(&text)
        .map_err(|e| CliError::failure(format!("Error parsing blocks in '{}': {}", file.display(), e)))?;
    let editor = BlockEditor::from_blocks(blocks);
    if editor.blocks().is_empty() {
        return Err(CliError::failure("No blocks to generate code from. Add some blocks first!"));
    }
    println!("{}", editor.generate_code());
    Ok(ExitCode::SUCCESS)
}

fn workspace_functions(root: &Path) -> CliResult<Vec<FunctionInfo>> {
    let found = contracts::discover_contracts(root).map_err(|e| CliError::failure(e.to_string()))?;
    if found.is_empty() {
        return Err(CliError::failure("No .clar files found in the workspace."));
    }
    Ok(found
        .iter()
        .flat_map(|c| contracts::parse_functions(&c.content, &c.path))
        .collect())
}

pub fn list_functions(root: &Path, json: bool) -> CliResult<ExitCode> {
    let functions = workspace_functions(root)?;
    if json {
        let text = serde_json::to_string_pretty(&functions)
            .map_err(|e| CliError::failure(format!("Error serializing functions: {e}")))?;
        println!("{text}");
        return Ok(ExitCode::SUCCESS);
    }

    for f in &functions {
        println!("{:<20} {:<10} {}", f.contract_name, f.visibility.as_str(), f.signature);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Clarinet
// ============================================================================

fn toolchain(executable: &str) -> Toolchain {
    Toolchain::new(executable, std::env::current_dir().ok())
}

fn run_toolchain(executable: &str, cmd: ToolchainCommand) -> CliResult<ExitCode> {
    let toolchain = toolchain(executable);
    eprintln!("Running: {}", toolchain.command_line(&cmd));
    block_on(toolchain.run_inherited(&cmd))?.map_err(|e| CliError::failure(e.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

pub fn new_project(executable: &str, path: String) -> CliResult<ExitCode> {
    run_toolchain(executable, ToolchainCommand::NewProject { path })
}

pub fn console(executable: &str) -> CliResult<ExitCode> {
    run_toolchain(executable, ToolchainCommand::Console)
}

pub fn deployment(executable: &str, network: Network) -> CliResult<ExitCode> {
    run_toolchain(executable, ToolchainCommand::GenerateDeployment { network })
}

// ============================================================================
// test-gen
// ============================================================================

pub fn generate_tests(root: &Path, model: Option<String>, base_url: Option<String>) -> CliResult<ExitCode> {
    let mut config = TestGenConfig::default();
    if let Some(model) = model {
        config = config.with_model(model);
    }
    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }

    let backend = OpenAiBackend::from_config(&config, |name| std::env::var(name).ok())
        .map_err(|e| CliError::failure(e.to_string()))?;
    let generator = TestGenerator::new(backend, config);
    let found = generator.contracts(root).map_err(|e| CliError::failure(e.to_string()))?;
    eprintln!("Found {} contract(s). Generating tests...", found.len());

    let report = block_on(generator.generate_for(root, &found))?;
    for path in &report.written {
        println!("{}", path.display());
    }
    for (name, err) in &report.failures {
        eprintln!("Failed to generate test for {name}: {err}");
    }

    if report.written.is_empty() {
        return Err(CliError::failure("No test files were written."));
    }
    eprintln!("Test generation completed! Check the {TESTS_DIR}/ folder.");
    Ok(if report.failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_config_flags() {
        assert_eq!(scan_config(false, false), ScanConfig::default());
        assert!(scan_config(true, false).strict_operators);
        let all = scan_config(false, true);
        assert!(all.function_calls && all.type_annotations && all.strict_operators);
    }

    #[test]
    fn test_check_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.clar");
        let bad = dir.path().join("bad.clar");
        fs::write(&good, "(define-read-only (get-one) (ok u1))\n").unwrap();
        fs::write(&bad, "(define-read-only (get-one) (ok u1)\n").unwrap();

        let ok = check_paths(&[good], OutputFormat::Plain, false, false).unwrap();
        assert_eq!(ok, ExitCode::SUCCESS);
        let failed = check_paths(&[bad], OutputFormat::Plain, false, false).unwrap();
        assert_eq!(failed, ExitCode::FAILURE);
    }

    #[test]
    fn test_collect_sources_searches_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("contracts")).unwrap();
        fs::write(dir.path().join("contracts/a.clar"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        let extra = dir.path().join("extra.clar");

        let files = collect_sources(&[dir.path().to_path_buf(), extra.clone()]).unwrap();
        assert_eq!(files, vec![dir.path().join("contracts/a.clar"), extra]);
    }

    #[test]
    fn test_check_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_paths(&[dir.path().to_path_buf()], OutputFormat::Plain, false, false).unwrap_err();
        assert_eq!(err.message, "No .clar files found.");
    }

    #[test]
    fn test_render_blocks_rejects_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("blocks.json");
        fs::write(&file, "[]").unwrap();
        let err = render_blocks(&file).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);

        fs::write(&file, "{not json").unwrap();
        assert!(render_blocks(&file).unwrap_err().message.starts_with("Error parsing blocks"));
    }

    #[test]
    fn test_workspace_functions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("counter.clar"),
            "(define-public (increment) (ok u1))\n(define-read-only (get-count) (ok u0))\n",
        )
        .unwrap();
        let names: Vec<_> = workspace_functions(dir.path())
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["increment", "get-count"]);
    }
}
