//! Draft Clarinet test files for every contract in a workspace.
//!
//! Each contract is sent to a chat-completion backend with a fixed prompt; the reply is cleaned up and written to
//! `<root>/tests/<contract>.test.ts`.
//!
//! ## Notes
//! - A failure for one contract is recorded in the report and the run moves on to the next contract.
//! - Missing credentials and an empty workspace fail the whole run before any request is sent.

pub mod client;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::TestGenConfig;
use crate::contracts::{self, Contract, ContractError};

pub use client::{ChatMessage, ChatRequest, CompletionBackend, OpenAiBackend};

pub const SYSTEM_PROMPT: &str = "You are an expert Clarity smart contract developer and tester. Generate comprehensive \
test cases for Clarity contracts using the Clarinet testing framework.";

pub const CLARINET_IMPORT: &str =
    r#"import { Clarinet, Tx, Chain, Account, types } from "https://deno.land/x/clarinet@v1.0.0/index.ts";"#;

/// Wrapper for replies that hold bare test code; `{body}` is replaced with the code.
const GENERATED_SUITE: &str = concat!(
    "Clarinet.test({\n",
    "  name: \"Generated test suite\",\n",
    "  async fn(chain: Chain, accounts: Map<string, Account>) {\n",
    "    {body}\n",
    "  },\n",
    "});",
);

pub const TESTS_DIR: &str = "tests";

#[derive(Debug, Error)]
pub enum TestGenError {
    #[error("OpenAI API key not configured. Set OPENAI_API_KEY or the testGen.apiKey setting.")]
    MissingApiKey,

    #[error("No .clar files found in the workspace.")]
    NoContracts,

    #[error(transparent)]
    Contracts(#[from] ContractError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion endpoint returned no content")]
    EmptyResponse,

    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The user prompt for one contract.
pub fn user_prompt(contract: &Contract) -> String {
    format!(
        "Generate comprehensive test cases for this Clarity smart contract:

Contract Name: {name}
Contract Code:
```clarity
{content}
```

Please generate test cases that cover:
1. All public functions with various input scenarios
2. Edge cases and error conditions
3. State changes and data validation
4. Access control and authorization
5. Integration scenarios

Use the Clarinet testing framework format with:
- `clarinet test` command structure
- Proper test descriptions
- Mock data and scenarios
- Assertions for expected outcomes
- Error case testing

Format the output as a complete test file that can be saved as `{name}.test.ts` in the tests/ folder.

Include imports, test setup, and comprehensive test coverage.",
        name = contract.name,
        content = contract.content,
    )
}

/// Turn a model reply into a test file.
///
/// Markdown fences are removed. Code without a `Clarinet.test` call is wrapped in a generated suite, then the
/// Clarinet import is added at the top if the text does not already import it.
pub fn clean_generated(text: &str) -> String {
    let mut cleaned = strip_fences(text);

    if !cleaned.contains("Clarinet.test") {
        cleaned = GENERATED_SUITE.replace("{body}", &cleaned);
    }
    if !cleaned.contains("import { Clarinet") {
        cleaned = format!("{CLARINET_IMPORT}\n\n{cleaned}");
    }
    cleaned
}

fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find("```") {
        out.push_str(&rest[..at]);
        rest = &rest[at + 3..];
        rest = rest.strip_prefix("typescript").unwrap_or(rest);
        rest = rest.strip_prefix('\n').unwrap_or(rest);
    }
    out.push_str(rest);
    out
}

// ============================================================================
// Generator
// ============================================================================

#[derive(Debug, Default)]
pub struct TestGenReport {
    pub written: Vec<PathBuf>,
    /// `(contract name, error)` for every contract that produced no file.
    pub failures: Vec<(String, TestGenError)>,
}

pub struct TestGenerator<B> {
    backend: B,
    config: TestGenConfig,
}

impl<B: CompletionBackend> TestGenerator<B> {
    pub fn new(backend: B, config: TestGenConfig) -> Self {
        Self { backend, config }
    }

    /// Contracts under `root`; an empty workspace is an error.
    pub fn contracts(&self, root: &Path) -> Result<Vec<Contract>, TestGenError> {
        let found = contracts::discover_contracts(root)?;
        if found.is_empty() {
            return Err(TestGenError::NoContracts);
        }
        Ok(found)
    }

    pub async fn generate(&self, root: &Path) -> Result<TestGenReport, TestGenError> {
        let found = self.contracts(root)?;
        Ok(self.generate_for(root, &found).await)
    }

    /// One request per contract, in order.
    pub async fn generate_for(&self, root: &Path, contracts: &[Contract]) -> TestGenReport {
        let mut report = TestGenReport::default();
        for contract in contracts {
            match self.generate_one(root, contract).await {
                Ok(path) => {
                    tracing::info!(contract = %contract.name, path = %path.display(), "test file written");
                    report.written.push(path);
                }
                Err(err) => {
                    tracing::warn!(contract = %contract.name, error = %err, "test generation failed");
                    report.failures.push((contract.name.clone(), err));
                }
            }
        }
        report
    }

    async fn generate_one(&self, root: &Path, contract: &Contract) -> Result<PathBuf, TestGenError> {
        let reply = self.backend.complete(&self.request(contract)).await?;

        let dir = root.join(TESTS_DIR);
        let path = dir.join(format!("{}.test.ts", contract.name));
        let io = |source| TestGenError::Io {
            path: path.clone(),
            source,
        };
        tokio::fs::create_dir_all(&dir).await.map_err(io)?;
        tokio::fs::write(&path, clean_generated(&reply)).await.map_err(io)?;
        Ok(path)
    }

    fn request(&self, contract: &Contract) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_prompt(contract))],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}
