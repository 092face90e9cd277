//! LSP backend for Clarity documents

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::sync::{Mutex, RwLock, mpsc};
use tower_lsp::jsonrpc::{Error as RpcError, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::ServerConfig;
use crate::contracts::{self, Contract, FunctionInfo};
use crate::lsp::commands::{self, LspCommand};
use crate::lsp::completion::completion_items;
use crate::lsp::debounce::Debouncer;
use crate::lsp::diagnostics::{PositionEncoding, is_clarity_document, to_lsp_diagnostics};
use crate::lsp::session::Session;
use crate::testgen::{OpenAiBackend, TestGenError, TestGenerator};
use crate::toolchain::console::ConsoleLine;
use crate::toolchain::{ConsoleSession, Network, Toolchain, ToolchainCommand, ToolchainError};

/// Wait after starting the console before the first line is sent.
const CONSOLE_STARTUP: Duration = Duration::from_secs(3);
/// Wait between consecutive console inputs.
const CONSOLE_SETTLE: Duration = Duration::from_secs(2);

const CLARINET_MISSING: &str =
    "Clarinet is not installed or not in PATH. CLI commands will not work. Install Clarinet for full functionality.";

/// State shared by request handlers and debounced scan tasks.
#[derive(Clone)]
struct Shared {
    client: Client,
    session: Arc<RwLock<Session>>,
    config: Arc<RwLock<ServerConfig>>,
    root: Arc<RwLock<Option<PathBuf>>>,
    encoding: Arc<RwLock<PositionEncoding>>,
    console: Arc<Mutex<Option<ConsoleSession>>>,
    /// Held by a background send for its whole run so batches do not interleave.
    console_queue: Arc<Mutex<()>>,
}

/// Clarity Language Server
pub struct ClarityLanguageServer {
    shared: Shared,
    debouncer: Debouncer<Url>,
}

impl ClarityLanguageServer {
    pub fn new(client: Client) -> Self {
        let config = ServerConfig::default();
        Self {
            shared: Shared {
                client,
                session: Arc::new(RwLock::new(Session::new(&config.scan))),
                config: Arc::new(RwLock::new(config)),
                root: Arc::new(RwLock::new(None)),
                encoding: Arc::new(RwLock::new(PositionEncoding::default())),
                console: Arc::new(Mutex::new(None)),
                console_queue: Arc::new(Mutex::new(())),
            },
            debouncer: Debouncer::new(),
        }
    }

    pub fn session(&self) -> Arc<RwLock<Session>> {
        Arc::clone(&self.shared.session)
    }

    pub async fn config(&self) -> ServerConfig {
        self.shared.config.read().await.clone()
    }

    pub async fn workspace_root(&self) -> Option<PathBuf> {
        self.shared.root.read().await.clone()
    }
}

// ============================================================================
// Diagnostics and messages
// ============================================================================

impl Shared {
    async fn publish(&self, uri: Url, diagnostics: &[clarion_syntax::Diagnostic]) {
        let encoding = *self.encoding.read().await;
        let converted = {
            let session = self.session.read().await;
            to_lsp_diagnostics(session.document(&uri), encoding, diagnostics)
        };
        self.client.publish_diagnostics(uri, converted, None).await;
    }

    async fn scan_and_publish(&self, uri: &Url) {
        let found = self.session.write().await.rescan(uri);
        if let Some(found) = found {
            tracing::debug!(uri = %uri, found = found.len(), "published diagnostics");
            self.publish(uri.clone(), &found).await;
        }
    }

    async fn rescan_all(&self) {
        let all = self.session.write().await.rescan_all();
        for (uri, found) in all {
            self.publish(uri, &found).await;
        }
    }

    async fn clear(&self, uri: &Url) {
        let had = self.session.write().await.clear(uri);
        if had {
            self.publish(uri.clone(), &[]).await;
        }
    }

    async fn clear_all(&self) {
        let cleared = self.session.write().await.clear_all();
        for uri in cleared {
            self.publish(uri, &[]).await;
        }
    }

    async fn apply_config(&self, config: ServerConfig) {
        self.session.write().await.reconfigure(&config.scan);
        *self.config.write().await = config;
    }

    async fn info(&self, message: impl std::fmt::Display) {
        self.client.show_message(MessageType::INFO, message).await;
    }

    async fn warning(&self, message: impl std::fmt::Display) {
        self.client.show_message(MessageType::WARNING, message).await;
    }

    async fn error(&self, message: impl std::fmt::Display) {
        self.client.show_message(MessageType::ERROR, message).await;
    }

    /// Ask the user to pick one of `options`. A dismissed prompt (or a client without prompts) yields `None`.
    async fn pick(&self, message: &str, options: Vec<String>) -> Option<String> {
        let actions = options
            .into_iter()
            .map(|title| MessageActionItem {
                title,
                properties: Default::default(),
            })
            .collect();
        match self
            .client
            .show_message_request(MessageType::INFO, message, Some(actions))
            .await
        {
            Ok(choice) => choice.map(|c| c.title),
            Err(err) => {
                tracing::warn!(error = %err, "message request failed");
                None
            }
        }
    }

    async fn toolchain(&self) -> Toolchain {
        let executable = self.config.read().await.clarinet_path.clone();
        Toolchain::new(executable, self.root.read().await.clone())
    }
}

// ============================================================================
// Commands
// ============================================================================

impl Shared {
    async fn execute(&self, command: LspCommand) -> Option<Value> {
        match command {
            LspCommand::CheckDiagnostics { uri } => {
                match uri {
                    Some(uri) => self.scan_and_publish(&uri).await,
                    None => self.rescan_all().await,
                }
                self.info("Clarity diagnostics checked").await;
                None
            }
            LspCommand::ClearDiagnostics { uri } => {
                match uri {
                    Some(uri) => self.clear(&uri).await,
                    None => self.clear_all().await,
                }
                self.info("Clarity diagnostics cleared").await;
                None
            }
            LspCommand::ClearAllDiagnostics => {
                self.clear_all().await;
                None
            }
            LspCommand::AddBlock { kind } => {
                let id = self.session.write().await.blocks.add_block(&kind);
                Some(json!({ "id": id }))
            }
            LspCommand::AddChildBlock { parent, kind } => {
                let added = self.session.write().await.blocks.add_child(&parent, &kind);
                self.block_result(added.map(|id| json!({ "id": id }))).await
            }
            LspCommand::UpdateBlock { id, update } => {
                let updated = self.session.write().await.blocks.update(&id, update);
                self.block_result(updated.map(|()| json!({ "id": id }))).await
            }
            LspCommand::RemoveBlock { id } => {
                let removed = self.session.write().await.blocks.remove(&id);
                self.block_result(removed.map(|block| json!(block))).await
            }
            LspCommand::ListBlocks => Some(json!(self.session.read().await.blocks.blocks())),
            LspCommand::GenerateCode => {
                let code = self.session.read().await.blocks.generate_code();
                if code.trim().is_empty() {
                    self.warning("No blocks to generate code from. Add some blocks first!").await;
                    return None;
                }
                Some(json!({ "code": code, "languageId": "clarity" }))
            }
            LspCommand::ClearBlocks => {
                self.session.write().await.blocks.clear();
                None
            }
            LspCommand::GenerateTemplate => {
                self.run_toolchain(ToolchainCommand::new_project()).await;
                None
            }
            LspCommand::RunConsole => {
                if let Err(err) = self.ensure_console().await {
                    self.error(err).await;
                }
                None
            }
            LspCommand::SendToConsole { text } => {
                let lines: Vec<String> = text
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(str::to_string)
                    .collect();
                if let Err(err) = self.send_to_console(lines, "Failed to send to console").await {
                    self.error(err).await;
                }
                None
            }
            LspCommand::GenerateDeployment { network } => {
                let network = match network {
                    Some(network) => network,
                    None => self.pick_network().await?,
                };
                self.run_toolchain(ToolchainCommand::GenerateDeployment { network }).await;
                None
            }
            LspCommand::RunTest => {
                self.generate_tests().await;
                None
            }
            LspCommand::RunDeploy { function, values } => self.test_function(function, values).await,
        }
    }

    async fn block_result(&self, result: std::result::Result<Value, crate::blocks::BlockError>) -> Option<Value> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.error(err).await;
                None
            }
        }
    }

    async fn pick_network(&self) -> Option<Network> {
        let labels = Network::ALL.iter().map(|n| n.label().to_string()).collect();
        let choice = self.pick("Select network for deployment generation", labels).await?;
        choice.parse().ok()
    }

    async fn run_toolchain(&self, cmd: ToolchainCommand) {
        let toolchain = self.toolchain().await;
        if let Err(err) = toolchain.project_dir() {
            self.error(err).await;
            return;
        }
        self.info(format!("Running: {}", toolchain.command_line(&cmd))).await;
        match toolchain.run(&cmd).await {
            Ok(output) => {
                for line in output.stdout.lines().chain(output.stderr.lines()) {
                    self.client.log_message(MessageType::LOG, line).await;
                }
                self.info(format!("Finished: {}", output.command)).await;
            }
            Err(err) => self.error(err).await,
        }
    }

    /// Start the console unless it is already running. Returns whether a new process was started.
    async fn ensure_console(&self) -> std::result::Result<bool, ToolchainError> {
        let mut console = self.console.lock().await;
        if console.as_mut().is_some_and(ConsoleSession::is_running) {
            return Ok(false);
        }

        let toolchain = self.toolchain().await;
        let (tx, mut rx) = mpsc::unbounded_channel::<ConsoleLine>();
        let session = ConsoleSession::spawn(
            &toolchain,
            Arc::new(move |line| {
                let _ = tx.send(line);
            }),
        )?;

        let client = self.client.clone();
        tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                let kind = match line {
                    ConsoleLine::Stdout(_) => MessageType::LOG,
                    ConsoleLine::Stderr(_) => MessageType::WARNING,
                };
                client.log_message(kind, line.text()).await;
            }
        });

        self.info(format!("Running: {}", session.command())).await;
        *console = Some(session);
        Ok(true)
    }

    /// Start the console if needed, then send `lines` in order from a background task.
    ///
    /// Only a failure to start the console is returned; write failures are shown to the user as `context: error`.
    async fn send_to_console(
        &self,
        lines: Vec<String>,
        context: &'static str,
    ) -> std::result::Result<(), ToolchainError> {
        let started = self.ensure_console().await?;
        let shared = self.clone();
        tokio::spawn(async move {
            let _queue = shared.console_queue.lock().await;
            if started {
                tokio::time::sleep(CONSOLE_STARTUP).await;
            }
            if let Err(err) = shared.write_console_lines(&lines).await {
                shared.error(format!("{context}: {err}")).await;
            }
        });
        Ok(())
    }

    async fn write_console_lines(&self, lines: &[String]) -> std::result::Result<(), ToolchainError> {
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(CONSOLE_SETTLE).await;
            }
            let mut console = self.console.lock().await;
            match console.as_mut() {
                Some(session) => session.send(line).await?,
                None => return Err(ToolchainError::NoWorkspace),
            }
        }
        Ok(())
    }

    async fn generate_tests(&self) {
        let Some(root) = self.root.read().await.clone() else {
            self.error(ToolchainError::NoWorkspace).await;
            return;
        };
        let config = self.config.read().await.test_gen.clone();
        let backend = match OpenAiBackend::from_config(&config, |name| std::env::var(name).ok()) {
            Ok(backend) => backend,
            Err(err) => {
                self.error(err).await;
                return;
            }
        };
        let generator = TestGenerator::new(backend, config);

        let found = match generator.contracts(&root) {
            Ok(found) => found,
            Err(TestGenError::NoContracts) => {
                self.warning(TestGenError::NoContracts).await;
                return;
            }
            Err(err) => {
                self.error(format!("Failed to generate tests: {err}")).await;
                return;
            }
        };
        self.info(format!("Found {} contract(s). Generating tests...", found.len()))
            .await;

        let report = generator.generate_for(&root, &found).await;
        for (name, _) in &report.failures {
            self.warning(format!("Failed to generate test for {name}")).await;
        }
        self.info("Test generation completed! Check the tests/ folder.").await;
    }

    /// Define one function in the console, then call it with `values`.
    async fn test_function(&self, selector: Option<String>, values: Vec<String>) -> Option<Value> {
        let Some(root) = self.root.read().await.clone() else {
            self.error(ToolchainError::NoWorkspace).await;
            return None;
        };
        let found = match contracts::discover_contracts(&root) {
            Ok(found) => found,
            Err(err) => {
                self.error(format!("Failed to test functions: {err}")).await;
                return None;
            }
        };
        if found.is_empty() {
            self.warning("No .clar files found in the workspace.").await;
            return None;
        }
        let functions: Vec<(FunctionInfo, &Contract)> = found
            .iter()
            .flat_map(|c| contracts::parse_functions(&c.content, &c.path).into_iter().map(move |f| (f, c)))
            .collect();
        if functions.is_empty() {
            self.warning("No functions found in .clar files.").await;
            return None;
        }

        let selector = match selector {
            Some(selector) => selector,
            None => {
                let labels = functions.iter().map(|(f, _)| function_label(f)).collect();
                self.pick("Select a function to test", labels).await?
            }
        };
        let Some((func, contract)) = functions
            .iter()
            .find(|(f, _)| function_label(f) == selector)
            .or_else(|| functions.iter().find(|(f, _)| f.name == selector))
        else {
            self.error(format!("Function not found: {selector}")).await;
            return None;
        };

        if values.len() != func.parameters.len() {
            self.error(format!(
                "{} expects {} argument(s): {}",
                func.name,
                func.parameters.len(),
                func.signature
            ))
            .await;
            return None;
        }
        for (value, param) in values.iter().zip(&func.parameters) {
            if let Err(reason) = contracts::validate_parameter_value(value, &param.ty) {
                self.error(format!("{}: {reason}", param.name)).await;
                return None;
            }
        }
        let Some(definition) = contracts::extract_definition(&contract.content, &func.name) else {
            self.error(format!("Could not find function definition for {}", func.name))
                .await;
            return None;
        };

        let call = contracts::direct_call(&func.name, &values);
        if let Err(err) = self
            .send_to_console(vec![definition, call.clone()], "Failed to test function")
            .await
        {
            self.error(format!("Failed to test function: {err}")).await;
            return None;
        }
        Some(json!({ "function": function_label(func), "call": call }))
    }
}

fn function_label(func: &FunctionInfo) -> String {
    format!("{}.{}", func.contract_name, func.name)
}

fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    let from_folders = params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .and_then(|f| f.uri.to_file_path().ok());
    #[allow(deprecated)]
    let from_root_uri = || params.root_uri.as_ref().and_then(|u| u.to_file_path().ok());
    from_folders.or_else(from_root_uri)
}

#[tower_lsp::async_trait]
impl LanguageServer for ClarityLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        *self.shared.root.write().await = workspace_root(&params);
        let offered = params
            .capabilities
            .general
            .as_ref()
            .and_then(|g| g.position_encodings.as_deref());
        let encoding = PositionEncoding::negotiate(offered);
        *self.shared.encoding.write().await = encoding;
        if let Some(options) = &params.initialization_options {
            match ServerConfig::from_settings(options) {
                Ok(config) => self.shared.apply_config(config).await,
                Err(err) => tracing::warn!(error = %err, "ignoring invalid initializationOptions"),
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                position_encoding: Some(encoding.kind()),
                text_document_sync: Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                        include_text: Some(true),
                    })),
                    ..Default::default()
                })),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec!["(".to_string()]),
                    ..Default::default()
                }),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: commands::ALL.iter().map(|c| c.to_string()).collect(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "clarion-lsp".to_string(),
                version: Some(crate::version::CLARION_VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let toolchain = self.shared.toolchain().await;
        if !toolchain.is_available().await {
            tracing::warn!(executable = %toolchain.executable, "clarinet not available");
            self.shared.warning(CLARINET_MISSING).await;
        }
        self.shared
            .client
            .log_message(MessageType::INFO, "Clarity language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.debouncer.cancel_all().await;
        if let Some(console) = self.shared.console.lock().await.take() {
            console.shutdown().await;
        }
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        if !is_clarity_document(Some(&doc.language_id), &doc.uri) {
            return;
        }
        let found = self.shared.session.write().await.open(doc.uri.clone(), doc.text);
        self.shared.publish(doc.uri, &found).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        // FULL sync: the last change holds the whole text.
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        {
            let mut session = self.shared.session.write().await;
            if !session.is_open(&uri) {
                return;
            }
            session.set_text(uri.clone(), change.text);
        }

        let (delay, clear_on_change) = {
            let config = self.shared.config.read().await;
            (Duration::from_millis(config.debounce_ms), config.clear_on_change)
        };
        if clear_on_change {
            self.shared.clear(&uri).await;
        }

        let shared = self.shared.clone();
        self.debouncer
            .schedule(uri.clone(), delay, async move {
                shared.scan_and_publish(&uri).await;
            })
            .await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        if !self.shared.session.read().await.is_open(&uri) {
            return;
        }
        self.debouncer.cancel(&uri).await;
        if let Some(text) = params.text {
            self.shared.session.write().await.set_text(uri.clone(), text);
        }
        self.shared.scan_and_publish(&uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.debouncer.cancel(&uri).await;
        self.shared.session.write().await.close(&uri);
        self.shared.publish(uri, &[]).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        match ServerConfig::from_settings(&params.settings) {
            Ok(config) => {
                self.shared.apply_config(config).await;
                self.shared.rescan_all().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring invalid configuration");
                self.shared
                    .client
                    .log_message(MessageType::WARNING, format!("Invalid Clarity settings: {err}"))
                    .await;
            }
        }
    }

    async fn completion(&self, _: CompletionParams) -> Result<Option<CompletionResponse>> {
        Ok(Some(CompletionResponse::Array(completion_items())))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        tracing::info!(command = %params.command, "execute command");
        let command =
            LspCommand::parse(&params.command, params.arguments).map_err(|e| RpcError::invalid_params(e.to_string()))?;
        Ok(self.shared.execute(command).await)
    }
}
