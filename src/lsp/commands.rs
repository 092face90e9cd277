//! `workspace/executeCommand` names and argument decoding.
//!
//! Arguments arrive as a JSON array. Each command reads them positionally; trailing optional arguments may be
//! omitted or `null`.

use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tower_lsp::lsp_types::Url;

use crate::blocks::BlockUpdate;
use crate::toolchain::Network;

pub const CHECK_DIAGNOSTICS: &str = "clarity.checkDiagnostics";
pub const CLEAR_DIAGNOSTICS: &str = "clarity.clearDiagnostics";
pub const CLEAR_ALL_DIAGNOSTICS: &str = "clarity.clearAllDiagnostics";
pub const ADD_BLOCK: &str = "clarity.addBlock";
pub const ADD_CHILD_BLOCK: &str = "clarity.addChildBlock";
pub const UPDATE_BLOCK: &str = "clarity.updateBlock";
pub const REMOVE_BLOCK: &str = "clarity.removeBlock";
pub const LIST_BLOCKS: &str = "clarity.listBlocks";
pub const GENERATE_CODE: &str = "clarity.generateCode";
pub const CLEAR_BLOCKS: &str = "clarity.clearBlocks";
pub const GENERATE_TEMPLATE: &str = "clarity.generateTemplate";
pub const RUN_CONSOLE: &str = "clarity.runConsole";
pub const SEND_TO_CONSOLE: &str = "clarity.sendToConsole";
pub const GENERATE_DEPLOYMENT: &str = "clarity.generateDeployment";
pub const RUN_TEST: &str = "clarity.runTest";
pub const RUN_DEPLOY: &str = "clarity.runDeploy";

/// Every command the server advertises.
pub const ALL: &[&str] = &[
    CHECK_DIAGNOSTICS,
    CLEAR_DIAGNOSTICS,
    CLEAR_ALL_DIAGNOSTICS,
    ADD_BLOCK,
    ADD_CHILD_BLOCK,
    UPDATE_BLOCK,
    REMOVE_BLOCK,
    LIST_BLOCKS,
    GENERATE_CODE,
    CLEAR_BLOCKS,
    GENERATE_TEMPLATE,
    RUN_CONSOLE,
    SEND_TO_CONSOLE,
    GENERATE_DEPLOYMENT,
    RUN_TEST,
    RUN_DEPLOY,
];

#[derive(Debug, Clone, PartialEq)]
pub enum LspCommand {
    /// Rescan one document, or every open one.
    CheckDiagnostics { uri: Option<Url> },
    ClearDiagnostics { uri: Option<Url> },
    ClearAllDiagnostics,
    AddBlock { kind: String },
    AddChildBlock { parent: String, kind: String },
    UpdateBlock { id: String, update: BlockUpdate },
    RemoveBlock { id: String },
    ListBlocks,
    GenerateCode,
    ClearBlocks,
    GenerateTemplate,
    RunConsole,
    SendToConsole { text: String },
    /// Without a network the user is asked to pick one.
    GenerateDeployment { network: Option<Network> },
    RunTest,
    /// Test one function in the console. `function` is `name` or `contract.name`; without it the user picks one.
    RunDeploy {
        function: Option<String>,
        values: Vec<String>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("{command}: missing argument '{name}'")]
    MissingArgument { command: String, name: &'static str },

    #[error("{command}: invalid argument '{name}': {reason}")]
    InvalidArgument {
        command: String,
        name: &'static str,
        reason: String,
    },
}

struct Args<'a> {
    command: &'a str,
    values: VecDeque<Value>,
}

impl Args<'_> {
    fn optional<T: DeserializeOwned>(&mut self, name: &'static str) -> Result<Option<T>, CommandError> {
        match self.values.pop_front() {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| CommandError::InvalidArgument {
                    command: self.command.to_string(),
                    name,
                    reason: e.to_string(),
                }),
        }
    }

    fn required<T: DeserializeOwned>(&mut self, name: &'static str) -> Result<T, CommandError> {
        self.optional(name)?.ok_or_else(|| CommandError::MissingArgument {
            command: self.command.to_string(),
            name,
        })
    }

    fn optional_network(&mut self) -> Result<Option<Network>, CommandError> {
        let Some(text) = self.optional::<String>("network")? else {
            return Ok(None);
        };
        text.parse().map(Some).map_err(|reason| CommandError::InvalidArgument {
            command: self.command.to_string(),
            name: "network",
            reason,
        })
    }
}

impl LspCommand {
    pub fn parse(command: &str, arguments: Vec<Value>) -> Result<Self, CommandError> {
        let mut args = Args {
            command,
            values: arguments.into(),
        };
        let parsed = match command {
            CHECK_DIAGNOSTICS => LspCommand::CheckDiagnostics {
                uri: args.optional("uri")?,
            },
            CLEAR_DIAGNOSTICS => LspCommand::ClearDiagnostics {
                uri: args.optional("uri")?,
            },
            CLEAR_ALL_DIAGNOSTICS => LspCommand::ClearAllDiagnostics,
            ADD_BLOCK => LspCommand::AddBlock {
                kind: args.required("kind")?,
            },
            ADD_CHILD_BLOCK => LspCommand::AddChildBlock {
                parent: args.required("parent")?,
                kind: args.required("kind")?,
            },
            UPDATE_BLOCK => LspCommand::UpdateBlock {
                id: args.required("id")?,
                update: args.required("update")?,
            },
            REMOVE_BLOCK => LspCommand::RemoveBlock {
                id: args.required("id")?,
            },
            LIST_BLOCKS => LspCommand::ListBlocks,
            GENERATE_CODE => LspCommand::GenerateCode,
            CLEAR_BLOCKS => LspCommand::ClearBlocks,
            GENERATE_TEMPLATE => LspCommand::GenerateTemplate,
            RUN_CONSOLE => LspCommand::RunConsole,
            SEND_TO_CONSOLE => LspCommand::SendToConsole {
                text: args.required("text")?,
            },
            GENERATE_DEPLOYMENT => LspCommand::GenerateDeployment {
                network: args.optional_network()?,
            },
            RUN_TEST => LspCommand::RunTest,
            RUN_DEPLOY => LspCommand::RunDeploy {
                function: args.optional("function")?,
                values: args.optional("values")?.unwrap_or_default(),
            },
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(parsed)
    }
}
