//! Visual block editor: a tree of code templates rendered to Clarity source.
//!
//! A [`BlockEditor`] belongs to one session (the language server owns one per connection, the CLI builds one from a
//! saved JSON list). Blocks get ids `block_<n>` from the editor's own counter, so ids are unique per editor.
//!
//! ## Examples
//! ```rust
//! use clarion::blocks::BlockEditor;
//!
//! let mut editor = BlockEditor::new();
//! let id = editor.add_block("constant");
//! editor.set_parameter(&id, "CONSTANT-NAME", "MAX-SUPPLY").unwrap();
//! editor.set_parameter(&id, "value", "u1000000").unwrap();
//! assert_eq!(editor.generate_code(), "(define-constant MAX-SUPPLY u1000000)");
//! ```
//!
//! ## Notes
//! - Code generation walks the tree in pre-order: each block is followed by its children. Rendered blocks are
//!   joined by one blank line.
//! - An unknown kind name still creates a block (a `function` block holding a comment) rather than failing.

pub mod templates;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type BlockId = String;

// ============================================================================
// Kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Function,
    Constant,
    Variable,
    Map,
    Condition,
    Operation,
    Loop,
}

impl BlockKind {
    pub const ALL: [BlockKind; 7] = [
        BlockKind::Function,
        BlockKind::Constant,
        BlockKind::Variable,
        BlockKind::Map,
        BlockKind::Condition,
        BlockKind::Operation,
        BlockKind::Loop,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Function => "function",
            BlockKind::Constant => "constant",
            BlockKind::Variable => "variable",
            BlockKind::Map => "map",
            BlockKind::Condition => "condition",
            BlockKind::Operation => "operation",
            BlockKind::Loop => "loop",
        }
    }

    /// Codicon shown next to the block in tree views.
    pub fn icon(self) -> &'static str {
        match self {
            BlockKind::Function => "symbol-method",
            BlockKind::Constant => "symbol-constant",
            BlockKind::Variable => "symbol-variable",
            BlockKind::Map => "symbol-array",
            BlockKind::Condition => "symbol-boolean",
            BlockKind::Operation => "symbol-operator",
            BlockKind::Loop => "symbol-event",
        }
    }
}

// ============================================================================
// Blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub label: String,
    pub code: String,
    #[serde(default)]
    pub children: Vec<Block>,
    #[serde(default)]
    pub parameters: Vec<BlockParameter>,
}

impl Block {
    /// This block's code with every parameter placeholder substituted.
    ///
    /// A parameter without a value (or with an empty one) renders as its own name.
    pub fn render(&self) -> String {
        self.parameters.iter().fold(self.code.clone(), |code, p| {
            let value = p.value.as_deref().filter(|v| !v.is_empty()).unwrap_or(&p.name);
            code.replace(&format!("{{{}}}", p.name), value)
        })
    }

    fn find(&self, id: &str) -> Option<&Block> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Block> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    fn render_into(&self, out: &mut Vec<String>) {
        out.push(self.render());
        for child in &self.children {
            child.render_into(out);
        }
    }

    fn max_id(&self) -> u64 {
        self.children
            .iter()
            .map(Block::max_id)
            .fold(id_number(&self.id).unwrap_or(0), u64::max)
    }
}

fn id_number(id: &str) -> Option<u64> {
    id.strip_prefix("block_")?.parse().ok()
}

/// Fields replaced by [`BlockEditor::update`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockUpdate {
    pub label: Option<String>,
    pub code: Option<String>,
    pub parameters: Option<Vec<BlockParameter>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("Block not found: {0}")]
    NotFound(BlockId),

    #[error("Block {block} has no parameter named '{name}'")]
    UnknownParameter { block: BlockId, name: String },
}

// ============================================================================
// Editor
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockEditor {
    blocks: Vec<Block>,
    next_id: u64,
}

impl BlockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an editor from a saved block list. New ids continue after the highest existing `block_<n>`.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let next_id = blocks.iter().map(Block::max_id).max().unwrap_or(0);
        Self { blocks, next_id }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Append a top-level block of the named kind.
    pub fn add_block(&mut self, kind: &str) -> BlockId {
        let block = self.new_block(kind);
        let id = block.id.clone();
        self.blocks.push(block);
        id
    }

    pub fn add_child(&mut self, parent: &str, kind: &str) -> Result<BlockId, BlockError> {
        if self.find(parent).is_none() {
            return Err(BlockError::NotFound(parent.to_string()));
        }
        let block = self.new_block(kind);
        let id = block.id.clone();
        self.find_mut(parent)
            .ok_or_else(|| BlockError::NotFound(parent.to_string()))?
            .children
            .push(block);
        Ok(id)
    }

    pub fn find(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find_map(|b| b.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find_map(|b| b.find_mut(id))
    }

    pub fn update(&mut self, id: &str, update: BlockUpdate) -> Result<(), BlockError> {
        let block = self.find_mut(id).ok_or_else(|| BlockError::NotFound(id.to_string()))?;
        if let Some(label) = update.label {
            block.label = label;
        }
        if let Some(code) = update.code {
            block.code = code;
        }
        if let Some(parameters) = update.parameters {
            block.parameters = parameters;
        }
        Ok(())
    }

    pub fn set_parameter(&mut self, id: &str, name: &str, value: impl Into<String>) -> Result<(), BlockError> {
        let block = self.find_mut(id).ok_or_else(|| BlockError::NotFound(id.to_string()))?;
        let param = block
            .parameters
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| BlockError::UnknownParameter {
                block: id.to_string(),
                name: name.to_string(),
            })?;
        param.value = Some(value.into());
        Ok(())
    }

    /// Remove a block (and its children) from anywhere in the tree.
    pub fn remove(&mut self, id: &str) -> Result<Block, BlockError> {
        remove_from(&mut self.blocks, id).ok_or_else(|| BlockError::NotFound(id.to_string()))
    }

    /// Drop every block. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn generate_code(&self) -> String {
        let mut rendered = Vec::new();
        for block in &self.blocks {
            block.render_into(&mut rendered);
        }
        rendered.join("\n\n")
    }

    fn new_block(&mut self, kind: &str) -> Block {
        self.next_id += 1;
        let (kind, template) = match BlockKind::from_name(kind) {
            Some(k) => (k, templates::template(k)),
            None => {
                tracing::debug!(kind, "unknown block kind, using fallback template");
                (BlockKind::Function, &templates::FALLBACK)
            }
        };
        Block {
            id: format!("block_{}", self.next_id),
            kind,
            label: template.label.to_string(),
            code: template.code.to_string(),
            children: Vec::new(),
            parameters: template
                .parameters
                .iter()
                .map(|&(name, ty, value)| BlockParameter {
                    name: name.to_string(),
                    ty: ty.to_string(),
                    value: value.map(str::to_string),
                })
                .collect(),
        }
    }
}

fn remove_from(blocks: &mut Vec<Block>, id: &str) -> Option<Block> {
    if let Some(pos) = blocks.iter().position(|b| b.id == id) {
        return Some(blocks.remove(pos));
    }
    blocks.iter_mut().find_map(|b| remove_from(&mut b.children, id))
}
