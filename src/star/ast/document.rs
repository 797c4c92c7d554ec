//! The root document: an ordered, case-insensitively keyed block collection

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::star::ast::block::Block;
use crate::star::ast::normalized_key;

/// A parsed STAR/CIF document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    blocks: IndexMap<String, Block>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Look up a block by name, case-insensitively
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.get(&normalized_key(name))
    }

    /// Whether a block with this name exists, compared case-insensitively
    pub fn contains_block(&self, name: &str) -> bool {
        self.blocks.contains_key(&normalized_key(name))
    }

    /// Block names in document order, original case
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.values().map(|block| block.name.as_str())
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Block by position in document order
    pub fn block_at(&self, index: usize) -> Option<&Block> {
        self.blocks.get_index(index).map(|(_, block)| block)
    }

    pub(crate) fn block_at_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_index_mut(index).map(|(_, block)| block)
    }

    /// Insert a block, returning its position. The caller has already
    /// checked for a name collision.
    pub(crate) fn insert_block(&mut self, block: Block) -> usize {
        let key = normalized_key(&block.name);
        let (index, _) = self.blocks.insert_full(key, block);
        index
    }

    /// Move all blocks of `other` into this document, in order
    pub(crate) fn absorb(&mut self, other: Document) {
        for (key, block) in other.blocks {
            self.blocks.insert(key, block);
        }
    }

    pub(crate) fn into_blocks(self) -> impl Iterator<Item = Block> {
        self.blocks.into_values()
    }
}
