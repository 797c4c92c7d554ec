//! Data blocks, items, and their values
//!
//!     A block is the unit the parser assembles: an ordered item map keyed
//!     by lowercased name, the loops declared over those items, and any save
//!     frames nested beneath the block. Scalar items and loop columns share
//!     the item map; the `Value` enum tells them apart.
//!
//!     The block also tracks the names claimed by merged save frames. A
//!     merged frame's name and item names share one namespace with the
//!     block's own name and items, and the merge check in the builder
//!     consults this set so that a name reused anywhere under one block is
//!     rejected.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::star::ast::loops::Loop;
use crate::star::ast::normalized_key;

/// Value of one item: a scalar, or the column of a loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Single(String),
    Column(Vec<String>),
}

impl Value {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Value::Single(s) => Some(s),
            Value::Column(_) => None,
        }
    }

    pub fn as_column(&self) -> Option<&[String]> {
        match self {
            Value::Single(_) => None,
            Value::Column(values) => Some(values),
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Value::Column(_))
    }
}

/// One named item with its original-case name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub value: Value,
}

/// A data block or save frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Heading text with the keyword prefix already stripped, original case
    pub name: String,
    items: IndexMap<String, Item>,
    loops: Vec<Loop>,
    frames: Vec<Block>,
    #[serde(skip)]
    merged_names: IndexSet<String>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Block {
            name: name.into(),
            items: IndexMap::new(),
            loops: Vec::new(),
            frames: Vec::new(),
            merged_names: IndexSet::new(),
        }
    }

    /// Look up an item by name, case-insensitively
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(&normalized_key(name))
    }

    /// Shorthand for the value of an item
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.item(name).map(|item| &item.value)
    }

    /// Item names in insertion order, original case
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.values().map(|item| item.name.as_str())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn frames(&self) -> &[Block] {
        &self.frames
    }

    /// Look up a nested save frame by name, case-insensitively
    pub fn frame(&self, name: &str) -> Option<&Block> {
        let key = normalized_key(name);
        self.frames.iter().find(|f| normalized_key(&f.name) == key)
    }

    /// Whether `name` is present as a scalar (non-loop) item
    pub fn has_scalar_item(&self, name: &str) -> bool {
        self.item(name)
            .is_some_and(|item| matches!(item.value, Value::Single(_)))
    }

    /// Reassemble the rows of a loop from its column items. Returns `None`
    /// when a named column is missing or is not a column value.
    pub fn loop_rows(&self, lp: &Loop) -> Option<Vec<Vec<&str>>> {
        let columns: Vec<&[String]> = lp
            .columns
            .iter()
            .map(|name| self.value(name).and_then(Value::as_column))
            .collect::<Option<_>>()?;
        let row_count = columns.first().map_or(0, |c| c.len());
        let rows = (0..row_count)
            .map(|i| {
                columns
                    .iter()
                    .filter_map(|col| col.get(i).map(String::as_str))
                    .collect()
            })
            .collect();
        Some(rows)
    }

    /// Insert or replace an item. The lowercased key decides identity; a
    /// replaced item keeps its original position in the order.
    pub(crate) fn insert_item(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        let key = normalized_key(&name);
        self.items.insert(key, Item { name, value });
    }

    pub(crate) fn push_loop(&mut self, lp: Loop) {
        self.loops.push(lp);
    }

    pub(crate) fn push_frame(&mut self, frame: Block) {
        self.frames.push(frame);
    }

    pub(crate) fn claim_merged_name(&mut self, key: String) {
        self.merged_names.insert(key);
    }

    /// Every name this block claims in a parent's namespace when merged as
    /// a save frame, as `(display name, lowercased key)` pairs: its own
    /// name, its item names, and everything its nested frames claimed.
    pub(crate) fn namespace_entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![(self.name.clone(), normalized_key(&self.name))];
        for (key, item) in &self.items {
            entries.push((item.name.clone(), key.clone()));
        }
        for key in &self.merged_names {
            entries.push((key.clone(), key.clone()));
        }
        entries
    }

    /// Whether a lowercased key is already taken in this block's namespace
    pub(crate) fn namespace_holds(&self, key: &str) -> bool {
        normalized_key(&self.name) == key
            || self.items.contains_key(key)
            || self.merged_names.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_lookup_is_case_insensitive() {
        let mut block = Block::new("test");
        block.insert_item("_Cell.Length", Value::Single("10.5".to_string()));
        assert_eq!(
            block.value("_cell.length").and_then(Value::as_single),
            Some("10.5")
        );
        assert_eq!(
            block.value("_CELL.LENGTH").and_then(Value::as_single),
            Some("10.5")
        );
        assert!(block.value("_cell.angle").is_none());
    }

    #[test]
    fn test_item_keeps_original_spelling() {
        let mut block = Block::new("test");
        block.insert_item("_Cell.Length", Value::Single("10.5".to_string()));
        assert_eq!(block.item_names().collect::<Vec<_>>(), vec!["_Cell.Length"]);
    }

    #[test]
    fn test_replacing_an_item_keeps_its_position() {
        let mut block = Block::new("test");
        block.insert_item("_a", Value::Single("1".to_string()));
        block.insert_item("_b", Value::Single("2".to_string()));
        block.insert_item("_A", Value::Single("3".to_string()));
        assert_eq!(block.item_names().collect::<Vec<_>>(), vec!["_A", "_b"]);
        assert_eq!(block.value("_a").and_then(Value::as_single), Some("3"));
    }

    #[test]
    fn test_has_scalar_item_ignores_loop_columns() {
        let mut block = Block::new("test");
        block.insert_item("_scalar", Value::Single("1".to_string()));
        block.insert_item("_column", Value::Column(vec!["1".to_string()]));
        assert!(block.has_scalar_item("_scalar"));
        assert!(!block.has_scalar_item("_column"));
        assert!(!block.has_scalar_item("_absent"));
    }

    #[test]
    fn test_loop_rows_transposes_columns() {
        let mut block = Block::new("test");
        block.insert_item(
            "_x",
            Value::Column(vec!["1".to_string(), "3".to_string()]),
        );
        block.insert_item(
            "_y",
            Value::Column(vec!["2".to_string(), "4".to_string()]),
        );
        let lp = Loop::new(vec!["_x".to_string(), "_y".to_string()]);
        assert_eq!(
            block.loop_rows(&lp),
            Some(vec![vec!["1", "2"], vec!["3", "4"]])
        );
    }

    #[test]
    fn test_loop_rows_requires_column_items() {
        let mut block = Block::new("test");
        block.insert_item("_x", Value::Single("1".to_string()));
        let lp = Loop::new(vec!["_x".to_string()]);
        assert_eq!(block.loop_rows(&lp), None);
    }

    #[test]
    fn test_frame_lookup() {
        let mut block = Block::new("outer");
        block.push_frame(Block::new("Inner"));
        assert!(block.frame("inner").is_some());
        assert!(block.frame("INNER").is_some());
        assert!(block.frame("other").is_none());
    }
}
