//! Document assembly and loop reconstruction
//!
//!     The parser recognizes structure; this module owns the document being
//!     built. `DocumentBuilder` hands out block handles and performs every
//!     mutation behind a small interface: create a block, add an item,
//!     register a loop, merge a finished sub-document or save frame, and
//!     finally release the document. All duplicate-name enforcement lives
//!     here, not in the parser.
//!
//! Duplicate checking
//!
//!     Item names are checked case-insensitively, but only against the
//!     block's scalar items. Loop columns arrive as a batch and are checked
//!     the same way, so a column colliding with an existing scalar is
//!     caught, while two loops sharing a column name are not; the second
//!     silently takes over the column. Catching cross-loop collisions would
//!     require comparing against every earlier loop at each insertion, and
//!     downstream consumers treat the item map as the source of truth
//!     anyway.
//!
//! Loop reconstruction
//!
//!     Loop values reach the builder as one flat stream in column-cycling
//!     order. `build_loop` deals them back out: value `i` belongs to column
//!     `i mod N`. The value count must divide evenly over the columns or
//!     the loop is rejected.

use crate::star::ast::{Block, Document, Loop, Value};
use crate::star::error::{ParseError, ParseResult};

/// Opaque reference to a block inside one builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHandle(usize);

/// Assembles one document over the course of a parse
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder::default()
    }

    /// Create a block and return its handle. Fails when a block of this
    /// name already exists, compared case-insensitively.
    pub fn new_block(&mut self, name: &str) -> ParseResult<BlockHandle> {
        if self.doc.contains_block(name) {
            return Err(ParseError::DuplicateName {
                name: name.to_string(),
            });
        }
        let index = self.doc.insert_block(Block::new(name));
        Ok(BlockHandle(index))
    }

    /// Insert an item into a block. With `precheck` set, a name already
    /// present as a scalar item is rejected; without it the insert
    /// overwrites.
    pub fn add_item(
        &mut self,
        handle: BlockHandle,
        name: &str,
        value: Value,
        precheck: bool,
    ) -> ParseResult<()> {
        let block = self.block_mut(handle);
        if precheck && block.has_scalar_item(name) {
            return Err(ParseError::DuplicateName {
                name: name.to_string(),
            });
        }
        block.insert_item(name, value);
        Ok(())
    }

    /// Register a loop over previously added column items. Every column
    /// must be present as a value list and all lists must have the same
    /// length.
    pub fn create_loop(&mut self, handle: BlockHandle, columns: Vec<String>) -> ParseResult<()> {
        let block = self.block_mut(handle);
        let mut length: Option<usize> = None;
        for i in 0..columns.len() {
            let found = block
                .value(&columns[i])
                .and_then(Value::as_column)
                .map(<[String]>::len);
            match (found, length) {
                (None, _) => return Err(ParseError::LoopArity { columns }),
                (Some(len), None) => length = Some(len),
                (Some(len), Some(expected)) if len != expected => {
                    return Err(ParseError::LoopArity { columns });
                }
                (Some(_), Some(_)) => {}
            }
        }
        block.push_loop(Loop::new(columns));
        Ok(())
    }

    /// Distribute a flat loop-value stream over its columns and register
    /// the loop: the column batch is added first, then the loop itself.
    pub fn install_loop(
        &mut self,
        handle: BlockHandle,
        columns: Vec<String>,
        values: Vec<String>,
    ) -> ParseResult<()> {
        let column_values = build_loop(&columns, values)?;
        for (name, list) in columns.iter().zip(column_values) {
            self.add_item(handle, name, Value::Column(list), true)?;
        }
        self.create_loop(handle, columns)
    }

    /// Merge a finished sub-document's blocks into this document. A block
    /// name already present, compared case-insensitively, is rejected.
    pub fn merge_document(&mut self, sub: Document) -> ParseResult<()> {
        for block in sub.blocks() {
            if self.doc.contains_block(&block.name) {
                return Err(ParseError::DuplicateName {
                    name: block.name.clone(),
                });
            }
        }
        self.doc.absorb(sub);
        Ok(())
    }

    /// Merge a finished save-frame document beneath a parent block.
    ///
    /// A merged frame's names enter the parent's namespace while the frame
    /// itself stays nested: the frame's own name, its item names, and
    /// everything its nested frames already claimed are all checked
    /// case-insensitively against the parent's name, the parent's items,
    /// and earlier claims, then recorded as claimed.
    pub fn merge_frame(&mut self, parent: BlockHandle, frame: Document) -> ParseResult<()> {
        for frame_block in frame.into_blocks() {
            let incoming = frame_block.namespace_entries();
            let parent_block = self.block_mut(parent);
            for (display, key) in &incoming {
                if parent_block.namespace_holds(key) {
                    return Err(ParseError::DuplicateName {
                        name: display.clone(),
                    });
                }
            }
            for (_, key) in incoming {
                parent_block.claim_merged_name(key);
            }
            parent_block.push_frame(frame_block);
        }
        Ok(())
    }

    /// Release the finished document to the caller
    pub fn finish(self) -> Document {
        self.doc
    }

    fn block_mut(&mut self, handle: BlockHandle) -> &mut Block {
        // Handles are only issued by new_block on this builder
        match self.doc.block_at_mut(handle.0) {
            Some(block) => block,
            None => unreachable!("stale block handle"),
        }
    }
}

/// Deal a flat value stream out over `columns`.
///
/// Every collected value counts, empty strings included: an empty quoted
/// value or empty text field at the end of the stream is data, not a
/// collection artifact. The count must be an exact multiple of the column
/// count.
pub fn build_loop(columns: &[String], values: Vec<String>) -> ParseResult<Vec<Vec<String>>> {
    if columns.is_empty() {
        return Err(ParseError::LoopArity {
            columns: Vec::new(),
        });
    }
    if values.len() % columns.len() != 0 {
        return Err(ParseError::LoopArity {
            columns: columns.to_vec(),
        });
    }
    let mut lists: Vec<Vec<String>> = (0..columns.len()).map(|_| Vec::new()).collect();
    for (i, value) in values.into_iter().enumerate() {
        lists[i % columns.len()].push(value);
    }
    Ok(lists)
}
