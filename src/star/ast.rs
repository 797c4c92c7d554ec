//! Document model for parsed STAR/CIF data
//!
//!     A parsed document is an ordered collection of named data blocks. Each
//!     block carries its scalar items and loop columns in one ordered item
//!     map, a registry of the loops declared over those columns, and the
//!     save frames nested beneath it. Frames are blocks themselves, owned by
//!     their parent block rather than flattened into a global namespace, so
//!     the document forms a tree.
//!
//! Name handling
//!
//!     STAR names are case-insensitive but case-preserving: `_Cell.Length`
//!     and `_cell.length` are the same item, and whichever spelling appeared
//!     in the source is the one shown back to the caller. Every map in this
//!     module is therefore keyed by a lowercased twin of the name while the
//!     entry keeps the original spelling. Insertion order is preserved
//!     throughout, which is why the maps come from `indexmap` rather than
//!     the standard library.
//!
//!     Item names keep their leading underscore (`_cell.length`), block and
//!     frame names are stored without their keyword prefix (`data_foo`
//!     becomes `foo`).

pub mod block;
pub mod document;
pub mod loops;

pub use block::{Block, Item, Value};
pub use document::Document;
pub use loops::Loop;

/// Lowercased twin of a name, used as the lookup key in all ordered maps
pub(crate) fn normalized_key(name: &str) -> String {
    name.to_lowercase()
}
