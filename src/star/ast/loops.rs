//! Loop descriptors
//!
//!     A loop is a table declared over a set of item columns. The columns
//!     themselves live in the owning block's item map as value lists; the
//!     descriptor records which columns belong together and in what order,
//!     which is all that is needed to reassemble rows.

use serde::{Deserialize, Serialize};

use crate::star::ast::normalized_key;

/// One loop: the ordered column names it was declared with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loop {
    pub columns: Vec<String>,
}

impl Loop {
    pub fn new(columns: Vec<String>) -> Self {
        Loop { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether `name` is one of this loop's columns, compared
    /// case-insensitively
    pub fn contains(&self, name: &str) -> bool {
        let key = normalized_key(name);
        self.columns.iter().any(|c| normalized_key(c) == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_case_insensitive() {
        let lp = Loop::new(vec!["_Atom.X".to_string(), "_Atom.Y".to_string()]);
        assert!(lp.contains("_atom.x"));
        assert!(lp.contains("_ATOM.Y"));
        assert!(!lp.contains("_atom.z"));
    }
}
