//! Item-set documents.
//!
//! # Format
//! ```json
//! {
//!     "Opium War": "1840 - 1842",
//!     "Wuchang Uprising": "1911"
//! }
//! ```
//!
//! Keys are the facts being tested, values their reference answers. Document
//! order is kept.

use crate::error::{ItemSetError, Result};
use crate::types::ItemSet;
use serde_json::{Map, Value};

/// Parse an item-set document.
pub fn parse(content: &str) -> Result<ItemSet> {
    if content.trim().is_empty() {
        return Ok(ItemSet::new());
    }

    let value: Value = serde_json::from_str(content)?;
    let Value::Object(entries) = value else {
        return Err(ItemSetError::NotAnObject);
    };

    let mut items = ItemSet::new();
    for (position, (id, answer)) in entries.into_iter().enumerate() {
        if id.trim().is_empty() {
            return Err(ItemSetError::BlankIdentifier { position });
        }
        let Value::String(answer) = answer else {
            return Err(ItemSetError::NonStringAnswer { item: id });
        };
        items.insert(id, answer);
    }
    Ok(items)
}

/// Render an item set as a pretty-printed document.
pub fn to_json(items: &ItemSet) -> String {
    let entries: Map<String, Value> = items
        .iter()
        .map(|item| (item.id.clone(), Value::String(item.answer.clone())))
        .collect();
    // a map of strings always serializes
    serde_json::to_string_pretty(&Value::Object(entries)).unwrap_or_else(|_| "{}".to_string())
}
