//! Projection of stored documents into the records handed to renderers.
//!
//! Projection is total: a document missing a key yields `None` for that
//! field instead of failing. Records are derived on every read.

use loro::LoroValue;
use serde::{Deserialize, Serialize};

use crate::storage::Document;

/// The externally facing shape of a stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub important: Option<bool>,
}

/// Project a single document. A missing identifier becomes an empty string.
pub fn project(doc: &Document) -> OutputRecord {
    OutputRecord {
        id: string_field(doc, "id").unwrap_or_default(),
        title: string_field(doc, "title"),
        description: string_field(doc, "description"),
        important: match doc.get("important") {
            Some(LoroValue::Bool(b)) => Some(*b),
            _ => None,
        },
    }
}

/// Project every document, keeping input order.
pub fn project_all<'a, I>(docs: I) -> Vec<OutputRecord>
where
    I: IntoIterator<Item = &'a Document>,
{
    docs.into_iter().map(project).collect()
}

fn string_field(doc: &Document, key: &str) -> Option<String> {
    match doc.get(key)? {
        LoroValue::String(s) => Some(s.to_string()),
        _ => None,
    }
}
