mod note;

pub use note::{normalize_important, Note, ValidationError};

use chrono::{DateTime, Utc};
use loro::LoroValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Document;

/// A note as persisted, with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNote {
    pub id: Uuid,
    #[serde(flatten)]
    pub note: Note,
    pub sequence_number: u32,
    pub created_at: DateTime<Utc>,
}

impl StoredNote {
    /// Strictly parse a stored document. Returns `None` if any field is
    /// missing or has the wrong type.
    pub fn from_document(map: &Document) -> Option<Self> {
        let id = match map.get("id")? {
            LoroValue::String(s) => s.parse().ok()?,
            _ => return None,
        };
        let title = match map.get("title")? {
            LoroValue::String(s) => s.to_string(),
            _ => return None,
        };
        let description = match map.get("description")? {
            LoroValue::String(s) => s.to_string(),
            _ => return None,
        };
        let important = match map.get("important")? {
            LoroValue::Bool(b) => *b,
            _ => return None,
        };
        let sequence_number = match map.get("sequence_number")? {
            LoroValue::I64(n) => u32::try_from(*n).ok()?,
            _ => return None,
        };
        let created_at = match map.get("created_at")? {
            LoroValue::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()?
                .with_timezone(&Utc),
            _ => return None,
        };

        Some(Self {
            id,
            note: Note {
                title,
                description,
                important,
            },
            sequence_number,
            created_at,
        })
    }
}
