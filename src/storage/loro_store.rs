use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use loro::{LoroDoc, LoroMap, LoroValue, ValueOrContainer};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::Document;
use crate::entity::{Note, StoredNote};
use crate::error::{NotesError, Result};

const NOTEKEEPER_DIR: &str = ".notekeeper";
const LORO_DB: &str = "loro.db";

/// Name of the root map holding one document per note.
pub const NOTES_COLLECTION: &str = "notes";

/// Document store backed by a single Loro document on disk.
///
/// Every note lives in the `notes` map, keyed by its identifier. Each insert
/// is committed and flushed to the snapshot file before it returns.
pub struct LoroStore {
    doc: LoroDoc,
    path: PathBuf,
}

impl LoroStore {
    /// Initialize a new store under `root`
    pub fn init(root: &Path) -> Result<Self> {
        let dir = root.join(NOTEKEEPER_DIR);
        let path = dir.join(LORO_DB);

        if path.exists() {
            return Err(NotesError::AlreadyInitialized);
        }

        fs::create_dir_all(&dir).map_err(unavailable)?;

        let store = Self {
            doc: LoroDoc::new(),
            path,
        };
        store.save()?;

        info!(path = %store.path.display(), "initialized note store");
        Ok(store)
    }

    /// Open an existing store under `root`
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(NOTEKEEPER_DIR).join(LORO_DB);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(NotesError::NotInitialized)
            }
            Err(e) => return Err(unavailable(e)),
        };

        let doc = LoroDoc::new();
        doc.import(&bytes)?;

        debug!(path = %path.display(), "opened note store");
        Ok(Self { doc, path })
    }

    /// Open the store under `root`, creating it first if it does not exist
    pub fn open_or_init(root: &Path) -> Result<Self> {
        match Self::open(root) {
            Err(NotesError::NotInitialized) => Self::init(root),
            other => other,
        }
    }

    /// Write a snapshot of the document to disk
    pub fn save(&self) -> Result<()> {
        let bytes = self.doc.export(loro::ExportMode::Snapshot)?;
        fs::write(&self.path, bytes).map_err(unavailable)?;
        Ok(())
    }

    /// Flush the final snapshot and release the store
    pub fn close(self) -> Result<()> {
        self.save()?;
        debug!(path = %self.path.display(), "closed note store");
        Ok(())
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next sequence number to hand out for a note
    fn next_sequence_number(&self) -> Result<u32> {
        let meta = self.doc.get_map("_meta");
        let sequences = meta.get_or_create_container("type_sequences", LoroMap::new())?;

        let current = sequences
            .get(NOTES_COLLECTION)
            .and_then(|v| match v {
                ValueOrContainer::Value(LoroValue::I64(n)) => Some(n as u32),
                _ => None,
            })
            .unwrap_or(0);

        Ok(current + 1)
    }

    /// Persist a note as a new document and return its assigned identifier
    pub fn insert(&self, note: &Note) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let sequence_number = self.next_sequence_number()?;

        let notes = self.doc.get_map(NOTES_COLLECTION);
        let entity_map = notes.get_or_create_container(&id_str, LoroMap::new())?;

        entity_map.insert("id", id_str.clone())?;
        entity_map.insert("title", note.title.clone())?;
        entity_map.insert("description", note.description.clone())?;
        entity_map.insert("important", note.important)?;
        entity_map.insert("sequence_number", sequence_number as i64)?;
        entity_map.insert("created_at", chrono::Utc::now().to_rfc3339())?;

        let meta = self.doc.get_map("_meta");
        let sequences = meta.get_or_create_container("type_sequences", LoroMap::new())?;
        sequences.insert(NOTES_COLLECTION, sequence_number as i64)?;

        self.doc.commit();

        if let Err(e) = self.save() {
            self.undo_insert(&id_str, sequence_number - 1)?;
            warn!(%id, "insert rolled back: {}", e);
            return Err(e);
        }

        debug!(%id, sequence_number, "inserted note");
        Ok(id)
    }

    /// Remove a note that never reached disk and rewind the sequence counter
    fn undo_insert(&self, id_str: &str, previous_sequence: u32) -> Result<()> {
        let notes = self.doc.get_map(NOTES_COLLECTION);
        notes.delete(id_str)?;

        let meta = self.doc.get_map("_meta");
        let sequences = meta.get_or_create_container("type_sequences", LoroMap::new())?;
        sequences.insert(NOTES_COLLECTION, previous_sequence as i64)?;

        self.doc.commit();
        Ok(())
    }

    /// Fetch every note document, in insertion order
    pub fn find_all(&self) -> Result<Vec<Document>> {
        let notes_map = self.doc.get_map(NOTES_COLLECTION);
        let mut docs = Vec::new();

        if let LoroValue::Map(map) = notes_map.get_deep_value() {
            for (_, entity_value) in map.iter() {
                if let LoroValue::Map(entity_map) = entity_value {
                    docs.push(entity_map.clone());
                }
            }
        }

        docs.sort_by_key(sequence_of);
        Ok(docs)
    }

    /// Number of documents in the notes collection
    pub fn count(&self) -> usize {
        self.doc.get_map(NOTES_COLLECTION).len()
    }

    /// Get a note by identifier
    pub fn get(&self, id: &Uuid) -> Result<Option<StoredNote>> {
        let notes_map = self.doc.get_map(NOTES_COLLECTION);
        let id_str = id.to_string();

        if let LoroValue::Map(map) = notes_map.get_deep_value() {
            if let Some(LoroValue::Map(entity_map)) = map.get(&id_str) {
                return Ok(StoredNote::from_document(entity_map));
            }
        }
        Ok(None)
    }

    /// Every note that parses cleanly, in insertion order
    pub fn list_notes(&self) -> Result<Vec<StoredNote>> {
        Ok(self
            .find_all()?
            .iter()
            .filter_map(StoredNote::from_document)
            .collect())
    }

    /// Look a note up by sequence number or identifier prefix
    pub fn find(&self, key: &str) -> Result<Option<StoredNote>> {
        let notes = self.list_notes()?;

        let found = if let Ok(seq) = key.parse::<u32>() {
            notes.into_iter().find(|n| n.sequence_number == seq)
        } else {
            notes
                .into_iter()
                .find(|n| n.id.to_string().starts_with(key))
        };

        Ok(found)
    }
}

fn sequence_of(doc: &Document) -> i64 {
    match doc.get("sequence_number") {
        Some(LoroValue::I64(n)) => *n,
        _ => 0,
    }
}

fn unavailable(err: io::Error) -> NotesError {
    NotesError::StoreUnavailable(err.to_string())
}
