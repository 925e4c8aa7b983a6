pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod projection;
pub mod storage;
pub mod web;

pub use entity::{normalize_important, Note, StoredNote, ValidationError};
pub use error::{NotesError, Result};
pub use projection::{project, project_all, OutputRecord};
pub use storage::{Document, LoroStore};
