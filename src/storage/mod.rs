mod loro_store;

pub use loro_store::{LoroStore, NOTES_COLLECTION};

/// A raw stored document: the deep value of one entry in the notes map.
pub type Document = loro::LoroMapValue;
