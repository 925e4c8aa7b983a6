use std::path::Path;

use serde_json::{Map, Value};

use super::ServeArgs;
use crate::config::ServeConfig;
use crate::entity::{Note, StoredNote};
use crate::error::{NotesError, Result};
use crate::projection::project_all;
use crate::storage::LoroStore;
use crate::web;

pub fn handle_init(root: &Path) -> Result<()> {
    let store = LoroStore::init(root)?;

    println!("Initialized notekeeper store in {}", store.path().display());
    Ok(())
}

pub fn handle_serve(root: &Path, args: ServeArgs) -> Result<()> {
    let config = ServeConfig::new(args.bind, root.to_path_buf(), args.static_dir);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(web::run(config))
}

pub fn handle_add(
    root: &Path,
    title: String,
    description: String,
    important: Option<String>,
    json: bool,
) -> Result<()> {
    let store = LoroStore::open(root)?;

    let mut fields = Map::new();
    fields.insert("title".to_string(), Value::String(title));
    fields.insert("description".to_string(), Value::String(description));
    if let Some(important) = important {
        fields.insert("important".to_string(), Value::String(important));
    }
    let note = Note::from_fields(&fields)?;

    let id = store.insert(&note)?;

    if json {
        match store.get(&id)? {
            Some(stored) => println!("{}", serde_json::to_string_pretty(&stored)?),
            None => return Err(NotesError::NoteNotFound(id.to_string())),
        }
    } else {
        let marker = if note.important { " (important)" } else { "" };
        println!("Added note {}: {}{}", &id.to_string()[..7], note.title, marker);
    }

    Ok(())
}

pub fn handle_list(root: &Path, json: bool) -> Result<()> {
    let store = LoroStore::open(root)?;
    let records = project_all(&store.find_all()?);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No notes found.");
    } else {
        println!("Notes:\n");
        for r in records {
            let flag = if r.important == Some(true) { "!" } else { " " };
            let short_id = r.id.get(..7).unwrap_or(&r.id);
            println!(
                "  {} ({}) {}",
                flag,
                short_id,
                r.title.as_deref().unwrap_or("(untitled)")
            );
        }
    }

    Ok(())
}

pub fn handle_get(root: &Path, id: String, json: bool) -> Result<()> {
    let store = LoroStore::open(root)?;

    let Some(stored) = store.find(&id)? else {
        return Err(NotesError::NoteNotFound(id));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stored)?);
    } else {
        print_note(&stored);
    }

    Ok(())
}

fn print_note(stored: &StoredNote) {
    println!("Note {:03} ({})", stored.sequence_number, stored.id);
    println!("Title: {}", stored.note.title);
    println!("Important: {}", if stored.note.important { "yes" } else { "no" });
    println!("Created: {}", stored.created_at.format("%Y-%m-%d %H:%M"));
    if !stored.note.description.is_empty() {
        println!("\n{}", stored.note.description);
    }
}
