//! Request handlers and the per-endpoint request parsing they rely on.

use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::{Form, Json};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::error::WebError;
use super::render;
use super::AppState;
use crate::entity::Note;
use crate::error::{NotesError, Result};
use crate::projection::{project_all, OutputRecord};
use crate::storage::LoroStore;

/// Everything the list page needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListView {
    pub notes: Vec<OutputRecord>,
    pub message: Option<String>,
}

/// Fetch and project all notes for the list page.
pub fn list_view(store: &LoroStore, message: Option<String>) -> Result<ListView> {
    let docs = store.find_all()?;
    Ok(ListView {
        notes: project_all(&docs),
        message,
    })
}

/// Value of the last occurrence of `key`, matching how repeated fields collapse.
fn last_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// Status message shown above the list, passed through unvalidated.
pub fn parse_list_query(pairs: &[(String, String)]) -> Option<String> {
    last_value(pairs, "message")
}

/// Turn submitted form pairs into a field map. Later duplicates overwrite
/// earlier ones.
pub fn fields_from_form(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.insert(key, Value::String(value));
    }
    fields
}

/// `q` as it arrived: a single value or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

/// Collect every `q` parameter. No `q` at all is an empty list.
pub fn parse_item_query(pairs: Vec<(String, String)>) -> QueryValue {
    let mut values: Vec<String> = pairs
        .into_iter()
        .filter(|(k, _)| k == "q")
        .map(|(_, v)| v)
        .collect();

    match values.len() {
        1 => QueryValue::One(values.remove(0)),
        _ => QueryValue::Many(values),
    }
}

/// Response body of the item lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemEcho {
    pub item_id: i64,
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub q: QueryValue,
}

fn type_name_of<T>(_: &T) -> &'static str {
    std::any::type_name::<T>()
}

pub async fn list_notes(
    State(state): State<AppState>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> std::result::Result<Html<String>, WebError> {
    let Query(pairs) = query?;
    let message = parse_list_query(&pairs);
    let view = {
        let store = state.store.lock().await;
        list_view(&store, message)?
    };
    debug!(count = view.notes.len(), "rendering note list");
    Ok(Html(render::index_page(&view)))
}

pub async fn submit_note(
    State(state): State<AppState>,
    form: std::result::Result<Form<Vec<(String, String)>>, FormRejection>,
) -> std::result::Result<Redirect, WebError> {
    let Form(pairs) = form?;
    let fields = fields_from_form(pairs);
    let note = Note::from_fields(&fields)?;

    // Insert flushes the snapshot to disk, so keep it off the async workers.
    let store = state.store.clone();
    let pending = note.clone();
    let id = tokio::task::spawn_blocking(move || store.blocking_lock().insert(&pending))
        .await
        .map_err(NotesError::from)??;
    info!(%id, important = note.important, "note submitted");

    Ok(Redirect::to("/"))
}

pub async fn read_item(
    path: std::result::Result<Path<i64>, PathRejection>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> std::result::Result<Json<ItemEcho>, WebError> {
    let Path(item_id) = path?;
    let Query(pairs) = query?;
    Ok(Json(ItemEcho {
        item_id,
        item_type: type_name_of(&item_id),
        q: parse_item_query(pairs),
    }))
}
