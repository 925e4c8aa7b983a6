//! HTML rendering for the list page and error pages.

use std::fmt::Write;

use crate::projection::OutputRecord;

use super::routes::ListView;

const STYLESHEET: &str = "/static/style.css";

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{STYLESHEET}">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn note_item(record: &OutputRecord) -> String {
    let class = if record.important == Some(true) {
        "note important"
    } else {
        "note"
    };
    format!(
        r#"        <li class="{class}" data-id="{id}">
            <h3>{title}</h3>
            <p>{description}</p>
        </li>
"#,
        id = escape_html(&record.id),
        title = escape_html(record.title.as_deref().unwrap_or("")),
        description = escape_html(record.description.as_deref().unwrap_or("")),
    )
}

/// Render the note list with the submission form.
pub fn index_page(view: &ListView) -> String {
    let mut body = String::from("    <h1>Notes</h1>\n");

    if let Some(message) = &view.message {
        let _ = writeln!(
            body,
            r#"    <div class="message">{}</div>"#,
            escape_html(message)
        );
    }

    body.push_str(
        r#"    <form method="post" action="/submit">
        <input type="text" name="title" placeholder="Title" required>
        <textarea name="description" placeholder="Description" required></textarea>
        <label><input type="checkbox" name="important"> Important</label>
        <button type="submit">Add note</button>
    </form>
"#,
    );

    if view.notes.is_empty() {
        body.push_str("    <p class=\"empty\">No notes yet.</p>\n");
    } else {
        body.push_str("    <ul class=\"notes\">\n");
        for record in &view.notes {
            body.push_str(&note_item(record));
        }
        body.push_str("    </ul>\n");
    }

    page("Notes", &body)
}

/// Render an error page with a link back to the list.
pub fn error_page(heading: &str, detail: &str) -> String {
    let body = format!(
        r#"    <h1>{}</h1>
    <p class="error">{}</p>
    <p><a href="/">Back to notes</a></p>
"#,
        escape_html(heading),
        escape_html(detail),
    );
    page(heading, &body)
}
