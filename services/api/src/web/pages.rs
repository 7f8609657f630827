//! services/api/src/web/pages.rs
//!
//! Plain-HTML page rendering. Small enough that a template engine would be
//! more machinery than markup; every page is a `format!` over escaped
//! values.

use annotation_study_core::domain::{
    CompletionRow, ReaderPayload, SentenceConflict, StageEntry,
};

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>{}</body></html>",
        escape(title),
        body
    )
}

pub fn login(error: Option<&str>) -> String {
    let error_html = match error {
        Some(message) => format!("<p class=\"error\">{}</p>", escape(message)),
        None => String::new(),
    };
    page(
        "Log in",
        &format!(
            "<h1>Annotation Study</h1>{}\
             <form method=\"post\" action=\"/login\">\
             <label>Username <input name=\"username\"></label>\
             <label>Password <input name=\"password\" type=\"password\"></label>\
             <button type=\"submit\">Log in</button>\
             </form>",
            error_html
        ),
    )
}

pub fn stage_select(username: &str, stages: &[StageEntry]) -> String {
    let items: String = stages
        .iter()
        .map(|stage| {
            format!(
                "<li><a href=\"/go_to_stage?stage={}\">{}</a></li>",
                stage.number,
                escape(stage.label)
            )
        })
        .collect();
    page(
        "Select a stage",
        &format!(
            "<h1>Welcome, {}</h1><ul>{}</ul><p><a href=\"/logout\">Log out</a></p>",
            escape(username),
            items
        ),
    )
}

pub fn reader(payload: &ReaderPayload) -> String {
    let sentences: String = payload
        .sentences
        .iter()
        .map(|sentence| format!("<span class=\"sentence\">{}</span> ", escape(sentence)))
        .collect();
    page(
        "Reader",
        &format!(
            "<div class=\"progress\">{}%</div>\
             <p class=\"paragraph\" data-index=\"{}\" data-total=\"{}\">{}</p>\
             <form method=\"post\" action=\"/confirm\">\
             <input type=\"hidden\" name=\"selection\">\
             <input type=\"hidden\" name=\"duration\">\
             <button type=\"submit\">Confirm</button>\
             </form>",
            payload.percent, payload.index, payload.total, sentences
        ),
    )
}

pub fn reader_done() -> String {
    page(
        "Reader",
        "<h1>All paragraphs completed</h1><p><a href=\"/logout\">Log out</a></p>",
    )
}

pub fn justification(username: &str, conflicts: &[SentenceConflict]) -> String {
    let rows: String = conflicts
        .iter()
        .map(|conflict| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                conflict.paragraph_index,
                escape(&conflict.sentence),
                escape(&conflict.labels.join(", "))
            )
        })
        .collect();
    let table = if conflicts.is_empty() {
        "<p>No label conflicts to justify.</p>".to_string()
    } else {
        format!(
            "<table><tr><th>Paragraph</th><th>Sentence</th><th>Labels</th></tr>{}</table>",
            rows
        )
    };
    page(
        "Justification",
        &format!("<h1>Label conflicts for {}</h1>{}", escape(username), table),
    )
}

pub fn not_yet_open() -> String {
    page(
        "Not yet open",
        "<h1>This stage is not yet open</h1><p><a href=\"/stage_select\">Back</a></p>",
    )
}

pub fn admin_dashboard(rows: &[CompletionRow]) -> String {
    let body_rows: String = rows
        .iter()
        .map(|row| {
            let total = row
                .total
                .map(|t| t.to_string())
                .unwrap_or_else(|| "?".to_string());
            let user = escape(&row.user);
            format!(
                "<tr><td>{user}</td><td>{completed}</td><td>{total}</td><td>{done}</td>\
                 <td><a href=\"/download_db/{user}\">download</a> \
                 <a href=\"/admin/reset_user/{user}\">reset</a></td></tr>",
                completed = row.completed,
                done = if row.done { "yes" } else { "no" },
            )
        })
        .collect();
    page(
        "Admin",
        &format!(
            "<h1>Completion dashboard</h1>\
             <table><tr><th>User</th><th>Completed</th><th>Total</th><th>Done</th><th></th></tr>{}</table>\
             <p><a href=\"/admin/reset_all\">Reset all</a> <a href=\"/logout\">Log out</a></p>",
            body_rows
        ),
    )
}
