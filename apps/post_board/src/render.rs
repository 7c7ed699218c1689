//! Plain-text rendering of the board and its notices.

use std::fmt::Write as _;

use client_core::{BoardView, Notice};

pub fn render_board(view: &BoardView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== Posts ==");
    if view.entries().is_empty() {
        let _ = writeln!(out, "  (no posts)");
    }
    for entry in view.entries() {
        let marker = if entry.selected { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} [{}] {}", entry.id, entry.title);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "== {} ==", view.detail_title());
    let author = view.detail_author();
    if !author.is_empty() {
        let _ = writeln!(out, "{author}");
    }
    if !view.detail_content().is_empty() {
        let _ = writeln!(out, "{}", view.detail_content());
    }

    let mut controls = Vec::new();
    if view.edit_button_visible() {
        controls.push("[edit]");
    }
    if view.delete_button_visible() {
        controls.push("[delete]");
    }
    if !controls.is_empty() {
        let _ = writeln!(out, "{}", controls.join(" "));
    }

    if let Some(form) = view.edit_form() {
        let _ = writeln!(out);
        let _ = writeln!(out, "-- editing --");
        let _ = writeln!(out, "title:   {}", form.title);
        let _ = writeln!(out, "content: {}", form.content);
        let _ = writeln!(out, "[save] [cancel]");
    }

    out
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Success(message) => format!("ok: {message}"),
        Notice::Failure { message, .. } => format!("error: {message}"),
        Notice::Invalid(message) => format!("invalid: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::Flow;

    #[test]
    fn empty_board_shows_placeholder_without_controls() {
        let text = render_board(&BoardView::default());
        assert!(text.contains("(no posts)"));
        assert!(text.contains("== Select a post to view details =="));
        assert!(!text.contains("[edit]"));
        assert!(!text.contains("[delete]"));
    }

    #[test]
    fn notices_are_prefixed_by_kind() {
        assert_eq!(
            render_notice(&Notice::failure(Flow::DeletePost)),
            "error: Unable to delete post. Please try again."
        );
        assert_eq!(
            render_notice(&Notice::Invalid("Please fill in title and content.".into())),
            "invalid: Please fill in title and content."
        );
    }
}
