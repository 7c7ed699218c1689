//! Typed view model for the list/detail layout.
//!
//! Front-ends read everything through accessors; only the controller in
//! [`crate::board`] changes list entries, selection, and the detail pane. The
//! two forms are the exception since their fields are user input.

use shared::{
    domain::{Post, PostId},
    form::{EditDraft, NewPostDraft},
};

pub const DETAIL_PLACEHOLDER: &str = "Select a post to view details";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: PostId,
    pub title: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailPane {
    #[default]
    Empty,
    Viewing(Post),
    Editing {
        post: Post,
        form: EditDraft,
    },
}

#[derive(Debug, Clone, Default)]
pub struct BoardView {
    entries: Vec<ListEntry>,
    selection: Option<PostId>,
    detail: DetailPane,
    new_post: NewPostDraft,
}

impl BoardView {
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn selection(&self) -> Option<&PostId> {
        self.selection.as_ref()
    }

    pub fn highlighted(&self) -> Option<&PostId> {
        self.entries
            .iter()
            .find(|entry| entry.selected)
            .map(|entry| &entry.id)
    }

    pub fn detail(&self) -> &DetailPane {
        &self.detail
    }

    fn shown_post(&self) -> Option<&Post> {
        match &self.detail {
            DetailPane::Empty => None,
            DetailPane::Viewing(post) | DetailPane::Editing { post, .. } => Some(post),
        }
    }

    pub fn detail_title(&self) -> &str {
        self.shown_post()
            .map(|post| post.title.as_str())
            .unwrap_or(DETAIL_PLACEHOLDER)
    }

    pub fn detail_content(&self) -> &str {
        self.shown_post()
            .map(|post| post.content.as_str())
            .unwrap_or_default()
    }

    pub fn detail_author(&self) -> String {
        self.shown_post().map(Post::byline).unwrap_or_default()
    }

    pub fn edit_button_visible(&self) -> bool {
        matches!(self.detail, DetailPane::Viewing(_))
    }

    pub fn delete_button_visible(&self) -> bool {
        !matches!(self.detail, DetailPane::Empty)
    }

    pub fn edit_form(&self) -> Option<&EditDraft> {
        match &self.detail {
            DetailPane::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut EditDraft> {
        match &mut self.detail {
            DetailPane::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn new_post_form(&self) -> &NewPostDraft {
        &self.new_post
    }

    pub fn new_post_form_mut(&mut self) -> &mut NewPostDraft {
        &mut self.new_post
    }

    /// Rebuilds the list; the marker survives only on the still-selected post.
    pub(crate) fn replace_entries(&mut self, posts: &[Post]) {
        self.entries = posts
            .iter()
            .map(|post| ListEntry {
                id: post.id.clone(),
                title: post.title.clone(),
                selected: self.selection.as_ref() == Some(&post.id),
            })
            .collect();
    }

    pub(crate) fn mark_selected(&mut self, id: &PostId) {
        for entry in &mut self.entries {
            entry.selected = &entry.id == id;
        }
    }

    /// Selects `post` and shows it read-only, dropping any open edit form.
    pub(crate) fn show_post(&mut self, post: Post) {
        self.selection = Some(post.id.clone());
        self.detail = DetailPane::Viewing(post);
    }

    pub(crate) fn open_edit_form(&mut self, post: Post) {
        let form = EditDraft::from_post(&post);
        self.detail = DetailPane::Editing { post, form };
    }

    pub(crate) fn close_edit_form(&mut self) {
        self.detail = match std::mem::take(&mut self.detail) {
            DetailPane::Editing { post, .. } => DetailPane::Viewing(post),
            other => other,
        };
    }

    pub(crate) fn editing_target(&self) -> Option<(PostId, EditDraft)> {
        match (&self.selection, &self.detail) {
            (Some(id), DetailPane::Editing { form, .. }) => Some((id.clone(), form.clone())),
            _ => None,
        }
    }

    pub(crate) fn clear_detail(&mut self) {
        self.selection = None;
        self.detail = DetailPane::Empty;
        for entry in &mut self.entries {
            entry.selected = false;
        }
    }

    pub(crate) fn reset_new_post_form(&mut self) {
        self.new_post = NewPostDraft::default();
    }
}
