//! List/detail controller.
//!
//! Every flow re-derives the list and the detail pane from fresh fetches after
//! a mutation; nothing here is an authoritative cache. Flows take `&mut self`,
//! so a front-end runs them one at a time in the order the user asked.

use std::sync::Arc;

use shared::{
    domain::PostId,
    error::ValidationError,
    form::{EditDraft, NewPostDraft},
};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    notice::{Flow, Notice},
    store::{PostStore, StoreError},
    view::BoardView,
};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this post?";

const CREATED_MESSAGE: &str = "Post added successfully! ✨";
const UPDATED_MESSAGE: &str = "Post updated successfully! 🌟";
const DELETED_MESSAGE: &str = "Post deleted successfully! 🌸";

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{flow} failed: {source}")]
    Store { flow: Flow, source: StoreError },
    #[error("no post is being edited")]
    NotEditing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    NothingSelected,
    Declined,
    Deleted,
}

pub struct PostBoard {
    store: Arc<dyn PostStore>,
    view: BoardView,
    notices: mpsc::UnboundedSender<Notice>,
}

impl PostBoard {
    pub fn new(store: Arc<dyn PostStore>) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (notices, notice_rx) = mpsc::unbounded_channel();
        let board = Self {
            store,
            view: BoardView::default(),
            notices,
        };
        (board, notice_rx)
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn selection(&self) -> Option<&PostId> {
        self.view.selection()
    }

    pub fn new_post_form_mut(&mut self) -> &mut NewPostDraft {
        self.view.new_post_form_mut()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut EditDraft> {
        self.view.edit_form_mut()
    }

    /// Loads the list and selects its first post, if any.
    pub async fn display_posts(&mut self) -> Result<(), FlowError> {
        self.refresh_list(true).await
    }

    async fn refresh_list(&mut self, auto_select: bool) -> Result<(), FlowError> {
        let posts = self
            .store
            .list_posts()
            .await
            .map_err(|err| self.fail(Flow::LoadPosts, err))?;
        debug!(count = posts.len(), "loaded post list");

        self.view.replace_entries(&posts);
        if auto_select {
            if let Some(first) = posts.first() {
                self.handle_post_click(&first.id).await?;
            }
        }
        Ok(())
    }

    pub async fn handle_post_click(&mut self, id: &PostId) -> Result<(), FlowError> {
        let post = self
            .store
            .fetch_post(id)
            .await
            .map_err(|err| self.fail(Flow::LoadPost, err))?;
        debug!(post_id = %post.id, "showing post");

        let shown = post.id.clone();
        self.view.show_post(post);
        self.highlight_selected_post(&shown);
        Ok(())
    }

    pub fn highlight_selected_post(&mut self, id: &PostId) {
        self.view.mark_selected(id);
    }

    pub async fn submit_new_post(&mut self) -> Result<(), FlowError> {
        let body = self
            .view
            .new_post_form()
            .validate()
            .map_err(|err| self.reject(err))?;

        let created = self
            .store
            .create_post(&body)
            .await
            .map_err(|err| self.fail(Flow::CreatePost, err))?;
        info!(post_id = %created.id, title = %created.title, "created post");

        self.view.reset_new_post_form();
        // Follow-up fetches report their own failures; the post exists either way.
        let _ = self.refresh_list(false).await;
        let _ = self.handle_post_click(&created.id).await;
        self.notify(Notice::Success(CREATED_MESSAGE.to_string()));
        Ok(())
    }

    /// Opens the edit form for the selected post. Does nothing without a selection.
    pub async fn begin_edit(&mut self) -> Result<(), FlowError> {
        let Some(id) = self.view.selection().cloned() else {
            return Ok(());
        };

        let post = self
            .store
            .fetch_post(&id)
            .await
            .map_err(|err| self.fail(Flow::LoadForEdit, err))?;
        self.view.open_edit_form(post);
        Ok(())
    }

    pub async fn submit_edit(&mut self) -> Result<(), FlowError> {
        let Some((id, draft)) = self.view.editing_target() else {
            return Err(FlowError::NotEditing);
        };
        let patch = draft.validate().map_err(|err| self.reject(err))?;

        let updated = self
            .store
            .update_post(&id, &patch)
            .await
            .map_err(|err| self.fail(Flow::UpdatePost, err))?;
        info!(post_id = %updated.id, "updated post");

        self.view.close_edit_form();
        let _ = self.refresh_list(false).await;
        let _ = self.handle_post_click(&updated.id).await;
        self.notify(Notice::Success(UPDATED_MESSAGE.to_string()));
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.view.close_edit_form();
    }

    /// Deletes the selected post once `confirm` accepts [`DELETE_CONFIRMATION`].
    pub async fn delete_selected(
        &mut self,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<DeleteOutcome, FlowError> {
        let Some(id) = self.view.selection().cloned() else {
            return Ok(DeleteOutcome::NothingSelected);
        };
        if !confirm(DELETE_CONFIRMATION) {
            return Ok(DeleteOutcome::Declined);
        }

        self.store
            .delete_post(&id)
            .await
            .map_err(|err| self.fail(Flow::DeletePost, err))?;
        info!(post_id = %id, "deleted post");

        self.view.clear_detail();
        let _ = self.refresh_list(false).await;
        self.notify(Notice::Success(DELETED_MESSAGE.to_string()));
        Ok(DeleteOutcome::Deleted)
    }

    fn fail(&self, flow: Flow, source: StoreError) -> FlowError {
        error!(flow = %flow, error = %source, "post request failed");
        self.notify(Notice::failure(flow));
        FlowError::Store { flow, source }
    }

    fn reject(&self, err: ValidationError) -> FlowError {
        self.notify(Notice::Invalid(err.to_string()));
        FlowError::Invalid(err)
    }

    fn notify(&self, notice: Notice) {
        let _ = self.notices.send(notice);
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
