//! Outcome notifications delivered to the front-end instead of modal alerts.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    LoadPosts,
    LoadPost,
    CreatePost,
    LoadForEdit,
    UpdatePost,
    DeletePost,
}

impl Flow {
    pub fn name(self) -> &'static str {
        match self {
            Flow::LoadPosts => "load_posts",
            Flow::LoadPost => "load_post",
            Flow::CreatePost => "create_post",
            Flow::LoadForEdit => "load_for_edit",
            Flow::UpdatePost => "update_post",
            Flow::DeletePost => "delete_post",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Flow::LoadPosts => "Unable to load posts. Please try again.",
            Flow::LoadPost => "Unable to load post details. Please try again.",
            Flow::CreatePost => "Unable to create post. Please try again.",
            Flow::LoadForEdit => "Unable to load post for editing. Please try again.",
            Flow::UpdatePost => "Unable to update post. Please try again.",
            Flow::DeletePost => "Unable to delete post. Please try again.",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure { flow: Flow, message: String },
    /// Form input rejected before any request went out.
    Invalid(String),
}

impl Notice {
    pub fn failure(flow: Flow) -> Self {
        Self::Failure {
            flow,
            message: flow.failure_message().to_string(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Invalid(message) => message,
            Notice::Failure { message, .. } => message,
        }
    }
}
