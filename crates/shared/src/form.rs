//! Raw form contents as typed by the user, and their validation into request bodies.

use crate::{
    domain::Post,
    error::ValidationError,
    protocol::{NewPost, PostPatch},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPostDraft {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl NewPostDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
        }
    }

    pub fn validate(&self) -> Result<NewPost, ValidationError> {
        let title = self.title.trim();
        let content = self.content.trim();
        let author = self.author.trim();
        if title.is_empty() || content.is_empty() || author.is_empty() {
            return Err(ValidationError::IncompleteNewPost);
        }
        Ok(NewPost {
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub content: String,
}

impl EditDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self::new(post.title.clone(), post.content.clone())
    }

    pub fn validate(&self) -> Result<PostPatch, ValidationError> {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(ValidationError::IncompleteEdit);
        }
        Ok(PostPatch {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_fields_are_trimmed() {
        let body = NewPostDraft::new("  Hello ", "\tbody\n", " Ann ")
            .validate()
            .expect("valid draft");
        assert_eq!(body.title, "Hello");
        assert_eq!(body.content, "body");
        assert_eq!(body.author, "Ann");
    }

    #[test]
    fn new_post_requires_every_field() {
        for draft in [
            NewPostDraft::new("", "body", "Ann"),
            NewPostDraft::new("Hello", "   ", "Ann"),
            NewPostDraft::new("Hello", "body", ""),
        ] {
            assert_eq!(draft.validate(), Err(ValidationError::IncompleteNewPost));
        }
    }

    #[test]
    fn whitespace_only_edit_title_is_rejected() {
        let err = EditDraft::new(" ", "still here").validate().unwrap_err();
        assert_eq!(err, ValidationError::IncompleteEdit);
        assert_eq!(err.to_string(), "Please fill in title and content.");
    }
}
