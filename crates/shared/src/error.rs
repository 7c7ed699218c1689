use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in title, content, and author.")]
    IncompleteNewPost,
    #[error("Please fill in title and content.")]
    IncompleteEdit,
}
