//! Client core for the post board: the remote post store, the list/detail
//! controller that keeps selection and rendering in step, and settings.
//!
//! Nothing in here writes to a terminal or owns widgets. Front-ends read the
//! typed [`BoardView`] and drain [`Notice`]s from the channel handed out by
//! [`PostBoard::new`].

pub mod board;
pub mod config;
pub mod notice;
pub mod store;
pub mod view;

pub use board::{DeleteOutcome, FlowError, PostBoard, DELETE_CONFIRMATION};
pub use config::{load_settings, normalize_base_url, Settings};
pub use notice::{Flow, Notice};
pub use store::{HttpPostStore, PostStore, StoreError};
pub use view::{BoardView, DetailPane, ListEntry, DETAIL_PLACEHOLDER};

#[cfg(test)]
#[path = "tests/mock_backend.rs"]
mod mock_backend;
