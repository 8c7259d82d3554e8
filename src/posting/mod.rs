//! Thin client for publishing text and image posts.

pub mod compose;
pub mod x_client;

use crate::models::identity::Identity;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("at most {max} media attachments per post, got {count}")]
    TooManyMedia { count: usize, max: usize },

    #[error("media file not found: {0}")]
    MediaNotFound(PathBuf),

    #[error("none of the {requested} requested media files exist")]
    NoUsableMedia { requested: usize },

    #[error("read media {path}: {source}")]
    Media {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Uploaded media reference returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResult {
    pub id: String,
    pub text: String,
}

impl PostResult {
    pub fn url(&self) -> String {
        format!("https://twitter.com/i/web/status/{}", self.id)
    }
}

/// Posting capability of a social-media account.
pub trait Poster {
    fn post_text(&self, text: &str) -> Result<PostResult, PostError>;
    fn upload_media(&self, path: &Path) -> Result<MediaHandle, PostError>;
    fn post_with_media(&self, text: &str, media: &[MediaHandle]) -> Result<PostResult, PostError>;
    fn who_am_i(&self) -> Result<Identity, PostError>;
}
