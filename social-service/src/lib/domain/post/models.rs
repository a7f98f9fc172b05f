use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::post::errors::PostError;
use crate::user::models::UserId;

/// Post unique identifier, assigned by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A post joined with its author's public fields.
///
/// Every read path returns posts with author data attached, so the domain
/// model carries it rather than forcing a second lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: PostAuthor,
}

/// Public author fields joined onto each post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAuthor {
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Command to create a post. Content is trimmed and must be non-empty.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    content: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
}

impl CreatePostCommand {
    /// # Errors
    /// * `EmptyContent` - Content is empty or whitespace-only
    pub fn new(
        content: String,
        media_url: Option<String>,
        media_type: Option<String>,
    ) -> Result<Self, PostError> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(PostError::EmptyContent);
        }

        Ok(Self {
            content,
            media_url,
            media_type,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
