use chrono::DateTime;
use chrono::Utc;

use crate::user::models::UserId;

/// One edge of the follow graph as listed to clients: the other user's
/// public fields plus when the edge was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowEdge {
    pub user_id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub followed_at: DateTime<Utc>,
}
