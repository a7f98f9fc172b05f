pub mod follow_status;
pub mod follow_user;
pub mod get_followers;
pub mod get_following;
pub mod unfollow_user;
