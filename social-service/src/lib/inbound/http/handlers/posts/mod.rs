pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod get_timeline;
pub mod get_user_posts;
