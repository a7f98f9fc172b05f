pub mod follow;
pub mod post;
pub mod user;
